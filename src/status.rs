use serde::Deserialize;

/// Snapshot of a workflow's execution state as returned by the engine's
/// status query. Field names follow the engine payload (`activeStates`,
/// `stateName`, `isError`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStatus {
    /// Free text explaining the color key; no legend block is emitted when
    /// absent.
    #[serde(default)]
    pub legend: Option<String>,
    /// States the workflow currently occupies, in engine-reported order.
    #[serde(default)]
    pub active_states: Vec<StateStatus>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateStatus {
    pub state_name: String,
    #[serde(default)]
    pub is_error: bool,
}

impl StateStatus {
    pub fn new(state_name: &str) -> Self {
        Self {
            state_name: state_name.to_string(),
            is_error: false,
        }
    }

    pub fn error(state_name: &str) -> Self {
        Self {
            state_name: state_name.to_string(),
            is_error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_engine_payload() {
        let status: WorkflowStatus = serde_json::from_str(
            r#"{
                "legend": "green: active",
                "activeStates": [
                    {"stateName": "Ingest", "isError": false},
                    {"stateName": "Validate", "isError": true}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(status.legend.as_deref(), Some("green: active"));
        assert_eq!(status.active_states.len(), 2);
        assert_eq!(status.active_states[0].state_name, "Ingest");
        assert!(!status.active_states[0].is_error);
        assert!(status.active_states[1].is_error);
    }

    #[test]
    fn missing_fields_default() {
        let status: WorkflowStatus =
            serde_json::from_str(r#"{"activeStates": [{"stateName": "A"}]}"#).unwrap();
        assert!(status.legend.is_none());
        assert!(!status.active_states[0].is_error);

        let empty: WorkflowStatus = serde_json::from_str("{}").unwrap();
        assert!(empty.active_states.is_empty());
    }
}
