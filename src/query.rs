use crate::config::EngineConfig;
use crate::status::WorkflowStatus;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::process::Command;
use thiserror::Error;

// The engine CLI prints a human-readable header before the query result and
// has no raw output mode; the payload is the first stdout line carrying a
// JSON array.
static JSON_ARRAY_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\[").unwrap());

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("failed to run `{binary}`: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{binary}` exited with {status}: {stderr}")]
    EngineFailure {
        binary: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("no JSON result found in query output")]
    MissingPayload,
    #[error("query returned an empty result")]
    EmptyResult,
    #[error("diagram definition query did not return text")]
    NonTextDefinition,
    #[error("malformed query payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Narrow interface over the engine's two visualization queries, so the
/// rendering pipeline can run against canned inputs with no process
/// execution.
pub trait WorkflowSource {
    fn diagram_definition(&self, workflow_id: &str) -> Result<String, QueryError>;
    fn workflow_status(&self, workflow_id: &str) -> Result<WorkflowStatus, QueryError>;
}

/// Queries a workflow engine through its CLI
/// (`<binary> workflow query --type <type> --workflow-id <id>`).
#[derive(Debug, Clone)]
pub struct EngineCli {
    binary: String,
    definition_query: String,
    status_query: String,
}

impl EngineCli {
    pub fn new(engine: &EngineConfig) -> Self {
        Self {
            binary: engine.binary.clone(),
            definition_query: engine.definition_query.clone(),
            status_query: engine.status_query.clone(),
        }
    }

    fn query(&self, query_type: &str, workflow_id: &str) -> Result<Value, QueryError> {
        let output = Command::new(&self.binary)
            .args([
                "workflow",
                "query",
                "--type",
                query_type,
                "--workflow-id",
                workflow_id,
            ])
            .output()
            .map_err(|source| QueryError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(QueryError::EngineFailure {
                binary: self.binary.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        first_result(&String::from_utf8_lossy(&output.stdout))
    }
}

impl WorkflowSource for EngineCli {
    fn diagram_definition(&self, workflow_id: &str) -> Result<String, QueryError> {
        match self.query(&self.definition_query, workflow_id)? {
            Value::String(diagram) => Ok(diagram),
            _ => Err(QueryError::NonTextDefinition),
        }
    }

    fn workflow_status(&self, workflow_id: &str) -> Result<WorkflowStatus, QueryError> {
        Ok(serde_json::from_value(
            self.query(&self.status_query, workflow_id)?,
        )?)
    }
}

/// Extracts the first element of the first JSON-array line in the CLI
/// output.
fn first_result(stdout: &str) -> Result<Value, QueryError> {
    let line = stdout
        .lines()
        .find(|line| JSON_ARRAY_LINE_RE.is_match(line))
        .ok_or(QueryError::MissingPayload)?;
    let mut results: Vec<Value> = serde_json::from_str(line)?;
    if results.is_empty() {
        return Err(QueryError::EmptyResult);
    }
    Ok(results.remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_header_and_takes_first_element() {
        let stdout = "Query result:\n[\"@startuml\\nA --> B\\n@enduml\"]\n";
        let value = first_result(stdout).unwrap();
        assert_eq!(value.as_str().unwrap(), "@startuml\nA --> B\n@enduml");
    }

    #[test]
    fn status_payload_deserializes_from_envelope() {
        let stdout = concat!(
            "Query result:\n",
            r#"[{"legend": "key", "activeStates": [{"stateName": "A", "isError": true}]}]"#,
            "\n",
        );
        let status: WorkflowStatus = serde_json::from_value(first_result(stdout).unwrap()).unwrap();
        assert_eq!(status.legend.as_deref(), Some("key"));
        assert!(status.active_states[0].is_error);
    }

    #[test]
    fn output_without_array_is_missing_payload() {
        let err = first_result("workflow not found\n").unwrap_err();
        assert!(matches!(err, QueryError::MissingPayload));
    }

    #[test]
    fn empty_array_is_empty_result() {
        let err = first_result("Query result:\n[]\n").unwrap_err();
        assert!(matches!(err, QueryError::EmptyResult));
    }

    #[test]
    fn unparseable_array_line_is_payload_error() {
        let err = first_result("[not json\n").unwrap_err();
        assert!(matches!(err, QueryError::Payload(_)));
    }
}
