use crate::annotate::{DEFAULT_FAILURE_COLOR, DEFAULT_SUCCESS_COLOR};
use crate::encode::DEFAULT_RENDER_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub colors: ColorConfig,
    pub render: RenderConfig,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    pub success: String,
    pub failure: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            success: DEFAULT_SUCCESS_COLOR.to_string(),
            failure: DEFAULT_FAILURE_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Rendering-service endpoint the hex payload is appended to.
    pub base_url: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_RENDER_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Workflow engine CLI binary.
    pub binary: String,
    /// Query type returning the PlantUML definition.
    pub definition_query: String,
    /// Query type returning the status snapshot.
    pub status_query: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: "temporal".to_string(),
            definition_query: "getPlantUMLWorkflowDefinition".to_string(),
            status_query: "getWorkflowInfo".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    success_color: Option<String>,
    failure_color: Option<String>,
    base_url: Option<String>,
    engine_binary: Option<String>,
    definition_query: Option<String>,
    status_query: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    apply_config_file(&mut config, parse_config_file(&contents)?);
    Ok(config)
}

fn parse_config_file(contents: &str) -> anyhow::Result<ConfigFile> {
    if let Ok(parsed) = serde_json::from_str(contents) {
        return Ok(parsed);
    }
    // Lenient fallback for hand-written configs (comments, trailing commas).
    Ok(json5::from_str(contents)?)
}

fn apply_config_file(config: &mut Config, file: ConfigFile) {
    if let Some(v) = file.success_color {
        config.colors.success = v;
    }
    if let Some(v) = file.failure_color {
        config.colors.failure = v;
    }
    if let Some(v) = file.base_url {
        config.render.base_url = v;
    }
    if let Some(v) = file.engine_binary {
        config.engine.binary = v;
    }
    if let Some(v) = file.definition_query {
        config.engine.definition_query = v;
    }
    if let Some(v) = file.status_query {
        config.engine.status_query = v;
    }
}
