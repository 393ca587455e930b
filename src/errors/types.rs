use thiserror::Error;

/// Error kinds produced by the plugin matcher, registry, execution engine,
/// and scan workflow.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("plugin not found: {0}")]
    PluginNotFound(String),

    #[error("duplicate plugin name: {0}")]
    DuplicatePluginName(String),

    #[error("plugin '{name}' execution failed: {cause}")]
    PluginExecutionFailed { name: String, cause: String },

    #[error("plugin '{name}' exceeded its {limit_secs}s timeout")]
    TimeoutExceeded { name: String, limit_secs: u64 },

    #[error("plugin '{name}' was cancelled and did not drain within its grace period")]
    Cancelled { name: String },

    #[error("scan workflow failure in phase '{phase}': {reason}")]
    ScanWorkflowFailure { phase: String, reason: String },

    #[error("invalid argument --{flag}: {reason}")]
    InvalidArgument { flag: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ScanError {
    pub fn execution_failed(name: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        ScanError::PluginExecutionFailed {
            name: name.into(),
            cause: cause.to_string(),
        }
    }
}
