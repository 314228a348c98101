use crate::agent::AgentKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Agent '{id}' not found in registry")]
    AgentNotFound { id: String },

    #[error("Agent '{id}' is a {actual}, expected a {expected}")]
    KindMismatch {
        id: String,
        expected: AgentKind,
        actual: AgentKind,
    },

    #[error("No behavior registered for agent kind {kind}")]
    BehaviorNotRegistered { kind: AgentKind },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Fatal build-time problems. Nothing here is recoverable once stepping
/// has started, so they are only raised while the world is assembled.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Duplicate agent id '{id}'")]
    DuplicateAgent { id: String },

    #[error("Population count '{field}' must be positive, got {value}")]
    NonPositiveCount { field: &'static str, value: usize },

    #[error("Expected {expected} {kind} records, got {actual}")]
    PopulationMismatch {
        kind: AgentKind,
        expected: usize,
        actual: usize,
    },

    #[error("Agent '{agent_id}' references unknown region '{region_id}'")]
    UnknownRegion { agent_id: String, region_id: String },

    #[error("Malformed population data in {source_name}: {reason}")]
    MalformedPopulation { source_name: String, reason: String },

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

pub type SimResult<T> = Result<T, SimError>;
