//! Resolution errors and non-fatal warning collection.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Errors that abort an entire resolution run.
///
/// Local degradations (malformed embedded JSON, unresolvable references) never
/// surface here — they become [`ResolveWarning`]s or silently produce no edge.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Invalid heuristic pattern {pattern:?}: {message}")]
    InvalidHeuristicPattern { pattern: String, message: String },

    #[error("Failed to serialize {context}: {source}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// A non-fatal degradation recorded during a completed run.
///
/// Warnings let callers assert on degraded-but-completed runs instead of
/// scraping log output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveWarning {
    /// Where the degradation happened, e.g. `insight-engine.aws_ecs_task_definition.api`.
    pub context: String,
    pub message: String,
}

impl ResolveWarning {
    pub fn new(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            message: message.into(),
        }
    }
}
