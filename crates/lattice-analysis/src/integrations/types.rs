//! Cross-application dependency types.

use lattice_core::errors::ResolveWarning;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How two applications are coupled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationKind {
    /// One application calls another's HTTP API.
    ApiIntegration,
    /// Topic-owner-to-subscriber coupling via SNS/SQS.
    MessagingIntegration,
    /// IAM-granted access to another application's S3 data.
    DataIntegration,
}

impl IntegrationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiIntegration => "api_integration",
            Self::MessagingIntegration => "messaging_integration",
            Self::DataIntegration => "data_integration",
        }
    }
}

impl std::fmt::Display for IntegrationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected coupling between two applications.
///
/// Endpoints are qualified as `app.resource_type.resource_name` where a
/// concrete resource is identifiable; the API detector's callee side is the
/// bare application name, since its heuristic identifies the application, not
/// a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossAppDependency {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: IntegrationKind,
    pub metadata: Value,
}

/// Result of one cross-application scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrossAppAnalysis {
    pub integrations: Vec<CrossAppDependency>,
    pub warnings: Vec<ResolveWarning>,
}

impl CrossAppAnalysis {
    /// Append unless an identical edge (same endpoints, kind, and deep-equal
    /// metadata) was already recorded, matching the module-level dedup rule.
    pub(crate) fn push_unique(&mut self, dependency: CrossAppDependency) {
        let duplicate = self.integrations.iter().any(|existing| {
            existing.from == dependency.from
                && existing.to == dependency.to
                && existing.kind == dependency.kind
                && existing.metadata == dependency.metadata
        });
        if !duplicate {
            self.integrations.push(dependency);
        }
    }

    pub(crate) fn warn(&mut self, context: impl Into<String>, message: impl Into<String>) {
        let warning = ResolveWarning::new(context, message);
        tracing::warn!(context = %warning.context, message = %warning.message, "skipping malformed attribute");
        self.warnings.push(warning);
    }
}
