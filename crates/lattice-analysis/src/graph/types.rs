//! Dependency edge and graph types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How one module depends on another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// A resolved variable value references another module's output.
    VariableReference,
    /// A local value references another module's output.
    LocalReference,
    /// A managed resource body references another module's output.
    ResourceReference,
    /// A data resource reads infrastructure owned by another module.
    DataSourceDependency,
    /// A declared variable default references another module's output.
    VariableDefaultReference,
    /// A `depends_on` declaration targets another module's resource.
    ExplicitDependency,
}

impl DependencyKind {
    /// Wire name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VariableReference => "variable_reference",
            Self::LocalReference => "local_reference",
            Self::ResourceReference => "resource_reference",
            Self::DataSourceDependency => "data_source_dependency",
            Self::VariableDefaultReference => "variable_default_reference",
            Self::ExplicitDependency => "explicit_dependency",
        }
    }
}

impl std::fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single directed dependency between two modules.
///
/// Metadata is free-form JSON identifying the referencing attribute or
/// resource and the literal matched text. Two edges are duplicates only when
/// `(from, to, kind)` match and their metadata is deep-value equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: DependencyKind,
    pub metadata: Value,
}

/// A node of the assembled graph — exactly one per indexed module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub label: String,
}

/// A displayable edge, a direct projection of one [`Dependency`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: DependencyKind,
    pub metadata: Value,
}

/// The assembled node/edge graph handed to downstream consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}
