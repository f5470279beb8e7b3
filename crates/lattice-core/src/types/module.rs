//! Parsed module configuration as delivered by the upstream config parser.
//!
//! All collections are insertion-ordered (`IndexMap`) so that first-match
//! resource lookup and edge emission order are deterministic for a given input.
//! Missing collections deserialize to empty maps, never to an absent field.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A declared input variable of a module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableDef {
    /// Declared type expression, verbatim (e.g. `string`, `map(string)`).
    #[serde(rename = "type")]
    pub var_type: Option<String>,
    pub description: Option<String>,
    /// Declared default value. `None` means the variable is required.
    pub default: Option<Value>,
    pub sensitive: Option<bool>,
    /// Validation blocks, carried through untouched.
    pub validation: Option<Value>,
}

/// A declared output of a module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputDef {
    pub value: Option<Value>,
    pub description: Option<String>,
    pub sensitive: Option<bool>,
}

/// Environment-resolved configuration of a single module.
///
/// `resolved_variables[name] == None` signals an unresolved required variable:
/// no environment override and no declared default. Downstream consumers rely
/// on being able to detect that state, so the entry is kept rather than dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub module_type: String,
    pub variables: IndexMap<String, VariableDef>,
    pub outputs: IndexMap<String, OutputDef>,
    pub locals: IndexMap<String, Value>,
    /// Managed resources: resource type → resource name → body.
    #[serde(rename = "managedResources")]
    pub managed_resources: IndexMap<String, IndexMap<String, Value>>,
    /// Data resources (read-only lookups): data type → data name → body.
    #[serde(rename = "dataResources")]
    pub data_resources: IndexMap<String, IndexMap<String, Value>>,
    #[serde(rename = "resolvedVariables")]
    pub resolved_variables: IndexMap<String, Option<Value>>,
}

/// Per-environment input to a resolution run: every module of the repository
/// with its variables already resolved against the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub variables: IndexMap<String, Value>,
    #[serde(rename = "backendConfig")]
    pub backend_config: IndexMap<String, Value>,
    pub modules: IndexMap<String, ModuleConfig>,
}
