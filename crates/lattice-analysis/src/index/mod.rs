//! Module indexing — a queryable, insertion-ordered view of module metadata.

use indexmap::IndexMap;
use lattice_core::types::{EnvironmentConfig, ModuleConfig};
use serde::{Deserialize, Serialize};

/// Per-module metadata summary exposed on the analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSummary {
    #[serde(rename = "type")]
    pub module_type: String,
    #[serde(rename = "outputsCount")]
    pub outputs_count: usize,
    #[serde(rename = "variablesCount")]
    pub variables_count: usize,
    #[serde(rename = "resourcesCount")]
    pub resources_count: usize,
    #[serde(rename = "dataSourcesCount")]
    pub data_sources_count: usize,
}

/// Name-keyed module lookup built once per resolution run.
///
/// Iteration follows input order, so lookups that stop at the first match are
/// deterministic for a given input.
#[derive(Debug, Default)]
pub struct ModuleIndex {
    modules: IndexMap<String, ModuleConfig>,
}

impl ModuleIndex {
    /// Build the index from an environment's module set.
    ///
    /// Module names are taken from the map keys; a module whose `name` field
    /// disagrees with (or omits) its key is normalized to the key.
    pub fn build(environment: &EnvironmentConfig) -> Self {
        let mut modules = IndexMap::with_capacity(environment.modules.len());
        for (name, config) in &environment.modules {
            let mut module = config.clone();
            module.name = name.clone();
            modules.insert(name.clone(), module);
        }
        Self { modules }
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ModuleConfig> {
        self.modules.get(name)
    }

    /// All modules in input order.
    pub fn modules(&self) -> impl Iterator<Item = (&str, &ModuleConfig)> {
        self.modules.iter().map(|(name, m)| (name.as_str(), m))
    }

    /// Find the first module owning the given managed resource.
    ///
    /// When `resource_name` is `None` and `resource_ref` contains a `.`, the
    /// reference is split into `(type, name)`. Without a name the match is on
    /// resource type alone. First match in index order wins; if several modules
    /// coincidentally define a same-named resource of the same type, the
    /// earliest-indexed one is returned.
    pub fn find_module_with_resource(
        &self,
        resource_ref: &str,
        resource_name: Option<&str>,
    ) -> Option<&str> {
        let (resource_type, name) = match resource_name {
            Some(name) => (resource_ref, Some(name)),
            None => match resource_ref.split_once('.') {
                Some((t, n)) => (t, Some(n)),
                None => (resource_ref, None),
            },
        };

        for (module_name, module) in &self.modules {
            if let Some(by_name) = module.managed_resources.get(resource_type) {
                match name {
                    Some(n) if !by_name.contains_key(n) => continue,
                    _ => return Some(module_name.as_str()),
                }
            }
        }
        None
    }

    /// Per-module summaries for the `moduleIndex` section of the result.
    pub fn summaries(&self) -> IndexMap<String, ModuleSummary> {
        self.modules
            .iter()
            .map(|(name, module)| {
                let resources_count = module
                    .managed_resources
                    .values()
                    .map(|by_name| by_name.len())
                    .sum();
                let data_sources_count = module
                    .data_resources
                    .values()
                    .map(|by_name| by_name.len())
                    .sum();
                (
                    name.clone(),
                    ModuleSummary {
                        module_type: module.module_type.clone(),
                        outputs_count: module.outputs.len(),
                        variables_count: module.variables.len(),
                        resources_count,
                        data_sources_count,
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env_with_modules(modules: serde_json::Value) -> EnvironmentConfig {
        serde_json::from_value(json!({
            "environment": "dev",
            "modules": modules
        }))
        .unwrap()
    }

    #[test]
    fn find_by_type_and_name() {
        let env = env_with_modules(json!({
            "storage": {
                "type": "storage",
                "managedResources": {"aws_s3_bucket": {"artifacts": {}}}
            },
            "network": {
                "type": "network",
                "managedResources": {"aws_vpc": {"main": {}}}
            }
        }));
        let index = ModuleIndex::build(&env);

        assert_eq!(
            index.find_module_with_resource("aws_s3_bucket", Some("artifacts")),
            Some("storage")
        );
        assert_eq!(
            index.find_module_with_resource("aws_vpc.main", None),
            Some("network")
        );
        assert_eq!(index.find_module_with_resource("aws_vpc.other", None), None);
    }

    #[test]
    fn find_by_type_alone_without_dot() {
        let env = env_with_modules(json!({
            "network": {
                "type": "network",
                "managedResources": {"aws_vpc": {"main": {}}}
            }
        }));
        let index = ModuleIndex::build(&env);
        assert_eq!(index.find_module_with_resource("aws_vpc", None), Some("network"));
    }

    #[test]
    fn first_match_wins_in_input_order() {
        let env = env_with_modules(json!({
            "alpha": {
                "type": "service",
                "managedResources": {"aws_sqs_queue": {"jobs": {}}}
            },
            "beta": {
                "type": "service",
                "managedResources": {"aws_sqs_queue": {"jobs": {}}}
            }
        }));
        let index = ModuleIndex::build(&env);
        assert_eq!(
            index.find_module_with_resource("aws_sqs_queue.jobs", None),
            Some("alpha")
        );
    }

    #[test]
    fn summaries_count_nested_resources() {
        let env = env_with_modules(json!({
            "app": {
                "type": "service",
                "variables": {"a": {}, "b": {}},
                "outputs": {"url": {}},
                "managedResources": {
                    "aws_instance": {"web": {}, "worker": {}},
                    "aws_s3_bucket": {"logs": {}}
                },
                "dataResources": {"aws_ami": {"ubuntu": {}}}
            }
        }));
        let index = ModuleIndex::build(&env);
        let summaries = index.summaries();
        let app = &summaries["app"];
        assert_eq!(app.variables_count, 2);
        assert_eq!(app.outputs_count, 1);
        assert_eq!(app.resources_count, 3);
        assert_eq!(app.data_sources_count, 1);
    }
}
