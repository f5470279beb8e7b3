//! Property test: resolution is deterministic and dedup is stable.

use lattice_analysis::resolver::resolve_cross_module_dependencies;
use lattice_core::config::AnalysisConfig;
use lattice_core::types::EnvironmentConfig;
use proptest::prelude::*;
use serde_json::json;

/// A reference to one of the candidate modules, or plain text.
fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0usize..6).prop_map(|i| format!("module.m{i}.out")),
        "[a-z]{1,12}".prop_map(|s| s),
    ]
}

fn environment_strategy() -> impl Strategy<Value = EnvironmentConfig> {
    (2usize..6, proptest::collection::vec(value_strategy(), 1..8)).prop_map(
        |(module_count, values)| {
            let mut modules = serde_json::Map::new();
            for i in 0..module_count {
                let vars: serde_json::Map<String, serde_json::Value> = values
                    .iter()
                    .enumerate()
                    .map(|(v, value)| (format!("v{v}"), json!(value)))
                    .collect();
                modules.insert(
                    format!("m{i}"),
                    json!({
                        "type": "service",
                        "outputs": {"out": {}},
                        "resolvedVariables": vars
                    }),
                );
            }
            serde_json::from_value(json!({ "environment": "prop", "modules": modules })).unwrap()
        },
    )
}

proptest! {
    #[test]
    fn resolution_is_deterministic(environment in environment_strategy()) {
        let config = AnalysisConfig::default();
        let first = resolve_cross_module_dependencies(&environment, &config).unwrap();
        let second = resolve_cross_module_dependencies(&environment, &config).unwrap();

        prop_assert_eq!(&first.dependencies, &second.dependencies);
        prop_assert_eq!(&first.circular_dependencies, &second.circular_dependencies);
    }

    #[test]
    fn dedup_never_keeps_a_true_duplicate(environment in environment_strategy()) {
        let result =
            resolve_cross_module_dependencies(&environment, &AnalysisConfig::default()).unwrap();
        for (i, a) in result.dependencies.iter().enumerate() {
            for b in result.dependencies.iter().skip(i + 1) {
                prop_assert!(
                    !(a.from == b.from
                        && a.to == b.to
                        && a.kind == b.kind
                        && a.metadata == b.metadata)
                );
            }
        }
    }

    #[test]
    fn edges_only_target_known_modules(environment in environment_strategy()) {
        let result =
            resolve_cross_module_dependencies(&environment, &AnalysisConfig::default()).unwrap();
        for dep in &result.dependencies {
            prop_assert!(environment.modules.contains_key(&dep.from));
            prop_assert!(environment.modules.contains_key(&dep.to));
            prop_assert_ne!(&dep.from, &dep.to);
        }
    }
}
