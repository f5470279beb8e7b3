//! Summary statistics over the accumulated dependency list.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::index::ModuleIndex;

use super::types::{Dependency, DependencyKind};

/// Outgoing/incoming edge counts for one module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDependencyCount {
    pub outgoing: usize,
    pub incoming: usize,
    pub total: usize,
}

/// One row of the most-depended ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCoupling {
    pub module: String,
    pub outgoing: usize,
    pub incoming: usize,
    pub total: usize,
}

/// Aggregated dependency statistics for one resolution run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyStatistics {
    #[serde(rename = "totalDependencies")]
    pub total_dependencies: usize,
    /// Edge count per dependency kind, keyed by wire name.
    #[serde(rename = "dependencyTypes")]
    pub dependency_kinds: IndexMap<DependencyKind, usize>,
    #[serde(rename = "moduleDependencyCounts")]
    pub module_dependency_counts: IndexMap<String, ModuleDependencyCount>,
    /// Most coupled modules, descending by total edge count.
    #[serde(rename = "mostDependendModules")]
    pub most_depended_modules: Vec<ModuleCoupling>,
    /// Modules with neither incoming nor outgoing edges.
    #[serde(rename = "isolatedModules")]
    pub isolated_modules: Vec<String>,
}

/// Aggregate counts, the most-coupled ranking, and isolated modules.
///
/// Module rows are keyed in index order; the ranking is a stable sort, so ties
/// keep index order too.
pub fn compute_statistics(
    index: &ModuleIndex,
    dependencies: &[Dependency],
    most_depended_limit: usize,
) -> DependencyStatistics {
    let mut dependency_kinds: IndexMap<DependencyKind, usize> = IndexMap::new();
    let mut module_counts: IndexMap<String, ModuleDependencyCount> = index
        .modules()
        .map(|(name, _)| (name.to_string(), ModuleDependencyCount::default()))
        .collect();

    for dep in dependencies {
        *dependency_kinds.entry(dep.kind).or_insert(0) += 1;

        if let Some(counts) = module_counts.get_mut(&dep.from) {
            counts.outgoing += 1;
            counts.total += 1;
        }
        if let Some(counts) = module_counts.get_mut(&dep.to) {
            counts.incoming += 1;
            counts.total += 1;
        }
    }

    let mut ranking: Vec<ModuleCoupling> = module_counts
        .iter()
        .map(|(module, counts)| ModuleCoupling {
            module: module.clone(),
            outgoing: counts.outgoing,
            incoming: counts.incoming,
            total: counts.total,
        })
        .collect();
    ranking.sort_by(|a, b| b.total.cmp(&a.total));
    ranking.truncate(most_depended_limit);

    let isolated_modules = module_counts
        .iter()
        .filter(|(_, counts)| counts.total == 0)
        .map(|(module, _)| module.clone())
        .collect();

    DependencyStatistics {
        total_dependencies: dependencies.len(),
        dependency_kinds,
        module_dependency_counts: module_counts,
        most_depended_modules: ranking,
        isolated_modules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_core::types::EnvironmentConfig;
    use serde_json::json;

    fn index_of(names: &[&str]) -> ModuleIndex {
        let modules: serde_json::Map<String, serde_json::Value> = names
            .iter()
            .map(|n| (n.to_string(), json!({"type": "module"})))
            .collect();
        let env: EnvironmentConfig =
            serde_json::from_value(json!({"environment": "dev", "modules": modules})).unwrap();
        ModuleIndex::build(&env)
    }

    fn dep(from: &str, to: &str, kind: DependencyKind) -> Dependency {
        Dependency {
            from: from.to_string(),
            to: to.to_string(),
            kind,
            metadata: json!({}),
        }
    }

    #[test]
    fn counts_and_histogram() {
        let index = index_of(&["a", "b", "c"]);
        let deps = vec![
            dep("a", "b", DependencyKind::VariableReference),
            dep("a", "b", DependencyKind::ExplicitDependency),
            dep("c", "b", DependencyKind::VariableReference),
        ];
        let stats = compute_statistics(&index, &deps, 5);

        assert_eq!(stats.total_dependencies, 3);
        assert_eq!(stats.dependency_kinds[&DependencyKind::VariableReference], 2);
        assert_eq!(stats.dependency_kinds[&DependencyKind::ExplicitDependency], 1);
        assert_eq!(stats.module_dependency_counts["a"].outgoing, 2);
        assert_eq!(stats.module_dependency_counts["b"].incoming, 3);
        assert_eq!(stats.module_dependency_counts["b"].total, 3);
    }

    #[test]
    fn ranking_is_descending_and_limited() {
        let index = index_of(&["a", "b", "c", "d", "e", "f", "g"]);
        let deps = vec![
            dep("a", "b", DependencyKind::VariableReference),
            dep("c", "b", DependencyKind::VariableReference),
            dep("d", "b", DependencyKind::VariableReference),
            dep("a", "c", DependencyKind::LocalReference),
        ];
        let stats = compute_statistics(&index, &deps, 5);

        assert_eq!(stats.most_depended_modules.len(), 5);
        assert_eq!(stats.most_depended_modules[0].module, "b");
        assert_eq!(stats.most_depended_modules[0].total, 3);
        // Stable ties keep index order.
        assert!(stats.most_depended_modules[1].module == "a"
            || stats.most_depended_modules[1].total <= 3);
    }

    #[test]
    fn isolated_modules_have_no_edges_at_all() {
        let index = index_of(&["a", "b", "island"]);
        let deps = vec![dep("a", "b", DependencyKind::VariableReference)];
        let stats = compute_statistics(&index, &deps, 5);

        assert_eq!(stats.isolated_modules, vec!["island"]);
    }
}
