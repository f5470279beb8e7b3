//! Edge construction — four reference-scanning passes over indexed modules.

use lattice_core::errors::ResolveError;
use serde_json::{json, Value};

use crate::extract::ReferenceExtractor;
use crate::index::ModuleIndex;

use super::types::{Dependency, DependencyGraph, DependencyKind, GraphEdge, GraphNode};

/// Accumulates deduplicated, typed dependency edges from the indexed modules.
///
/// Edges are append-only for the lifetime of the builder; a fresh builder is
/// constructed for every resolution run.
pub struct GraphBuilder<'a> {
    index: &'a ModuleIndex,
    extractor: &'a dyn ReferenceExtractor,
    dependencies: Vec<Dependency>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(index: &'a ModuleIndex, extractor: &'a dyn ReferenceExtractor) -> Self {
        Self {
            index,
            extractor,
            dependencies: Vec::new(),
        }
    }

    /// Run all four scanning passes in order.
    pub fn scan_all(&mut self) -> Result<(), ResolveError> {
        self.scan_output_references()?;
        self.scan_data_source_dependencies()?;
        self.scan_variable_default_references()?;
        self.scan_explicit_dependencies();
        Ok(())
    }

    /// Pass 1: `module.X.Y` references in resolved variables, locals, and
    /// managed resource bodies.
    pub fn scan_output_references(&mut self) -> Result<(), ResolveError> {
        let index = self.index;
        for (current, module) in index.modules() {
            for (var_name, value) in &module.resolved_variables {
                let Some(value) = value else { continue };
                let text = value_as_text(value, || format!("variable {var_name} in {current}"))?;
                self.emit_output_refs(
                    current,
                    &text,
                    DependencyKind::VariableReference,
                    |full| json!({ "variable": var_name, "reference": full }),
                );
            }

            for (local_name, value) in &module.locals {
                let text = value_as_text(value, || format!("local {local_name} in {current}"))?;
                self.emit_output_refs(current, &text, DependencyKind::LocalReference, |full| {
                    json!({ "local": local_name, "reference": full })
                });
            }

            for (resource_type, by_name) in &module.managed_resources {
                for (resource_name, body) in by_name {
                    // Resource bodies are arbitrary nested JSON; serialize the
                    // whole body so nested references are visible to the
                    // text-level extractor.
                    let text = serde_json::to_string(body).map_err(|source| {
                        ResolveError::Serialization {
                            context: format!(
                                "resource {resource_type}.{resource_name} in {current}"
                            ),
                            source,
                        }
                    })?;
                    let resource_id = format!("{resource_type}.{resource_name}");
                    self.emit_output_refs(
                        current,
                        &text,
                        DependencyKind::ResourceReference,
                        |full| json!({ "resource": resource_id.clone(), "reference": full }),
                    );
                }
            }
        }
        Ok(())
    }

    /// Pass 2: typed resource references inside data resource bodies, resolved
    /// to their owning module.
    pub fn scan_data_source_dependencies(&mut self) -> Result<(), ResolveError> {
        let index = self.index;
        for (current, module) in index.modules() {
            for (data_type, by_name) in &module.data_resources {
                for (data_name, body) in by_name {
                    let text = serde_json::to_string(body).map_err(|source| {
                        ResolveError::Serialization {
                            context: format!("data {data_type}.{data_name} in {current}"),
                            source,
                        }
                    })?;
                    for resource_ref in self.extractor.extract_resource_refs(&text) {
                        let owner = index.find_module_with_resource(
                            &resource_ref.resource_type,
                            Some(&resource_ref.name),
                        );
                        if let Some(owner) = owner {
                            if owner != current {
                                self.push_unique(Dependency {
                                    from: current.to_string(),
                                    to: owner.to_string(),
                                    kind: DependencyKind::DataSourceDependency,
                                    metadata: json!({
                                        "dataSource": format!("{data_type}.{data_name}"),
                                        "reference": resource_ref.full,
                                    }),
                                });
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Pass 3: `module.X.Y` references in declared variable defaults (the
    /// declared default, not the resolved value).
    pub fn scan_variable_default_references(&mut self) -> Result<(), ResolveError> {
        let index = self.index;
        for (current, module) in index.modules() {
            for (var_name, def) in &module.variables {
                let Some(default) = &def.default else { continue };
                let text =
                    value_as_text(default, || format!("default of {var_name} in {current}"))?;
                self.emit_output_refs(
                    current,
                    &text,
                    DependencyKind::VariableDefaultReference,
                    |full| json!({ "variable": var_name, "reference": full }),
                );
            }
        }
        Ok(())
    }

    /// Pass 4: `depends_on` declarations on managed resources, resolved to
    /// their owning module.
    pub fn scan_explicit_dependencies(&mut self) {
        let index = self.index;
        for (current, module) in index.modules() {
            for (resource_type, by_name) in &module.managed_resources {
                for (resource_name, body) in by_name {
                    for dep in depends_on_entries(body) {
                        let owner = index.find_module_with_resource(&dep, None);
                        if let Some(owner) = owner {
                            if owner != current {
                                self.push_unique(Dependency {
                                    from: current.to_string(),
                                    to: owner.to_string(),
                                    kind: DependencyKind::ExplicitDependency,
                                    metadata: json!({
                                        "resource": format!("{resource_type}.{resource_name}"),
                                        "dependsOn": dep,
                                    }),
                                });
                            }
                        }
                    }
                }
            }
        }
    }

    /// The accumulated edge list.
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn into_dependencies(self) -> Vec<Dependency> {
        self.dependencies
    }

    /// Assemble the node/edge graph: nodes straight from the index, edges a
    /// direct projection of the accumulated list. No dangling-target
    /// validation happens here; edges are only ever created against known
    /// modules.
    pub fn assemble(index: &ModuleIndex, dependencies: &[Dependency]) -> DependencyGraph {
        let nodes = index
            .modules()
            .map(|(name, module)| GraphNode {
                id: name.to_string(),
                node_type: module.module_type.clone(),
                label: name.to_string(),
            })
            .collect();
        let edges = dependencies
            .iter()
            .map(|dep| GraphEdge {
                source: dep.from.clone(),
                target: dep.to.clone(),
                kind: dep.kind,
                metadata: dep.metadata.clone(),
            })
            .collect();
        DependencyGraph { nodes, edges }
    }

    /// Emit one edge per extracted output reference whose target is a known
    /// module other than `current`.
    fn emit_output_refs(
        &mut self,
        current: &str,
        text: &str,
        kind: DependencyKind,
        metadata: impl Fn(&str) -> Value,
    ) {
        for output_ref in self.extractor.extract_output_refs(text) {
            if output_ref.module == current || !self.index.contains(&output_ref.module) {
                continue;
            }
            self.push_unique(Dependency {
                from: current.to_string(),
                to: output_ref.module.clone(),
                kind,
                metadata: metadata(&output_ref.full),
            });
        }
    }

    /// Append unless an identical `(from, to, kind)` edge with deep-equal
    /// metadata already exists. Edges differing only in metadata content are
    /// kept as distinct entries.
    fn push_unique(&mut self, dependency: Dependency) {
        let duplicate = self.dependencies.iter().any(|existing| {
            existing.from == dependency.from
                && existing.to == dependency.to
                && existing.kind == dependency.kind
                && existing.metadata == dependency.metadata
        });
        if !duplicate {
            self.dependencies.push(dependency);
        }
    }
}

/// Scalar or array `depends_on` entries of a resource body, as strings.
fn depends_on_entries(body: &Value) -> Vec<String> {
    match body.get("depends_on") {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Raw attribute values are scanned as-is; anything structured is serialized
/// first so the extractor sees one flat string.
fn value_as_text(value: &Value, context: impl Fn() -> String) -> Result<String, ResolveError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => serde_json::to_string(other).map_err(|source| ResolveError::Serialization {
            context: context(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::RegexExtractor;
    use lattice_core::types::EnvironmentConfig;
    use serde_json::json;

    fn build_env(modules: Value) -> EnvironmentConfig {
        serde_json::from_value(json!({ "environment": "dev", "modules": modules })).unwrap()
    }

    #[test]
    fn duplicate_edges_are_suppressed() {
        let env = build_env(json!({
            "vpc": { "type": "network", "outputs": {"vpc_id": {}} },
            "app": {
                "type": "service",
                "resolvedVariables": {
                    "a": "module.vpc.vpc_id",
                    "b": "module.vpc.vpc_id"
                }
            }
        }));
        let index = ModuleIndex::build(&env);
        let extractor = RegexExtractor::new();
        let mut builder = GraphBuilder::new(&index, &extractor);
        builder.scan_all().unwrap();

        // Same (from, to, kind) but different metadata (variable name differs):
        // both edges are kept.
        assert_eq!(builder.dependencies().len(), 2);

        // A literal re-run of the same pass produces true duplicates, which
        // are suppressed.
        builder.scan_output_references().unwrap();
        assert_eq!(builder.dependencies().len(), 2);
    }

    #[test]
    fn self_references_never_produce_edges() {
        let env = build_env(json!({
            "vpc": {
                "type": "network",
                "managedResources": {
                    "aws_vpc": {"main": {"tags": "module.vpc.vpc_cidr"}}
                }
            }
        }));
        let index = ModuleIndex::build(&env);
        let extractor = RegexExtractor::new();
        let mut builder = GraphBuilder::new(&index, &extractor);
        builder.scan_all().unwrap();
        assert!(builder.dependencies().is_empty());
    }

    #[test]
    fn unknown_target_modules_produce_no_edges() {
        let env = build_env(json!({
            "app": {
                "type": "service",
                "resolvedVariables": {"x": "module.ghost.some_output"}
            }
        }));
        let index = ModuleIndex::build(&env);
        let extractor = RegexExtractor::new();
        let mut builder = GraphBuilder::new(&index, &extractor);
        builder.scan_all().unwrap();
        assert!(builder.dependencies().is_empty());
    }

    #[test]
    fn depends_on_scalar_and_array_forms() {
        let env = build_env(json!({
            "storage": {
                "type": "storage",
                "managedResources": {"aws_s3_bucket": {"data": {}}}
            },
            "queue": {
                "type": "messaging",
                "managedResources": {"aws_sqs_queue": {"jobs": {}}}
            },
            "app": {
                "type": "service",
                "managedResources": {
                    "aws_instance": {
                        "web": {"depends_on": ["aws_s3_bucket.data", "aws_sqs_queue.jobs"]},
                        "worker": {"depends_on": "aws_s3_bucket.data"}
                    }
                }
            }
        }));
        let index = ModuleIndex::build(&env);
        let extractor = RegexExtractor::new();
        let mut builder = GraphBuilder::new(&index, &extractor);
        builder.scan_explicit_dependencies();

        let deps = builder.dependencies();
        assert_eq!(deps.len(), 3);
        assert!(deps
            .iter()
            .all(|d| d.kind == DependencyKind::ExplicitDependency && d.from == "app"));
        assert_eq!(deps.iter().filter(|d| d.to == "storage").count(), 2);
        assert_eq!(deps.iter().filter(|d| d.to == "queue").count(), 1);
    }

    #[test]
    fn data_source_refs_resolve_to_owning_module() {
        let env = build_env(json!({
            "network": {
                "type": "network",
                "managedResources": {"aws_vpc": {"main": {}}}
            },
            "app": {
                "type": "service",
                "dataResources": {
                    "aws_subnet_ids": {"private": {"vpc_id": "aws_vpc.main.id"}}
                }
            }
        }));
        let index = ModuleIndex::build(&env);
        let extractor = RegexExtractor::new();
        let mut builder = GraphBuilder::new(&index, &extractor);
        builder.scan_data_source_dependencies().unwrap();

        let deps = builder.dependencies();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].from, "app");
        assert_eq!(deps[0].to, "network");
        assert_eq!(deps[0].kind, DependencyKind::DataSourceDependency);
        assert_eq!(deps[0].metadata["dataSource"], "aws_subnet_ids.private");
    }

    #[test]
    fn assembled_graph_projects_nodes_and_edges() {
        let env = build_env(json!({
            "vpc": { "type": "network", "outputs": {"vpc_id": {}} },
            "app": {
                "type": "service",
                "resolvedVariables": {"net": "module.vpc.vpc_id"}
            }
        }));
        let index = ModuleIndex::build(&env);
        let extractor = RegexExtractor::new();
        let mut builder = GraphBuilder::new(&index, &extractor);
        builder.scan_all().unwrap();

        let graph = GraphBuilder::assemble(&index, builder.dependencies());
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[0].id, "vpc");
        assert_eq!(graph.nodes[0].node_type, "network");
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].source, "app");
        assert_eq!(graph.edges[0].target, "vpc");
    }
}
