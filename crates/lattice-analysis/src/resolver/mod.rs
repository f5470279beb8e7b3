//! Resolution orchestration.
//!
//! A [`ResolverContext`] is constructed fresh for every run, so there is no
//! state to reset and nothing leaks between invocations. The run itself is a
//! single synchronous pass: index → scan passes → graph assembly → cycle
//! detection → statistics.

use indexmap::IndexMap;
use lattice_core::config::AnalysisConfig;
use lattice_core::errors::{ResolveError, ResolveWarning};
use lattice_core::types::{Application, EnvironmentConfig};
use serde::{Deserialize, Serialize};

use crate::extract::{ReferenceExtractor, RegexExtractor};
use crate::graph::{
    compute_statistics, detect_circular_dependencies, Dependency, DependencyGraph,
    DependencyStatistics, GraphBuilder,
};
use crate::index::{ModuleIndex, ModuleSummary};
use crate::integrations::{CrossAppAnalysis, IntegrationDetector};

/// Complete output of one cross-module resolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyAnalysisResult {
    pub dependencies: Vec<Dependency>,
    #[serde(rename = "dependencyGraph")]
    pub dependency_graph: DependencyGraph,
    #[serde(rename = "circularDependencies")]
    pub circular_dependencies: Vec<Vec<String>>,
    #[serde(rename = "moduleIndex")]
    pub module_index: IndexMap<String, ModuleSummary>,
    pub statistics: DependencyStatistics,
    /// Non-fatal degradations recorded while the run completed.
    pub warnings: Vec<ResolveWarning>,
}

/// Per-run resolution state: the module index plus the extractor in use.
///
/// Construction replaces any reset step — a context is built, run once, and
/// dropped.
pub struct ResolverContext {
    index: ModuleIndex,
    extractor: Box<dyn ReferenceExtractor>,
}

impl ResolverContext {
    /// Context with the default regex extractor.
    pub fn new(environment: &EnvironmentConfig) -> Self {
        Self::with_extractor(environment, Box::new(RegexExtractor::new()))
    }

    /// Context with a caller-supplied extractor implementation.
    pub fn with_extractor(
        environment: &EnvironmentConfig,
        extractor: Box<dyn ReferenceExtractor>,
    ) -> Self {
        Self {
            index: ModuleIndex::build(environment),
            extractor,
        }
    }

    pub fn index(&self) -> &ModuleIndex {
        &self.index
    }

    /// Execute the full pass.
    pub fn run(&self, config: &AnalysisConfig) -> Result<DependencyAnalysisResult, ResolveError> {
        let mut builder = GraphBuilder::new(&self.index, self.extractor.as_ref());
        builder.scan_all()?;
        let dependencies = builder.into_dependencies();

        let dependency_graph = GraphBuilder::assemble(&self.index, &dependencies);
        let circular_dependencies = detect_circular_dependencies(&dependency_graph);
        let module_index = self.index.summaries();
        let statistics = compute_statistics(
            &self.index,
            &dependencies,
            config.effective_most_depended_limit(),
        );

        Ok(DependencyAnalysisResult {
            dependencies,
            dependency_graph,
            circular_dependencies,
            module_index,
            statistics,
            warnings: Vec::new(),
        })
    }
}

/// Resolve all cross-module dependencies for one environment.
///
/// The run fails atomically: any error aborts the whole analysis and no
/// partial graph is returned.
pub fn resolve_cross_module_dependencies(
    environment: &EnvironmentConfig,
    config: &AnalysisConfig,
) -> Result<DependencyAnalysisResult, ResolveError> {
    let context = ResolverContext::new(environment);
    match context.run(config) {
        Ok(result) => {
            tracing::debug!(
                environment = %environment.environment,
                modules = context.index().len(),
                dependencies = result.dependencies.len(),
                cycles = result.circular_dependencies.len(),
                "dependency resolution complete"
            );
            Ok(result)
        }
        Err(e) => {
            tracing::error!(
                environment = %environment.environment,
                error = %e,
                "dependency resolution failed"
            );
            Err(e)
        }
    }
}

/// Detect cross-application integrations over an application set.
///
/// Independent of the module-level graph; operates on raw per-application
/// resource trees.
pub fn detect_cross_application_integrations(
    applications: &[Application],
    config: &AnalysisConfig,
) -> Result<CrossAppAnalysis, ResolveError> {
    let detector = IntegrationDetector::from_config(config).map_err(|e| {
        tracing::error!(error = %e, "integration detector configuration failed");
        e
    })?;
    Ok(detector.detect(applications))
}
