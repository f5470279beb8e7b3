//! Dependency resolution engine for parsed infrastructure-as-code definitions.
//!
//! The engine ingests environment-resolved module configuration and computes a
//! directed dependency graph describing how deployable units reference one
//! another, both within a repository (cross-module) and across independently
//! deployed applications (cross-application). The graph, its cycle analysis,
//! and summary statistics are the analytical core consumed by downstream
//! reports and visualizations.
//!
//! Pipeline: module indexing → reference extraction → edge construction and
//! deduplication → cycle detection → statistics. Cross-application integration
//! discovery is an independent pass over raw per-application resource trees.
//!
//! The engine is synchronous and performs no I/O; all inputs arrive as plain
//! in-memory values and all state is constructed fresh per run.

pub mod extract;
pub mod graph;
pub mod index;
pub mod integrations;
pub mod resolver;

pub use extract::{OutputRef, ReferenceExtractor, RegexExtractor, ResourceRef};
pub use graph::{Dependency, DependencyGraph, DependencyKind, DependencyStatistics};
pub use index::{ModuleIndex, ModuleSummary};
pub use integrations::{CrossAppAnalysis, CrossAppDependency, IntegrationDetector, IntegrationKind};
pub use resolver::{
    detect_cross_application_integrations, resolve_cross_module_dependencies,
    DependencyAnalysisResult,
};
