//! Dependency graph construction, cycle detection, and statistics.

pub mod builder;
pub mod cycles;
pub mod stats;
pub mod types;

pub use builder::GraphBuilder;
pub use cycles::detect_circular_dependencies;
pub use stats::{compute_statistics, DependencyStatistics, ModuleCoupling, ModuleDependencyCount};
pub use types::{Dependency, DependencyGraph, DependencyKind, GraphEdge, GraphNode};
