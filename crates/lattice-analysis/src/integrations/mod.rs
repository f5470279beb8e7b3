//! Cross-application integration discovery.
//!
//! Heuristic pairwise analysis of independently deployed applications for
//! API, messaging, and data-sharing coupling. Operates directly on raw
//! per-application resource trees, independent of the module-level graph.

pub mod api;
pub mod data_sharing;
pub mod detector;
pub mod messaging;
pub mod types;

pub use detector::IntegrationDetector;
pub use types::{CrossAppAnalysis, CrossAppDependency, IntegrationKind};
