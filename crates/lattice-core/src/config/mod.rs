//! Configuration system for Lattice.
//! TOML-based, 3-layer resolution: env > project > defaults.

pub mod analysis_config;
pub mod lattice_config;

pub use analysis_config::{AnalysisConfig, ApiHeuristic};
pub use lattice_config::LatticeConfig;
