//! Core types, configuration, and errors for the Lattice dependency engine.
//!
//! Everything here is shared state-free plumbing: the parsed module/application
//! data model, the layered configuration system, and the per-subsystem error
//! enums. The analysis engine itself lives in `lattice-analysis`.

pub mod config;
pub mod errors;
pub mod types;
