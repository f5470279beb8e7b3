//! Shared data model: parsed module configuration and application inputs.

pub mod application;
pub mod collections;
pub mod module;

pub use application::{Application, ApplicationResources};
pub use module::{EnvironmentConfig, ModuleConfig, OutputDef, VariableDef};
