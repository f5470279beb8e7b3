//! Structured references produced by extraction.

use serde::{Deserialize, Serialize};

/// A `module.<module>.<output>` reference to another module's exposed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRef {
    /// The literal matched text, e.g. `module.vpc.vpc_id`.
    pub full: String,
    pub module: String,
    pub output: String,
}

/// A `<provider>_<kind>.<name>` reference to a managed resource instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    /// The literal matched text, e.g. `aws_s3_bucket.artifacts`.
    pub full: String,
    pub resource_type: String,
    pub name: String,
}
