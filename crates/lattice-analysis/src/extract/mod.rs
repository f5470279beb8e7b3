//! Reference extraction — pattern discovery of inter-unit references in text.
//!
//! Extraction is a pure function over serialized text: callers stringify any
//! nested value before handing it over, and the extractor performs no
//! structural traversal of its own. A stricter parser can replace the regex
//! implementation behind the [`ReferenceExtractor`] trait without touching
//! graph-building logic.

pub mod regex_extract;
pub mod types;

pub use regex_extract::RegexExtractor;
pub use types::{OutputRef, ResourceRef};

/// Capability seam for reference discovery.
pub trait ReferenceExtractor {
    /// All `module.<name>.<output>` references in `text`, in match order.
    fn extract_output_refs(&self, text: &str) -> Vec<OutputRef>;

    /// All `<provider>_<kind>.<name>` typed resource references in `text`,
    /// in match order.
    fn extract_resource_refs(&self, text: &str) -> Vec<ResourceRef>;
}
