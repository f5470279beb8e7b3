//! Regex-backed reference extraction.

use regex::Regex;

use super::types::{OutputRef, ResourceRef};
use super::ReferenceExtractor;

/// `module.<module-name>.<output-name>` — module names allow hyphens,
/// output names do not.
const OUTPUT_REF_PATTERN: &str = r"module\.([A-Za-z0-9_-]+)\.([A-Za-z0-9_]+)";

/// `<provider>_<resource-kind>.<resource-name>` — a vendor-prefixed resource
/// type (at least one underscore) followed by an instance name.
const RESOURCE_REF_PATTERN: &str = r"\b([a-z][a-z0-9]*_[a-z0-9_]+)\.([A-Za-z][A-Za-z0-9_-]*)";

/// Reference discovery via global regex scan.
///
/// A literal string that happens to match a pattern produces a false positive;
/// that is accepted behavior for this heuristic extractor, not a defect.
pub struct RegexExtractor {
    output_ref: Regex,
    resource_ref: Regex,
}

impl RegexExtractor {
    pub fn new() -> Self {
        Self {
            output_ref: Regex::new(OUTPUT_REF_PATTERN).expect("invalid output reference pattern"),
            resource_ref: Regex::new(RESOURCE_REF_PATTERN)
                .expect("invalid resource reference pattern"),
        }
    }
}

impl Default for RegexExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceExtractor for RegexExtractor {
    fn extract_output_refs(&self, text: &str) -> Vec<OutputRef> {
        self.output_ref
            .captures_iter(text)
            .map(|caps| OutputRef {
                full: caps[0].to_string(),
                module: caps[1].to_string(),
                output: caps[2].to_string(),
            })
            .collect()
    }

    fn extract_resource_refs(&self, text: &str) -> Vec<ResourceRef> {
        self.resource_ref
            .captures_iter(text)
            .map(|caps| ResourceRef {
                full: caps[0].to_string(),
                resource_type: caps[1].to_string(),
                name: caps[2].to_string(),
            })
            .collect()
    }
}
