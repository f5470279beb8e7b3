//! All-pairs orchestration of the three integration detectors.

use aho_corasick::AhoCorasick;
use lattice_core::config::AnalysisConfig;
use lattice_core::errors::ResolveError;
use lattice_core::types::collections::FxHashSet;
use lattice_core::types::Application;
use regex::Regex;

use super::types::CrossAppAnalysis;
use super::{api, data_sharing, messaging};

/// A compiled `(application name, endpoint domain)` heuristic pair.
pub(crate) struct CompiledHeuristic {
    pub(crate) app_name: Regex,
    pub(crate) domain: Regex,
}

/// Cross-application integration detector.
///
/// Heuristic knobs (endpoint env-var markers, messaging keyword vocabulary,
/// domain heuristics) come from [`AnalysisConfig`]; the compiled defaults
/// reproduce the archetypes the detector originally shipped with.
pub struct IntegrationDetector {
    pub(crate) env_markers: Vec<String>,
    pub(crate) heuristics: Vec<CompiledHeuristic>,
    pub(crate) keywords: Vec<String>,
    pub(crate) keyword_matcher: AhoCorasick,
}

impl IntegrationDetector {
    /// Compile the configured heuristics.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, ResolveError> {
        let env_markers = config
            .effective_api_env_markers()
            .into_iter()
            .map(|m| m.to_uppercase())
            .collect();

        let mut heuristics = Vec::new();
        for pair in config.effective_api_heuristics() {
            let app_name = compile(&pair.app_name_pattern)?;
            let domain = compile(&pair.domain_pattern)?;
            heuristics.push(CompiledHeuristic { app_name, domain });
        }

        let keywords = config.effective_messaging_keywords();
        let keyword_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&keywords)
            .map_err(|e| ResolveError::InvalidHeuristicPattern {
                pattern: keywords.join(","),
                message: e.to_string(),
            })?;

        Ok(Self {
            env_markers,
            heuristics,
            keywords,
            keyword_matcher,
        })
    }

    /// Ordered all-pairs scan (i ≠ j) over the given applications.
    ///
    /// Applications are scanned pairwise; each detector degrades gracefully on
    /// malformed embedded JSON, recording a warning and continuing.
    pub fn detect(&self, applications: &[Application]) -> CrossAppAnalysis {
        let mut analysis = CrossAppAnalysis::default();

        for (i, source) in applications.iter().enumerate() {
            for (j, target) in applications.iter().enumerate() {
                if i == j {
                    continue;
                }
                api::detect(self, source, target, &mut analysis);
                messaging::detect(self, source, target, &mut analysis);
                data_sharing::detect(self, source, target, &mut analysis);
            }
        }

        tracing::debug!(
            applications = applications.len(),
            integrations = analysis.integrations.len(),
            warnings = analysis.warnings.len(),
            "cross-application scan complete"
        );
        analysis
    }

    /// Does an endpoint value textually reference the target application?
    ///
    /// Either the value contains the application name directly, or one of the
    /// configured heuristic pairs matches both the application name and the
    /// value's domain.
    pub(crate) fn endpoint_references(&self, value: &str, target: &Application) -> bool {
        let value_lower = value.to_lowercase();
        if !target.name.is_empty() && value_lower.contains(&target.name.to_lowercase()) {
            return true;
        }
        self.heuristics
            .iter()
            .any(|h| h.app_name.is_match(&target.name) && h.domain.is_match(value))
    }

    /// The first vocabulary keyword found in both names, if any.
    pub(crate) fn shared_keyword(&self, left: &str, right: &str) -> Option<&str> {
        let in_left: FxHashSet<usize> = self
            .keyword_matcher
            .find_iter(left)
            .map(|m| m.pattern().as_usize())
            .collect();
        self.keyword_matcher
            .find_iter(right)
            .map(|m| m.pattern().as_usize())
            .find(|id| in_left.contains(id))
            .map(|id| self.keywords[id].as_str())
    }

    /// Does the env-var name carry one of the endpoint markers?
    pub(crate) fn is_endpoint_var(&self, name: &str) -> bool {
        let upper = name.to_uppercase();
        self.env_markers.iter().any(|marker| upper.contains(marker))
    }
}

fn compile(pattern: &str) -> Result<Regex, ResolveError> {
    Regex::new(pattern).map_err(|e| ResolveError::InvalidHeuristicPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}
