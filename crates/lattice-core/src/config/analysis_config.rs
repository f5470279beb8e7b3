//! Analysis configuration.

use serde::{Deserialize, Serialize};

/// A cross-application API heuristic: when the target application's name
/// matches `app_name_pattern`, an endpoint value matching `domain_pattern` is
/// treated as a reference to that application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiHeuristic {
    pub app_name_pattern: String,
    pub domain_pattern: String,
}

/// Configuration for the analysis subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Environment-variable name markers that identify endpoint wiring.
    /// Default: `API_URL`, `ENDPOINT`.
    #[serde(default)]
    pub api_env_markers: Vec<String>,
    /// Keyword vocabulary for messaging topic/queue name matching.
    /// Default: `insight`, `event`, `notification`, `alert`.
    #[serde(default)]
    pub messaging_keywords: Vec<String>,
    /// Domain heuristics replacing the compiled-in application archetypes.
    #[serde(default)]
    pub api_heuristics: Vec<ApiHeuristic>,
    /// Size of the most-depended-modules list in statistics. Default: 5.
    pub most_depended_limit: Option<usize>,
}

impl AnalysisConfig {
    /// Returns the effective env-var markers, defaulting to `API_URL`/`ENDPOINT`.
    pub fn effective_api_env_markers(&self) -> Vec<String> {
        if self.api_env_markers.is_empty() {
            vec!["API_URL".to_string(), "ENDPOINT".to_string()]
        } else {
            self.api_env_markers.clone()
        }
    }

    /// Returns the effective messaging keyword vocabulary.
    pub fn effective_messaging_keywords(&self) -> Vec<String> {
        if self.messaging_keywords.is_empty() {
            ["insight", "event", "notification", "alert"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            self.messaging_keywords.clone()
        }
    }

    /// Returns the effective API heuristics.
    ///
    /// The defaults reproduce the two application archetypes the original
    /// detector shipped with, so out-of-the-box matching is unchanged.
    pub fn effective_api_heuristics(&self) -> Vec<ApiHeuristic> {
        if self.api_heuristics.is_empty() {
            vec![
                ApiHeuristic {
                    app_name_pattern: "insight".to_string(),
                    domain_pattern: r"insight[a-z0-9-]*\.(internal|svc|[a-z0-9-]+\.amazonaws\.com)"
                        .to_string(),
                },
                ApiHeuristic {
                    app_name_pattern: "engagement".to_string(),
                    domain_pattern:
                        r"engagement[a-z0-9-]*\.(internal|svc|[a-z0-9-]+\.amazonaws\.com)"
                            .to_string(),
                },
            ]
        } else {
            self.api_heuristics.clone()
        }
    }

    /// Returns the effective most-depended list size, defaulting to 5.
    pub fn effective_most_depended_limit(&self) -> usize {
        self.most_depended_limit.unwrap_or(5)
    }
}
