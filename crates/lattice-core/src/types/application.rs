//! Independently deployed application inputs for cross-application analysis.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resource tree of one application: resource type → resource name → body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationResources {
    pub resource: IndexMap<String, IndexMap<String, Value>>,
}

/// An independently deployed application, read-only to the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    pub id: String,
    pub name: String,
    pub resources: ApplicationResources,
}

impl Application {
    /// All resources of the given type, in input order.
    pub fn resources_of_type(&self, resource_type: &str) -> Vec<(&str, &Value)> {
        self.resources
            .resource
            .get(resource_type)
            .map(|by_name| by_name.iter().map(|(n, v)| (n.as_str(), v)).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resources_of_type_preserves_input_order() {
        let app: Application = serde_json::from_value(json!({
            "id": "a1",
            "name": "insight-engine",
            "resources": {"resource": {
                "aws_sns_topic": {
                    "alerts": {"name": "alerts"},
                    "events": {"name": "events"}
                }
            }}
        }))
        .unwrap();

        let topics = app.resources_of_type("aws_sns_topic");
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].0, "alerts");
        assert!(app.resources_of_type("aws_sqs_queue").is_empty());
    }
}
