//! API integration detection — endpoint wiring in ECS and Lambda environments.

use lattice_core::types::Application;
use serde_json::{json, Value};

use super::detector::IntegrationDetector;
use super::types::{CrossAppAnalysis, CrossAppDependency, IntegrationKind};

/// Detect `source → target` API coupling: an environment variable whose name
/// marks it as endpoint wiring and whose value textually references the target
/// application.
pub(super) fn detect(
    detector: &IntegrationDetector,
    source: &Application,
    target: &Application,
    analysis: &mut CrossAppAnalysis,
) {
    scan_ecs_task_definitions(detector, source, target, analysis);
    scan_lambda_functions(detector, source, target, analysis);
}

/// `aws_ecs_task_definition.container_definitions` is usually a JSON string;
/// parse it and walk each container's `environment` list.
fn scan_ecs_task_definitions(
    detector: &IntegrationDetector,
    source: &Application,
    target: &Application,
    analysis: &mut CrossAppAnalysis,
) {
    for (resource_name, body) in source.resources_of_type("aws_ecs_task_definition") {
        let Some(raw_defs) = body.get("container_definitions") else {
            continue;
        };

        let parsed;
        let containers = match raw_defs {
            Value::String(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(value) => {
                    parsed = value;
                    &parsed
                }
                Err(e) => {
                    analysis.warn(
                        format!("{}.aws_ecs_task_definition.{resource_name}", source.name),
                        format!("container_definitions is not valid JSON: {e}"),
                    );
                    continue;
                }
            },
            other => other,
        };
        let Some(containers) = containers.as_array() else {
            continue;
        };

        for container in containers {
            let env_entries = container
                .get("environment")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            for entry in env_entries {
                let (Some(name), Some(value)) = (
                    entry.get("name").and_then(Value::as_str),
                    entry.get("value").and_then(Value::as_str),
                ) else {
                    continue;
                };
                if detector.is_endpoint_var(name) && detector.endpoint_references(value, target) {
                    analysis.push_unique(CrossAppDependency {
                        from: format!("{}.aws_ecs_task_definition.{resource_name}", source.name),
                        to: target.name.clone(),
                        kind: IntegrationKind::ApiIntegration,
                        metadata: json!({
                            "protocol": "HTTPS",
                            "environmentVariable": name,
                            "endpoint": value,
                            "crossApplication": true,
                        }),
                    });
                }
            }
        }
    }
}

/// `aws_lambda_function.environment.variables` is already structured: an
/// object map, optionally wrapped in a single-element block list.
fn scan_lambda_functions(
    detector: &IntegrationDetector,
    source: &Application,
    target: &Application,
    analysis: &mut CrossAppAnalysis,
) {
    for (resource_name, body) in source.resources_of_type("aws_lambda_function") {
        let variables = body
            .get("environment")
            .and_then(|env| match env {
                Value::Array(blocks) => blocks.first(),
                other => Some(other),
            })
            .and_then(|env| env.get("variables"))
            .and_then(Value::as_object);
        let Some(variables) = variables else { continue };

        for (name, value) in variables {
            let Some(value) = value.as_str() else { continue };
            if detector.is_endpoint_var(name) && detector.endpoint_references(value, target) {
                analysis.push_unique(CrossAppDependency {
                    from: format!("{}.aws_lambda_function.{resource_name}", source.name),
                    to: target.name.clone(),
                    kind: IntegrationKind::ApiIntegration,
                    metadata: json!({
                        "protocol": "HTTPS",
                        "environmentVariable": name,
                        "endpoint": value,
                        "crossApplication": true,
                    }),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_core::config::AnalysisConfig;
    use serde_json::json;

    fn app(value: Value) -> Application {
        serde_json::from_value(value).unwrap()
    }

    fn detector() -> IntegrationDetector {
        IntegrationDetector::from_config(&AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn ecs_env_var_pointing_at_target_is_detected() {
        let source = app(json!({
            "id": "1", "name": "engagement-hub",
            "resources": {"resource": {
                "aws_ecs_task_definition": {
                    "web": {
                        "container_definitions": "[{\"name\":\"web\",\"environment\":[{\"name\":\"INSIGHTS_API_URL\",\"value\":\"https://insight-engine.internal/api\"}]}]"
                    }
                }
            }}
        }));
        let target = app(json!({"id": "2", "name": "insight-engine", "resources": {"resource": {}}}));

        let mut analysis = CrossAppAnalysis::default();
        detect(&detector(), &source, &target, &mut analysis);

        assert_eq!(analysis.integrations.len(), 1);
        let edge = &analysis.integrations[0];
        assert_eq!(edge.from, "engagement-hub.aws_ecs_task_definition.web");
        assert_eq!(edge.to, "insight-engine");
        assert_eq!(edge.kind, IntegrationKind::ApiIntegration);
        assert_eq!(edge.metadata["environmentVariable"], "INSIGHTS_API_URL");
        assert_eq!(edge.metadata["protocol"], "HTTPS");
        assert!(analysis.warnings.is_empty());
    }

    #[test]
    fn malformed_container_definitions_warns_and_continues() {
        let source = app(json!({
            "id": "1", "name": "engagement-hub",
            "resources": {"resource": {
                "aws_ecs_task_definition": {
                    "bad": {"container_definitions": "{not json"},
                    "good": {
                        "container_definitions": "[{\"environment\":[{\"name\":\"CORE_ENDPOINT\",\"value\":\"https://insight-engine.internal\"}]}]"
                    }
                }
            }}
        }));
        let target = app(json!({"id": "2", "name": "insight-engine", "resources": {"resource": {}}}));

        let mut analysis = CrossAppAnalysis::default();
        detect(&detector(), &source, &target, &mut analysis);

        assert_eq!(analysis.warnings.len(), 1);
        assert!(analysis.warnings[0]
            .context
            .contains("aws_ecs_task_definition.bad"));
        // The malformed resource is skipped, not fatal: the good one matched.
        assert_eq!(analysis.integrations.len(), 1);
    }

    #[test]
    fn lambda_environment_variables_are_inspected() {
        let source = app(json!({
            "id": "1", "name": "engagement-hub",
            "resources": {"resource": {
                "aws_lambda_function": {
                    "notifier": {
                        "environment": {"variables": {"INSIGHT_ENDPOINT": "https://insight-engine.internal"}}
                    }
                }
            }}
        }));
        let target = app(json!({"id": "2", "name": "insight-engine", "resources": {"resource": {}}}));

        let mut analysis = CrossAppAnalysis::default();
        detect(&detector(), &source, &target, &mut analysis);

        assert_eq!(analysis.integrations.len(), 1);
        assert_eq!(
            analysis.integrations[0].from,
            "engagement-hub.aws_lambda_function.notifier"
        );
    }

    #[test]
    fn unmarked_env_vars_are_ignored() {
        let source = app(json!({
            "id": "1", "name": "engagement-hub",
            "resources": {"resource": {
                "aws_lambda_function": {
                    "notifier": {
                        "environment": {"variables": {"GREETING": "https://insight-engine.internal"}}
                    }
                }
            }}
        }));
        let target = app(json!({"id": "2", "name": "insight-engine", "resources": {"resource": {}}}));

        let mut analysis = CrossAppAnalysis::default();
        detect(&detector(), &source, &target, &mut analysis);
        assert!(analysis.integrations.is_empty());
    }
}
