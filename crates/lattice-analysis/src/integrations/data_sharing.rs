//! Data-sharing integration detection — IAM grants over another
//! application's S3 buckets.

use lattice_core::types::Application;
use serde_json::{json, Value};
use smallvec::SmallVec;

use super::detector::IntegrationDetector;
use super::types::{CrossAppAnalysis, CrossAppDependency, IntegrationKind};

/// IAM resource types whose `policy` attribute is inspected.
const POLICY_RESOURCE_TYPES: &[&str] = &["aws_iam_role_policy", "aws_iam_policy"];

/// Detect `source → target` data coupling: an IAM policy statement in `source`
/// granting S3 actions over an ARN that references one of `target`'s buckets.
pub(super) fn detect(
    _detector: &IntegrationDetector,
    source: &Application,
    target: &Application,
    analysis: &mut CrossAppAnalysis,
) {
    let buckets = target.resources_of_type("aws_s3_bucket");
    if buckets.is_empty() {
        return;
    }

    for policy_type in POLICY_RESOURCE_TYPES {
        for (policy_resource, policy_body) in source.resources_of_type(policy_type) {
            let context = format!("{}.{policy_type}.{policy_resource}", source.name);

            let parsed;
            let document = match policy_body.get("policy") {
                Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
                    Ok(value) => {
                        parsed = value;
                        &parsed
                    }
                    Err(e) => {
                        analysis.warn(context.as_str(), format!("policy is not valid JSON: {e}"));
                        continue;
                    }
                },
                Some(other) => other,
                None => continue,
            };

            for statement in statements(document) {
                let s3_actions = s3_actions(statement);
                if s3_actions.is_empty() {
                    continue;
                }

                for &(bucket_resource, bucket_body) in &buckets {
                    let bucket_name = bucket_body
                        .get("bucket")
                        .and_then(Value::as_str)
                        .unwrap_or(bucket_resource);
                    let matched_arns = matching_resources(statement, bucket_name, &target.name);
                    if matched_arns.is_empty() {
                        continue;
                    }

                    analysis.push_unique(CrossAppDependency {
                        from: context.clone(),
                        to: format!("{}.aws_s3_bucket.{bucket_resource}", target.name),
                        kind: IntegrationKind::DataIntegration,
                        metadata: json!({
                            "actions": s3_actions,
                            "resources": matched_arns,
                            "crossApplication": true,
                        }),
                    });
                }
            }
        }
    }
}

/// `Statement` may be a single object or an array of them.
fn statements(document: &Value) -> Vec<&Value> {
    match document.get("Statement") {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single @ Value::Object(_)) => vec![single],
        _ => Vec::new(),
    }
}

/// All `s3:*` actions granted by a statement.
fn s3_actions(statement: &Value) -> SmallVec<[String; 4]> {
    string_entries(statement.get("Action"))
        .into_iter()
        .filter(|action| action.to_lowercase().starts_with("s3:"))
        .collect()
}

/// Resource ARNs of a statement that textually reference the bucket or the
/// owning application.
fn matching_resources(
    statement: &Value,
    bucket_name: &str,
    target_app_name: &str,
) -> SmallVec<[String; 4]> {
    string_entries(statement.get("Resource"))
        .into_iter()
        .filter(|arn| {
            arn.contains(bucket_name)
                || (!target_app_name.is_empty() && arn.contains(target_app_name))
        })
        .collect()
}

/// A scalar string or an array of strings, normalized to owned values.
fn string_entries(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}
