//! Messaging integration detection — SNS topics and their subscribers.

use lattice_core::types::Application;
use serde_json::{json, Value};

use super::detector::IntegrationDetector;
use super::types::{CrossAppAnalysis, CrossAppDependency, IntegrationKind};

/// Detect messaging coupling between the pair: topics owned by `target`,
/// subscriptions and queues owned by `source`.
///
/// Edge direction is topic-owner → subscriber (the reverse of the API
/// detector's caller → callee convention).
pub(super) fn detect(
    detector: &IntegrationDetector,
    source: &Application,
    target: &Application,
    analysis: &mut CrossAppAnalysis,
) {
    let topics = target.resources_of_type("aws_sns_topic");
    if topics.is_empty() {
        return;
    }

    let subscriptions = source.resources_of_type("aws_sns_topic_subscription");
    let queues = source.resources_of_type("aws_sqs_queue");

    for &(topic_resource, topic_body) in &topics {
        let topic_name = name_attr(topic_body).unwrap_or(topic_resource);
        let topic_id = format!("{}.aws_sns_topic.{topic_resource}", target.name);

        for &(sub_resource, sub_body) in &subscriptions {
            let subscriber_id =
                format!("{}.aws_sns_topic_subscription.{sub_resource}", source.name);
            let topic_arn = sub_body.get("topic_arn").and_then(Value::as_str);

            if let Some(arn) = topic_arn.filter(|arn| arn.contains(topic_name)) {
                analysis.push_unique(CrossAppDependency {
                    from: topic_id.clone(),
                    to: subscriber_id,
                    kind: IntegrationKind::MessagingIntegration,
                    metadata: json!({
                        "topic": topic_name,
                        "matchedBy": "topic_arn",
                        "topicArn": arn,
                        "crossApplication": true,
                    }),
                });
                continue;
            }

            let sub_name = name_attr(sub_body).unwrap_or(sub_resource);
            if let Some(keyword) = detector.shared_keyword(topic_name, sub_name) {
                analysis.push_unique(CrossAppDependency {
                    from: topic_id.clone(),
                    to: subscriber_id,
                    kind: IntegrationKind::MessagingIntegration,
                    metadata: json!({
                        "topic": topic_name,
                        "matchedBy": "shared_keyword",
                        "keyword": keyword,
                        "crossApplication": true,
                    }),
                });
            }
        }

        for &(queue_resource, queue_body) in &queues {
            let queue_name = name_attr(queue_body).unwrap_or(queue_resource);
            if let Some(keyword) = detector.shared_keyword(topic_name, queue_name) {
                analysis.push_unique(CrossAppDependency {
                    from: topic_id.clone(),
                    to: format!("{}.aws_sqs_queue.{queue_resource}", source.name),
                    kind: IntegrationKind::MessagingIntegration,
                    metadata: json!({
                        "topic": topic_name,
                        "queue": queue_name,
                        "matchedBy": "shared_keyword",
                        "keyword": keyword,
                        "crossApplication": true,
                    }),
                });
            }
        }
    }
}

/// The `name` attribute of a resource body, when it is a plain string.
fn name_attr(body: &Value) -> Option<&str> {
    body.get("name").and_then(Value::as_str)
}
