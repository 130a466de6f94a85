//! JSON output formatter, one document per call

use super::formatter::{OutputFormatter, QuerySummary};
use serde_json::{Value, json};
use switchboard_application::{DispatchError, Notification, SendOutcome};

/// Formats results as compact JSON documents
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    fn render(value: &Value) -> String {
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_outcome(&self, query: &str, outcome: &SendOutcome) -> String {
        let mut document = serde_json::to_value(outcome).unwrap_or_else(|_| json!({}));
        if let Value::Object(map) = &mut document {
            map.insert("query".to_string(), json!(query));
        }
        Self::render(&document)
    }

    fn format_error(&self, query: &str, error: &DispatchError) -> String {
        let kind = if error.is_unknown_query() {
            "unknown_query"
        } else {
            "resolution"
        };
        Self::render(&json!({
            "outcome": "error",
            "query": query,
            "kind": kind,
            "message": error.to_string(),
        }))
    }

    fn format_notification(&self, notification: &Notification) -> String {
        Self::render(&json!({
            "event": "notification",
            "query": notification.query(),
            "params": notification.params(),
        }))
    }

    fn format_resolved(&self, query: &str, resolved: &Value) -> String {
        Self::render(&json!({ "query": query, "resolved": resolved }))
    }

    fn format_queries(&self, queries: &[QuerySummary]) -> String {
        Self::render(&json!({ "queries": queries }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_application::Callbacks;
    use switchboard_domain::InvocationParams;

    fn parse(output: &str) -> Value {
        serde_json::from_str(output).unwrap()
    }

    #[test]
    fn test_outcome_includes_query() {
        let output = JsonFormatter.format_outcome("q", &SendOutcome::Emitted { listeners: 2 });
        assert_eq!(
            parse(&output),
            json!({"outcome": "emitted", "listeners": 2, "query": "q"})
        );
    }

    #[test]
    fn test_error_kind() {
        let error = DispatchError::UnknownQuery("nope".to_string());
        let output = parse(&JsonFormatter.format_error("nope", &error));
        assert_eq!(output["kind"], json!("unknown_query"));
        assert_eq!(output["message"], json!("There is no query with the name \"nope\"."));
    }

    #[test]
    fn test_notification() {
        let notification = Notification::new(
            "createUser",
            InvocationParams::new(vec![json!("Alice")]),
            Callbacks::noop().on_success,
        );
        let output = parse(&JsonFormatter.format_notification(&notification));
        assert_eq!(output["params"], json!(["Alice"]));
    }

    #[test]
    fn test_queries() {
        let queries = vec![QuerySummary {
            name: "ping".to_string(),
            description: None,
            validators: 0,
            resolvers: 0,
        }];
        let output = parse(&JsonFormatter.format_queries(&queries));
        assert_eq!(output["queries"][0]["name"], json!("ping"));
    }
}
