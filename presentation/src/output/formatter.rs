//! Output formatter trait

use serde::Serialize;
use serde_json::Value;
use switchboard_application::{DispatchError, Notification, SendOutcome};

/// One registered query, as shown by `switchboard list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuerySummary {
    pub name: String,
    pub description: Option<String>,
    pub validators: usize,
    pub resolvers: usize,
}

/// Trait for formatting command results
pub trait OutputFormatter {
    /// Format the outcome of a `send`
    fn format_outcome(&self, query: &str, outcome: &SendOutcome) -> String;

    /// Format a hard dispatch failure
    fn format_error(&self, query: &str, error: &DispatchError) -> String;

    /// Format a notification received by a listener
    fn format_notification(&self, notification: &Notification) -> String;

    /// Format a resolved configuration tree
    fn format_resolved(&self, query: &str, resolved: &Value) -> String;

    /// Format the list of registered queries
    fn format_queries(&self, queries: &[QuerySummary]) -> String;
}
