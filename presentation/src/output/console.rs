//! Console output formatter for dispatch results

use super::formatter::{OutputFormatter, QuerySummary};
use colored::Colorize;
use serde_json::Value;
use switchboard_application::{DispatchError, Notification, SendOutcome};

/// Formats results for console display
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render a JSON value compactly, strings without quotes
    fn inline(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Null => "(no error given)".to_string(),
            other => other.to_string(),
        }
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_outcome(&self, query: &str, outcome: &SendOutcome) -> String {
        match outcome {
            SendOutcome::Emitted { listeners } => format!(
                "{} {} dispatched to {} listener{}",
                "✓".green().bold(),
                query.bold(),
                listeners,
                if *listeners == 1 { "" } else { "s" }
            ),
            SendOutcome::Rejected {
                validator_index,
                error,
            } => format!(
                "{} {} rejected by validator #{}: {}",
                "✗".red().bold(),
                query.bold(),
                validator_index + 1,
                Self::inline(error)
            ),
        }
    }

    fn format_error(&self, query: &str, error: &DispatchError) -> String {
        let label = if error.is_unknown_query() {
            "Unknown query"
        } else {
            "Resolution failed"
        };
        format!("{} {} ({}): {}", "error:".red().bold(), label, query, error)
    }

    fn format_notification(&self, notification: &Notification) -> String {
        format!(
            "{} {} {}",
            "→".cyan(),
            notification.query().cyan().bold(),
            notification.params().to_value()
        )
    }

    fn format_resolved(&self, query: &str, resolved: &Value) -> String {
        let pretty = serde_json::to_string_pretty(resolved).unwrap_or_else(|_| resolved.to_string());
        format!("{}\n{}", query.cyan().bold(), Self::indent(&pretty, "  "))
    }

    fn format_queries(&self, queries: &[QuerySummary]) -> String {
        if queries.is_empty() {
            return format!("{}", "No queries registered".dimmed());
        }

        let mut output = format!("{}\n", "Registered queries:".cyan().bold());
        for query in queries {
            output.push_str(&format!(
                "  {:<24} {} validator(s), {} resolver(s)",
                query.name.bold(),
                query.validators,
                query.resolvers
            ));
            if let Some(description) = &query.description {
                output.push_str(&format!("  {}", description.dimmed()));
            }
            output.push('\n');
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plain<F: FnOnce() -> String>(render: F) -> String {
        colored::control::set_override(false);
        render()
    }

    #[test]
    fn test_format_emitted() {
        let output = plain(|| {
            ConsoleFormatter.format_outcome("createUser", &SendOutcome::Emitted { listeners: 1 })
        });
        assert_eq!(output, "✓ createUser dispatched to 1 listener");
    }

    #[test]
    fn test_format_rejected_is_one_based() {
        let output = plain(|| {
            ConsoleFormatter.format_outcome(
                "createUser",
                &SendOutcome::Rejected {
                    validator_index: 0,
                    error: json!("name required"),
                },
            )
        });
        assert_eq!(
            output,
            "✗ createUser rejected by validator #1: name required"
        );
    }

    #[test]
    fn test_format_resolved_indents() {
        let output = plain(|| ConsoleFormatter.format_resolved("q", &json!({"a": 1})));
        assert_eq!(output, "q\n  {\n    \"a\": 1\n  }");
    }

    #[test]
    fn test_format_empty_queries() {
        let output = plain(|| ConsoleFormatter.format_queries(&[]));
        assert_eq!(output, "No queries registered");
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "> "), "> a\n> b");
    }
}
