//! CLI entrypoint for switchboard
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use switchboard_application::{Callbacks, Dispatcher, Notification, SendOutcome};
use switchboard_domain::QueryRegistry;
use switchboard_infrastructure::{ConfigLoader, EventBus, FileConfig, FileOutputFormat};
use switchboard_presentation::{
    Cli, Command, ConsoleFormatter, JsonFormatter, OutputFormat, OutputFormatter, QuerySummary,
    parse_params,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

type SharedFormatter = Arc<dyn OutputFormatter + Send + Sync>;

/// Exit code for a query rejected by one of its validators
const EXIT_REJECTED: u8 = 1;
/// Exit code for unknown queries and resolver failures
const EXIT_DISPATCH_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Command::ShowConfig = cli.command {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };

    if !file_config.output.color {
        colored::control::set_override(false);
    }

    let format = cli.output.unwrap_or(match file_config.output.format {
        Some(FileOutputFormat::Json) => OutputFormat::Json,
        Some(FileOutputFormat::Text) | None => OutputFormat::Text,
    });
    let formatter: SharedFormatter = match format {
        OutputFormat::Text => Arc::new(ConsoleFormatter),
        OutputFormat::Json => Arc::new(JsonFormatter),
    };

    // === Dependency Injection ===
    let registry = Arc::new(file_config.to_registry()?);
    info!("Loaded {} queries", registry.len());
    let dispatcher = Dispatcher::new(Arc::clone(&registry), Arc::new(EventBus::new()));

    match cli.command {
        Command::Send { query, params } => {
            dispatcher.on(&query, console_listener(Arc::clone(&formatter)));
            debug!(
                query = %query,
                listeners = dispatcher.listener_count(&query),
                "Registered console listener"
            );

            let callbacks = Callbacks::new(
                |value| debug!(%value, "Success callback invoked"),
                |error| debug!(%error, "Failure callback invoked"),
            );

            match dispatcher.send(&query, callbacks, parse_params(&params)).await {
                Ok(outcome) => {
                    println!("{}", formatter.format_outcome(&query, &outcome));
                    Ok(match outcome {
                        SendOutcome::Emitted { .. } => ExitCode::SUCCESS,
                        SendOutcome::Rejected { .. } => ExitCode::from(EXIT_REJECTED),
                    })
                }
                Err(error) => {
                    eprintln!("{}", formatter.format_error(&query, &error));
                    Ok(ExitCode::from(EXIT_DISPATCH_ERROR))
                }
            }
        }
        Command::Resolve { query, params } => {
            match dispatcher.preview(&query, &parse_params(&params)).await {
                Ok(resolved) => {
                    println!("{}", formatter.format_resolved(&query, &resolved));
                    Ok(ExitCode::SUCCESS)
                }
                Err(error) => {
                    eprintln!("{}", formatter.format_error(&query, &error));
                    Ok(ExitCode::from(EXIT_DISPATCH_ERROR))
                }
            }
        }
        Command::List => {
            let summaries = summarize(&file_config, &registry);
            println!("{}", formatter.format_queries(&summaries));
            Ok(ExitCode::SUCCESS)
        }
        Command::ShowConfig => Ok(ExitCode::SUCCESS),
    }
}

/// Listener that echoes the notification and completes the success
/// continuation with the invocation parameters
fn console_listener(formatter: SharedFormatter) -> impl Fn(&Notification) + Send + Sync + 'static {
    move |notification: &Notification| {
        println!("{}", formatter.format_notification(notification));
        notification.succeed(notification.params().to_value());
    }
}

fn summarize(file_config: &FileConfig, registry: &QueryRegistry) -> Vec<QuerySummary> {
    registry
        .names()
        .into_iter()
        .filter_map(|name| {
            let definition = registry.get(name)?;
            Some(QuerySummary {
                name: name.to_string(),
                description: file_config
                    .queries
                    .get(name)
                    .and_then(|query| query.description.clone()),
                validators: definition.validators().len(),
                resolvers: definition.config().resolver_count(),
            })
        })
        .collect()
}
