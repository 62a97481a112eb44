//! thousandeyes-alert-rule - ThousandEyes alert rule lookup service
//!
//! Resolves a single alert rule by ID or name, either once from the command
//! line or on demand over a small HTTP API.

use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

use config::LogFormat;
use thousandeyes_alert_rule::{
    api, config,
    services::{resolver, ThousandEyesClient},
    utils::ErrorResponse,
    AlertRuleSource, AppConfig, AppState, LookupError, SearchCriteria,
};

const AFTER_HELP: &str = r#"Without --rule-id or --rule-name the HTTP API is started:
    GET /api/v1/alert-rules/lookup?rule_id=<ID>
    GET /api/v1/alert-rules/lookup?rule_name=<NAME>
    GET /api/v1/health

ENVIRONMENT:
    TE_ALERT_RULE_CONFIG    Path to configuration file (default: config.yaml)
    THOUSANDEYES_TOKEN      ThousandEyes API bearer token
    THOUSANDEYES_API_URL    API base URL (default: https://api.thousandeyes.com/v6)
    THOUSANDEYES_ACCOUNT_GROUP_ID
                            Account group to query

CONFIGURATION:
    The application looks for configuration files in the following order:
    1. Path specified by TE_ALERT_RULE_CONFIG environment variable
    2. ./config.yaml
    3. ./config/config.yaml
    4. /etc/thousandeyes-alert-rule/config.yaml"#;

#[derive(Debug, Parser)]
#[command(name = "thousandeyes-alert-rule", version)]
#[command(about = "Read-only ThousandEyes alert rule lookup", long_about = None)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// Look up one alert rule by ID, print its attributes as JSON and exit
    #[arg(long, value_name = "ID")]
    rule_id: Option<i64>,
    /// Look up one alert rule by exact name, print its attributes as JSON and exit
    #[arg(long, value_name = "NAME")]
    rule_name: Option<String>,
}

impl Cli {
    /// Criteria for a one-shot lookup, or `None` to start the HTTP API
    ///
    /// Mutual exclusivity is left to the resolver.
    fn lookup_criteria(&self) -> Option<SearchCriteria> {
        if self.rule_id.is_none() && self.rule_name.is_none() {
            return None;
        }
        Some(SearchCriteria {
            rule_id: self.rule_id,
            rule_name: self.rule_name.clone(),
        })
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we know log format)
    let config = AppConfig::load().context("Failed to load configuration")?;

    // The guard must be kept alive for the duration of the program
    // to ensure log messages are flushed to files
    let _log_guard = init_logging(&config);

    info!("Configuration loaded successfully");

    let client = Arc::new(
        ThousandEyesClient::new(&config.thousandeyes)
            .context("Failed to initialize ThousandEyes client")?,
    );

    if let Some(criteria) = cli.lookup_criteria() {
        return run_lookup(&criteria, client.as_ref()).await;
    }

    serve(config, client).await?;
    Ok(ExitCode::SUCCESS)
}

/// One-shot lookup: attributes on stdout, or the API error body on stderr
async fn run_lookup<S>(criteria: &SearchCriteria, source: &S) -> Result<ExitCode>
where
    S: AlertRuleSource + ?Sized,
{
    match resolver::lookup(criteria, source).await {
        Ok(attributes) => {
            println!("{}", serde_json::to_string_pretty(&attributes)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}", render_failure(&err)?);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Render a lookup failure the way the HTTP API reports it
fn render_failure(err: &LookupError) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ErrorResponse::from(err))?)
}

/// Run the HTTP API until the process is stopped
async fn serve(config: AppConfig, client: Arc<ThousandEyesClient>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address configuration")?;

    let state = AppState { source: client };

    let app = api::router(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("HTTP server is ready to accept connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Initialize the logging/tracing infrastructure
fn init_logging(config: &AppConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use config::LogTarget;
    use tracing_subscriber::{prelude::*, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let log_config = &config.logging;

    match &log_config.target {
        LogTarget::Console => {
            let subscriber = tracing_subscriber::registry().with(env_filter);
            init_console_logging(subscriber, &log_config.format);
            None
        }
        LogTarget::File => {
            let (writer, guard) = create_file_writer(log_config);
            let subscriber = tracing_subscriber::registry().with(env_filter);
            init_file_logging(subscriber, &log_config.format, writer);
            Some(guard)
        }
        LogTarget::Both => {
            let (writer, guard) = create_file_writer(log_config);
            let subscriber = tracing_subscriber::registry().with(env_filter);
            init_console_logging(
                subscriber.with(file_layer(&log_config.format, writer)),
                &log_config.format,
            );
            Some(guard)
        }
    }
}

/// Create a file writer with optional daily rotation
fn create_file_writer(
    log_config: &config::LoggingConfig,
) -> (
    tracing_appender::non_blocking::NonBlocking,
    tracing_appender::non_blocking::WorkerGuard,
) {
    if let Err(e) = std::fs::create_dir_all(&log_config.log_dir) {
        eprintln!(
            "Warning: Failed to create log directory {:?}: {}",
            log_config.log_dir, e
        );
    }

    let file_appender = if log_config.daily_rotation {
        tracing_appender::rolling::daily(&log_config.log_dir, &log_config.log_prefix)
    } else {
        tracing_appender::rolling::never(&log_config.log_dir, &log_config.log_prefix)
    };

    tracing_appender::non_blocking(file_appender)
}

/// Console logging goes to stderr so lookup output on stdout stays clean
fn init_console_logging<S>(subscriber: S, format: &LogFormat)
where
    S: tracing::Subscriber
        + for<'a> tracing_subscriber::registry::LookupSpan<'a>
        + Send
        + Sync
        + 'static,
{
    use tracing_subscriber::{fmt, prelude::*};

    match format {
        LogFormat::Json => {
            subscriber
                .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Compact => {
            subscriber
                .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            subscriber
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
}

/// Initialize file-only logging
fn init_file_logging<S>(
    subscriber: S,
    format: &LogFormat,
    writer: tracing_appender::non_blocking::NonBlocking,
) where
    S: tracing::Subscriber
        + for<'a> tracing_subscriber::registry::LookupSpan<'a>
        + Send
        + Sync
        + 'static,
{
    use tracing_subscriber::prelude::*;

    subscriber.with(file_layer(format, writer)).init();
}

/// Build the file layer for the configured format
fn file_layer<S>(
    format: &LogFormat,
    writer: tracing_appender::non_blocking::NonBlocking,
) -> Box<dyn tracing_subscriber::Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a> + 'static,
{
    use tracing_subscriber::{fmt, Layer};

    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .with_ansi(false)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(false)
            .with_writer(writer)
            .boxed(),
    }
}
