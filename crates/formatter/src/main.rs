//! AnswerForge Formatter
//!
//! Command-line host for the answer formatting engine:
//! - Reads a generated answer (JSON) from a file or stdin
//! - Applies configured default options and per-run overrides
//! - Prints structured JSON, the HTML fragment, or the plain text
//! - Optionally dumps Prometheus metrics to stderr

use anyhow::Context;
use answerforge_common::{
    config::{AppConfig, ObservabilityConfig},
    metrics::{register_metrics, FORMAT_BUCKETS},
    FormattedContent, GeneratedAnswer, VERSION,
};
use clap::{Parser, ValueEnum};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "answer-format", version, about = "Format a generated answer for display")]
struct Cli {
    /// Generated answer JSON file; reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Configuration file; defaults to config/* and APP__ environment variables
    #[arg(short, long)]
    config: Option<String>,

    /// JSON object of option overrides, e.g. '{"includeCitations": false}'
    #[arg(short, long)]
    options: Option<String>,

    /// What to print
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    output: OutputFormat,

    /// Print Prometheus metrics to stderr when done
    #[arg(long)]
    emit_metrics: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Full formatted content as JSON
    Json,
    /// HTML fragment only
    Html,
    /// Plain text only
    Text,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::load(),
    }
    .context("Failed to load configuration")?;

    // Initialize tracing
    init_tracing(&config.observability);
    info!(
        service = %config.observability.service_name,
        "Starting AnswerForge formatter v{}", VERSION
    );

    // Initialize metrics
    let metrics_handle = if cli.emit_metrics {
        Some(install_metrics()?)
    } else {
        None
    };

    let raw = read_input(cli.input.as_deref()).await?;
    let answer =
        GeneratedAnswer::from_json(&raw).context("Input is not a valid generated answer")?;

    let mut formatter = config.formatter();
    if let Some(overrides) = &cli.options {
        let value: serde_json::Value =
            serde_json::from_str(overrides).context("--options is not valid JSON")?;
        formatter
            .update_options_json(value)
            .context("--options rejected")?;
    }
    debug!(options = ?formatter.options(), "Formatting answer");

    let formatted = formatter.format_answer(&answer);
    info!(
        answer_id = %answer.id,
        sections = formatted.structured_data.sections.len(),
        words = formatted.word_count,
        "Answer formatted"
    );

    let rendered = render_output(formatted, cli.output)?;
    let mut stdout = tokio::io::stdout();
    stdout.write_all(rendered.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;

    if let Some(handle) = metrics_handle {
        eprintln!("{}", handle.render());
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only the formatted answer
fn init_tracing(observability: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&observability.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if observability.json_logging {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn install_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets(FORMAT_BUCKETS)
        .context("Invalid histogram buckets")?
        .install_recorder()
        .context("Failed to install metrics recorder")?;

    register_metrics();
    Ok(handle)
}

async fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("Failed to read stdin")?;
            Ok(raw)
        }
    }
}

fn render_output(formatted: FormattedContent, output: OutputFormat) -> anyhow::Result<String> {
    Ok(match output {
        OutputFormat::Json => serde_json::to_string_pretty(&formatted)?,
        OutputFormat::Html => formatted.html,
        OutputFormat::Text => formatted.plain_text,
    })
}
