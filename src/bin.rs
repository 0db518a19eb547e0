//! Binary entry point for `trigger-bot`.
//!
//! Parses the command line, installs the stdout and OTLP tracing layers, loads
//! the configuration, and then long-polls Telegram until Ctrl-C.

use clap::Parser;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing::info;
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};
use trigger_bot::base::{config::Config, types::Res};

/// Trigger-bot – answers operator-curated trigger phrases in Telegram chats.
///
/// The bot replies only when a message contains exactly one known trigger.
/// The admin manages triggers with `/admin` commands. Settings come from a
/// TOML file and `TRIGGER_BOT_*` environment variables, the latter winning.
#[derive(Parser, Debug)]
#[command(version, author, about, long_about = None)]
struct Args {
    /// Path of the TOML config file.
    ///
    /// Defaults to `.hidden/config.toml` when that file exists; otherwise only
    /// the environment is read.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
    /// Log verbosity: INFO by default, `-v` for DEBUG, `-vv` for TRACE.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Res<()> {
    let args = Args::parse();

    let provider = init_tracing(args.verbose)?;

    let config = Config::load(args.config.as_deref())?;

    info!(
        db_endpoint = %config.db_endpoint,
        operator_chat_id = ?config.operator_chat_id,
        log_chat_id = ?config.log_chat_id,
        "Configuration loaded."
    );

    let result = trigger_bot::start(config).await;

    // Spans still buffered by the exporter go out before exit.
    provider.shutdown().map_err(|e| anyhow::anyhow!("Failed to shut down the tracer provider: {}", e))?;

    result
}

/// Installs the stdout layer and the OTLP span exporter.
///
/// Returns the tracer provider so it can be shut down on exit.
fn init_tracing(verbose: u8) -> Res<SdkTracerProvider> {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let stdout = tracing_subscriber::fmt::layer()
        .with_ansi(true)
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE);

    let exporter = opentelemetry_otlp::SpanExporter::builder().with_http().with_protocol(Protocol::HttpBinary).build()?;
    let provider = SdkTracerProvider::builder().with_simple_exporter(exporter).build();
    let otel = tracing_opentelemetry::layer().with_tracer(provider.tracer("trigger-bot"));

    tracing_subscriber::registry()
        .with(otel)
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .with(stdout)
        .init();

    Ok(provider)
}
