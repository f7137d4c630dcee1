//! `drdash` — real-time terminal dashboard for Oracle production/DR
//! database pairs behind a load balancer.
//!
//! Polls the dashboard backend on an adaptive time-of-day cadence,
//! aggregates per-node health and routing state through `drdash-core`,
//! and renders a live status grid with [ratatui](https://ratatui.rs).
//!
//! Logs are written to a file (default `/tmp/drdash.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and
//! app launch.

mod app;
mod dashboard;
mod event;
mod i18n;
mod theme;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use drdash_api::{DashboardClient, TransportConfig};
use drdash_core::{Controller, PollMode};

use crate::app::App;

/// Terminal dashboard for monitoring Oracle production/DR database pairs.
#[derive(Parser, Debug)]
#[command(name = "drdash", version, about)]
struct Cli {
    /// Dashboard backend URL (overrides the config file)
    #[arg(short = 'u', long, env = "DRDASH_URL")]
    url: Option<String>,

    /// Config file path (defaults to the platform config dir)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// UI language for translations
    #[arg(short = 'l', long, default_value = "en", env = "DRDASH_LANG")]
    lang: String,

    /// Poll the mock endpoint instead of live data
    #[arg(long)]
    mock: bool,

    /// Accept invalid TLS certificates (self-signed reverse proxies)
    #[arg(long)]
    insecure: bool,

    /// Log file path (defaults to /tmp/drdash.log)
    #[arg(long, default_value = "/tmp/drdash.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that
/// would corrupt the TUI output. Returns a guard that must be held for
/// the lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("drdash={log_level},drdash_core={log_level},drdash_api={log_level}")));

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("drdash.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let mut config = match &cli.config {
        Some(path) => drdash_config::load_from(path),
        None => drdash_config::load_config(),
    }
    .map_err(|e| eyre!("failed to load configuration: {e}"))?;

    if let Some(url) = &cli.url {
        config.base_url.clone_from(url);
    }
    let base_url = config
        .backend_url()
        .map_err(|e| eyre!("invalid backend URL: {e}"))?;

    info!(url = %base_url, lang = %cli.lang, mock = cli.mock, "starting drdash");

    let transport = TransportConfig {
        danger_accept_invalid_certs: cli.insecure,
        ..TransportConfig::default()
    };
    let client = DashboardClient::new(base_url, &transport)
        .map_err(|e| eyre!("failed to build HTTP client: {e}"))?;

    // Translations load once at startup and degrade to raw keys.
    let translations = i18n::load(&client, &cli.lang).await;

    let mode = if cli.mock {
        PollMode::Mock {
            lang: cli.lang.clone(),
        }
    } else {
        PollMode::Live
    };
    let controller = Controller::new(client, mode, config.frontend.refresh_policy());

    App::new(controller, translations, config).run().await
}
