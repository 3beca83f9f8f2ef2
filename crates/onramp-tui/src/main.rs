//! `onramp` — terminal front end for the Onramp platform.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use onramp_config::LogSettings;
use onramp_core::{FeatureFlags, Services, TransportConfig};

#[derive(Debug, Parser)]
#[command(
    name = "onramp",
    version,
    about = "Terminal front end for the Onramp platform",
    long_about = "Landing, registration, and profile views over the Onramp REST API.\n\
        Auth is stubbed: the session starts signed in as the fixed dev user."
)]
struct Cli {
    /// Config file path (defaults to the platform config dir)
    #[arg(long, env = "ONRAMP_CONFIG")]
    config: Option<PathBuf>,

    /// Platform API base URL (overrides config)
    #[arg(long, short = 'a', env = "ONRAMP_API_URL")]
    api_url: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "ONRAMP_TIMEOUT")]
    timeout: Option<u64>,

    /// Increase log verbosity (-v, -vv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_panic_hooks()?;
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => onramp_config::load_config_from(path)?,
        None => onramp_config::load_config_or_default()?,
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if let Some(secs) = cli.timeout {
        config.api.timeout_secs = secs;
    }

    let _log_guard = init_logging(&config.log, cli.verbose)?;
    info!(base_url = %config.api.base_url, "starting onramp");

    let transport = TransportConfig {
        timeout: config.api.timeout(),
        ..TransportConfig::default()
    };
    let services = Services::new(
        &config.api.base_url,
        &transport,
        FeatureFlags::from_map(config.flags.clone()),
    )?;

    let mut app = app::App::new(services);
    app.run().await
}

/// File logging — stderr belongs to the terminal UI.
fn init_logging(
    settings: &LogSettings,
    verbose: u8,
) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let directory = match &settings.directory {
        Some(dir) => dir.clone(),
        None => onramp_config::default_log_dir()?,
    };
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "onramp.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let directive = match verbose {
        0 => settings.filter.clone(),
        1 => "debug".into(),
        _ => "trace".into(),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

/// Panic hooks that restore the terminal before reporting.
fn install_panic_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install()?;

    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::Tui::restore();

        let report = panic_hook.panic_report(panic_info).to_string();
        tracing::error!("panic: {report}");

        #[cfg(debug_assertions)]
        {
            better_panic::Settings::auto()
                .most_recent_first(false)
                .lineno_suffix(true)
                .create_panic_handler()(panic_info);
        }
        #[cfg(not(debug_assertions))]
        {
            use human_panic::{Metadata, handle_dump, print_msg};

            let meta = Metadata::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            let dump = handle_dump(&meta, panic_info);
            let _ = print_msg(dump, &meta);
            eprintln!("{report}");
        }

        std::process::exit(1);
    }));

    Ok(())
}
