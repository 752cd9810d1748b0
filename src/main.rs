use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{parse_cli_mode, run_agenda_mode, usage};
mod tui;
use tui::{load_session, run_tui};

use studio_deadlines::{
    storage::config::Config,
    sync::{deadline_loader::DeadlineLoader, studio_api::StudioClient},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();

    let options = match parse_cli_mode() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", usage());
            return Ok(());
        }
    };

    let config = Config::load_or_create()
        .with_context(|| format!("loading {}", Config::config_path().display()))?;

    let session = match load_session(&config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Session error: {}", e);
            tracing::error!("Session unavailable: {}", e);
            return Ok(());
        }
    };

    let profile = config.profile(options.role.or(session.role));
    tracing::info!("Using {} dashboard against {}", profile.role, config.api.base_url);

    let api = Arc::new(StudioClient::new(config.api.base_url.as_str()));
    let loader = Arc::new(DeadlineLoader::new(api, session, profile));

    if let Some(date) = options.agenda {
        run_agenda_mode(date, config.ui.checked_date_format(), loader).await?;
        return Ok(());
    }

    run_tui(&config, loader).await?;
    Ok(())
}

fn setup_logging() {
    let log_dir = Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "studio-deadlines.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("studio-deadlines started");
}
