mod config;
mod logging;

use std::process::ExitCode;

use anyhow::Context;
use homewatch_engine::{
    CycleError, FetchSettings, HttpStatusFetcher, NotifySettings, StatusWatch, TelegramNotifier,
    WatchSettings,
};
use watch_logging::{watch_error, watch_info};

use crate::config::Config;
use crate::logging::LogDestination;

fn main() -> ExitCode {
    // Populate the environment from a local .env file when present.
    let _ = dotenvy::dotenv();

    logging::initialize(LogDestination::Both);

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            watch_error!("startup aborted: {err}");
            eprintln!("startup aborted: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(config) {
        Ok(err) => {
            // The loop only ever returns on a fatal delivery failure.
            watch_error!("watcher stopped: {err}");
            eprintln!("watcher stopped: {err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            watch_error!("startup failed: {err:#}");
            eprintln!("startup failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> anyhow::Result<CycleError> {
    let mut fetch_settings = FetchSettings::default();
    if let Some(endpoint) = config.endpoint {
        fetch_settings.endpoint = endpoint;
    }

    let fetcher = HttpStatusFetcher::new(fetch_settings, config.api_token)
        .context("building the status fetcher")?;
    let notifier = TelegramNotifier::new(NotifySettings::default(), config.bot_token, config.chat_id)
        .context("building the notifier")?;

    let settings = WatchSettings::default();
    watch_info!(
        "watching for review-status changes, poll interval {:?}",
        settings.poll_interval
    );
    let watch = StatusWatch::new(fetcher, notifier, settings);

    // The whole program is a single cooperative loop on one thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building the async runtime")?;

    Ok(runtime.block_on(watch.run()))
}
