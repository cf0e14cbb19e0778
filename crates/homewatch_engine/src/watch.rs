use std::sync::Arc;
use std::time::Duration;

use homewatch_core::{translate, validate, TranslateError, ValidateError, WatchState};
use watch_logging::{watch_debug, watch_error, watch_info};

use crate::fetch::{FetchError, FetchFailureKind, StatusFetcher};
use crate::notify::{DeliveryError, Notifier};

/// Clock used for the initial watermark and the wall-clock fallback;
/// injected so tests can pin time.
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

#[derive(Clone)]
pub struct WatchSettings {
    pub poll_interval: Duration,
    pub now: Clock,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(600),
            now: Arc::new(|| chrono::Utc::now().timestamp()),
        }
    }
}

/// One full poll cycle's visible result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status change was delivered to the chat.
    Notified(String),
    /// The cycle completed but the status was unchanged.
    Unchanged,
}

/// Everything that can go wrong inside one poll cycle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CycleError {
    #[error("fetch failed: {message}")]
    Transport { message: String },
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
    #[error("no homework entries in the requested window")]
    EmptyResult,
    #[error("unrecognized review status `{status}`")]
    UnknownStatus { status: String },
    #[error("homework entry carries no name")]
    MissingName,
    #[error("delivery failed: {message}")]
    DeliveryFailure { recoverable: bool, message: String },
}

impl CycleError {
    /// Only an unrecoverable delivery failure tears the loop down.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CycleError::DeliveryFailure {
                recoverable: false,
                ..
            }
        )
    }
}

impl From<FetchError> for CycleError {
    fn from(err: FetchError) -> Self {
        match err.kind {
            FetchFailureKind::Decode => CycleError::MalformedResponse {
                reason: format!("response body is not JSON: {}", err.message),
            },
            kind => CycleError::Transport {
                message: format!("{kind}: {}", err.message),
            },
        }
    }
}

impl From<ValidateError> for CycleError {
    fn from(err: ValidateError) -> Self {
        match err {
            ValidateError::MalformedResponse { reason } => CycleError::MalformedResponse { reason },
            ValidateError::EmptyResult => CycleError::EmptyResult,
        }
    }
}

impl From<TranslateError> for CycleError {
    fn from(err: TranslateError) -> Self {
        match err {
            TranslateError::UnknownStatus { status } => CycleError::UnknownStatus { status },
            TranslateError::MissingName => CycleError::MissingName,
        }
    }
}

impl From<DeliveryError> for CycleError {
    fn from(err: DeliveryError) -> Self {
        CycleError::DeliveryFailure {
            recoverable: err.is_recoverable(),
            message: format!("{}: {}", err.kind, err.message),
        }
    }
}

/// Single-owner poll loop: fetch, validate, translate, compare, deliver,
/// then sleep a fixed interval and start over.
pub struct StatusWatch<F, N> {
    fetcher: F,
    notifier: N,
    state: WatchState,
    settings: WatchSettings,
}

impl<F: StatusFetcher, N: Notifier> StatusWatch<F, N> {
    pub fn new(fetcher: F, notifier: N, settings: WatchSettings) -> Self {
        let state = WatchState::new((settings.now)());
        Self {
            fetcher,
            notifier,
            state,
            settings,
        }
    }

    /// Loop state, visible for the driver and for tests.
    pub fn state(&self) -> &WatchState {
        &self.state
    }

    /// Runs one poll cycle. State advances only on the success paths; every
    /// error leaves the watermark and last known status exactly as they
    /// were, so the next cycle re-requests the same window and retries any
    /// pending delivery.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome, CycleError> {
        let payload = self.fetcher.fetch(self.state.watermark()).await?;
        let batch = validate(&payload)?;
        // validate guarantees a non-null first entry.
        let Some(item) = batch.items.first() else {
            return Err(CycleError::EmptyResult);
        };
        let message = translate(item)?;
        let next_watermark = batch
            .next_watermark
            .unwrap_or_else(|| (self.settings.now)());

        if !self.state.is_notification_due(&message) {
            self.state.record_quiet_cycle(next_watermark);
            return Ok(CycleOutcome::Unchanged);
        }

        self.notifier.deliver(&message).await?;
        self.state.record_delivery(message.clone(), next_watermark);
        Ok(CycleOutcome::Notified(message))
    }

    /// Drives cycles forever, absorbing recoverable errors; returns only on
    /// a fatal delivery failure.
    pub async fn run(mut self) -> CycleError {
        loop {
            match self.run_cycle().await {
                Ok(CycleOutcome::Notified(message)) => {
                    watch_info!("status change delivered: {message}");
                }
                Ok(CycleOutcome::Unchanged) => {
                    watch_debug!("status unchanged, nothing to deliver");
                }
                Err(err) if err.is_fatal() => {
                    watch_error!("aborting: {err}");
                    return err;
                }
                Err(err) => log_recoverable(&err),
            }
            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }
}

fn log_recoverable(err: &CycleError) {
    match err {
        CycleError::Transport { message } => {
            watch_error!("fetch failed, will retry next cycle: {message}");
        }
        CycleError::MalformedResponse { reason } => {
            watch_error!("unusable response, window kept: {reason}");
        }
        CycleError::EmptyResult => {
            watch_error!("no homework entries in the window, window kept");
        }
        CycleError::UnknownStatus { status } => {
            watch_error!("unrecognized review status `{status}`, waiting for the next window");
        }
        CycleError::MissingName => {
            watch_error!("homework entry carries no name, waiting for the next window");
        }
        CycleError::DeliveryFailure { message, .. } => {
            watch_error!("delivery failed, will retry the same message: {message}");
        }
    }
}
