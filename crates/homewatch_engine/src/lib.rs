//! Watcher engine: IO collaborators and the poll loop.
mod fetch;
mod notify;
mod watch;

pub use fetch::{FetchError, FetchFailureKind, FetchSettings, HttpStatusFetcher, StatusFetcher};
pub use notify::{DeliveryError, DeliveryFailureKind, Notifier, NotifySettings, TelegramNotifier};
pub use watch::{Clock, CycleError, CycleOutcome, StatusWatch, WatchSettings};
