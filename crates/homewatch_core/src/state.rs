/// Process-wide loop state: the fetch watermark and the last status text
/// that was successfully delivered.
///
/// Both fields advance only through the `record_*` methods; every failure
/// path leaves the state untouched so the next cycle re-requests the same
/// window and, if a message was pending, retries the same delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchState {
    watermark: i64,
    last_status: Option<String>,
}

impl WatchState {
    pub fn new(watermark: i64) -> Self {
        Self {
            watermark,
            last_status: None,
        }
    }

    /// Lower bound of the next fetch window.
    pub fn watermark(&self) -> i64 {
        self.watermark
    }

    pub fn last_status(&self) -> Option<&str> {
        self.last_status.as_deref()
    }

    /// A notification is due iff the message differs from the last one that
    /// was actually delivered.
    pub fn is_notification_due(&self, message: &str) -> bool {
        self.last_status.as_deref() != Some(message)
    }

    /// Record a successful delivery: the message becomes the last known
    /// status and the window advances.
    pub fn record_delivery(&mut self, message: String, next_watermark: i64) {
        self.last_status = Some(message);
        self.watermark = next_watermark;
    }

    /// Record a cycle that completed without a change: only the window
    /// advances.
    pub fn record_quiet_cycle(&mut self, next_watermark: i64) {
        self.watermark = next_watermark;
    }
}
