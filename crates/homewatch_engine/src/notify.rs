use std::fmt;
use std::time::Duration;

use watch_logging::watch_info;

/// Where and how to reach the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct NotifySettings {
    pub api_base: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.telegram.org".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct DeliveryError {
    pub kind: DeliveryFailureKind,
    pub message: String,
}

impl DeliveryError {
    pub(crate) fn new(kind: DeliveryFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Authentication and permission rejections cannot be retried away;
    /// everything else is worth another attempt next cycle.
    pub fn is_recoverable(&self) -> bool {
        match self.kind {
            DeliveryFailureKind::Network | DeliveryFailureKind::Timeout => true,
            DeliveryFailureKind::Rejected(status) => status != 401 && status != 403,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryFailureKind {
    Network,
    Timeout,
    /// The messaging API answered with a non-success status.
    Rejected(u16),
}

impl fmt::Display for DeliveryFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryFailureKind::Network => write!(f, "network error"),
            DeliveryFailureKind::Timeout => write!(f, "timeout"),
            DeliveryFailureKind::Rejected(code) => write!(f, "rejected with status {code}"),
        }
    }
}

/// The delivery collaborator: at most one call per cycle.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError>;
}

/// Sends messages to a fixed chat through the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    settings: NotifySettings,
    bot_token: String,
    chat_id: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(
        settings: NotifySettings,
        bot_token: String,
        chat_id: String,
    ) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| DeliveryError::new(DeliveryFailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            bot_token,
            chat_id,
            client,
        })
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.settings.api_base, self.bot_token
        );
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "chat_id": self.chat_id, "text": text }))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::new(
                DeliveryFailureKind::Rejected(status.as_u16()),
                describe_rejection(status.as_u16(), &body),
            ));
        }

        watch_info!("notification delivered to chat {}", self.chat_id);
        Ok(())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> DeliveryError {
    if err.is_timeout() {
        return DeliveryError::new(DeliveryFailureKind::Timeout, err.to_string());
    }
    DeliveryError::new(DeliveryFailureKind::Network, err.to_string())
}

/// Telegram error bodies carry a human-readable `description`; surface it
/// when present.
fn describe_rejection(status: u16, body: &str) -> String {
    let description = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("description")
                .and_then(|d| d.as_str())
                .map(str::to_string)
        });
    match description {
        Some(text) => format!("sendMessage rejected ({status}): {text}"),
        None => format!("sendMessage rejected ({status})"),
    }
}
