use std::fmt;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde_json::Value;

/// Where and how to reach the review API.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FetchFailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FetchFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailureKind {
    Network,
    Timeout,
    HttpStatus(u16),
    /// The body of a 200 response was not JSON.
    Decode,
}

impl fmt::Display for FetchFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailureKind::Network => write!(f, "network error"),
            FetchFailureKind::Timeout => write!(f, "timeout"),
            FetchFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FetchFailureKind::Decode => write!(f, "undecodable body"),
        }
    }
}

/// The fetch collaborator: one call per cycle with the current watermark.
#[async_trait::async_trait]
pub trait StatusFetcher: Send + Sync {
    async fn fetch(&self, since: i64) -> Result<Value, FetchError>;
}

/// Queries the review API over HTTPS with the account's OAuth token.
#[derive(Debug, Clone)]
pub struct HttpStatusFetcher {
    settings: FetchSettings,
    api_token: String,
    client: reqwest::Client,
}

impl HttpStatusFetcher {
    pub fn new(settings: FetchSettings, api_token: String) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FetchFailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            api_token,
            client,
        })
    }
}

#[async_trait::async_trait]
impl StatusFetcher for HttpStatusFetcher {
    async fn fetch(&self, since: i64) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(&self.settings.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.api_token))
            .query(&[("from_date", since)])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FetchFailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        response.json::<Value>().await.map_err(|err| {
            if err.is_timeout() {
                FetchError::new(FetchFailureKind::Timeout, err.to_string())
            } else {
                FetchError::new(FetchFailureKind::Decode, err.to_string())
            }
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FetchFailureKind::Timeout, err.to_string());
    }
    FetchError::new(FetchFailureKind::Network, err.to_string())
}
