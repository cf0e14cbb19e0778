//! Startup configuration, read once from the process environment.

use thiserror::Error;

pub const API_TOKEN_VAR: &str = "REVIEW_API_TOKEN";
pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";
pub const ENDPOINT_VAR: &str = "REVIEW_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_token: String,
    pub bot_token: String,
    pub chat_id: String,
    /// Optional override of the review API endpoint.
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is missing or empty")]
    MissingVar(&'static str),
}

impl Config {
    /// Reads configuration from the process environment. Only presence is
    /// checked here; invalid credentials surface later as fetch or delivery
    /// failures.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            api_token: required(&get, API_TOKEN_VAR)?,
            bot_token: required(&get, BOT_TOKEN_VAR)?,
            chat_id: required(&get, CHAT_ID_VAR)?,
            endpoint: get(ENDPOINT_VAR).filter(|value| !value.is_empty()),
        })
    }
}

fn required(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    get(name)
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingVar(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_env(name: &str) -> Option<String> {
        match name {
            API_TOKEN_VAR => Some("api".to_string()),
            BOT_TOKEN_VAR => Some("bot".to_string()),
            CHAT_ID_VAR => Some("42".to_string()),
            _ => None,
        }
    }

    #[test]
    fn accepts_complete_environment() {
        let config = Config::from_lookup(full_env).expect("complete env");
        assert_eq!(config.api_token, "api");
        assert_eq!(config.chat_id, "42");
        assert_eq!(config.endpoint, None);
    }

    #[test]
    fn rejects_missing_chat_id() {
        let result =
            Config::from_lookup(|name| if name == CHAT_ID_VAR { None } else { full_env(name) });
        assert_eq!(result, Err(ConfigError::MissingVar(CHAT_ID_VAR)));
    }

    #[test]
    fn rejects_empty_api_token() {
        let result = Config::from_lookup(|name| {
            if name == API_TOKEN_VAR {
                Some(String::new())
            } else {
                full_env(name)
            }
        });
        assert_eq!(result, Err(ConfigError::MissingVar(API_TOKEN_VAR)));
    }

    #[test]
    fn picks_up_endpoint_override() {
        let config = Config::from_lookup(|name| {
            if name == ENDPOINT_VAR {
                Some("http://localhost:9090/statuses/".to_string())
            } else {
                full_env(name)
            }
        })
        .expect("complete env");
        assert_eq!(
            config.endpoint.as_deref(),
            Some("http://localhost:9090/statuses/")
        );
    }
}
