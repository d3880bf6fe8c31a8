//! Assistant configuration parsed from environment variables.

use super::error::AssistantError;
use std::time::Duration;

pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Timeouts {
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssistantConfig {
    /// Name of the env var holding the API key. The key itself is read per call.
    pub api_key_var: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub timeouts: Timeouts,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key_var: DEFAULT_API_KEY_ENV.to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            temperature: TEMPERATURE,
            timeouts: Timeouts::default(),
        }
    }
}

impl AssistantConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `TICTAC_API_KEY_ENV`: name of the key variable, default `OPENAI_API_KEY`
    /// - `TICTAC_MODEL`: default `gpt-4o-mini`
    /// - `TICTAC_OPENAI_BASE_URL`: default OpenAI API base URL
    /// - `TICTAC_REQUEST_TIMEOUT_SECS`: default 60
    /// - `TICTAC_CONNECT_TIMEOUT_SECS`: default 10
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key_var =
            non_empty("TICTAC_API_KEY_ENV").unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());
        let model = non_empty("TICTAC_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = non_empty("TICTAC_OPENAI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let parse_u64 = |key: &str, default: u64| {
            lookup(key)
                .and_then(|value| value.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };
        let timeouts = Timeouts {
            request_secs: parse_u64("TICTAC_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64("TICTAC_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Self {
            api_key_var,
            model,
            base_url,
            temperature: TEMPERATURE,
            timeouts,
        }
    }

    /// Reads the API key from the environment.
    pub fn api_key(&self) -> Result<String, AssistantError> {
        std::env::var(&self.api_key_var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AssistantError::MissingCredential {
                var: self.api_key_var.clone(),
            })
    }
}
