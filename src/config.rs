use crate::{ProxyError, ProxyResult};
use std::env;

pub const DEFAULT_MODEL_ID: &str = "gemini-2.0-flash-exp";

/// Pointed at by every configuration error so a missing key is actionable.
pub(crate) const KEY_GUIDANCE: &str =
    "set GEMINI_API_KEY (or GOOGLE_API_KEY); keys are issued at https://aistudio.google.com/apikey";

/// Process-wide configuration, read once at startup.
///
/// A missing key is not a boot failure: the proxy starts and reports a
/// configuration error on each generation call instead, which keeps the
/// liveness endpoint useful for diagnosing exactly that situation.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub api_key: Option<String>,
    pub model_id: String,
    pub port: u16,
    /// Origin allowed by the CORS layer.
    pub app_url: String,
}

impl ProxyConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("GOOGLE_API_KEY"))
            .ok()
            .filter(|key| !key.is_empty());

        Self {
            api_key,
            model_id: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(4000),
            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:4321".to_string()),
        }
    }

    /// The configured key, or a [`ProxyError::Configuration`] telling the
    /// operator where to get one.
    pub fn require_api_key(&self) -> ProxyResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ProxyError::Configuration(KEY_GUIDANCE.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{ProxyConfig, DEFAULT_MODEL_ID};
    use crate::ProxyError;

    fn config_with_key(api_key: Option<&str>) -> ProxyConfig {
        ProxyConfig {
            api_key: api_key.map(str::to_string),
            model_id: DEFAULT_MODEL_ID.to_string(),
            port: 4000,
            app_url: "http://localhost:4321".to_string(),
        }
    }

    #[test]
    fn require_api_key_passes_the_configured_key_through() {
        let config = config_with_key(Some("sk-test"));
        assert_eq!(config.require_api_key().unwrap(), "sk-test");
    }

    #[test]
    fn missing_key_is_a_configuration_error_with_guidance() {
        let config = config_with_key(None);
        match config.require_api_key().unwrap_err() {
            ProxyError::Configuration(message) => {
                assert!(message.contains("GEMINI_API_KEY"));
                assert!(message.contains("aistudio.google.com"));
            }
            other => panic!("expected configuration error, got {other}"),
        }
    }
}
