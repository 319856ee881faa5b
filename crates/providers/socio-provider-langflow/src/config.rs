//! Configuration for the Langflow provider

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use socio_core::{get_env_or, get_required_env, Result, SocioError};
use std::time::Duration;

/// Hosted Langflow API base URL
pub const DEFAULT_API_URL: &str = "https://api.langflow.astra.datastax.com";

/// Flow that answers social media analytics questions
pub const DEFAULT_FLOW_ID: &str = "7e084384-03af-44c8-926d-b906e0c278f9";

/// Named endpoint of the flow
pub const DEFAULT_ENDPOINT: &str = "socioai";

/// Flow components sent with an empty tweak object on every run
pub const DEFAULT_TWEAK_COMPONENTS: [&str; 5] = [
    "Prompt-wXuZu",
    "Agent-lgaEv",
    "AstraDBToolComponent-E8wqU",
    "ChatInput-UBrdS",
    "ChatOutput-ctttH",
];

/// Langflow provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LangflowConfig {
    /// API base URL
    pub api_url: String,

    /// Flow id (path segment after `/lf/`)
    pub flow_id: String,

    /// Named run endpoint
    pub endpoint: String,

    /// Application token sent as a bearer token
    #[serde(skip_serializing)]
    pub application_token: String,

    /// Per-component tweak map
    pub tweaks: Map<String, Value>,

    /// Request timeout; `None` leaves the HTTP client default in place
    pub timeout: Option<Duration>,
}

impl LangflowConfig {
    /// Config for the hosted flow with the given token
    pub fn new(application_token: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            flow_id: DEFAULT_FLOW_ID.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            application_token: application_token.into(),
            tweaks: default_tweaks(),
            timeout: None,
        }
    }

    /// Load from environment variables
    ///
    /// `APPLICATION_TOKEN` is required. `LANGFLOW_API_URL`, `LANGFLOW_ID`,
    /// `LANGFLOW_ENDPOINT` and `LANGFLOW_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new(get_required_env("APPLICATION_TOKEN")?);
        config.api_url = get_env_or("LANGFLOW_API_URL", DEFAULT_API_URL);
        config.flow_id = get_env_or("LANGFLOW_ID", DEFAULT_FLOW_ID);
        config.endpoint = get_env_or("LANGFLOW_ENDPOINT", DEFAULT_ENDPOINT);

        if let Ok(secs) = std::env::var("LANGFLOW_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                SocioError::config(format!("LANGFLOW_TIMEOUT_SECS must be an integer, got '{}'", secs))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Point the provider at another base URL
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set a request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full run URL, always non-streaming
    pub fn run_url(&self) -> String {
        format!(
            "{}/lf/{}/api/v1/run/{}?stream=false",
            self.api_url.trim_end_matches('/'),
            self.flow_id,
            self.endpoint
        )
    }

    /// Check required fields
    pub fn validate(&self) -> Result<()> {
        if self.application_token.trim().is_empty() {
            return Err(SocioError::config("Langflow application token is empty"));
        }
        if self.api_url.trim().is_empty() {
            return Err(SocioError::config("Langflow API URL is empty"));
        }
        if self.flow_id.trim().is_empty() || self.endpoint.trim().is_empty() {
            return Err(SocioError::config("Langflow flow id and endpoint must be set"));
        }
        Ok(())
    }
}

/// Tweak map with an empty object per default component
pub fn default_tweaks() -> Map<String, Value> {
    DEFAULT_TWEAK_COMPONENTS
        .iter()
        .map(|c| (c.to_string(), Value::Object(Map::new())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_url() {
        let config = LangflowConfig::new("t").with_api_url("http://127.0.0.1:7860/");
        assert_eq!(
            config.run_url(),
            "http://127.0.0.1:7860/lf/7e084384-03af-44c8-926d-b906e0c278f9/api/v1/run/socioai?stream=false"
        );
    }

    #[test]
    fn test_default_tweaks() {
        let tweaks = default_tweaks();
        assert_eq!(tweaks.len(), 5);
        assert_eq!(tweaks["Agent-lgaEv"], serde_json::json!({}));
    }

    #[test]
    fn test_validate() {
        assert!(LangflowConfig::new("token").validate().is_ok());
        assert!(LangflowConfig::new("  ").validate().is_err());
    }

    #[test]
    fn test_token_not_serialized() {
        let json = serde_json::to_value(LangflowConfig::new("secret-token")).unwrap();
        assert!(json.get("application_token").is_none());
    }
}
