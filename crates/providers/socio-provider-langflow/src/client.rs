//! Langflow run API client

use crate::config::LangflowConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use socio_core::{FlowClient, Result, SocioError};
use tracing::{debug, error, info};

/// JSON pointer to the assistant text in a run response
const REPLY_TEXT_POINTER: &str = "/outputs/0/outputs/0/outputs/message/message/text";

/// Upstream bodies longer than this are cut in logs
const LOG_BODY_LIMIT: usize = 500;

#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    input_value: &'a str,
    output_type: &'static str,
    input_type: &'static str,
    tweaks: &'a Map<String, Value>,
}

/// Client for a single hosted Langflow flow
pub struct LangflowClient {
    client: Client,
    config: LangflowConfig,
}

impl LangflowClient {
    /// Create a client from a validated config
    pub fn new(config: LangflowConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .pool_idle_timeout(std::time::Duration::from_secs(300))
            .tcp_keepalive(std::time::Duration::from_secs(60));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Create a client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(LangflowConfig::from_env()?)
    }

    /// Active configuration
    pub fn config(&self) -> &LangflowConfig {
        &self.config
    }

    /// Run the flow once and return the raw response document
    pub async fn run_raw(&self, input: &str) -> Result<Value> {
        let url = self.config.run_url();
        let request = RunRequest {
            input_value: input,
            output_type: "chat",
            input_type: "chat",
            tweaks: &self.config.tweaks,
        };
        debug!("Sending Langflow request to {} ({} chars)", url, input.len());

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.config.application_token)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        debug!("Langflow response status: {}", status);

        if !status.is_success() {
            error!(
                "Langflow API error {}: {}",
                status,
                truncate(&body, LOG_BODY_LIMIT)
            );
            return Err(SocioError::upstream_status(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(
                "Invalid JSON from Langflow API: {} ({})",
                e,
                truncate(&body, LOG_BODY_LIMIT)
            );
            SocioError::upstream(format!("Invalid JSON response from Langflow API: {}", e))
        })
    }
}

#[async_trait]
impl FlowClient for LangflowClient {
    fn name(&self) -> &str {
        "langflow"
    }

    async fn run(&self, input: &str) -> Result<String> {
        let data = self.run_raw(input).await?;
        let text = reply_text(&data).ok_or_else(|| {
            error!("Unexpected Langflow response structure");
            SocioError::upstream("Invalid Langflow API response structure")
        })?;
        info!("Langflow reply received ({} chars)", text.len());
        Ok(text.to_string())
    }
}

/// Assistant text of a run response. Missing or empty text is `None`.
pub fn reply_text(data: &Value) -> Option<&str> {
    data.pointer(REPLY_TEXT_POINTER)
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(text: Value) -> Value {
        json!({
            "session_id": "abc",
            "outputs": [{
                "inputs": { "input_value": "hi" },
                "outputs": [{
                    "outputs": { "message": { "message": { "text": text } } }
                }]
            }]
        })
    }

    #[test]
    fn test_reply_text_found() {
        assert_eq!(reply_text(&response(json!("hello"))), Some("hello"));
    }

    #[test]
    fn test_reply_text_missing_or_empty() {
        assert_eq!(reply_text(&json!({ "outputs": [] })), None);
        assert_eq!(reply_text(&json!({})), None);
        assert_eq!(reply_text(&response(json!(""))), None);
        assert_eq!(reply_text(&response(json!(42))), None);
    }

    #[test]
    fn test_request_body_shape() {
        let tweaks = crate::config::default_tweaks();
        let body = serde_json::to_value(RunRequest {
            input_value: "Compare reels and photos",
            output_type: "chat",
            input_type: "chat",
            tweaks: &tweaks,
        })
        .unwrap();
        assert_eq!(body["input_value"], "Compare reels and photos");
        assert_eq!(body["output_type"], "chat");
        assert_eq!(body["input_type"], "chat");
        assert_eq!(body["tweaks"]["ChatOutput-ctttH"], json!({}));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
        assert_eq!(truncate("ééé", 2), "éé");
    }

    #[test]
    fn test_new_rejects_empty_token() {
        assert!(LangflowClient::new(LangflowConfig::new("")).is_err());
        let client = LangflowClient::new(LangflowConfig::new("token")).unwrap();
        assert_eq!(client.name(), "langflow");
    }
}
