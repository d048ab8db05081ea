//! HTTP transport
//!
//! [`Transport`] implementation on top of `reqwest`. Paths are joined to the
//! configured base URL and responses are handed back as raw JSON.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use erp_core::config::ClientConfig;
use erp_core::{ErpError, ErpResult, Method, Transport};

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> ErpResult<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(reqwest::header::ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ErpError::Config(format!("invalid header name '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ErpError::Config(format!("invalid value for header {}: {}", name, e)))?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| ErpError::Config(format!("failed to build HTTP client: {}", e)))?;

        tracing::debug!(
            base_url = %config.base_url,
            timeout_seconds = config.timeout_seconds,
            "HTTP transport initialized"
        );
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Patch => self.client.patch(url),
            Method::Delete => self.client.delete(url),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> ErpResult<Value> {
        let url = self.config.url_for(path);
        tracing::debug!(method = %method, url = %url, "Sending request");

        let mut request = self.request(method, &url);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| ErpError::Transport(format!("{} {} failed: {}", method, url, e)))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ErpError::Transport(format!("failed to read response body: {}", e)))?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ErpError::NotFound {
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            let message = error_message(&text, status);
            tracing::warn!(
                method = %method,
                url = %url,
                status = status.as_u16(),
                message = %message,
                "Request failed"
            );
            return Err(ErpError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ErpError::Decode(format!("{} {}: {}", method, url, e)))
    }
}

/// Pull a readable message out of an error response body
fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = value.get(key).and_then(Value::as_str) {
                return message.to_string();
            }
        }
    }
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}
