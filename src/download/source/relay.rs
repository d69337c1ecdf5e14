//! RelayExtractor — extraction API client routed through an optional relay.
//!
//! Sends `{"url": "<instagram url>"}` to the configured endpoint. Depending on
//! the relay kind the request goes:
//! - `allorigins`: to `<base>?url=<endpoint>`; the relay answers
//!   `{"contents": "<upstream body>"}` which is unwrapped here
//! - `prefix`: to `<base><urlencoded endpoint>`; body passed through
//! - `direct`: straight to the endpoint

use crate::core::config::{RelayKind, Settings};
use crate::download::error::FetchError;
use crate::download::source::MediaExtractor;
use async_trait::async_trait;
use reqwest::header::REFERER;
use reqwest::Client;
use serde_json::{json, Value};
use url::Url;

/// Where requests are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relay {
    AllOrigins { base: Url },
    Prefix { base: String },
    Direct,
}

/// Extraction source speaking to the upstream over HTTP.
pub struct RelayExtractor {
    client: Client,
    endpoint: Url,
    relay: Relay,
    referer: Option<String>,
}

impl RelayExtractor {
    /// Build an extractor from explicit parts.
    pub fn new(client: Client, endpoint: Url, relay: Relay, referer: Option<String>) -> Self {
        Self {
            client,
            endpoint,
            relay,
            referer,
        }
    }

    /// Build an extractor from configuration.
    ///
    /// Fails with `FetchError::Unknown` when the endpoint or relay base is not
    /// a usable URL or the HTTP client cannot be constructed.
    pub fn from_settings(settings: &Settings) -> Result<Self, FetchError> {
        let endpoint = Url::parse(settings.upstream.endpoint.trim())
            .map_err(|e| FetchError::Unknown(format!("invalid endpoint '{}': {}", settings.upstream.endpoint, e)))?;

        let relay = match settings.relay.kind {
            RelayKind::AllOrigins => {
                let base = Url::parse(settings.relay.base.trim())
                    .map_err(|e| FetchError::Unknown(format!("invalid relay base '{}': {}", settings.relay.base, e)))?;
                Relay::AllOrigins { base }
            }
            RelayKind::Prefix => Relay::Prefix {
                base: settings.relay.base.trim().to_string(),
            },
            RelayKind::Direct => Relay::Direct,
        };

        let mut builder = Client::builder().user_agent(settings.upstream.user_agent.as_str());
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let referer = settings
            .upstream
            .referer
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(String::from);

        Ok(Self::new(client, endpoint, relay, referer))
    }

    /// URL the request is actually sent to.
    pub fn request_url(&self) -> Result<Url, FetchError> {
        match &self.relay {
            Relay::AllOrigins { base } => {
                let mut url = base.clone();
                url.query_pairs_mut().append_pair("url", self.endpoint.as_str());
                Ok(url)
            }
            Relay::Prefix { base } => {
                let raw = format!("{}{}", base, urlencoding::encode(self.endpoint.as_str()));
                Url::parse(&raw).map_err(|e| FetchError::Unknown(format!("invalid relay url '{}': {}", raw, e)))
            }
            Relay::Direct => Ok(self.endpoint.clone()),
        }
    }

    /// Turn the response body into the upstream payload.
    fn payload_from_body(&self, body: &str) -> Result<Value, FetchError> {
        let payload = match self.relay {
            Relay::AllOrigins { .. } => unwrap_contents(body)?,
            Relay::Prefix { .. } | Relay::Direct => parse_json(body)?,
        };
        check_upstream_error(&payload)?;
        Ok(payload)
    }
}

/// Parse a body that must be JSON.
fn parse_json(body: &str) -> Result<Value, FetchError> {
    if body.trim().is_empty() {
        return Err(FetchError::Service("empty response body".to_string()));
    }
    serde_json::from_str(body).map_err(|e| {
        log::error!(
            "Extraction API returned non-JSON ({}): {}",
            e,
            body.chars().take(300).collect::<String>()
        );
        FetchError::Service(format!("response is not JSON: {}", e))
    })
}

/// Unwrap an allorigins envelope: `{"contents": "<body>", "status": {...}}`.
fn unwrap_contents(body: &str) -> Result<Value, FetchError> {
    let envelope = parse_json(body)?;
    match envelope.get("contents") {
        Some(Value::String(contents)) => parse_json(contents),
        // Some relays already decode JSON bodies
        Some(contents @ Value::Object(_)) => Ok(contents.clone()),
        Some(Value::Null) | None => Err(FetchError::Service("relay returned no contents".to_string())),
        Some(other) => Err(FetchError::Service(format!("unexpected relay contents: {}", other))),
    }
}

/// Detect an upstream-reported error (`{"error": "..."}`).
fn check_upstream_error(payload: &Value) -> Result<(), FetchError> {
    match payload.get("error") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(()),
        Some(Value::String(msg)) if msg.trim().is_empty() => Ok(()),
        Some(Value::String(msg)) => Err(FetchError::Service(msg.clone())),
        Some(_) => Err(FetchError::Service("Instagram returned an error".to_string())),
    }
}

#[async_trait]
impl MediaExtractor for RelayExtractor {
    fn name(&self) -> &str {
        match self.relay {
            Relay::AllOrigins { .. } => "allorigins-relay",
            Relay::Prefix { .. } => "prefix-relay",
            Relay::Direct => "direct",
        }
    }

    async fn extract(&self, url: &Url) -> Result<Value, FetchError> {
        let target = self.request_url()?;
        log::info!("{}: POST {} for {}", self.name(), target, url);

        let mut request = self.client.post(target).json(&json!({ "url": url.as_str() }));
        if let Some(referer) = &self.referer {
            request = request.header(REFERER, referer);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("{}: upstream answered {}", self.name(), status);
            return Err(FetchError::Network(format!("Network response was not ok: {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("failed to read response body: {}", e)))?;
        log::debug!("{}: received {} bytes", self.name(), body.len());

        self.payload_from_body(&body)
    }
}
