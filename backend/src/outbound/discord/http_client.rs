//! Reqwest-backed Discord REST client.
//!
//! This adapter owns transport details only: URL construction, headers,
//! timeout mapping and JSON decoding. Error statuses are not failures here;
//! upstream error payloads are returned as documents for the domain to
//! classify.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::token::BotToken;
use crate::domain::ports::{
    UpstreamClient, UpstreamClientError, UpstreamDocument, UpstreamRequest,
};

/// Default REST API base.
pub const DEFAULT_API_BASE: &str = "https://canary.discord.com/api/v10";
const DEFAULT_USER_AGENT: &str = concat!("lookup-gateway/", env!("CARGO_PKG_VERSION"));

/// Upstream client performing one `GET` per lookup against a configurable base.
#[derive(Debug, Clone)]
pub struct DiscordHttpClient {
    client: Client,
    base: Url,
    token: Option<BotToken>,
}

impl DiscordHttpClient {
    /// Build a client with an explicit request timeout.
    ///
    /// `token` is attached to user lookups only; without one those requests
    /// go out unauthenticated and upstream answers with an error payload.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base: Url,
        timeout: Duration,
        token: Option<BotToken>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base,
            token,
        })
    }

    /// API base this client talks to.
    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, request: &UpstreamRequest) -> Result<Url, UpstreamClientError> {
        let base = self.base.as_str().trim_end_matches('/');
        let raw = format!("{base}/{}", request.path());
        Url::parse(&raw).map_err(|error| {
            UpstreamClientError::invalid_request(format!("cannot build URL {raw:?}: {error}"))
        })
    }

    fn authorization(
        &self,
        request: &UpstreamRequest,
    ) -> Result<Option<HeaderValue>, UpstreamClientError> {
        let Some(token) = self.token.as_ref().filter(|_| request.requires_credential()) else {
            return Ok(None);
        };
        let mut value = HeaderValue::from_str(token.authorization().as_str()).map_err(|_| {
            UpstreamClientError::invalid_request("bot token is not a valid header value")
        })?;
        value.set_sensitive(true);
        Ok(Some(value))
    }
}

#[async_trait]
impl UpstreamClient for DiscordHttpClient {
    async fn fetch(
        &self,
        request: &UpstreamRequest,
    ) -> Result<UpstreamDocument, UpstreamClientError> {
        let url = self.endpoint(request)?;
        let mut builder = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(value) = self.authorization(request)? {
            builder = builder.header(AUTHORIZATION, value);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(
            kind = %request.kind,
            status = status.as_u16(),
            bytes = body.len(),
            "upstream responded"
        );

        Ok(UpstreamDocument {
            status: status.as_u16(),
            body: decode_body(status, body.as_ref())?,
        })
    }
}

fn decode_body(status: StatusCode, body: &[u8]) -> Result<serde_json::Value, UpstreamClientError> {
    serde_json::from_slice(body).map_err(|error| {
        let preview = body_preview(body);
        UpstreamClientError::decode(if preview.is_empty() {
            format!("status {}: {error}", status.as_u16())
        } else {
            format!("status {}: {error}; body: {preview}", status.as_u16())
        })
    })
}

fn map_transport_error(error: reqwest::Error) -> UpstreamClientError {
    // Identifiers are logged by the caller; keep URLs out of error text.
    let error = error.without_url();
    if error.is_timeout() {
        UpstreamClientError::timeout(error.to_string())
    } else if error.is_builder() {
        UpstreamClientError::invalid_request(error.to_string())
    } else {
        UpstreamClientError::transport(error.to_string())
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let mut preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        preview.push_str("...");
    }
    preview
}
