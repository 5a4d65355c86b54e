//! Invocation binding: one event in, one response object out.
//!
//! Events and responses use the camelCase shape of serverless function
//! platforms (`httpMethod`, `statusCode`). Unknown event fields are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Instrument, debug, info_span};

use crate::domain::{Binding, GatewayService, Method, ResponseEnvelope, TraceId};

/// Event header consulted for a caller-supplied trace identifier.
const TRACE_ID_HEADER: &str = "trace-id";

/// Incoming invocation event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationEvent {
    /// Request method, matched case-sensitively.
    pub http_method: String,
    /// Request path; the query string is ignored.
    #[serde(default)]
    pub path: String,
    /// Request headers, if the platform forwards them.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl InvocationEvent {
    /// Event for `method` and `path` with no headers.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            http_method: method.into(),
            path: path.into(),
            headers: BTreeMap::new(),
        }
    }

    fn trace_id(&self) -> TraceId {
        let supplied = self
            .headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(TRACE_ID_HEADER))
            .map(|(_, value)| value.as_str());
        TraceId::from_header_or_generate(supplied)
    }
}

/// Invocation response object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON text; empty for `204` answers.
    pub body: String,
}

impl From<ResponseEnvelope> for InvocationResponse {
    fn from(envelope: ResponseEnvelope) -> Self {
        Self {
            status_code: envelope.status(),
            headers: envelope
                .headers()
                .iter()
                .map(|&(name, value)| (name.to_owned(), value.to_owned()))
                .collect(),
            body: envelope.body_text(),
        }
    }
}

/// Failures reading an event or writing a response.
#[derive(Debug, Error)]
pub enum InvocationError {
    /// The event is not valid JSON or lacks `httpMethod`.
    #[error("invalid invocation event: {0}")]
    Event(#[source] serde_json::Error),
    /// The response could not be serialised.
    #[error("failed to encode invocation response: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Answer one event through the gateway.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use lookup_gateway::domain::GatewayService;
/// use lookup_gateway::domain::ports::FixtureUpstreamClient;
/// use lookup_gateway::domain::resources::ResourceTransformers;
/// use lookup_gateway::inbound::invocation::{InvocationEvent, invoke};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let gateway = GatewayService::new(
///     Arc::new(FixtureUpstreamClient::default()),
///     ResourceTransformers::default(),
/// );
/// let response = invoke(&gateway, InvocationEvent::new("OPTIONS", "/v1/user/1")).await;
/// assert_eq!(response.status_code, 204);
/// assert!(response.body.is_empty());
/// # });
/// ```
pub async fn invoke(gateway: &GatewayService, event: InvocationEvent) -> InvocationResponse {
    let trace_id = event.trace_id();
    let method = Method::parse(&event.http_method);
    let span = info_span!("invocation", %trace_id, %method, path = %event.path);
    let envelope = TraceId::scope(
        trace_id,
        gateway
            .handle(&method, &event.path, Binding::Invocation)
            .instrument(span),
    )
    .await;
    debug!(%trace_id, status = envelope.status(), "invocation answered");
    InvocationResponse::from(envelope)
}

/// Decode `raw`, answer it and encode the response.
///
/// # Errors
///
/// [`InvocationError::Event`] when `raw` is not an event;
/// [`InvocationError::Encode`] when the response cannot be serialised.
pub async fn invoke_json(gateway: &GatewayService, raw: &str) -> Result<String, InvocationError> {
    let event: InvocationEvent = serde_json::from_str(raw).map_err(InvocationError::Event)?;
    let response = invoke(gateway, event).await;
    serde_json::to_string(&response).map_err(InvocationError::Encode)
}

#[cfg(test)]
mod tests;
