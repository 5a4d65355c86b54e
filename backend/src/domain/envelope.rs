//! Binding-neutral response shape.

use serde_json::{Value, json};

use super::error::GatewayError;
use super::router::Binding;

/// Status, optional JSON body and headers for one response.
///
/// ## Invariants
/// - every envelope carries the CORS headers for its binding.
/// - a preflight envelope has status 204 and no body.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    status: u16,
    body: Option<Value>,
    headers: Vec<(&'static str, &'static str)>,
}

impl ResponseEnvelope {
    /// JSON response with the binding's full header set.
    #[must_use]
    pub fn json(binding: Binding, status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
            headers: headers(binding, true),
        }
    }

    /// 204 answer to a CORS preflight.
    ///
    /// The listener omits `Content-Type` here; the invocation binding always
    /// sends its full header set.
    #[must_use]
    pub fn preflight(binding: Binding) -> Self {
        let content_type = matches!(binding, Binding::Invocation);
        Self {
            status: 204,
            body: None,
            headers: headers(binding, content_type),
        }
    }

    /// `{ "message": "root page" }`.
    #[must_use]
    pub fn root(binding: Binding) -> Self {
        Self::json(binding, 200, json!({ "message": "root page" }))
    }

    /// Envelope for a [`GatewayError`]; only the public message is exposed.
    #[must_use]
    pub fn from_error(binding: Binding, error: &GatewayError) -> Self {
        Self::json(binding, error.status(), error.to_body())
    }

    /// HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// JSON body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Response headers in emission order.
    #[must_use]
    pub fn headers(&self) -> &[(&'static str, &'static str)] {
        &self.headers
    }

    /// Value of header `name`, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&'static str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }

    /// Body serialised as text; empty when there is no body.
    #[must_use]
    pub fn body_text(&self) -> String {
        self.body.as_ref().map(Value::to_string).unwrap_or_default()
    }
}

/// Methods advertised by the listener.
pub const LISTENER_ALLOWED_METHODS: &str = "GET,PUT,POST,DELETE";
/// Methods advertised by the invocation binding.
pub const INVOCATION_ALLOWED_METHODS: &str = "GET,PUT,POST,DELETE,OPTIONS";

fn headers(binding: Binding, content_type: bool) -> Vec<(&'static str, &'static str)> {
    let allowed_methods = match binding {
        Binding::Listener => LISTENER_ALLOWED_METHODS,
        Binding::Invocation => INVOCATION_ALLOWED_METHODS,
    };
    let mut headers = Vec::with_capacity(4);
    if content_type {
        headers.push(("Content-Type", "application/json"));
    }
    headers.extend([
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Methods", allowed_methods),
        ("Access-Control-Allow-Headers", "Content-Type"),
    ]);
    headers
}
