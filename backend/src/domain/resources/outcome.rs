//! Classification of upstream bodies.

use serde_json::{Map, Value};

use super::ResourceKind;

/// Guild widget error code for unknown or widget-disabled guilds.
const UNKNOWN_GUILD_CODE: f64 = 50004.0;

/// What an upstream body turned out to be.
///
/// Upstream replies with JSON on success and on failure alike, so the HTTP
/// status is not consulted; the body alone decides.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamOutcome {
    /// A document to project.
    Resource(Map<String, Value>),
    /// A failure upstream documents, answered with 200 and an explanation.
    KnownSoftError(Value),
    /// Anything that is not a JSON object.
    UnexpectedShape(Value),
}

impl UpstreamOutcome {
    /// Classify `raw` for `kind`.
    ///
    /// - guild: an object with `code == 50004` is a soft error.
    /// - user: an object with a truthy `message` is a soft error.
    /// - application: every object is a resource.
    #[must_use]
    pub fn classify(kind: ResourceKind, raw: Value) -> Self {
        let Value::Object(document) = raw else {
            return Self::UnexpectedShape(raw);
        };
        let soft = match kind {
            ResourceKind::Guild => document
                .get("code")
                .and_then(Value::as_f64)
                .is_some_and(|code| code == UNKNOWN_GUILD_CODE),
            ResourceKind::User => document.get("message").is_some_and(is_truthy),
            ResourceKind::Application => false,
        };
        if soft {
            Self::KnownSoftError(Value::Object(document))
        } else {
            Self::Resource(document)
        }
    }
}

/// JavaScript truthiness of a JSON value.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
