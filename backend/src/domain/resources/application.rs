//! Application RPC document rewrite.
//!
//! Everything passes through except `icon`, which becomes a CDN link, and
//! `flags`, which becomes `{ bits, detailed }`.

use serde::Serialize;
use serde_json::{Map, Value, json};

use super::{
    CdnBase, NormalizedResource, ResourceKind, ResourceTransformer, TransformError,
    identifier_text, is_truthy,
};
use crate::domain::flags::FlagDecoder;
use crate::domain::snowflake::Snowflake;

/// Upstream application document with rewritten fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ApplicationDocument(pub Map<String, Value>);

/// Rewrites application documents.
#[derive(Debug, Clone)]
pub struct ApplicationTransformer {
    flags: FlagDecoder,
    cdn: CdnBase,
}

impl ApplicationTransformer {
    /// Build a transformer over the application flag table.
    #[must_use]
    pub fn new(flags: FlagDecoder, cdn: CdnBase) -> Self {
        Self { flags, cdn }
    }

    fn icon_link(&self, owner: &str, icon: &Value) -> Option<String> {
        is_truthy(icon).then(|| self.cdn.avatar(owner, &coerce_to_text(icon)))
    }
}

/// Text form of a JSON value under JavaScript string coercion.
fn coerce_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => match number.as_f64() {
            Some(whole) if number.is_f64() && whole.fract() == 0.0 && whole.abs() < 1e21 => {
                format!("{whole:.0}")
            }
            _ => number.to_string(),
        },
        Value::Array(items) => items
            .iter()
            .map(coerce_to_text)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}

impl ResourceTransformer for ApplicationTransformer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Application
    }

    fn soft_failure(&self, upstream: Value) -> Value {
        upstream
    }

    fn project(
        &self,
        requested: &Snowflake,
        mut document: Map<String, Value>,
    ) -> Result<NormalizedResource, TransformError> {
        let owner = document
            .get("id")
            .and_then(identifier_text)
            .unwrap_or_else(|| requested.as_str().to_owned());

        if let Some(icon) = document.get("icon") {
            if let Some(link) = self.icon_link(&owner, icon) {
                document.insert("icon".to_owned(), Value::String(link));
            }
        }

        let bits = document.remove("flags");
        let detailed = self.flags.decode_json(bits.as_ref());
        let flags = match bits {
            Some(bits) => json!({ "bits": bits, "detailed": detailed }),
            None => json!({ "detailed": detailed }),
        };
        document.insert("flags".to_owned(), flags);

        Ok(NormalizedResource::Application(ApplicationDocument(
            document,
        )))
    }
}
