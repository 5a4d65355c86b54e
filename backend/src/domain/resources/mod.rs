//! Resource transformers.
//!
//! Each resource kind turns one upstream document into the stable output
//! contract. Upstream bodies are first classified into an
//! [`UpstreamOutcome`]; only [`UpstreamOutcome::Resource`] reaches a
//! projection.

mod application;
mod guild;
mod outcome;
mod user;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::flags::FlagTables;
use super::snowflake::{Snowflake, SnowflakeError};

pub use application::{ApplicationDocument, ApplicationTransformer};
pub use guild::{GUILD_UNAVAILABLE_MESSAGE, GuildSummary, GuildTransformer};
pub use outcome::{UpstreamOutcome, is_truthy};
pub use user::{BannerRef, ImageRef, UserProfile, UserTransformer};

/// Default content delivery origin for avatars, banners and icons.
pub const DEFAULT_CDN_BASE: &str = "https://cdn.discordapp.com";

/// The three resource kinds exposed under `/v1/<kind>/<id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Guild widget summary.
    Guild,
    /// Application RPC metadata.
    Application,
    /// User profile.
    User,
}

impl ResourceKind {
    /// Path segment naming this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Guild => "guild",
            Self::Application => "application",
            Self::User => "user",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a path segment names no known resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resource kind: {0}")]
pub struct UnknownResourceKind(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownResourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guild" => Ok(Self::Guild),
            "application" => Ok(Self::Application),
            "user" => Ok(Self::User),
            other => Err(UnknownResourceKind(other.to_owned())),
        }
    }
}

/// CDN origin used to build image links. Stored without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdnBase(String);

impl CdnBase {
    /// Wrap an origin such as `https://cdn.discordapp.com`.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self(base.trim_end_matches('/').to_owned())
    }

    /// Origin without trailing slash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// `<base>/avatars/<owner>/<hash>`.
    ///
    /// Application icons deliberately reuse this template.
    #[must_use]
    pub fn avatar(&self, owner: &str, hash: &str) -> String {
        format!("{}/avatars/{owner}/{hash}", self.0)
    }

    /// `<base>/banners/<owner>/<hash>?size=480`.
    #[must_use]
    pub fn banner(&self, owner: &str, hash: &str) -> String {
        format!("{}/banners/{owner}/{hash}?size=480", self.0)
    }
}

impl Default for CdnBase {
    fn default() -> Self {
        Self::new(DEFAULT_CDN_BASE)
    }
}

/// Reasons a fetched document could not be transformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The upstream body was not a JSON object.
    #[error("{kind} response was a JSON {found}, expected an object")]
    UnexpectedShape {
        /// Resource being transformed.
        kind: ResourceKind,
        /// JSON type actually received.
        found: &'static str,
    },
    /// The document has no usable `id` field.
    #[error("{kind} document has no usable id (found {found})")]
    MissingIdentifier {
        /// Resource being transformed.
        kind: ResourceKind,
        /// JSON type of the `id` field, or `absent`.
        found: &'static str,
    },
    /// The document `id` does not decode to a timestamp.
    #[error(transparent)]
    Identifier(#[from] SnowflakeError),
    /// An image hash field holds something other than a string.
    #[error("{kind} field {field} must be a string or null, found {found}")]
    InvalidImageHash {
        /// Resource being transformed.
        kind: ResourceKind,
        /// Offending field.
        field: &'static str,
        /// JSON type actually received.
        found: &'static str,
    },
    /// The normalised document could not be encoded.
    #[error("failed to encode {kind} response: {message}")]
    Encode {
        /// Resource being transformed.
        kind: ResourceKind,
        /// Encoder message.
        message: String,
    },
}

impl TransformError {
    /// Build [`TransformError::UnexpectedShape`] from the offending body.
    #[must_use]
    pub fn unexpected_shape(kind: ResourceKind, body: &Value) -> Self {
        Self::UnexpectedShape {
            kind,
            found: json_type_name(body),
        }
    }
}

/// Output document for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedResource {
    /// Projected guild widget.
    Guild(GuildSummary),
    /// Application document with icon and flags rewritten.
    Application(ApplicationDocument),
    /// Projected user profile.
    User(Box<UserProfile>),
    /// Upstream reported a known failure; sent with status 200.
    SoftFailure(Value),
}

impl NormalizedResource {
    /// Encode as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Encode`] if serialisation fails.
    pub fn into_json(self, kind: ResourceKind) -> Result<Value, TransformError> {
        serde_json::to_value(self).map_err(|error| TransformError::Encode {
            kind,
            message: error.to_string(),
        })
    }
}

/// One resource kind's transformation.
pub trait ResourceTransformer: Send + Sync {
    /// Kind handled by this transformer.
    fn kind(&self) -> ResourceKind;

    /// Body returned for [`UpstreamOutcome::KnownSoftError`].
    fn soft_failure(&self, upstream: Value) -> Value;

    /// Project a well-formed upstream document.
    ///
    /// # Errors
    ///
    /// Returns a [`TransformError`] when a required field is unusable.
    fn project(
        &self,
        requested: &Snowflake,
        document: Map<String, Value>,
    ) -> Result<NormalizedResource, TransformError>;

    /// Classify `raw` and produce the output document.
    ///
    /// # Errors
    ///
    /// Fails for [`UpstreamOutcome::UnexpectedShape`] and whenever
    /// [`ResourceTransformer::project`] fails.
    fn transform(
        &self,
        requested: &Snowflake,
        raw: Value,
    ) -> Result<NormalizedResource, TransformError> {
        match UpstreamOutcome::classify(self.kind(), raw) {
            UpstreamOutcome::Resource(document) => self.project(requested, document),
            UpstreamOutcome::KnownSoftError(body) => {
                Ok(NormalizedResource::SoftFailure(self.soft_failure(body)))
            }
            UpstreamOutcome::UnexpectedShape(body) => {
                Err(TransformError::unexpected_shape(self.kind(), &body))
            }
        }
    }
}

/// All three transformers, configured once at start-up.
#[derive(Debug, Clone)]
pub struct ResourceTransformers {
    guild: GuildTransformer,
    application: ApplicationTransformer,
    user: UserTransformer,
}

impl ResourceTransformers {
    /// Build the transformers from shared flag tables and CDN origin.
    #[must_use]
    pub fn new(flags: FlagTables, cdn: CdnBase) -> Self {
        Self {
            guild: GuildTransformer,
            application: ApplicationTransformer::new(flags.application, cdn.clone()),
            user: UserTransformer::new(flags.user, cdn),
        }
    }

    /// Transformer responsible for `kind`.
    #[must_use]
    pub fn for_kind(&self, kind: ResourceKind) -> &dyn ResourceTransformer {
        match kind {
            ResourceKind::Guild => &self.guild,
            ResourceKind::Application => &self.application,
            ResourceKind::User => &self.user,
        }
    }
}

impl Default for ResourceTransformers {
    fn default() -> Self {
        Self::new(FlagTables::default(), CdnBase::default())
    }
}

/// JSON type name used in error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Identifier text for a string or numeric JSON value.
pub(crate) fn identifier_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("guild", ResourceKind::Guild)]
    #[case("application", ResourceKind::Application)]
    #[case("user", ResourceKind::User)]
    fn kinds_round_trip_through_path_segments(#[case] segment: &str, #[case] kind: ResourceKind) {
        assert_eq!(segment.parse::<ResourceKind>(), Ok(kind));
        assert_eq!(kind.as_str(), segment);
    }

    #[rstest]
    #[case("Guild")]
    #[case("users")]
    #[case("")]
    fn unknown_segments_are_rejected(#[case] segment: &str) {
        assert!(segment.parse::<ResourceKind>().is_err());
    }

    #[test]
    fn cdn_base_drops_trailing_slash() {
        let cdn = CdnBase::new("https://cdn.example.test/");
        assert_eq!(
            cdn.avatar("1", "abc"),
            "https://cdn.example.test/avatars/1/abc"
        );
        assert_eq!(
            cdn.banner("1", "abc"),
            "https://cdn.example.test/banners/1/abc?size=480"
        );
    }

    #[test]
    fn for_kind_dispatches_to_matching_transformer() {
        let transformers = ResourceTransformers::default();
        for kind in [
            ResourceKind::Guild,
            ResourceKind::Application,
            ResourceKind::User,
        ] {
            assert_eq!(transformers.for_kind(kind).kind(), kind);
        }
    }

    #[test]
    fn non_object_bodies_are_unexpected_for_every_kind() {
        let transformers = ResourceTransformers::default();
        let requested = Snowflake::parse("1").expect("valid snowflake");
        for kind in [
            ResourceKind::Guild,
            ResourceKind::Application,
            ResourceKind::User,
        ] {
            let error = transformers
                .for_kind(kind)
                .transform(&requested, json!("oops"))
                .expect_err("strings are not documents");
            assert_eq!(
                error,
                TransformError::UnexpectedShape {
                    kind,
                    found: "string"
                }
            );
        }
    }

    #[rstest]
    #[case(json!("123"), Some("123"))]
    #[case(json!(123), Some("123"))]
    #[case(json!(null), None)]
    #[case(json!({}), None)]
    fn identifier_text_accepts_strings_and_numbers(
        #[case] value: Value,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(identifier_text(&value).as_deref(), expected);
    }
}
