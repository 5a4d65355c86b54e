//! User profile projection.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{
    CdnBase, NormalizedResource, ResourceKind, ResourceTransformer, TransformError,
    identifier_text, json_type_name,
};
use crate::domain::flags::FlagDecoder;
use crate::domain::snowflake::Snowflake;

const ANIMATED_PREFIX: &str = "a_";

/// Avatar reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRef {
    /// Upstream hash, omitted when absent upstream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// CDN link, `null` when there is no hash.
    pub link: Option<String>,
    /// Whether the hash denotes an animated image.
    pub is_animated: bool,
}

/// Banner reference; an [`ImageRef`] plus the profile colour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BannerRef {
    #[serde(flatten)]
    pub image: ImageRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Value>,
}

/// Normalised user profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub id: Value,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_decoration: Option<Value>,
    pub avatar: ImageRef,
    pub banner: BannerRef,
    pub badges: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_type: Option<&'static str>,
    /// Untouched upstream document.
    pub raw: Value,
}

/// Projects user documents onto [`UserProfile`].
#[derive(Debug, Clone)]
pub struct UserTransformer {
    flags: FlagDecoder,
    cdn: CdnBase,
}

impl UserTransformer {
    /// Build a transformer over the user flag table.
    #[must_use]
    pub fn new(flags: FlagDecoder, cdn: CdnBase) -> Self {
        Self { flags, cdn }
    }

    fn image(
        document: &Map<String, Value>,
        field: &'static str,
        link: impl FnOnce(&str) -> String,
    ) -> Result<ImageRef, TransformError> {
        let value = document.get(field);
        let hash = match value {
            None | Some(Value::Null) => None,
            Some(Value::String(hash)) => Some(hash.as_str()),
            Some(other) => {
                return Err(TransformError::InvalidImageHash {
                    kind: ResourceKind::User,
                    field,
                    found: json_type_name(other),
                });
            }
        };
        Ok(ImageRef {
            id: value.cloned(),
            link: hash.filter(|hash| !hash.is_empty()).map(link),
            is_animated: hash.is_some_and(|hash| hash.starts_with(ANIMATED_PREFIX)),
        })
    }
}

impl ResourceTransformer for UserTransformer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::User
    }

    fn soft_failure(&self, upstream: Value) -> Value {
        upstream
    }

    fn project(
        &self,
        _requested: &Snowflake,
        document: Map<String, Value>,
    ) -> Result<NormalizedResource, TransformError> {
        let id = match document.get("id") {
            Some(id) => id.clone(),
            None => {
                return Err(TransformError::MissingIdentifier {
                    kind: ResourceKind::User,
                    found: "absent",
                });
            }
        };
        let owner = identifier_text(&id).ok_or_else(|| TransformError::MissingIdentifier {
            kind: ResourceKind::User,
            found: json_type_name(&id),
        })?;
        let created_at = Snowflake::parse(owner.as_str())?.to_iso8601()?;

        let avatar = Self::image(&document, "avatar", |hash| self.cdn.avatar(&owner, hash))?;
        let banner = BannerRef {
            image: Self::image(&document, "banner", |hash| self.cdn.banner(&owner, hash))?,
            color: document.get("banner_color").cloned(),
        };

        let profile = UserProfile {
            id,
            created_at,
            username: document.get("username").cloned(),
            global_name: document.get("global_name").cloned(),
            accent_color: document.get("accent_color").cloned(),
            avatar_decoration: document.get("avatar_decoration_data").cloned(),
            avatar,
            banner,
            badges: self.flags.decode_json(document.get("public_flags")),
            premium_type: document.get("premium_type").and_then(premium_label),
            raw: Value::Object(document),
        };
        Ok(NormalizedResource::User(Box::new(profile)))
    }
}

/// Subscription tier label; unknown values have none.
fn premium_label(value: &Value) -> Option<&'static str> {
    const TIERS: [&str; 4] = ["None", "Nitro Classic", "Nitro", "Nitro Basic"];

    let tier = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) if matches!(text.as_str(), "0" | "1" | "2" | "3") => {
            text.parse().ok()?
        }
        _ => return None,
    };
    (tier.fract() == 0.0 && (0.0..=3.0).contains(&tier)).then(|| TIERS[tier as usize])
}
