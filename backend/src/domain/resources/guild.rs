//! Guild widget projection.

use serde::Serialize;
use serde_json::{Map, Value, json};

use super::{NormalizedResource, ResourceKind, ResourceTransformer, TransformError};
use crate::domain::snowflake::Snowflake;

/// Explanation returned when the widget lookup reports an unknown guild.
pub const GUILD_UNAVAILABLE_MESSAGE: &str =
    "The guild is either non-existent, unavailable, or has Server Widget/Discovery disabled.";

/// Public guild summary.
///
/// Each field mirrors the upstream one: absent upstream means omitted here,
/// `null` upstream stays `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GuildSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instant_invite: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_count: Option<Value>,
}

/// Projects widget documents onto [`GuildSummary`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GuildTransformer;

impl ResourceTransformer for GuildTransformer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Guild
    }

    fn soft_failure(&self, _upstream: Value) -> Value {
        json!({ "error": GUILD_UNAVAILABLE_MESSAGE })
    }

    fn project(
        &self,
        _requested: &Snowflake,
        mut document: Map<String, Value>,
    ) -> Result<NormalizedResource, TransformError> {
        Ok(NormalizedResource::Guild(GuildSummary {
            id: document.remove("id"),
            name: document.remove("name"),
            instant_invite: document.remove("instant_invite"),
            presence_count: document.remove("presence_count"),
        }))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn requested() -> Snowflake {
        Snowflake::parse("81384788765712384").expect("valid snowflake")
    }

    fn run(requested: &Snowflake, raw: Value) -> Value {
        GuildTransformer
            .transform(requested, raw)
            .expect("transform succeeds")
            .into_json(ResourceKind::Guild)
            .expect("encodes")
    }

    #[rstest]
    fn projects_exactly_four_fields(requested: Snowflake) {
        let raw = json!({
            "id": "81384788765712384",
            "name": "Discord API",
            "instant_invite": "https://discord.com/invite/abc",
            "presence_count": 12345,
            "channels": [],
            "members": [{ "id": "0" }]
        });

        assert_eq!(
            run(&requested, raw),
            json!({
                "id": "81384788765712384",
                "name": "Discord API",
                "instant_invite": "https://discord.com/invite/abc",
                "presence_count": 12345
            })
        );
    }

    #[rstest]
    fn keeps_nulls_and_omits_absent_fields(requested: Snowflake) {
        let raw = json!({ "id": "1", "name": "Quiet", "instant_invite": null });
        assert_eq!(
            run(&requested, raw),
            json!({ "id": "1", "name": "Quiet", "instant_invite": null })
        );
    }

    #[rstest]
    fn unknown_guild_yields_explanation(requested: Snowflake) {
        let raw = json!({ "message": "Unknown Guild", "code": 50004 });
        assert_eq!(
            run(&requested, raw),
            json!({ "error": GUILD_UNAVAILABLE_MESSAGE })
        );
    }

    #[rstest]
    fn other_error_payloads_project_to_empty_summary(requested: Snowflake) {
        let raw = json!({ "message": "Missing Access", "code": 50001 });
        assert_eq!(run(&requested, raw), json!({}));
    }
}
