//! OpenAPI schema definitions for gateway documents.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their serialised shape for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for every `{ "message": ... }` answer.
#[derive(ToSchema)]
#[schema(as = crate::domain::GatewayError)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MessageSchema {
    /// Human-readable message.
    #[schema(example = "Value is not a valid Discord snowflake")]
    message: String,
}

/// OpenAPI schema for [`crate::domain::resources::GuildSummary`].
///
/// When the guild widget is disabled the body is
/// `{ "error": "..." }` instead.
#[derive(ToSchema)]
#[schema(as = crate::domain::resources::GuildSummary)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct GuildSummarySchema {
    #[schema(example = "81384788765712384")]
    id: Option<String>,
    #[schema(example = "Discord API")]
    name: Option<String>,
    #[schema(example = "https://discord.com/invite/discord-api")]
    instant_invite: Option<String>,
    #[schema(example = 12345)]
    presence_count: Option<u64>,
}

/// OpenAPI schema for decoded application flags.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ApplicationFlagsSchema {
    /// Raw upstream bitmask, absent when upstream sent none.
    #[schema(example = 8_667_136)]
    bits: Option<u64>,
    /// Labels of the set bits in table order.
    #[schema(example = json!(["GATEWAY_PRESENCE_LIMITED", "VERIFIED"]))]
    detailed: Vec<String>,
}

/// OpenAPI schema for [`crate::domain::resources::ApplicationDocument`].
///
/// Every other upstream field passes through unchanged.
#[derive(ToSchema)]
#[schema(as = crate::domain::resources::ApplicationDocument)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ApplicationDocumentSchema {
    #[schema(example = "159799960412356608")]
    id: String,
    /// Avatar CDN link when upstream sent an icon hash.
    #[schema(
        example = "https://cdn.discordapp.com/avatars/159799960412356608/5b3ac5a5d7b4e3ae4f4cde48b6e4ab8e"
    )]
    icon: Option<String>,
    flags: ApplicationFlagsSchema,
}

/// OpenAPI schema for [`crate::domain::resources::ImageRef`].
#[derive(ToSchema)]
#[schema(as = crate::domain::resources::ImageRef)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ImageRefSchema {
    /// Upstream hash.
    id: Option<String>,
    /// CDN link, `null` without a hash.
    link: Option<String>,
    is_animated: bool,
}

/// OpenAPI schema for [`crate::domain::resources::BannerRef`].
#[derive(ToSchema)]
#[schema(as = crate::domain::resources::BannerRef)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BannerRefSchema {
    id: Option<String>,
    link: Option<String>,
    is_animated: bool,
    /// Banner colour as an integer.
    color: Option<u32>,
}

/// OpenAPI schema for [`crate::domain::resources::UserProfile`].
#[derive(ToSchema)]
#[schema(as = crate::domain::resources::UserProfile)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserProfileSchema {
    #[schema(example = "175928847299117063")]
    id: String,
    /// Creation time derived from the identifier.
    #[schema(example = "2016-04-30T11:18:25.796Z")]
    created_at: String,
    username: Option<String>,
    global_name: Option<String>,
    accent_color: Option<u32>,
    #[schema(value_type = Option<Object>)]
    avatar_decoration: Option<serde_json::Value>,
    avatar: ImageRefSchema,
    banner: BannerRefSchema,
    /// Public flag labels.
    #[schema(example = json!(["HYPESQUAD_ONLINE_HOUSE_1"]))]
    badges: Vec<String>,
    #[schema(example = "Nitro")]
    premium_type: Option<String>,
    /// Untouched upstream document.
    #[schema(value_type = Object)]
    raw: serde_json::Value,
}
