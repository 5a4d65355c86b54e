//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the three lookup routes and the health probes along
//! with the schema wrappers from [`crate::inbound::http::schemas`]. The
//! document is served by Swagger UI in debug builds and printed by
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{
    ApplicationDocumentSchema, ApplicationFlagsSchema, BannerRefSchema, GuildSummarySchema,
    ImageRefSchema, MessageSchema, UserProfileSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the listener binding.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lookup gateway API",
        description = "Read-only lookups of public Discord guild, application and user data."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::lookup::get_guild,
        crate::inbound::http::lookup::get_application,
        crate::inbound::http::lookup::get_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        MessageSchema,
        GuildSummarySchema,
        ApplicationFlagsSchema,
        ApplicationDocumentSchema,
        ImageRefSchema,
        BannerRefSchema,
        UserProfileSchema
    )),
    tags(
        (name = "lookup", description = "Normalised upstream resources"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
