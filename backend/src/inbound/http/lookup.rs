//! Listener binding for the lookup routes.
//!
//! ```text
//! GET     /v1/guild/{id}
//! GET     /v1/application/{id}
//! GET     /v1/user/{id}
//! GET     /
//! OPTIONS *
//! ```
//!
//! Every request, matched or not, is answered by
//! [`crate::domain::GatewayService::handle`]; the typed handlers exist so the
//! OpenAPI document can describe the resource routes.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::error;

use crate::domain::{Binding, Method, ResponseEnvelope};
use crate::inbound::http::health::{live, ready};
use crate::inbound::http::schemas::{
    ApplicationDocumentSchema, GuildSummarySchema, MessageSchema, UserProfileSchema,
};
use crate::inbound::http::state::HttpState;

/// Render a domain envelope as an actix response.
pub fn envelope_response(envelope: ResponseEnvelope) -> HttpResponse {
    let status = StatusCode::from_u16(envelope.status()).unwrap_or_else(|_| {
        error!(status = envelope.status(), "envelope carries an invalid status");
        StatusCode::INTERNAL_SERVER_ERROR
    });
    let mut response = HttpResponse::build(status);
    for &(name, value) in envelope.headers() {
        response.insert_header((name, value));
    }
    match envelope.body() {
        Some(_) => response.body(envelope.body_text()),
        None => response.finish(),
    }
}

/// Route any request through the gateway.
pub async fn dispatch(req: HttpRequest, state: web::Data<HttpState>) -> HttpResponse {
    let method = Method::parse(req.method().as_str());
    let envelope = state
        .gateway
        .handle(&method, req.path(), Binding::Listener)
        .await;
    envelope_response(envelope)
}

/// Public widget summary of a guild.
#[utoipa::path(
    get,
    path = "/v1/guild/{id}",
    tags = ["lookup"],
    params(("id" = String, Path, description = "Guild snowflake")),
    responses(
        (status = 200, description = "Guild summary, or an error note when the widget is disabled", body = GuildSummarySchema),
        (status = 400, description = "Identifier is not a snowflake", body = MessageSchema),
        (status = 500, description = "Upstream failure", body = MessageSchema)
    )
)]
pub async fn get_guild(req: HttpRequest, state: web::Data<HttpState>) -> HttpResponse {
    dispatch(req, state).await
}

/// Public RPC document of an application with decoded flags.
#[utoipa::path(
    get,
    path = "/v1/application/{id}",
    tags = ["lookup"],
    params(("id" = String, Path, description = "Application snowflake")),
    responses(
        (status = 200, description = "Application document", body = ApplicationDocumentSchema),
        (status = 400, description = "Identifier is not a snowflake", body = MessageSchema),
        (status = 500, description = "Upstream failure", body = MessageSchema)
    )
)]
pub async fn get_application(req: HttpRequest, state: web::Data<HttpState>) -> HttpResponse {
    dispatch(req, state).await
}

/// Normalised user profile.
#[utoipa::path(
    get,
    path = "/v1/user/{id}",
    tags = ["lookup"],
    params(("id" = String, Path, description = "User snowflake")),
    responses(
        (status = 200, description = "User profile, or the upstream error payload", body = UserProfileSchema),
        (status = 400, description = "Identifier is not a snowflake", body = MessageSchema),
        (status = 500, description = "Upstream failure", body = MessageSchema)
    )
)]
pub async fn get_user(req: HttpRequest, state: web::Data<HttpState>) -> HttpResponse {
    dispatch(req, state).await
}

/// Register the lookup routes, the health probes and the fallback.
///
/// Non-`GET` methods on registered paths fall through to [`dispatch`] so
/// preflights and 404s keep the gateway's envelope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use lookup_gateway::inbound::http::lookup::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/v1/guild/{id}")
            .route(web::get().to(get_guild))
            .default_service(web::to(dispatch)),
    )
    .service(
        web::resource("/v1/application/{id}")
            .route(web::get().to(get_application))
            .default_service(web::to(dispatch)),
    )
    .service(
        web::resource("/v1/user/{id}")
            .route(web::get().to(get_user))
            .default_service(web::to(dispatch)),
    )
    .service(
        web::resource("/health/ready")
            .route(web::get().to(ready))
            .default_service(web::to(dispatch)),
    )
    .service(
        web::resource("/health/live")
            .route(web::get().to(live))
            .default_service(web::to(dispatch)),
    )
    .default_service(web::to(dispatch));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GatewayError;
    use serde_json::json;

    #[actix_web::test]
    async fn preflight_envelope_has_no_body() {
        let response = envelope_response(ResponseEnvelope::preflight(Binding::Listener));
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().get("content-type").is_none());
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|value| value.to_str().ok()),
            Some("*")
        );
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body reads");
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn error_envelopes_keep_status_and_message() {
        let envelope =
            ResponseEnvelope::from_error(Binding::Listener, &GatewayError::invalid_snowflake());
        let response = envelope_response(envelope);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response
                .headers()
                .get("content-type")
                .and_then(|value| value.to_str().ok()),
            Some("application/json")
        );
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body reads");
        let body: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(
            body,
            json!({ "message": "Value is not a valid Discord snowflake" })
        );
    }
}
