//! Behavioural tests for the single-event invocation binding.

use std::sync::Arc;

use lookup_gateway::domain::GatewayService;
use lookup_gateway::domain::ports::FixtureUpstreamClient;
use lookup_gateway::domain::resources::{ResourceKind, ResourceTransformers};
use lookup_gateway::inbound::invocation::{InvocationEvent, InvocationResponse, invoke, invoke_json};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn gateway() -> GatewayService {
    let upstream = FixtureUpstreamClient::default().with_document(
        ResourceKind::User,
        "80351110224678912",
        json!({
            "id": "80351110224678912",
            "username": "Nelly",
            "global_name": null,
            "avatar": "8342729096ea3675442027381ff50dfe",
            "banner": "06c16474723fe537c283b8efa61a30c8",
            "banner_color": "#ff0000",
            "accent_color": 16711680,
            "public_flags": 131072,
            "premium_type": 1
        }),
    );
    GatewayService::new(Arc::new(upstream), ResourceTransformers::default())
}

#[rstest]
#[tokio::test]
async fn user_event_produces_profile(gateway: GatewayService) {
    let response = invoke(&gateway, InvocationEvent::new("GET", "/v1/user/80351110224678912")).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(
        response.headers.get("Access-Control-Allow-Methods").map(String::as_str),
        Some("GET,PUT,POST,DELETE,OPTIONS")
    );
    let body: Value = serde_json::from_str(&response.body).expect("json body");
    assert_eq!(body["created_at"], json!("2015-08-10T17:26:37.529Z"));
    assert_eq!(body["badges"], json!(["VERIFIED_DEVELOPER"]));
    assert_eq!(body["premium_type"], json!("Nitro Classic"));
    assert_eq!(
        body["banner"]["link"],
        json!(
            "https://cdn.discordapp.com/banners/80351110224678912/06c16474723fe537c283b8efa61a30c8?size=480"
        )
    );
    assert_eq!(body["raw"]["username"], json!("Nelly"));
}

#[rstest]
#[tokio::test]
async fn unknown_user_payload_is_passed_through(gateway: GatewayService) {
    let response = invoke(&gateway, InvocationEvent::new("GET", "/v1/user/42")).await;
    assert_eq!(response.status_code, 200);
    let body: Value = serde_json::from_str(&response.body).expect("json body");
    assert_eq!(body, json!({ "message": "Unknown User", "code": 10013 }));
}

#[rstest]
#[tokio::test]
async fn raw_events_round_trip_through_json(gateway: GatewayService) {
    let raw = json!({
        "httpMethod": "OPTIONS",
        "path": "/v1/guild/1",
        "queryStringParameters": {}
    })
    .to_string();

    let encoded = invoke_json(&gateway, &raw).await.expect("valid event");
    let response: InvocationResponse = serde_json::from_str(&encoded).expect("response decodes");

    assert_eq!(response.status_code, 204);
    assert_eq!(response.body, "");
    assert_eq!(
        response.headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
}
