//! Tests for the invocation binding.

use super::*;
use std::sync::Arc;

use crate::domain::ports::{FixtureUpstreamClient, MockUpstreamClient};
use crate::domain::resources::{ResourceKind, ResourceTransformers};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn gateway() -> GatewayService {
    let upstream = FixtureUpstreamClient::default().with_document(
        ResourceKind::Guild,
        "81384788765712384",
        json!({
            "id": "81384788765712384",
            "name": "Discord API",
            "instant_invite": null,
            "presence_count": 7,
            "members": []
        }),
    );
    GatewayService::new(Arc::new(upstream), ResourceTransformers::default())
}

#[rstest]
#[tokio::test]
async fn preflight_sends_full_header_set(gateway: GatewayService) {
    let response = invoke(&gateway, InvocationEvent::new("OPTIONS", "/anything")).await;

    assert_eq!(response.status_code, 204);
    assert_eq!(response.body, "");
    assert_eq!(
        response.headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
    assert_eq!(
        response
            .headers
            .get("Access-Control-Allow-Methods")
            .map(String::as_str),
        Some("GET,PUT,POST,DELETE,OPTIONS")
    );
}

#[rstest]
#[tokio::test]
async fn guild_lookup_returns_json_text(gateway: GatewayService) {
    let response = invoke(
        &gateway,
        InvocationEvent::new("GET", "/v1/guild/81384788765712384?with_counts=true"),
    )
    .await;

    assert_eq!(response.status_code, 200);
    let body: Value = serde_json::from_str(&response.body).expect("json body");
    assert_eq!(
        body,
        json!({
            "id": "81384788765712384",
            "name": "Discord API",
            "instant_invite": null,
            "presence_count": 7
        })
    );
}

#[rstest]
#[case("GET", "/", 404)]
#[case("get", "/v1/guild/1", 404)]
#[case("GET", "/v1/guild/abc", 400)]
#[case("DELETE", "/v1/user/1", 404)]
#[tokio::test]
async fn routing_matches_the_listener_except_root(
    gateway: GatewayService,
    #[case] method: &str,
    #[case] path: &str,
    #[case] expected: u16,
) {
    let response = invoke(&gateway, InvocationEvent::new(method, path)).await;
    assert_eq!(response.status_code, expected);
}

#[tokio::test]
async fn caller_trace_id_is_in_scope_during_lookup() {
    let supplied = "0f8fad5b-d9cb-469f-a165-70867728950e";
    let mut upstream = MockUpstreamClient::new();
    upstream.expect_fetch().times(1).returning(move |_| {
        assert_eq!(
            TraceId::current().map(|id| id.to_string()).as_deref(),
            Some(supplied)
        );
        Ok(crate::domain::ports::UpstreamDocument::ok(
            json!({ "id": "1", "name": "probe" }),
        ))
    });
    let gateway = GatewayService::new(Arc::new(upstream), ResourceTransformers::default());
    let mut event = InvocationEvent::new("GET", "/v1/guild/1");
    event.headers.insert("Trace-Id".to_owned(), supplied.to_owned());

    let response = invoke(&gateway, event).await;
    assert_eq!(response.status_code, 200);
}

#[rstest]
#[tokio::test]
async fn json_round_trip_uses_camel_case(gateway: GatewayService) {
    let raw = r#"{"httpMethod":"GET","path":"/v1/guild/xyz","isBase64Encoded":false}"#;
    let encoded = invoke_json(&gateway, raw).await.expect("event decodes");
    let response: Value = serde_json::from_str(&encoded).expect("response is json");

    assert_eq!(response["statusCode"], json!(400));
    assert_eq!(
        response["body"],
        json!(r#"{"message":"Value is not a valid Discord snowflake"}"#)
    );
    assert_eq!(response["headers"]["Access-Control-Allow-Origin"], json!("*"));
}

#[rstest]
#[case("not json")]
#[case(r#"{"path":"/v1/user/1"}"#)]
#[tokio::test]
async fn malformed_events_are_rejected(gateway: GatewayService, #[case] raw: &str) {
    let error = invoke_json(&gateway, raw).await.expect_err("invalid event");
    assert!(matches!(error, InvocationError::Event(_)));
}
