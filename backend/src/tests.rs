//! Tests for the listener bootstrap, covering metrics initialisation and
//! readiness signalling.

use std::sync::Arc;

use super::server::{ServerConfig, create_server};
#[cfg(feature = "metrics")]
use super::{PrometheusMetricsBuilder, initialize_metrics};
use actix_web::web;
use lookup_gateway::domain::GatewayService;
use lookup_gateway::domain::ports::FixtureUpstreamClient;
use lookup_gateway::domain::resources::ResourceTransformers;
use lookup_gateway::inbound::http::health::HealthState;
use lookup_gateway::inbound::http::state::HttpState;
use rstest::{fixture, rstest};

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn server_config() -> ServerConfig {
    let gateway = GatewayService::new(
        Arc::new(FixtureUpstreamClient::default()),
        ResourceTransformers::default(),
    );
    ServerConfig::new(
        "127.0.0.1:0".parse().expect("valid address"),
        HttpState::new(gateway),
    )
}

#[cfg(feature = "metrics")]
#[test]
fn initialize_metrics_returns_none_on_error() {
    let metrics = initialize_metrics(|| -> Result<_, &str> { Err("boom") });
    assert!(metrics.is_none(), "expected metrics to be absent on error");
}

#[cfg(feature = "metrics")]
#[test]
fn initialize_metrics_returns_metrics_on_success() {
    let metrics = initialize_metrics(|| {
        PrometheusMetricsBuilder::new("test")
            .endpoint("/metrics")
            .build()
    });
    assert!(metrics.is_some(), "expected metrics to be present on success");
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(
    health_state: web::Data<HealthState>,
    server_config: ServerConfig,
) {
    assert!(!health_state.is_ready(), "state should start unready");

    let _server =
        create_server(health_state.clone(), server_config).expect("server should build");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[cfg(feature = "metrics")]
#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready_with_metrics(
    health_state: web::Data<HealthState>,
    server_config: ServerConfig,
) {
    let metrics = PrometheusMetricsBuilder::new("test")
        .endpoint("/metrics")
        .build()
        .expect("metrics should build for tests");

    let _server = create_server(health_state.clone(), server_config.with_metrics(Some(metrics)))
        .expect("server should build with metrics");

    assert!(health_state.is_ready());
}
