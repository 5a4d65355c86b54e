//! Listener entry-point: loads settings, wires the gateway and serves HTTP.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use lookup_gateway::bootstrap::build_gateway;
use lookup_gateway::inbound::http::health::HealthState;
use lookup_gateway::inbound::http::state::HttpState;
use lookup_gateway::settings::GatewaySettings;
use server::{ServerConfig, create_server};

/// Build Prometheus middleware, logging and disabling metrics on failure.
#[cfg(feature = "metrics")]
fn initialize_metrics<F, E>(build: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match build() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "failed to initialise Prometheus metrics; continuing without");
            None
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = GatewaySettings::load_from_args(std::env::args_os())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let config = settings
        .resolve(&DefaultEnv::new())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let gateway = build_gateway(&config).map_err(|e| std::io::Error::other(e.to_string()))?;

    let server_config = ServerConfig::new(config.bind_addr, HttpState::new(gateway));
    #[cfg(feature = "metrics")]
    let server_config = server_config.with_metrics(initialize_metrics(|| {
        PrometheusMetricsBuilder::new("lookup_gateway")
            .endpoint("/metrics")
            .build()
    }));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, server_config)?;
    info!(bind_addr = %config.bind_addr, "listening");
    server.await
}

#[cfg(test)]
mod tests;
