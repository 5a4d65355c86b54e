//! Wiring shared by both bindings: resolved settings in, gateway out.

use std::sync::Arc;

use tracing::info;

use crate::domain::resources::ResourceTransformers;
use crate::domain::{FlagTables, GatewayService};
use crate::outbound::discord::DiscordHttpClient;
use crate::settings::{GatewayConfig, SettingsError};

/// Build the gateway over the Discord REST adapter.
///
/// # Errors
///
/// Returns [`SettingsError::Client`] when the HTTP client cannot be built.
pub fn build_gateway(config: &GatewayConfig) -> Result<GatewayService, SettingsError> {
    let client = DiscordHttpClient::new(
        config.upstream_base.clone(),
        config.upstream_timeout,
        config.token.clone(),
    )
    .map_err(|error| SettingsError::Client {
        message: error.to_string(),
    })?;
    info!(
        upstream = %client.base(),
        cdn = config.cdn.as_str(),
        timeout_secs = config.upstream_timeout.as_secs(),
        credential = config.token.is_some(),
        "gateway configured"
    );
    let transformers = ResourceTransformers::new(FlagTables::default(), config.cdn.clone());
    Ok(GatewayService::new(Arc::new(client), transformers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Binding, Method};
    use crate::settings::GatewaySettings;
    use mockable::MockEnv;

    #[tokio::test]
    async fn built_gateway_validates_before_fetching() {
        let mut env = MockEnv::new();
        env.expect_string().times(0..).returning(|_| None);
        let config = GatewaySettings {
            upstream_base_url: Some("http://127.0.0.1:9".to_owned()),
            ..GatewaySettings::default()
        }
        .resolve(&env)
        .expect("config resolves");

        let gateway = build_gateway(&config).expect("client builds");
        let envelope = gateway
            .handle(&Method::Get, "/v1/user/not-a-number", Binding::Listener)
            .await;
        assert_eq!(envelope.status(), 400);
    }
}
