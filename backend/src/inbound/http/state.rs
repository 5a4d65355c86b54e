//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` and depend only on
//! the domain gateway, so they stay testable with fixture upstreams.

use crate::domain::GatewayService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub gateway: GatewayService,
}

impl HttpState {
    /// Wrap a configured gateway.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use lookup_gateway::domain::GatewayService;
    /// use lookup_gateway::domain::ports::FixtureUpstreamClient;
    /// use lookup_gateway::domain::resources::ResourceTransformers;
    /// use lookup_gateway::inbound::http::state::HttpState;
    ///
    /// let gateway = GatewayService::new(
    ///     Arc::new(FixtureUpstreamClient::default()),
    ///     ResourceTransformers::default(),
    /// );
    /// let state = HttpState::new(gateway);
    /// let _gateway = state.gateway.clone();
    /// ```
    pub fn new(gateway: GatewayService) -> Self {
        Self { gateway }
    }
}
