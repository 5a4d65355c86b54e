//! Request pipeline shared by every binding.
//!
//! `route -> validate id -> fetch -> classify -> transform -> envelope`.
//! The service always answers with a [`ResponseEnvelope`]; failures are
//! logged here and reduced to their public message.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use super::envelope::ResponseEnvelope;
use super::error::GatewayError;
use super::ports::{UpstreamClient, UpstreamRequest};
use super::resources::{ResourceKind, ResourceTransformers};
use super::router::{Binding, Method, Route};
use super::snowflake::Snowflake;
use super::trace_id::TraceId;

/// Routes requests and runs the lookup pipeline.
#[derive(Clone)]
pub struct GatewayService {
    upstream: Arc<dyn UpstreamClient>,
    transformers: Arc<ResourceTransformers>,
}

impl GatewayService {
    /// Build a service over an upstream client and configured transformers.
    pub fn new(upstream: Arc<dyn UpstreamClient>, transformers: ResourceTransformers) -> Self {
        Self {
            upstream,
            transformers: Arc::new(transformers),
        }
    }

    /// Answer one request.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use lookup_gateway::domain::ports::FixtureUpstreamClient;
    /// use lookup_gateway::domain::resources::ResourceTransformers;
    /// use lookup_gateway::domain::{Binding, GatewayService, Method};
    ///
    /// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
    /// let service = GatewayService::new(
    ///     Arc::new(FixtureUpstreamClient::default()),
    ///     ResourceTransformers::default(),
    /// );
    /// let envelope = service.handle(&Method::Get, "/v1/guild/abc", Binding::Listener).await;
    /// assert_eq!(envelope.status(), 400);
    /// # });
    /// ```
    pub async fn handle(&self, method: &Method, path: &str, binding: Binding) -> ResponseEnvelope {
        match Route::parse(method, path, binding) {
            Route::Preflight => ResponseEnvelope::preflight(binding),
            Route::Root => ResponseEnvelope::root(binding),
            Route::NotFound => {
                debug!(%method, path, "no route matched");
                ResponseEnvelope::from_error(binding, &GatewayError::not_found())
            }
            Route::Resource { kind, id } => match self.lookup(kind, &id).await {
                Ok(body) => ResponseEnvelope::json(binding, 200, body),
                Err(error) => ResponseEnvelope::from_error(binding, &error),
            },
        }
    }

    /// Validate `id`, fetch the upstream document and transform it.
    ///
    /// Soft failures reported by upstream are successful lookups.
    ///
    /// # Errors
    ///
    /// - [`crate::domain::ErrorCode::InvalidRequest`] when `id` is not a
    ///   snowflake; upstream is not contacted.
    /// - [`crate::domain::ErrorCode::InternalError`] on transport, decode or
    ///   transformation failure.
    pub async fn lookup(&self, kind: ResourceKind, id: &str) -> Result<Value, GatewayError> {
        let id = Snowflake::parse(id).inspect_err(|error| {
            debug!(%kind, %error, "rejected identifier");
        })?;
        let request = UpstreamRequest::new(kind, id);

        let document = self.upstream.fetch(&request).await.map_err(|error| {
            error!(
                %kind,
                id = request.id.as_str(),
                trace_id = ?TraceId::current(),
                %error,
                "upstream fetch failed"
            );
            GatewayError::internal(error.to_string())
        })?;
        if !(200..300).contains(&document.status) {
            warn!(%kind, status = document.status, "upstream answered with an error status");
        }

        self.transformers
            .for_kind(kind)
            .transform(&request.id, document.body)
            .and_then(|resource| resource.into_json(kind))
            .map_err(|error| {
                error!(
                    %kind,
                    id = request.id.as_str(),
                    trace_id = ?TraceId::current(),
                    %error,
                    "failed to transform upstream document"
                );
                GatewayError::from(error)
            })
    }
}
