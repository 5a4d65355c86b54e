//! Read-only lookup gateway for public Discord resources.
//!
//! - [`domain`]: identifier validation, flag decoding, resource transformers,
//!   routing and the shared request pipeline.
//! - [`inbound`]: the HTTP listener and the single-event invocation binding.
//! - [`outbound`]: the reqwest adapter for the upstream REST API.
//! - [`settings`] and [`bootstrap`]: configuration and wiring.

pub mod bootstrap;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
