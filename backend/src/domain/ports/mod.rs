//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod upstream_client;

#[cfg(test)]
pub use upstream_client::MockUpstreamClient;
pub use upstream_client::{
    FixtureUpstreamClient, UpstreamClient, UpstreamClientError, UpstreamDocument,
    UpstreamRequest,
};
