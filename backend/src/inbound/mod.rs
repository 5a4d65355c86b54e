//! Inbound adapters translating external requests into gateway calls.
//!
//! [`http`] is the long-running listener; [`invocation`] answers single
//! serverless-style events. Both delegate to
//! [`crate::domain::GatewayService::handle`].

pub mod http;
pub mod invocation;
