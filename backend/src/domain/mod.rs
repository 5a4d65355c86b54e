//! Gateway domain: validation, routing, transformation and ports.
//!
//! Nothing here knows about HTTP frameworks or HTTP clients. Inbound
//! adapters call [`GatewayService`]; outbound adapters implement
//! [`ports::UpstreamClient`].
//!
//! Public surface:
//! - `Snowflake`: validated identifier with creation timestamp.
//! - `flags`: bitmask tables and decoder.
//! - `resources`: per-kind transformers and output documents.
//! - `Route`, `Method`, `Binding`: routing contract.
//! - `ResponseEnvelope`: binding-neutral response.
//! - `GatewayService`: the shared request pipeline.

pub mod envelope;
pub mod error;
pub mod flags;
pub mod gateway;
pub mod ports;
pub mod resources;
pub mod router;
pub mod snowflake;
pub mod trace_id;

pub use self::envelope::ResponseEnvelope;
pub use self::error::{ErrorCode, GatewayError};
pub use self::flags::{FlagDecoder, FlagTables};
pub use self::gateway::GatewayService;
pub use self::router::{Binding, Method, Route};
pub use self::snowflake::{Snowflake, SnowflakeError, to_timestamp};
pub use self::trace_id::TraceId;
