//! Discord REST outbound adapter.
//!
//! Thin HTTP implementation of the `UpstreamClient` port plus the bot
//! credential it sends on user lookups.

mod http_client;
mod token;

pub use http_client::{DEFAULT_API_BASE, DiscordHttpClient};
pub use token::BotToken;
