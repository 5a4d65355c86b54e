//! Outbound adapters implementing domain ports for external services.
//!
//! Adapters translate between domain types and transport representations and
//! contain no business logic.

pub mod discord;
