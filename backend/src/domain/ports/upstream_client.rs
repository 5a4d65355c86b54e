//! Driven port for fetching raw documents from the Discord REST API.
//!
//! The domain owns the request shape; adapters own transport, credentials and
//! JSON decoding. Upstream answers with JSON on failure too, so a non-2xx
//! status is not an error at this boundary.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::define_port_error;
use crate::domain::resources::ResourceKind;
use crate::domain::snowflake::Snowflake;

/// One upstream lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    /// Resource being fetched.
    pub kind: ResourceKind,
    /// Identifier, forwarded verbatim.
    pub id: Snowflake,
}

impl UpstreamRequest {
    /// Build a request for `kind` and `id`.
    #[must_use]
    pub fn new(kind: ResourceKind, id: Snowflake) -> Self {
        Self { kind, id }
    }

    /// Path relative to the API base, without a leading slash.
    ///
    /// # Examples
    /// ```
    /// use lookup_gateway::domain::ports::UpstreamRequest;
    /// use lookup_gateway::domain::resources::ResourceKind;
    /// use lookup_gateway::domain::Snowflake;
    ///
    /// let id = Snowflake::parse("42").expect("valid snowflake");
    /// let request = UpstreamRequest::new(ResourceKind::Guild, id);
    /// assert_eq!(request.path(), "guilds/42/widget.json");
    /// ```
    #[must_use]
    pub fn path(&self) -> String {
        let id = self.id.as_str();
        match self.kind {
            ResourceKind::Guild => format!("guilds/{id}/widget.json"),
            ResourceKind::Application => format!("applications/{id}/rpc"),
            ResourceKind::User => format!("users/{id}"),
        }
    }

    /// Whether the bot credential must accompany this request.
    #[must_use]
    pub fn requires_credential(&self) -> bool {
        matches!(self.kind, ResourceKind::User)
    }
}

/// Decoded upstream reply.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamDocument {
    /// HTTP status upstream answered with.
    pub status: u16,
    /// JSON body.
    pub body: Value,
}

impl UpstreamDocument {
    /// Document with status 200.
    #[must_use]
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }
}

define_port_error! {
    /// Errors surfaced while calling upstream.
    pub enum UpstreamClientError {
        /// Network transport failed before a full response arrived.
        Transport { message: String } =>
            "upstream transport failed: {message}",
        /// The call exceeded the client timeout.
        Timeout { message: String } =>
            "upstream timeout: {message}",
        /// The body was not JSON.
        Decode { message: String } =>
            "upstream response decode failed: {message}",
        /// The adapter could not build a request.
        InvalidRequest { message: String } =>
            "upstream request invalid: {message}",
    }
}

/// Port for fetching one raw upstream document.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Fetch and decode the document for `request`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use lookup_gateway::domain::ports::{FixtureUpstreamClient, UpstreamClient, UpstreamRequest};
    ///
    /// let client = FixtureUpstreamClient::default();
    /// let document = client.fetch(&request).await?;
    /// assert_eq!(document.status, 200);
    /// # Ok::<(), lookup_gateway::domain::ports::UpstreamClientError>(())
    /// ```
    async fn fetch(
        &self,
        request: &UpstreamRequest,
    ) -> Result<UpstreamDocument, UpstreamClientError>;
}

/// Fixture implementation answering from canned documents.
///
/// Unknown identifiers get the error payload upstream sends for a missing
/// resource of that kind.
#[derive(Debug, Clone, Default)]
pub struct FixtureUpstreamClient {
    documents: HashMap<(ResourceKind, String), Value>,
}

impl FixtureUpstreamClient {
    /// Register `body` as the reply for `kind`/`id`.
    #[must_use]
    pub fn with_document(mut self, kind: ResourceKind, id: &str, body: Value) -> Self {
        self.documents.insert((kind, id.to_owned()), body);
        self
    }

    fn missing(kind: ResourceKind) -> UpstreamDocument {
        let body = match kind {
            ResourceKind::Guild => json!({ "message": "Unknown Guild", "code": 50004 }),
            ResourceKind::Application => {
                json!({ "message": "Unknown Application", "code": 10002 })
            }
            ResourceKind::User => json!({ "message": "Unknown User", "code": 10013 }),
        };
        UpstreamDocument { status: 404, body }
    }
}

#[async_trait]
impl UpstreamClient for FixtureUpstreamClient {
    async fn fetch(
        &self,
        request: &UpstreamRequest,
    ) -> Result<UpstreamDocument, UpstreamClientError> {
        let key = (request.kind, request.id.as_str().to_owned());
        Ok(self
            .documents
            .get(&key)
            .cloned()
            .map_or_else(|| Self::missing(request.kind), UpstreamDocument::ok))
    }
}
