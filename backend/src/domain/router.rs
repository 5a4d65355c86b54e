//! Request routing shared by both bindings.
//!
//! Routing looks only at the method and the path; the query string is
//! dropped. The listener matches the prefix `/v1/<kind>/` and takes the raw
//! segment after it as the id, even when that segment is empty. Invocations
//! match non-empty segments as `v1 / <kind> / <id> [/ ignored...]`.

use std::fmt;

use super::resources::ResourceKind;

const API_VERSION_SEGMENT: &str = "v1";

/// Binding a request arrived through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// Long-running HTTP listener.
    Listener,
    /// One-shot serverless invocation.
    Invocation,
}

/// HTTP method, reduced to what routing distinguishes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `OPTIONS`
    Options,
    /// Any other method, kept verbatim.
    Other(String),
}

impl Method {
    /// Interpret a method token. Matching is case-sensitive, as in HTTP.
    #[must_use]
    pub fn parse(method: &str) -> Self {
        match method {
            "GET" => Self::Get,
            "OPTIONS" => Self::Options,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Method token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Options => "OPTIONS",
            Self::Other(other) => other.as_str(),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routing decision for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// CORS preflight; answered with 204 before anything else.
    Preflight,
    /// `GET /` on the listener.
    Root,
    /// `GET /v1/<kind>/<id>`. The id is not validated yet.
    Resource {
        /// Requested resource kind.
        kind: ResourceKind,
        /// Raw path segment holding the identifier.
        id: String,
    },
    /// Nothing matched.
    NotFound,
}

impl Route {
    /// Route `method path` received through `binding`.
    ///
    /// # Examples
    /// ```
    /// use lookup_gateway::domain::resources::ResourceKind;
    /// use lookup_gateway::domain::{Binding, Method, Route};
    ///
    /// let route = Route::parse(&Method::Get, "/v1/user/80351110224678912?x=1", Binding::Listener);
    /// assert_eq!(
    ///     route,
    ///     Route::Resource { kind: ResourceKind::User, id: "80351110224678912".into() }
    /// );
    /// assert_eq!(Route::parse(&Method::Get, "/", Binding::Invocation), Route::NotFound);
    /// ```
    #[must_use]
    pub fn parse(method: &Method, path: &str, binding: Binding) -> Self {
        match method {
            Method::Options => Self::Preflight,
            Method::Get => Self::parse_get(path, binding),
            Method::Other(_) => Self::NotFound,
        }
    }

    fn parse_get(path: &str, binding: Binding) -> Self {
        let path = path.split_once('?').map_or(path, |(path, _query)| path);
        match binding {
            Binding::Listener => Self::parse_listener_path(path),
            Binding::Invocation => Self::parse_invocation_path(path),
        }
    }

    fn parse_listener_path(path: &str) -> Self {
        if path == "/" {
            return Self::Root;
        }
        let mut segments = path.split('/');
        let (Some(""), Some(API_VERSION_SEGMENT), Some(kind), Some(id)) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Self::NotFound;
        };
        Self::resource(kind, id)
    }

    fn parse_invocation_path(path: &str) -> Self {
        let mut segments = path.split('/').filter(|segment| !segment.is_empty());
        if segments.next() != Some(API_VERSION_SEGMENT) {
            return Self::NotFound;
        }
        match (segments.next(), segments.next()) {
            (Some(kind), Some(id)) => Self::resource(kind, id),
            _ => Self::NotFound,
        }
    }

    fn resource(kind: &str, id: &str) -> Self {
        kind.parse::<ResourceKind>().map_or(Self::NotFound, |kind| Self::Resource {
            kind,
            id: id.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn resource(kind: ResourceKind, id: &str) -> Route {
        Route::Resource {
            kind,
            id: id.to_owned(),
        }
    }

    #[rstest]
    #[case("/")]
    #[case("/v1/guild/1")]
    #[case("/does/not/exist")]
    #[case("")]
    fn options_is_always_preflight(#[case] path: &str) {
        for binding in [Binding::Listener, Binding::Invocation] {
            assert_eq!(
                Route::parse(&Method::Options, path, binding),
                Route::Preflight
            );
        }
    }

    #[rstest]
    #[case("/v1/guild/123", resource(ResourceKind::Guild, "123"))]
    #[case("/v1/application/123", resource(ResourceKind::Application, "123"))]
    #[case("/v1/user/123", resource(ResourceKind::User, "123"))]
    #[case("/v1/user/123?with_counts=true", resource(ResourceKind::User, "123"))]
    #[case("/v1/user/123/extra", resource(ResourceKind::User, "123"))]
    #[case("/v1/guild", Route::NotFound)]
    #[case("/v1/channel/123", Route::NotFound)]
    #[case("/v2/guild/123", Route::NotFound)]
    #[case("/api/v1/guild/123", Route::NotFound)]
    fn get_requests_match_resource_paths(#[case] path: &str, #[case] expected: Route) {
        for binding in [Binding::Listener, Binding::Invocation] {
            assert_eq!(Route::parse(&Method::Get, path, binding), expected);
        }
    }

    #[rstest]
    #[case("/v1/guild/", resource(ResourceKind::Guild, ""))]
    #[case("/v1/user//123", resource(ResourceKind::User, ""))]
    #[case("//v1/guild/1", Route::NotFound)]
    #[case("v1/guild/1", Route::NotFound)]
    fn listener_takes_the_raw_segment_after_the_prefix(
        #[case] path: &str,
        #[case] expected: Route,
    ) {
        assert_eq!(
            Route::parse(&Method::Get, path, Binding::Listener),
            expected
        );
    }

    #[rstest]
    #[case("/v1/guild/", Route::NotFound)]
    #[case("/v1/user//123", resource(ResourceKind::User, "123"))]
    #[case("//v1//guild//abc", resource(ResourceKind::Guild, "abc"))]
    #[case("v1/guild/1", resource(ResourceKind::Guild, "1"))]
    fn invocation_skips_empty_segments(#[case] path: &str, #[case] expected: Route) {
        assert_eq!(
            Route::parse(&Method::Get, path, Binding::Invocation),
            expected
        );
    }

    #[rstest]
    #[case("/")]
    #[case("/?page=1")]
    fn root_is_listener_only(#[case] path: &str) {
        assert_eq!(
            Route::parse(&Method::Get, path, Binding::Listener),
            Route::Root
        );
        assert_eq!(
            Route::parse(&Method::Get, path, Binding::Invocation),
            Route::NotFound
        );
    }

    #[rstest]
    #[case("POST")]
    #[case("PUT")]
    #[case("DELETE")]
    #[case("get")]
    fn other_methods_never_reach_resources(#[case] method: &str) {
        let method = Method::parse(method);
        assert_eq!(
            Route::parse(&method, "/v1/guild/1", Binding::Listener),
            Route::NotFound
        );
    }

    #[test]
    fn method_tokens_round_trip() {
        for token in ["GET", "OPTIONS", "PATCH"] {
            assert_eq!(Method::parse(token).as_str(), token);
        }
    }
}
