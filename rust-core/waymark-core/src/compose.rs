//! # URL Composer
//!
//! Turns a route name plus parameters, query, hash and prefix into a
//! [`ResolvedRoute`], and derives an absolute URL when a base URL is
//! configured.
//!
//! ## Data Flow
//! ```text
//! name ──► Registry lookup ──► PathTemplate::generate
//!      ──► + ?query ──► + #hash ──► prefix + ...  = path
//!      ──► base URL authority (route domain / base host, port) + path = url
//! ```
//!
//! ## Design Decisions
//! - Base URL problems never fail resolution: the URL falls back to the path
//!   and a warning is logged
//! - The composed path is attached to the authority unchanged

use crate::error::{Error, Result};
use crate::manifest::Registry;
use crate::route::{Method, RouteRecord};
use crate::template::RouteParams;
use crate::types::{Params, Query};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};
use url::{Position, Url};

/// The output of resolving a route by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    /// Route name
    pub name: String,
    /// Primary HTTP method
    pub method: Method,
    /// The route's path pattern
    pub pattern: String,
    /// Declared parameters of the route
    pub params: RouteParams,
    /// Composed path: prefix + generated path + query + hash
    pub path: String,
    /// Query pairs used for the path
    pub query: Query,
    /// Hash fragment (without `#`), empty when none
    pub hash: String,
    /// Absolute URL, or `path` when no usable base URL is configured
    pub url: String,
}

impl fmt::Display for ResolvedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Optional inputs of a resolution call
#[derive(Debug, Clone, Default)]
pub struct ComposeOptions {
    /// Path parameters; `None` means "no parameter object at all"
    pub params: Option<Params>,
    /// Query pairs
    pub query: Query,
    /// Prefix prepended verbatim
    pub prefix: Option<String>,
    /// Hash fragment
    pub hash: Option<String>,
}

/// Generate the bare path of a route (no query, hash, prefix or domain)
///
/// # Errors
///
/// - `Error::MissingParametersForRoute` when the route has required
///   parameters and `params` is `None`
/// - `Error::MissingRequiredParameter` when `params` lacks required keys
pub fn generate_path(record: &RouteRecord, params: Option<&Params>) -> Result<String> {
    let template = record.template();
    let empty = Params::new();

    let values = match params {
        Some(values) => values,
        None => {
            let required = template.compile().required;
            if !required.is_empty() {
                return Err(Error::MissingParametersForRoute {
                    name: record.name.clone(),
                    required,
                });
            }
            &empty
        }
    };

    template
        .generate(values)
        .map_err(|missing| Error::MissingRequiredParameter {
            name: record.name.clone(),
            missing,
        })
}

/// Resolve a route by name
///
/// # Arguments
///
/// * `registry` - The frozen route table and its configuration
/// * `name` - Route name to look up
/// * `options` - Parameters, query, prefix and hash
///
/// # Returns
///
/// The resolved route with its composed path and, when a base URL is
/// configured, its absolute URL.
///
/// # Errors
///
/// `Error::RouteNotFound`, `Error::MissingParametersForRoute` or
/// `Error::MissingRequiredParameter`. Nothing else fails.
pub fn compose(registry: &Registry, name: &str, options: ComposeOptions) -> Result<ResolvedRoute> {
    let record = registry.get(name).ok_or_else(|| Error::RouteNotFound {
        name: name.to_string(),
    })?;

    let mut path = generate_path(record, options.params.as_ref())?;

    if !options.query.is_empty() {
        path.push('?');
        path.push_str(&options.query.encode());
    }

    let hash = options.hash.unwrap_or_default();
    if !hash.is_empty() {
        path.push('#');
        path.push_str(&hash);
    }

    if let Some(prefix) = options.prefix.filter(|p| !p.is_empty()) {
        path.insert_str(0, &prefix);
    }

    let url = absolute_url(registry.base_url(), &record.domain, &path);
    debug!(route = %record.name, path = %path, url = %url, "Route resolved");

    Ok(ResolvedRoute {
        name: record.name.clone(),
        method: record.method,
        pattern: record.pattern.clone(),
        params: record.params.clone().unwrap_or_default(),
        path,
        query: options.query,
        hash,
        url,
    })
}

/// Attach `path` to the authority derived from `base_url` and `domain`
///
/// Falls back to `path` when there is no base URL or it can't be used.
#[must_use]
pub fn absolute_url(base_url: Option<&str>, domain: &str, path: &str) -> String {
    let Some(base_url) = base_url else {
        return path.to_string();
    };

    match authority(base_url, domain) {
        Some(origin) if path.starts_with('/') => format!("{origin}{path}"),
        Some(origin) => format!("{origin}/{path}"),
        None => {
            warn!(base_url = %base_url, "Invalid baseUrl configuration, falling back to path only");
            path.to_string()
        }
    }
}

/// Scheme, userinfo, host and port, ending right before the path
fn authority(base_url: &str, domain: &str) -> Option<String> {
    let mut url = Url::parse(base_url).ok()?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return None;
    }

    if domain != crate::route::ROOT_DOMAIN {
        let (host, port) = split_host_port(domain);
        url.set_host(Some(host)).ok()?;
        if let Some(port) = port {
            url.set_port(Some(port)).ok()?;
        }
    }

    Some(url[..Position::BeforePath].to_string())
}

/// Split `host:port`; the port is only taken when it parses as one
fn split_host_port(domain: &str) -> (&str, Option<u16>) {
    match domain.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() => match port.parse::<u16>() {
            Ok(port) => (host, Some(port)),
            Err(_) => (domain, None),
        },
        _ => (domain, None),
    }
}

/// Fluent construction of a resolution call
///
/// ```ignore
/// let route = registry
///     .builder("posts.show")
///     .params(Params::from([("id", "1")]))
///     .query_pair("ref", "home")
///     .hash("comments")
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    registry: Registry,
    name: String,
    options: ComposeOptions,
}

impl RouteBuilder {
    /// Start building a route by name
    #[must_use]
    pub fn new(registry: Registry, name: impl Into<String>) -> Self {
        Self {
            registry,
            name: name.into(),
            options: ComposeOptions::default(),
        }
    }

    /// Set path parameters
    #[must_use]
    pub fn params(mut self, params: impl Into<Params>) -> Self {
        self.options.params = Some(params.into());
        self
    }

    /// Replace the query
    #[must_use]
    pub fn query(mut self, query: impl Into<Query>) -> Self {
        self.options.query = query.into();
        self
    }

    /// Append one query pair
    #[must_use]
    pub fn query_pair(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.options.query.push(key, value);
        self
    }

    /// Set the hash fragment
    #[must_use]
    pub fn hash(mut self, hash: impl Into<String>) -> Self {
        self.options.hash = Some(hash.into());
        self
    }

    /// Set the prefix
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.prefix = Some(prefix.into());
        self
    }

    /// Resolve the route
    ///
    /// # Errors
    ///
    /// Same as [`compose`].
    pub fn build(self) -> Result<ResolvedRoute> {
        compose(&self.registry, &self.name, self.options)
    }
}

impl Registry {
    /// Resolve a route by name with optional parameters
    ///
    /// # Errors
    ///
    /// Same as [`compose`].
    pub fn route(&self, name: &str, params: Option<Params>) -> Result<ResolvedRoute> {
        compose(
            self,
            name,
            ComposeOptions {
                params,
                ..ComposeOptions::default()
            },
        )
    }

    /// Start a fluent resolution
    #[must_use]
    pub fn builder(&self, name: impl Into<String>) -> RouteBuilder {
        RouteBuilder::new(self.clone(), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ManifestConfig;

    fn registry(base_url: Option<&str>) -> Registry {
        let config = base_url.map(|u| ManifestConfig::new().with_base_url(u));
        Registry::new(
            vec![
                RouteRecord::new("home", "/", Method::Get),
                RouteRecord::new("users.show", "/users/:id", Method::Get),
                RouteRecord::new("posts.index", "/posts", Method::Get),
                RouteRecord::new("posts.show", "/posts/:id/:slug?", Method::Get),
                RouteRecord::new("api.users", "/api/users", Method::Get),
                RouteRecord::new("users.posts.show", "/users/:userId/posts/:id", Method::Get),
                RouteRecord::new("api.users.index", "/users", Method::Get)
                    .with_domain("api.example.com"),
                RouteRecord::new("admin.dashboard", "/dashboard", Method::Get)
                    .with_domain("admin.example.com"),
                RouteRecord::new("admin.reports", "/reports", Method::Get)
                    .with_domain("admin.example.com:4000"),
            ],
            config,
        )
    }

    #[test]
    fn test_simple_route_path_only() {
        let route = registry(None).route("home", None).unwrap();
        assert_eq!(route.path, "/");
        assert_eq!(route.url, "/");
        assert_eq!(route.to_string(), "/");
        assert_eq!(route.method, Method::Get);
    }

    #[test]
    fn test_base_url_root_domain() {
        let reg = registry(Some("https://example.com"));
        assert_eq!(reg.route("home", None).unwrap().url, "https://example.com/");

        let user = reg
            .route("users.show", Some(Params::from([("id", "123")])))
            .unwrap();
        assert_eq!(user.path, "/users/123");
        assert_eq!(user.url, "https://example.com/users/123");
    }

    #[test]
    fn test_base_url_with_port() {
        let reg = registry(Some("http://localhost:3333"));
        assert_eq!(reg.route("home", None).unwrap().url, "http://localhost:3333/");
    }

    #[test]
    fn test_invalid_base_url_falls_back_to_path() {
        let reg = registry(Some("invalid-url"));
        let route = reg.route("home", None).unwrap();
        assert_eq!(route.path, "/");
        assert_eq!(route.url, "/");
    }

    #[test]
    fn test_route_domain_replaces_host() {
        let reg = registry(Some("https://example.com"));
        assert_eq!(
            reg.route("api.users.index", None).unwrap().url,
            "https://api.example.com/users"
        );
        assert_eq!(
            reg.route("admin.dashboard", None).unwrap().url,
            "https://admin.example.com/dashboard"
        );
    }

    #[test]
    fn test_route_domain_inherits_base_port() {
        let reg = registry(Some("https://example.com:3000"));
        assert_eq!(
            reg.route("admin.dashboard", None).unwrap().url,
            "https://admin.example.com:3000/dashboard"
        );
    }

    #[test]
    fn test_route_domain_own_port_wins() {
        let reg = registry(Some("https://example.com:3000"));
        assert_eq!(
            reg.route("admin.reports", None).unwrap().url,
            "https://admin.example.com:4000/reports"
        );
    }

    #[test]
    fn test_query_string() {
        let reg = registry(Some("https://example.com"));
        let route = reg
            .builder("posts.index")
            .query([("page", "2"), ("category", "tech")])
            .build()
            .unwrap();
        assert_eq!(route.path, "/posts?page=2&category=tech");
        assert_eq!(route.url, "https://example.com/posts?page=2&category=tech");
        assert_eq!(route.query.get("page"), Some("2"));
    }

    #[test]
    fn test_prefix_is_verbatim() {
        let reg = registry(Some("https://api.example.com"));
        let route = reg.builder("api.users").prefix("/v1").build().unwrap();
        assert_eq!(route.path, "/v1/api/users");
        assert_eq!(route.url, "https://api.example.com/v1/api/users");
    }

    #[test]
    fn test_hash_fragment() {
        let route = registry(None)
            .builder("posts.index")
            .hash("contato")
            .build()
            .unwrap();
        assert_eq!(route.path, "/posts#contato");
        assert_eq!(route.hash, "contato");
    }

    #[test]
    fn test_empty_hash_is_noop() {
        let route = registry(None).builder("posts.index").hash("").build().unwrap();
        assert_eq!(route.path, "/posts");
    }

    #[test]
    fn test_query_hash_and_prefix_order() {
        let route = registry(None)
            .builder("users.show")
            .params([("id", "7")])
            .query_pair("tab", "posts")
            .hash("top")
            .prefix("/app")
            .build()
            .unwrap();
        assert_eq!(route.path, "/app/users/7?tab=posts#top");
    }

    #[test]
    fn test_optional_params() {
        let reg = registry(None);
        let short = reg.route("posts.show", Some(Params::from([("id", "123")]))).unwrap();
        assert_eq!(short.path, "/posts/123");

        let long = reg
            .route("posts.show", Some(Params::from([("id", "123"), ("slug", "hi")])))
            .unwrap();
        assert_eq!(long.path, "/posts/123/hi");
        assert_eq!(long.pattern, "/posts/:id/:slug?");
        assert_eq!(long.params.optional, vec!["slug"]);
    }

    #[test]
    fn test_route_not_found() {
        let err = registry(None).route("nope", None).unwrap_err();
        assert_eq!(
            err,
            Error::RouteNotFound {
                name: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_missing_parameter_object() {
        let err = registry(None).route("users.posts.show", None).unwrap_err();
        match err {
            Error::MissingParametersForRoute { required, .. } => {
                assert_eq!(required, vec!["userId", "id"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_required_key_names_only_missing() {
        let err = registry(None)
            .route("users.posts.show", Some(Params::from([("id", "456")])))
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("\"userId\""));
        assert!(!msg.contains("\"id\""));
    }

    #[test]
    fn test_split_host_port() {
        assert_eq!(split_host_port("example.com"), ("example.com", None));
        assert_eq!(split_host_port("example.com:8080"), ("example.com", Some(8080)));
        assert_eq!(split_host_port("[::1]:9000"), ("[::1]", Some(9000)));
        assert_eq!(split_host_port("[::1]"), ("[::1]", None));
    }

    #[test]
    fn test_absolute_url_without_base() {
        assert_eq!(absolute_url(None, "root", "/x"), "/x");
    }

    #[test]
    fn test_absolute_url_replaces_base_path() {
        assert_eq!(
            absolute_url(Some("https://example.com/app/"), "root", "/users/1"),
            "https://example.com/users/1"
        );
        assert_eq!(
            absolute_url(Some("http://localhost:3333/base?x=1#frag"), "root", "/"),
            "http://localhost:3333/"
        );
    }

    #[test]
    fn test_absolute_url_domain_with_scheme_default_port() {
        assert_eq!(
            absolute_url(Some("https://example.com:3000"), "secure.example.com:443", "/x"),
            "https://secure.example.com/x"
        );
        assert_eq!(
            absolute_url(Some("http://example.com"), "api.example.com:80", "/x"),
            "http://api.example.com/x"
        );
    }

    #[test]
    fn test_absolute_url_relative_prefix() {
        assert_eq!(
            absolute_url(Some("https://example.com"), "root", "v1/users"),
            "https://example.com/v1/users"
        );
    }
}
