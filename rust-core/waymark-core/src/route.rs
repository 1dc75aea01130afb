//! # Route Metadata
//!
//! Single-responsibility module for route records.
//!
//! ## Design Principles
//!
//! - **S**: `RouteRecord` only holds route metadata
//! - **O**: Extensible via additional fields without breaking the manifest
//!   shape
//! - **D**: Decoupled from the host framework's router; a
//!   [`RouteDefinition`] is the only thing this module knows about it

use crate::template::{PathTemplate, RouteParams};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Domain sentinel meaning "use the configured base host"
pub const ROOT_DOMAIN: &str = "root";

/// HTTP methods a route record can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// HTTP GET
    #[default]
    Get,
    /// HTTP POST
    Post,
    /// HTTP PUT
    Put,
    /// HTTP DELETE
    Delete,
    /// HTTP PATCH
    Patch,
    /// HTTP HEAD
    Head,
    /// HTTP OPTIONS
    Options,
}

impl Method {
    /// Parse a verb case-insensitively
    #[must_use]
    pub fn from_verb(verb: &str) -> Option<Self> {
        match verb.to_ascii_lowercase().as_str() {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "delete" => Some(Self::Delete),
            "patch" => Some(Self::Patch),
            "head" => Some(Self::Head),
            "options" => Some(Self::Options),
            _ => None,
        }
    }

    /// Lowercase verb as stored in the manifest
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Patch => "patch",
            Self::Head => "head",
            Self::Options => "options",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn root_domain() -> String {
    ROOT_DOMAIN.to_string()
}

/// One named, reachable endpoint
///
/// `params` always mirrors the markers of `pattern`: a manifest's own
/// `params` field is ignored on load and recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RecordWire")]
pub struct RouteRecord {
    /// Unique name within its domain (e.g. "users.show")
    pub name: String,
    /// Path pattern (e.g. "/users/:id")
    #[serde(rename = "path")]
    pub pattern: String,
    /// Primary HTTP method
    #[serde(default)]
    pub method: Method,
    /// Host label, or [`ROOT_DOMAIN`]
    #[serde(default = "root_domain")]
    pub domain: String,
    /// Parameters derived from the pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<RouteParams>,
}

/// Manifest shape of a record, before params are derived
#[derive(Deserialize)]
struct RecordWire {
    name: String,
    path: String,
    #[serde(default)]
    method: Method,
    #[serde(default = "root_domain")]
    domain: String,
}

impl From<RecordWire> for RouteRecord {
    fn from(wire: RecordWire) -> Self {
        Self::new(wire.name, wire.path, wire.method).with_domain(wire.domain)
    }
}

impl RouteRecord {
    /// Create a record on the root domain, deriving params from the pattern
    #[must_use]
    pub fn new(name: impl Into<String>, pattern: impl Into<String>, method: Method) -> Self {
        let pattern = pattern.into();
        let params = PathTemplate::parse(&pattern).compile();

        Self {
            name: name.into(),
            pattern,
            method,
            domain: root_domain(),
            params: (!params.is_empty()).then_some(params),
        }
    }

    /// Set the domain
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Build a record from a host router entry
    ///
    /// The primary method is the first non-HEAD verb. Returns `None` for
    /// unnamed routes and for routes that only answer HEAD.
    #[must_use]
    pub fn from_definition(definition: &RouteDefinition) -> Option<Self> {
        let name = definition.name.as_deref().filter(|n| !n.is_empty())?;
        let method = definition
            .methods
            .iter()
            .filter_map(|verb| Method::from_verb(verb))
            .find(|method| *method != Method::Head)?;

        Some(Self::new(name, definition.pattern.as_str(), method).with_domain(definition.domain.as_str()))
    }

    /// Required parameter names (empty when none)
    #[must_use]
    pub fn required_params(&self) -> &[String] {
        self.params.as_ref().map_or(&[], |p| p.required.as_slice())
    }

    /// Optional parameter names (empty when none)
    #[must_use]
    pub fn optional_params(&self) -> &[String] {
        self.params.as_ref().map_or(&[], |p| p.optional.as_slice())
    }

    /// Check if the record uses the configured base host
    #[must_use]
    pub fn is_root_domain(&self) -> bool {
        self.domain == ROOT_DOMAIN
    }

    /// Parse the path pattern
    #[must_use]
    pub fn template(&self) -> PathTemplate {
        PathTemplate::parse(&self.pattern)
    }
}

/// One entry of a host router dump
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RouteDefinition {
    /// Route name, if the route was named
    #[serde(default)]
    pub name: Option<String>,
    /// Path pattern
    pub pattern: String,
    /// Uppercase verbs as registered (e.g. `["GET", "HEAD"]`)
    #[serde(default)]
    pub methods: Vec<String>,
    /// Domain the route is registered on
    #[serde(default = "root_domain")]
    pub domain: String,
}
