//! # Manifest Store
//!
//! The immutable route table plus its configuration, and the request-scoped
//! snapshot that pairs it with a current path.
//!
//! ## Design Principles (SOLID)
//!
//! - **S**: `Registry` only stores routes and config, `RegistrySnapshot`
//!   only adds the current path
//! - **D**: Resolution code receives a handle, never reads a global
//!
//! `Registry` is an `Arc` handle: cloning it is cheap and every clone sees
//! the same frozen table. A server builds one `RegistrySnapshot` per request
//! from the shared registry; a browser-side runtime keeps one and calls
//! [`RegistrySnapshot::set_current_path`] on navigation.

use crate::filter::{self, FilterSpec};
use crate::route::{RouteDefinition, RouteRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Host application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestConfig {
    /// Base URL for absolute URLs; absent means path-only mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Filter applied to directory views
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routes: Option<FilterSpec>,
}

impl ManifestConfig {
    /// Create an empty configuration (path-only mode)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the directory filter
    #[must_use]
    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.routes = Some(filter);
        self
    }
}

#[derive(Debug)]
struct Inner {
    routes: Vec<RouteRecord>,
    config: Option<ManifestConfig>,
}

/// Shared, frozen route table
#[derive(Debug, Clone)]
pub struct Registry {
    inner: Arc<Inner>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Vec::new(), None)
    }
}

impl Registry {
    /// Freeze a route table and its configuration
    ///
    /// # Arguments
    ///
    /// * `routes` - Route records in manifest order (first match wins)
    /// * `config` - Base URL and directory filter, `None` for path-only mode
    #[must_use]
    pub fn new(routes: Vec<RouteRecord>, config: Option<ManifestConfig>) -> Self {
        Self {
            inner: Arc::new(Inner { routes, config }),
        }
    }

    /// Build from a host router dump, keeping named routes only
    #[must_use]
    pub fn from_definitions<'a, I>(definitions: I, config: Option<ManifestConfig>) -> Self
    where
        I: IntoIterator<Item = &'a RouteDefinition>,
    {
        let routes = definitions
            .into_iter()
            .filter_map(RouteRecord::from_definition)
            .collect();
        Self::new(routes, config)
    }

    /// All routes in manifest order
    #[must_use]
    pub fn routes(&self) -> &[RouteRecord] {
        &self.inner.routes
    }

    /// Configuration, if any
    #[must_use]
    pub fn config(&self) -> Option<&ManifestConfig> {
        self.inner.config.as_ref()
    }

    /// Configured base URL, if any
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.config().and_then(|c| c.base_url.as_deref())
    }

    /// Find a route by exact name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RouteRecord> {
        self.inner.routes.iter().find(|r| r.name == name)
    }

    /// Routes after applying the configured directory filter
    #[must_use]
    pub fn visible_routes(&self) -> Vec<RouteRecord> {
        match self.config().and_then(|c| c.routes.as_ref()) {
            Some(spec) => filter::filter(self.routes(), spec),
            None => self.routes().to_vec(),
        }
    }

    /// Number of routes
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.routes.len()
    }

    /// Check if the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.routes.is_empty()
    }

    /// Pair the registry with a current path
    #[must_use]
    pub fn snapshot(&self, current_path: impl Into<String>) -> RegistrySnapshot {
        RegistrySnapshot {
            registry: self.clone(),
            current_path: current_path.into(),
        }
    }
}

/// A registry paired with the live current path
#[derive(Debug, Clone)]
pub struct RegistrySnapshot {
    registry: Registry,
    current_path: String,
}

impl RegistrySnapshot {
    /// Create a snapshot from raw parts
    #[must_use]
    pub fn new(
        routes: Vec<RouteRecord>,
        current_path: impl Into<String>,
        config: Option<ManifestConfig>,
    ) -> Self {
        Registry::new(routes, config).snapshot(current_path)
    }

    /// The underlying registry
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The current path, verbatim
    #[must_use]
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Replace the current path (once per request or navigation)
    pub fn set_current_path(&mut self, path: impl Into<String>) {
        self.current_path = path.into();
    }
}
