//! # Current-Route Matcher
//!
//! Answers "is the current path route X?" against a [`RegistrySnapshot`],
//! plus the directory queries (`has`, `filter`, groups) callers use to build
//! navigation.
//!
//! ## Query Forms
//!
//! | Query             | Meaning                                              |
//! |-------------------|------------------------------------------------------|
//! | `users.show` + params | generated path equals the current path exactly  |
//! | `users.*`         | some route named like this accepts the current path  |
//! | `/users/*`        | the current path string itself matches the wildcard  |
//!
//! A leading `/` is the only thing separating the last two forms.
//!
//! Every call is a fresh read of the snapshot; nothing is cached.

use crate::compose::{self, ComposeOptions, ResolvedRoute, RouteBuilder};
use crate::error::{Error, Result};
use crate::filter::{self, FilterSpec};
use crate::manifest::RegistrySnapshot;
use crate::pattern::Wildcard;
use crate::route::RouteRecord;
use crate::types::Params;
use tracing::debug;

impl RegistrySnapshot {
    /// The raw current path, verbatim
    #[must_use]
    pub fn current(&self) -> &str {
        self.current_path()
    }

    /// Check whether the current path satisfies a route query
    ///
    /// # Arguments
    ///
    /// * `query` - A route name, a name wildcard (`admin.*`) or a path
    ///   wildcard (`/admin/*`)
    /// * `params` - Values for an exact name; ignored for wildcards
    ///
    /// # Returns
    ///
    /// `true` when the current path is (or falls under) the queried route.
    ///
    /// # Errors
    ///
    /// For exact names: `Error::RouteNotFound`,
    /// `Error::MissingParametersForRoute` or `Error::MissingRequiredParameter`.
    /// Wildcard queries only fail if the pattern can't be compiled.
    pub fn is_current(&self, query: &str, params: Option<&Params>) -> Result<bool> {
        let current = self.current_path();

        if Wildcard::is_wildcard(query) {
            let wildcard = Wildcard::compile(query)?;
            let matched = if query.starts_with('/') {
                wildcard.matches(current)
            } else {
                self.any_named_route_at(&wildcard, current)
            };
            debug!(query = %query, current = %current, matched, "Wildcard current-route check");
            return Ok(matched);
        }

        let record = self.get(query).ok_or_else(|| Error::RouteNotFound {
            name: query.to_string(),
        })?;
        let path = compose::generate_path(record, params)?;
        Ok(path == current)
    }

    fn any_named_route_at(&self, wildcard: &Wildcard, current: &str) -> bool {
        self.routes()
            .iter()
            .filter(|r| wildcard.matches(&r.name))
            .any(|r| {
                r.template()
                    .to_matcher()
                    .is_ok_and(|matcher| matcher.matches(current))
            })
    }

    /// Check whether a route name (or name wildcard) exists
    ///
    /// Never looks at the current path.
    #[must_use]
    pub fn has(&self, query: &str) -> bool {
        if !Wildcard::is_wildcard(query) {
            return self.get(query).is_some();
        }

        Wildcard::compile(query)
            .map(|w| self.routes().iter().any(|r| w.matches(&r.name)))
            .unwrap_or(false)
    }

    /// Parameter values of the current path
    ///
    /// Taken from the first route (manifest order) whose pattern accepts the
    /// current path. Empty when nothing matches.
    #[must_use]
    pub fn params(&self) -> Params {
        let current = self.current_path();

        self.routes()
            .iter()
            .find_map(|r| {
                let matcher = r.template().to_matcher().ok()?;
                matcher.extract(current)
            })
            .map(|values| values.into_iter().collect())
            .unwrap_or_default()
    }

    /// All routes in manifest order
    #[must_use]
    pub fn routes(&self) -> &[RouteRecord] {
        self.registry().routes()
    }

    /// Find a route by exact name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RouteRecord> {
        self.registry().get(name)
    }

    /// Apply a filter to the route table
    #[must_use]
    pub fn filter(&self, spec: &FilterSpec) -> Vec<RouteRecord> {
        filter::filter(self.routes(), spec)
    }

    /// Members of a declared group
    #[must_use]
    pub fn group(&self, name: &str, spec: &FilterSpec) -> Vec<RouteRecord> {
        filter::group_members(self.routes(), name, spec)
    }

    /// Declared group names
    #[must_use]
    pub fn groups(&self, spec: &FilterSpec) -> Vec<String> {
        filter::group_names(spec)
    }

    /// Resolve a route by name
    ///
    /// # Errors
    ///
    /// Same as [`compose::compose`].
    pub fn route(&self, name: &str, params: Option<Params>) -> Result<ResolvedRoute> {
        compose::compose(
            self.registry(),
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
        self.registry().builder(name)
    }
}
