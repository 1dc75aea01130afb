//! # Route Filter
//!
//! Inclusion / exclusion / group views over a route list, driven by
//! wildcard patterns on route names. Independent of any registry.
//!
//! ## Rules
//!
//! - Neither `only` nor `except`: the list is returned unchanged
//! - Both set: filtering is disabled for the call and a warning is logged
//! - `only`: keep names matching at least one pattern
//! - `except`: keep names matching none of the patterns

use crate::pattern::{compile_all, Wildcard};
use crate::route::RouteRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Host-supplied filter configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Patterns a route name must match to be kept
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only: Option<Vec<String>>,
    /// Patterns that drop a route when matched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub except: Option<Vec<String>>,
    /// Named pattern sets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<BTreeMap<String, Vec<String>>>,
}

impl FilterSpec {
    /// Create an empty filter (keeps everything)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `only` patterns
    #[must_use]
    pub fn only<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the `except` patterns
    #[must_use]
    pub fn except<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.except = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    /// Declare a group
    #[must_use]
    pub fn group<I, S>(mut self, name: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), patterns.into_iter().map(Into::into).collect());
        self
    }
}

fn matches_any(name: &str, patterns: &[Wildcard]) -> bool {
    patterns.iter().any(|p| p.matches(name))
}

/// Apply `only` / `except` to a route list
#[must_use]
pub fn filter(routes: &[RouteRecord], spec: &FilterSpec) -> Vec<RouteRecord> {
    match (&spec.only, &spec.except) {
        (None, None) => routes.to_vec(),
        (Some(_), Some(_)) => {
            warn!("Both \"only\" and \"except\" filters are set. Route filtering is disabled.");
            routes.to_vec()
        }
        (Some(only), None) => {
            let only = compile_all(only);
            routes
                .iter()
                .filter(|r| matches_any(&r.name, &only))
                .cloned()
                .collect()
        }
        (None, Some(except)) => {
            let except = compile_all(except);
            routes
                .iter()
                .filter(|r| !matches_any(&r.name, &except))
                .cloned()
                .collect()
        }
    }
}

/// Routes whose name matches any pattern of the named group
///
/// Empty when the group (or `groups` itself) is not declared.
#[must_use]
pub fn group_members(routes: &[RouteRecord], group: &str, spec: &FilterSpec) -> Vec<RouteRecord> {
    let Some(patterns) = spec.groups.as_ref().and_then(|g| g.get(group)) else {
        return Vec::new();
    };
    let patterns = compile_all(patterns);

    routes
        .iter()
        .filter(|r| matches_any(&r.name, &patterns))
        .cloned()
        .collect()
}

/// Declared group names
#[must_use]
pub fn group_names(spec: &FilterSpec) -> Vec<String> {
    spec.groups
        .as_ref()
        .map(|g| g.keys().cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Method;

    fn routes() -> Vec<RouteRecord> {
        [
            ("home", "/"),
            ("about", "/about"),
            ("admin.login", "/admin/login"),
            ("admin.dashboard", "/admin/dashboard"),
            ("posts.index", "/posts"),
            ("posts.show", "/posts/:id"),
            ("users.index", "/users"),
            ("_debugbar.open", "/_debugbar/open"),
        ]
        .into_iter()
        .map(|(name, path)| RouteRecord::new(name, path, Method::Get))
        .collect()
    }

    fn names(routes: &[RouteRecord]) -> Vec<&str> {
        routes.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_no_filter_returns_all() {
        let all = routes();
        assert_eq!(filter(&all, &FilterSpec::new()), all);
    }

    #[test]
    fn test_except_filter() {
        let base: Vec<RouteRecord> = routes().into_iter().take(4).collect();
        let result = filter(&base, &FilterSpec::new().except(["admin.*"]));
        assert_eq!(names(&result), ["home", "about"]);
    }

    #[test]
    fn test_only_filter() {
        let base: Vec<RouteRecord> = routes().into_iter().take(4).collect();
        let result = filter(&base, &FilterSpec::new().only(["admin.*"]));
        assert_eq!(names(&result), ["admin.login", "admin.dashboard"]);
    }

    #[test]
    fn test_only_with_exact_names_and_wildcards() {
        let result = filter(&routes(), &FilterSpec::new().only(["home", "about", "posts.*"]));
        assert_eq!(names(&result), ["home", "about", "posts.index", "posts.show"]);
    }

    #[test]
    fn test_except_multiple_patterns() {
        let spec = FilterSpec::new().except(["admin.*", "_debugbar.*"]);
        let result = filter(&routes(), &spec);
        assert_eq!(
            names(&result),
            ["home", "about", "posts.index", "posts.show", "users.index"]
        );
    }

    #[test]
    fn test_only_and_except_disables_filtering() {
        let spec = FilterSpec::new().only(["home"]).except(["admin.*"]);
        assert_eq!(filter(&routes(), &spec).len(), routes().len());
    }

    #[test]
    fn test_empty_only_keeps_nothing() {
        let spec = FilterSpec::new().only(Vec::<String>::new());
        assert!(filter(&routes(), &spec).is_empty());
    }

    #[test]
    fn test_group_members() {
        let spec = FilterSpec::new()
            .group("admin", ["admin.*", "users.*"])
            .group("public", ["home", "about", "posts.index"]);

        let admin = group_members(&routes(), "admin", &spec);
        assert_eq!(names(&admin), ["admin.login", "admin.dashboard", "users.index"]);

        let public = group_members(&routes(), "public", &spec);
        assert_eq!(names(&public), ["home", "about", "posts.index"]);
    }

    #[test]
    fn test_unknown_group_is_empty() {
        let spec = FilterSpec::new().group("admin", ["admin.*"]);
        assert!(group_members(&routes(), "missing", &spec).is_empty());
        assert!(group_members(&routes(), "admin", &FilterSpec::new()).is_empty());
    }

    #[test]
    fn test_group_names() {
        let spec = FilterSpec::new()
            .group("public", ["home"])
            .group("admin", ["admin.*"]);
        assert_eq!(group_names(&spec), ["admin", "public"]);
        assert!(group_names(&FilterSpec::new()).is_empty());
    }

    #[test]
    fn test_filter_spec_deserialize() {
        let json = r#"{ "except": ["horizon.*"], "groups": { "api": ["api.v1.*"] } }"#;
        let spec: FilterSpec = serde_json::from_str(json).unwrap();
        assert!(spec.only.is_none());
        assert_eq!(spec.except.as_deref(), Some(&["horizon.*".to_string()][..]));
        assert_eq!(group_names(&spec), ["api"]);
    }
}
