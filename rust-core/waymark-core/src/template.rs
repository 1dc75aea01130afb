//! # Path Template Engine
//!
//! Compiles a route path pattern (`/posts/:id/:slug?`) into its parameter
//! lists, substitutes values back into it, and builds an anchored matcher
//! for candidate paths.
//!
//! ## Pattern Syntax
//!
//! - `/users` - literal segment, matched verbatim
//! - `/:id` - required parameter
//! - `/:slug?` - optional parameter, elided (with its slash) when absent
//!
//! A segment is a parameter only when the whole segment is a marker.
//!
//! ## Design Decisions
//!
//! - Segments are parsed once; generation never goes through a regex
//! - Values are inserted raw, no percent-encoding
//! - Optional segments are optional in the matcher too, so every path
//!   `generate` can produce is accepted

use crate::error::{Error, Result};
use crate::types::Params;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Required and optional parameter names of a route, in pattern order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteParams {
    /// Parameters that must be supplied
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Parameters that may be omitted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional: Vec<String>,
}

impl RouteParams {
    /// Check if the route declares no parameters at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.optional.is_empty()
    }

    /// All parameter names, required first then optional
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.required
            .iter()
            .chain(self.optional.iter())
            .map(String::as_str)
    }
}

/// One `/`-delimited piece of a path pattern
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Required(String),
    Optional(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        let Some(marker) = raw.strip_prefix(':') else {
            return Self::Literal(raw.to_string());
        };

        match marker.strip_suffix('?') {
            Some(name) if is_identifier(name) => Self::Optional(name.to_string()),
            _ if is_identifier(marker) => Self::Required(marker.to_string()),
            _ => Self::Literal(raw.to_string()),
        }
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// A parsed path pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    pattern: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parse a path pattern
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            segments: pattern.split('/').map(Segment::parse).collect(),
        }
    }

    /// The source pattern
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Required and optional parameter names in first-occurrence order
    #[must_use]
    pub fn compile(&self) -> RouteParams {
        let mut params = RouteParams::default();
        for segment in &self.segments {
            match segment {
                Segment::Required(name) if !params.required.contains(name) => {
                    params.required.push(name.clone());
                }
                Segment::Optional(name) if !params.optional.contains(name) => {
                    params.optional.push(name.clone());
                }
                _ => {}
            }
        }
        params
    }

    /// Substitute parameter values into the pattern
    ///
    /// # Errors
    ///
    /// Returns the list of every required parameter missing from `values`.
    pub fn generate(&self, values: &Params) -> std::result::Result<String, Vec<String>> {
        let missing: Vec<String> = self
            .compile()
            .required
            .into_iter()
            .filter(|name| !values.contains(name))
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        let parts: Vec<&str> = self
            .segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Literal(text) => Some(text.as_str()),
                Segment::Required(name) | Segment::Optional(name) => values.get(name),
            })
            .collect();

        Ok(normalize_slashes(&parts.join("/")))
    }

    /// Build an anchored matcher for candidate paths
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPattern` if the generated expression is rejected
    /// by the regex engine.
    pub fn to_matcher(&self) -> Result<PathMatcher> {
        let mut body = String::new();
        let mut names = Vec::new();
        let mut has_fixed = false;

        for (index, segment) in self.segments.iter().enumerate() {
            let leading = if index == 0 { "" } else { "/" };
            match segment {
                Segment::Literal(text) if text.is_empty() => {}
                Segment::Literal(text) => {
                    has_fixed = true;
                    body.push_str(leading);
                    body.push_str(&regex::escape(text));
                }
                Segment::Required(name) => {
                    has_fixed = true;
                    body.push_str(leading);
                    body.push_str("([^/]+)");
                    names.push(name.clone());
                }
                Segment::Optional(name) => {
                    body.push_str(&format!("(?:{leading}([^/]+))?"));
                    names.push(name.clone());
                }
            }
        }

        let expr = if has_fixed {
            format!("^{body}$")
        } else {
            format!("^(?:{body}|/)$")
        };

        let regex = Regex::new(&expr).map_err(|e| Error::InvalidPattern {
            pattern: self.pattern.clone(),
            reason: e.to_string(),
        })?;

        Ok(PathMatcher { regex, names })
    }

    /// Extract parameter values from a candidate path
    ///
    /// Returns `None` when the candidate does not have this pattern's shape.
    /// Optional parameters absent from the candidate are left out of the map.
    #[must_use]
    pub fn extract_params(&self, candidate: &str) -> Option<BTreeMap<String, String>> {
        self.to_matcher().ok()?.extract(candidate)
    }
}

/// Anchored predicate over candidate paths, produced by
/// [`PathTemplate::to_matcher`]
#[derive(Debug, Clone)]
pub struct PathMatcher {
    regex: Regex,
    names: Vec<String>,
}

impl PathMatcher {
    /// Check if the whole candidate path has the template's shape
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        !candidate.is_empty() && self.regex.is_match(candidate)
    }

    /// Capture parameter values keyed by name
    #[must_use]
    pub fn extract(&self, candidate: &str) -> Option<BTreeMap<String, String>> {
        if candidate.is_empty() {
            return None;
        }
        let captures = self.regex.captures(candidate)?;

        Some(
            self.names
                .iter()
                .enumerate()
                .filter_map(|(index, name)| {
                    captures
                        .get(index + 1)
                        .map(|value| (name.clone(), value.as_str().to_string()))
                })
                .collect(),
        )
    }
}

/// Collapse runs of `/` and strip the trailing slash; the root stays `/`
fn normalize_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }

    while out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}


#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    /// (kind, literal, value, supplied): kind 0 literal, 1 required, 2 optional
    type SegmentSpec = (u8, String, String, bool);

    fn segments() -> impl Strategy<Value = Vec<SegmentSpec>> {
        prop::collection::vec((0u8..3, "[a-z]{1,6}", "[a-z0-9_-]{1,8}", any::<bool>()), 0..6)
    }

    /// Pattern text plus the values to substitute; optional values are only
    /// supplied when `all_optional` is set or the segment's flag says so
    fn build(specs: &[SegmentSpec], all_optional: bool) -> (PathTemplate, Params) {
        let mut pattern = String::new();
        let mut values = Params::new();
        for (index, (kind, literal, value, supplied)) in specs.iter().enumerate() {
            let name = format!("p{index}");
            match kind {
                0 => pattern.push_str(&format!("/{literal}")),
                1 => {
                    pattern.push_str(&format!("/:{name}"));
                    values.insert(name, value.as_str());
                }
                _ => {
                    pattern.push_str(&format!("/:{name}?"));
                    if all_optional || *supplied {
                        values.insert(name, value.as_str());
                    }
                }
            }
        }
        if pattern.is_empty() {
            pattern.push('/');
        }
        (PathTemplate::parse(&pattern), values)
    }

    proptest! {
        #[test]
        fn prop_generate_then_extract_recovers_values(specs in segments()) {
            let (template, values) = build(&specs, true);
            let path = template.generate(&values).unwrap();
            let extracted: Params = template
                .extract_params(&path)
                .unwrap()
                .into_iter()
                .collect();
            prop_assert_eq!(extracted, values);
        }

        #[test]
        fn prop_generated_path_is_normalized(specs in segments()) {
            let (template, values) = build(&specs, false);
            let path = template.generate(&values).unwrap();
            prop_assert!(path.starts_with('/'));
            prop_assert!(!path.contains("//"));
            prop_assert!(!path.contains(':'));
            prop_assert!(!path.contains('?'));
            prop_assert!(path == "/" || !path.ends_with('/'));
            prop_assert!(template.to_matcher().unwrap().matches(&path));
        }
    }
}
