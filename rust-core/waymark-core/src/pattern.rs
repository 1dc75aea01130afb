//! # Wildcard Patterns
//!
//! The narrow pattern dialect used by filters, groups and current-route
//! queries. `*` matches any run of characters (dots and slashes included);
//! every other character is literal. Patterns are anchored at both ends.
//!
//! ```text
//! admin.*      matches admin.login, admin.users.index
//! /users/*     matches /users/123, /users/123/edit
//! ```

use crate::error::{Error, Result};
use regex::Regex;

/// A compiled wildcard pattern
#[derive(Debug, Clone)]
pub struct Wildcard {
    source: String,
    regex: Regex,
}

impl Wildcard {
    /// Compile a wildcard pattern
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPattern` if the translated expression is
    /// rejected by the regex engine (e.g. exceeds its size limit).
    pub fn compile(pattern: &str) -> Result<Self> {
        let body = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        let regex = Regex::new(&format!("(?s)^{body}$")).map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Check whether `pattern` uses the `*` metacharacter
    #[must_use]
    pub fn is_wildcard(pattern: &str) -> bool {
        pattern.contains('*')
    }

    /// The source pattern
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match the whole input
    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }
}

/// Compile a list of patterns, dropping (and logging) any that fail
pub(crate) fn compile_all<S: AsRef<str>>(patterns: &[S]) -> Vec<Wildcard> {
    patterns
        .iter()
        .filter_map(|pattern| match Wildcard::compile(pattern.as_ref()) {
            Ok(wildcard) => Some(wildcard),
            Err(err) => {
                tracing::warn!(pattern = pattern.as_ref(), error = %err, "Skipping wildcard pattern");
                None
            }
        })
        .collect()
}
