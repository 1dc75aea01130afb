//! # Error Handling
//!
//! Centralized error types for Waymark core.
//! Uses `thiserror` for ergonomic error definitions.
//!
//! Only structural failures are errors. A broken `baseUrl` or a filter that
//! sets both `only` and `except` degrade to best-effort output with a
//! `tracing` warning instead.

use thiserror::Error;

/// Result type alias for Waymark operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for route resolution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No route with the requested name exists in the registry
    #[error("Route with name \"{name}\" not found")]
    RouteNotFound {
        /// The name that wasn't found
        name: String,
    },

    /// A parameterized route was resolved without any parameters
    #[error("Route \"{name}\" requires parameters: {}", quote_list(.required))]
    MissingParametersForRoute {
        /// Route name
        name: String,
        /// Every required parameter of the route
        required: Vec<String>,
    },

    /// Parameters were supplied but some required keys are absent
    #[error("Missing required parameters for route \"{name}\": {}", quote_list(.missing))]
    MissingRequiredParameter {
        /// Route name
        name: String,
        /// Exactly the keys that were not supplied
        missing: Vec<String>,
    },

    /// A path or wildcard pattern could not be compiled
    #[error("Invalid route pattern: {pattern}: {reason}")]
    InvalidPattern {
        /// The invalid pattern
        pattern: String,
        /// Reason for invalidity
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<simd_json::Error> for Error {
    fn from(err: simd_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

fn quote_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("\"{item}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
