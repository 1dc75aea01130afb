//! # Waymark Core
//!
//! Named-route resolution engine.
//! Builds URLs for routes by name and answers "is this the current route?"
//! against a statically known route manifest.
//!
//! ## Architecture
//!
//! A host framework dumps its named routes into a manifest once. The engine
//! freezes that manifest into a [`Registry`] and pairs it with a current path
//! per request (or per navigation) as a [`RegistrySnapshot`]. All operations
//! are synchronous, side-effect free reads of that snapshot.
//!
//! ## Modules
//!
//! - `template` - Path pattern compiler, generator and matcher
//! - `pattern` - Wildcard dialect (`admin.*`, `/users/*`)
//! - `route` - Route records and host router conversion
//! - `manifest` - Registry, snapshot and configuration
//! - `compose` - URL composition (query, hash, prefix, base URL)
//! - `filter` - only/except/group views over routes
//! - `current` - Current-route matching and directory queries
//! - `json` - Manifest loading and snapshot serialization
//! - `request` - Current path from an inbound HTTP request
//! - `logging` - Tracing subscriber setup
//! - `types` - Parameter and query containers
//! - `error` - Error types and handling

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod compose;
pub mod current;
pub mod error;
pub mod filter;
pub mod json;
pub mod logging;
pub mod manifest;
pub mod pattern;
pub mod request;
pub mod route;
pub mod template;
pub mod types;

pub use compose::{compose, generate_path, ComposeOptions, ResolvedRoute, RouteBuilder};
pub use error::{Error, Result};
pub use filter::{filter, group_members, group_names, FilterSpec};
pub use json::{parse_manifest, parse_snapshot};
pub use manifest::{ManifestConfig, Registry, RegistrySnapshot};
pub use pattern::Wildcard;
pub use route::{Method, RouteDefinition, RouteRecord, ROOT_DOMAIN};
pub use template::{PathMatcher, PathTemplate, RouteParams};
pub use types::{Params, Query};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
