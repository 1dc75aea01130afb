//! # Manifest JSON
//!
//! Loads route manifests and snapshots with simd-json, and serializes the
//! payload handed to browser-side runtimes with serde_json.
//!
//! ## Wire Shapes
//!
//! ```text
//! manifest: [ { name, path, method, domain, params?: { required?, optional? } } ]
//! snapshot: { routes: <manifest>, current: "/path", config?: { baseUrl?, routes? } }
//! ```

use crate::error::Result;
use crate::manifest::{ManifestConfig, Registry, RegistrySnapshot};
use crate::route::RouteRecord;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Parse JSON string to a typed value using simd-json
///
/// # Errors
///
/// Returns `Error::Json` if parsing fails
pub fn parse_json<T: DeserializeOwned>(json_str: &str) -> Result<T> {
    let mut bytes = json_str.as_bytes().to_vec();
    Ok(simd_json::from_slice(&mut bytes)?)
}

/// Serialize a value to JSON string
///
/// # Errors
///
/// Returns `Error::Json` if serialization fails
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Serialize a value to pretty-printed JSON string
///
/// # Errors
///
/// Returns `Error::Json` if serialization fails
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Parse a manifest (array of route records)
///
/// # Errors
///
/// Returns `Error::Json` on malformed input
pub fn parse_manifest(json_str: &str) -> Result<Vec<RouteRecord>> {
    parse_json(json_str)
}

#[derive(Serialize, Deserialize)]
struct SnapshotWire {
    routes: Vec<RouteRecord>,
    #[serde(default)]
    current: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    config: Option<ManifestConfig>,
}

/// Parse a full snapshot payload
///
/// # Errors
///
/// Returns `Error::Json` on malformed input
pub fn parse_snapshot(json_str: &str) -> Result<RegistrySnapshot> {
    let wire: SnapshotWire = parse_json(json_str)?;
    Ok(Registry::new(wire.routes, wire.config).snapshot(wire.current))
}

impl RegistrySnapshot {
    /// Serialize as `{ routes, current, config? }`
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` if serialization fails
    pub fn to_json(&self) -> Result<String> {
        to_json(&SnapshotWire {
            routes: self.routes().to_vec(),
            current: self.current_path().to_string(),
            config: self.registry().config().cloned(),
        })
    }
}
