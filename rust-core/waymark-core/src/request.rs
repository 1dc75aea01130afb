//! # Request Boundary
//!
//! Derives the current path from an inbound request so a server can build a
//! request-scoped snapshot. Only the URI path is used; the query string is
//! not part of the current path.

use crate::manifest::{Registry, RegistrySnapshot};
use hyper::Request;

/// The path component of a request URI
#[must_use]
pub fn current_path<B>(req: &Request<B>) -> &str {
    req.uri().path()
}

impl Registry {
    /// Build the snapshot for one inbound request
    #[must_use]
    pub fn snapshot_for<B>(&self, req: &Request<B>) -> RegistrySnapshot {
        self.snapshot(current_path(req))
    }
}

impl RegistrySnapshot {
    /// Point the snapshot at a new request's path
    pub fn update_from_request<B>(&mut self, req: &Request<B>) {
        self.set_current_path(current_path(req));
    }
}
