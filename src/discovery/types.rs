//! Discovery types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a backend route was registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteOrigin {
    /// Declared directly on the live application tree.
    FrameworkDeclared,
    /// Mounted through the DI module registry.
    Modular,
    /// Owned by a module on the known-legacy allow-list,
    /// regardless of which source produced the record.
    Legacy,
}

/// Canonical reconstruction of one (method, templated-path) the backend
/// responds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    /// Canonical uppercase HTTP verb.
    pub method: String,

    /// Templated path, leading slash, fully mount-prefixed.
    pub path: String,

    /// Name of the terminal handler, or "anonymous".
    pub handler_name: String,

    /// Ordered middleware chain, terminal handler excluded.
    pub middleware_names: Vec<String>,

    /// Owning business module, when known.
    pub module_name: Option<String>,

    /// Registration source.
    pub origin: RouteOrigin,

    /// True if any middleware name matches the auth allow-list.
    pub requires_auth: bool,

    /// Best-effort source file, "unknown" when unavailable.
    pub source_file: String,
}

impl RouteRecord {
    /// Duplicate-detection key: method is case-insensitive, path is taken
    /// as registered (not canonicalized).
    pub fn registration_key(&self) -> String {
        format!("{}:{}", self.method.to_uppercase(), self.path)
    }
}

/// One client call site that targets the backend.
///
/// Produced entirely by the external call-site scanner; immutable once
/// received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendCallRecord {
    pub method: String,

    /// May carry a query template (e.g. `/api/users?page=${n}`).
    pub full_path: String,

    pub source_file: String,

    pub line_number: u32,
}

/// Output contract of the external frontend call-site scanner.
///
/// Only this contract is part of the engine; how a scanner parses client
/// source is its own business.
pub trait CallScanner: Send + Sync {
    fn scan_api_calls(&self) -> Result<Vec<FrontendCallRecord>, DiscoveryError>;
}

/// Errors that abort discovery.
///
/// Per-module and per-file failures are absorbed at the collector boundary
/// and never surface here; only total inability to reach a required source
/// is fatal.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Every configured backend source failed; there is nothing to audit.
    #[error("no backend source reachable: {0}")]
    NoSourceReachable(String),

    /// The frontend scanner failed outright.
    #[error("frontend call scan failed: {0}")]
    ScanFailed(String),
}

/// Result type for discovery operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;
