//! Scan-manifest loading.
//!
//! The real call-site scanner is an external collaborator; what ships here
//! is the thin end of its output contract: a JSON manifest of
//! `FrontendCallRecord` entries produced by a prior scan.

use std::path::PathBuf;

use crate::discovery::types::{CallScanner, DiscoveryError, FrontendCallRecord};

/// Reads frontend call records from a JSON scan manifest.
pub struct ManifestScanner {
    path: PathBuf,
}

impl ManifestScanner {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CallScanner for ManifestScanner {
    fn scan_api_calls(&self) -> Result<Vec<FrontendCallRecord>, DiscoveryError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            DiscoveryError::ScanFailed(format!("{}: {e}", self.path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            DiscoveryError::ScanFailed(format!("{}: {e}", self.path.display()))
        })
    }
}
