//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the audit
//! engine. All types derive Serde traits for deserialization from config
//! files.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Root configuration for an audit run.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AuditConfig {
    /// Backend discovery settings.
    pub discovery: DiscoveryConfig,

    /// Matching and suggestion settings.
    pub matching: MatchingConfig,

    /// Orchestration settings.
    pub orchestrator: OrchestratorConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Backend discovery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Business modules to look up in the DI registry, each mounted at
    /// `<api_prefix>/<module>`.
    pub modules: Vec<String>,

    /// Module name → registry key overrides for names the standard
    /// translation gets wrong.
    pub controller_key_overrides: HashMap<String, String>,

    /// Directory of standalone legacy route files (TOML), each mounted at
    /// `<api_prefix>/<file-stem>`.
    pub legacy_route_dir: Option<String>,

    /// Modules on this list are flagged legacy regardless of which source
    /// actually produced their routes.
    pub legacy_modules: Vec<String>,

    /// Substrings identifying auth middleware (matched case-insensitively
    /// against middleware names).
    pub auth_middleware_names: Vec<String>,

    /// Prefix modular and legacy sub-trees are mounted under.
    pub api_prefix: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            modules: Vec::new(),
            controller_key_overrides: HashMap::new(),
            legacy_route_dir: None,
            legacy_modules: Vec::new(),
            auth_middleware_names: vec![
                "auth".to_string(),
                "authenticate".to_string(),
                "jwt".to_string(),
                "session".to_string(),
            ],
            api_prefix: "/api".to_string(),
        }
    }
}

/// Matching and suggestion configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Maximum number of ranked suggestions reported per run.
    pub max_suggestions: usize,

    /// Similarity floor below which a candidate pair is not suggested.
    pub min_similarity: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            max_suggestions: 10,
            min_similarity: 0.3,
        }
    }
}

/// Orchestration configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Skip the relational-store verification hook (smoke-test runs).
    pub skip_verification: bool,

    /// Reuse the previous report when discovered content is unchanged.
    pub cache_enabled: bool,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
