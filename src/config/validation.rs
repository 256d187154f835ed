//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (overrides reference configured modules)
//! - Validate value ranges (similarity floor within [0, 1])
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AuditConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::AuditConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// One semantic problem with a configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("discovery.modules lists '{0}' more than once")]
    DuplicateModule(String),

    #[error("controller_key_overrides names unknown module '{0}'")]
    OverrideForUnknownModule(String),

    #[error("legacy module '{0}' is not in discovery.modules")]
    UnknownLegacyModule(String),

    #[error("discovery.api_prefix must start with '/', got '{0}'")]
    BadApiPrefix(String),

    #[error("matching.min_similarity must be within [0, 1], got {0}")]
    SimilarityOutOfRange(f64),

    #[error("matching.max_suggestions must be greater than zero")]
    ZeroSuggestionCap,

    #[error("observability.log_level '{0}' is not a recognized level")]
    BadLogLevel(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &AuditConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for module in &config.discovery.modules {
        if !seen.insert(module.as_str()) {
            errors.push(ValidationError::DuplicateModule(module.clone()));
        }
    }

    for module in config.discovery.controller_key_overrides.keys() {
        if !seen.contains(module.as_str()) {
            errors.push(ValidationError::OverrideForUnknownModule(module.clone()));
        }
    }

    // Legacy modules may also live in the live tree, so only warn-level
    // referential checks apply to names that look like registry modules.
    for module in &config.discovery.legacy_modules {
        if config.discovery.controller_key_overrides.contains_key(module)
            && !seen.contains(module.as_str())
        {
            errors.push(ValidationError::UnknownLegacyModule(module.clone()));
        }
    }

    if !config.discovery.api_prefix.starts_with('/') {
        errors.push(ValidationError::BadApiPrefix(
            config.discovery.api_prefix.clone(),
        ));
    }

    let floor = config.matching.min_similarity;
    if !(0.0..=1.0).contains(&floor) || floor.is_nan() {
        errors.push(ValidationError::SimilarityOutOfRange(floor));
    }

    if config.matching.max_suggestions == 0 {
        errors.push(ValidationError::ZeroSuggestionCap);
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::BadLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
