//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AuditConfig (validated, immutable)
//!     → shared by value with the orchestrator and collectors
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; a run never observes a change
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Name-based heuristics (auth middleware, legacy modules) live here as
//!   lookup tables, never as inline conditionals in the engine

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AuditConfig;
pub use schema::DiscoveryConfig;
pub use schema::MatchingConfig;
pub use schema::OrchestratorConfig;
