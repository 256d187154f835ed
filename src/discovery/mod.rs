//! Route discovery subsystem.
//!
//! # Data Flow
//! ```text
//! live application tree ─┐
//! DI module registry ────┼→ collector.rs ─→ RouteRecord[]
//! legacy route files ────┘      │
//!                               ├→ tree.rs (depth-first walk)
//!                               └→ decode.rs (mount prefix inversion)
//!
//! external call scanner ─→ FrontendCallRecord[] (contract only)
//! ```
//!
//! # Design Decisions
//! - One canonical record shape regardless of source; origin is metadata
//! - Per-module and per-file failures are skips, not errors
//! - Prefix decoding is isolated behind a single narrow function

pub mod collector;
pub mod decode;
pub mod manifest;
pub mod registry;
pub mod tree;
pub mod types;

pub use collector::{BackendRouteCollector, CollectionOutcome};
pub use manifest::ManifestScanner;
pub use registry::{ModuleRegistry, StaticModuleRegistry};
pub use tree::{RouteNode, RouteTree};
pub use types::{CallScanner, DiscoveryError, FrontendCallRecord, RouteOrigin, RouteRecord};
