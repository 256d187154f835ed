//! DI registry seam and controller-key translation.
//!
//! # Responsibilities
//! - Define the lookup contract the collector resolves controllers through
//! - Translate business-module names into registry keys
//!
//! # Design Decisions
//! - The registry is a trait so live containers and test fixtures plug in
//!   the same way
//! - Name translation is a lookup table plus a small singularizer, never
//!   inline conditionals, so irregular names stay independently testable

use std::collections::HashMap;

use thiserror::Error;

use crate::discovery::tree::RouteTree;

/// A DI-style registry resolving named controller instances.
pub trait ModuleRegistry: Send + Sync {
    /// Whether the registry knows the key at all.
    fn has(&self, key: &str) -> bool;

    /// Resolve the controller registered under `key` and expose its
    /// routing sub-tree.
    fn resolve(&self, key: &str) -> Result<RouteTree, ResolveError>;
}

/// One controller could not be resolved. Recorded and skipped by the
/// collector; never fatal.
#[derive(Debug, Error)]
#[error("module resolution failed: {0}")]
pub struct ResolveError(pub String);

/// Translate a module name into its registry key.
///
/// Explicit overrides win; otherwise the plural module name is
/// singularized and suffixed with `Controller` (`clients` →
/// `ClientController`, `companies` → `CompanyController`).
pub fn controller_key(module: &str, overrides: &HashMap<String, String>) -> String {
    if let Some(key) = overrides.get(module) {
        return key.clone();
    }
    format!("{}Controller", pascal_case(&singularize(module)))
}

fn singularize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        return format!("{stem}y");
    }
    for suffix in ["ses", "xes", "ches", "shes"] {
        if let Some(stem) = name.strip_suffix(suffix) {
            return format!("{}{}", stem, &suffix[..suffix.len() - 2]);
        }
    }
    if name.ends_with('s') && !name.ends_with("ss") {
        return name[..name.len() - 1].to_string();
    }
    name.to_string()
}

fn pascal_case(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// In-memory registry backed by a key → sub-tree map.
#[derive(Debug, Default)]
pub struct StaticModuleRegistry {
    controllers: HashMap<String, RouteTree>,
}

impl StaticModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: impl Into<String>, tree: RouteTree) {
        self.controllers.insert(key.into(), tree);
    }
}

impl ModuleRegistry for StaticModuleRegistry {
    fn has(&self, key: &str) -> bool {
        self.controllers.contains_key(key)
    }

    fn resolve(&self, key: &str) -> Result<RouteTree, ResolveError> {
        self.controllers
            .get(key)
            .cloned()
            .ok_or_else(|| ResolveError(format!("no controller registered under '{key}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_plural_translates() {
        assert_eq!(
            controller_key("clients", &HashMap::new()),
            "ClientController"
        );
    }

    #[test]
    fn irregular_plural_translates() {
        assert_eq!(
            controller_key("companies", &HashMap::new()),
            "CompanyController"
        );
        assert_eq!(
            controller_key("invoices", &HashMap::new()),
            "InvoiceController"
        );
        assert_eq!(
            controller_key("taxes", &HashMap::new()),
            "TaxController"
        );
    }

    #[test]
    fn override_wins_over_translation() {
        let mut overrides = HashMap::new();
        overrides.insert("staff".to_string(), "PersonnelController".to_string());
        assert_eq!(controller_key("staff", &overrides), "PersonnelController");
    }

    #[test]
    fn hyphenated_module_is_pascal_cased() {
        assert_eq!(
            controller_key("time-entries", &HashMap::new()),
            "TimeEntryController"
        );
    }
}
