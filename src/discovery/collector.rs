//! Backend route collection.
//!
//! # Responsibilities
//! - Drive the tree walker over the live tree, the DI registry, and the
//!   legacy route directory
//! - Attach metadata: origin, owning module, auth requirement, source file
//! - Absorb per-module and per-file failures as skips
//!
//! # Design Decisions
//! - Partial-result tolerance is mandatory: a broken module or file is
//!   logged and skipped, never fatal, since the audit targets an
//!   imperfect codebase
//! - Only the degenerate case where every configured source failed
//!   escalates
//! - Legacy classification is an allow-list on the owning module name,
//!   applied no matter which source produced the record

use std::path::Path;

use crate::config::schema::DiscoveryConfig;
use crate::discovery::registry::{controller_key, ModuleRegistry};
use crate::discovery::tree::{walk_tree, RouteTree, WalkedRoute};
use crate::discovery::types::{DiscoveryError, DiscoveryResult, RouteOrigin, RouteRecord};

/// Everything one backend collection produced.
#[derive(Debug, Default)]
pub struct CollectionOutcome {
    pub routes: Vec<RouteRecord>,

    /// Human-readable description of each skipped module or file.
    pub skips: Vec<String>,
}

/// Collects the canonical backend route list from all three sources.
pub struct BackendRouteCollector {
    config: DiscoveryConfig,
}

impl BackendRouteCollector {
    pub fn new(config: DiscoveryConfig) -> Self {
        Self { config }
    }

    /// Collect routes from the live tree, the registry modules, and the
    /// legacy directory. Each source is optional; per-item failures are
    /// recorded as skips.
    pub async fn collect(
        &self,
        live_tree: Option<&RouteTree>,
        registry: Option<&dyn ModuleRegistry>,
    ) -> DiscoveryResult<CollectionOutcome> {
        let mut outcome = CollectionOutcome::default();
        let mut sources_reached = 0usize;
        let mut sources_configured = 0usize;

        if let Some(tree) = live_tree {
            sources_configured += 1;
            sources_reached += 1;
            self.collect_live(tree, &mut outcome);
        }

        if let Some(registry) = registry {
            if !self.config.modules.is_empty() {
                sources_configured += 1;
                sources_reached += 1;
                self.collect_modular(registry, &mut outcome);
            }
        }

        if let Some(dir) = self.config.legacy_route_dir.clone() {
            sources_configured += 1;
            match self.collect_legacy_dir(Path::new(&dir), &mut outcome).await {
                Ok(()) => sources_reached += 1,
                Err(detail) => {
                    tracing::warn!(dir = %dir, error = %detail, "legacy route directory skipped");
                    outcome.skips.push(format!("legacy dir {dir}: {detail}"));
                }
            }
        }

        if sources_configured > 0 && sources_reached == 0 {
            return Err(DiscoveryError::NoSourceReachable(
                outcome.skips.join("; "),
            ));
        }

        tracing::info!(
            routes = outcome.routes.len(),
            skips = outcome.skips.len(),
            "backend collection complete"
        );
        Ok(outcome)
    }

    fn collect_live(&self, tree: &RouteTree, outcome: &mut CollectionOutcome) {
        for walked in walk_tree(tree, "") {
            let module = self.module_from_path(&walked.path);
            let record =
                self.make_record(walked, module, RouteOrigin::FrameworkDeclared, "unknown");
            outcome.routes.push(record);
        }
    }

    fn collect_modular(&self, registry: &dyn ModuleRegistry, outcome: &mut CollectionOutcome) {
        for module in &self.config.modules {
            let key = controller_key(module, &self.config.controller_key_overrides);
            if !registry.has(&key) {
                tracing::warn!(module = %module, key = %key, "module not registered, skipped");
                outcome
                    .skips
                    .push(format!("module {module}: key '{key}' not registered"));
                continue;
            }
            let tree = match registry.resolve(&key) {
                Ok(tree) => tree,
                Err(e) => {
                    tracing::warn!(module = %module, key = %key, error = %e, "module resolution failed, skipped");
                    outcome.skips.push(format!("module {module}: {e}"));
                    continue;
                }
            };
            let base = format!("{}/{}", self.config.api_prefix, module);
            let source = format!("registry:{key}");
            for walked in walk_tree(&tree, &base) {
                let record = self.make_record(
                    walked,
                    Some(module.clone()),
                    RouteOrigin::Modular,
                    &source,
                );
                outcome.routes.push(record);
            }
        }
    }

    async fn collect_legacy_dir(
        &self,
        dir: &Path,
        outcome: &mut CollectionOutcome,
    ) -> Result<(), String> {
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| e.to_string())?;

        while let Some(entry) = entries.next_entry().await.map_err(|e| e.to_string())? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                continue;
            }
            let stem = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_string(),
                None => continue,
            };
            let tree = match self.load_legacy_file(&path).await {
                Ok(tree) => tree,
                Err(detail) => {
                    tracing::warn!(file = %path.display(), error = %detail, "legacy route file skipped");
                    outcome
                        .skips
                        .push(format!("legacy file {}: {detail}", path.display()));
                    continue;
                }
            };
            let base = format!("{}/{}", self.config.api_prefix, stem);
            let source = path.display().to_string();
            for walked in walk_tree(&tree, &base) {
                let record =
                    self.make_record(walked, Some(stem.clone()), RouteOrigin::Legacy, &source);
                outcome.routes.push(record);
            }
        }
        Ok(())
    }

    async fn load_legacy_file(&self, path: &Path) -> Result<RouteTree, String> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| e.to_string())?;
        toml::from_str(&content).map_err(|e| e.to_string())
    }

    fn make_record(
        &self,
        walked: WalkedRoute,
        module_name: Option<String>,
        source_origin: RouteOrigin,
        source_file: &str,
    ) -> RouteRecord {
        let requires_auth = self.requires_auth(&walked.middleware_names);
        let origin = match &module_name {
            Some(module) if self.is_legacy_module(module) => RouteOrigin::Legacy,
            _ => source_origin,
        };
        RouteRecord {
            method: walked.method,
            path: walked.path,
            handler_name: walked.handler_name,
            middleware_names: walked.middleware_names,
            module_name,
            origin,
            requires_auth,
            source_file: source_file.to_string(),
        }
    }

    /// Substring, case-insensitive membership against the configured auth
    /// middleware allow-list.
    fn requires_auth(&self, middleware: &[String]) -> bool {
        middleware.iter().any(|name| {
            let name = name.to_lowercase();
            self.config
                .auth_middleware_names
                .iter()
                .any(|auth| name.contains(&auth.to_lowercase()))
        })
    }

    fn is_legacy_module(&self, module: &str) -> bool {
        self.config
            .legacy_modules
            .iter()
            .any(|legacy| legacy == module)
    }

    /// Best-effort owning module for a live-tree route: first literal
    /// segment after the API prefix.
    fn module_from_path(&self, path: &str) -> Option<String> {
        let rest = path.strip_prefix(self.config.api_prefix.as_str())?;
        let segment = rest.split('/').find(|s| !s.is_empty())?;
        if segment.starts_with(':') || segment.starts_with('{') {
            return None;
        }
        Some(segment.to_string())
    }
}
