//! Shared fixtures for integration testing.

use std::io::Write;
use std::path::Path;

use route_audit::discovery::tree::{RouteNode, RouteTree};
use route_audit::discovery::types::{CallScanner, DiscoveryError, FrontendCallRecord};
use route_audit::discovery::StaticModuleRegistry;

/// Build a terminal node.
pub fn terminal(fragment: &str, methods: &[&str], chain: &[&str]) -> RouteNode {
    RouteNode::Terminal {
        path_fragment: fragment.to_string(),
        methods: methods.iter().map(|m| m.to_string()).collect(),
        handler_chain: chain.iter().map(|h| h.to_string()).collect(),
    }
}

/// Build a mount node from an already-compiled prefix pattern.
pub fn mount(pattern: &str, children: Vec<RouteNode>) -> RouteNode {
    RouteNode::Mount {
        prefix_pattern: pattern.to_string(),
        children,
    }
}

/// Compile a literal prefix the way the mount compiler does.
pub fn compiled(prefix: &str) -> String {
    format!("^{}\\/?(?=\\/|$)", prefix.replace('/', "\\/"))
}

pub fn frontend_call(method: &str, path: &str) -> FrontendCallRecord {
    FrontendCallRecord {
        method: method.to_string(),
        full_path: path.to_string(),
        source_file: "src/api/client.js".to_string(),
        line_number: 42,
    }
}

/// A scanner returning a fixed call list.
pub struct FixedScanner(pub Vec<FrontendCallRecord>);

impl CallScanner for FixedScanner {
    fn scan_api_calls(&self) -> Result<Vec<FrontendCallRecord>, DiscoveryError> {
        Ok(self.0.clone())
    }
}

/// A registry with one `ClientController` exposing list/get/create routes.
pub fn client_registry() -> StaticModuleRegistry {
    let mut registry = StaticModuleRegistry::new();
    registry.register(
        "ClientController",
        RouteTree {
            nodes: vec![
                terminal("/", &["GET"], &["requireAuth", "listClients"]),
                terminal("/", &["POST"], &["requireAuth", "createClient"]),
                terminal("/:id", &["GET"], &["requireAuth", "getClient"]),
            ],
        },
    );
    registry
}

/// Write a legacy route file into `dir`; the stem becomes the module name.
pub fn write_legacy_file(dir: &Path, stem: &str, toml: &str) {
    let mut file = std::fs::File::create(dir.join(format!("{stem}.toml"))).unwrap();
    file.write_all(toml.as_bytes()).unwrap();
}
