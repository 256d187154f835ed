//! Routing-tree reconstruction.
//!
//! # Responsibilities
//! - Model the routing tree as an explicit tagged-variant tree
//! - Walk it depth-first and emit every (method, templated-path) it answers
//! - Decode mount prefixes on a best-effort basis
//!
//! # Design Decisions
//! - No dependency on any runtime's internal router layout; live trees and
//!   legacy route files both deserialize into the same `RouteNode` shape
//! - A mount whose prefix cannot be decoded contributes an empty prefix
//!   and the walk continues (degraded beats aborted)
//! - An empty tree walks to an empty list, never an error

use serde::{Deserialize, Serialize};

use crate::discovery::decode::decode_prefix;

/// One node of a routing tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RouteNode {
    /// A route entry answering one or more methods.
    Terminal {
        /// Path fragment relative to the enclosing mount ("/" for the
        /// mount root).
        path_fragment: String,

        /// Accepted HTTP methods, any case.
        methods: Vec<String>,

        /// Ordered handler chain; the last entry is the terminal handler,
        /// everything before it is middleware.
        #[serde(default)]
        handler_chain: Vec<String>,
    },

    /// A sub-tree nested under a compiled prefix pattern.
    Mount {
        /// Opaque compiled match pattern for the mount prefix.
        prefix_pattern: String,

        #[serde(default)]
        children: Vec<RouteNode>,
    },
}

/// A full routing tree (the live application's, or one legacy file's).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteTree {
    #[serde(default)]
    pub nodes: Vec<RouteNode>,
}

/// One (method, path) emitted by a tree walk, before collector metadata is
/// attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedRoute {
    pub method: String,
    pub path: String,
    pub handler_name: String,
    pub middleware_names: Vec<String>,
}

/// Walk a routing tree, emitting every route it would answer under
/// `base_path`.
pub fn walk_tree(tree: &RouteTree, base_path: &str) -> Vec<WalkedRoute> {
    let mut out = Vec::new();
    walk_nodes(&tree.nodes, base_path, &mut out);
    out
}

fn walk_nodes(nodes: &[RouteNode], base_path: &str, out: &mut Vec<WalkedRoute>) {
    for node in nodes {
        match node {
            RouteNode::Terminal {
                path_fragment,
                methods,
                handler_chain,
            } => {
                let path = join_path(base_path, path_fragment);
                let handler_name = handler_chain
                    .last()
                    .cloned()
                    .unwrap_or_else(|| "anonymous".to_string());
                let middleware_names: Vec<String> = handler_chain
                    .iter()
                    .take(handler_chain.len().saturating_sub(1))
                    .cloned()
                    .collect();
                for method in methods {
                    out.push(WalkedRoute {
                        method: method.to_uppercase(),
                        path: path.clone(),
                        handler_name: handler_name.clone(),
                        middleware_names: middleware_names.clone(),
                    });
                }
            }
            RouteNode::Mount {
                prefix_pattern,
                children,
            } => {
                let prefix = match decode_prefix(prefix_pattern) {
                    Some(p) => p,
                    None => {
                        tracing::debug!(
                            pattern = %prefix_pattern,
                            "mount prefix not decodable, continuing with empty prefix"
                        );
                        String::new()
                    }
                };
                let base = join_mount(base_path, &prefix);
                walk_nodes(children, &base, out);
            }
        }
    }
}

/// Join a mount base with a terminal fragment. A bare "/" fragment maps to
/// the mount root itself.
fn join_path(base: &str, fragment: &str) -> String {
    let fragment = fragment.trim();
    if fragment.is_empty() || fragment == "/" {
        return if base.is_empty() {
            "/".to_string()
        } else {
            base.to_string()
        };
    }
    let mut path = String::from(base);
    if !fragment.starts_with('/') {
        path.push('/');
    }
    path.push_str(fragment);
    if !path.starts_with('/') {
        path.insert(0, '/');
    }
    path
}

fn join_mount(base: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        base.to_string()
    } else {
        format!("{}{}", base, prefix)
    }
}
