//! Path canonicalization.
//!
//! # Responsibilities
//! - Strip query strings and fragments
//! - Collapse exactly one trailing slash (root `/` preserved)
//! - Unify parameter tokens across authoring syntaxes
//!
//! # Design Decisions
//! - Pure function, no state
//! - Parameter position and count are preserved: `/a/:id/b` and
//!   `/a/{x}/b` normalize identically, but differing parameter counts
//!   never do
//! - Idempotent: normalize(normalize(p)) == normalize(p) for all p

/// Canonical wildcard one parameter segment normalizes to.
pub const PARAM_WILDCARD: &str = "*";

/// Canonicalize a path for cross-vocabulary comparison.
pub fn normalize(path: &str) -> String {
    let path = strip_query(path);
    let path = strip_trailing_slash(path);

    if path.is_empty() {
        return String::new();
    }

    path.split('/')
        .map(|segment| {
            if is_parameter_segment(segment) {
                PARAM_WILDCARD
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Drop everything from the first `?` or `#` on.
pub fn strip_query(path: &str) -> &str {
    match path.find(['?', '#']) {
        Some(idx) => &path[..idx],
        None => path,
    }
}

/// Collapse exactly one trailing slash; bare root stays `/`.
fn strip_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

/// Whether a segment is a parameter token in any supported authoring
/// syntax: `:id`, `{id}`, or a `${...}` interpolation.
pub fn is_parameter_segment(segment: &str) -> bool {
    if segment.starts_with(':') && segment.len() > 1 {
        return true;
    }
    if segment.starts_with('{') && segment.ends_with('}') && segment.len() > 1 {
        return true;
    }
    if segment.contains("${") {
        return true;
    }
    segment == PARAM_WILDCARD
}
