//! Mount-prefix pattern decoding.
//!
//! # Responsibilities
//! - Invert the compiled match pattern of a mount point back into the
//!   literal path prefix it was built from
//! - Refuse anything outside the one known construction
//!
//! # Design Decisions
//! - This is the single framework-coupled seam in the engine; it is kept
//!   behind one narrow function so the coupling cannot spread
//! - No general regex inversion: the decoder only understands patterns of
//!   the shape `^\/seg1\/seg2\/?(?=\/|$)` (optionally `\/?$`) that the
//!   mount compiler emits for literal prefixes
//! - Failure mode is `None`; callers fall back to an empty prefix and keep
//!   walking (degraded, non-fatal)

/// Suffixes the mount compiler appends after the literal prefix body.
const COMPILED_SUFFIXES: &[&str] = &["\\/?(?=\\/|$)", "\\/?$", "\\/?"];

/// Decode the literal prefix out of a compiled mount pattern.
///
/// Returns `None` when the pattern is not a pure literal-prefix
/// construction (parameter captures, alternation, wildcards).
pub fn decode_prefix(pattern: &str) -> Option<String> {
    let mut body = pattern.strip_prefix('^').unwrap_or(pattern);

    for suffix in COMPILED_SUFFIXES {
        if let Some(stripped) = body.strip_suffix(suffix) {
            body = stripped;
            break;
        }
    }

    // Unescape `\/` while rejecting every other metacharacter.
    let mut prefix = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('/') => prefix.push('/'),
                // Any other escape means the pattern is not a plain prefix.
                _ => return None,
            },
            '(' | ')' | '[' | ']' | '{' | '}' | '+' | '*' | '?' | '|' | '$' | '^' | '.' => {
                return None;
            }
            other => prefix.push(other),
        }
    }

    if prefix.is_empty() {
        return None;
    }
    if !prefix.starts_with('/') {
        prefix.insert(0, '/');
    }
    Some(prefix)
}
