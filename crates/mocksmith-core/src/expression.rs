//! Deferred-expression markers.
//!
//! Preset conditions may defer matching to an expression evaluated by the
//! serving layer, written in the definition files as a `${...}` string.
//! This module only recognizes and unwraps the markers; nothing is
//! evaluated here.

/// Extract the body of a `${...}` marked string.
///
/// Returns `None` when the markers are absent or the body is empty.
pub fn expression_body(value: &str) -> Option<&str> {
    let body = value.strip_prefix("${")?.strip_suffix('}')?;
    if body.is_empty() {
        None
    } else {
        Some(body)
    }
}

/// Re-wrap an expression body in its `${...}` markers.
pub fn wrap_expression(body: &str) -> String {
    format!("${{{body}}}")
}
