//! Allow-expression builder.
//!
//! # Responsibilities
//! - Turn the ordered POST path prefix set into a single boolean match
//!   expression in the remote firewall's rule language
//!
//! # Design Decisions
//! - Clause order follows prefix order so the expression is stable across
//!   runs against an unchanged route table
//! - An empty prefix set yields an empty expression; callers must warn and
//!   refuse to deploy it rather than ship a rule that matches nothing

/// Catch-all match for POST requests, used by the managed block rule.
pub const BLOCK_ALL_POSTS: &str = r#"http.request.method eq "POST""#;

/// Build the allow expression covering the given path prefixes.
///
/// Output shape: `(http.request.uri.path contains "p1") or
/// (http.request.uri.path contains "p2")` with no trailing `or`.
pub fn allow_expression<S: AsRef<str>>(prefixes: &[S]) -> String {
    prefixes
        .iter()
        .map(|p| format!(r#"(http.request.uri.path contains "{}")"#, p.as_ref()))
        .collect::<Vec<_>>()
        .join(" or ")
}
