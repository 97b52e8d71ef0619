//! POST path prefix extraction.
//!
//! # Responsibilities
//! - Filter the route table to routes accepting POST
//! - Truncate URI patterns at the first `{param}` placeholder
//! - Deduplicate while preserving first-seen order
//!
//! # Design Decisions
//! - No trailing-slash or case normalization: prefixes are emitted exactly
//!   as declared so the generated expression matches operator expectations
//! - First-seen order is preserved to keep expressions reproducible
//!   between runs against an unchanged route table

use crate::routes::descriptor::RouteDescriptor;

/// Derive the deduplicated, placeholder-stripped set of URI path prefixes
/// that accept POST requests.
///
/// An empty route table yields an empty set.
pub fn post_path_prefixes(routes: &[RouteDescriptor]) -> Vec<String> {
    let mut prefixes: Vec<String> = Vec::new();

    for route in routes.iter().filter(|r| r.accepts("POST")) {
        let prefix = match route.uri.find('{') {
            Some(start) => route.uri[..start].to_string(),
            None => route.uri.clone(),
        };

        if !prefixes.contains(&prefix) {
            prefixes.push(prefix);
        }
    }

    prefixes
}
