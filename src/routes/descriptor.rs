//! Route descriptor type shared by all route sources.

use serde::{Deserialize, Serialize};

/// A single registered route as declared by the host application.
///
/// Only the HTTP method set and the URI pattern are consumed; any other
/// route metadata is ignored by this tool.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// HTTP methods this route accepts (e.g., ["GET", "POST"]).
    pub methods: Vec<String>,

    /// URI pattern, possibly containing `{param}` placeholders.
    pub uri: String,
}

impl RouteDescriptor {
    /// Build a descriptor from string-likes, mostly for tests and config
    /// construction.
    pub fn new<M, U>(methods: &[M], uri: U) -> Self
    where
        M: AsRef<str>,
        U: Into<String>,
    {
        Self {
            methods: methods.iter().map(|m| m.as_ref().to_string()).collect(),
            uri: uri.into(),
        }
    }

    /// Whether this route accepts the given HTTP method (case-insensitive).
    pub fn accepts(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m.eq_ignore_ascii_case(method))
    }
}
