//! Gateway-facing types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A firewall rule as reported by the remote service.
///
/// Owned and mutated only remotely; this tool reads it and requests
/// changes through the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRule {
    /// Opaque rule identifier.
    pub id: String,
    /// Opaque identifier of the rule's filter.
    pub filter_id: String,
    /// Human-readable rule description; the only field used for matching
    /// managed rules.
    pub description: String,
    /// The filter's boolean match expression.
    pub expression: String,
}

/// Effect applied to requests matching a rule's filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Allow,
    Block,
}

impl RuleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleAction::Allow => "allow",
            RuleAction::Block => "block",
        }
    }
}

impl std::fmt::Display for RuleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur talking to the remote firewall service.
///
/// Remote-rejection variants carry the raw response body so the operator
/// sees exactly what the service said.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Network or connectivity failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote service rejected our credentials.
    #[error("authentication rejected: {0}")]
    Auth(String),

    /// The remote service rejected a rule expression as malformed.
    #[error("expression rejected: {0}")]
    Validation(String),

    /// Any other remote-side rejection.
    #[error("remote API error: {0}")]
    Api(String),
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_names() {
        assert_eq!(RuleAction::Allow.as_str(), "allow");
        assert_eq!(RuleAction::Block.as_str(), "block");
        assert_eq!(serde_json::to_string(&RuleAction::Block).unwrap(), "\"block\"");
    }

    #[test]
    fn test_error_display_carries_body() {
        let err = GatewayError::Validation("filter expression is invalid".into());
        assert!(err.to_string().contains("filter expression is invalid"));
    }
}
