//! Remote firewall rule gateway.
//!
//! # Data Flow
//! ```text
//! reconcile engine
//!     → FirewallGateway trait (list / create / update)
//!     → cloudflare.rs (reqwest against the v4 firewall-rules endpoints)
//!     → remote service
//! ```
//!
//! # Design Decisions
//! - Exactly three operations; no deletion, no rate-limit handling
//! - Pagination is flattened inside `list` so the engine always sees a
//!   single rule sequence
//! - Every remote rejection surfaces the raw response body in the error

pub mod cloudflare;
pub mod types;

pub use cloudflare::CloudflareGateway;
pub use types::{GatewayError, GatewayResult, RemoteRule, RuleAction};

/// Contract between the reconcile engine and the remote firewall service.
///
/// Implementations perform blocking round-trips; the engine issues at most
/// one `list` followed by at most two mutations per run, strictly in
/// sequence.
pub trait FirewallGateway {
    /// List all firewall rules in the zone as one flattened sequence.
    fn list(
        &self,
        zone_id: &str,
    ) -> impl std::future::Future<Output = GatewayResult<Vec<RemoteRule>>> + Send;

    /// Create a rule and return the remote's view of it.
    fn create(
        &self,
        zone_id: &str,
        expression: &str,
        action: RuleAction,
        description: &str,
        priority: u32,
    ) -> impl std::future::Future<Output = GatewayResult<RemoteRule>> + Send;

    /// Update an existing rule and its filter in place.
    #[allow(clippy::too_many_arguments)]
    fn update(
        &self,
        zone_id: &str,
        rule_id: &str,
        filter_id: &str,
        expression: &str,
        action: RuleAction,
        description: &str,
        priority: u32,
    ) -> impl std::future::Future<Output = GatewayResult<RemoteRule>> + Send;
}
