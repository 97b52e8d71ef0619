//! Reconciliation types and error definitions.

use thiserror::Error;

use crate::config::RulePairConfig;
use crate::gateway::types::{GatewayError, RuleAction};

/// One rule this tool wants to exist remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredRule {
    pub description: String,
    pub priority: u32,
    pub action: RuleAction,
    pub expression: String,
}

/// The managed allow/block rule pair, recomputed on every run.
///
/// The allow rule always carries a strictly lower numeric priority than
/// the block rule so it is evaluated first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredRuleSet {
    pub allow: DesiredRule,
    pub block: DesiredRule,
}

impl DesiredRuleSet {
    /// Assemble the pair from the rule-pair configuration and the freshly
    /// computed allow expression.
    pub fn from_config(rules: &RulePairConfig, allow_expression: String) -> Self {
        Self {
            allow: DesiredRule {
                description: rules.allow_description.clone(),
                priority: rules.allow_priority,
                action: RuleAction::Allow,
                expression: allow_expression,
            },
            block: DesiredRule {
                description: rules.block_description.clone(),
                priority: rules.block_priority,
                action: RuleAction::Block,
                expression: rules.block_expression.clone(),
            },
        }
    }
}

/// The pure decision computed by [`crate::reconcile::plan`].
///
/// Never persisted; recomputed fresh from the remote listing on each run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The zone has no firewall rules at all.
    NoRulesExist,
    /// Rules exist, but none matches the managed allow description.
    MissingManagedRules,
    /// The deployed allow expression equals the computed one.
    UpToDate,
    /// The allow rule exists but its expression has drifted.
    NeedsUpdate { rule_id: String, filter_id: String },
}

/// What the apply step actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyReport {
    /// Nothing to do; deployed rules already match.
    UpToDate,
    /// Operator declined the proposed mutation.
    Declined,
    /// Allow and block rules were created, in that order.
    CreatedPair,
    /// The existing allow rule was updated in place.
    UpdatedAllow,
}

/// Errors from the apply step.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The computed allow expression is empty (no POST routes); refusing
    /// to deploy a rule that matches nothing.
    #[error("computed allow expression is empty; no POST routes were found")]
    EmptyExpression,

    /// A gateway call failed; prior steps in this run are not rolled back.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
