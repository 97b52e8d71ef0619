//! Reconciliation decision and apply steps.
//!
//! # Responsibilities
//! - Decide create / update / no-op from the remote listing (pure)
//! - Gate every mutation behind the approval policy
//! - Issue gateway calls in a fixed order, aborting on first failure
//!
//! # Design Decisions
//! - The managed allow rule is matched solely by exact description
//!   equality, never by id or expression content
//! - Only the allow rule is ever updated; the block rule is created once
//!   and never re-verified afterwards
//! - No optimistic-concurrency guard between list and mutation; a
//!   concurrent remote edit between the two can be clobbered

use crate::gateway::{FirewallGateway, RemoteRule};
use crate::reconcile::approval::ApprovalPolicy;
use crate::reconcile::types::{ApplyReport, DesiredRuleSet, ReconcileError, ReconcileOutcome};

/// Compute the reconciliation decision.
///
/// Pure function over the remote rule list and the desired pair; performs
/// no I/O and no prompting.
pub fn plan(remote: &[RemoteRule], desired: &DesiredRuleSet) -> ReconcileOutcome {
    if remote.is_empty() {
        return ReconcileOutcome::NoRulesExist;
    }

    match remote
        .iter()
        .find(|rule| rule.description == desired.allow.description)
    {
        None => ReconcileOutcome::MissingManagedRules,
        Some(rule) if rule.expression == desired.allow.expression => ReconcileOutcome::UpToDate,
        Some(rule) => ReconcileOutcome::NeedsUpdate {
            rule_id: rule.id.clone(),
            filter_id: rule.filter_id.clone(),
        },
    }
}

/// Apply a previously computed outcome through the gateway.
///
/// Each create/update is an independent remote call; if the second create
/// of a pair fails, the first is not rolled back.
pub async fn apply<G, A>(
    gateway: &G,
    zone_id: &str,
    desired: &DesiredRuleSet,
    outcome: &ReconcileOutcome,
    approval: &mut A,
) -> Result<ApplyReport, ReconcileError>
where
    G: FirewallGateway,
    A: ApprovalPolicy,
{
    match outcome {
        ReconcileOutcome::UpToDate => {
            tracing::info!("The rules are up to date");
            Ok(ApplyReport::UpToDate)
        }

        ReconcileOutcome::NoRulesExist => {
            guard_expression(desired)?;
            if !approval.approve("The firewall rules are empty. Create the managed rule pair?") {
                return Ok(ApplyReport::Declined);
            }
            create_pair(gateway, zone_id, desired).await
        }

        ReconcileOutcome::MissingManagedRules => {
            guard_expression(desired)?;
            let prompt = format!(
                "The rules \"{}\" and \"{}\" don't exist. Create them?",
                desired.allow.description, desired.block.description
            );
            if !approval.approve(&prompt) {
                return Ok(ApplyReport::Declined);
            }
            create_pair(gateway, zone_id, desired).await
        }

        ReconcileOutcome::NeedsUpdate { rule_id, filter_id } => {
            guard_expression(desired)?;
            if !approval.approve("The deployed allow expression differs from the computed one. Update?")
            {
                return Ok(ApplyReport::Declined);
            }

            tracing::info!(description = %desired.allow.description, "Updating allow rule");
            gateway
                .update(
                    zone_id,
                    rule_id,
                    filter_id,
                    &desired.allow.expression,
                    desired.allow.action,
                    &desired.allow.description,
                    desired.allow.priority,
                )
                .await?;
            tracing::info!(description = %desired.allow.description, "Allow rule was updated");

            Ok(ApplyReport::UpdatedAllow)
        }
    }
}

/// Refuse to deploy a degenerate allow rule when no POST routes exist.
fn guard_expression(desired: &DesiredRuleSet) -> Result<(), ReconcileError> {
    if desired.allow.expression.is_empty() {
        tracing::warn!("No POST path prefixes found; the allow expression is empty");
        return Err(ReconcileError::EmptyExpression);
    }
    Ok(())
}

/// Create the allow rule, then the block rule, in that order.
async fn create_pair<G: FirewallGateway>(
    gateway: &G,
    zone_id: &str,
    desired: &DesiredRuleSet,
) -> Result<ApplyReport, ReconcileError> {
    tracing::info!(description = %desired.allow.description, "Creating allow rule");
    gateway
        .create(
            zone_id,
            &desired.allow.expression,
            desired.allow.action,
            &desired.allow.description,
            desired.allow.priority,
        )
        .await?;
    tracing::info!(description = %desired.allow.description, "Allow rule was created");

    tracing::info!(description = %desired.block.description, "Creating block rule");
    gateway
        .create(
            zone_id,
            &desired.block.expression,
            desired.block.action,
            &desired.block.description,
            desired.block.priority,
        )
        .await?;
    tracing::info!(description = %desired.block.description, "Block rule was created");

    Ok(ApplyReport::CreatedPair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulePairConfig;

    fn desired(expression: &str) -> DesiredRuleSet {
        DesiredRuleSet::from_config(&RulePairConfig::default(), expression.to_string())
    }

    fn remote(id: &str, filter_id: &str, description: &str, expression: &str) -> RemoteRule {
        RemoteRule {
            id: id.to_string(),
            filter_id: filter_id.to_string(),
            description: description.to_string(),
            expression: expression.to_string(),
        }
    }

    #[test]
    fn test_plan_empty_remote_list() {
        let desired = desired(r#"(http.request.uri.path contains "/orders")"#);
        assert_eq!(plan(&[], &desired), ReconcileOutcome::NoRulesExist);
    }

    #[test]
    fn test_plan_unrelated_rules_only() {
        let desired = desired(r#"(http.request.uri.path contains "/orders")"#);
        let rules = vec![remote("r9", "f9", "Challenge bad bots", "cf.client.bot")];
        assert_eq!(plan(&rules, &desired), ReconcileOutcome::MissingManagedRules);
    }

    #[test]
    fn test_plan_matching_expression_is_up_to_date() {
        let expr = r#"(http.request.uri.path contains "/orders")"#;
        let desired = desired(expr);
        let rules = vec![remote("r1", "f1", "Allow specific POSTs", expr)];
        assert_eq!(plan(&rules, &desired), ReconcileOutcome::UpToDate);
    }

    #[test]
    fn test_plan_drifted_expression_needs_update() {
        let desired = desired(r#"(http.request.uri.path contains "/orders")"#);
        let rules = vec![remote(
            "r1",
            "f1",
            "Allow specific POSTs",
            r#"(http.request.uri.path contains "/legacy")"#,
        )];
        assert_eq!(
            plan(&rules, &desired),
            ReconcileOutcome::NeedsUpdate {
                rule_id: "r1".to_string(),
                filter_id: "f1".to_string(),
            }
        );
    }

    #[test]
    fn test_plan_matches_by_description_only() {
        // Same expression under a different description is not ours.
        let expr = r#"(http.request.uri.path contains "/orders")"#;
        let desired = desired(expr);
        let rules = vec![remote("r1", "f1", "Some other allow rule", expr)];
        assert_eq!(plan(&rules, &desired), ReconcileOutcome::MissingManagedRules);
    }

    #[test]
    fn test_plan_is_idempotent_after_update() {
        // Second run with the remote expression now equal to computed.
        let expr = r#"(http.request.uri.path contains "/cart")"#;
        let desired = desired(expr);
        let rules = vec![remote("r1", "f1", "Allow specific POSTs", expr)];
        assert_eq!(plan(&rules, &desired), ReconcileOutcome::UpToDate);
        assert_eq!(plan(&rules, &desired), ReconcileOutcome::UpToDate);
    }
}
