//! Edge firewall rule sync CLI.
//!
//! Reconciles the application's declared POST routes with the remote edge
//! firewall: ensures an "allow specific POSTs" rule exists ahead of a
//! catch-all "block all POSTs" rule, updating the allow rule when the
//! derived expression drifts from what is deployed.
//!
//! One run performs at most one list call followed by at most two
//! create/update calls, strictly in sequence, each gated behind operator
//! confirmation unless `--yes` is given.

use std::path::PathBuf;

use clap::Parser;

use firewall_sync::config::{load_config, SyncConfig};
use firewall_sync::expression::allow_expression;
use firewall_sync::gateway::{CloudflareGateway, FirewallGateway, RemoteRule};
use firewall_sync::observability::logging;
use firewall_sync::reconcile::{
    apply, plan, ApplyReport, AutoApprove, DesiredRuleSet, InteractiveApproval, ReconcileOutcome,
};
use firewall_sync::routes::{
    post_path_prefixes, JsonRouteSource, RouteDescriptor, RouteSource, StaticRouteSource,
};

#[derive(Parser)]
#[command(name = "firewall-sync")]
#[command(about = "Reconcile declared POST routes with edge firewall rules", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "firewall-sync.toml")]
    config: PathBuf,

    /// Approve every mutation without prompting (headless/CI use).
    #[arg(short = 'y', long)]
    yes: bool,

    /// Compute and print the plan without mutating anything.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    logging::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "Sync failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&cli.config)?;
    let zone_id = config.api.zone_id.clone();

    println!("Zone Id: {}", zone_id);

    let routes = gather_routes(&config)?;
    let prefixes = post_path_prefixes(&routes);

    println!("Declared POST routes:");
    for prefix in &prefixes {
        println!("  {}", prefix);
    }

    let expression = allow_expression(&prefixes);
    println!("Computed allow expression:");
    println!("  {}", expression);

    let desired = DesiredRuleSet::from_config(&config.rules, expression);

    // base_url was validated during config loading
    let base_url = url::Url::parse(&config.api.base_url)?;
    let gateway = CloudflareGateway::new(
        base_url,
        config.api.email.clone(),
        config.api.api_key.clone(),
        config.api.timeout_secs,
    )?;

    let remote_rules = gateway.list(&zone_id).await?;
    print_rules(&remote_rules);

    let outcome = plan(&remote_rules, &desired);

    if cli.dry_run {
        print_plan(&outcome);
        return Ok(());
    }

    let report = if cli.yes {
        apply(&gateway, &zone_id, &desired, &outcome, &mut AutoApprove).await?
    } else {
        apply(&gateway, &zone_id, &desired, &outcome, &mut InteractiveApproval).await?
    };

    match report {
        ApplyReport::UpToDate => println!("The rules are up to date"),
        ApplyReport::Declined => println!("No changes applied"),
        ApplyReport::CreatedPair => println!("Allow and block rules were created"),
        ApplyReport::UpdatedAllow => println!("Allow rule was updated"),
    }

    Ok(())
}

/// Collect the route table: inline config routes plus an optional JSON
/// export file.
fn gather_routes(config: &SyncConfig) -> Result<Vec<RouteDescriptor>, Box<dyn std::error::Error>> {
    let mut routes = StaticRouteSource::new(config.routes.clone()).routes()?;
    if let Some(path) = &config.routes_file {
        routes.extend(JsonRouteSource::new(path).routes()?);
    }
    Ok(routes)
}

fn print_rules(rules: &[RemoteRule]) {
    if rules.is_empty() {
        println!("The firewall rules are empty");
        return;
    }

    println!("Firewall rules:");
    for (index, rule) in rules.iter().enumerate() {
        println!("Rule [{}]:", index);
        println!("  RuleId: {}", rule.id);
        println!("  Description: {}", rule.description);
        println!("  FilterId: {}", rule.filter_id);
        println!("  FilterExpression: {}", rule.expression);
    }
}

fn print_plan(outcome: &ReconcileOutcome) {
    match outcome {
        ReconcileOutcome::NoRulesExist => {
            println!("Plan: create the allow and block rules (zone has no rules)")
        }
        ReconcileOutcome::MissingManagedRules => {
            println!("Plan: create the allow and block rules (managed rules missing)")
        }
        ReconcileOutcome::UpToDate => println!("Plan: nothing to do, rules are up to date"),
        ReconcileOutcome::NeedsUpdate { rule_id, .. } => {
            println!("Plan: update allow rule {} with the new expression", rule_id)
        }
    }
}
