//! Edge Firewall Rule Sync Library
//!
//! # Architecture Overview
//!
//! ```text
//!   route table (config / JSON export)
//!       │
//!       ▼
//!   ┌──────────┐    ┌────────────┐    ┌─────────────┐
//!   │  routes  │───▶│ expression │───▶│  reconcile  │
//!   │extractor │    │  builder   │    │   engine    │
//!   └──────────┘    └────────────┘    └──────┬──────┘
//!                                            │ list / create / update
//!                                            ▼
//!                                     ┌─────────────┐
//!                                     │   gateway   │───▶ remote firewall API
//!                                     └─────────────┘
//!
//!   Cross-cutting: config (TOML + env overrides), observability (tracing)
//! ```
//!
//! The engine computes a pure [`reconcile::ReconcileOutcome`] from the
//! remote rule list and the locally derived allow expression, then applies
//! it through the [`gateway::FirewallGateway`] trait behind an operator
//! approval policy.

// Core subsystems
pub mod config;
pub mod expression;
pub mod gateway;
pub mod reconcile;
pub mod routes;

// Cross-cutting concerns
pub mod observability;

pub use config::SyncConfig;
pub use gateway::FirewallGateway;
pub use reconcile::ReconcileOutcome;
