//! Rule reconciliation engine.
//!
//! # Data Flow
//! ```text
//! remote rule list + desired rule pair
//!     → engine::plan (pure decision, no I/O)
//!     → ReconcileOutcome
//!     → engine::apply (approval gate, then gateway mutations)
//!     → ApplyReport
//! ```
//!
//! # Design Decisions
//! - The decision is a pure function over (remote rules, desired rules) so
//!   every branch is testable without a network or an operator
//! - Operator confirmation is an injected ApprovalPolicy, not a hardwired
//!   prompt; headless runs swap in AutoApprove
//! - Mutations are independent remote calls; a failure aborts the run and
//!   already-applied steps are not rolled back

pub mod approval;
pub mod engine;
pub mod types;

pub use approval::{ApprovalPolicy, AutoApprove, DenyAll, InteractiveApproval};
pub use engine::{apply, plan};
pub use types::{ApplyReport, DesiredRule, DesiredRuleSet, ReconcileError, ReconcileOutcome};
