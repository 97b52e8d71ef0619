//! Operator approval policies.
//!
//! Every mutating action is gated behind a confirmation step. The policy
//! is injected at the apply boundary so interactive runs prompt on the
//! terminal while headless runs auto-approve or refuse outright.

use std::io::{BufRead, Write};

/// Decides whether a proposed mutation may proceed.
pub trait ApprovalPolicy {
    fn approve(&mut self, prompt: &str) -> bool;
}

/// Prompts the operator on the terminal with a y/N question.
#[derive(Debug, Default)]
pub struct InteractiveApproval;

impl ApprovalPolicy for InteractiveApproval {
    fn approve(&mut self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        let _ = std::io::stdout().flush();

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Approves every mutation; for `--yes` and CI use.
#[derive(Debug, Default)]
pub struct AutoApprove;

impl ApprovalPolicy for AutoApprove {
    fn approve(&mut self, prompt: &str) -> bool {
        tracing::info!(prompt, "Auto-approved");
        true
    }
}

/// Refuses every mutation; a non-interactive safety default for tests
/// and embedding.
#[derive(Debug, Default)]
pub struct DenyAll;

impl ApprovalPolicy for DenyAll {
    fn approve(&mut self, _prompt: &str) -> bool {
        false
    }
}
