//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via the tracing crate
//! - Log level configurable through RUST_LOG
//! - Operator-facing listings go to stdout; logs carry diagnostics

pub mod logging;
