//! Firewall rule expression generation.

pub mod builder;

pub use builder::{allow_expression, BLOCK_ALL_POSTS};
