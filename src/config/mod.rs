//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, env credential overrides)
//!     → validation.rs (semantic checks)
//!     → SyncConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; each run reloads from scratch
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ApiConfig, RulePairConfig, SyncConfig};
