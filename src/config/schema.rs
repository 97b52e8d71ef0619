//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML config
//! file. Every field has a default so a minimal config only needs the API
//! credentials and zone id.

use serde::{Deserialize, Serialize};

use crate::expression::BLOCK_ALL_POSTS;
use crate::routes::RouteDescriptor;

/// Root configuration for the sync tool.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SyncConfig {
    /// Remote API endpoint and credentials.
    pub api: ApiConfig,

    /// The managed allow/block rule pair.
    pub rules: RulePairConfig,

    /// Routes declared inline in this file.
    pub routes: Vec<RouteDescriptor>,

    /// Optional JSON route-table export to load additional routes from.
    pub routes_file: Option<String>,
}

/// Remote firewall API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Account email for legacy key auth.
    pub email: String,

    /// API key paired with the email.
    pub api_key: String,

    /// Zone to reconcile rules in.
    pub zone_id: String,

    /// API root; trailing slash required for URL joining.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            email: String::new(),
            api_key: String::new(),
            zone_id: String::new(),
            base_url: "https://api.cloudflare.com/client/v4/".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Settings for the managed rule pair.
///
/// Passed into the reconcile engine explicitly so distinct zones or rule
/// pairs can be reconciled with independent configurations.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct RulePairConfig {
    /// Description identifying the managed allow rule.
    pub allow_description: String,

    /// Allow rule priority; must be strictly lower than the block
    /// priority so the allow rule is evaluated first.
    pub allow_priority: u32,

    /// Description of the catch-all block rule.
    pub block_description: String,

    /// Block rule priority.
    pub block_priority: u32,

    /// Match expression of the block rule.
    pub block_expression: String,
}

impl Default for RulePairConfig {
    fn default() -> Self {
        Self {
            allow_description: "Allow specific POSTs".to_string(),
            allow_priority: 1,
            block_description: "Block all incoming POSTs".to_string(),
            block_priority: 2,
            block_expression: BLOCK_ALL_POSTS.to_string(),
        }
    }
}
