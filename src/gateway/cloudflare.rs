//! Cloudflare firewall-rules gateway.
//!
//! # Responsibilities
//! - Talk to the v4 `/zones/{zone}/firewall/rules` endpoints
//! - Flatten paginated listings into one rule sequence
//! - Map HTTP and API-level failures onto `GatewayError`
//!
//! # Design Decisions
//! - Legacy key auth (`X-Auth-Email` / `X-Auth-Key` headers), matching the
//!   credentials the config supplies
//! - 401/403 map to Auth, 400 to Validation (malformed expression), any
//!   other rejection to Api; the raw response body rides along in each

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::gateway::types::{GatewayError, GatewayResult, RemoteRule, RuleAction};
use crate::gateway::FirewallGateway;

const PER_PAGE: u32 = 50;

/// Gateway backed by the Cloudflare v4 REST API.
#[derive(Clone)]
pub struct CloudflareGateway {
    http: reqwest::Client,
    base_url: Url,
    email: String,
    api_key: String,
}

/// Standard Cloudflare response envelope.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ApiEnvelope<T> {
    success: bool,
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    result_info: Option<ResultInfo>,
}

#[derive(Debug, Deserialize)]
struct ResultInfo {
    page: u32,
    total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct ApiRule {
    id: String,
    #[serde(default)]
    description: String,
    filter: ApiFilter,
}

#[derive(Debug, Deserialize)]
struct ApiFilter {
    id: String,
    #[serde(default)]
    expression: String,
}

impl From<ApiRule> for RemoteRule {
    fn from(rule: ApiRule) -> Self {
        RemoteRule {
            id: rule.id,
            filter_id: rule.filter.id,
            description: rule.description,
            expression: rule.filter.expression,
        }
    }
}

impl CloudflareGateway {
    /// Create a gateway against the given API root (normally
    /// `https://api.cloudflare.com/client/v4/`).
    pub fn new(
        base_url: Url,
        email: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> GatewayResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            email: email.into(),
            api_key: api_key.into(),
        })
    }

    fn rules_url(&self, zone_id: &str) -> GatewayResult<Url> {
        self.base_url
            .join(&format!("zones/{}/firewall/rules", zone_id))
            .map_err(|e| GatewayError::Api(format!("invalid zone URL: {}", e)))
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("X-Auth-Email", &self.email)
            .header("X-Auth-Key", &self.api_key)
    }

    /// Issue a request and decode the Cloudflare envelope, mapping failures
    /// onto the gateway error taxonomy.
    async fn dispatch<T: serde::de::DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> GatewayResult<ApiEnvelope<T>> {
        let response = self
            .authed(req)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(GatewayError::Auth(body));
        }
        if status == reqwest::StatusCode::BAD_REQUEST {
            return Err(GatewayError::Validation(body));
        }
        if !status.is_success() {
            return Err(GatewayError::Api(body));
        }

        let envelope: ApiEnvelope<T> = serde_json::from_str(&body)
            .map_err(|e| GatewayError::Api(format!("undecodable response ({}): {}", e, body)))?;

        if !envelope.success {
            return Err(GatewayError::Api(body));
        }

        Ok(envelope)
    }
}

impl FirewallGateway for CloudflareGateway {
    async fn list(&self, zone_id: &str) -> GatewayResult<Vec<RemoteRule>> {
        let url = self.rules_url(zone_id)?;
        let mut rules = Vec::new();
        let mut page = 1u32;

        loop {
            let req = self
                .http
                .get(url.clone())
                .query(&[("page", page.to_string()), ("per_page", PER_PAGE.to_string())]);
            let envelope: ApiEnvelope<Vec<ApiRule>> = self.dispatch(req).await?;

            rules.extend(envelope.result.unwrap_or_default().into_iter().map(RemoteRule::from));

            match envelope.result_info {
                Some(info) if info.page < info.total_pages => page = info.page + 1,
                _ => break,
            }
        }

        tracing::debug!(zone_id, count = rules.len(), "Listed remote firewall rules");
        Ok(rules)
    }

    async fn create(
        &self,
        zone_id: &str,
        expression: &str,
        action: RuleAction,
        description: &str,
        priority: u32,
    ) -> GatewayResult<RemoteRule> {
        let url = self.rules_url(zone_id)?;
        // The create endpoint takes a batch; we always send a single rule.
        let body = json!([{
            "filter": { "expression": expression },
            "action": action.as_str(),
            "description": description,
            "priority": priority,
        }]);

        let req = self.http.post(url).json(&body);
        let envelope: ApiEnvelope<Vec<ApiRule>> = self.dispatch(req).await?;

        let rule = envelope
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Api("create returned no rule".to_string()))?;

        tracing::debug!(zone_id, rule_id = %rule.id, description, "Created firewall rule");
        Ok(rule.into())
    }

    async fn update(
        &self,
        zone_id: &str,
        rule_id: &str,
        filter_id: &str,
        expression: &str,
        action: RuleAction,
        description: &str,
        priority: u32,
    ) -> GatewayResult<RemoteRule> {
        let mut url = self.rules_url(zone_id)?;
        url.path_segments_mut()
            .map_err(|_| GatewayError::Api("API base URL cannot be a base".to_string()))?
            .push(rule_id);

        let body = json!({
            "id": rule_id,
            "filter": { "id": filter_id, "expression": expression },
            "action": action.as_str(),
            "description": description,
            "priority": priority,
        });

        let req = self.http.put(url).json(&body);
        let envelope: ApiEnvelope<ApiRule> = self.dispatch(req).await?;

        let rule = envelope
            .result
            .ok_or_else(|| GatewayError::Api("update returned no rule".to_string()))?;

        tracing::debug!(zone_id, rule_id, description, "Updated firewall rule");
        Ok(rule.into())
    }
}

impl std::fmt::Debug for CloudflareGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareGateway")
            .field("base_url", &self.base_url.as_str())
            .field("email", &self.email)
            .finish()
    }
}
