//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the rule pair is internally consistent
//! - Check credentials and zone id are present
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: SyncConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::SyncConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("api.zone_id must not be empty")]
    MissingZoneId,

    #[error("api.email must not be empty")]
    MissingEmail,

    #[error("api.api_key must not be empty")]
    MissingApiKey,

    #[error("api.base_url is not a valid URL: {0}")]
    InvalidBaseUrl(String),

    #[error("rules.{0} must not be empty")]
    EmptyDescription(&'static str),

    #[error("rule descriptions must differ; both are \"{0}\"")]
    IdenticalDescriptions(String),

    #[error("allow priority {allow} must be strictly lower than block priority {block}")]
    PriorityOrder { allow: u32, block: u32 },

    #[error("rules.block_expression must not be empty")]
    EmptyBlockExpression,
}

/// Validate a parsed configuration, collecting every problem.
pub fn validate_config(config: &SyncConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.api.zone_id.trim().is_empty() {
        errors.push(ValidationError::MissingZoneId);
    }
    if config.api.email.trim().is_empty() {
        errors.push(ValidationError::MissingEmail);
    }
    if config.api.api_key.trim().is_empty() {
        errors.push(ValidationError::MissingApiKey);
    }
    if let Err(e) = Url::parse(&config.api.base_url) {
        errors.push(ValidationError::InvalidBaseUrl(e.to_string()));
    }

    let rules = &config.rules;
    if rules.allow_description.is_empty() {
        errors.push(ValidationError::EmptyDescription("allow_description"));
    }
    if rules.block_description.is_empty() {
        errors.push(ValidationError::EmptyDescription("block_description"));
    }
    if !rules.allow_description.is_empty() && rules.allow_description == rules.block_description {
        errors.push(ValidationError::IdenticalDescriptions(
            rules.allow_description.clone(),
        ));
    }
    if rules.allow_priority >= rules.block_priority {
        errors.push(ValidationError::PriorityOrder {
            allow: rules.allow_priority,
            block: rules.block_priority,
        });
    }
    if rules.block_expression.is_empty() {
        errors.push(ValidationError::EmptyBlockExpression);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> SyncConfig {
        let mut config = SyncConfig::default();
        config.api.email = "ops@example.com".to_string();
        config.api.api_key = "secret".to_string();
        config.api.zone_id = "abc123".to_string();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_credentials_collects_all_errors() {
        let config = SyncConfig::default();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3); // zone id, email, api key
    }

    #[test]
    fn test_priority_inversion_rejected() {
        let mut config = valid_config();
        config.rules.allow_priority = 5;
        config.rules.block_priority = 2;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::PriorityOrder { allow: 5, block: 2 })));
    }

    #[test]
    fn test_equal_priorities_rejected() {
        let mut config = valid_config();
        config.rules.allow_priority = 2;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_identical_descriptions_rejected() {
        let mut config = valid_config();
        config.rules.block_description = config.rules.allow_description.clone();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::IdenticalDescriptions(_))));
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let mut config = valid_config();
        config.api.base_url = "not a url".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidBaseUrl(_))));
    }
}
