//! Console behavior: acting identities and list page sizes.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Upper bound accepted for any list page size.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Settings for the record lists and mutation defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_page_sizes"))]
pub struct ConsoleConfig {
    /// Actor name recorded for mutations that have no signed-in user.
    #[serde(default = "default_actor")]
    #[validate(length(min = 1))]
    pub default_actor: String,
    /// Handler an incident is reassigned to when escalated.
    #[serde(default = "default_escalation_handler")]
    #[validate(length(min = 1))]
    pub escalation_handler: String,
    /// Rows per page on the incident list.
    #[serde(default = "default_incident_page_size")]
    pub incident_page_size: u64,
    /// Rows per page on the user list.
    #[serde(default = "default_list_page_size")]
    pub user_page_size: u64,
    /// Rows per page on the camera list.
    #[serde(default = "default_list_page_size")]
    pub camera_page_size: u64,
    /// Rows per page on the audit log.
    #[serde(default = "default_audit_page_size")]
    pub audit_page_size: u64,
    /// Largest page size a caller may request.
    #[serde(default = "default_max_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub max_page_size: u64,
}

impl ConsoleConfig {
    /// Clamp a caller-requested page size into `1..=max_page_size`.
    pub fn clamp_page_size(&self, requested: u64) -> u64 {
        requested.clamp(1, self.max_page_size.max(1))
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            default_actor: default_actor(),
            escalation_handler: default_escalation_handler(),
            incident_page_size: default_incident_page_size(),
            user_page_size: default_list_page_size(),
            camera_page_size: default_list_page_size(),
            audit_page_size: default_audit_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn validate_page_sizes(config: &ConsoleConfig) -> Result<(), ValidationError> {
    let sizes = [
        config.incident_page_size,
        config.user_page_size,
        config.camera_page_size,
        config.audit_page_size,
    ];
    if sizes
        .iter()
        .any(|size| *size == 0 || *size > config.max_page_size)
    {
        return Err(ValidationError::new("page_size_out_of_range"));
    }
    Ok(())
}

fn default_actor() -> String {
    "System".to_string()
}

fn default_escalation_handler() -> String {
    "Escalation Team".to_string()
}

fn default_incident_page_size() -> u64 {
    8
}

fn default_list_page_size() -> u64 {
    10
}

fn default_audit_page_size() -> u64 {
    25
}

fn default_max_page_size() -> u64 {
    MAX_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ConsoleConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let config = ConsoleConfig {
            user_page_size: 0,
            ..ConsoleConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clamp_page_size() {
        let config = ConsoleConfig::default();
        assert_eq!(config.clamp_page_size(0), 1);
        assert_eq!(config.clamp_page_size(500), MAX_PAGE_SIZE);
        assert_eq!(config.clamp_page_size(8), 8);
    }
}
