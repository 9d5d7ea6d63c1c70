//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Process configuration for the billing API
///
/// Read once at startup; the request pipeline never touches the filesystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address the HTTP host binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Email domains rejected as disposable by the composition customer
    /// validator (the declarative table intentionally does not check these)
    #[serde(default)]
    pub blocked_email_domains: Vec<String>,
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Create the default configuration
    pub fn default_config() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            blocked_email_domains: vec![
                "mailinator.com".to_string(),
                "guerrillamail.com".to_string(),
                "10minutemail.com".to_string(),
            ],
        }
    }

}
