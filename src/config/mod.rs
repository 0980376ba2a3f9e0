#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, StepCommand};
pub use toml_config::TomlConfig;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://claimr.example.com";
pub const MAX_TIMEOUT_SECONDS: u64 = 3600;

/// Resolved connection settings for the RMA service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: None,
            user_agent: format!("rma-steps/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ServiceSettings {
    /// Layers settings: explicit overrides, then the config file, then defaults.
    pub fn resolve(
        config_file: Option<&TomlConfig>,
        base_url: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self> {
        let mut settings = config_file
            .map(TomlConfig::service_settings)
            .unwrap_or_default();

        if let Some(base_url) = base_url {
            settings.base_url = base_url;
        }
        if timeout_seconds.is_some() {
            settings.timeout_seconds = timeout_seconds;
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl ConfigProvider for ServiceSettings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for ServiceSettings {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
        }
        validate_non_empty_string("user_agent", &self.user_agent)?;
        Ok(())
    }
}
