#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_SERVER_PORT: u16 = 8080;
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Default document location, served by the local application itself.
pub fn default_open_api_url(server_port: u16) -> String {
    format!("http://localhost:{}/v3/api-docs", server_port)
}

/// Fully resolved loader settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub open_api_url: String,
    pub server_port: u16,
    pub refresh_initial_delay: Duration,
    pub refresh_interval: Duration,
    pub request_timeout: Option<Duration>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            open_api_url: default_open_api_url(DEFAULT_SERVER_PORT),
            server_port: DEFAULT_SERVER_PORT,
            refresh_initial_delay: DEFAULT_INITIAL_DELAY,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            request_timeout: None,
        }
    }
}

impl LoaderConfig {
    /// 以檔案內容覆蓋預設值，未指定 URL 時依 port 推導
    pub fn from_toml(file: &TomlConfig) -> Self {
        let server_port = file.server.port.unwrap_or(DEFAULT_SERVER_PORT);
        Self {
            open_api_url: file
                .loader
                .open_api_url
                .clone()
                .unwrap_or_else(|| default_open_api_url(server_port)),
            server_port,
            refresh_initial_delay: file
                .loader
                .refresh_initial_delay
                .unwrap_or(DEFAULT_INITIAL_DELAY),
            refresh_interval: file.loader.refresh_interval.unwrap_or(DEFAULT_REFRESH_INTERVAL),
            request_timeout: file.loader.request_timeout,
        }
    }
}

impl ConfigProvider for LoaderConfig {
    fn open_api_url(&self) -> &str {
        &self.open_api_url
    }

    fn refresh_initial_delay(&self) -> Duration {
        self.refresh_initial_delay
    }

    fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

impl Validate for LoaderConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("open_api_url", &self.open_api_url)?;
        validation::validate_range("server.port", self.server_port, 1, u16::MAX)?;
        validation::validate_non_zero_duration("refresh_interval", self.refresh_interval)?;
        if let Some(timeout) = self.request_timeout {
            validation::validate_non_zero_duration("request_timeout", timeout)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedDelaySchedule;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = LoaderConfig::default();
        assert_eq!(config.open_api_url, "http://localhost:8080/v3/api-docs");
        assert_eq!(config.refresh_initial_delay, Duration::from_secs(300));
        assert_eq!(config.refresh_interval, Duration::from_secs(1800));
        assert!(config.request_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_url_derived_from_file_port() {
        let file = TomlConfig::from_toml_str("[server]\nport = 9191\n").unwrap();
        let config = LoaderConfig::from_toml(&file);
        assert_eq!(config.open_api_url, "http://localhost:9191/v3/api-docs");
        assert_eq!(config.schedule(), FixedDelaySchedule::new(DEFAULT_INITIAL_DELAY, DEFAULT_REFRESH_INTERVAL));
    }

    #[test]
    fn test_config_validation() {
        let mut config = LoaderConfig {
            open_api_url: "invalid-url".to_string(),
            ..LoaderConfig::default()
        };
        assert!(config.validate().is_err());

        config.open_api_url = "https://api.example.com/v3/api-docs".to_string();
        config.refresh_interval = Duration::ZERO;
        assert!(config.validate().is_err());

        config.refresh_interval = Duration::from_secs(60);
        config.refresh_initial_delay = Duration::ZERO;
        assert!(config.validate().is_ok());

        config.request_timeout = Some(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
