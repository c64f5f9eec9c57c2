//! CLI settings

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use ticketdesk_client::BaseUrl;

/// Prefix of environment overrides, e.g. `TICKETDESK_TIMEOUT_SECS`
pub const ENV_PREFIX: &str = "TICKETDESK";

/// File name looked up in the work dir when no config path is given
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Settings shared by all subcommands
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// API base address; the client's environment lookup is used when unset
    pub base_url: Option<String>,
    /// Default request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Proxy for all requests
    pub proxy: Option<String>,
}

impl Settings {
    /// Load defaults, then the TOML file at `path` if it exists, then
    /// `TICKETDESK_*` environment overrides
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    /// Resolve the base address, an explicit `override_url` wins
    pub fn base_url(&self, override_url: Option<&str>) -> BaseUrl {
        match override_url.or(self.base_url.as_deref()) {
            Some(url) => BaseUrl::resolve(Some(url)),
            None => BaseUrl::from_env(),
        }
    }

    /// Default request timeout, if configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = Settings::load(&dir.path().join("absent.toml")).expect("settings");
        assert_eq!(settings.timeout(), None);
        assert_eq!(settings.proxy, None);
    }

    #[test]
    fn test_file_values_are_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "base_url = \"https://desk.example.com/api\"\ntimeout_secs = 15\n",
        )
        .expect("write config");

        let settings = Settings::load(&path).expect("settings");
        assert_eq!(settings.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(
            settings.base_url(None).as_str(),
            "https://desk.example.com/api"
        );
    }

    #[test]
    fn test_override_wins_over_file() {
        let settings = Settings {
            base_url: Some("https://desk.example.com/api".to_string()),
            ..Default::default()
        };
        assert_eq!(
            settings.base_url(Some("http://127.0.0.1:8000/api")).as_str(),
            "http://127.0.0.1:8000/api"
        );
    }

    #[test]
    fn test_empty_configured_url_falls_back() {
        let settings = Settings {
            base_url: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            settings.base_url(None).as_str(),
            ticketdesk_client::DEFAULT_BASE_URL
        );
    }
}
