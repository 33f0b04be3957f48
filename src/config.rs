use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which generation of the status service API to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    /// `/api/containers` with start/stop/restart endpoints
    V0,
    /// `/api/v1/monitor`, read-only
    #[default]
    V1,
}

impl ApiVersion {
    pub fn containers_path(&self) -> &'static str {
        match self {
            ApiVersion::V0 => "/api/containers",
            ApiVersion::V1 => "/api/v1/monitor",
        }
    }

    pub fn supports_actions(&self) -> bool {
        matches!(self, ApiVersion::V0)
    }
}

/// How the log modal gets its content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogMode {
    /// Live WebSocket stream, one frame per line
    Stream,
    /// One-shot fetch of recent log text
    #[default]
    Snapshot,
}

pub const MIN_POLL_INTERVAL_SECS: u64 = 5;
pub const MAX_POLL_INTERVAL_SECS: u64 = 10;

/// Dashboard configuration, loaded from config.yaml and overridden by flags
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Base URL of the status service, e.g. `http://127.0.0.1:8000`
    pub base_url: String,
    pub api_version: ApiVersion,
    pub log_mode: LogMode,
    pub poll_interval_secs: u64,
    /// Delay before re-polling after a control action
    pub action_refresh_delay_ms: u64,
    pub request_timeout_secs: u64,
    /// Explicit override; otherwise derived from the API version
    pub actions: Option<bool>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            api_version: ApiVersion::default(),
            log_mode: LogMode::default(),
            poll_interval_secs: MIN_POLL_INTERVAL_SECS,
            action_refresh_delay_ms: 500,
            request_timeout_secs: 30,
            actions: None,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .context(format!("Failed to read config: {:?}", path.as_ref()))?;
        let config: DashboardConfig =
            serde_yaml::from_str(&content).context("Failed to parse config YAML")?;
        Ok(config)
    }

    /// Load the explicit file if given, else the default location if it exists
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load(path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url)
            .context(format!("Invalid base URL: {}", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("Base URL must be http or https, got {}", url.scheme());
        }
        if !(MIN_POLL_INTERVAL_SECS..=MAX_POLL_INTERVAL_SECS).contains(&self.poll_interval_secs) {
            bail!(
                "Poll interval must be between {} and {} seconds, got {}",
                MIN_POLL_INTERVAL_SECS,
                MAX_POLL_INTERVAL_SECS,
                self.poll_interval_secs
            );
        }
        if self.request_timeout_secs == 0 {
            bail!("Request timeout must be at least one second");
        }
        Ok(())
    }

    pub fn actions_enabled(&self) -> bool {
        self.actions.unwrap_or_else(|| self.api_version.supports_actions())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn action_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.action_refresh_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// `<config dir>/dockey/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dockey").join("config.yaml"))
}

/// `<cache dir>/dockey/dockey.log`
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("dockey").join("dockey.log"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.api_version, ApiVersion::V1);
        assert_eq!(config.log_mode, LogMode::Snapshot);
        assert_eq!(config.poll_interval_secs, 5);
        assert!(!config.actions_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_version: v0\nlog_mode: stream").unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.api_version, ApiVersion::V0);
        assert_eq!(config.log_mode, LogMode::Stream);
        assert_eq!(config.action_refresh_delay_ms, 500);
        assert!(config.actions_enabled());
    }

    #[test]
    fn test_actions_override() {
        let config = DashboardConfig {
            actions: Some(true),
            ..Default::default()
        };
        assert!(config.actions_enabled());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = DashboardConfig {
            poll_interval_secs: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = DashboardConfig {
            base_url: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = DashboardConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = DashboardConfig::load_or_default(Some(Path::new("/nonexistent/dockey.yaml")));
        assert!(result.is_err());
    }
}
