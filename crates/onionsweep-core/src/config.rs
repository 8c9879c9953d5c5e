//! Configuration management for onionsweep.
//!
//! Provides TOML-based configuration with environment variable overrides.
//! The CLI layer applies flag overrides on top of whatever is loaded here.

use crate::error::ConfigResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main scan run configuration.
///
/// Loaded from an optional TOML file; any section or field may be omitted
/// and falls back to its default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// SOCKS5 proxy transport settings
    pub proxy: ProxyConfig,
    /// Worker pool and request settings
    pub scanning: ScanningConfig,
    /// Screenshot capture settings
    pub capture: CaptureConfig,
    /// Output location settings
    pub output: OutputConfig,
}

impl ScanConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// no path is given.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is not valid TOML.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                let contents = fs::read_to_string(path)?;
                let config = toml::from_str(&contents)?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `ONIONSWEEP_PROXY`: Override the SOCKS5 proxy address
    /// - `ONIONSWEEP_WORKERS`: Override the worker count
    /// - `ONIONSWEEP_SCREENSHOTS`: Override screenshot capture (true/false)
    pub fn load_with_env(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = Self::load(path)?;

        if let Ok(val) = std::env::var("ONIONSWEEP_PROXY") {
            if !val.trim().is_empty() {
                tracing::debug!("Override proxy.addr from env: {}", val);
                config.proxy.addr = val;
            }
        }

        if let Ok(val) = std::env::var("ONIONSWEEP_WORKERS") {
            if let Ok(workers) = val.parse() {
                tracing::debug!("Override scanning.workers from env: {}", workers);
                config.scanning.workers = workers;
            }
        }

        if let Ok(val) = std::env::var("ONIONSWEEP_SCREENSHOTS") {
            if let Ok(enabled) = val.parse() {
                tracing::debug!("Override capture.enabled from env: {}", enabled);
                config.capture.enabled = enabled;
            }
        }

        Ok(config)
    }
}

/// SOCKS5 proxy transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// SOCKS5 endpoint as `host:port` (Tor Browser listens on 9150)
    pub addr: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Verify the proxy against the Tor check endpoint before scanning
    pub verify: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9150".to_string(),
            timeout_secs: 30,
            verify: true,
        }
    }
}

/// Worker pool and request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanningConfig {
    /// Number of concurrent workers (values below 1 are clamped to 1)
    pub workers: usize,
    /// User agent string sent by both the fetch client and the browser
    pub user_agent: String,
}

impl ScanningConfig {
    /// Worker count with the lower bound applied.
    #[must_use]
    pub fn effective_workers(&self) -> usize {
        self.workers.max(1)
    }
}

impl Default for ScanningConfig {
    fn default() -> Self {
        Self {
            workers: 5,
            user_agent: "onionsweep/0.1 (research scanner)".to_string(),
        }
    }
}

/// Screenshot capture settings.
///
/// One structured value covers the render engine's options; anything not
/// listed here keeps the engine's defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Capture a screenshot of each reachable target
    pub enabled: bool,
    /// Navigation/render timeout in seconds, independent of the fetch timeout
    pub navigation_timeout_secs: u64,
    /// Fixed wait after page load before capturing, in milliseconds
    pub settle_delay_ms: u64,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            navigation_timeout_secs: 25,
            settle_delay_ms: 800,
            window_width: 1366,
            window_height: 768,
        }
    }
}

/// Output location settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving bodies, screenshots, logs, and reports
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "output".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScanConfig::default();
        assert_eq!(config.proxy.addr, "127.0.0.1:9150");
        assert_eq!(config.proxy.timeout_secs, 30);
        assert!(config.proxy.verify);
        assert_eq!(config.scanning.workers, 5);
        assert!(config.capture.enabled);
        assert_eq!(config.capture.settle_delay_ms, 800);
        assert_eq!(config.output.dir, "output");
    }

    #[test]
    fn test_workers_clamped() {
        let mut config = ScanConfig::default();
        config.scanning.workers = 0;
        assert_eq!(config.scanning.effective_workers(), 1);
        config.scanning.workers = 8;
        assert_eq!(config.scanning.effective_workers(), 8);
    }

    #[test]
    fn test_partial_config() {
        // Partial TOML fills the rest with defaults
        let toml_str = r#"
[proxy]
addr = "127.0.0.1:9050"

[capture]
enabled = false
"#;

        let config: ScanConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.proxy.addr, "127.0.0.1:9050");
        assert!(!config.capture.enabled);
        // These should be defaults
        assert_eq!(config.scanning.workers, 5);
        assert_eq!(config.capture.window_width, 1366);
    }

    #[test]
    fn test_config_serialization() {
        let config = ScanConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[proxy]"));
        assert!(toml_str.contains("[scanning]"));
        assert!(toml_str.contains("[capture]"));

        let parsed: ScanConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.proxy.addr, config.proxy.addr);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::TempDir::new().expect("create temp dir");
        let path = tmp.path().join("onionsweep.toml");
        fs::write(&path, "[scanning]\nworkers = 2\n").expect("write config file");

        let config = ScanConfig::load(Some(&path)).expect("load config");
        assert_eq!(config.scanning.workers, 2);

        let missing = ScanConfig::load(Some(&tmp.path().join("absent.toml")));
        assert!(missing.is_err());
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("ONIONSWEEP_WORKERS", "9");
        std::env::set_var("ONIONSWEEP_SCREENSHOTS", "false");

        let config = ScanConfig::load_with_env(None).expect("load config with env");
        assert_eq!(config.scanning.workers, 9);
        assert!(!config.capture.enabled);

        std::env::remove_var("ONIONSWEEP_WORKERS");
        std::env::remove_var("ONIONSWEEP_SCREENSHOTS");
    }
}
