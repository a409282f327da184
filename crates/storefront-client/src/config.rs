//! Client configuration loaded from environment variables.
//!
//! Everything has a default so the client starts with zero configuration
//! against a backend on the local machine.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use storefront_shared::constants::{
    DEFAULT_PAGE_SIZE, DESKTOP_BASE_URL, EMULATOR_BASE_URL, REQUEST_TIMEOUT_SECS,
};

/// Where the client runs, which decides how the backend is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// Same machine as the backend; plain loopback.
    #[default]
    Desktop,
    /// Android emulator, which sees the host loopback as `10.0.2.2`.
    AndroidEmulator,
}

impl Target {
    pub fn default_base_url(self) -> &'static str {
        match self {
            Target::Desktop => DESKTOP_BASE_URL,
            Target::AndroidEmulator => EMULATOR_BASE_URL,
        }
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" => Ok(Target::Desktop),
            "android-emulator" | "android" | "emulator" => Ok(Target::AndroidEmulator),
            other => Err(format!("unknown target `{other}`")),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Env: `STOREFRONT_TARGET` (`desktop` / `android-emulator`)
    /// Default: `desktop`
    pub target: Target,

    /// Base URL of the remote API, without a trailing slash.
    /// Env: `STOREFRONT_API_URL`
    /// Default: chosen by [`Target::default_base_url`].
    pub api_base_url: String,

    /// Explicit database file. `None` means the platform data directory.
    /// Env: `STOREFRONT_DB_PATH`
    pub db_path: Option<PathBuf>,

    /// Env: `STOREFRONT_TIMEOUT_SECS`
    /// Default: `30`
    pub request_timeout: Duration,

    /// Env: `STOREFRONT_PAGE_SIZE`
    /// Default: `50`
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            target: Target::Desktop,
            api_base_url: Target::Desktop.default_base_url().to_string(),
            db_path: None,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("STOREFRONT_TARGET") {
            match raw.parse::<Target>() {
                Ok(target) => {
                    config.target = target;
                    config.api_base_url = target.default_base_url().to_string();
                }
                Err(e) => tracing::warn!(value = %raw, error = %e, "Invalid STOREFRONT_TARGET, using default"),
            }
        }

        if let Some(url) = lookup("STOREFRONT_API_URL") {
            let url = url.trim().trim_end_matches('/');
            if !url.is_empty() {
                config.api_base_url = url.to_string();
            }
        }

        if let Some(path) = lookup("STOREFRONT_DB_PATH") {
            if !path.trim().is_empty() {
                config.db_path = Some(PathBuf::from(path));
            }
        }

        if let Some(val) = lookup("STOREFRONT_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %val, "Invalid STOREFRONT_TIMEOUT_SECS, using default"),
            }
        }

        if let Some(val) = lookup("STOREFRONT_PAGE_SIZE") {
            match val.parse::<u32>() {
                Ok(n) if n > 0 => config.page_size = n,
                _ => tracing::warn!(value = %val, "Invalid STOREFRONT_PAGE_SIZE, using default"),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = config_from(&[]);
        assert_eq!(config.target, Target::Desktop);
        assert_eq!(config.api_base_url, DESKTOP_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.page_size, 50);
        assert!(config.db_path.is_none());
    }

    #[test]
    fn test_emulator_target_switches_base_url() {
        let config = config_from(&[("STOREFRONT_TARGET", "android-emulator")]);
        assert_eq!(config.target, Target::AndroidEmulator);
        assert_eq!(config.api_base_url, EMULATOR_BASE_URL);
    }

    #[test]
    fn test_explicit_url_wins_over_target() {
        let config = config_from(&[
            ("STOREFRONT_TARGET", "emulator"),
            ("STOREFRONT_API_URL", "https://shop.example.com/api/v1/"),
            ("STOREFRONT_DB_PATH", "/tmp/shop.db"),
        ]);
        assert_eq!(config.api_base_url, "https://shop.example.com/api/v1");
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/shop.db")));
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = config_from(&[
            ("STOREFRONT_TARGET", "toaster"),
            ("STOREFRONT_TIMEOUT_SECS", "soon"),
            ("STOREFRONT_PAGE_SIZE", "0"),
        ]);
        assert_eq!(config.target, Target::Desktop);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.page_size, 50);
    }
}
