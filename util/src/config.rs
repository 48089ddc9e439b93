//! Application configuration.
//!
//! `AppConfig` holds the runtime configuration values loaded from `.env` and the
//! process environment. It is built once at startup and handed to whatever needs
//! it; there is no global instance.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub host: String,
    pub port: u16,
    /// Empty when no external grading provider is configured.
    pub deepseek_api_key: String,
    pub deepseek_base_url: String,
    pub deepseek_model: String,
    pub provider_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: "development".into(),
            project_name: "essay-grader".into(),
            log_level: "api=info,marker=info".into(),
            log_file: "api.log".into(),
            log_to_stdout: false,
            host: "127.0.0.1".into(),
            port: 3000,
            deepseek_api_key: String::new(),
            deepseek_base_url: "https://api.deepseek.com".into(),
            deepseek_model: "deepseek-chat".into(),
            provider_timeout_ms: 30_000,
        }
    }
}

/// Reads `key` and parses it, keeping `default` when it is unset or unparsable.
fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Every value has a default, so this never fails.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Self {
            env: env::var("APP_ENV").unwrap_or(defaults.env),
            project_name: env::var("PROJECT_NAME").unwrap_or(defaults.project_name),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_file: env::var("LOG_FILE").unwrap_or(defaults.log_file),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parsed_or("PORT", defaults.port),
            deepseek_api_key: env::var("DEEPSEEK_API_KEY")
                .map(|key| key.trim().to_string())
                .unwrap_or_default(),
            deepseek_base_url: env::var("DEEPSEEK_BASE_URL").unwrap_or(defaults.deepseek_base_url),
            deepseek_model: env::var("DEEPSEEK_MODEL").unwrap_or(defaults.deepseek_model),
            provider_timeout_ms: parsed_or("PROVIDER_TIMEOUT_MS", defaults.provider_timeout_ms),
        }
    }

    /// True when an API key for the external grading provider is present.
    pub fn has_provider(&self) -> bool {
        !self.deepseek_api_key.is_empty()
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    /// `host:port`, ready for a socket bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: &[&str] = &[
        "APP_ENV",
        "PROJECT_NAME",
        "LOG_LEVEL",
        "LOG_FILE",
        "LOG_TO_STDOUT",
        "HOST",
        "PORT",
        "DEEPSEEK_API_KEY",
        "DEEPSEEK_BASE_URL",
        "DEEPSEEK_MODEL",
        "PROVIDER_TIMEOUT_MS",
    ];

    fn clear_env() {
        for key in KEYS {
            unsafe { env::remove_var(key) };
        }
    }

    #[test]
    #[serial]
    fn defaults_when_nothing_is_set() {
        clear_env();
        let config = AppConfig::from_env();
        assert_eq!(config, AppConfig::default());
        assert!(!config.has_provider());
        assert_eq!(config.provider_timeout(), Duration::from_secs(30));
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    #[serial]
    fn reads_overrides() {
        clear_env();
        unsafe {
            env::set_var("PORT", "8080");
            env::set_var("LOG_TO_STDOUT", "true");
            env::set_var("DEEPSEEK_API_KEY", "  sk-test  ");
            env::set_var("DEEPSEEK_MODEL", "deepseek-reasoner");
            env::set_var("PROVIDER_TIMEOUT_MS", "1500");
        }

        let config = AppConfig::from_env();
        assert_eq!(config.port, 8080);
        assert!(config.log_to_stdout);
        assert_eq!(config.deepseek_api_key, "sk-test");
        assert!(config.has_provider());
        assert_eq!(config.deepseek_model, "deepseek-reasoner");
        assert_eq!(config.provider_timeout(), Duration::from_millis(1500));
        clear_env();
    }

    #[test]
    #[serial]
    fn unparsable_numbers_keep_defaults() {
        clear_env();
        unsafe {
            env::set_var("PORT", "not-a-port");
            env::set_var("PROVIDER_TIMEOUT_MS", "-5");
        }

        let config = AppConfig::from_env();
        assert_eq!(config.port, 3000);
        assert_eq!(config.provider_timeout_ms, 30_000);
        clear_env();
    }
}
