//! Option overrides from `.env` files and the process environment.

use crate::options::ResolverOptions;
use std::env;
use std::path::Path;

/// Prefix shared by every override variable.
pub const ENV_PREFIX: &str = "ENVSWITCH_";

/// Loads `.env` files and applies `ENVSWITCH_*` variables to options.
#[derive(Debug, Clone)]
pub struct EnvironmentLoader {
    env_file: Option<String>,
}

impl EnvironmentLoader {
    /// Initialize the environment loader.
    ///
    /// # Arguments
    /// * `env_file` - Path to a .env file. Only an explicit path is loaded.
    pub fn new(env_file: Option<&Path>) -> Self {
        if let Some(path) = env_file {
            if path.exists() {
                if let Err(e) = dotenv::from_path(path) {
                    tracing::warn!(target: "envswitch", "Failed to load .env file {}: {}", path.display(), e);
                }
            }
        }

        Self {
            env_file: env_file.map(|p| p.to_string_lossy().to_string()),
        }
    }

    /// The .env file this loader was created with.
    pub fn env_file(&self) -> Option<&str> {
        self.env_file.as_deref()
    }

    /// Override `options` from `ENVSWITCH_*` variables.
    ///
    /// Values that fail to parse are ignored with a warning.
    pub fn apply(&self, options: &mut ResolverOptions) {
        if let Some(value) = var("PARAM_NAME") {
            options.param_name = value;
        }
        if let Some(value) = var("STORAGE_KEY") {
            options.storage_key = Some(value);
        }
        if let Some(value) = var("DEFAULT_ENV") {
            options.default_env = value;
        }
        if let Some(value) = var("PRODUCTION_ENV") {
            options.production_env = value;
        }
        if let Some(value) = var("PRODUCTION_DOMAINS") {
            options.production_domains = value
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(value) = parsed_var("SHOW_URL_PARAMS", parse_bool) {
            options.show_url_params = value;
        }
        if let Some(value) = parsed_var("SYNC_DELAY_MS", |v| v.parse::<u64>().ok()) {
            options.sync_delay_ms = value;
        }
        if let Some(value) = parsed_var("ENABLE_LOG", parse_bool) {
            options.enable_log = value;
        }
    }
}

impl Default for EnvironmentLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

fn var(name: &str) -> Option<String> {
    env::var(format!("{}{}", ENV_PREFIX, name))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

fn parsed_var<T>(name: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let raw = var(name)?;
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        tracing::warn!(target: "envswitch", "Ignoring invalid {}{}={}", ENV_PREFIX, name, raw);
    }
    parsed
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 8] = [
        "PARAM_NAME",
        "STORAGE_KEY",
        "DEFAULT_ENV",
        "PRODUCTION_ENV",
        "PRODUCTION_DOMAINS",
        "SHOW_URL_PARAMS",
        "SYNC_DELAY_MS",
        "ENABLE_LOG",
    ];

    fn clear_vars() {
        for name in VARS {
            env::remove_var(format!("{}{}", ENV_PREFIX, name));
        }
    }

    // Environment variables are process-global, so every case lives in one test.
    #[test]
    fn test_env_overrides() {
        clear_vars();
        let loader = EnvironmentLoader::default();
        let mut options = ResolverOptions::default();
        loader.apply(&mut options);
        assert_eq!(options, ResolverOptions::default());

        env::set_var("ENVSWITCH_PARAM_NAME", "env");
        env::set_var("ENVSWITCH_DEFAULT_ENV", "test");
        env::set_var("ENVSWITCH_PRODUCTION_DOMAINS", "prod.example.com, www.example.com,");
        env::set_var("ENVSWITCH_SHOW_URL_PARAMS", "off");
        env::set_var("ENVSWITCH_SYNC_DELAY_MS", "250");
        env::set_var("ENVSWITCH_ENABLE_LOG", "maybe");

        let mut options = ResolverOptions::default();
        loader.apply(&mut options);
        assert_eq!(options.param_name, "env");
        assert_eq!(options.storage_key(), "env");
        assert_eq!(options.default_env, "test");
        assert_eq!(options.production_domains.len(), 2);
        assert!(options.is_production_host("www.example.com"));
        assert!(!options.show_url_params);
        assert_eq!(options.sync_delay_ms, 250);
        // Unparseable value leaves the default in place.
        assert!(options.enable_log);

        env::set_var("ENVSWITCH_SYNC_DELAY_MS", "-5");
        let mut options = ResolverOptions::default();
        loader.apply(&mut options);
        assert_eq!(options.sync_delay_ms, 100);

        clear_vars();
    }

    #[test]
    fn test_env_file_loading() {
        let loader = EnvironmentLoader::new(None);
        assert!(loader.env_file().is_none());

        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(".env");
        std::fs::write(&path, "ENVSWITCH_TEST_ONLY_MARKER=loaded\n").unwrap();

        let loader = EnvironmentLoader::new(Some(&path));
        assert!(loader.env_file().is_some());
        assert_eq!(
            env::var("ENVSWITCH_TEST_ONLY_MARKER").ok(),
            Some("loaded".to_string())
        );
        env::remove_var("ENVSWITCH_TEST_ONLY_MARKER");
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("nah"), None);
    }
}
