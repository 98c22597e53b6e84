//! TOML and JSON configuration parsing.

use crate::resolver::ResolverConfig;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/envswitch.toml";

/// Loads and holds a [`ResolverConfig`].
#[derive(Debug)]
pub struct ResolverConfigLoader {
    /// Path the configuration was read from.
    pub config_path: PathBuf,
    /// The loaded configuration.
    pub config: ResolverConfig,
}

impl ResolverConfigLoader {
    /// Initialize configuration loader.
    ///
    /// # Arguments
    /// * `config_path` - Path to a `.toml` or `.json` file. If None, uses
    ///   `config/envswitch.toml`. A missing file yields the default
    ///   configuration: an empty table and default options.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config_path = config_path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let config = if config_path.exists() {
            Self::load_config(&config_path)?
        } else {
            ResolverConfig::default()
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Create a loader from an already parsed configuration.
    pub fn from_config(config: ResolverConfig) -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            config,
        }
    }

    /// Load configuration from a file, choosing the format by extension.
    fn load_config(path: &Path) -> Result<ResolverConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::parse_json(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display())),
            Some("toml") | None => Self::parse_toml(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            Some(other) => bail!(
                "Unsupported config format '{}': {}",
                other,
                path.display()
            ),
        }
    }

    /// Parse a TOML document.
    pub fn parse_toml(content: &str) -> Result<ResolverConfig> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a JSON document.
    pub fn parse_json(content: &str) -> Result<ResolverConfig> {
        Ok(serde_json::from_str(content)?)
    }

    /// Get a string option by name.
    pub fn get_string(&self, key: &str) -> Option<String> {
        let options = &self.config.options;
        match key {
            "param_name" => Some(options.param_name.clone()),
            "storage_key" => Some(options.storage_key().to_string()),
            "default_env" => Some(options.default_env.clone()),
            "production_env" => Some(options.production_env.clone()),
            _ => None,
        }
    }

    /// Get a numeric option by name.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        match key {
            "sync_delay_ms" => Some(self.config.options.sync_delay_ms),
            _ => None,
        }
    }

    /// Get a boolean option by name.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match key {
            "show_url_params" => Some(self.config.options.show_url_params),
            "enable_log" => Some(self.config.options.enable_log),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let loader = ResolverConfigLoader::new(Some(&temp_dir.path().join("absent.toml"))).unwrap();

        assert!(loader.config.environments.is_empty());
        assert_eq!(loader.get_string("param_name"), Some("apiSwitch".to_string()));
        assert_eq!(loader.get_string("storage_key"), Some("apiSwitch".to_string()));
        assert_eq!(loader.get_string("default_env"), Some("pre".to_string()));
        assert_eq!(loader.get_string("production_env"), Some("prod".to_string()));
        assert_eq!(loader.get_u64("sync_delay_ms"), Some(100));
        assert_eq!(loader.get_bool("show_url_params"), Some(true));
        assert_eq!(loader.get_bool("enable_log"), Some(true));
        assert_eq!(loader.get_string("unknown"), None);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_content = r#"
production_domains = ["prod.example.com", "www.example.com"]
param_name = "env"
default_env = "test"
sync_delay_ms = 250
enable_log = false

[environments.test]
baseURL = "https://api.test.com"
timeout = 10000
debug = true

[environments.prod]
baseURL = "https://api.prod.com"
timeout = 5000
debug = false
"#;

        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("envswitch.toml");
        fs::write(&path, toml_content).unwrap();

        let loader = ResolverConfigLoader::new(Some(&path)).unwrap();
        let config = &loader.config;
        assert_eq!(config.environments.names(), vec!["test", "prod"]);
        assert_eq!(
            config.environments.get("prod"),
            Some(&json!({"baseURL": "https://api.prod.com", "timeout": 5000, "debug": false}))
        );
        assert!(config.options.is_production_host("www.example.com"));
        assert_eq!(loader.get_string("storage_key"), Some("env".to_string()));
        assert_eq!(loader.get_u64("sync_delay_ms"), Some(250));
        assert_eq!(loader.get_bool("enable_log"), Some(false));
        assert_eq!(loader.get_string("production_env"), Some("prod".to_string()));
    }

    #[test]
    fn test_config_from_json_with_original_names() {
        let json_content = r#"{
            "envConfig": {
                "prod": {"baseURL": "https://api.prod.com"},
                "pre": {"baseURL": "https://api.pre.com"}
            },
            "productionDomains": ["prod.example.com"],
            "showUrlParams": false,
            "syncDelay": 0
        }"#;

        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("envswitch.json");
        fs::write(&path, json_content).unwrap();

        let loader = ResolverConfigLoader::new(Some(&path)).unwrap();
        assert_eq!(loader.config.environments.names(), vec!["prod", "pre"]);
        assert_eq!(loader.get_bool("show_url_params"), Some(false));
        assert_eq!(loader.get_u64("sync_delay_ms"), Some(0));
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "environments = [").unwrap();

        let err = ResolverConfigLoader::new(Some(temp_file.path())).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse TOML config"));
    }

    #[test]
    fn test_unsupported_extension() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("envswitch.yaml");
        fs::write(&path, "param_name: env").unwrap();

        let err = ResolverConfigLoader::new(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Unsupported config format 'yaml'"));
    }
}
