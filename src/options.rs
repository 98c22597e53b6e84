//! Resolver options and their defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Default URL query parameter name.
pub const DEFAULT_PARAM_NAME: &str = "apiSwitch";
/// Default environment on non-production domains.
pub const DEFAULT_ENV: &str = "pre";
/// Default name of the production environment.
pub const DEFAULT_PRODUCTION_ENV: &str = "prod";
/// Default delay before the URL is rewritten.
pub const DEFAULT_SYNC_DELAY_MS: u64 = 100;

/// Options controlling how the active environment is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ResolverOptions {
    /// Hostnames that identify a production deployment.
    #[serde(default, alias = "productionDomains")]
    pub production_domains: BTreeSet<String>,
    /// URL query parameter carrying the environment override.
    #[serde(default = "default_param_name", alias = "paramName")]
    pub param_name: String,
    /// Store key for the persisted environment. Falls back to `param_name`.
    #[serde(default, alias = "storageKey", skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,
    /// Environment used when nothing else applies on non-production domains.
    #[serde(default = "default_env", alias = "defaultEnv")]
    pub default_env: String,
    /// Environment used by default on production domains.
    #[serde(default = "default_production_env", alias = "productionEnv")]
    pub production_env: String,
    /// Mirror the resolved environment into the URL on non-production domains.
    #[serde(default = "default_true", alias = "showUrlParams")]
    pub show_url_params: bool,
    /// Delay before the URL rewrite runs, in milliseconds.
    #[serde(
        default = "default_sync_delay_ms",
        alias = "syncDelay",
        alias = "syncDelayMs"
    )]
    pub sync_delay_ms: u64,
    /// Emit diagnostic events.
    #[serde(default = "default_true", alias = "enableLog")]
    pub enable_log: bool,
}

fn default_param_name() -> String {
    DEFAULT_PARAM_NAME.to_string()
}

fn default_env() -> String {
    DEFAULT_ENV.to_string()
}

fn default_production_env() -> String {
    DEFAULT_PRODUCTION_ENV.to_string()
}

fn default_true() -> bool {
    true
}

fn default_sync_delay_ms() -> u64 {
    DEFAULT_SYNC_DELAY_MS
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            production_domains: BTreeSet::new(),
            param_name: default_param_name(),
            storage_key: None,
            default_env: default_env(),
            production_env: default_production_env(),
            show_url_params: true,
            sync_delay_ms: DEFAULT_SYNC_DELAY_MS,
            enable_log: true,
        }
    }
}

impl ResolverOptions {
    /// Effective store key.
    pub fn storage_key(&self) -> &str {
        self.storage_key.as_deref().unwrap_or(&self.param_name)
    }

    /// URL sync delay as a [`Duration`].
    pub fn sync_delay(&self) -> Duration {
        Duration::from_millis(self.sync_delay_ms)
    }

    /// Whether `hostname` is one of the production domains.
    pub fn is_production_host(&self, hostname: &str) -> bool {
        self.production_domains.contains(hostname)
    }

    /// Set the production domains.
    pub fn with_production_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.production_domains = domains.into_iter().map(Into::into).collect();
        self
    }

    /// Set the URL query parameter name.
    pub fn with_param_name(mut self, name: impl Into<String>) -> Self {
        self.param_name = name.into();
        self
    }

    /// Set an explicit store key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = Some(key.into());
        self
    }

    /// Set the default environment.
    pub fn with_default_env(mut self, env: impl Into<String>) -> Self {
        self.default_env = env.into();
        self
    }

    /// Set the production environment name.
    pub fn with_production_env(mut self, env: impl Into<String>) -> Self {
        self.production_env = env.into();
        self
    }

    /// Enable or disable URL mirroring.
    pub fn with_show_url_params(mut self, show: bool) -> Self {
        self.show_url_params = show;
        self
    }

    /// Set the URL sync delay in milliseconds.
    pub fn with_sync_delay_ms(mut self, delay_ms: u64) -> Self {
        self.sync_delay_ms = delay_ms;
        self
    }

    /// Enable or disable diagnostics.
    pub fn with_enable_log(mut self, enable: bool) -> Self {
        self.enable_log = enable;
        self
    }
}
