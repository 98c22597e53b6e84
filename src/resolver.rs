//! Environment resolution.
//!
//! The active environment is never stored: every read recomputes it from
//! three host facts in increasing priority.
//!
//! 1. The hostname picks the base: the production environment on a
//!    production domain, the default environment elsewhere.
//! 2. A known environment persisted in the store overrides the base.
//! 3. A known environment in the URL query parameter overrides everything.
//!
//! Unknown names from the store or URL are ignored. Without a location
//! provider the default environment is returned unconditionally.

use crate::error::{ResolverError, ResolverResult};
use crate::host::{KeyValueStore, LocationProvider};
use crate::observability::Logger;
use crate::options::ResolverOptions;
use crate::sync::{rewrite_query_param, SyncScheduler};
use crate::table::EnvironmentTable;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything the factory needs: the environment table plus options.
///
/// Deserializes from the flat shape
/// `{ "environments": {...}, "param_name": ..., ... }`; the original option
/// names (`envConfig`, `paramName`, ...) are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Environment name to settings.
    #[serde(default, alias = "envConfig")]
    pub environments: EnvironmentTable,
    /// Resolution options.
    #[serde(flatten)]
    pub options: ResolverOptions,
}

/// Host capabilities handed to the resolver. Either may be missing.
#[derive(Clone, Default)]
pub struct Host {
    /// Current page location.
    pub location: Option<Arc<dyn LocationProvider>>,
    /// Persistent key-value store.
    pub store: Option<Arc<dyn KeyValueStore>>,
}

impl Host {
    /// A host with no capabilities (server-side rendering, tests, CLIs).
    pub fn none() -> Self {
        Self::default()
    }

    /// A host with both a location and a store.
    pub fn new(location: Arc<dyn LocationProvider>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            location: Some(location),
            store: Some(store),
        }
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("location", &self.location.is_some())
            .field("store", &self.store.is_some())
            .finish()
    }
}

/// Create a resolver from a configuration and the available host capabilities.
pub fn create_env_resolver(config: ResolverConfig, host: Host) -> EnvironmentResolver {
    let mut builder = EnvironmentResolver::builder(config.environments).options(config.options);
    builder.location = host.location;
    builder.store = host.store;
    builder.build()
}

/// Builder for [`EnvironmentResolver`].
pub struct ResolverBuilder {
    table: EnvironmentTable,
    options: ResolverOptions,
    location: Option<Arc<dyn LocationProvider>>,
    store: Option<Arc<dyn KeyValueStore>>,
    scheduler: Option<Arc<dyn SyncScheduler>>,
    journal: Option<PathBuf>,
}

impl ResolverBuilder {
    /// Resolution options.
    pub fn options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Location provider of the host.
    pub fn location(mut self, location: Arc<dyn LocationProvider>) -> Self {
        self.location = Some(location);
        self
    }

    /// Persistent store of the host.
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Timer facility for URL rewrites. Defaults to
    /// [`TokioScheduler`](crate::sync::TokioScheduler) with the `runtime`
    /// feature, [`InlineScheduler`](crate::sync::InlineScheduler) otherwise.
    pub fn scheduler(mut self, scheduler: Arc<dyn SyncScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Journal resolutions and switches to a markdown file.
    pub fn journal(mut self, path: &Path) -> Self {
        self.journal = Some(path.to_path_buf());
        self
    }

    /// Finish building.
    pub fn build(self) -> EnvironmentResolver {
        let mut logger = Logger::new(self.options.enable_log);
        if let Some(path) = &self.journal {
            logger = logger.with_journal(path);
        }

        EnvironmentResolver {
            table: self.table,
            options: self.options,
            location: self.location,
            store: self.store,
            scheduler: self.scheduler.unwrap_or_else(default_scheduler),
            logger,
        }
    }
}

#[cfg(feature = "runtime")]
fn default_scheduler() -> Arc<dyn SyncScheduler> {
    Arc::new(crate::sync::TokioScheduler::new())
}

#[cfg(not(feature = "runtime"))]
fn default_scheduler() -> Arc<dyn SyncScheduler> {
    Arc::new(crate::sync::InlineScheduler)
}

/// Resolves the active environment and exposes its configuration.
pub struct EnvironmentResolver {
    table: EnvironmentTable,
    options: ResolverOptions,
    location: Option<Arc<dyn LocationProvider>>,
    store: Option<Arc<dyn KeyValueStore>>,
    scheduler: Arc<dyn SyncScheduler>,
    logger: Logger,
}

impl fmt::Debug for EnvironmentResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentResolver")
            .field("environments", &self.table.names())
            .field("options", &self.options)
            .field("location", &self.location.is_some())
            .field("store", &self.store.is_some())
            .finish()
    }
}

impl EnvironmentResolver {
    /// Start building a resolver over `table`.
    pub fn builder(table: EnvironmentTable) -> ResolverBuilder {
        ResolverBuilder {
            table,
            options: ResolverOptions::default(),
            location: None,
            store: None,
            scheduler: None,
            journal: None,
        }
    }

    /// The environment table.
    pub fn table(&self) -> &EnvironmentTable {
        &self.table
    }

    /// The resolver options.
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve the active environment name. Has no side effects.
    pub fn current_env(&self) -> String {
        let Some(location) = &self.location else {
            return self.options.default_env.clone();
        };

        let hostname = location.hostname();
        let mut current = if self.options.is_production_host(&hostname) {
            self.options.production_env.clone()
        } else {
            self.options.default_env.clone()
        };
        self.logger.domain_default(&hostname, &current);

        if let Some(saved) = self
            .store
            .as_ref()
            .and_then(|store| store.get(self.options.storage_key()))
        {
            if self.table.contains(&saved) {
                self.logger.storage_override(&saved);
                current = saved;
            } else {
                self.logger.override_ignored("storage", &saved);
            }
        }

        if let Some(url_env) = location.query_param(&self.options.param_name) {
            if self.table.contains(&url_env) {
                self.logger.url_override(&url_env);
                current = url_env;
            } else {
                self.logger.override_ignored("url", &url_env);
            }
        }

        current
    }

    /// Configuration of the active environment.
    ///
    /// With `key` the named field of the entry is returned, otherwise the
    /// whole entry. The resolved name is persisted and mirrored into the URL
    /// as a side effect.
    pub fn config(&self, key: Option<&str>) -> Option<&Value> {
        let env = self.current_env();
        self.persist(&env);
        self.sync_url_params(&env);

        let settings = self.table.get(&env);
        self.logger.resolved(&env, settings);

        match key {
            Some(key) => settings.and_then(|s| s.get(key)),
            None => settings,
        }
    }

    /// Shorthand for `config(Some(key))`.
    pub fn config_value(&self, key: &str) -> Option<&Value> {
        self.config(Some(key))
    }

    /// Shorthand for `config(None)`.
    pub fn entry(&self) -> Option<&Value> {
        self.config(None)
    }

    /// Whether the active environment is the production environment.
    pub fn is_production(&self) -> bool {
        self.current_env() == self.options.production_env
    }

    /// Whether the current hostname is a production domain.
    pub fn is_production_domain(&self) -> bool {
        self.location
            .as_ref()
            .map(|location| self.options.is_production_host(&location.hostname()))
            .unwrap_or(false)
    }

    /// Switch to `env`, returning whether it is a known environment.
    pub fn switch_env(&self, env: &str) -> bool {
        self.try_switch_env(env).is_ok()
    }

    /// Switch to `env`: persist it and mirror it into the URL.
    ///
    /// Unknown environments are rejected without any side effect.
    pub fn try_switch_env(&self, env: &str) -> ResolverResult<()> {
        let Some(settings) = self.table.get(env) else {
            self.logger.switch_rejected(env);
            return Err(ResolverError::UnknownEnvironment(env.to_string()));
        };

        self.persist(env);
        self.sync_url_params(env);
        self.logger.switched(env, Some(settings));
        Ok(())
    }

    /// All environment names in table order.
    pub fn available_envs(&self) -> Vec<String> {
        self.table.names()
    }

    /// Schedule a rewrite of the URL query parameter to `env`.
    ///
    /// Skipped without a location provider, when URL parameters are
    /// disabled, and on production domains, which keep a clean URL.
    pub fn sync_url_params(&self, env: &str) {
        if !self.options.show_url_params {
            return;
        }
        let Some(location) = &self.location else {
            return;
        };
        if self.options.is_production_host(&location.hostname()) {
            return;
        }

        let delay = self.options.sync_delay();
        self.logger.url_sync_scheduled(env, delay);

        let location = Arc::clone(location);
        let param = self.options.param_name.clone();
        let env = env.to_string();
        let logger = self.logger.clone();
        self.scheduler.schedule(
            delay,
            Box::new(move || {
                match rewrite_query_param(&location.current_url(), &param, &env) {
                    Ok(url) => location.replace_url(&url),
                    Err(e) => logger.url_sync_failed(&e),
                }
            }),
        );
    }

    /// A live view whose reads always reflect the active environment.
    pub fn create_config(&self) -> DynamicConfig<'_> {
        DynamicConfig { resolver: self }
    }

    fn persist(&self, env: &str) {
        if let Some(store) = &self.store {
            store.set(self.options.storage_key(), env);
        }
    }
}

/// Live configuration view returned by [`EnvironmentResolver::create_config`].
#[derive(Debug, Clone, Copy)]
pub struct DynamicConfig<'a> {
    resolver: &'a EnvironmentResolver,
}

impl<'a> DynamicConfig<'a> {
    /// The whole entry of the active environment, resolved on each call.
    pub fn url(&self) -> Option<&'a Value> {
        self.resolver.config(None)
    }

    /// A field of the active entry, resolved on each call.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.resolver.config(Some(key))
    }
}
