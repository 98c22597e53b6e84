//! envswitch - resolve which deployment environment a client should talk to
//!
//! The active environment (for example `prod`, `pre` or `test`) is resolved
//! from three host facts in increasing priority: the hostname (production
//! domains default to the production environment), a persisted choice, and
//! a URL query parameter. The matching settings entry is then exposed to the
//! application.
//!
//! Core modules are always available:
//!
//! - **`resolver`** - the [`EnvironmentResolver`] and its factory
//! - **`host`** - location and storage capability traits with in-memory implementations
//! - **`sync`** - deferred URL query rewriting
//! - **`observability`** - `tracing` diagnostics and an optional markdown journal
//!
//! # Features
//!
//! - **`config`** - load the table and options from TOML/JSON and `ENVSWITCH_*` variables
//! - **`storage`** - a JSON-file backed store
//! - **`runtime`** - a tokio timer that cancels superseded URL rewrites
//!
//! # Example
//!
//! ```
//! use envswitch::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let table = EnvironmentTable::new()
//!     .with("prod", json!({"baseURL": "https://api.prod.com"}))
//!     .with("test", json!({"baseURL": "https://api.test.com"}));
//!
//! let location = Arc::new(StaticLocation::new("http://localhost:3000/?apiSwitch=test").unwrap());
//! let resolver = EnvironmentResolver::builder(table)
//!     .options(ResolverOptions::default().with_production_domains(["prod.example.com"]))
//!     .location(location)
//!     .store(Arc::new(MemoryStore::new()))
//!     .scheduler(Arc::new(InlineScheduler))
//!     .build();
//!
//! assert_eq!(resolver.current_env(), "test");
//! assert!(!resolver.is_production());
//! assert_eq!(resolver.config_value("baseURL"), Some(&json!("https://api.test.com")));
//! ```

#![warn(missing_docs)]

/// Error types
pub mod error;

/// Capability interfaces supplied by the host
pub mod host;

/// Diagnostics
pub mod observability;

/// Resolver options
pub mod options;

/// Environment resolution
pub mod resolver;

/// Deferred URL synchronisation
pub mod sync;

/// The environment table
pub mod table;

/// Configuration files and environment overrides (enabled with the `config` feature)
#[cfg(feature = "config")]
pub mod config;

/// File-backed storage (enabled with the `storage` feature)
#[cfg(feature = "storage")]
pub mod storage;

pub use error::{ResolverError, ResolverResult};
pub use resolver::{create_env_resolver, EnvironmentResolver, Host, ResolverConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{ResolverError, ResolverResult};
    pub use crate::host::{KeyValueStore, LocationProvider, MemoryStore, StaticLocation};
    pub use crate::options::ResolverOptions;
    pub use crate::resolver::{
        create_env_resolver, DynamicConfig, EnvironmentResolver, Host, ResolverBuilder,
        ResolverConfig,
    };
    pub use crate::sync::{InlineScheduler, SyncScheduler};
    pub use crate::table::EnvironmentTable;

    #[cfg(feature = "runtime")]
    pub use crate::sync::TokioScheduler;

    #[cfg(feature = "config")]
    pub use crate::config::{EnvironmentLoader, ResolverConfigLoader};

    #[cfg(feature = "storage")]
    pub use crate::storage::FileStore;
}
