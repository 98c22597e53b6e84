//! Loading resolver configuration from files and the process environment.
//!
//! This module reads the environment table and resolver options from TOML
//! or JSON files, and applies overrides from `.env` files and environment
//! variables.
//!
//! # Example
//!
//! ```no_run
//! use envswitch::config::{EnvironmentLoader, ResolverConfigLoader};
//! use std::path::Path;
//!
//! // Load the table and options from TOML
//! let mut loader = ResolverConfigLoader::new(Some(Path::new("config/envswitch.toml"))).unwrap();
//!
//! // Apply ENVSWITCH_* overrides
//! let env = EnvironmentLoader::new(None);
//! env.apply(&mut loader.config.options);
//!
//! println!("Environments: {:?}", loader.config.environments.names());
//! ```

pub mod environment;
pub mod loader;

// Re-export main types for convenience
pub use self::environment::EnvironmentLoader;
pub use self::loader::ResolverConfigLoader;
