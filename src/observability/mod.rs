//! Diagnostics for environment resolution.
//!
//! Every resolution step and switch is reported through `tracing` under the
//! `envswitch` target, and can optionally be journaled to a markdown file.
//! Diagnostics are switched on and off as a whole by
//! [`ResolverOptions::enable_log`](crate::options::ResolverOptions::enable_log)
//! and never influence a returned value.
//!
//! # Example
//!
//! ```no_run
//! use envswitch::observability::Logger;
//! use std::path::Path;
//!
//! let logger = Logger::new(true).with_journal(Path::new("logs/envswitch.md"));
//! logger.switched("test", None);
//! ```

pub mod logger;

// Re-export main types for convenience
pub use logger::Logger;
