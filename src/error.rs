//! Error types for environment resolution.
//!
//! Resolution itself never fails: invalid overrides fall through to the next
//! source. These errors surface only from the fallible variants of the
//! public API (`try_switch_env`, table construction, URL rewriting).

use thiserror::Error;

/// Errors that can occur while resolving or switching environments.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The environment name is not a key of the environment table.
    #[error("Environment '{0}' is not present in the configuration")]
    UnknownEnvironment(String),

    /// The current URL could not be parsed for a query rewrite.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The environment table was built from something other than a mapping.
    #[error("Invalid environment table: {0}")]
    InvalidTable(String),
}

impl ResolverError {
    /// Whether this error rejects an environment name.
    pub fn is_unknown_environment(&self) -> bool {
        matches!(self, Self::UnknownEnvironment(_))
    }
}

/// Result type for resolver operations.
pub type ResolverResult<T> = Result<T, ResolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ResolverError::UnknownEnvironment("staging".to_string());
        assert!(err.to_string().contains("staging"));
        assert!(err.is_unknown_environment());

        let err = ResolverError::InvalidTable("expected an object".to_string());
        assert!(err.to_string().contains("expected an object"));
        assert!(!err.is_unknown_environment());
    }

    #[test]
    fn test_invalid_url_keeps_source() {
        use std::error::Error as _;

        let source = url::Url::parse("not a url").unwrap_err();
        let err = ResolverError::InvalidUrl {
            url: "not a url".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid URL 'not a url'"));
        assert!(err.source().is_some());
    }
}
