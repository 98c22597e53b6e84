//! Logging system for environment resolution.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Logger for resolution steps and environment switches.
///
/// Events go to `tracing`. When a journal path is configured, resolutions
/// and switches are also appended to a markdown file.
#[derive(Debug, Clone)]
pub struct Logger {
    enabled: bool,
    journal: Option<PathBuf>,
}

impl Logger {
    /// Create a logger. A disabled logger emits nothing.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            journal: None,
        }
    }

    /// Also append entries to a markdown journal at `path`.
    pub fn with_journal(mut self, path: &Path) -> Self {
        self.journal = Some(path.to_path_buf());
        self
    }

    /// Whether diagnostics are emitted.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Get the journal path.
    pub fn journal(&self) -> Option<&Path> {
        self.journal.as_deref()
    }

    /// Log the domain-derived base environment.
    pub fn domain_default(&self, hostname: &str, env: &str) {
        if self.enabled {
            tracing::debug!(target: "envswitch", hostname, env, "Domain default environment: {}", env);
        }
    }

    /// Log a stored value overriding the domain default.
    pub fn storage_override(&self, env: &str) {
        if self.enabled {
            tracing::debug!(target: "envswitch", env, "Stored value overrides to {} environment", env);
        }
    }

    /// Log a URL parameter overriding everything else.
    pub fn url_override(&self, env: &str) {
        if self.enabled {
            tracing::debug!(target: "envswitch", env, "URL parameter overrides to {} environment", env);
        }
    }

    /// Log an override candidate that is not a known environment.
    pub fn override_ignored(&self, source: &str, env: &str) {
        if self.enabled {
            tracing::debug!(target: "envswitch", source, env, "Ignoring unknown environment {} from {}", env, source);
        }
    }

    /// Log the configuration finally used.
    pub fn resolved(&self, env: &str, settings: Option<&Value>) {
        if !self.enabled {
            return;
        }
        match settings {
            Some(settings) => {
                tracing::info!(target: "envswitch", env, %settings, "Using {} environment configuration", env)
            }
            None => {
                tracing::warn!(target: "envswitch", env, "Resolved {} environment has no configuration entry", env)
            }
        }
        self.journal_entry(
            "Environment Resolved",
            &format!("**Environment:** {}\n**Config:** {}", env, pretty(settings)),
        );
    }

    /// Log a successful manual switch.
    pub fn switched(&self, env: &str, settings: Option<&Value>) {
        if !self.enabled {
            return;
        }
        tracing::info!(target: "envswitch", env, "Switched to {} environment", env);
        self.journal_entry(
            "Environment Switch",
            &format!("**To:** {}\n**Config:** {}", env, pretty(settings)),
        );
    }

    /// Log a rejected switch to an unknown environment.
    pub fn switch_rejected(&self, env: &str) {
        if !self.enabled {
            return;
        }
        tracing::warn!(target: "envswitch", env, "Environment {} is not present in the configuration", env);
        self.journal_entry("Switch Rejected", &format!("**Requested:** {}", env));
    }

    /// Log a deferred URL rewrite.
    pub fn url_sync_scheduled(&self, env: &str, delay: Duration) {
        if self.enabled {
            tracing::debug!(
                target: "envswitch",
                env,
                delay_ms = delay.as_millis() as u64,
                "Scheduling URL sync to {}",
                env
            );
        }
    }

    /// Log a URL rewrite that could not be applied.
    pub fn url_sync_failed(&self, error: &dyn std::fmt::Display) {
        if self.enabled {
            tracing::warn!(target: "envswitch", "URL sync failed: {}", error);
        }
    }

    fn journal_entry(&self, title: &str, body: &str) {
        let Some(path) = &self.journal else {
            return;
        };
        let now: DateTime<Utc> = Utc::now();
        let content = format!("### {} - {}\n\n{}\n\n", title, now.to_rfc3339(), body);
        if let Err(e) = append_to_journal(path, &content) {
            tracing::warn!(target: "envswitch", "Failed to write journal {}: {}", path.display(), e);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(true)
    }
}

fn pretty(settings: Option<&Value>) -> String {
    settings
        .map(|v| serde_json::to_string(v).unwrap_or_default())
        .unwrap_or_else(|| "(none)".to_string())
}

/// Append to the journal, writing the header first for a new file.
fn append_to_journal(path: &Path, content: &str) -> io::Result<()> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = File::create(path)?;
        writeln!(file, "# Environment Switch Log\n")?;
        writeln!(file, "Log started: {}\n", Utc::now().to_rfc3339())?;
        writeln!(file, "---\n")?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    write!(file, "{}", content)
}

#[cfg(test)]
mod tests;
