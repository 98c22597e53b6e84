//! Capability interfaces supplied by the embedding host.
//!
//! The resolver never reaches for globals: the current location and the
//! persistent key-value store are handed to it explicitly, and either may be
//! missing entirely (for example when rendering outside a browser).

use crate::error::{ResolverError, ResolverResult};
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

/// Access to the current page location.
pub trait LocationProvider: Send + Sync {
    /// Hostname of the current location, without port.
    fn hostname(&self) -> String;

    /// First value of the query parameter `name`, if present.
    fn query_param(&self, name: &str) -> Option<String>;

    /// The full current URL.
    fn current_url(&self) -> String;

    /// Replace the current URL in place: no navigation, no new history entry.
    fn replace_url(&self, url: &str);
}

/// A persistent string store (`localStorage` and friends).
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    fn set(&self, key: &str, value: &str);

    /// Remove `key`. Stores that cannot delete may ignore this.
    fn remove(&self, _key: &str) {}
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored pair.
    pub fn entries(&self) -> HashMap<String, String> {
        self.values.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

/// A [`LocationProvider`] backed by a URL held in memory.
///
/// Every `replace_url` call is recorded so hosts can observe history
/// replacements.
#[derive(Debug)]
pub struct StaticLocation {
    url: Mutex<Url>,
    replacements: Mutex<Vec<String>>,
}

impl StaticLocation {
    /// Create a location from an absolute URL.
    pub fn new(url: &str) -> ResolverResult<Self> {
        let parsed = Url::parse(url).map_err(|source| ResolverError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        Ok(Self {
            url: Mutex::new(parsed),
            replacements: Mutex::new(Vec::new()),
        })
    }

    /// Simulate navigation to a new URL. Not recorded as a replacement.
    pub fn navigate(&self, url: &str) -> ResolverResult<()> {
        let parsed = Url::parse(url).map_err(|source| ResolverError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        if let Ok(mut current) = self.url.lock() {
            *current = parsed;
        }
        Ok(())
    }

    /// URLs passed to `replace_url`, oldest first.
    pub fn replacements(&self) -> Vec<String> {
        self.replacements
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl LocationProvider for StaticLocation {
    fn hostname(&self) -> String {
        self.url
            .lock()
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_default()
    }

    fn query_param(&self, name: &str) -> Option<String> {
        let url = self.url.lock().ok()?;
        let value = url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned());
        value
    }

    fn current_url(&self) -> String {
        self.url
            .lock()
            .map(|url| url.to_string())
            .unwrap_or_default()
    }

    fn replace_url(&self, url: &str) {
        match Url::parse(url) {
            Ok(parsed) => {
                if let Ok(mut current) = self.url.lock() {
                    *current = parsed;
                }
                if let Ok(mut replacements) = self.replacements.lock() {
                    replacements.push(url.to_string());
                }
            }
            Err(e) => tracing::warn!(target: "envswitch", "Ignoring invalid replacement URL {}: {}", url, e),
        }
    }
}
