//! Deferred URL synchronisation.
//!
//! After a resolution or a switch the chosen environment is mirrored into
//! the URL query string. The rewrite is deferred so it does not race with
//! routing that happens synchronously right after a switch.

use crate::error::{ResolverError, ResolverResult};
use std::time::Duration;
use url::Url;

/// A unit of deferred work.
pub type SyncTask = Box<dyn FnOnce() + Send + 'static>;

/// Host timer facility used to defer URL rewrites.
pub trait SyncScheduler: Send + Sync {
    /// Run `task` once `delay` has elapsed.
    fn schedule(&self, delay: Duration, task: SyncTask);

    /// Cancel the outstanding task, if the scheduler supports it.
    fn cancel_pending(&self) {}
}

/// Runs tasks immediately, ignoring the delay.
///
/// For hosts without a timer facility.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineScheduler;

impl SyncScheduler for InlineScheduler {
    fn schedule(&self, _delay: Duration, task: SyncTask) {
        task();
    }
}

/// Return `url` with the query parameter `name` set to `value`.
///
/// The first occurrence keeps its position, later duplicates are dropped,
/// and a missing parameter is appended. Other parameters are untouched.
pub fn rewrite_query_param(url: &str, name: &str, value: &str) -> ResolverResult<String> {
    let mut parsed = Url::parse(url).map_err(|source| ResolverError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut replaced = false;
    for (key, current) in parsed.query_pairs() {
        if key == name {
            if !replaced {
                pairs.push((key.into_owned(), value.to_string()));
                replaced = true;
            }
        } else {
            pairs.push((key.into_owned(), current.into_owned()));
        }
    }
    if !replaced {
        pairs.push((name.to_string(), value.to_string()));
    }

    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    Ok(parsed.to_string())
}

#[cfg(feature = "runtime")]
pub use self::runtime::TokioScheduler;

#[cfg(feature = "runtime")]
mod runtime {
    use super::{SyncScheduler, SyncTask};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::runtime::Handle;
    use tokio_util::sync::CancellationToken;

    /// Defers tasks on the current tokio runtime.
    ///
    /// Only the most recently scheduled task is live: scheduling again
    /// cancels the one still waiting, so a burst of switches results in a
    /// single rewrite. Outside a runtime the task runs inline.
    #[derive(Debug, Default)]
    pub struct TokioScheduler {
        pending: Mutex<Option<CancellationToken>>,
    }

    impl TokioScheduler {
        /// Create a scheduler with nothing pending.
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl SyncScheduler for TokioScheduler {
        fn schedule(&self, delay: Duration, task: SyncTask) {
            let handle = match Handle::try_current() {
                Ok(handle) => handle,
                Err(_) => {
                    tracing::debug!(target: "envswitch", "No tokio runtime, running URL sync inline");
                    task();
                    return;
                }
            };

            let token = CancellationToken::new();
            if let Ok(mut pending) = self.pending.lock() {
                if let Some(previous) = pending.replace(token.clone()) {
                    previous.cancel();
                }
            }

            handle.spawn(async move {
                let fire = tokio::select! {
                    _ = token.cancelled() => false,
                    _ = tokio::time::sleep(delay) => true,
                };
                if fire {
                    task();
                }
            });
        }

        fn cancel_pending(&self) {
            if let Ok(mut pending) = self.pending.lock() {
                if let Some(token) = pending.take() {
                    token.cancel();
                }
            }
        }
    }
}
