//! Registry of named limiters.
//!
//! The registry maps names to lazily-created [`RateLimiter`] instances so
//! that every part of a process gating the same resource shares the same
//! permit pool. Creation is memoized: the first lookup of a name builds the
//! limiter, every later lookup returns that same instance.

use crate::application::limiter::RateLimiter;
use crate::domain::config::{ConfigError, LimiterConfig};
use ahash::RandomState;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// Registry managing named limiter instances with a shared default
/// configuration.
///
/// Lookups use a sharded concurrent map, so `get` can be called from any
/// number of tasks without external locking. Create-if-absent is atomic:
/// when several tasks race on the first lookup of a name, exactly one
/// limiter is created and all of them receive it.
///
/// A registry is typically created once at startup and shared for the
/// process lifetime.
///
/// # Example
/// ```no_run
/// use permit_throttle::{LimiterConfig, LimiterRegistry};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() {
///     let defaults = LimiterConfig::new(
///         Duration::from_millis(250),
///         Duration::from_secs(1),
///         100,
///     )
///     .unwrap();
///     let registry = LimiterRegistry::new(defaults);
///
///     let limiter = registry.get("backend-api").unwrap();
///     assert!(limiter.acquire_permission(Duration::ZERO).await);
/// }
/// ```
#[derive(Debug)]
pub struct LimiterRegistry {
    default_config: LimiterConfig,
    limiters: DashMap<String, Arc<RateLimiter>, RandomState>,
}

impl LimiterRegistry {
    /// Create a registry whose limiters use `default_config` unless a
    /// per-name configuration is supplied on first lookup.
    pub fn new(default_config: LimiterConfig) -> Self {
        Self {
            default_config,
            limiters: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// Get or create the limiter registered under `name`, built from the
    /// registry's default configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::EmptyName`] if `name` is empty.
    pub fn get(&self, name: &str) -> Result<Arc<RateLimiter>, ConfigError> {
        self.get_or_create(name, || self.default_config.clone())
    }

    /// Get or create the limiter registered under `name`, built from
    /// `config` if this is the first lookup of the name.
    ///
    /// The configuration only matters on first creation; for a name that is
    /// already registered it is ignored and the existing instance is
    /// returned unchanged.
    ///
    /// # Errors
    /// Returns [`ConfigError::EmptyName`] if `name` is empty.
    pub fn get_with_config(
        &self,
        name: &str,
        config: LimiterConfig,
    ) -> Result<Arc<RateLimiter>, ConfigError> {
        self.get_or_create(name, move || config)
    }

    /// Get or create the limiter registered under `name`, computing its
    /// configuration lazily.
    ///
    /// `make_config` is invoked at most once per distinct name, and never
    /// when the name is already registered. Under a racing first lookup,
    /// only the winning caller runs it.
    ///
    /// # Errors
    /// Returns [`ConfigError::EmptyName`] if `name` is empty.
    pub fn get_with<F>(&self, name: &str, make_config: F) -> Result<Arc<RateLimiter>, ConfigError>
    where
        F: FnOnce() -> LimiterConfig,
    {
        self.get_or_create(name, make_config)
    }

    fn get_or_create<F>(&self, name: &str, make_config: F) -> Result<Arc<RateLimiter>, ConfigError>
    where
        F: FnOnce() -> LimiterConfig,
    {
        if name.is_empty() {
            return Err(ConfigError::EmptyName);
        }

        // The entry holds its shard's write lock across creation, which is
        // what makes create-if-absent atomic and the config closure
        // at-most-once.
        match self.limiters.entry(name.to_owned()) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let limiter = Arc::new(RateLimiter::new(name, make_config())?);
                entry.insert(Arc::clone(&limiter));
                Ok(limiter)
            }
        }
    }

    /// The default configuration handed to limiters created by [`get`].
    ///
    /// [`get`]: LimiterRegistry::get
    pub fn default_config(&self) -> &LimiterConfig {
        &self.default_config
    }

    /// Number of limiters created so far.
    pub fn len(&self) -> usize {
        self.limiters.len()
    }

    /// Whether no limiter has been created yet.
    pub fn is_empty(&self) -> bool {
        self.limiters.is_empty()
    }
}
