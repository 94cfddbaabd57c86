//! Limiter configuration and validation.
//!
//! A [`LimiterConfig`] bundles the three parameters every permit pool needs:
//! how long a caller is willing to wait for a permit, how often the pool is
//! replenished, and how many permits each replenishment adds. Configurations
//! are validated at construction, immutable afterwards, and cheap to clone
//! and share between limiters.

use std::fmt;
use std::time::Duration;

/// Shortest refresh period a [`LimiterConfig`] accepts.
///
/// Anything shorter would turn the background refill schedule into a busy
/// loop without granting a meaningfully higher rate.
pub const MIN_REFRESH_PERIOD: Duration = Duration::from_nanos(500);

/// Error returned when configuration validation fails.
///
/// Each variant names the offending field, so callers can surface precise
/// messages without parsing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No wait timeout was supplied before `build()`
    MissingWaitTimeout,
    /// No refresh period was supplied before `build()`
    MissingRefreshPeriod,
    /// Refresh period is below [`MIN_REFRESH_PERIOD`]
    RefreshPeriodTooShort,
    /// Permits per period must be at least 1
    ZeroPermitsPerPeriod,
    /// Limiter names must be non-empty
    EmptyName,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingWaitTimeout => {
                write!(f, "wait timeout must be supplied")
            }
            ConfigError::MissingRefreshPeriod => {
                write!(f, "refresh period must be supplied")
            }
            ConfigError::RefreshPeriodTooShort => {
                write!(
                    f,
                    "refresh period is too short (minimum {:?})",
                    MIN_REFRESH_PERIOD
                )
            }
            ConfigError::ZeroPermitsPerPeriod => {
                write!(f, "permits per period must be at least 1")
            }
            ConfigError::EmptyName => {
                write!(f, "limiter name must not be empty")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Immutable configuration for a permit pool.
///
/// Construct with [`LimiterConfig::new`] or [`LimiterConfig::builder`]; both
/// enforce the same rules. A single configuration may back any number of
/// limiters.
///
/// # Example
/// ```
/// use permit_throttle::LimiterConfig;
/// use std::time::Duration;
///
/// let config = LimiterConfig::builder()
///     .wait_timeout(Duration::from_millis(250))
///     .refresh_period(Duration::from_secs(1)).unwrap()
///     .permits_per_period(50).unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.permits_per_period(), 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimiterConfig {
    wait_timeout: Duration,
    refresh_period: Duration,
    permits_per_period: usize,
}

impl LimiterConfig {
    /// Validate and build a configuration in one call.
    ///
    /// # Errors
    /// Returns the [`ConfigError`] naming the first field that fails
    /// validation: a refresh period below [`MIN_REFRESH_PERIOD`] or a zero
    /// permit quota. Any wait timeout is valid; zero means "never block".
    pub fn new(
        wait_timeout: Duration,
        refresh_period: Duration,
        permits_per_period: usize,
    ) -> Result<Self, ConfigError> {
        Self::builder()
            .wait_timeout(wait_timeout)
            .refresh_period(refresh_period)?
            .permits_per_period(permits_per_period)?
            .build()
    }

    /// Start building a configuration.
    pub fn builder() -> LimiterConfigBuilder {
        LimiterConfigBuilder::default()
    }

    /// How long a caller is willing to block waiting for a permit.
    pub fn wait_timeout(&self) -> Duration {
        self.wait_timeout
    }

    /// Interval between permit replenishments.
    pub fn refresh_period(&self) -> Duration {
        self.refresh_period
    }

    /// Number of permits added by each replenishment.
    pub fn permits_per_period(&self) -> usize {
        self.permits_per_period
    }
}

/// Builder for [`LimiterConfig`].
///
/// Setters with range rules validate their argument immediately, so an
/// invalid value is rejected at the call that supplies it rather than at
/// `build()`. `build()` still re-checks everything, including fields that
/// were never set.
#[derive(Debug, Default)]
pub struct LimiterConfigBuilder {
    wait_timeout: Option<Duration>,
    refresh_period: Option<Duration>,
    permits_per_period: Option<usize>,
}

impl LimiterConfigBuilder {
    /// Set the wait timeout. All durations are valid; zero disables waiting.
    pub fn wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = Some(timeout);
        self
    }

    /// Set the refresh period.
    ///
    /// # Errors
    /// Returns [`ConfigError::RefreshPeriodTooShort`] if `period` is below
    /// [`MIN_REFRESH_PERIOD`].
    pub fn refresh_period(mut self, period: Duration) -> Result<Self, ConfigError> {
        check_refresh_period(period)?;
        self.refresh_period = Some(period);
        Ok(self)
    }

    /// Set the permit quota added each period.
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroPermitsPerPeriod`] if `permits` is zero.
    pub fn permits_per_period(mut self, permits: usize) -> Result<Self, ConfigError> {
        check_permits_per_period(permits)?;
        self.permits_per_period = Some(permits);
        Ok(self)
    }

    /// Assemble the configuration, validating all fields.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingWaitTimeout`] or
    /// [`ConfigError::MissingRefreshPeriod`] for fields that were never
    /// supplied, or the range error for a field that fails re-validation.
    /// An unset permit quota counts as zero and is rejected.
    pub fn build(self) -> Result<LimiterConfig, ConfigError> {
        let wait_timeout = self.wait_timeout.ok_or(ConfigError::MissingWaitTimeout)?;
        let refresh_period = self
            .refresh_period
            .ok_or(ConfigError::MissingRefreshPeriod)?;
        check_refresh_period(refresh_period)?;
        let permits_per_period = self.permits_per_period.unwrap_or(0);
        check_permits_per_period(permits_per_period)?;

        Ok(LimiterConfig {
            wait_timeout,
            refresh_period,
            permits_per_period,
        })
    }
}

fn check_refresh_period(period: Duration) -> Result<(), ConfigError> {
    if period < MIN_REFRESH_PERIOD {
        return Err(ConfigError::RefreshPeriodTooShort);
    }
    Ok(())
}

fn check_permits_per_period(permits: usize) -> Result<(), ConfigError> {
    if permits < 1 {
        return Err(ConfigError::ZeroPermitsPerPeriod);
    }
    Ok(())
}
