//! Request pacing using governor and Tokio Semaphore.
//!
//! This module provides the `Pacer` struct which enforces provider limits using:
//! - Governor crate (GCRA algorithm) for the requests-per-minute limit
//! - Tokio Semaphore for the concurrent request limit
//!
//! The GCRA (Generic Cell Rate Algorithm) provides efficient, lock-free rate
//! limiting without a mutex-guarded token bucket.

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use serde::{Deserialize, Serialize};
use spyglass_error::RetryableError;
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::Semaphore;

// Type alias for our direct rate limiter
type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Pacing limits for an API client.
///
/// `None` means the corresponding limit is not enforced.
///
/// # Example
///
/// ```toml
/// [pacing]
/// rpm = 10
/// max_concurrent = 1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Requests per minute limit
    #[serde(default)]
    pub rpm: Option<u32>,

    /// Maximum concurrent requests
    #[serde(default)]
    pub max_concurrent: Option<u32>,
}

impl Default for PacingConfig {
    /// Free-tier pacing: 10 requests per minute, one at a time.
    fn default() -> Self {
        Self {
            rpm: Some(10),
            max_concurrent: Some(1),
        }
    }
}

impl PacingConfig {
    /// Pacing that never blocks, for clients throttled elsewhere.
    pub fn unlimited() -> Self {
        Self {
            rpm: None,
            max_concurrent: None,
        }
    }
}

/// Paces access to a wrapped client.
///
/// The pacer coordinates two limits:
/// - **RPM** (requests per minute): Enforced via governor
/// - **Concurrent requests**: Enforced via Tokio Semaphore
///
/// The pacer takes ownership of the wrapped value; access goes through
/// the `inner()` method after acquiring permission, so a client cannot be
/// reached without passing the limits.
///
/// # Example
///
/// ```rust,ignore
/// let pacer = Pacer::new(client, &PacingConfig::default());
///
/// let guard = pacer.acquire().await;
/// let response = pacer.inner().call(...).await?;
/// drop(guard); // Releases the concurrent slot
/// ```
#[derive(Clone)]
pub struct Pacer<T> {
    inner: T,

    // RPM limiter (requests per minute)
    rpm_limiter: Option<Arc<DirectRateLimiter>>,

    // Concurrent request semaphore
    concurrent_semaphore: Arc<Semaphore>,

    // Retry configuration for execute()
    no_retry: bool,
    max_retries: Option<usize>,
    retry_backoff_ms: Option<u64>,
}

impl<T> Pacer<T> {
    /// Create a new pacer around a value.
    ///
    /// Takes ownership of the value and enforces all limits the config
    /// carries: requests per minute when `config.rpm` is set, concurrency
    /// when `config.max_concurrent` is set.
    pub fn new(inner: T, config: &PacingConfig) -> Self {
        Self::new_with_retry(inner, config, false, None, None)
    }

    /// Create a new pacer with retry configuration for [`Pacer::execute`].
    ///
    /// # Arguments
    ///
    /// * `no_retry` - Disable automatic retry entirely
    /// * `max_retries` - Override the error-specific retry attempt cap
    /// * `retry_backoff_ms` - Override the error-specific initial backoff
    pub fn new_with_retry(
        inner: T,
        config: &PacingConfig,
        no_retry: bool,
        max_retries: Option<usize>,
        retry_backoff_ms: Option<u64>,
    ) -> Self {
        let rpm_limiter = config.rpm.and_then(|rpm| {
            NonZeroU32::new(rpm).map(|n| {
                let quota = Quota::per_minute(n);
                Arc::new(GovernorRateLimiter::direct(quota))
            })
        });

        let max_concurrent = config.max_concurrent.unwrap_or(u32::MAX);
        let concurrent_semaphore = Arc::new(Semaphore::new(max_concurrent as usize));

        Self {
            inner,
            rpm_limiter,
            concurrent_semaphore,
            no_retry,
            max_retries,
            retry_backoff_ms,
        }
    }

    /// Get a reference to the wrapped value.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Acquire permission for a request.
    ///
    /// Waits until the RPM quota allows the request, then takes a
    /// concurrent slot. Returns a guard that releases the slot when
    /// dropped.
    pub async fn acquire(&self) -> PacerGuard {
        // Wait for RPM quota
        if let Some(limiter) = &self.rpm_limiter {
            limiter.until_ready().await;
        }

        // Acquire concurrent request slot (last, to avoid holding a slot while waiting)
        let permit = self
            .concurrent_semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("Semaphore should not be closed");

        PacerGuard { _permit: permit }
    }

    /// Try to acquire without waiting.
    ///
    /// Returns None if any limit would block.
    pub fn try_acquire(&self) -> Option<PacerGuard> {
        // Check RPM
        if let Some(limiter) = &self.rpm_limiter {
            limiter.check().ok()?;
        }

        // Try to acquire concurrent slot
        let permit = self.concurrent_semaphore.clone().try_acquire_owned().ok()?;

        Some(PacerGuard { _permit: permit })
    }

    /// Execute an operation with pacing and automatic retry.
    ///
    /// The operation runs once up front. On a transient error (503, 429,
    /// ...) that first error's [`RetryableError::retry_strategy_params`]
    /// pick the backoff shape for the remaining attempts, so a rate-limit
    /// response waits longer between fewer tries than a flaky 500. On a
    /// permanent error (401, 400, ...) the error returns immediately.
    ///
    /// Each attempt acquires pacing permission before running. Backoff
    /// overrides given at construction win over the error-specific
    /// parameters. With `no_retry` set, the operation runs exactly once.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let result = pacer.execute(|| async {
    ///     client.generate(&request).await
    /// }).await?;
    /// ```
    pub async fn execute<F, Fut, R, E>(&self, operation: F) -> Result<R, E>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<R, E>>,
        E: RetryableError + std::fmt::Display,
    {
        use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff, strategy::jitter};
        use tracing::{info, warn};

        // First attempt outside the retry loop so its error can select
        // the strategy
        let first_err = {
            let _guard = self.acquire().await;
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) => e,
            }
        };

        if self.no_retry {
            return Err(first_err);
        }

        if !first_err.is_retryable() {
            warn!("Permanent error, failing immediately: {}", first_err);
            return Err(first_err);
        }

        let (mut initial_ms, mut max_retries, max_delay_secs) =
            first_err.retry_strategy_params();
        if let Some(backoff) = self.retry_backoff_ms {
            initial_ms = backoff;
        }
        if let Some(retries) = self.max_retries {
            max_retries = retries;
        }

        info!(
            error = %first_err,
            initial_backoff_ms = initial_ms,
            max_retries,
            max_delay_secs,
            "Transient error, retrying with error-specific strategy"
        );

        let retry_strategy = ExponentialBackoff::from_millis(initial_ms)
            .factor(2)
            .max_delay(std::time::Duration::from_secs(max_delay_secs))
            .map(jitter)
            .take(max_retries);

        Retry::spawn(retry_strategy, || async {
            // Acquire pacing permission before each attempt
            let _guard = self.acquire().await;

            let result = operation().await;

            match result {
                Ok(value) => Ok(value),
                Err(e) => {
                    if e.is_retryable() {
                        warn!("Transient error, will retry: {}", e);
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    } else {
                        warn!("Permanent error, failing immediately: {}", e);
                        Err(RetryError::Permanent(e))
                    }
                }
            }
        })
        .await
    }
}

/// RAII guard for the pacer.
///
/// Automatically releases the concurrent request slot when dropped, so
/// the slot returns to the semaphore even if the request fails.
pub struct PacerGuard {
    _permit: tokio::sync::OwnedSemaphorePermit,
}
