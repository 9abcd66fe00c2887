//=========================================================================
// Reload Policy
//
// Retry budget for reloading against a filesystem that a build tool is
// concurrently writing to.
//
// Worst-case blocking per reload call:
//   lock_poll_attempts × lock_poll_interval  (default 128 × 100 ms ≈ 12.8 s)
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Duration;

//=== ReloadPolicy ========================================================

/// Bounds for the reload retry loops.
///
/// # Default Values
///
/// - **Lock poll attempts**: 128
/// - **Lock poll interval**: 100 ms
/// - **Copy attempts**: 128 (tight loop, no sleep)
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use hotload::core::reload::ReloadPolicy;
///
/// let policy = ReloadPolicy::new()
///     .with_lock_poll_attempts(16)
///     .with_lock_poll_interval(Duration::from_millis(50));
///
/// assert_eq!(policy.lock_poll_attempts(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadPolicy {
    lock_poll_attempts: u32,
    lock_poll_interval: Duration,
    copy_attempts: u32,
}

impl ReloadPolicy {
    pub const DEFAULT_LOCK_POLL_ATTEMPTS: u32 = 128;
    pub const DEFAULT_LOCK_POLL_INTERVAL: Duration = Duration::from_millis(100);
    pub const DEFAULT_COPY_ATTEMPTS: u32 = 128;

    pub fn new() -> Self {
        Self {
            lock_poll_attempts: Self::DEFAULT_LOCK_POLL_ATTEMPTS,
            lock_poll_interval: Self::DEFAULT_LOCK_POLL_INTERVAL,
            copy_attempts: Self::DEFAULT_COPY_ATTEMPTS,
        }
    }

    //--- Builder ----------------------------------------------------------

    /// Sets how many times a reload call polls the lock-file.
    ///
    /// # Panics
    ///
    /// Panics if `attempts == 0`.
    pub fn with_lock_poll_attempts(mut self, attempts: u32) -> Self {
        assert!(attempts > 0, "Lock poll attempts must be positive");
        self.lock_poll_attempts = attempts;
        self
    }

    /// Sets the sleep between lock-file polls.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    pub fn with_lock_poll_interval(mut self, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "Lock poll interval must be positive");
        self.lock_poll_interval = interval;
        self
    }

    /// Sets how many times a single shadow copy is retried.
    ///
    /// # Panics
    ///
    /// Panics if `attempts == 0`.
    pub fn with_copy_attempts(mut self, attempts: u32) -> Self {
        assert!(attempts > 0, "Copy attempts must be positive");
        self.copy_attempts = attempts;
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn lock_poll_attempts(&self) -> u32 {
        self.lock_poll_attempts
    }

    pub fn lock_poll_interval(&self) -> Duration {
        self.lock_poll_interval
    }

    pub fn copy_attempts(&self) -> u32 {
        self.copy_attempts
    }

    /// Upper bound on how long one reload call can block on the lock-file.
    pub fn worst_case_blocking(&self) -> Duration {
        self.lock_poll_interval * self.lock_poll_attempts
    }
}

impl Default for ReloadPolicy {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
