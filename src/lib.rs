//! retry-until - constant-interval retry with fluent termination conditions
//!
//! This crate repeatedly invokes a fallible operation until a caller-supplied
//! termination condition is satisfied, the attempt budget runs out, or a
//! non-retryable error occurs.
//!
//! # Features
//!
//! - **Value-based termination**: `until(predicate)` accepts the first
//!   returned value the predicate approves of
//! - **Error-based termination**: `until_ok()` accepts the first attempt that
//!   returns without an error
//! - **Failure hooks**: observe every unsatisfying attempt together with its
//!   1-based attempt number, in attachment order
//! - **Retryable-error filter**: `when(predicate)` whitelists the errors that
//!   count as failed attempts; everything else propagates unchanged
//! - **Process-wide default interval**: read once at policy construction time
//!
//! # Example
//!
//! ```rust
//! use retry_until::Retryable;
//! use std::time::Duration;
//!
//! let mut countdown = 3;
//! let operation = || {
//!     countdown -= 1;
//!     Ok::<_, std::io::Error>(countdown)
//! };
//!
//! let settled = operation
//!     .retry()
//!     .with_try_interval(Duration::from_millis(1))
//!     .until(|remaining| *remaining == 0)
//!     .unwrap();
//! assert_eq!(settled, 0);
//! ```

pub mod dsl;
pub mod policy;
pub mod retry;
pub mod sleep;

pub use dsl::{attempt, attempt_with};
pub use policy::{
    DEFAULT_TRY_INTERVAL, default_try_interval, reset_default_try_interval,
    set_default_try_interval,
};
pub use retry::{AttemptFailure, RetryBuilder, RetryError, Retryable};
pub use sleep::{FnSleeper, Sleeper, StdSleeper};

use std::time::Duration;
use thiserror::Error;

/// Frozen retry configuration.
///
/// A `Policy` is a plain value: constructing one snapshots the process-wide
/// default try interval, and a [`RetryBuilder`] copies the policy before its
/// loop starts, so later changes to the default never affect calls already
/// configured.
///
/// # Example
///
/// ```rust
/// use retry_until::Policy;
/// use std::time::Duration;
///
/// let policy = Policy::new()
///     .try_interval(Duration::from_millis(20))
///     .max_try_count(5)?;
/// assert!(policy.should_retry(4));
/// assert!(!policy.should_retry(5));
/// # Ok::<(), retry_until::PolicyError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    /// Sleep duration between attempts.
    pub try_interval: Duration,

    /// Maximum number of attempts; `None` means unbounded.
    pub max_try_count: Option<u32>,
}

impl Policy {
    /// Create a policy with the process-wide default try interval and an
    /// unbounded attempt budget.
    pub fn new() -> Self {
        Self {
            try_interval: policy::default_try_interval(),
            max_try_count: None,
        }
    }

    /// Set the sleep duration between attempts.
    ///
    /// A negative interval is unrepresentable in [`Duration`], so there is no
    /// invalid input to reject; [`Duration::ZERO`] disables sleeping.
    pub fn try_interval(mut self, interval: Duration) -> Self {
        self.try_interval = interval;
        self
    }

    /// Set the attempt budget.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::ZeroMaxTryCount`] when `count` is zero; a loop
    /// that may run zero attempts has no meaningful outcome.
    pub fn max_try_count(mut self, count: u32) -> Result<Self, PolicyError> {
        if count == 0 {
            return Err(PolicyError::ZeroMaxTryCount);
        }
        self.max_try_count = Some(count);
        Ok(self)
    }

    /// Check whether another attempt is allowed after `attempt` (1-indexed)
    /// has completed.
    pub fn should_retry(&self, attempt: u32) -> bool {
        self.max_try_count.is_none_or(|max| attempt < max)
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::new()
    }
}

/// Invalid configuration rejected synchronously by the policy setters.
///
/// Never produced by the retry loop itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// The attempt budget must allow at least one attempt.
    #[error("max try count must be at least 1")]
    ZeroMaxTryCount,
}
