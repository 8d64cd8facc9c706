//! Ergonomic entry points for one-off retry calls.
//!
//! These helpers construct a [`RetryBuilder`] without requiring the
//! [`Retryable`] extension trait to be in scope.

use crate::retry::{RetryBuilder, Retryable};
use crate::Policy;

/// Begin a retry call against the process-default policy.
///
/// Equivalent to `operation.retry()`: the process-wide default try interval
/// is read at call time and the attempt budget starts unbounded.
///
/// # Example
///
/// ```rust
/// use retry_until::attempt;
/// use std::time::Duration;
///
/// let mut calls = 0;
/// let value = attempt(|| {
///     calls += 1;
///     if calls < 2 { Err("not yet") } else { Ok(calls) }
/// })
/// .with_try_interval(Duration::ZERO)
/// .until_ok()
/// .unwrap();
/// assert_eq!(value, 2);
/// ```
pub fn attempt<'a, F, T, E>(operation: F) -> RetryBuilder<'a, F, T, E, fn(&E) -> bool>
where
    F: FnMut() -> Result<T, E>,
{
    operation.retry()
}

/// Begin a retry call against an explicitly supplied policy.
pub fn attempt_with<'a, F, T, E>(
    policy: Policy,
    operation: F,
) -> RetryBuilder<'a, F, T, E, fn(&E) -> bool>
where
    F: FnMut() -> Result<T, E>,
{
    operation.retry_with(policy)
}
