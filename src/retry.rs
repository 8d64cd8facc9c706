//! Retry execution with a fluent builder API.
//!
//! This module provides the retry loop itself: an extension trait that turns
//! any `FnMut() -> Result<T, E>` into a configurable [`RetryBuilder`], and
//! the two terminal calls that drive it - [`until`](RetryBuilder::until) for
//! value-based termination and [`until_ok`](RetryBuilder::until_ok) for
//! error-based termination.

use std::time::Duration;

use thiserror::Error;

use crate::sleep::{Sleeper, StdSleeper};
use crate::{Policy, PolicyError};

type FailureHook<'a, T, E> = Box<dyn FnMut(&AttemptFailure<T, E>, u32) + 'a>;

/// Extension trait that adds `.retry()` to functions and closures
///
/// Automatically implemented for all `FnMut` types that return `Result`.
///
/// # Example
///
/// ```rust
/// use retry_until::Retryable;
/// use std::time::Duration;
///
/// let mut calls = 0;
/// let value = (|| {
///     calls += 1;
///     if calls < 3 { Err("busy") } else { Ok(calls) }
/// })
/// .retry()
/// .with_try_interval(Duration::ZERO)
/// .until_ok()
/// .unwrap();
/// assert_eq!(value, 3);
/// ```
pub trait Retryable<T, E> {
    /// Begin building a retry call against the process-default policy.
    fn retry<'a>(self) -> RetryBuilder<'a, Self, T, E, fn(&E) -> bool>
    where
        Self: Sized;

    /// Begin building a retry call against an explicitly supplied policy.
    fn retry_with<'a>(self, policy: Policy) -> RetryBuilder<'a, Self, T, E, fn(&E) -> bool>
    where
        Self: Sized;
}

impl<F, T, E> Retryable<T, E> for F
where
    F: FnMut() -> Result<T, E>,
{
    fn retry<'a>(self) -> RetryBuilder<'a, Self, T, E, fn(&E) -> bool> {
        self.retry_with(Policy::new())
    }

    fn retry_with<'a>(self, policy: Policy) -> RetryBuilder<'a, Self, T, E, fn(&E) -> bool> {
        RetryBuilder {
            operation: self,
            policy,
            when: None,
            on_failure: Vec::new(),
        }
    }
}

/// Outcome of one unsatisfying attempt.
///
/// Failure hooks observe this value, and [`RetryError::Exhausted`] carries
/// the last one for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure<T, E> {
    /// The operation returned a value the termination predicate rejected.
    Rejected(T),
    /// The operation failed with an error configured as retryable.
    Errored(E),
}

impl<T, E> AttemptFailure<T, E> {
    /// The attempt's returned value, when there was one.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Rejected(value) => Some(value),
            Self::Errored(_) => None,
        }
    }

    /// The attempt's error, when there was one.
    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Rejected(_) => None,
            Self::Errored(error) => Some(error),
        }
    }
}

/// Terminal failure of a retry call.
///
/// Together with the success value, these are the only three outcomes a
/// terminal call can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetryError<T, E> {
    /// The attempt budget was consumed without satisfying the termination
    /// condition.
    #[error("retry budget exhausted after {attempts} attempts")]
    Exhausted {
        /// Total number of attempts performed.
        attempts: u32,
        /// The final attempt's outcome.
        last: AttemptFailure<T, E>,
    },

    /// The operation failed with an error outside the retryable set.
    ///
    /// The error is carried unchanged so callers keep its original identity.
    #[error("operation failed with a non-retryable error: {0}")]
    Fatal(E),
}

/// Builder for configuring and executing a retry call.
///
/// Created by [`Retryable::retry`], [`Retryable::retry_with`], or the
/// [`attempt`](crate::attempt) helpers. Configuration must complete before
/// the terminal call; the terminal call consumes the builder, so a builder
/// can neither be reconfigured mid-loop nor driven twice.
///
/// # Type Parameters
///
/// * `F` - the operation
/// * `T` - the operation's success value
/// * `E` - the operation's error
/// * `W` - the retryable-error predicate installed by [`when`](Self::when)
pub struct RetryBuilder<'a, F, T, E, W> {
    operation: F,
    policy: Policy,
    when: Option<W>,
    on_failure: Vec<FailureHook<'a, T, E>>,
}

impl<'a, F, T, E, W> RetryBuilder<'a, F, T, E, W>
where
    F: FnMut() -> Result<T, E>,
    W: Fn(&E) -> bool,
{
    /// Replace the whole policy snapshot.
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the sleep duration between attempts.
    pub fn with_try_interval(mut self, interval: Duration) -> Self {
        self.policy = self.policy.try_interval(interval);
        self
    }

    /// Set the attempt budget.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::ZeroMaxTryCount`] when `count` is zero.
    pub fn with_max_try_count(mut self, count: u32) -> Result<Self, PolicyError> {
        self.policy = self.policy.max_try_count(count)?;
        Ok(self)
    }

    /// Whitelist the errors that count as failed attempts.
    ///
    /// Under [`until`](Self::until), errors are fatal unless the predicate
    /// accepts them. Under [`until_ok`](Self::until_ok), every error is
    /// retryable until a predicate narrows the set. Either way, an error the
    /// predicate rejects aborts the loop immediately as
    /// [`RetryError::Fatal`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use retry_until::{Retryable, RetryError};
    ///
    /// #[derive(Debug, PartialEq)]
    /// enum ApiError {
    ///     Timeout,
    ///     NotFound,
    /// }
    ///
    /// let outcome = (|| Err::<(), _>(ApiError::NotFound))
    ///     .retry()
    ///     .when(|e| matches!(e, ApiError::Timeout))
    ///     .until_ok();
    /// assert_eq!(outcome, Err(RetryError::Fatal(ApiError::NotFound)));
    /// ```
    pub fn when<P>(self, predicate: P) -> RetryBuilder<'a, F, T, E, P>
    where
        P: Fn(&E) -> bool,
    {
        RetryBuilder {
            operation: self.operation,
            policy: self.policy,
            when: Some(predicate),
            on_failure: self.on_failure,
        }
    }

    /// Register a failure hook that ignores the attempt number.
    ///
    /// Hooks run after every attempt that did not satisfy the termination
    /// condition, in attachment order, and never after the satisfying
    /// attempt. A hook may repair shared state so the next attempt can make
    /// progress.
    ///
    /// # Example
    ///
    /// ```rust
    /// use retry_until::Retryable;
    /// use std::cell::Cell;
    /// use std::time::Duration;
    ///
    /// let failures = Cell::new(0);
    /// let generator = Cell::new(0);
    /// let value = (|| Ok::<_, std::io::Error>(generator.replace(generator.get() + 1)))
    ///     .retry()
    ///     .with_try_interval(Duration::ZERO)
    ///     .on_failure(|_| failures.set(failures.get() + 1))
    ///     .until(|n| *n == 2)
    ///     .unwrap();
    /// assert_eq!(value, 2);
    /// assert_eq!(failures.get(), 2);
    /// ```
    pub fn on_failure(self, mut hook: impl FnMut(&AttemptFailure<T, E>) + 'a) -> Self {
        self.on_failure_with_attempt(move |failure, _| hook(failure))
    }

    /// Register a failure hook that also receives the 1-based attempt number.
    pub fn on_failure_with_attempt(
        mut self,
        hook: impl FnMut(&AttemptFailure<T, E>, u32) + 'a,
    ) -> Self {
        self.on_failure.push(Box::new(hook));
        self
    }

    /// Run the loop until the predicate accepts a returned value.
    ///
    /// A value the predicate rejects is a failed attempt. An error is fatal
    /// unless a [`when`](Self::when) predicate accepts it as retryable.
    pub fn until<P>(self, predicate: P) -> Result<T, RetryError<T, E>>
    where
        P: FnMut(&T) -> bool,
    {
        self.until_with_sleeper(predicate, StdSleeper)
    }

    /// [`until`](Self::until) with a caller-supplied sleeper.
    pub fn until_with_sleeper<P, S>(self, predicate: P, sleeper: S) -> Result<T, RetryError<T, E>>
    where
        P: FnMut(&T) -> bool,
        S: Sleeper,
    {
        self.run(predicate, false, sleeper)
    }

    /// Run the loop until an attempt returns without an error.
    ///
    /// Every `Err` is a failed attempt; installing a [`when`](Self::when)
    /// predicate narrows the retryable set and makes the rest fatal.
    pub fn until_ok(self) -> Result<T, RetryError<T, E>> {
        self.until_ok_with_sleeper(StdSleeper)
    }

    /// [`until_ok`](Self::until_ok) with a caller-supplied sleeper.
    pub fn until_ok_with_sleeper<S>(self, sleeper: S) -> Result<T, RetryError<T, E>>
    where
        S: Sleeper,
    {
        self.run(|_| true, true, sleeper)
    }

    // Both terminal calls reduce to one driver over the tagged attempt
    // outcome; they differ only in the predicate and in whether an
    // unfiltered error is retryable.
    fn run<P, S>(
        self,
        mut predicate: P,
        errors_retryable_by_default: bool,
        sleeper: S,
    ) -> Result<T, RetryError<T, E>>
    where
        P: FnMut(&T) -> bool,
        S: Sleeper,
    {
        let RetryBuilder {
            mut operation,
            policy,
            when,
            mut on_failure,
        } = self;

        let mut attempt: u32 = 1;
        loop {
            let failure = match operation() {
                Ok(value) => {
                    if predicate(&value) {
                        return Ok(value);
                    }
                    AttemptFailure::Rejected(value)
                }
                Err(error) => {
                    let retryable = when
                        .as_ref()
                        .map_or(errors_retryable_by_default, |w| w(&error));
                    if !retryable {
                        tracing::debug!(attempt, "non-retryable error, aborting retry loop");
                        return Err(RetryError::Fatal(error));
                    }
                    AttemptFailure::Errored(error)
                }
            };

            for hook in on_failure.iter_mut() {
                hook(&failure, attempt);
            }

            if !policy.should_retry(attempt) {
                tracing::warn!(attempts = attempt, "retry budget exhausted");
                return Err(RetryError::Exhausted {
                    attempts: attempt,
                    last: failure,
                });
            }

            tracing::debug!(
                attempt,
                interval_ms = policy.try_interval.as_millis() as u64,
                "attempt unsatisfied, sleeping before next try"
            );
            sleeper.sleep(policy.try_interval);
            attempt = attempt.saturating_add(1);
        }
    }
}
