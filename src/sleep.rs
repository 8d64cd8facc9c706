//! Sleep abstraction for the inter-attempt pause.
//!
//! The retry loop never calls `std::thread::sleep` directly; it goes through
//! a [`Sleeper`] so tests can record sleeps instead of taking them and
//! callers can substitute their own delay mechanism.

use std::time::Duration;

/// Trait for sleep implementations.
pub trait Sleeper {
    /// Pause the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Blocking sleeper backed by `std::thread::sleep`.
///
/// # Example
///
/// ```rust
/// use retry_until::{Sleeper, StdSleeper};
/// use std::time::Duration;
///
/// StdSleeper.sleep(Duration::from_millis(1));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StdSleeper;

impl Sleeper for StdSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Closure-backed sleeper.
///
/// Useful for tests that assert on sleep counts and durations without
/// spending wall-clock time.
///
/// # Example
///
/// ```rust
/// use retry_until::{FnSleeper, Sleeper};
/// use std::cell::Cell;
/// use std::time::Duration;
///
/// let slept = Cell::new(Duration::ZERO);
/// let sleeper = FnSleeper(|d| slept.set(slept.get() + d));
/// sleeper.sleep(Duration::from_millis(40));
/// assert_eq!(slept.get(), Duration::from_millis(40));
/// ```
#[derive(Clone, Copy)]
pub struct FnSleeper<F>(pub F);

impl<F> Sleeper for FnSleeper<F>
where
    F: Fn(Duration),
{
    fn sleep(&self, duration: Duration) {
        (self.0)(duration);
    }
}
