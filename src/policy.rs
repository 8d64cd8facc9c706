//! Process-wide retry defaults.
//!
//! The only ambient state in this crate is the default try interval. It is
//! read exactly once per [`Policy::new`](crate::Policy::new) call; mutating
//! it afterwards affects newly constructed policies only.

use std::sync::{OnceLock, RwLock};
use std::time::Duration;

/// Built-in default sleep duration between attempts.
pub const DEFAULT_TRY_INTERVAL: Duration = Duration::from_millis(500);

fn default_interval() -> &'static RwLock<Duration> {
    static DEFAULT: OnceLock<RwLock<Duration>> = OnceLock::new();
    DEFAULT.get_or_init(|| RwLock::new(DEFAULT_TRY_INTERVAL))
}

/// Read the process-wide default try interval.
pub fn default_try_interval() -> Duration {
    *default_interval()
        .read()
        .expect("default try interval lock poisoned")
}

/// Replace the process-wide default try interval.
///
/// Policies constructed before the call keep the interval they were built
/// with.
///
/// # Example
///
/// ```rust
/// use retry_until::policy;
/// use std::time::Duration;
///
/// policy::set_default_try_interval(Duration::from_millis(50));
/// assert_eq!(policy::default_try_interval(), Duration::from_millis(50));
/// policy::reset_default_try_interval();
/// assert_eq!(policy::default_try_interval(), policy::DEFAULT_TRY_INTERVAL);
/// ```
pub fn set_default_try_interval(interval: Duration) {
    *default_interval()
        .write()
        .expect("default try interval lock poisoned") = interval;
}

/// Restore the built-in default try interval.
pub fn reset_default_try_interval() {
    set_default_try_interval(DEFAULT_TRY_INTERVAL);
}
