//! Injected time source.
//!
//! The engine never starts its own timers. It samples milliseconds
//! through a `Clock` handle; a host loop polls state and finishes the
//! game when the timer expires.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Millisecond time source, replaceable in tests.
///
/// ```
/// use klondike_wager::core::Clock;
///
/// let (clock, control) = Clock::manual(1_000);
/// assert_eq!(clock.now_ms(), 1_000);
///
/// control.advance(500);
/// assert_eq!(clock.now_ms(), 1_500);
/// ```
#[derive(Clone)]
pub struct Clock {
    now_fn: Arc<dyn Fn() -> i64 + Send + Sync>,
}

impl Clock {
    /// Wall-clock milliseconds since the Unix epoch.
    #[must_use]
    pub fn system() -> Self {
        Self::from_fn(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as i64)
                .unwrap_or(0)
        })
    }

    /// A clock frozen at `now_ms`.
    #[must_use]
    pub fn fixed(now_ms: i64) -> Self {
        Self::from_fn(move || now_ms)
    }

    /// A clock driven by an arbitrary function.
    pub fn from_fn(f: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        Self { now_fn: Arc::new(f) }
    }

    /// A manually advanced clock plus its control handle.
    #[must_use]
    pub fn manual(start_ms: i64) -> (Self, ManualClock) {
        let control = ManualClock {
            now_ms: Arc::new(AtomicI64::new(start_ms)),
        };
        let reader = control.clone();
        (Self::from_fn(move || reader.now_ms()), control)
    }

    /// Current time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> i64 {
        (self.now_fn)()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system()
    }
}

impl std::fmt::Debug for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clock").finish_non_exhaustive()
    }
}

/// Control handle for a clock created by [`Clock::manual`].
#[derive(Clone, Debug)]
pub struct ManualClock {
    now_ms: Arc<AtomicI64>,
}

impl ManualClock {
    /// Set the absolute time.
    pub fn set(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::Relaxed);
    }

    /// Advance by `delta_ms`.
    pub fn advance(&self, delta_ms: i64) {
        self.now_ms.fetch_add(delta_ms, Ordering::Relaxed);
    }

    /// Current time without going through a `Clock`.
    #[must_use]
    pub fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::Relaxed)
    }
}
