//! Steady Timing
//!
//! All measurements go through the [`Clock`] trait so the runner never sees a
//! clock that can jump backwards. [`SteadyClock`] is the production source,
//! backed by `std::time::Instant`, which is the platform's monotonic clock
//! (`CLOCK_MONOTONIC`, `QueryPerformanceCounter`, `mach_absolute_time`).

use std::time::Duration;

/// A monotonic time source.
///
/// Implementations must never report a later reading that compares earlier
/// than a previous one; `seconds_between` is only ever called with
/// `start` taken before `end`.
pub trait Clock {
    /// Opaque point in time produced by this clock
    type Instant: Copy;

    /// Read the current time
    fn now(&self) -> Self::Instant;

    /// Elapsed seconds from `start` to `end`
    fn seconds_between(&self, start: Self::Instant, end: Self::Instant) -> f64;
}

impl<C: Clock + ?Sized> Clock for &C {
    type Instant = C::Instant;

    #[inline(always)]
    fn now(&self) -> Self::Instant {
        (**self).now()
    }

    #[inline(always)]
    fn seconds_between(&self, start: Self::Instant, end: Self::Instant) -> f64 {
        (**self).seconds_between(start, end)
    }
}

/// Wall-clock source backed by `std::time::Instant`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SteadyClock;

impl Clock for SteadyClock {
    type Instant = std::time::Instant;

    #[inline(always)]
    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    #[inline(always)]
    fn seconds_between(&self, start: Self::Instant, end: Self::Instant) -> f64 {
        // saturates to zero rather than panicking on a misordered pair
        end.saturating_duration_since(start).as_secs_f64()
    }
}

/// Convert fractional seconds to a `Duration`, mapping negative or
/// non-finite input to zero.
pub fn seconds_to_duration(seconds: f64) -> Duration {
    Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO)
}
