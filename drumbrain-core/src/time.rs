//! Millisecond time base shared by every component.
//!
//! Instants wrap around after ~49 days; all deltas go through [`elapsed`] which is
//! wrapping-aware and never panics.

pub type Instant = fugit::TimerInstantU32<1_000>;
pub type Duration = fugit::MillisDurationU32;

/// Instant at `ms` milliseconds after boot.
pub const fn millis(ms: u32) -> Instant {
    Instant::from_ticks(ms)
}

/// Time passed between `since` and `now`, zero if `since` lies in the future.
pub fn elapsed(now: Instant, since: Instant) -> Duration {
    now.checked_duration_since(since)
        .unwrap_or(Duration::from_ticks(0))
}
