//! Deliberate thread blocking.
//!
//! Starving the rendering pipeline is the feature under test for the sync
//! interaction variants, so this is an honest spin loop, not a sleep.

/// Spin until `now()` has advanced by at least `ms` milliseconds.
///
/// `now` is whichever monotonic millisecond clock the caller has: the
/// browser's high-resolution timer in the client, an `Instant`-based closure
/// in tests. A non-positive duration returns immediately.
pub fn busy_wait(now: impl Fn() -> f64, ms: f64) {
    if ms <= 0.0 {
        return;
    }
    let start = now();
    while now() - start < ms {
        // spin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn instant_clock() -> impl Fn() -> f64 {
        let epoch = Instant::now();
        move || epoch.elapsed().as_secs_f64() * 1000.0
    }

    #[test]
    fn blocks_for_at_least_the_requested_duration() {
        let clock = instant_clock();
        let start = Instant::now();
        busy_wait(&clock, 200.0);
        assert!(start.elapsed().as_millis() >= 200);
    }

    #[test]
    fn zero_and_negative_durations_return_immediately() {
        let clock = instant_clock();
        let start = Instant::now();
        busy_wait(&clock, 0.0);
        busy_wait(&clock, -50.0);
        assert!(start.elapsed().as_millis() < 50);
    }
}
