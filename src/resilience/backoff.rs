//! Exponential backoff schedule.

use std::time::Duration;

use crate::resilience::retries::RetryPolicy;

/// Delay before retry number `attempt` (1-based); zero for `attempt == 0`.
///
/// `initial * multiplier^(attempt - 1)`, capped at `max`.
pub fn calculate_backoff(attempt: u32, policy: &RetryPolicy) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }
    let mut schedule = BackoffSchedule::new(policy);
    (1..attempt).for_each(|_| {
        schedule.next_delay();
    });
    schedule.next_delay()
}

/// The sequence of delays between attempts.
///
/// Starts at the initial delay and grows by the multiplier until it reaches
/// the maximum, where it stays. The sequence never decreases.
#[derive(Debug, Clone)]
pub struct BackoffSchedule {
    current: Duration,
    max: Duration,
    multiplier: f64,
}

impl BackoffSchedule {
    pub fn new(policy: &RetryPolicy) -> Self {
        // A multiplier below 1 (or NaN) would shrink the delay.
        let multiplier =
            if policy.backoff_multiplier.is_finite() && policy.backoff_multiplier >= 1.0 {
                policy.backoff_multiplier
            } else {
                1.0
            };
        Self {
            current: policy.initial_delay.min(policy.max_delay),
            max: policy.max_delay,
            multiplier,
        }
    }

    /// Return the current delay and advance to the next one.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        let next = self.current.as_secs_f64() * self.multiplier;
        self.current = if next >= self.max.as_secs_f64() {
            self.max
        } else {
            Duration::from_secs_f64(next)
        };
        delay
    }
}

impl Iterator for BackoffSchedule {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        Some(self.next_delay())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(initial_ms: u64, max_ms: u64, multiplier: f64) -> RetryPolicy {
        RetryPolicy {
            max_retries: 5,
            initial_delay: Duration::from_millis(initial_ms),
            max_delay: Duration::from_millis(max_ms),
            backoff_multiplier: multiplier,
        }
    }

    #[test]
    fn test_default_schedule() {
        let delays: Vec<u128> = BackoffSchedule::new(&RetryPolicy::default())
            .take(6)
            .map(|d| d.as_millis())
            .collect();
        assert_eq!(delays, vec![1000, 2000, 4000, 8000, 10000, 10000]);
    }

    #[test]
    fn test_backoff_calculation() {
        let p = policy(100, 1000, 2.0);
        assert_eq!(calculate_backoff(0, &p), Duration::ZERO);
        assert_eq!(calculate_backoff(1, &p), Duration::from_millis(100));
        assert_eq!(calculate_backoff(2, &p), Duration::from_millis(200));
        assert_eq!(calculate_backoff(10, &p), Duration::from_millis(1000));
    }

    #[test]
    fn test_schedule_never_decreases() {
        for p in [
            policy(100, 1000, 1.5),
            policy(500, 100, 2.0),
            policy(10, 50, 0.5),
            policy(10, 50, f64::NAN),
        ] {
            let delays: Vec<Duration> = BackoffSchedule::new(&p).take(20).collect();
            assert!(delays.windows(2).all(|w| w[0] <= w[1]));
            assert!(delays.iter().all(|d| *d <= p.max_delay));
        }
    }

    #[test]
    fn test_huge_multiplier_saturates() {
        let p = policy(1, 60_000, 1e300);
        let delays: Vec<Duration> = BackoffSchedule::new(&p).take(3).collect();
        assert_eq!(delays[1], Duration::from_secs(60));
        assert_eq!(delays[2], Duration::from_secs(60));
    }
}
