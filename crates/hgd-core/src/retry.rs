//! Retry policy for the download loop.
//!
//! The stock policy retries immediately and forever: the loop never skips an
//! image. A `[retry]` section in the config bounds attempts and spaces them
//! with exponential backoff instead.

use crate::config::RetryConfig;
use std::time::Duration;

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry; the run aborts with the last error.
    NoRetry,
    /// Retry after the given delay (zero = immediately).
    RetryAfter(Duration),
}

/// Attempt-bounding and backoff policy for failed downloads.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts per image (including the first); `None`
    /// retries forever.
    pub max_attempts: Option<u32>,
    /// Base delay for backoff; zero means immediate retry.
    pub base_delay: Duration,
    /// Upper bound on backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: None,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    /// Builds the bounded policy described by a config `[retry]` section.
    ///
    /// A base delay that cannot be expressed as a `Duration` (infinite or
    /// overflowing seconds) clamps to the maximum delay; NaN and negative
    /// values fall back to immediate retry.
    pub fn bounded(cfg: &RetryConfig) -> Self {
        let max_delay = Duration::from_secs(cfg.max_delay_secs);
        let base_delay = if cfg.base_delay_secs > 0.0 {
            Duration::try_from_secs_f64(cfg.base_delay_secs).unwrap_or(max_delay)
        } else {
            Duration::ZERO
        };
        Self {
            max_attempts: Some(cfg.max_attempts),
            base_delay,
            max_delay,
        }
    }

    /// Bounded when a `[retry]` section is present, infinite otherwise.
    pub fn from_config(retry: Option<&RetryConfig>) -> Self {
        retry.map(Self::bounded).unwrap_or_default()
    }

    /// Compute the decision after a failed attempt.
    ///
    /// `attempt` is 1-based (1 = the first attempt just failed). Returns
    /// `NoRetry` once a bounded policy is out of attempts.
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if let Some(max) = self.max_attempts {
            if attempt >= max {
                return RetryDecision::NoRetry;
            }
        }
        if self.base_delay.is_zero() {
            return RetryDecision::RetryAfter(Duration::ZERO);
        }
        // Exponential backoff: base * 2^(attempt-1), capped.
        let exp = 1u32 << attempt.saturating_sub(1).min(8);
        let raw = self.base_delay.saturating_mul(exp);
        RetryDecision::RetryAfter(raw.min(self.max_delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_never_gives_up() {
        let p = RetryPolicy::default();
        assert_eq!(p.decide(1), RetryDecision::RetryAfter(Duration::ZERO));
        assert_eq!(p.decide(10_000), RetryDecision::RetryAfter(Duration::ZERO));
        assert_eq!(
            p.decide(u32::MAX),
            RetryDecision::RetryAfter(Duration::ZERO)
        );
    }

    #[test]
    fn bounded_policy_respects_max_attempts() {
        let p = RetryPolicy::bounded(&RetryConfig {
            max_attempts: 3,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        });
        assert!(matches!(p.decide(1), RetryDecision::RetryAfter(_)));
        assert!(matches!(p.decide(2), RetryDecision::RetryAfter(_)));
        assert_eq!(p.decide(3), RetryDecision::NoRetry);
    }

    #[test]
    fn exponential_backoff_grows_and_is_capped() {
        let mut p = RetryPolicy::bounded(&RetryConfig::default());
        // Allow many attempts so capping is observable.
        p.max_attempts = Some(20);
        let d1 = match p.decide(1) {
            RetryDecision::RetryAfter(d) => d,
            _ => panic!("expected retry"),
        };
        let d2 = match p.decide(2) {
            RetryDecision::RetryAfter(d) => d,
            _ => panic!("expected retry"),
        };
        assert!(d2 >= d1);

        let d_last = match p.decide(10) {
            RetryDecision::RetryAfter(d) => d,
            _ => panic!("expected retry"),
        };
        assert!(d_last <= p.max_delay);
    }

    #[test]
    fn bounded_policy_clamps_unrepresentable_base_delay() {
        let p = RetryPolicy::bounded(&RetryConfig {
            max_attempts: 5,
            base_delay_secs: f64::INFINITY,
            max_delay_secs: 7,
        });
        assert_eq!(p.decide(1), RetryDecision::RetryAfter(Duration::from_secs(7)));

        // NaN and negatives fall back to immediate retry.
        for bad in [f64::NAN, -1.0] {
            let p = RetryPolicy::bounded(&RetryConfig {
                max_attempts: 5,
                base_delay_secs: bad,
                max_delay_secs: 7,
            });
            assert_eq!(p.decide(1), RetryDecision::RetryAfter(Duration::ZERO));
        }
    }

    #[test]
    fn from_config_none_is_infinite_and_immediate() {
        let p = RetryPolicy::from_config(None);
        assert!(p.max_attempts.is_none());
        assert_eq!(p.decide(99), RetryDecision::RetryAfter(Duration::ZERO));
    }
}
