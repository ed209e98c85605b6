use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota};
use std::net::IpAddr;
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const QUOTE_BURST: NonZeroU32 = nonzero(5);
const MAX_QUOTES_PER_HOUR: NonZeroU32 = nonzero(20);
const CLEANUP_INTERVAL_SECS: u64 = 300;

const fn nonzero(n: u32) -> NonZeroU32 {
    match NonZeroU32::new(n) {
        Some(n) => n,
        None => panic!("quota must be non-zero"),
    }
}

/// Per-client quote limits, checked before any outbound pricing call.
///
/// A single GCRA quota covers both the short burst and the hourly rate, so a
/// rejected request never uses up any budget.
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
    clock: DefaultClock,
    last_cleanup: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Up to 5 quotes back to back, refilling at 20 per hour.
    pub fn new() -> Self {
        Self::with_quota(Quota::per_hour(MAX_QUOTES_PER_HOUR).allow_burst(QUOTE_BURST))
    }

    pub fn with_quota(quota: Quota) -> Self {
        Self {
            limiter: Arc::new(governor::RateLimiter::keyed(quota)),
            clock: DefaultClock::default(),
            last_cleanup: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn check_rate_limit(&self, ip: IpAddr) -> Result<(), RateLimitError> {
        self.maybe_cleanup();

        self.limiter.check_key(&ip).map_err(|not_until| {
            let wait = not_until.wait_time_from(self.clock.now());
            tracing::warn!("Quote limit hit for {}", ip);
            RateLimitError::TooManyRequests(round_up_secs(wait))
        })
    }

    fn maybe_cleanup(&self) {
        let Ok(mut last_cleanup) = self.last_cleanup.lock() else {
            return;
        };
        if last_cleanup.elapsed() > Duration::from_secs(CLEANUP_INTERVAL_SECS) {
            self.limiter.retain_recent();
            self.limiter.shrink_to_fit();
            *last_cleanup = Instant::now();
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

fn round_up_secs(wait: Duration) -> u64 {
    let secs = wait.as_secs();
    if wait.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs.max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitError {
    /// Seconds until the next quote is allowed.
    TooManyRequests(u64),
}

impl RateLimitError {
    pub fn retry_after_secs(&self) -> u64 {
        match self {
            Self::TooManyRequests(secs) => *secs,
        }
    }

    pub fn message(&self) -> String {
        let secs = self.retry_after_secs();
        if secs < 60 {
            format!("Too many quote requests. Wait {} seconds and try again.", secs)
        } else {
            format!(
                "Quote limit reached. Try again in {} minutes.",
                secs.div_ceil(60)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[test]
    fn test_burst_limit() {
        let limiter = RateLimiter::new();
        for _ in 0..5 {
            assert!(limiter.check_rate_limit(ip(1)).is_ok());
        }
        assert!(matches!(
            limiter.check_rate_limit(ip(1)),
            Err(RateLimitError::TooManyRequests(secs)) if secs >= 1
        ));
        // Other clients keep their own budget.
        assert!(limiter.check_rate_limit(ip(2)).is_ok());
    }

    #[test]
    fn test_rejected_requests_use_no_budget() {
        let limiter =
            RateLimiter::with_quota(Quota::per_hour(nonzero(1)).allow_burst(nonzero(3)));
        for _ in 0..3 {
            assert!(limiter.check_rate_limit(ip(3)).is_ok());
        }

        let first = limiter.check_rate_limit(ip(3)).unwrap_err().retry_after_secs();
        assert!(first > 60, "waits for the hourly refill, got {first}s");

        // Hammering while limited must not push the next slot further out.
        for _ in 0..10 {
            let wait = limiter.check_rate_limit(ip(3)).unwrap_err().retry_after_secs();
            assert!(wait <= first);
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            RateLimitError::TooManyRequests(61).message(),
            "Quote limit reached. Try again in 2 minutes."
        );
        assert!(RateLimitError::TooManyRequests(12)
            .message()
            .contains("12 seconds"));
    }
}
