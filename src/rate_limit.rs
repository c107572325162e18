use std::num::NonZeroU32;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::trace;

/// Fixed window limiter spacing out calls to the provider.
#[derive(Debug)]
pub struct RateLimit {
    // The number of requests that can be made in the time period.
    capacity: u32,
    period: Duration,

    window: Mutex<Window>,
}

#[derive(Debug)]
struct Window {
    // Used requests in current window.
    used: u32,
    reset: Instant,
}

impl RateLimit {
    pub fn new(num: NonZeroU32, per: Duration) -> Self {
        Self {
            capacity: num.get(),
            period: per,
            window: Mutex::new(Window {
                used: 0,
                reset: Instant::now() + per,
            }),
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Takes a slot in the current window without waiting.
    pub async fn try_ready(&self) -> Result<(), Duration> {
        let mut window = self.window.lock().await;
        let now = Instant::now();

        if now >= window.reset {
            // The period has elapsed, start a new window.
            window.used = 0;
            window.reset = now + self.period;
        }

        if window.used < self.capacity {
            window.used += 1;
            Ok(())
        } else {
            Err(window.reset - now)
        }
    }

    pub async fn ready(&self) {
        while let Err(wait) = self.try_ready().await {
            trace!(?wait, "rate limited");
            sleep(wait).await;
        }
    }
}

impl Default for RateLimit {
    /// One request per second.
    fn default() -> Self {
        Self::new(NonZeroU32::MIN, Duration::from_secs(1))
    }
}
