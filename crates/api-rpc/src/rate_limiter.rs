//! Rate Limiter (Token Bucket)
//!
//! Keeps a misbehaving kiosk from flooding the queue with mutations.

use std::time::Instant;
use tokio::sync::Mutex;

/// Token-bucket rate limiter
pub struct RateLimiter {
    bucket: Mutex<Bucket>,
    max_tokens: f64,
    refill_per_sec: f64,
}

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    /// `max_tokens` is the burst size, `refill_per_sec` the sustained
    /// request rate.
    pub fn new(max_tokens: u32, refill_per_sec: u32) -> Self {
        Self {
            bucket: Mutex::new(Bucket {
                tokens: max_tokens as f64,
                last_refill: Instant::now(),
            }),
            max_tokens: max_tokens as f64,
            refill_per_sec: refill_per_sec as f64,
        }
    }

    /// Consume one token. Returns false when the caller is throttled.
    pub async fn check(&self) -> bool {
        let mut bucket = self.bucket.lock().await;

        let now = Instant::now();
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_per_sec).min(self.max_tokens);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}
