//! Infrastructure implementation of the `Clock` port.

use std::time::{Duration, Instant};

use crate::application::ports::Clock;

/// Production clock: monotonic readings from `Instant`, suspension through
/// the tokio timer.
pub struct TokioClock {
    origin: Instant,
}

impl TokioClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
