use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Source of countdown ticks.
///
/// The engine awaits one tick per elapsed second. Tests substitute a ticker
/// that resolves immediately.
pub trait Ticker {
    fn tick(&mut self) -> impl Future<Output = ()>;
}

/// Wall-clock ticker on top of `tokio::time::interval`.
///
/// The first tick fires one period after construction, not immediately.
/// Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }
}

impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_one_period() {
        let start = Instant::now();
        let mut ticker = IntervalTicker::every_second();
        ticker.tick().await;
        assert_eq!(start.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let start = Instant::now();
        let mut ticker = IntervalTicker::new(Duration::from_millis(250));
        for _ in 0..4 {
            ticker.tick().await;
        }
        assert_eq!(start.elapsed(), Duration::from_secs(1));
        assert_eq!(ticker.period(), Duration::from_millis(250));
    }
}
