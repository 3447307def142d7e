use std::time::{Duration, Instant};

/// Paces live re-layouts of the graph and tracks how often they happen.
pub struct RefreshTiming {
    interval: Duration,
    last_refresh: Option<Instant>,
    last_rate_time: Option<Instant>,
    refresh_count: u32,
    refresh_rate: f32,
}

impl RefreshTiming {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_refresh: None,
            last_rate_time: None,
            refresh_count: 0,
            refresh_rate: 0.0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_refresh {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        }
    }

    pub fn mark_refreshed(&mut self, now: Instant) {
        self.last_refresh = Some(now);
        self.refresh_count = self.refresh_count.saturating_add(1);

        let since = *self.last_rate_time.get_or_insert(now);
        let elapsed = now.saturating_duration_since(since);
        if elapsed.as_secs_f32() >= 0.5 {
            self.refresh_rate = self.refresh_count as f32 / elapsed.as_secs_f32();
            self.refresh_count = 0;
            self.last_rate_time = Some(now);
        }
    }

    /// Re-layouts per second over the last measured window.
    pub fn refresh_rate(&self) -> f32 {
        self.refresh_rate
    }

    pub fn reset(&mut self) {
        self.last_refresh = None;
        self.last_rate_time = None;
        self.refresh_count = 0;
        self.refresh_rate = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_after_interval() {
        let start = Instant::now();
        let mut timing = RefreshTiming::new(Duration::from_millis(100));
        assert!(timing.is_due(start));

        timing.mark_refreshed(start);
        assert!(!timing.is_due(start + Duration::from_millis(50)));
        assert!(timing.is_due(start + Duration::from_millis(100)));

        timing.reset();
        assert!(timing.is_due(start));
    }

    #[test]
    fn test_refresh_rate_window() {
        let start = Instant::now();
        let mut timing = RefreshTiming::new(Duration::from_millis(100));
        for step in 0..=5 {
            timing.mark_refreshed(start + Duration::from_millis(step * 100));
        }
        // The window closes at 500 ms with 6 refreshes (0..=500 ms).
        assert!(timing.refresh_rate() > 0.0);
        assert!((timing.refresh_rate() - 12.0).abs() < 0.01);
    }
}
