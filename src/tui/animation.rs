//! Time-based animations for the dashboard
//!
//! The converted value counts up to its target with a cubic ease-out, and
//! the trend chart is revealed a few points per tick.

use std::time::{Duration, Instant};

/// How long the result takes to settle
pub const RESULT_ANIMATION: Duration = Duration::from_millis(800);

/// Ticks needed to reveal a whole chart
pub const CHART_REVEAL_TICKS: usize = 20;

/// `1 - (1 - t)^3`, with `t` clamped to `[0, 1]`
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// A value moving from `from` to `to` over `duration`
#[derive(Debug, Clone, Copy)]
pub struct ValueAnimation {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
}

impl ValueAnimation {
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self::starting_at(from, to, duration, Instant::now())
    }

    pub fn starting_at(from: f64, to: f64, duration: Duration, started: Instant) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    /// The eased value at `now`
    pub fn value_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started);
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * ease_out_cubic(t)
    }

    pub fn value(&self) -> f64 {
        self.value_at(Instant::now())
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn is_finished_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

/// Number of chart points currently visible
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChartReveal {
    visible: usize,
    total: usize,
}

impl ChartReveal {
    /// Start revealing a chart of `total` points from nothing
    pub fn new(total: usize) -> Self {
        Self { visible: 0, total }
    }

    /// Show more points; returns whether anything changed
    pub fn tick(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        let step = self.total.div_ceil(CHART_REVEAL_TICKS).max(1);
        self.visible = (self.visible + step).min(self.total);
        true
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn is_complete(&self) -> bool {
        self.visible >= self.total
    }
}
