//! Frame timing.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Frames kept for the rolling average.
pub const STATS_WINDOW: usize = 60;

/// Begin/end frame timer with a rolling average over the last `STATS_WINDOW` frames.
#[derive(Debug, Default)]
pub struct FrameStats {
    started: Option<Instant>,
    window: VecDeque<Duration>,
    frames: u64,
    total: Duration,
    worst: Duration,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Close the frame opened by `begin`. Unpaired calls are ignored.
    pub fn end(&mut self) {
        if let Some(started) = self.started.take() {
            self.record(started.elapsed());
        }
    }

    pub fn record(&mut self, frame: Duration) {
        if self.window.len() == STATS_WINDOW {
            self.window.pop_front();
        }
        self.window.push_back(frame);
        self.frames += 1;
        self.total += frame;
        self.worst = self.worst.max(frame);
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Mean frame time over the rolling window.
    pub fn average(&self) -> Duration {
        if self.window.is_empty() {
            return Duration::ZERO;
        }
        self.window.iter().sum::<Duration>() / self.window.len() as u32
    }

    pub fn worst(&self) -> Duration {
        self.worst
    }

    pub fn summary(&self) -> String {
        let mean = if self.frames == 0 {
            Duration::ZERO
        } else {
            self.total.div_f64(self.frames as f64)
        };
        format!(
            "{} frames, mean {:.3}ms, recent {:.3}ms, worst {:.3}ms",
            self.frames,
            mean.as_secs_f64() * 1e3,
            self.average().as_secs_f64() * 1e3,
            self.worst.as_secs_f64() * 1e3
        )
    }
}
