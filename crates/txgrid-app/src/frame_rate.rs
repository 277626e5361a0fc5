// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::time::{Duration, Instant};

pub const SAMPLE_WINDOW: Duration = Duration::from_millis(500);

/// Counts presented frames and publishes a rounded frames-per-second figure
/// once per sample window. Purely diagnostic.
#[derive(Debug, Clone)]
pub struct FrameRateMonitor {
    window: Duration,
    window_start: Option<Instant>,
    frames: u32,
    fps: u32,
}

impl FrameRateMonitor {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            window_start: None,
            frames: 0,
            fps: 0,
        }
    }

    pub fn record_frame(&mut self, now: Instant) {
        let Some(start) = self.window_start else {
            self.window_start = Some(now);
            return;
        };
        self.frames = self.frames.saturating_add(1);

        let elapsed = now.saturating_duration_since(start);
        if elapsed >= self.window && !elapsed.is_zero() {
            let per_second = f64::from(self.frames) / elapsed.as_secs_f64();
            self.fps = per_second.round() as u32;
            self.frames = 0;
            self.window_start = Some(now);
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn reset(&mut self) {
        self.window_start = None;
        self.frames = 0;
        self.fps = 0;
    }
}

impl Default for FrameRateMonitor {
    fn default() -> Self {
        Self::new(SAMPLE_WINDOW)
    }
}
