//! Time management utilities
//!
//! The scene graph evaluates animations from an absolute time value; the
//! [`FrameClock`] produces that value either from the wall clock or from a
//! fixed step for headless, reproducible runs.

use std::time::{Duration, Instant};

/// Source of frame time used by [`FrameClock`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockMode {
    /// Measure real elapsed time between ticks
    RealTime,
    /// Advance by a constant step every tick, in seconds
    FixedStep(f32),
}

/// Frame clock producing delta and absolute animation time
#[derive(Debug)]
pub struct FrameClock {
    mode: ClockMode,
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(ClockMode::RealTime)
    }
}

impl FrameClock {
    /// Create a new clock in the given mode
    pub fn new(mode: ClockMode) -> Self {
        Self {
            mode,
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Create a clock advancing by `step` seconds per tick
    pub fn fixed(step: f32) -> Self {
        Self::new(ClockMode::FixedStep(step))
    }

    /// Advance the clock (call once per frame) and return the frame delta
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_time = match self.mode {
            ClockMode::RealTime => now.duration_since(self.last_frame).as_secs_f32(),
            ClockMode::FixedStep(step) => step,
        };
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time
    }

    /// Time since the previous tick in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Accumulated animation time in seconds
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per simulated second
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

/// Simple stopwatch for measuring elapsed wall time
#[derive(Debug)]
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.elapsed += start.elapsed();
        }
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let running = self.start_time.map_or(Duration::ZERO, |start| start.elapsed());
        self.elapsed + running
    }

    /// Get the elapsed time in milliseconds
    pub fn elapsed_millis(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }

    /// Check if the stopwatch is currently running
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }
}
