//! Frame clock.
//!
//! [`FrameClock::tick`] returns the seconds elapsed since the previous tick,
//! which is the delta every frame of the field is advanced by. The clock also
//! keeps a frame counter and a frames-per-second figure for the window title.
//!
//! # Example
//!
//! ```ignore
//! use glowfield::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//!
//! // Once per redraw:
//! let delta = clock.tick();
//! field.tick(delta);
//! ```

use std::time::{Duration, Instant};

/// Measures time between frames.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_tick: Instant,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_window_start: Instant,
    fps_interval: Duration,
    paused: bool,
    /// Time spent paused, excluded from `elapsed`.
    paused_total: Duration,
    time_scale: f32,
}

impl FrameClock {
    /// Create a clock whose first tick measures from now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            start: now,
            last_tick: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_window_start: now,
            fps_interval: Duration::from_secs(1),
            paused: false,
            paused_total: Duration::ZERO,
            time_scale: 1.0,
        }
    }

    /// Advance the clock. Call once per frame.
    ///
    /// Returns the scaled seconds since the previous tick, or 0 while paused.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f32 {
        self.frame_count += 1;

        let elapsed_since_fps = now.saturating_duration_since(self.fps_window_start);
        if elapsed_since_fps >= self.fps_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / elapsed_since_fps.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_window_start = now;
        }

        if self.paused {
            self.delta_secs = 0.0;
            return 0.0;
        }

        let raw = now.saturating_duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.delta_secs = raw * self.time_scale;
        self.delta_secs
    }

    /// Seconds since the previous tick.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Unpaused seconds since the clock was created.
    pub fn elapsed(&self) -> f32 {
        self.elapsed_at(Instant::now())
    }

    fn elapsed_at(&self, now: Instant) -> f32 {
        let until = if self.paused { self.last_tick } else { now };
        (until.saturating_duration_since(self.start).saturating_sub(self.paused_total))
            .as_secs_f32()
    }

    /// Frames ticked so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second over the last measurement window.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Whether the FPS figure changed on the latest tick.
    #[inline]
    pub fn fps_updated(&self) -> bool {
        self.fps_frame_count == self.frame_count && self.frame_count > 0
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Stop time. Ticks return 0 until [`resume`](Self::resume).
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after a pause without producing a jump in delta.
    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    fn resume_at(&mut self, now: Instant) {
        if self.paused {
            self.paused_total += now.saturating_duration_since(self.last_tick);
            self.last_tick = now;
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Set the delta multiplier. Negative values clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_new_clock() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.delta(), 0.0);
        assert!(!clock.is_paused());
        assert_eq!(clock.time_scale(), 1.0);
    }

    #[test]
    fn test_tick_measures_delta() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);

        let delta = clock.tick_at(t0 + ms(16));
        assert!((delta - 0.016).abs() < 1e-6);
        let delta = clock.tick_at(t0 + ms(50));
        assert!((delta - 0.034).abs() < 1e-6);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn test_pause_yields_zero_and_resume_skips_gap() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        clock.tick_at(t0 + ms(10));

        clock.pause();
        assert_eq!(clock.tick_at(t0 + ms(500)), 0.0);

        clock.resume_at(t0 + ms(1000));
        let delta = clock.tick_at(t0 + ms(1016));
        assert!((delta - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_elapsed_excludes_paused_time() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        clock.tick_at(t0 + ms(200));
        assert!((clock.elapsed_at(t0 + ms(200)) - 0.2).abs() < 1e-6);

        clock.pause();
        // Frozen while paused
        assert!((clock.elapsed_at(t0 + ms(900)) - 0.2).abs() < 1e-6);

        clock.resume_at(t0 + ms(1200));
        clock.tick_at(t0 + ms(1300));
        assert!((clock.elapsed_at(t0 + ms(1300)) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_time_scale() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        clock.set_time_scale(2.0);
        let delta = clock.tick_at(t0 + ms(100));
        assert!((delta - 0.2).abs() < 1e-6);

        clock.set_time_scale(-1.0);
        assert_eq!(clock.time_scale(), 0.0);
    }

    #[test]
    fn test_fps_updates_after_interval() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        for i in 1..60 {
            clock.tick_at(t0 + ms(i * 16));
        }
        assert_eq!(clock.fps(), 0.0);
        assert!(!clock.fps_updated());

        clock.tick_at(t0 + ms(1000));
        assert!(clock.fps_updated());
        assert!((clock.fps() - 60.0).abs() < 0.5);
    }
}
