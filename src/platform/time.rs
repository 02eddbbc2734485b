//! Frame pacing and FPS measurement

use std::time::{Duration, Instant};

/// Number of frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// A clock that paces the frame loop
pub trait FrameClock {
    /// Wait until the next frame at `fps` is due; returns time since the previous tick
    fn tick(&mut self, fps: u32) -> Duration;
    /// Measured frames per second
    fn fps(&self) -> f32;
}

/// Rolling FPS average over the last `FPS_WINDOW` frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0.0,
        }
    }
}

impl FpsCounter {
    /// Record a frame at `time` seconds since some fixed origin
    pub fn record(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest entry is the one we will overwrite next
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 / elapsed) as f32;
            }
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// Wall-clock implementation that sleeps between frames
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
    last: Instant,
    counter: FpsCounter,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            origin: now,
            last: now,
            counter: FpsCounter::default(),
        }
    }
}

impl FrameClock for SystemClock {
    fn tick(&mut self, fps: u32) -> Duration {
        let frame = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
        let since_last = self.last.elapsed();
        if let Some(wait) = frame.checked_sub(since_last) {
            std::thread::sleep(wait);
        }

        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        self.counter
            .record(now.duration_since(self.origin).as_secs_f64());
        dt
    }

    fn fps(&self) -> f32 {
        self.counter.fps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_counter_steady_rate() {
        let mut counter = FpsCounter::default();
        assert_eq!(counter.fps(), 0.0);
        for i in 1..=120 {
            counter.record(i as f64 / 30.0);
        }
        assert!((counter.fps() - 30.0).abs() < 0.01);
    }

    #[test]
    fn test_system_clock_paces_frames() {
        let mut clock = SystemClock::new();
        clock.tick(200);
        let dt = clock.tick(200);
        assert!(dt >= Duration::from_millis(4));
    }
}
