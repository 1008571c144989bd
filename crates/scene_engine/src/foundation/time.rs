//! Frame timing

use std::time::Instant;

/// Frame timer feeding `delta_time` into the system loop
///
/// Deltas are clamped to `max_delta` so a long stall (debugger break, window
/// drag) does not hand scenes a multi-second step.
pub struct FrameTimer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
    max_delta: f32,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(0.25)
    }
}

impl FrameTimer {
    /// Create a new timer with the given delta clamp in seconds
    pub fn new(max_delta: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
            max_delta: max_delta.max(0.0),
        }
    }

    /// Advance to the next frame and return the clamped delta in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(elapsed)
    }

    /// Advance by an explicit step (fixed-step loops and tests)
    pub fn advance(&mut self, elapsed: f32) -> f32 {
        self.delta_time = elapsed.clamp(0.0, self.max_delta);
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }

    /// Time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Total clamped time since creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of frames ticked
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average FPS since creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_clamps_delta() {
        let mut timer = FrameTimer::new(0.1);
        assert_eq!(timer.advance(0.05), 0.05);
        assert_eq!(timer.advance(3.0), 0.1);
        assert_eq!(timer.advance(-1.0), 0.0);
        assert_eq!(timer.frame_count(), 3);
        assert!((timer.total_time() - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_tick_is_bounded() {
        let mut timer = FrameTimer::new(0.25);
        let dt = timer.tick();
        assert!((0.0..=0.25).contains(&dt));
        assert_eq!(timer.frame_count(), 1);
    }
}
