//! Time management utilities

use std::time::Instant;

/// Frame timer.
///
/// Tracks delta time between frames and a running frame count. The
/// engine does no frame pacing; this exists so applications can scale
/// animation by elapsed time if they want to.
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer; call once at the top of every frame.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Time since the last frame in seconds.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Number of frames since the timer was created.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_counts_frames() {
        let mut timer = Timer::new();
        assert_eq!(timer.frame_count(), 0);
        timer.update();
        timer.update();
        assert_eq!(timer.frame_count(), 2);
        assert!(timer.delta_time() >= 0.0);
    }
}
