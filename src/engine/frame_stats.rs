// Rolling frame-time statistics for the F3 debug panel.

use std::collections::VecDeque;

/// Frames kept for rolling statistics (~2 seconds at 60 fps).
pub const HISTORY_SIZE: usize = 120;

/// Rolling frame-time statistics for the F3 panel.
///
/// Frame times are stored in milliseconds. Every FPS figure is derived
/// from a frame time and reads 0 when that frame time is not positive.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    history: VecDeque<f32>,

    pub current_fps: f32,
    pub avg_fps: f32,
    /// From the slowest frame in the window.
    pub min_fps: f32,
    /// From the fastest frame in the window.
    pub max_fps: f32,

    pub current_frame_ms: f32,
    pub avg_frame_ms: f32,
    pub min_frame_ms: f32,
    pub max_frame_ms: f32,

    pub frame_count: u64,
    pub total_time: f64,
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            history: VecDeque::with_capacity(HISTORY_SIZE + 1),
            ..Default::default()
        }
    }

    /// Record one frame that took `dt` seconds.
    pub fn record(&mut self, dt: f32) {
        self.current_frame_ms = dt * 1000.0;
        self.current_fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };

        self.history.push_back(self.current_frame_ms);
        if self.history.len() > HISTORY_SIZE {
            self.history.pop_front();
        }

        let sum: f32 = self.history.iter().sum();
        self.min_frame_ms = self.history.iter().copied().fold(f32::INFINITY, f32::min);
        self.max_frame_ms = self.history.iter().copied().fold(0.0, f32::max);
        self.avg_frame_ms = sum / self.history.len() as f32;

        self.avg_fps = fps_from_ms(self.avg_frame_ms);
        self.min_fps = fps_from_ms(self.max_frame_ms);
        self.max_fps = fps_from_ms(self.min_frame_ms);

        self.frame_count += 1;
        self.total_time += dt as f64;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Oldest first.
    pub fn history(&self) -> impl Iterator<Item = f32> + '_ {
        self.history.iter().copied()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

fn fps_from_ms(ms: f32) -> f32 {
    if ms > 0.0 { 1000.0 / ms } else { 0.0 }
}
