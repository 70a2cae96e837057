//! Per-frame clock. The scene is variable-step: each frame receives the
//! externally measured delta in milliseconds, exactly as the host loop saw it.

const FPS_SAMPLE_COUNT: usize = 60;

pub struct FrameClock {
    pub max_delta_ms: f64,
    pub total_time_ms: f64,
    pub frame_count: u64,
    pub delta_ms: f64,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            max_delta_ms: 250.0,
            total_time_ms: 0.0,
            frame_count: 0,
            delta_ms: 0.0,
            fps_samples: [1000.0 / 60.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 60.0,
            smoothed_frame_time_ms: 16.667,
        }
    }

    /// Feed one frame's delta. Returns the delta the scene should use.
    pub fn advance(&mut self, delta_ms: f64) -> f64 {
        let mut delta_ms = delta_ms.max(0.0);

        // A stalled host (debugger, window drag) should not fling the rotation.
        if delta_ms > self.max_delta_ms {
            log::warn!(
                "Frame took {:.1}ms, capping delta to {}ms",
                delta_ms,
                self.max_delta_ms
            );
            delta_ms = self.max_delta_ms;
        }

        self.delta_ms = delta_ms;
        self.total_time_ms += delta_ms;
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = delta_ms;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_ms: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_ms;
        self.smoothed_fps = if avg_ms > 0.0 { 1000.0 / avg_ms } else { 0.0 };

        delta_ms
    }

    /// Delta converted to whole microseconds for tween ticking.
    pub fn delta_us(&self) -> u64 {
        (self.delta_ms * 1000.0).round() as u64
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
