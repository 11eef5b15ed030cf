//! Averaged frame-rate counter
//!
//! Hosts feed it every frame delta. The reported value only changes once per
//! update period so it stays readable in a title bar or log line.

/// Default averaging period (seconds)
pub const DEFAULT_UPDATE_PERIOD: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct FpsCounter {
    update_period: f32,
    since_update: f32,
    fps_sum: f32,
    frame_count: u32,
    average: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(DEFAULT_UPDATE_PERIOD)
    }
}

impl FpsCounter {
    pub fn new(update_period: f32) -> Self {
        Self {
            update_period,
            since_update: 0.0,
            fps_sum: 0.0,
            frame_count: 0,
            average: 0,
        }
    }

    pub fn update_period(&self) -> f32 {
        self.update_period
    }

    pub fn set_update_period(&mut self, period: f32) {
        self.update_period = period;
    }

    /// Last completed average
    pub fn average(&self) -> u32 {
        self.average
    }

    /// Record one frame and return the current average
    pub fn record(&mut self, dt: f32) -> u32 {
        if self.since_update > self.update_period && self.frame_count > 0 {
            self.average = (self.fps_sum / self.frame_count as f32).round() as u32;
            self.since_update = 0.0;
            self.fps_sum = 0.0;
            self.frame_count = 0;
        }
        // Zero-length frames carry no rate information
        if dt > 0.0 {
            self.since_update += dt;
            self.fps_sum += 1.0 / dt;
            self.frame_count += 1;
        }
        self.average
    }
}
