use std::time::Duration;

/// Rolling window of recent frame times.
#[derive(Debug)]
pub struct FrameTimer {
    history: Vec<Duration>,
    capacity: usize,
    index: usize,
    filled: bool,
}

impl FrameTimer {
    /// A timer remembering the last `capacity` frames (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: vec![Duration::ZERO; capacity],
            capacity,
            index: 0,
            filled: false,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        self.history[self.index] = dt;
        self.index = (self.index + 1) % self.capacity;
        if self.index == 0 {
            self.filled = true;
        }
    }

    pub fn count(&self) -> usize {
        if self.filled {
            self.capacity
        } else {
            self.index
        }
    }

    /// True each time the window wraps around.
    pub fn window_complete(&self) -> bool {
        self.filled && self.index == 0
    }

    pub fn average(&self) -> Duration {
        let count = self.count();
        if count == 0 {
            return Duration::ZERO;
        }
        let total: Duration = self.history[..count].iter().sum();
        total / count as u32
    }

    pub fn max(&self) -> Duration {
        self.history[..self.count()]
            .iter()
            .copied()
            .max()
            .unwrap_or(Duration::ZERO)
    }

    /// Frames per second implied by the average frame time.
    pub fn fps(&self) -> f32 {
        let avg = self.average().as_secs_f32();
        if avg > 0.0 { 1.0 / avg } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_timer_reports_zero() {
        let timer = FrameTimer::new(4);
        assert_eq!(timer.count(), 0);
        assert_eq!(timer.average(), Duration::ZERO);
        assert_eq!(timer.max(), Duration::ZERO);
        assert_eq!(timer.fps(), 0.0);
    }

    #[test]
    fn average_over_partial_window() {
        let mut timer = FrameTimer::new(4);
        timer.record(Duration::from_millis(10));
        timer.record(Duration::from_millis(20));
        assert_eq!(timer.count(), 2);
        assert_eq!(timer.average(), Duration::from_millis(15));
        assert_eq!(timer.max(), Duration::from_millis(20));
    }

    #[test]
    fn window_wraps_and_forgets_old_frames() {
        let mut timer = FrameTimer::new(2);
        timer.record(Duration::from_millis(100));
        assert!(!timer.window_complete());
        timer.record(Duration::from_millis(16));
        assert!(timer.window_complete());
        timer.record(Duration::from_millis(16));
        assert!(!timer.window_complete());
        assert_eq!(timer.count(), 2);
        assert_eq!(timer.max(), Duration::from_millis(16));
        assert!((timer.fps() - 62.5).abs() < 0.01);
    }

    #[test]
    fn zero_capacity_is_bumped_to_one() {
        let mut timer = FrameTimer::new(0);
        timer.record(Duration::from_millis(5));
        assert_eq!(timer.count(), 1);
    }
}
