use crate::Tween;

/// A clock plus the tweens it drives.
///
/// The timeline owns no targets. Each advance hands `(target, value)` pairs
/// to a caller-supplied closure, which writes them wherever the targets live.
#[derive(Debug, Clone)]
pub struct Timeline<T> {
    tweens: Vec<Tween<T>>,
    elapsed: f64,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self {
            tweens: Vec::new(),
            elapsed: 0.0,
        }
    }
}

impl<T: Copy> Timeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tween. Its delay counts from time zero of this timeline.
    pub fn add(&mut self, tween: Tween<T>) {
        self.tweens.push(tween);
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn tweens(&self) -> &[Tween<T>] {
        &self.tweens
    }

    /// Seconds since time zero.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        self.tweens.iter().all(|t| t.is_finished(self.elapsed))
    }

    /// Move the clock forward by `dt` seconds and apply every tween.
    ///
    /// Negative or non-finite steps leave the clock where it is.
    pub fn advance(&mut self, dt: f32, apply: impl FnMut(T, f32)) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt as f64;
        } else if dt != 0.0 {
            tracing::warn!(dt, "ignoring invalid timeline step");
        }
        self.apply(apply);
    }

    /// Jump the clock to `time` seconds and apply every tween.
    pub fn seek(&mut self, time: f64, apply: impl FnMut(T, f32)) {
        if time.is_finite() && time >= 0.0 {
            self.elapsed = time;
        } else {
            tracing::warn!(time, "ignoring invalid timeline seek");
        }
        self.apply(apply);
    }

    fn apply(&self, mut apply: impl FnMut(T, f32)) {
        for tween in &self.tweens {
            for (target, value) in tween.sample(self.elapsed) {
                apply(target, value);
            }
        }
    }
}
