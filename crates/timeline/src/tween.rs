use serde::{Deserialize, Serialize};

use crate::{Ease, TweenError};

/// How many extra times a tween sequence plays after the first pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Repeat {
    Count(u32),
    Infinite,
}

/// Timing and value parameters shared by every target of a tween.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TweenParams {
    /// Value every target holds before its animation begins.
    pub from: f32,
    /// Value reached at the end of a forward pass.
    pub to: f32,
    /// Seconds for one target to travel from `from` to `to`.
    pub duration: f32,
    /// Seconds before the first target starts.
    pub delay: f32,
    /// Seconds between the starts of successive targets.
    pub stagger: f32,
    /// Play odd-numbered passes in reverse.
    pub yoyo: bool,
    pub repeat: Repeat,
    pub ease: Ease,
}

impl Default for TweenParams {
    fn default() -> Self {
        Self {
            from: 0.0,
            to: 1.0,
            duration: 0.5,
            delay: 0.0,
            stagger: 0.0,
            yoyo: false,
            repeat: Repeat::Count(0),
            ease: Ease::default(),
        }
    }
}

impl TweenParams {
    pub fn validate(&self) -> Result<(), TweenError> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(TweenError::InvalidDuration(self.duration));
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(TweenError::InvalidDelay(self.delay));
        }
        if !self.stagger.is_finite() || self.stagger < 0.0 {
            return Err(TweenError::InvalidStagger(self.stagger));
        }
        if !self.from.is_finite() || !self.to.is_finite() {
            return Err(TweenError::NonFiniteEndpoint);
        }
        Ok(())
    }
}

/// A staggered tween over an ordered list of targets.
///
/// The targets form one sequence: target `k` starts `k * stagger` seconds
/// into it and the sequence ends when the last target arrives. Repeats and
/// yoyo apply to that whole sequence, so a yoyo pass runs the ripple
/// backwards starting from the last target.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween<T> {
    targets: Vec<T>,
    params: TweenParams,
}

impl<T: Copy> Tween<T> {
    pub fn new(targets: Vec<T>, params: TweenParams) -> Result<Self, TweenError> {
        params.validate()?;
        Ok(Self { targets, params })
    }

    pub fn targets(&self) -> &[T] {
        &self.targets
    }

    pub fn params(&self) -> &TweenParams {
        &self.params
    }

    /// Length of one pass of the staggered sequence, in seconds.
    pub fn cycle_duration(&self) -> f32 {
        let lag = self.targets.len().saturating_sub(1) as f32 * self.params.stagger;
        self.params.duration + lag
    }

    /// Delay plus every pass, or `None` for an endless tween.
    pub fn total_duration(&self) -> Option<f32> {
        match self.params.repeat {
            Repeat::Infinite => None,
            Repeat::Count(n) => {
                Some(self.params.delay + self.cycle_duration() * (n as f32 + 1.0))
            }
        }
    }

    pub fn is_finished(&self, elapsed: f64) -> bool {
        self.total_duration()
            .is_some_and(|total| elapsed >= total as f64)
    }

    /// Position within the current pass after yoyo mirroring. A finished
    /// forward pass reports infinity so every target lands exactly on `to`.
    fn phase(&self, elapsed: f64) -> f64 {
        let local = elapsed - self.params.delay as f64;
        if local <= 0.0 {
            return 0.0;
        }
        let cycle_len = self.cycle_duration() as f64;

        if let Repeat::Count(n) = self.params.repeat {
            if local >= cycle_len * (n as f64 + 1.0) {
                let ends_reversed = self.params.yoyo && n % 2 == 1;
                return if ends_reversed { 0.0 } else { f64::INFINITY };
            }
        }

        let cycle = (local / cycle_len).floor();
        let within = local - cycle * cycle_len;
        if self.params.yoyo && cycle % 2.0 == 1.0 {
            cycle_len - within
        } else {
            within
        }
    }

    fn value_at(&self, index: usize, phase: f64) -> f32 {
        let start = index as f64 * self.params.stagger as f64;
        let progress = ((phase - start) / self.params.duration as f64).clamp(0.0, 1.0);
        let eased = self.params.ease.apply(progress as f32);
        self.params.from + (self.params.to - self.params.from) * eased
    }

    /// Value of every target `elapsed` seconds after the tween was added.
    pub fn sample(&self, elapsed: f64) -> impl Iterator<Item = (T, f32)> + '_ {
        let phase = self.phase(elapsed);
        self.targets
            .iter()
            .enumerate()
            .map(move |(index, target)| (*target, self.value_at(index, phase)))
    }
}
