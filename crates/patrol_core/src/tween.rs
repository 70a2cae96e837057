//! Eased scalar tweens with deterministic tick logic.
//!
//! Tweens are fire-and-forget visual effects: the scene requests one, the
//! rendering side plays it. Timing uses integer microseconds (`u64`) so that
//! replaying the same frame deltas always lands on the same value.

use serde::Deserialize;
use std::f32::consts::FRAC_PI_2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    #[default]
    SineOut,
}

impl Ease {
    /// Map normalized progress `t` in `[0, 1]` to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::SineOut => (t * FRAC_PI_2).sin(),
        }
    }
}

/// A request to animate a target's uniform scale from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleTween {
    pub from: f32,
    pub to: f32,
    pub duration_us: u64,
    pub ease: Ease,
}

impl ScaleTween {
    /// The launch "pop": 1.5 down to 1.0 over 300ms, easing out.
    pub const LAUNCH: ScaleTween = ScaleTween {
        from: 1.5,
        to: 1.0,
        duration_us: 300_000,
        ease: Ease::SineOut,
    };

    pub fn sample(&self, elapsed_us: u64) -> f32 {
        if self.duration_us == 0 || elapsed_us >= self.duration_us {
            return self.to;
        }
        let t = elapsed_us as f32 / self.duration_us as f32;
        self.from + (self.to - self.from) * self.ease.apply(t)
    }
}

/// Runtime state for one playing tween.
#[derive(Debug, Clone)]
pub struct TweenState {
    pub tween: ScaleTween,
    pub elapsed_us: u64,
    pub finished: bool,
}

impl TweenState {
    pub fn new(tween: ScaleTween) -> Self {
        Self {
            tween,
            elapsed_us: 0,
            finished: tween.duration_us == 0,
        }
    }

    pub fn value(&self) -> f32 {
        if self.finished {
            self.tween.to
        } else {
            self.tween.sample(self.elapsed_us)
        }
    }

    /// Advance by `dt_us` microseconds and return the current value.
    pub fn tick(&mut self, dt_us: u64) -> f32 {
        if self.finished {
            return self.tween.to;
        }
        self.elapsed_us = self.elapsed_us.saturating_add(dt_us);
        if self.elapsed_us >= self.tween.duration_us {
            self.elapsed_us = self.tween.duration_us;
            self.finished = true;
        }
        self.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn launch_tween_starts_at_from() {
        let state = TweenState::new(ScaleTween::LAUNCH);
        assert!((state.value() - 1.5).abs() < EPS);
        assert!(!state.finished);
    }

    #[test]
    fn sine_out_midpoint() {
        let mut state = TweenState::new(ScaleTween::LAUNCH);
        let value = state.tick(150_000);
        let expected = 1.5 - 0.5 * (std::f32::consts::FRAC_PI_4).sin();
        assert!((value - expected).abs() < EPS);
    }

    #[test]
    fn sine_out_is_ahead_of_linear() {
        let t = 0.25;
        assert!(Ease::SineOut.apply(t) > Ease::Linear.apply(t));
    }

    #[test]
    fn tween_finishes_on_duration_and_holds() {
        let mut state = TweenState::new(ScaleTween::LAUNCH);
        state.tick(200_000);
        assert!(!state.finished);
        let value = state.tick(100_000);
        assert!(state.finished);
        assert!((value - 1.0).abs() < EPS);

        let value = state.tick(1_000_000);
        assert!((value - 1.0).abs() < EPS);
        assert_eq!(state.elapsed_us, 300_000);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let state = TweenState::new(ScaleTween {
            from: 3.0,
            to: 2.0,
            duration_us: 0,
            ease: Ease::Linear,
        });
        assert!(state.finished);
        assert!((state.value() - 2.0).abs() < EPS);
    }

    #[test]
    fn determinism_identical_results() {
        let dt = 16_667u64;
        let mut a = TweenState::new(ScaleTween::LAUNCH);
        let mut b = TweenState::new(ScaleTween::LAUNCH);
        for _ in 0..30 {
            assert_eq!(a.tick(dt).to_bits(), b.tick(dt).to_bits());
        }
        assert_eq!(a.elapsed_us, b.elapsed_us);
    }

    #[test]
    fn ease_clamps_out_of_range_progress() {
        assert_eq!(Ease::Linear.apply(-1.0), 0.0);
        assert_eq!(Ease::Linear.apply(2.0), 1.0);
        assert!((Ease::SineOut.apply(1.5) - 1.0).abs() < EPS);
    }
}
