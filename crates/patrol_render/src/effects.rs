//! Plays scale tweens requested by the scene.
//!
//! Requests are fire-and-forget: the scene never learns when one finishes. A
//! new request for a target that is still animating restarts from the new
//! tween's `from` value. Finished tweens keep reporting their end value so the
//! target does not snap back.

use std::collections::HashMap;

use patrol_core::tween::TweenState;

use crate::draw::EffectRequest;

pub struct EffectPlayer {
    tweens: HashMap<String, TweenState>,
}

impl EffectPlayer {
    pub fn new() -> Self {
        Self {
            tweens: HashMap::new(),
        }
    }

    pub fn play(&mut self, request: &EffectRequest) {
        if let Some(prev) = self.tweens.get(&request.target) {
            if !prev.finished {
                log::debug!(
                    "Restarting scale tween on '{}' at {}us",
                    request.target,
                    prev.elapsed_us
                );
            }
        }
        self.tweens
            .insert(request.target.clone(), TweenState::new(request.tween));
    }

    pub fn tick(&mut self, dt_us: u64) {
        for state in self.tweens.values_mut() {
            state.tick(dt_us);
        }
    }

    /// Current scale of `target`, 1.0 if nothing was ever played on it.
    pub fn scale(&self, target: &str) -> f32 {
        self.tweens.get(target).map_or(1.0, TweenState::value)
    }

    pub fn active_count(&self) -> usize {
        self.tweens.values().filter(|s| !s.finished).count()
    }
}

impl Default for EffectPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patrol_core::tween::ScaleTween;

    fn launch_request() -> EffectRequest {
        EffectRequest {
            target: "player".to_string(),
            tween: ScaleTween::LAUNCH,
        }
    }

    #[test]
    fn idle_target_has_unit_scale() {
        let player = EffectPlayer::new();
        assert_eq!(player.scale("player"), 1.0);
        assert_eq!(player.active_count(), 0);
    }

    #[test]
    fn play_then_tick_to_completion() {
        let mut player = EffectPlayer::new();
        player.play(&launch_request());
        assert!((player.scale("player") - 1.5).abs() < 1e-5);
        assert_eq!(player.active_count(), 1);

        for _ in 0..20 {
            player.tick(16_667);
        }
        assert!((player.scale("player") - 1.0).abs() < 1e-5);
        assert_eq!(player.active_count(), 0);
    }

    #[test]
    fn new_request_restarts_running_tween() {
        let mut player = EffectPlayer::new();
        player.play(&launch_request());
        player.tick(200_000);
        assert!(player.scale("player") < 1.1);

        player.play(&launch_request());
        assert!((player.scale("player") - 1.5).abs() < 1e-5);
    }

    #[test]
    fn targets_are_independent() {
        let mut player = EffectPlayer::new();
        player.play(&launch_request());
        assert_eq!(player.scale("enemy_0"), 1.0);
    }
}
