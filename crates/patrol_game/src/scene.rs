//! The play scene: a docked ship that steers and launches upward while enemy
//! rectangles scroll right-to-left over a scrolling starfield.
//!
//! `update` advances exactly one frame, in a fixed order:
//!
//!   1. scroll the starfield
//!   2. steer (docked only)
//!   3. launch on fire (docked only), requesting the scale-in effect
//!   4. climb while launched
//!   5. drop the player back to the dock row once it has left the top
//!   6. cycle colour, move and wrap each enemy
//!   7. collide each enemy with the player (squadron variant)
//!
//! The scene owns no renderer. Visual effects go out in the returned
//! `FrameReport`; geometry goes out through `draw`.

use glam::Vec2;
use patrol_core::input::ControlState;
use patrol_core::tween::ScaleTween;
use patrol_render::{DrawList, EffectRequest};

use crate::config::{GameConfig, SceneVariant};
use crate::entities::{Enemy, FlightState, Player, Starfield};

pub const PLAYER_TARGET: &str = "player";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    Launched,
    ReachedTop,
    EnemyWrapped { enemy: usize },
    Collided { enemy: usize },
}

#[derive(Debug, Default)]
pub struct FrameReport {
    pub events: Vec<SceneEvent>,
    pub effects: Vec<EffectRequest>,
}

impl FrameReport {
    #[cfg(test)]
    pub fn has(&self, event: SceneEvent) -> bool {
        self.events.contains(&event)
    }
}

pub struct PlayScene {
    variant: SceneVariant,
    screen: Vec2,
    dock: Vec2,
    movement_speed: f32,
    rotation_speed: f32,
    launch_tween: ScaleTween,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub starfield: Starfield,
}

impl PlayScene {
    pub fn create(config: &GameConfig) -> Self {
        let screen = Vec2::new(config.screen.width as f32, config.screen.height as f32);
        let dock = Vec2::new(screen.x / 2.0, screen.y - config.player.dock_offset);
        let enemies: Vec<Enemy> = config.enemies.iter().map(Enemy::new).collect();

        log::info!(
            "Play scene created: {} variant, {}x{}, {} enemies",
            config.variant,
            config.screen.width,
            config.screen.height,
            enemies.len()
        );

        Self {
            variant: config.variant,
            screen,
            dock,
            movement_speed: config.player.movement_speed,
            rotation_speed: config.player.rotation_speed,
            launch_tween: config.launch_tween(),
            player: Player::new(&config.player, dock),
            enemies,
            starfield: Starfield::new(&config.starfield),
        }
    }

    pub fn dock_position(&self) -> Vec2 {
        self.dock
    }

    /// Advance one frame. `delta_ms` only affects rotation.
    pub fn update(&mut self, controls: ControlState, delta_ms: f32) -> FrameReport {
        let mut report = FrameReport::default();

        self.starfield.scroll();

        if !self.player.is_launched() {
            if controls.left {
                self.steer(-1.0, delta_ms);
            }
            if controls.right {
                self.steer(1.0, delta_ms);
            }
        }

        // No debounce: holding fire re-arms as soon as the player is docked again.
        if controls.fire && !self.player.is_launched() {
            report.effects.push(EffectRequest {
                target: PLAYER_TARGET.to_string(),
                tween: self.launch_tween,
            });
            self.player.flight = FlightState::Launched;
            report.events.push(SceneEvent::Launched);
            log::info!("Player launched from x={:.1}", self.player.position.x);
        }

        if self.player.is_launched() {
            self.player.position.y -= self.movement_speed;
        }

        if self.player.is_off_top() {
            self.player.return_to_dock_row(self.dock.y);
            report.events.push(SceneEvent::ReachedTop);
            log::info!(
                "Player cleared the top edge, back to dock row at x={:.1}",
                self.player.position.x
            );
        }

        for (i, enemy) in self.enemies.iter_mut().enumerate() {
            enemy.cycle_color();
            if enemy.advance(self.screen.x) {
                report.events.push(SceneEvent::EnemyWrapped { enemy: i });
                log::debug!("Enemy {} wrapped to x={:.1}", i, enemy.position.x);
            }
        }

        if self.variant.collides() {
            self.resolve_collisions(&mut report);
        }

        report
    }

    fn steer(&mut self, direction: f32, delta_ms: f32) {
        if self.variant.rotates() {
            self.player.rotation += direction * delta_ms * self.rotation_speed;
        }
        self.player.position.x += direction * self.movement_speed;
    }

    fn resolve_collisions(&mut self, report: &mut FrameReport) {
        for (i, enemy) in self.enemies.iter_mut().enumerate() {
            if !self.player.bounds().overlaps(&enemy.bounds()) {
                continue;
            }
            log::info!(
                "Player hit enemy {} at ({:.1}, {:.1})",
                i,
                enemy.position.x,
                enemy.position.y
            );
            enemy.recycle(self.screen.x);
            self.player.dock(self.dock);
            report.events.push(SceneEvent::Collided { enemy: i });
        }
    }

    pub fn draw(&self, list: &mut DrawList) {
        list.tile_sprite(
            &self.starfield.texture,
            Vec2::ZERO,
            self.screen,
            self.starfield.tile_position_x,
        );
        for (i, enemy) in self.enemies.iter().enumerate() {
            list.rect(
                &enemy_target(i),
                enemy.position,
                enemy.size,
                0.0,
                enemy.fill_color(),
            );
        }
        list.rect(
            PLAYER_TARGET,
            self.player.position,
            self.player.size,
            self.player.rotation,
            self.player.color,
        );
    }
}

pub fn enemy_target(index: usize) -> String {
    format!("enemy_{index}")
}
