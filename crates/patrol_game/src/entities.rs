use glam::Vec2;

use crate::collision::Rect;
use crate::config::{EnemyConfig, PlayerConfig, StarfieldConfig};

/// Player flight phase. Steering is only possible while docked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlightState {
    #[default]
    Docked,
    Launched,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec2,
    pub rotation: f32,
    pub size: Vec2,
    pub color: u32,
    pub flight: FlightState,
}

impl Player {
    pub fn new(config: &PlayerConfig, dock: Vec2) -> Self {
        Self {
            position: dock,
            rotation: 0.0,
            size: Vec2::new(config.width, config.height),
            color: config.color,
            flight: FlightState::Docked,
        }
    }

    pub fn is_launched(&self) -> bool {
        self.flight == FlightState::Launched
    }

    /// Return to `dock` and cancel any flight. Rotation is kept.
    pub fn dock(&mut self, dock: Vec2) {
        self.position = dock;
        self.flight = FlightState::Docked;
    }

    /// Drop back to the dock row after clearing the top edge. The steered x
    /// and rotation carry over.
    pub fn return_to_dock_row(&mut self, dock_y: f32) {
        self.position.y = dock_y;
        self.flight = FlightState::Docked;
    }

    /// Past the top edge by at least its own height.
    pub fn is_off_top(&self) -> bool {
        self.position.y <= -self.size.y
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub position: Vec2,
    pub size: Vec2,
    pub base_color: u32,
    /// Running total of `color_step`, wrapping on overflow.
    pub color_offset: u32,
    pub color_step: u32,
    pub speed: f32,
}

impl Enemy {
    pub fn new(config: &EnemyConfig) -> Self {
        Self {
            position: Vec2::new(config.x, config.y),
            size: Vec2::new(config.width, config.height),
            base_color: config.color,
            color_offset: 0,
            color_step: config.color_step,
            speed: config.speed,
        }
    }

    pub fn fill_color(&self) -> u32 {
        self.base_color.wrapping_add(self.color_offset)
    }

    pub fn cycle_color(&mut self) {
        self.color_offset = self.color_offset.wrapping_add(self.color_step);
    }

    /// Move one frame to the left. Returns true if the enemy wrapped.
    pub fn advance(&mut self, screen_width: f32) -> bool {
        self.position.x -= self.speed;
        if self.position.x <= -self.size.x {
            self.recycle(screen_width);
            return true;
        }
        false
    }

    /// Park just past the right edge.
    pub fn recycle(&mut self, screen_width: f32) {
        self.position.x = screen_width + self.size.x;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }
}

#[derive(Debug, Clone)]
pub struct Starfield {
    pub texture: String,
    pub tile_position_x: f32,
    pub scroll_per_frame: f32,
}

impl Starfield {
    pub fn new(config: &StarfieldConfig) -> Self {
        Self {
            texture: config.texture.clone(),
            tile_position_x: 0.0,
            scroll_per_frame: config.scroll_per_frame,
        }
    }

    pub fn scroll(&mut self) {
        self.tile_position_x += self.scroll_per_frame;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy(x: f32, speed: f32) -> Enemy {
        Enemy::new(&EnemyConfig {
            x,
            y: 100.0,
            width: 75.0,
            height: 50.0,
            color: 0xffffff,
            color_step: 0x000101,
            speed,
        })
    }

    #[test]
    fn enemy_wraps_exactly_at_negative_width() {
        let mut e = enemy(-73.5, 1.5);
        assert!(e.advance(640.0));
        assert_eq!(e.position.x, 715.0);

        let mut e = enemy(-73.0, 1.5);
        assert!(!e.advance(640.0));
        assert_eq!(e.position.x, -74.5);
    }

    #[test]
    fn enemy_colour_wraps_without_clamping() {
        let mut e = enemy(0.0, 0.0);
        e.color_offset = u32::MAX;
        e.cycle_color();
        assert_eq!(e.color_offset, 0x000100);
        assert_eq!(e.fill_color(), 0xffffff_u32.wrapping_add(0x000100));
    }

    #[test]
    fn player_off_top_threshold() {
        let mut p = Player::new(&PlayerConfig::default(), Vec2::new(320.0, 430.0));
        p.position.y = -24.0;
        assert!(!p.is_off_top());
        p.position.y = -25.0;
        assert!(p.is_off_top());
    }

    #[test]
    fn dock_keeps_rotation_and_clears_flight() {
        let mut p = Player::new(&PlayerConfig::default(), Vec2::new(320.0, 430.0));
        p.rotation = 1.0;
        p.flight = FlightState::Launched;
        p.position = Vec2::new(10.0, -30.0);
        p.dock(Vec2::new(320.0, 430.0));
        assert_eq!(p.position, Vec2::new(320.0, 430.0));
        assert_eq!(p.flight, FlightState::Docked);
        assert_eq!(p.rotation, 1.0);
    }

    #[test]
    fn dock_row_return_keeps_x() {
        let mut p = Player::new(&PlayerConfig::default(), Vec2::new(320.0, 430.0));
        p.flight = FlightState::Launched;
        p.position = Vec2::new(290.0, -25.0);
        p.return_to_dock_row(430.0);
        assert_eq!(p.position, Vec2::new(290.0, 430.0));
        assert_eq!(p.flight, FlightState::Docked);
    }

    #[test]
    fn starfield_scrolls_by_constant() {
        let mut s = Starfield::new(&StarfieldConfig::default());
        s.scroll();
        s.scroll();
        assert_eq!(s.tile_position_x, -8.0);
    }
}
