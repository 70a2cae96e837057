//! Draw commands a scene hands to the renderer each frame.

use glam::Vec2;
use patrol_core::tween::ScaleTween;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A repeating texture stretched over `size` at `origin` (top-left),
    /// sampled with a horizontal texel offset.
    TileSprite {
        texture: String,
        origin: Vec2,
        size: Vec2,
        offset_x: f32,
    },
    /// A solid rectangle, rotated (radians) and scaled about its centre.
    Rect {
        target: String,
        center: Vec2,
        size: Vec2,
        rotation: f32,
        color: u32,
    },
}

/// A fire-and-forget visual effect aimed at a named draw target.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectRequest {
    pub target: String,
    pub tween: ScaleTween,
}

#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn tile_sprite(&mut self, texture: &str, origin: Vec2, size: Vec2, offset_x: f32) {
        self.commands.push(DrawCommand::TileSprite {
            texture: texture.to_string(),
            origin,
            size,
            offset_x,
        });
    }

    pub fn rect(&mut self, target: &str, center: Vec2, size: Vec2, rotation: f32, color: u32) {
        self.commands.push(DrawCommand::Rect {
            target: target.to_string(),
            center,
            size,
            rotation,
            color,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_keep_submission_order() {
        let mut list = DrawList::new();
        list.tile_sprite("starfield", Vec2::ZERO, Vec2::new(640.0, 480.0), -4.0);
        list.rect("player", Vec2::new(320.0, 430.0), Vec2::splat(25.0), 0.0, 0xff0000);

        assert_eq!(list.len(), 2);
        assert!(matches!(list.commands()[0], DrawCommand::TileSprite { .. }));
        assert!(matches!(list.commands()[1], DrawCommand::Rect { .. }));

        list.clear();
        assert!(list.is_empty());
    }
}
