//! Rectangle overlap for player/enemy hits.
//!
//! Rectangles are built straight from an entity's position and size, with no
//! origin adjustment. Overlap uses strict inequalities, so rectangles that
//! only share an edge do not collide.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Enemy-sized box at (100, 100), 75x50. Player boxes are 25x25.
    const ENEMY: Rect = Rect::new(100.0, 100.0, 75.0, 50.0);

    fn player_at(x: f32, y: f32) -> Rect {
        Rect::new(x, y, 25.0, 25.0)
    }

    #[test]
    fn overlapping_boxes_collide_both_ways() {
        let player = player_at(120.0, 110.0);
        assert!(player.overlaps(&ENEMY));
        assert!(ENEMY.overlaps(&player));
    }

    #[test]
    fn player_left_of_enemy_right_edge() {
        // P.x < E.x + E.w
        assert!(player_at(174.0, 110.0).overlaps(&ENEMY));
        assert!(!player_at(175.0, 110.0).overlaps(&ENEMY), "touching right edge");
        assert!(!player_at(200.0, 110.0).overlaps(&ENEMY));
    }

    #[test]
    fn player_right_edge_past_enemy_left() {
        // P.x + P.w > E.x
        assert!(player_at(76.0, 110.0).overlaps(&ENEMY));
        assert!(!player_at(75.0, 110.0).overlaps(&ENEMY), "touching left edge");
        assert!(!player_at(40.0, 110.0).overlaps(&ENEMY));
    }

    #[test]
    fn player_above_enemy_bottom_edge() {
        // P.y < E.y + E.h
        assert!(player_at(120.0, 149.0).overlaps(&ENEMY));
        assert!(!player_at(120.0, 150.0).overlaps(&ENEMY), "touching bottom edge");
        assert!(!player_at(120.0, 400.0).overlaps(&ENEMY));
    }

    #[test]
    fn player_bottom_edge_past_enemy_top() {
        // P.y + P.h > E.y
        assert!(player_at(120.0, 76.0).overlaps(&ENEMY));
        assert!(!player_at(120.0, 75.0).overlaps(&ENEMY), "touching top edge");
        assert!(!player_at(120.0, 0.0).overlaps(&ENEMY));
    }

    #[test]
    fn contained_box_collides() {
        let big = Rect::new(0.0, 0.0, 500.0, 500.0);
        assert!(big.overlaps(&ENEMY));
        assert!(ENEMY.overlaps(&big));
    }
}
