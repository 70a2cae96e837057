//! CPU-side quad mesh building for one frame.
//!
//! Every draw command becomes one textured quad. Solid rectangles sample a
//! 1x1 white texture (`WHITE_TEXTURE`) tinted by vertex colour, so a frame with
//! a background and a few shapes collapses into very few texture binds.

use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec2;

use crate::camera::{Camera2D, CameraUniform};
use crate::color::rgb_to_rgba;
use crate::draw::{DrawCommand, DrawList};
use crate::effects::EffectPlayer;
use crate::vertex::QuadVertex;

pub const WHITE_TEXTURE: &str = "__white";

/// Pixel sizes of the textures the renderer has loaded, keyed by texture name.
pub type TextureSizes = HashMap<String, (u32, u32)>;

/// A contiguous run of indices that share the same texture binding.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub texture_key: Arc<str>,
    pub index_start: u32,
    pub index_count: u32,
}

#[derive(Debug, Default)]
pub struct FrameMesh {
    pub vertices: Vec<QuadVertex>,
    pub indices: Vec<u32>,
    pub draw_calls: Vec<DrawCall>,
    pub camera: Option<CameraUniform>,
}

impl FrameMesh {
    pub fn quad_count(&self) -> usize {
        self.indices.len() / 6
    }

    pub fn texture_binds(&self) -> usize {
        count_texture_binds(&self.draw_calls)
    }
}

struct QuadSpec<'a> {
    texture_key: &'a str,
    corners: [Vec2; 4],
    uvs: [Vec2; 4],
    color: [f32; 4],
}

/// Build the frame's quads from `list`, applying effect scales per target.
pub fn build_frame_mesh(
    list: &DrawList,
    effects: &EffectPlayer,
    textures: &TextureSizes,
    camera: &Camera2D,
) -> FrameMesh {
    let mut mesh = FrameMesh {
        camera: Some(camera.build_uniform()),
        ..FrameMesh::default()
    };

    for command in list.commands() {
        match command {
            DrawCommand::TileSprite {
                texture,
                origin,
                size,
                offset_x,
            } => {
                let Some(&(tex_w, tex_h)) = textures.get(texture) else {
                    log::warn!("Skipping tile sprite due to missing texture '{}'", texture);
                    continue;
                };
                if tex_w == 0 || tex_h == 0 {
                    log::warn!("Skipping tile sprite with empty texture '{}'", texture);
                    continue;
                }
                let u0 = offset_x / tex_w as f32;
                let u1 = (offset_x + size.x) / tex_w as f32;
                let v1 = size.y / tex_h as f32;
                add_quad(
                    &mut mesh,
                    QuadSpec {
                        texture_key: texture,
                        corners: [
                            *origin,
                            Vec2::new(origin.x + size.x, origin.y),
                            *origin + *size,
                            Vec2::new(origin.x, origin.y + size.y),
                        ],
                        uvs: [
                            Vec2::new(u0, 0.0),
                            Vec2::new(u1, 0.0),
                            Vec2::new(u1, v1),
                            Vec2::new(u0, v1),
                        ],
                        color: [1.0; 4],
                    },
                );
            }
            DrawCommand::Rect {
                target,
                center,
                size,
                rotation,
                color,
            } => {
                let scale = effects.scale(target);
                add_quad(
                    &mut mesh,
                    QuadSpec {
                        texture_key: WHITE_TEXTURE,
                        corners: rect_corners(*center, *size * scale, *rotation),
                        uvs: [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y],
                        color: rgb_to_rgba(*color, 1.0),
                    },
                );
            }
        }
    }

    mesh
}

/// Corners of a `size` rectangle rotated about `center`, clockwise from top-left
/// in screen space.
pub fn rect_corners(center: Vec2, size: Vec2, rotation: f32) -> [Vec2; 4] {
    let half = size * 0.5;
    let rot = Vec2::from_angle(rotation);
    [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ]
    .map(|corner| center + rot.rotate(corner))
}

fn add_quad(mesh: &mut FrameMesh, spec: QuadSpec<'_>) {
    let base_index = mesh.vertices.len() as u32;
    for (corner, uv) in spec.corners.iter().zip(spec.uvs.iter()) {
        mesh.vertices.push(QuadVertex {
            position: corner.to_array(),
            tex_coords: uv.to_array(),
            color: spec.color,
        });
    }

    let draw_start = mesh.indices.len() as u32;
    mesh.indices.extend_from_slice(&[
        base_index,
        base_index + 1,
        base_index + 2,
        base_index,
        base_index + 2,
        base_index + 3,
    ]);

    push_draw_call(
        &mut mesh.draw_calls,
        Arc::from(spec.texture_key),
        draw_start,
        6,
    );
}

/// Append a draw call, merging with the previous one when the texture matches
/// and indices are contiguous.
fn push_draw_call(
    draw_calls: &mut Vec<DrawCall>,
    texture_key: Arc<str>,
    index_start: u32,
    index_count: u32,
) {
    if let Some(last) = draw_calls.last_mut() {
        let contiguous = last.index_start + last.index_count == index_start;
        if *last.texture_key == *texture_key && contiguous {
            last.index_count += index_count;
            return;
        }
    }
    draw_calls.push(DrawCall {
        texture_key,
        index_start,
        index_count,
    });
}

fn count_texture_binds(draw_calls: &[DrawCall]) -> usize {
    let mut binds = 0usize;
    let mut current: Option<&str> = None;
    for draw in draw_calls {
        let key: &str = &draw.texture_key;
        if current != Some(key) {
            current = Some(key);
            binds += 1;
        }
    }
    binds
}
