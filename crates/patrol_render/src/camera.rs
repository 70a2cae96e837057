use glam::{Mat4, Vec2, Vec4};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Screen-space camera: origin at the top-left corner, y grows downward,
/// one world unit per pixel at zoom 1.
pub struct Camera2D {
    pub scroll: Vec2,
    pub zoom: f32,
    pub viewport: (u32, u32),
}

impl Camera2D {
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            scroll: Vec2::ZERO,
            zoom: 1.0,
            viewport: (viewport_width, viewport_height),
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        let w = (self.viewport.0 as f32) / self.zoom;
        let h = (self.viewport.1 as f32) / self.zoom;

        Mat4::orthographic_rh(
            self.scroll.x,
            self.scroll.x + w,
            self.scroll.y + h,
            self.scroll.y,
            -1.0,
            1.0,
        )
    }

    pub fn build_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
        }
    }

    /// Project a screen point to normalized device coordinates.
    pub fn to_ndc(&self, point: Vec2) -> Vec2 {
        let clip = self.view_proj() * Vec4::new(point.x, point.y, 0.0, 1.0);
        Vec2::new(clip.x, clip.y)
    }
}
