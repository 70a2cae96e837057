#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
    pub color: [f32; 4],
}

impl QuadVertex {
    pub const SIZE: usize = std::mem::size_of::<QuadVertex>();

    pub fn as_bytes(vertices: &[QuadVertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}
