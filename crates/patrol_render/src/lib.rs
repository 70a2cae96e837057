pub mod camera;
pub mod color;
pub mod draw;
pub mod effects;
pub mod mesh;
pub mod vertex;

pub use camera::{Camera2D, CameraUniform};
pub use draw::{DrawCommand, DrawList, EffectRequest};
pub use effects::EffectPlayer;
pub use mesh::{build_frame_mesh, DrawCall, FrameMesh, TextureSizes};
pub use vertex::QuadVertex;
