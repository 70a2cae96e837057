/// Convert a packed `0xRRGGBB` colour to normalized RGBA. Bits above the low
/// 24 are ignored, so colour offsets that have wrapped past white still render.
pub fn rgb_to_rgba(rgb: u32, alpha: f32) -> [f32; 4] {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    [r, g, b, alpha]
}
