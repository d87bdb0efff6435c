use rand::Rng;
use raylib::prelude::*;

// Soft purple, blue and pink glows
const PALETTE: [Color; 3] = [
    Color { r: 128, g: 64, b: 255, a: 90 },
    Color { r: 48, g: 112, b: 255, a: 80 },
    Color { r: 255, g: 72, b: 160, a: 70 },
];

/// Large blurred blob behind everything else, nudged by the mouse.
#[derive(Debug, Clone)]
pub struct GradientSphere {
    pub center: Vector2, // Percent of the viewport
    pub radius: f32,
    pub color: Color,
    pub offset: Vector2, // Parallax, in pixels
}

impl GradientSphere {
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        Self {
            center: Vector2::new(rng.random_range(10.0..90.0), rng.random_range(10.0..90.0)),
            radius: rng.random_range(160.0..320.0),
            color: PALETTE[n % PALETTE.len()],
            offset: Vector2::zero(),
        }
    }
}

/// Offset for a cursor at `mouse`: zero at the centre of the viewport,
/// `factor / 2` pixels at its edges.
pub fn parallax_offset(mouse: Vector2, width: f32, height: f32, factor: f32) -> Vector2 {
    Vector2::new(
        (mouse.x / width - 0.5) * factor,
        (mouse.y / height - 0.5) * factor,
    )
}
