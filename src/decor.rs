use rand::Rng;
use tracing::warn;

const LEFT_COLUMN: f32 = 15.0;   // Percent from the left edge
const RIGHT_COLUMN: f32 = 75.0;
const MIN_SPACING: f32 = 40.0;   // Percent distance between two decorations
const MAX_ATTEMPTS: usize = 64;  // Per decoration, before giving up on it

/// Small tilted catalog image pinned at the side of the window.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub image_index: usize,
    pub width: f32,  // Pixels
    pub tilt: f32,   // Degrees
    pub top: f32,    // Percent
    pub left: f32,   // Percent
}

/// Scatters up to `count` random catalog images along the left and right
/// columns, keeping them at least `MIN_SPACING` apart.
///
/// Only a few spots fit, so a decoration that finds no free spot after
/// `MAX_ATTEMPTS` tries is left out.
pub fn place_decorations<R: Rng>(count: usize, catalog_len: usize, rng: &mut R) -> Vec<Decoration> {
    let mut placed: Vec<Decoration> = Vec::with_capacity(count);
    if catalog_len == 0 {
        return placed;
    }

    for n in 0..count {
        let image_index = rng.random_range(0..catalog_len);
        let width = rng.random_range(80..150) as f32;
        let tilt = rng.random_range(-15..15) as f32;

        let spot = (0..MAX_ATTEMPTS).find_map(|_| {
            let left = if rng.random_bool(0.5) { LEFT_COLUMN } else { RIGHT_COLUMN };
            let top = rng.random_range(20.0..80.0);
            let clear = placed.iter().all(|p| {
                let distance = ((top - p.top).powi(2) + (left - p.left).powi(2)).sqrt();
                distance >= MIN_SPACING
            });
            clear.then_some((top, left))
        });

        match spot {
            Some((top, left)) => placed.push(Decoration { image_index, width, tilt, top, left }),
            None => warn!(decoration = n, "no free spot left for decoration, skipping"),
        }
    }
    placed
}
