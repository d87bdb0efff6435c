use std::time::Duration;

pub const WINDOW_WIDTH: i32 = 1280;           // Default window width
pub const WINDOW_HEIGHT: i32 = 720;           // Default window height
pub const FPS: u32 = 60;                      // Frames per second

pub const TOTAL_IMAGES: usize = 100;          // Catalog size when built from the naming convention
pub const PRELOAD_COUNT: usize = 3;           // Cards materialized before and after the current one
pub const CARD_WIDTH: f32 = 480.0;
pub const CARD_HEIGHT: f32 = 320.0;

pub const TRANSITION_DURATION: Duration = Duration::from_millis(500);
pub const DRAG_THRESHOLD: f32 = 100.0;        // Pixels a release must exceed to change card
pub const DRAG_FADE_DISTANCE: f32 = 100.0;    // Drag distance at which the next card is fully opaque
pub const NEXT_CARD_OFFSET: f32 = 20.0;       // Resting offset of the card after the current one

pub const AMBIENT_PARTICLES: usize = 80;
pub const GRADIENT_SPHERES: usize = 3;
pub const DECORATIONS: usize = 4;

pub const TRAIL_SPAWN_DELAY: Duration = Duration::from_millis(10);
pub const TRAIL_FADE_DURATION: Duration = Duration::from_millis(2000);
pub const TRAIL_START_OPACITY: f32 = 0.6;
pub const PARALLAX_FACTOR: f32 = 5.0;         // Max sphere offset in pixels, per half viewport
