pub mod card;
pub mod engine;
pub mod layout;
pub mod state;

pub use engine::CarouselEngine;
pub use layout::Viewport;
