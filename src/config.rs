//! Command line options.

use std::path::PathBuf;

use clap::Parser;

use crate::constants::*;
use crate::error::{CarouselError, Result};
use crate::particles::ParticleConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "carousel", version, about = "Drag-to-browse image carousel over an animated particle background")]
pub struct Args {
    /// Directory holding the images
    #[arg(default_value = "images")]
    pub image_dir: PathBuf,

    /// Number of `image (k).jpg` files to expect, k starting at 1
    #[arg(long, default_value_t = TOTAL_IMAGES)]
    pub total_images: usize,

    /// List the directory instead of assuming the naming convention
    #[arg(long)]
    pub scan: bool,

    /// Cards kept loaded before and after the current one
    #[arg(long, default_value_t = PRELOAD_COUNT)]
    pub preload: usize,

    /// Ambient background particles
    #[arg(long, default_value_t = AMBIENT_PARTICLES)]
    pub particles: usize,

    /// Gradient spheres reacting to the mouse
    #[arg(long, default_value_t = GRADIENT_SPHERES)]
    pub spheres: usize,

    /// Random images pinned beside the carousel
    #[arg(long, default_value_t = DECORATIONS)]
    pub decorations: usize,

    #[arg(long, default_value_t = WINDOW_WIDTH)]
    pub width: i32,

    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    pub height: i32,

    #[arg(long, default_value_t = CARD_WIDTH)]
    pub card_width: f32,

    #[arg(long, default_value_t = CARD_HEIGHT)]
    pub card_height: f32,

    #[arg(long, default_value_t = FPS)]
    pub fps: u32,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

fn invalid(name: &'static str, reason: &str) -> CarouselError {
    CarouselError::InvalidSetting { name, reason: reason.to_string() }
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        if !self.scan && self.total_images == 0 {
            return Err(invalid("total-images", "must be at least 1"));
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(invalid("width/height", "window must have a positive size"));
        }
        if !(self.card_width > 0.0 && self.card_height > 0.0) {
            return Err(invalid("card-width/card-height", "cards must have a positive size"));
        }
        if self.fps == 0 {
            return Err(invalid("fps", "must be at least 1"));
        }
        Ok(())
    }

    pub fn particle_config(&self) -> ParticleConfig {
        ParticleConfig {
            ambient_count: self.particles,
            sphere_count: self.spheres,
            ..ParticleConfig::default()
        }
    }
}
