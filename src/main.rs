use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use raylib::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod carousel;
mod catalog;
mod config;
mod constants;
mod decor;
mod error;
mod input;
mod particles;
mod render;
mod scheduler;
mod texture_loader;

use crate::carousel::{CarouselEngine, Viewport};
use crate::catalog::Catalog;
use crate::config::Args;
use crate::decor::place_decorations;
use crate::input::{InputRouter, NavAction, PointerSample, PointerTracker, perform};
use crate::particles::ParticleField;
use crate::render::Renderer;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    args.validate()?;

    // --- Build the Catalog ---
    let catalog = if args.scan {
        Catalog::scan(&args.image_dir)
    } else {
        Catalog::from_convention(&args.image_dir, args.total_images)
    }
    .with_context(|| format!("cannot build image catalog from {}", args.image_dir.display()))?;
    info!(dir = %args.image_dir.display(), images = catalog.len(), "catalog ready");

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title("Image Carousel")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(args.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let decorations = place_decorations(args.decorations, catalog.len(), &mut rand::rng());
    let mut carousel = CarouselEngine::new(catalog, args.preload, args.card_width);
    let mut particles = ParticleField::new(args.particle_config());
    let mut renderer = Renderer::new(decorations);

    let mut tracker = PointerTracker::default();
    let mut router = InputRouter::new();

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = Duration::from_secs_f32(rl.get_frame_time().max(0.0));

        // Keep cards inside small windows
        let width = rl.get_screen_width() as f32;
        let height = rl.get_screen_height() as f32;
        let viewport = Viewport {
            width,
            height,
            card_width: args.card_width.min(width * 0.9),
            card_height: args.card_height.min(height * 0.7),
        };
        carousel.set_card_width(viewport.card_width);

        // --- Input ---
        let events = tracker.step(PointerSample::poll(&rl));
        router.dispatch(&events, &mut carousel, &mut particles, &viewport);
        if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            perform(NavAction::Prev, &mut carousel);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            perform(NavAction::Next, &mut carousel);
        }

        // --- Update Logic ---
        carousel.update(dt);
        particles.update(dt);
        renderer.sync_textures(&mut rl, &thread, carousel.catalog(), carousel.cards());

        // --- Render ---
        let mut d = rl.begin_drawing(&thread);
        renderer.draw(&mut d, &viewport, &carousel, &particles);
    }

    info!("window closed");
    Ok(())
}
