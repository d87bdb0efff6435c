//! Decorative background: ambient dots, mouse trail and parallax spheres.
//!
//! Nothing here knows about the carousel. Ambient particles cycle forever
//! through a scheduler keyed by particle id; trail particles age out on their
//! own and are dropped once expired.

pub mod ambient;
pub mod sphere;
pub mod trail;

use std::time::Duration;

use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use raylib::prelude::*;
use tracing::trace;

use crate::constants::*;
use crate::scheduler::Scheduler;

use ambient::{AmbientParticle, AmbientPhase};
use sphere::GradientSphere;
use trail::TrailParticle;

/// Closed range of a random quantity. `min == max` pins the value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: f32) -> Self {
        Self { min: value, max: value }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.max <= self.min {
            self.min
        } else {
            rng.random_range(self.min..self.max)
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParticleConfig {
    pub ambient_count: usize,
    pub ambient_size: Span,     // Pixels
    pub ambient_duration: Span, // Seconds
    pub ambient_delay: Span,    // Seconds
    pub ambient_opacity: Span,
    pub ambient_drift_x: f32,   // Percent, either side
    pub ambient_rise: Span,     // Percent, upwards

    pub trail_size: Span,
    pub trail_drift: f32,       // Percent, either side on both axes

    pub sphere_count: usize,
    pub parallax: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            ambient_count: AMBIENT_PARTICLES,
            ambient_size: Span::new(1.0, 4.0),
            ambient_duration: Span::new(10.0, 20.0),
            ambient_delay: Span::new(0.0, 5.0),
            ambient_opacity: Span::new(0.1, 0.4),
            ambient_drift_x: 10.0,
            ambient_rise: Span::new(0.0, 30.0),
            trail_size: Span::new(2.0, 6.0),
            trail_drift: 5.0,
            sphere_count: GRADIENT_SPHERES,
            parallax: PARALLAX_FACTOR,
        }
    }
}

pub struct ParticleField {
    config: ParticleConfig,
    rng: StdRng,

    ambient: Vec<AmbientParticle>,
    trails: Vec<TrailParticle>,
    spheres: Vec<GradientSphere>,

    timers: Scheduler<usize>, // Keyed by ambient particle id
}

impl ParticleField {
    pub fn new(config: ParticleConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn with_rng(config: ParticleConfig, mut rng: StdRng) -> Self {
        let mut timers = Scheduler::new();
        let ambient: Vec<AmbientParticle> = (0..config.ambient_count)
            .map(|id| {
                let particle = AmbientParticle::new(id, &config, &mut rng);
                timers.schedule(id, particle.delay);
                particle
            })
            .collect();
        let spheres = (0..config.sphere_count)
            .map(|n| GradientSphere::random(n, &mut rng))
            .collect();

        Self {
            config,
            rng,
            ambient,
            trails: Vec::new(),
            spheres,
            timers,
        }
    }

    pub fn ambient(&self) -> &[AmbientParticle] {
        &self.ambient
    }

    pub fn trails(&self) -> &[TrailParticle] {
        &self.trails
    }

    pub fn spheres(&self) -> &[GradientSphere] {
        &self.spheres
    }

    /// Leaves a trail particle under the cursor and shifts the spheres.
    pub fn on_mouse_move(&mut self, mouse: Vector2, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let origin = Vector2::new(mouse.x / width * 100.0, mouse.y / height * 100.0);
        let drift = self.config.trail_drift;
        let (dx, dy) = if drift > 0.0 {
            (self.rng.random_range(-drift..drift), self.rng.random_range(-drift..drift))
        } else {
            (0.0, 0.0)
        };
        let target = Vector2::new(origin.x + dx, origin.y + dy);
        let size = self.config.trail_size.sample(&mut self.rng);
        self.trails.push(TrailParticle::new(origin, target, size));

        let offset = sphere::parallax_offset(mouse, width, height, self.config.parallax);
        for sphere in self.spheres.iter_mut() {
            sphere.offset = offset;
        }
    }

    pub fn update(&mut self, dt: Duration) {
        for particle in self.ambient.iter_mut() {
            particle.update(dt);
        }

        for id in self.timers.advance(dt) {
            let Some(particle) = self.ambient.get_mut(id) else {
                continue;
            };
            let next = match particle.phase {
                AmbientPhase::Waiting => particle.start_moving(&self.config, &mut self.rng),
                AmbientPhase::Moving => particle.reset(&self.config, &mut self.rng),
            };
            self.timers.schedule(id, next);
        }

        for trail in self.trails.iter_mut() {
            trail.update(dt);
        }
        let before = self.trails.len();
        self.trails.retain(|t| !t.is_expired());
        if self.trails.len() != before {
            trace!(removed = before - self.trails.len(), "trail particles expired");
        }
    }
}
