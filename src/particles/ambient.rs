use std::time::Duration;

use rand::Rng;
use raylib::prelude::*;

use crate::particles::ParticleConfig;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum AmbientPhase {
    Waiting, // Invisible at its start position until the delay elapses
    Moving,  // Drifting toward its target
}

/// Background dot that keeps re-animating for the life of the window.
/// Positions are percentages of the viewport.
#[derive(Debug, Clone)]
pub struct AmbientParticle {
    pub id: usize,
    pub size: f32,
    pub position: Vector2,
    pub opacity: f32,
    pub phase: AmbientPhase,
    pub duration: Duration,
    pub delay: Duration,

    origin: Vector2,
    target: Vector2,
    target_opacity: f32,
    elapsed: Duration,
}

impl AmbientParticle {
    pub fn new<R: Rng>(id: usize, config: &ParticleConfig, rng: &mut R) -> Self {
        let mut particle = Self {
            id,
            size: config.ambient_size.sample(rng),
            position: Vector2::zero(),
            opacity: 0.0,
            phase: AmbientPhase::Waiting,
            duration: Duration::ZERO,
            delay: Duration::ZERO,
            origin: Vector2::zero(),
            target: Vector2::zero(),
            target_opacity: 0.0,
            elapsed: Duration::ZERO,
        };
        particle.reset(config, rng);
        particle
    }

    /// Jumps to a fresh random spot, hidden, and draws timings for the next
    /// cycle. Returns how long to wait before moving.
    pub fn reset<R: Rng>(&mut self, config: &ParticleConfig, rng: &mut R) -> Duration {
        self.origin = Vector2::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0));
        self.position = self.origin;
        self.target = self.origin;
        self.opacity = 0.0;
        self.phase = AmbientPhase::Waiting;
        self.elapsed = Duration::ZERO;

        self.duration = Duration::from_secs_f32(config.ambient_duration.sample(rng));
        self.delay = Duration::from_secs_f32(config.ambient_delay.sample(rng));
        self.delay
    }

    /// Picks a nearby target, mostly upwards. Returns how long the move takes.
    pub fn start_moving<R: Rng>(&mut self, config: &ParticleConfig, rng: &mut R) -> Duration {
        let drift = config.ambient_drift_x;
        let dx = if drift > 0.0 { rng.random_range(-drift..drift) } else { 0.0 };
        let dy = config.ambient_rise.sample(rng);

        self.target = Vector2::new(self.origin.x + dx, self.origin.y - dy);
        self.target_opacity = config.ambient_opacity.sample(rng);
        self.phase = AmbientPhase::Moving;
        self.elapsed = Duration::ZERO;
        self.duration
    }

    pub fn update(&mut self, dt: Duration) {
        if self.phase != AmbientPhase::Moving {
            return;
        }
        self.elapsed = (self.elapsed + dt).min(self.duration);
        let t = if self.duration.is_zero() {
            1.0
        } else {
            self.elapsed.as_secs_f32() / self.duration.as_secs_f32()
        };

        self.position = self.origin.lerp(self.target, t);
        self.opacity = raylib::core::math::lerp(0.0, self.target_opacity, t);
    }
}
