use std::time::Duration;

use raylib::prelude::*;

use crate::constants::*;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TrailPhase {
    Spawned,
    Fading,
}

/// Short-lived dot left behind by the mouse. Positions are percentages of the viewport.
#[derive(Debug, Clone)]
pub struct TrailParticle {
    pub size: f32,
    pub position: Vector2,
    pub opacity: f32,
    pub phase: TrailPhase,
    pub age: Duration,

    origin: Vector2,
    target: Vector2,
}

impl TrailParticle {
    pub fn new(origin: Vector2, target: Vector2, size: f32) -> Self {
        Self {
            size,
            position: origin,
            opacity: TRAIL_START_OPACITY,
            phase: TrailPhase::Spawned,
            age: Duration::ZERO,
            origin,
            target,
        }
    }

    pub fn lifetime() -> Duration {
        TRAIL_SPAWN_DELAY + TRAIL_FADE_DURATION
    }

    pub fn is_expired(&self) -> bool {
        self.age >= Self::lifetime()
    }

    pub fn update(&mut self, dt: Duration) {
        self.age += dt;
        if self.age < TRAIL_SPAWN_DELAY {
            return;
        }
        self.phase = TrailPhase::Fading;

        let fade = (self.age - TRAIL_SPAWN_DELAY).min(TRAIL_FADE_DURATION);
        let t = ease::cubic_out(fade.as_secs_f32(), 0.0, 1.0, TRAIL_FADE_DURATION.as_secs_f32());
        self.position = self.origin.lerp(self.target, t);
        self.opacity = raylib::core::math::lerp(TRAIL_START_OPACITY, 0.0, t).max(0.0);
    }
}
