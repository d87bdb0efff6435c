use std::path::PathBuf;

use raylib::prelude::*;

use crate::carousel::layout::CardStyle;

#[derive(Debug, Clone, Copy)]
struct Transition {
    from: CardStyle,
    to: CardStyle,
    timer: f32,
    duration: f32,
}

/// One materialized catalog entry and its live style.
#[derive(Debug)]
pub struct Card {
    pub index: usize,
    pub path: PathBuf,
    pub style: CardStyle,
    transition: Option<Transition>,
}

impl Card {
    pub fn new(index: usize, path: PathBuf) -> Self {
        Self {
            index,
            path,
            style: CardStyle::HIDDEN,
            transition: None,
        }
    }

    /// Applies `target` at once, dropping any transition in flight.
    pub fn set_style(&mut self, target: CardStyle) {
        self.transition = None;
        self.style = target;
    }

    /// Eases translation and opacity toward `target` over `duration` seconds.
    /// Stacking order switches immediately.
    pub fn animate_to(&mut self, target: CardStyle, duration: f32) {
        self.style.z_order = target.z_order;
        if duration <= 0.0 {
            self.set_style(target);
            return;
        }
        self.transition = Some(Transition {
            from: self.style,
            to: target,
            timer: 0.0,
            duration,
        });
    }

    pub fn set_translate(&mut self, translate_x: f32) {
        if let Some(t) = self.transition.as_mut() {
            t.from.translate_x = translate_x;
            t.to.translate_x = translate_x;
        }
        self.style.translate_x = translate_x;
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        if let Some(t) = self.transition.as_mut() {
            t.from.opacity = opacity;
            t.to.opacity = opacity;
        }
        self.style.opacity = opacity;
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn update(&mut self, dt: f32) {
        let Some(t) = self.transition.as_mut() else {
            return;
        };
        t.timer += dt;

        if t.timer >= t.duration {
            self.style = t.to;
            self.transition = None;
            return;
        }

        let (from, to) = (t.from, t.to);
        self.style.translate_x =
            ease::cubic_in_out(t.timer, from.translate_x, to.translate_x - from.translate_x, t.duration);
        self.style.opacity =
            ease::cubic_in_out(t.timer, from.opacity, to.opacity - from.opacity, t.duration).clamp(0.0, 1.0);
    }
}
