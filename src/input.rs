use raylib::prelude::*;

use crate::carousel::CarouselEngine;
use crate::carousel::layout::{Viewport, contains};
use crate::particles::ParticleField;

const BUTTON_WIDTH: f32 = 120.0;
const BUTTON_HEIGHT: f32 = 44.0;
const BUTTON_GAP: f32 = 24.0; // Below the card, and between the two buttons

/// Primary pointer state for one frame: the mouse, or the first touch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: Vector2,
    pub down: bool,
}

impl PointerSample {
    pub fn poll(rl: &RaylibHandle) -> Self {
        if rl.get_touch_point_count() > 0 {
            Self { position: rl.get_touch_position(0), down: true }
        } else {
            Self {
                position: rl.get_mouse_position(),
                down: rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed(Vector2),
    Moved(Vector2),
    Released(Vector2),
}

/// Turns per-frame pointer samples into press/move/release events.
#[derive(Debug, Default)]
pub struct PointerTracker {
    last: Option<PointerSample>,
}

impl PointerTracker {
    pub fn step(&mut self, sample: PointerSample) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let (was_down, moved) = match self.last {
            Some(last) => (last.down, last.position != sample.position),
            None => (false, false),
        };

        if moved {
            events.push(PointerEvent::Moved(sample.position));
        }
        if sample.down && !was_down {
            events.push(PointerEvent::Pressed(sample.position));
        } else if !sample.down && was_down {
            events.push(PointerEvent::Released(sample.position));
        }

        self.last = Some(sample);
        events
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavAction {
    Prev,
    Next,
}

#[derive(Debug, Clone, Copy)]
pub struct NavButton {
    pub rect: Rectangle,
    pub action: NavAction,
    pub label: &'static str,
}

/// The two buttons, side by side under the card slot.
pub fn nav_buttons(viewport: &Viewport) -> [NavButton; 2] {
    let card = viewport.card_rect(0.0);
    let y = card.y + card.height + BUTTON_GAP;
    let centre = viewport.width * 0.5;
    [
        NavButton {
            rect: Rectangle::new(centre - BUTTON_GAP * 0.5 - BUTTON_WIDTH, y, BUTTON_WIDTH, BUTTON_HEIGHT),
            action: NavAction::Prev,
            label: "Prev",
        },
        NavButton {
            rect: Rectangle::new(centre + BUTTON_GAP * 0.5, y, BUTTON_WIDTH, BUTTON_HEIGHT),
            action: NavAction::Next,
            label: "Next",
        },
    ]
}

fn button_at(viewport: &Viewport, point: Vector2) -> Option<NavAction> {
    nav_buttons(viewport)
        .iter()
        .find(|b| contains(&b.rect, point))
        .map(|b| b.action)
}

pub fn perform(action: NavAction, carousel: &mut CarouselEngine) -> bool {
    match action {
        NavAction::Prev => carousel.prev(),
        NavAction::Next => carousel.next(),
    }
}

/// Routes pointer events to the carousel and the particle field.
#[derive(Debug, Default)]
pub struct InputRouter {
    armed_button: Option<NavAction>, // Button the pointer went down on
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(
        &mut self,
        events: &[PointerEvent],
        carousel: &mut CarouselEngine,
        particles: &mut ParticleField,
        viewport: &Viewport,
    ) {
        for event in events {
            match *event {
                PointerEvent::Moved(p) => {
                    particles.on_mouse_move(p, viewport.width, viewport.height);

                    if carousel.is_dragging() {
                        let current = carousel.state().current_index;
                        carousel.drag(current, p.x);
                        let card = viewport.card_rect(carousel.state().current_translate_x);
                        if !contains(&card, p) {
                            carousel.end_drag();
                        }
                    }
                }
                PointerEvent::Pressed(p) => {
                    self.armed_button = button_at(viewport, p);
                    if self.armed_button.is_none() {
                        if let Some(index) = carousel.card_at(p, viewport) {
                            carousel.start_drag(index, p.x);
                        }
                    }
                }
                PointerEvent::Released(p) => {
                    carousel.end_drag();
                    if let Some(action) = self.armed_button.take() {
                        if button_at(viewport, p) == Some(action) {
                            perform(action, carousel);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::particles::ParticleConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::path::Path;
    use std::time::Duration;

    const VIEWPORT: Viewport = Viewport { width: 1280.0, height: 720.0, card_width: 480.0, card_height: 320.0 };

    fn setup() -> (CarouselEngine, ParticleField, InputRouter) {
        let catalog = Catalog::from_convention(Path::new("images"), 100).unwrap();
        let carousel = CarouselEngine::new(catalog, 3, VIEWPORT.card_width);
        let config = ParticleConfig { ambient_count: 0, ..ParticleConfig::default() };
        let particles = ParticleField::with_rng(config, StdRng::seed_from_u64(3));
        (carousel, particles, InputRouter::new())
    }

    fn sample(x: f32, y: f32, down: bool) -> PointerSample {
        PointerSample { position: Vector2::new(x, y), down }
    }

    #[test]
    fn test_tracker_edges() {
        let mut tracker = PointerTracker::default();
        assert!(tracker.step(sample(10.0, 10.0, false)).is_empty());
        assert_eq!(
            tracker.step(sample(12.0, 10.0, true)),
            vec![PointerEvent::Moved(Vector2::new(12.0, 10.0)), PointerEvent::Pressed(Vector2::new(12.0, 10.0))]
        );
        assert!(tracker.step(sample(12.0, 10.0, true)).is_empty());
        assert_eq!(tracker.step(sample(12.0, 10.0, false)), vec![PointerEvent::Released(Vector2::new(12.0, 10.0))]);
    }

    #[test]
    fn test_swipe_left_moves_forward() {
        let (mut carousel, mut particles, mut router) = setup();
        let mut tracker = PointerTracker::default();
        let frames = [
            sample(700.0, 360.0, false),
            sample(700.0, 360.0, true),
            sample(640.0, 360.0, true),
            sample(560.0, 360.0, true),
            sample(560.0, 360.0, false),
        ];
        for frame in frames {
            let events = tracker.step(frame);
            router.dispatch(&events, &mut carousel, &mut particles, &VIEWPORT);
            carousel.update(Duration::from_millis(16));
        }
        assert_eq!(carousel.state().current_index, 1);
        assert!(!carousel.is_dragging());
        assert_eq!(particles.trails().len(), 2);
    }

    #[test]
    fn test_leaving_the_card_ends_the_drag() {
        let (mut carousel, mut particles, mut router) = setup();
        router.dispatch(&[PointerEvent::Pressed(Vector2::new(640.0, 360.0))], &mut carousel, &mut particles, &VIEWPORT);
        assert!(carousel.is_dragging());
        router.dispatch(&[PointerEvent::Moved(Vector2::new(640.0, 700.0))], &mut carousel, &mut particles, &VIEWPORT);
        assert!(!carousel.is_dragging());
        assert_eq!(carousel.state().current_index, 0);
    }

    #[test]
    fn test_button_click_navigates_and_clamps() {
        let (mut carousel, mut particles, mut router) = setup();
        let [prev, next] = nav_buttons(&VIEWPORT);
        let centre = |b: &NavButton| Vector2::new(b.rect.x + b.rect.width * 0.5, b.rect.y + b.rect.height * 0.5);

        let click = |p: Vector2| [PointerEvent::Pressed(p), PointerEvent::Released(p)];
        router.dispatch(&click(centre(&prev)), &mut carousel, &mut particles, &VIEWPORT);
        assert_eq!(carousel.state().current_index, 0);

        router.dispatch(&click(centre(&next)), &mut carousel, &mut particles, &VIEWPORT);
        assert_eq!(carousel.state().current_index, 1);
    }

    #[test]
    fn test_release_off_button_does_nothing() {
        let (mut carousel, mut particles, mut router) = setup();
        let [_, next] = nav_buttons(&VIEWPORT);
        let on = Vector2::new(next.rect.x + 5.0, next.rect.y + 5.0);
        router.dispatch(
            &[PointerEvent::Pressed(on), PointerEvent::Released(Vector2::new(5.0, 5.0))],
            &mut carousel,
            &mut particles,
            &VIEWPORT,
        );
        assert_eq!(carousel.state().current_index, 0);
    }
}
