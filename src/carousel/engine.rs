use std::time::Duration;

use raylib::prelude::*;
use tracing::{debug, trace};

use crate::carousel::card::Card;
use crate::carousel::layout::{self, CardVisual, Viewport};
use crate::carousel::state::{CarouselState, Direction};
use crate::catalog::Catalog;
use crate::constants::*;
use crate::scheduler::Scheduler;

/// Pending one-shot work of the carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
enum CarouselTimer {
    Reload(u64), // Re-window after a button transition
}

pub struct CarouselEngine {
    catalog: Catalog,
    preload: usize,
    card_width: f32,

    state: CarouselState,
    cards: Vec<Card>,

    timers: Scheduler<CarouselTimer>,
    reload_seq: u64,
    frame_loop: bool, // Per-frame drag positioning is running
}

impl CarouselEngine {
    pub fn new(catalog: Catalog, preload: usize, card_width: f32) -> Self {
        let mut engine = Self {
            catalog,
            preload,
            card_width,
            state: CarouselState::new(),
            cards: Vec::new(),
            timers: Scheduler::new(),
            reload_seq: 0,
            frame_loop: false,
        };
        engine.load_cards();
        engine
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.iter().find(|c| c.index == index)
    }

    fn card_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.index == index)
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn set_card_width(&mut self, card_width: f32) {
        self.card_width = card_width;
    }

    /// Rebuilds the cards of the viewport window around the current index.
    pub fn load_cards(&mut self) {
        self.cards = self
            .catalog
            .window(self.state.current_index, self.preload)
            .filter_map(|index| {
                self.catalog
                    .get(index)
                    .map(|path| Card::new(index, path.to_path_buf()))
            })
            .collect();
        trace!(current = self.state.current_index, cards = self.cards.len(), "loaded cards");
        self.show_cards();
    }

    /// Puts every card in its resting place for the current index.
    pub fn show_cards(&mut self) {
        let visuals = layout::resting_layout(&self.state, &self.catalog, self.preload, self.card_width);
        self.apply(&visuals, 0.0);
    }

    /// Slides to the (already updated) current index, then re-windows once
    /// the transition is over.
    pub fn transition_cards(&mut self, direction: Direction) {
        let indices: Vec<usize> = self.cards.iter().map(|c| c.index).collect();
        let visuals = layout::transition_layout(indices, self.state.current_index, direction, self.card_width);
        self.apply(&visuals, TRANSITION_DURATION.as_secs_f32());

        self.reload_seq += 1;
        self.timers.schedule(CarouselTimer::Reload(self.reload_seq), TRANSITION_DURATION);
    }

    fn apply(&mut self, visuals: &[CardVisual], duration: f32) {
        for visual in visuals {
            if let Some(card) = self.card_mut(visual.index) {
                if visual.animated {
                    card.animate_to(visual.style, duration);
                } else {
                    card.set_style(visual.style);
                }
            }
        }
    }

    pub fn prev(&mut self) -> bool {
        if !self.state.step_back() {
            return false;
        }
        debug!(current = self.state.current_index, "previous card");
        self.transition_cards(Direction::Previous);
        true
    }

    pub fn next(&mut self) -> bool {
        if !self.state.step_forward(self.catalog.len()) {
            return false;
        }
        debug!(current = self.state.current_index, "next card");
        self.transition_cards(Direction::Next);
        true
    }

    /// Only the current card can be grabbed.
    pub fn start_drag(&mut self, card_index: usize, x: f32) {
        if card_index != self.state.current_index {
            return;
        }
        self.state.begin_drag(x);
        self.frame_loop = true;
    }

    pub fn drag(&mut self, card_index: usize, x: f32) {
        if card_index != self.state.current_index {
            return;
        }
        let Some(translate) = self.state.drag_to(x) else {
            return;
        };

        let next_index = self.state.next_index(self.catalog.len());
        let opacity = (translate.abs() / DRAG_FADE_DISTANCE).min(1.0);
        if let Some(next) = self.card_mut(next_index) {
            next.set_opacity(opacity);
        }
    }

    pub fn end_drag(&mut self) {
        if !self.state.is_dragging() {
            return;
        }
        let translate = self.state.current_translate_x;
        self.frame_loop = false;

        let moved = self.state.release(self.catalog.len());
        debug!(translate, ?moved, current = self.state.current_index, "drag released");
        self.load_cards();
    }

    /// Applies the live drag offset to the current card.
    pub fn set_card_position(&mut self) {
        let current = self.state.current_index;
        let translate = self.state.current_translate_x;
        if let Some(card) = self.card_mut(current) {
            card.set_translate(translate);
        }
    }

    /// Advances transitions and timers by one frame.
    pub fn update(&mut self, dt: Duration) {
        if self.frame_loop {
            self.set_card_position();
            if !self.state.is_dragging() {
                self.frame_loop = false;
            }
        }

        for card in self.cards.iter_mut() {
            card.update(dt.as_secs_f32());
        }

        for timer in self.timers.advance(dt) {
            match timer {
                CarouselTimer::Reload(_) => self.load_cards(),
            }
        }
    }

    /// Topmost card under `point`.
    pub fn card_at(&self, point: Vector2, viewport: &Viewport) -> Option<usize> {
        self.cards
            .iter()
            .filter(|c| layout::contains(&viewport.card_rect(c.style.translate_x), point))
            .max_by_key(|c| c.style.z_order)
            .map(|c| c.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const WIDTH: f32 = 480.0;

    fn engine(count: usize) -> CarouselEngine {
        let catalog = Catalog::from_convention(Path::new("images"), count).unwrap();
        CarouselEngine::new(catalog, PRELOAD_COUNT, WIDTH)
    }

    fn drag_release(engine: &mut CarouselEngine, translate: f32) {
        let current = engine.state().current_index;
        engine.start_drag(current, 600.0);
        engine.drag(current, 600.0 + translate);
        engine.update(Duration::from_millis(16));
        engine.end_drag();
    }

    fn assert_settled(engine: &CarouselEngine) {
        let state = engine.state();
        assert_eq!(state.current_translate_x, 0.0);
        assert_eq!(state.prev_translate_x, 0.0);
        let top: Vec<_> = engine
            .cards()
            .iter()
            .filter(|c| c.style.opacity == 1.0 && c.style.z_order == 2)
            .collect();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].index, state.current_index);
    }

    #[test]
    fn test_initial_window() {
        let engine = engine(100);
        let indices: Vec<_> = engine.cards().iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_settled(&engine);
    }

    #[test]
    fn test_prev_at_start_is_noop() {
        let mut engine = engine(100);
        assert!(!engine.prev());
        assert_eq!(engine.state().current_index, 0);
        assert_eq!(engine.timers.len(), 0);
    }

    #[test]
    fn test_next_at_end_is_noop() {
        let mut engine = engine(100);
        for _ in 0..150 {
            engine.next();
            engine.update(TRANSITION_DURATION);
        }
        assert_eq!(engine.state().current_index, 99);
        assert_settled(&engine);
    }

    #[test]
    fn test_button_transition_reloads_after_duration() {
        let mut engine = engine(100);
        assert!(engine.next());
        assert_eq!(engine.state().current_index, 1);

        // Mid transition the old window is still materialized
        engine.update(Duration::from_millis(250));
        assert!(engine.card(0).is_some());
        assert!(engine.card(4).is_none());
        assert!(engine.card(1).unwrap().is_animating());

        engine.update(Duration::from_millis(250));
        let indices: Vec<_> = engine.cards().iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert_settled(&engine);
    }

    #[test]
    fn test_overlapping_transitions_each_reload() {
        let mut engine = engine(100);
        engine.next();
        engine.update(Duration::from_millis(100));
        engine.next();
        assert_eq!(engine.timers.len(), 2);
        engine.update(Duration::from_millis(400));
        assert_eq!(engine.timers.len(), 1);
        engine.update(Duration::from_millis(100));
        assert_eq!(engine.timers.len(), 0);
        assert_eq!(engine.state().current_index, 2);
        assert_settled(&engine);
    }

    #[test]
    fn test_drag_fades_in_next_card() {
        let mut engine = engine(100);
        engine.start_drag(0, 500.0);
        engine.drag(0, 450.0);
        assert_eq!(engine.card(1).unwrap().style.opacity, 0.5);
        engine.drag(0, 300.0);
        assert_eq!(engine.card(1).unwrap().style.opacity, 1.0);
    }

    #[test]
    fn test_frame_loop_moves_only_current_card() {
        let mut engine = engine(100);
        engine.start_drag(0, 500.0);
        engine.drag(0, 440.0);
        assert_eq!(engine.card(0).unwrap().style.translate_x, 0.0);
        engine.update(Duration::from_millis(16));
        assert_eq!(engine.card(0).unwrap().style.translate_x, -60.0);
        assert_eq!(engine.card(1).unwrap().style.translate_x, NEXT_CARD_OFFSET);
    }

    #[test]
    fn test_only_current_card_can_be_dragged() {
        let mut engine = engine(100);
        engine.start_drag(1, 500.0);
        assert!(!engine.is_dragging());
        engine.start_drag(0, 500.0);
        engine.drag(1, 100.0);
        assert_eq!(engine.state().current_translate_x, 0.0);
    }

    #[test]
    fn test_drag_release_navigation() {
        let mut engine = engine(100);
        drag_release(&mut engine, -150.0);
        assert_eq!(engine.state().current_index, 1);
        assert_settled(&engine);

        drag_release(&mut engine, 150.0);
        assert_eq!(engine.state().current_index, 0);

        drag_release(&mut engine, 80.0);
        assert_eq!(engine.state().current_index, 0);
        assert_settled(&engine);
    }

    #[test]
    fn test_drag_wraps_where_buttons_clamp() {
        let mut engine = engine(100);
        drag_release(&mut engine, 150.0);
        assert_eq!(engine.state().current_index, 99);
        assert_settled(&engine);
        assert!(!engine.next());

        drag_release(&mut engine, -150.0);
        assert_eq!(engine.state().current_index, 0);
        assert_eq!(engine.card(1).unwrap().style.opacity, 0.0);
        assert_settled(&engine);
    }

    #[test]
    fn test_drag_at_last_card_tolerates_missing_next_card() {
        let mut engine = engine(100);
        drag_release(&mut engine, 150.0);
        engine.start_drag(99, 500.0);
        engine.drag(99, 350.0);
        assert!(engine.card(0).is_none());
        engine.end_drag();
        assert_eq!(engine.state().current_index, 0);
    }

    #[test]
    fn test_end_drag_when_idle_is_noop() {
        let mut engine = engine(100);
        engine.end_drag();
        assert_eq!(engine.state().current_index, 0);
        assert_settled(&engine);
    }

    #[test]
    fn test_frame_loop_stops_after_release() {
        let mut engine = engine(100);
        engine.start_drag(0, 500.0);
        engine.drag(0, 450.0);
        engine.end_drag();
        assert!(!engine.frame_loop);
        engine.update(Duration::from_millis(16));
        assert_eq!(engine.card(0).unwrap().style.translate_x, 0.0);
    }

    #[test]
    fn test_card_at_prefers_top_card() {
        let engine = engine(100);
        let viewport = Viewport { width: 1280.0, height: 720.0, card_width: WIDTH, card_height: 320.0 };
        assert_eq!(engine.card_at(Vector2::new(640.0, 360.0), &viewport), Some(0));
        assert_eq!(engine.card_at(Vector2::new(5.0, 5.0), &viewport), None);
    }
}
