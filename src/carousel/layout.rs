use raylib::prelude::*;

use crate::carousel::state::{CarouselState, Direction};
use crate::catalog::Catalog;
use crate::constants::*;

/// Inline style of one card: the only things the controller ever touches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardStyle {
    pub translate_x: f32, // Pixels, relative to the centred resting slot
    pub opacity: f32,
    pub z_order: u8,
}

impl CardStyle {
    pub const HIDDEN: CardStyle = CardStyle { translate_x: 0.0, opacity: 0.0, z_order: 0 };
}

/// Desired look of one materialized card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardVisual {
    pub index: usize,
    pub style: CardStyle,
    pub animated: bool, // Ease into `style` over the transition duration
}

/// Window and card dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub card_width: f32,
    pub card_height: f32,
}

impl Viewport {
    /// Card slot centred in the window, shifted horizontally by `translate_x`.
    pub fn card_rect(&self, translate_x: f32) -> Rectangle {
        Rectangle::new(
            (self.width - self.card_width) * 0.5 + translate_x,
            (self.height - self.card_height) * 0.5,
            self.card_width,
            self.card_height,
        )
    }
}

pub fn contains(rect: &Rectangle, point: Vector2) -> bool {
    point.x >= rect.x
        && point.x < rect.x + rect.width
        && point.y >= rect.y
        && point.y < rect.y + rect.height
}

/// Resting look of card `index`: the current card on top, the next one
/// parked slightly offset and invisible, everything else pushed out.
pub fn resting_style(index: usize, current: usize, len: usize, card_width: f32) -> CardStyle {
    if index == current {
        CardStyle { translate_x: 0.0, opacity: 1.0, z_order: 2 }
    } else if index == (current + 1) % len {
        CardStyle { translate_x: NEXT_CARD_OFFSET, opacity: 0.0, z_order: 1 }
    } else {
        CardStyle { translate_x: card_width, ..CardStyle::HIDDEN }
    }
}

/// Look of card `index` while sliding to `current`, which was reached by
/// moving in `direction`. The card that was left slides out on the
/// `direction` side; only the two involved cards animate.
pub fn transition_style(
    index: usize,
    current: usize,
    direction: Direction,
    card_width: f32,
) -> (CardStyle, bool) {
    let outgoing = current as i64 - direction.sign() as i64;
    if index == current {
        (CardStyle { translate_x: 0.0, opacity: 1.0, z_order: 2 }, true)
    } else if index as i64 == outgoing {
        let style = CardStyle {
            translate_x: direction.sign() * card_width,
            opacity: 0.0,
            z_order: 1,
        };
        (style, true)
    } else {
        (CardStyle { translate_x: card_width, ..CardStyle::HIDDEN }, false)
    }
}

/// Resting description of the whole viewport window.
pub fn resting_layout(
    state: &CarouselState,
    catalog: &Catalog,
    preload: usize,
    card_width: f32,
) -> Vec<CardVisual> {
    catalog
        .window(state.current_index, preload)
        .map(|index| CardVisual {
            index,
            style: resting_style(index, state.current_index, catalog.len(), card_width),
            animated: false,
        })
        .collect()
}

pub fn transition_layout(
    indices: impl IntoIterator<Item = usize>,
    current: usize,
    direction: Direction,
    card_width: f32,
) -> Vec<CardVisual> {
    indices
        .into_iter()
        .map(|index| {
            let (style, animated) = transition_style(index, current, direction, card_width);
            CardVisual { index, style, animated }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn catalog() -> Catalog {
        Catalog::from_convention(Path::new("images"), 100).unwrap()
    }

    #[test]
    fn test_resting_layout_has_single_visible_top_card() {
        let catalog = catalog();
        for current in [0, 1, 50, 98, 99] {
            let state = CarouselState { current_index: current, ..CarouselState::new() };
            let visuals = resting_layout(&state, &catalog, 3, 480.0);

            let on_top: Vec<_> = visuals
                .iter()
                .filter(|v| v.style.opacity == 1.0 && v.style.z_order == 2)
                .collect();
            assert_eq!(on_top.len(), 1);
            assert_eq!(on_top[0].index, current);
            assert!(visuals.iter().all(|v| v.style.z_order <= 2 && !v.animated));
        }
    }

    #[test]
    fn test_next_card_is_parked_invisible() {
        let style = resting_style(6, 5, 100, 480.0);
        assert_eq!(style, CardStyle { translate_x: NEXT_CARD_OFFSET, opacity: 0.0, z_order: 1 });

        let others = resting_style(4, 5, 100, 480.0);
        assert_eq!(others, CardStyle { translate_x: 480.0, opacity: 0.0, z_order: 0 });
    }

    #[test]
    fn test_next_card_wraps_to_first() {
        assert_eq!(resting_style(0, 99, 100, 480.0).z_order, 1);
    }

    #[test]
    fn test_transition_forward_slides_previous_card_out() {
        let visuals = transition_layout(2..=8, 5, Direction::Next, 400.0);
        let by_index = |i: usize| visuals.iter().find(|v| v.index == i).unwrap();

        assert_eq!(by_index(5).style.opacity, 1.0);
        assert!(by_index(5).animated);
        assert_eq!(by_index(4).style.translate_x, 400.0);
        assert_eq!(by_index(4).style.z_order, 1);
        assert!(by_index(4).animated);
        assert!(!by_index(6).animated);
        assert_eq!(by_index(6).style.opacity, 0.0);
    }

    #[test]
    fn test_transition_backward_slides_next_card_out() {
        let (style, animated) = transition_style(6, 5, Direction::Previous, 400.0);
        assert!(animated);
        assert_eq!(style.translate_x, -400.0);

        let (_, animated) = transition_style(4, 5, Direction::Previous, 400.0);
        assert!(!animated);
    }

    #[test]
    fn test_card_rect_is_centred() {
        let viewport = Viewport { width: 1000.0, height: 600.0, card_width: 400.0, card_height: 200.0 };
        let rect = viewport.card_rect(0.0);
        assert_eq!((rect.x, rect.y), (300.0, 200.0));
        assert!(contains(&rect, Vector2::new(500.0, 300.0)));
        assert!(!contains(&viewport.card_rect(-400.0), Vector2::new(500.0, 300.0)));
    }
}
