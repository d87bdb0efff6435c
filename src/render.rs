use std::collections::{HashMap, HashSet};

use raylib::prelude::*;
use tracing::debug;

use crate::carousel::CarouselEngine;
use crate::carousel::card::Card;
use crate::carousel::layout::Viewport;
use crate::catalog::Catalog;
use crate::decor::Decoration;
use crate::input::nav_buttons;
use crate::particles::ParticleField;
use crate::texture_loader::load_texture_with_exif_rotation;

const BACKGROUND: Color = Color { r: 12, g: 10, b: 24, a: 255 };
const CARD_BACKGROUND: Color = Color { r: 28, g: 26, b: 44, a: 255 };
const BUTTON_COLOR: Color = Color { r: 255, g: 255, b: 255, a: 40 };

fn with_opacity(color: Color, opacity: f32) -> Color {
    Color { a: (color.a as f32 * opacity.clamp(0.0, 1.0)) as u8, ..color }
}

/// Scale that fits a `w` x `h` texture inside `max_w` x `max_h`.
fn fit_scale(w: f32, h: f32, max_w: f32, max_h: f32) -> f32 {
    (max_w / w).min(max_h / h)
}

/// Draws the scene and owns the textures it needs.
///
/// A failed load is remembered as `None` and drawn as a placeholder, so a
/// missing file is only attempted once while it stays in the window.
pub struct Renderer {
    textures: HashMap<usize, Option<Texture2D>>,
    decorations: Vec<Decoration>,
}

impl Renderer {
    pub fn new(decorations: Vec<Decoration>) -> Self {
        Self { textures: HashMap::new(), decorations }
    }

    /// Loads textures for the materialized cards and the decorations, and
    /// frees the ones no longer needed.
    pub fn sync_textures(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        catalog: &Catalog,
        cards: &[Card],
    ) {
        let wanted: HashSet<usize> = cards
            .iter()
            .map(|c| c.index)
            .chain(self.decorations.iter().map(|d| d.image_index))
            .collect();

        self.textures.retain(|index, _| wanted.contains(index));

        for index in wanted {
            if self.textures.contains_key(&index) {
                continue;
            }
            let Some(path) = catalog.get(index) else {
                continue;
            };
            let texture = match load_texture_with_exif_rotation(rl, thread, path) {
                Ok(texture) => Some(texture),
                Err(e) => {
                    debug!("{}", e);
                    None
                }
            };
            self.textures.insert(index, texture);
        }
    }

    fn texture(&self, index: usize) -> Option<&Texture2D> {
        self.textures.get(&index).and_then(Option::as_ref)
    }

    pub fn draw(
        &self,
        d: &mut RaylibDrawHandle,
        viewport: &Viewport,
        carousel: &CarouselEngine,
        particles: &ParticleField,
    ) {
        d.clear_background(BACKGROUND);
        self.draw_particles(d, viewport, particles);
        self.draw_decorations(d, viewport);
        self.draw_cards(d, viewport, carousel);
        self.draw_buttons(d, viewport);
    }

    fn draw_particles(&self, d: &mut RaylibDrawHandle, viewport: &Viewport, particles: &ParticleField) {
        let to_screen = |p: Vector2| Vector2::new(p.x / 100.0 * viewport.width, p.y / 100.0 * viewport.height);

        for sphere in particles.spheres() {
            let centre = to_screen(sphere.center) + sphere.offset;
            d.draw_circle_gradient(
                centre.x as i32,
                centre.y as i32,
                sphere.radius,
                sphere.color,
                with_opacity(sphere.color, 0.0),
            );
        }

        for particle in particles.ambient() {
            if particle.opacity > 0.0 {
                d.draw_circle_v(to_screen(particle.position), particle.size * 0.5, with_opacity(Color::WHITE, particle.opacity));
            }
        }

        for particle in particles.trails() {
            d.draw_circle_v(to_screen(particle.position), particle.size * 0.5, with_opacity(Color::WHITE, particle.opacity));
        }
    }

    fn draw_decorations(&self, d: &mut RaylibDrawHandle, viewport: &Viewport) {
        for decoration in &self.decorations {
            let Some(texture) = self.texture(decoration.image_index) else {
                continue;
            };
            let tex_width = texture.width() as f32;
            let tex_height = texture.height() as f32;
            let width = decoration.width;
            let height = width * tex_height / tex_width;

            // Rotate around the centre of the image
            let origin = Vector2::new(width * 0.5, height * 0.5);
            let x = viewport.width * decoration.left / 100.0;
            let y = viewport.height * decoration.top / 100.0;

            d.draw_texture_pro(
                texture,
                Rectangle::new(0.0, 0.0, tex_width, tex_height),
                Rectangle::new(x + origin.x, y + origin.y, width, height),
                origin,
                decoration.tilt,
                with_opacity(Color::WHITE, 0.8),
            );
        }
    }

    fn draw_cards(&self, d: &mut RaylibDrawHandle, viewport: &Viewport, carousel: &CarouselEngine) {
        let mut cards: Vec<&Card> = carousel.cards().iter().filter(|c| c.style.opacity > 0.0).collect();
        cards.sort_by_key(|c| c.style.z_order);

        for card in cards {
            let rect = viewport.card_rect(card.style.translate_x);
            let opacity = card.style.opacity;
            d.draw_rectangle_rec(rect, with_opacity(CARD_BACKGROUND, opacity));

            match self.texture(card.index) {
                Some(texture) => {
                    let tex_width = texture.width() as f32;
                    let tex_height = texture.height() as f32;
                    let scale = fit_scale(tex_width, tex_height, rect.width, rect.height);
                    let (w, h) = (tex_width * scale, tex_height * scale);

                    d.draw_texture_pro(
                        texture,
                        Rectangle::new(0.0, 0.0, tex_width, tex_height),
                        Rectangle::new(rect.x + (rect.width - w) * 0.5, rect.y + (rect.height - h) * 0.5, w, h),
                        Vector2::zero(),
                        0.0,
                        with_opacity(Color::WHITE, opacity),
                    );
                }
                None => {
                    // Broken image: show its alt text
                    d.draw_text(
                        &Catalog::alt_text(card.index),
                        rect.x as i32 + 16,
                        rect.y as i32 + 16,
                        20,
                        with_opacity(Color::LIGHTGRAY, opacity),
                    );
                }
            }
        }
    }

    fn draw_buttons(&self, d: &mut RaylibDrawHandle, viewport: &Viewport) {
        for button in nav_buttons(viewport) {
            d.draw_rectangle_rec(button.rect, BUTTON_COLOR);
            d.draw_rectangle_lines_ex(button.rect, 1.0, Color::WHITE);
            d.draw_text(
                button.label,
                (button.rect.x + button.rect.width * 0.5) as i32 - 22,
                (button.rect.y + button.rect.height * 0.5) as i32 - 10,
                20,
                Color::WHITE,
            );
        }
    }
}
