// The render layer the simulation talks to. Keeps the background image and one
// sprite per falling letter, and composes them into the window's framebuffer.
use std::collections::HashMap;

use crate::coords::{scene_x_to_column, scene_y_to_row};
use crate::draw::{GLYPH_H, GLYPH_W, draw_char_5x7, fill_rect};
use crate::pixels::{copy_pixels, ensure_sized};
use crate::rain::RenderLayer;
use crate::types::{FrameBuffer, GlyphHandle, PixelBuffer};

const GLYPH_COLOR: u32 = 0x00_FF_FF_FF;
const PAD: i32 = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub glyph: char,
    pub color: u32,
    pub x: f32,
    pub y: f32,
}

#[derive(Default)]
pub struct Scene {
    next_id: u64,
    sprites: HashMap<GlyphHandle, Sprite>,
    background: Option<PixelBuffer>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sprite(&self, handle: GlyphHandle) -> Option<&Sprite> {
        self.sprites.get(&handle)
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    pub fn background(&self) -> Option<&PixelBuffer> {
        self.background.as_ref()
    }

    /// Background (RGBA -> 0x00RRGGBB) then every letter on its coloured box.
    /// The screen takes the background's size; without one it is left black.
    pub fn compose(&self, screen: &mut FrameBuffer) {
        match &self.background {
            Some(bg) => {
                screen.resize(bg.width(), bg.height());
                for (dst, px) in screen.pixels.iter_mut().zip(bg.data().chunks_exact(4)) {
                    *dst = ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32;
                }
            }
            None => screen.pixels.fill(0),
        }

        let (w, h) = (screen.width, screen.height);
        for s in self.sprites.values() {
            let cx = scene_x_to_column(s.x, w);
            let cy = scene_y_to_row(s.y, h);
            let (bw, bh) = (GLYPH_W + 2 * PAD, GLYPH_H + 2 * PAD);
            let (left, top) = (cx - bw / 2, cy - bh / 2);
            fill_rect(screen, left, top, bw, bh, s.color);
            draw_char_5x7(screen, left + PAD, top + PAD, s.glyph, GLYPH_COLOR, false);
        }
    }
}

impl RenderLayer for Scene {
    fn create_particle(&mut self, glyph: char, color: u32) -> GlyphHandle {
        self.next_id += 1;
        let handle = GlyphHandle(self.next_id);
        self.sprites.insert(handle, Sprite { glyph, color, x: 0.0, y: 0.0 });
        handle
    }

    fn set_position(&mut self, handle: GlyphHandle, x: f32, y: f32) {
        if let Some(s) = self.sprites.get_mut(&handle) {
            s.x = x;
            s.y = y;
        }
    }

    fn set_color(&mut self, handle: GlyphHandle, color: u32) {
        if let Some(s) = self.sprites.get_mut(&handle) {
            s.color = color;
        }
    }

    fn destroy(&mut self, handle: GlyphHandle) {
        if self.sprites.remove(&handle).is_none() {
            log::warn!("destroy on unknown glyph {handle:?}");
        }
    }

    fn set_background(&mut self, buffer: &PixelBuffer) {
        let (w, h) = buffer.dimensions();
        // Same-size frames reuse the stored buffer; a new size reallocates.
        let copied = ensure_sized(self.background.take(), w, h)
            .and_then(|mut bg| copy_pixels(buffer, &mut bg).map(|_| bg));
        match copied {
            Ok(bg) => self.background = Some(bg),
            Err(e) => log::error!("background not updated: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_and_destroy_removes() {
        let mut scene = Scene::new();
        let a = scene.create_particle('a', 1);
        let b = scene.create_particle('b', 2);
        assert_ne!(a, b);
        scene.set_position(a, 0.5, -0.5);
        scene.set_color(a, 9);
        assert_eq!(scene.sprite(a), Some(&Sprite { glyph: 'a', color: 9, x: 0.5, y: -0.5 }));
        scene.destroy(a);
        assert!(scene.sprite(a).is_none());
        assert_eq!(scene.sprite_count(), 1);
    }

    #[test]
    fn background_is_packed_into_screen() {
        let mut scene = Scene::new();
        let bg = PixelBuffer::filled(3, 2, [0x12, 0x34, 0x56, 0xFF]).unwrap();
        scene.set_background(&bg);
        let mut screen = FrameBuffer::new(1, 1);
        scene.compose(&mut screen);
        assert_eq!((screen.width, screen.height), (3, 2));
        assert!(screen.pixels.iter().all(|&p| p == 0x00_12_34_56));
    }

    #[test]
    fn background_follows_size_changes() {
        let mut scene = Scene::new();
        scene.set_background(&PixelBuffer::filled(2, 2, [1, 1, 1, 1]).unwrap());
        scene.set_background(&PixelBuffer::filled(5, 4, [2, 2, 2, 2]).unwrap());
        let bg = scene.background().unwrap();
        assert_eq!(bg.dimensions(), (5, 4));
        assert_eq!(bg.red(4, 3), 2);
    }

    #[test]
    fn sprite_box_is_drawn_at_mapped_position() {
        let mut scene = Scene::new();
        scene.set_background(&PixelBuffer::filled(40, 40, [0, 0, 0, 255]).unwrap());
        let h = scene.create_particle(' ', 0x00_00_00_FF);
        scene.set_position(h, 0.0, 0.0);
        let mut screen = FrameBuffer::new(40, 40);
        scene.compose(&mut screen);
        // centre of the scene is pixel (20,20)
        assert_eq!(screen.pixels[20 * 40 + 20], 0x00_00_00_FF);
        assert_eq!(screen.pixels[0], 0);
    }
}
