/// Everything involving text layout and glyph drawing lives here.
pub mod text;

use palette::{LinSrgb, Mix, Srgb};

use crate::graphics::glyphs::Glyph;
use crate::graphics::photo::Photo;
use crate::layout::{Position, Rect};

/// Simple structure that encapsulates the frame buffer and relevant metadata.
/// Render methods are implemented to take this structure, to keep them separate from the event loop.
pub struct DrawHandle<'a> {
    pub buffer: &'a mut [u32],
    pub width: usize,
    pub height: usize,
}

impl<'a> DrawHandle<'a> {
    #[inline]
    fn index(&self, position: Position) -> Option<usize> {
        if position.x < 0 || position.y < 0 {
            return None;
        }
        let (x, y) = (position.x as usize, position.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Writes a pixel, ignoring positions outside the surface.
    fn set(&mut self, position: Position, value: u32) {
        if let Some(index) = self.index(position) {
            self.buffer[index] = value;
        }
    }

    /// Fills the whole surface with a top-to-bottom gradient; this is the
    /// backdrop behind the carousel.
    pub fn fill_vertical_gradient(&mut self, top: Srgb<u8>, bottom: Srgb<u8>) {
        let top: LinSrgb<f32> = top.into_linear();
        let bottom: LinSrgb<f32> = bottom.into_linear();

        for y in 0..self.height {
            let factor = if self.height > 1 {
                y as f32 / (self.height - 1) as f32
            } else {
                0.0
            };
            let value = pack(top.mix(bottom, factor));

            let row = y * self.width;
            self.buffer[row..row + self.width].fill(value);
        }
    }

    /// Stretches a photo over `dest` with nearest-neighbor sampling.
    pub fn photo(&mut self, photo: &Photo, dest: Rect) {
        if dest.width == 0 || dest.height == 0 || photo.width() == 0 || photo.height() == 0 {
            return;
        }

        for dy in 0..dest.height {
            let sy = dy * photo.height() / dest.height;
            for dx in 0..dest.width {
                let sx = dx * photo.width() / dest.width;
                let (r, g, b) = photo.pixel(sx, sy);

                self.set(
                    Position {
                        x: dest.x + dx as i32,
                        y: dest.y + dy as i32,
                    },
                    pack_bytes(r, g, b),
                );
            }
        }
    }

    /// Alpha-composites a glyph's coverage bitmap over the surface.
    /// `left`/`top` locate the scaled bitmap's top-left corner.
    pub fn glyph(&mut self, glyph: &Glyph, left: f32, top: f32, scale: f32, color: Srgb<u8>) {
        if glyph.width == 0 || glyph.height == 0 {
            return;
        }

        let out_width = (glyph.width as f32 * scale).round() as usize;
        let out_height = (glyph.height as f32 * scale).round() as usize;
        let color: LinSrgb<f32> = color.into_linear();

        for dy in 0..out_height {
            let sy = ((dy as f32 / scale) as usize).min(glyph.height as usize - 1);
            for dx in 0..out_width {
                let sx = ((dx as f32 / scale) as usize).min(glyph.width as usize - 1);

                let coverage = glyph.bitmap[sy * glyph.width as usize + sx];
                if coverage == 0 {
                    continue;
                }
                let alpha = coverage as f32 / 255.0;

                let position = Position {
                    x: left.round() as i32 + dx as i32,
                    y: top.round() as i32 + dy as i32,
                };
                let Some(index) = self.index(position) else {
                    continue;
                };

                let background = unpack(self.buffer[index]);
                self.buffer[index] = pack(background.mix(color, alpha));
            }
        }
    }
}

fn pack(color: LinSrgb<f32>) -> u32 {
    let encoded: Srgb<u8> = Srgb::from_linear(color);
    pack_bytes(encoded.red, encoded.green, encoded.blue)
}

#[inline]
fn pack_bytes(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

fn unpack(value: u32) -> LinSrgb<f32> {
    Srgb::new(
        ((value >> 16) & 0xff) as u8,
        ((value >> 8) & 0xff) as u8,
        (value & 0xff) as u8,
    )
    .into_linear()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_round_trip() {
        for value in [0x000000, 0xffffff, 0x102030, 0xab00cd] {
            assert_eq!(pack(unpack(value)), value);
        }
    }

    #[test]
    fn set_clips_outside_the_surface() {
        let mut buffer = vec![0u32; 4];
        let mut handle = DrawHandle {
            buffer: &mut buffer,
            width: 2,
            height: 2,
        };
        handle.set(Position { x: -1, y: 0 }, 0xffffff);
        handle.set(Position { x: 0, y: 5 }, 0xffffff);
        handle.set(Position { x: 1, y: 1 }, 0xffffff);
        assert_eq!(buffer, vec![0, 0, 0, 0xffffff]);
    }

    #[test]
    fn gradient_covers_every_row() {
        let mut buffer = vec![0u32; 6];
        let mut handle = DrawHandle {
            buffer: &mut buffer,
            width: 2,
            height: 3,
        };
        handle.fill_vertical_gradient(Srgb::new(255, 255, 255), Srgb::new(0, 0, 0));
        assert_eq!(buffer[0], 0xffffff);
        assert_eq!(buffer[4], 0x000000);
        assert_eq!(buffer[5], 0x000000);
    }
}
