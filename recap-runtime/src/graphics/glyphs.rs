use std::fmt::Display;
use std::fs;
use std::path::Path;

use eyre::WrapErr;
use fontdue::{Font, FontSettings};

/// Rasterization size, in pixels. Fixed at cache construction; text scales
/// are applied to the cached metrics, not re-rasterized.
pub const PIXEL_SIZE: f32 = 24.0;

const CHARSET_LEN: usize = 128;

/// Simple wrapper for the `&'static str` returned by `fontdue`;
/// we need something that implements `Error` for `eyre`
#[derive(Debug)]
pub struct FontError(&'static str);
impl Display for FontError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FontError: {}", self.0)
    }
}
impl std::error::Error for FontError {}

/// One rasterized character plus its placement metrics.
///
/// Created once at cache load time and immutable afterwards; the coverage
/// bitmap it owns is released when the cache is dropped.
pub struct Glyph {
    /// Coverage bitmap, row-major `width * height` bytes. Empty for glyphs
    /// with no renderable area (whitespace, codes missing from the font).
    pub bitmap: Vec<u8>,
    pub width: u32,
    pub height: u32,

    /// Offset from the pen position to the bitmap's left edge.
    pub bearing_x: i32,
    /// Offset from the baseline up to the bitmap's top edge.
    pub bearing_y: i32,

    /// Horizontal advance in 1/64-pixel subunits.
    pub advance: u32,
}

impl Glyph {
    const fn placeholder() -> Self {
        Self {
            bitmap: Vec::new(),
            width: 0,
            height: 0,
            bearing_x: 0,
            bearing_y: 0,
            advance: 0,
        }
    }
}

/// Total mapping from the 128 ASCII codes to rasterized glyphs.
///
/// Every entry is present; codes the font has no glyph for hold a
/// zero-metric placeholder. Read-only after construction, so the render
/// loop can share it freely.
pub struct GlyphCache {
    glyphs: Vec<Glyph>,
    line_height: u32,
}

impl GlyphCache {
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let data = fs::read(path)
            .wrap_err_with(|| format!("reading font file {}", path.display()))?;
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(FontError)
            .wrap_err("parsing font")?;

        Ok(Self::from_font(&font))
    }

    fn from_font(font: &Font) -> Self {
        let glyphs: Vec<Glyph> = (0..CHARSET_LEN as u8)
            .map(|code| {
                let ch = code as char;
                if font.lookup_glyph_index(ch) == 0 {
                    // Keep lookups total even where the font has nothing
                    return Glyph::placeholder();
                }

                let (metrics, bitmap) = font.rasterize(ch, PIXEL_SIZE);
                Glyph {
                    bitmap,
                    width: metrics.width as u32,
                    height: metrics.height as u32,
                    bearing_x: metrics.xmin,
                    bearing_y: metrics.ymin + metrics.height as i32,
                    advance: (metrics.advance_width * 64.0).round() as u32,
                }
            })
            .collect();

        let line_height = glyphs.iter().map(|glyph| glyph.height).max().unwrap_or(0);

        Self { glyphs, line_height }
    }

    /// Looks up the glyph for an ASCII code.
    ///
    /// Total over `0..128`; the feed boundary sanitizes text so no other
    /// byte reaches layout.
    pub fn glyph(&self, code: u8) -> &Glyph {
        debug_assert!(code.is_ascii());
        &self.glyphs[(code & 0x7f) as usize]
    }

    /// Scaled advance width in whole pixels (`advance >> 6` drops the
    /// 1/64-pixel subunits).
    pub fn advance_px(&self, code: u8, scale: f32) -> f32 {
        (self.glyph(code).advance >> 6) as f32 * scale
    }

    /// Tallest bitmap height across the cached set; the wrapped-text line
    /// spacing is derived from this.
    pub fn line_height(&self) -> u32 {
        self.line_height
    }

    /// Cache with made-up metrics so layout can be exercised without a
    /// font file on disk.
    #[cfg(test)]
    pub fn synthetic(advance_for: fn(u8) -> u32, height: u32) -> Self {
        let glyphs = (0..CHARSET_LEN as u8)
            .map(|code| Glyph {
                bitmap: Vec::new(),
                width: 0,
                height,
                bearing_x: 0,
                bearing_y: height as i32,
                advance: advance_for(code),
            })
            .collect();

        Self {
            glyphs,
            line_height: height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_total_over_the_ascii_range() {
        let cache = GlyphCache::synthetic(|_| 640, 24);
        for code in 0u8..128 {
            let glyph = cache.glyph(code);
            assert_eq!(glyph.advance, 640);
        }
        assert_eq!(cache.line_height(), 24);
    }

    #[test]
    fn advance_conversion_drops_subunits_then_scales() {
        let cache = GlyphCache::synthetic(|_| 650, 24);
        // 650 >> 6 == 10 whole pixels
        assert_eq!(cache.advance_px(b'a', 1.0), 10.0);
        assert_eq!(cache.advance_px(b'a', 0.5), 5.0);
    }
}
