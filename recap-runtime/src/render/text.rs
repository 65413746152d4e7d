//! Glyph-by-glyph line breaking over the cached ASCII metrics.
//!
//! Two modes: single-line headline layout that truncates overflowing text
//! behind an ellipsis, and greedy word-wrap for the multi-line subheading.
//! Both center every line on a given x midpoint. Layout only computes
//! placements; drawing is a separate pass over the result.

use palette::Srgb;

use super::DrawHandle;
use crate::graphics::glyphs::GlyphCache;

/// One glyph to draw: the ASCII code plus the top-left corner of its
/// scaled bitmap in surface coordinates.
pub struct PlacedGlyph {
    pub code: u8,
    pub x: f32,
    pub y: f32,
}

/// A laid-out line and its total advance width (including the ellipsis
/// when one was appended).
pub struct LaidLine {
    pub glyphs: Vec<PlacedGlyph>,
    pub width: f32,
}

impl LaidLine {
    fn draw(&self, handle: &mut DrawHandle, cache: &GlyphCache, scale: f32, color: Srgb<u8>) {
        for placed in &self.glyphs {
            handle.glyph(cache.glyph(placed.code), placed.x, placed.y, scale, color);
        }
    }
}

/// Single-line layout result; `truncated` is set when the text was cut
/// and an ellipsis appended.
pub struct HeadlineLayout {
    pub line: LaidLine,
    pub truncated: bool,
    scale: f32,
}

impl HeadlineLayout {
    pub fn draw(&self, handle: &mut DrawHandle, cache: &GlyphCache, color: Srgb<u8>) {
        self.line.draw(handle, cache, self.scale, color);
    }
}

/// Word-wrapped layout result, one entry per line, top to bottom.
pub struct WrappedLayout {
    pub lines: Vec<LaidLine>,
    scale: f32,
}

impl WrappedLayout {
    pub fn draw(&self, handle: &mut DrawHandle, cache: &GlyphCache, color: Srgb<u8>) {
        for line in &self.lines {
            line.draw(handle, cache, self.scale, color);
        }
    }
}

/// Lays out a single line of text centered on `center_x` with its
/// baseline at `baseline_y`, truncating behind an ellipsis once the
/// accumulated advance width exceeds `max_width`.
///
/// The kept prefix is the longest one that still fits together with the
/// ellipsis. If not even one glyph fits (including a `max_width` of zero
/// or less), the ellipsis alone is emitted.
pub fn layout_headline(
    cache: &GlyphCache,
    text: &str,
    scale: f32,
    center_x: f32,
    baseline_y: f32,
    max_width: f32,
) -> HeadlineLayout {
    debug_assert!(text.is_ascii());
    let bytes = text.as_bytes();
    let ellipsis_width = 3.0 * cache.advance_px(b'.', scale);

    let mut len = 0.0;
    let mut end = bytes.len();
    let mut truncated = false;

    for (i, &code) in bytes.iter().enumerate() {
        len += cache.advance_px(code, scale);

        if len > max_width {
            truncated = true;

            // Walk back until the prefix and the ellipsis fit together
            end = i + 1;
            while end > 0 && len + ellipsis_width > max_width {
                end -= 1;
                len -= cache.advance_px(bytes[end], scale);
            }

            len += ellipsis_width;
            break;
        }
    }

    let mut glyphs = Vec::with_capacity(end + if truncated { 3 } else { 0 });
    let mut pen = center_x - len / 2.0;
    for &code in &bytes[..end] {
        glyphs.push(place(cache, code, pen, baseline_y, scale));
        pen += cache.advance_px(code, scale);
    }
    if truncated {
        for _ in 0..3 {
            glyphs.push(place(cache, b'.', pen, baseline_y, scale));
            pen += cache.advance_px(b'.', scale);
        }
    }

    HeadlineLayout {
        line: LaidLine { glyphs, width: len },
        truncated,
        scale,
    }
}

/// Lays out text with greedy word-wrap: each line takes glyphs until the
/// advance width exceeds `max_width`, then breaks after the most recent
/// whitespace. The whitespace itself is dropped from both the line and
/// its centering width.
///
/// A single word wider than the budget is force-broken before the
/// overflowing glyph, keeping at least one glyph per line so layout
/// always makes progress.
///
/// Lines are centered independently on `center_x`; baselines start at
/// `baseline_y` and advance downward by `line_height * 1.05` unscaled
/// cache pixels.
pub fn layout_wrapped(
    cache: &GlyphCache,
    text: &str,
    scale: f32,
    center_x: f32,
    baseline_y: f32,
    max_width: f32,
) -> WrappedLayout {
    debug_assert!(text.is_ascii());
    let bytes = text.as_bytes();
    let line_gap = cache.line_height() as f32 * 1.05;

    let mut lines = Vec::new();
    let mut y = baseline_y;
    let mut start = 0;

    while start < bytes.len() {
        let (end, next) = wrap_point(cache, bytes, start, scale, max_width);
        lines.push(place_line(cache, &bytes[start..end], scale, center_x, y));

        y += line_gap;
        start = next;
    }

    WrappedLayout { lines, scale }
}

/// Finds where the line starting at `start` ends: returns the exclusive
/// end of the line's glyphs and the index the next line starts at.
fn wrap_point(
    cache: &GlyphCache,
    bytes: &[u8],
    start: usize,
    scale: f32,
    max_width: f32,
) -> (usize, usize) {
    let mut len = 0.0;

    for i in start..bytes.len() {
        len += cache.advance_px(bytes[i], scale);

        if len > max_width {
            let mut j = i;
            while j > start && !is_wrap_whitespace(bytes[j]) {
                j -= 1;
            }

            if is_wrap_whitespace(bytes[j]) {
                // Break after the whitespace, dropping it
                return (j, j + 1);
            }

            // The whole line is one word wider than the budget; break
            // before the overflowing glyph, keeping at least one
            let end = i.max(start + 1);
            return (end, end);
        }
    }

    (bytes.len(), bytes.len())
}

/// The whitespace set word-wrap breaks on.
fn is_wrap_whitespace(code: u8) -> bool {
    matches!(code, b' ' | b'\x0c' | b'\n' | b'\r' | b'\t' | b'\x0b')
}

fn place_line(
    cache: &GlyphCache,
    bytes: &[u8],
    scale: f32,
    center_x: f32,
    baseline_y: f32,
) -> LaidLine {
    let width: f32 = bytes.iter().map(|&code| cache.advance_px(code, scale)).sum();

    let mut glyphs = Vec::with_capacity(bytes.len());
    let mut pen = center_x - width / 2.0;
    for &code in bytes {
        glyphs.push(place(cache, code, pen, baseline_y, scale));
        pen += cache.advance_px(code, scale);
    }

    LaidLine { glyphs, width }
}

fn place(cache: &GlyphCache, code: u8, pen: f32, baseline_y: f32, scale: f32) -> PlacedGlyph {
    let glyph = cache.glyph(code);
    PlacedGlyph {
        code,
        x: pen + glyph.bearing_x as f32 * scale,
        y: baseline_y - glyph.bearing_y as f32 * scale,
    }
}
