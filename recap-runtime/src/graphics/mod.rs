/// Rasterized ASCII glyph cache
pub mod glyphs;

/// Decoded photo cuts
pub mod photo;
