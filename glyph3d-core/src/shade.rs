//! Luminance-to-glyph mapping.
//!
//! Shading intensity is quantized into buckets of `trunc(13 * luminance)`
//! and looked up in a fixed ramp of increasingly dense glyphs. The exact
//! glyphs and bucket boundaries are an observable contract.

/// Glyph drawn for anything outside the ramp (bucket 0, negative or
/// overflowing luminance).
pub const BLANK: char = ' ';

/// Inclusive bucket ranges, darkest to densest.
const GLYPH_RAMP: &[(i32, i32, char)] = &[
    (1, 1, '.'),
    (2, 3, '-'),
    (4, 5, '+'),
    (6, 8, '='),
    (9, 11, '#'),
    (12, 13, '@'),
];

/// Map a shading scalar (normal-dot-light, roughly [0, 1] for lit faces)
/// to its display glyph.
pub fn glyph_for(luminance: f32) -> char {
    let bucket = (13.0 * luminance) as i32;

    GLYPH_RAMP
        .iter()
        .find(|&&(low, high, _)| (low..=high).contains(&bucket))
        .map(|&(_, _, glyph)| glyph)
        .unwrap_or(BLANK)
}
