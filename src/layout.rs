//! Pure glyph placement for slip fields.
//!
//! The draw pass in [`render`](crate::render) only rasterizes what these
//! functions compute, so the placement math stays testable with stub
//! metrics and no font assets.
//!
//! Numeric fields (amount boxes, scan line) walk **right to left** from
//! their anchor: the first glyph sits at the anchor, every following glyph
//! steps left by a fixed 11-unit gutter plus half the widths of both
//! neighbors. Feeding the display string reversed therefore right-aligns it
//! at the anchor, reading normally on the page.
//!
//! Address blocks walk top to bottom at constant `x`, one configured line
//! height per line.

/// Fixed inter-glyph gutter of right-to-left fields, in the same unit as
/// the font metrics. Template compatibility requires exactly 11.
pub const GLYPH_GUTTER: f32 = 11.0;

/// Text measurement as provided by a loaded font.
pub trait FontMetrics {
    /// Width and height of `text` when rendered, in pixels.
    fn measure(&self, text: &str) -> (f32, f32);
}

/// Place glyphs right to left, in the order given, starting at `origin`.
///
/// Returns one `(glyph, x, y)` per input character; `y` never changes.
pub fn positions_rtl(
    glyphs: &str,
    origin: (f32, f32),
    metrics: &dyn FontMetrics,
) -> Vec<(char, f32, f32)> {
    let (mut x, y) = origin;
    let mut out = Vec::with_capacity(glyphs.len());

    for (i, c) in glyphs.chars().enumerate() {
        let (width, _) = metrics.measure(c.encode_utf8(&mut [0u8; 4]));
        if i > 0 {
            x -= width / 2.0;
        }
        out.push((c, x, y));
        x -= GLYPH_GUTTER + width / 2.0;
    }
    out
}

/// Place address lines top to bottom at constant `x`, stepping `y` by
/// `line_height` per line.
pub fn address_positions<'a>(
    lines: &'a [String],
    origin: (f32, f32),
    line_height: f32,
) -> Vec<(&'a str, f32, f32)> {
    let (x, mut y) = origin;
    let mut out = Vec::with_capacity(lines.len());

    for line in lines {
        out.push((line.as_str(), x, y));
        y += line_height;
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================
