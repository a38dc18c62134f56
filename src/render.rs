//! Glyph rasterization onto the slip canvas.
//!
//! Renders anti-aliased OCR-B text onto an RGBA template image using
//! ab_glyph, and encodes the finished canvas as PNG with the 144 DPI
//! pixel-density metadata scanners and print pipelines expect.
//!
//! Coordinates are top-left anchors in template pixels; the baseline is
//! derived from the font ascent, so callers never deal with baselines.

use ab_glyph::{Font, ScaleFont, point};
use image::{Rgba, RgbaImage};

use crate::assets::ScaledFont;
use crate::error::SlipError;

/// 144 DPI expressed in the PNG pHYs unit (pixels per meter):
/// `144 / 0.0254 ≈ 5669`.
const PIXELS_PER_METER: u32 = 5669;

/// Draw `text` onto the canvas with its top-left corner at `(x, y)`.
///
/// Pixels falling outside the canvas are clipped; coverage is alpha-blended
/// with the existing pixel so anti-aliased edges compose over the template.
pub fn draw_text(
    canvas: &mut RgbaImage,
    font: &ScaledFont,
    x: f32,
    y: f32,
    text: &str,
    fill: [u8; 4],
) {
    let face = font.font();
    let scaled = face.as_scaled(font.px());
    let baseline = y + scaled.ascent();
    let mut caret_x = x;

    for ch in text.chars() {
        let glyph_id = face.glyph_id(ch);
        let advance = scaled.h_advance(glyph_id);
        let glyph = glyph_id.with_scale_and_position(font.px(), point(caret_x, baseline));

        if let Some(outlined) = face.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = gx as i32 + bounds.min.x as i32;
                let py = gy as i32 + bounds.min.y as i32;

                if px < 0 || py < 0 {
                    return;
                }
                let (px, py) = (px as u32, py as u32);
                if px >= canvas.width() || py >= canvas.height() {
                    return;
                }
                blend(canvas.get_pixel_mut(px, py), fill, coverage);
            });
        }
        caret_x += advance;
    }
}

/// Alpha-compose `fill` over `dst` at the given coverage.
fn blend(dst: &mut Rgba<u8>, fill: [u8; 4], coverage: f32) {
    let alpha = coverage * fill[3] as f32 / 255.0;
    if alpha <= 0.0 {
        return;
    }
    let inv = 1.0 - alpha;
    dst.0[0] = (fill[0] as f32 * alpha + dst.0[0] as f32 * inv) as u8;
    dst.0[1] = (fill[1] as f32 * alpha + dst.0[1] as f32 * inv) as u8;
    dst.0[2] = (fill[2] as f32 * alpha + dst.0[2] as f32 * inv) as u8;
    dst.0[3] = 255;
}

/// Encode the canvas as PNG with 144×144 DPI pixel-density metadata.
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, SlipError> {
    let mut out = Vec::new();

    let mut encoder = png::Encoder::new(&mut out, canvas.width(), canvas.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: PIXELS_PER_METER,
        yppu: PIXELS_PER_METER,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder
        .write_header()
        .map_err(|e| SlipError::Image(format!("failed to write PNG header: {}", e)))?;
    writer
        .write_image_data(canvas.as_raw())
        .map_err(|e| SlipError::Image(format!("failed to encode PNG: {}", e)))?;
    writer
        .finish()
        .map_err(|e| SlipError::Image(format!("failed to finish PNG: {}", e)))?;

    Ok(out)
}

// ============================================================================
// TESTS
// ============================================================================
