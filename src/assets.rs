//! Asset loading for slip rendering.
//!
//! The renderer consumes the [`AssetProvider`] trait only; the crate ships
//! [`FsAssets`], a filesystem provider rooted at a directory holding the
//! OCR-B font and the background templates. Fonts are parsed once and
//! cached; a [`ScaledFont`] is a cheap handle combining the parsed font
//! with a pixel size.

use std::collections::HashMap;
use std::path::PathBuf;

use ab_glyph::{Font, FontArc, ScaleFont};
use image::RgbaImage;
use parking_lot::Mutex;

use crate::error::SlipError;
use crate::layout::FontMetrics;

/// OCR-B font used for every field on the slip.
pub const OCR_FONT: &str = "ocrbb.ttf";

/// Decorated slip template (orange BVR form).
pub const DECORATED_TEMPLATE: &str = "bvr.png";

/// Plain white template, for printing onto pre-printed forms.
pub const PLAIN_TEMPLATE: &str = "white.png";

/// A parsed font at a fixed pixel size.
#[derive(Clone, Debug)]
pub struct ScaledFont {
    font: FontArc,
    px: f32,
}

impl ScaledFont {
    pub fn new(font: FontArc, px: f32) -> Self {
        Self { font, px }
    }

    /// Pixel size this handle was created with.
    pub fn px(&self) -> f32 {
        self.px
    }

    /// Distance from the top of the line box to the baseline.
    pub fn ascent(&self) -> f32 {
        self.font.as_scaled(self.px).ascent()
    }

    pub(crate) fn font(&self) -> &FontArc {
        &self.font
    }
}

impl FontMetrics for ScaledFont {
    fn measure(&self, text: &str) -> (f32, f32) {
        let scaled = self.font.as_scaled(self.px);

        let width: f32 = text
            .chars()
            .map(|ch| scaled.h_advance(self.font.glyph_id(ch)))
            .sum();
        let height = scaled.ascent() - scaled.descent();
        (width, height)
    }
}

/// Source of fonts and background templates.
///
/// `load_font` and `load_image` are fatal on failure: a slip without its
/// font or template cannot be rendered, so errors propagate instead of
/// being retried.
pub trait AssetProvider {
    fn load_font(&self, name: &str, size: f32) -> Result<ScaledFont, SlipError>;
    fn load_image(&self, name: &str) -> Result<RgbaImage, SlipError>;
}

/// Filesystem-backed asset provider.
///
/// Font files are read and parsed on first use, then served from an
/// in-process cache keyed by file name.
pub struct FsAssets {
    root: PathBuf,
    fonts: Mutex<HashMap<String, FontArc>>,
}

impl FsAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fonts: Mutex::new(HashMap::new()),
        }
    }

    fn parse_font(&self, name: &str) -> Result<FontArc, SlipError> {
        if let Some(font) = self.fonts.lock().get(name) {
            return Ok(font.clone());
        }

        let path = self.root.join(name);
        let bytes = std::fs::read(&path)
            .map_err(|e| SlipError::Asset(format!("failed to read font {}: {}", path.display(), e)))?;
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| SlipError::Asset(format!("failed to parse font {}: {}", name, e)))?;

        self.fonts.lock().insert(name.to_string(), font.clone());
        Ok(font)
    }
}

impl AssetProvider for FsAssets {
    fn load_font(&self, name: &str, size: f32) -> Result<ScaledFont, SlipError> {
        Ok(ScaledFont::new(self.parse_font(name)?, size))
    }

    fn load_image(&self, name: &str) -> Result<RgbaImage, SlipError> {
        let path = self.root.join(name);
        let img = image::open(&path)
            .map_err(|e| SlipError::Asset(format!("failed to load image {}: {}", path.display(), e)))?;
        Ok(img.to_rgba8())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_font_is_asset_error() {
        let assets = FsAssets::new("/nonexistent/assets");
        let err = assets.load_font(OCR_FONT, 20.0).unwrap_err();
        assert!(matches!(err, SlipError::Asset(_)));
        assert!(err.to_string().contains("ocrbb.ttf"));
    }

    #[test]
    fn test_missing_image_is_asset_error() {
        let assets = FsAssets::new("/nonexistent/assets");
        let err = assets.load_image(DECORATED_TEMPLATE).unwrap_err();
        assert!(matches!(err, SlipError::Asset(_)));
    }

    #[test]
    fn test_provider_is_object_safe() {
        let assets = FsAssets::new("/nonexistent/assets");
        let provider: &dyn AssetProvider = &assets;
        assert!(provider.load_image(PLAIN_TEMPLATE).is_err());
    }
}
