//! # Layout Configuration
//!
//! User-tunable layout options for slip rendering. Every field has a
//! documented default, so an empty JSON object (`{}`) is a valid config.
//!
//! Offsets shift whole field groups relative to the template anchors, in
//! template pixels (144 DPI). They exist because printers feed paper with
//! slightly different margins; nudging the whole group keeps the slip
//! aligned with pre-printed forms.
//!
//! ## Defaults
//!
//! | Option | Default | Meaning |
//! |--------|---------|---------|
//! | `address_dx` / `address_dy` | 0 | payee address block shift |
//! | `bank_dx` / `bank_dy` | 0 | raw account number shift |
//! | `amount_dx` / `amount_dy` | 0 | franc/cent boxes shift |
//! | `scan_line_dx` / `scan_line_dy` | 0 | OCR scan line shift |
//! | `font_size` | 20.0 | base font size (pixels) |
//! | `scan_line_font_size` | `null` | scan-line override, falls back to `font_size` |
//! | `scan_line_letter_spacing` | 2.55 | markup letter spacing (millimeters) |
//! | `background` | `true` | decorated template vs plain white |
//! | `fill` | `[0, 0, 0, 255]` | text color (RGBA) |

use serde::{Deserialize, Serialize};

fn default_font_size() -> f32 {
    LayoutConfig::DEFAULT_FONT_SIZE
}

fn default_letter_spacing() -> f32 {
    LayoutConfig::DEFAULT_LETTER_SPACING
}

fn default_background() -> bool {
    true
}

fn default_fill() -> [u8; 4] {
    [0, 0, 0, 255]
}

/// Layout options for slip rendering.
///
/// All fields are optional in the serialized form; missing fields take the
/// defaults above.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal shift of the payee address blocks.
    #[serde(default)]
    pub address_dx: f32,
    /// Vertical shift of the payee address blocks.
    #[serde(default)]
    pub address_dy: f32,

    /// Horizontal shift of the printed account number.
    #[serde(default)]
    pub bank_dx: f32,
    /// Vertical shift of the printed account number.
    #[serde(default)]
    pub bank_dy: f32,

    /// Horizontal shift of the amount boxes.
    #[serde(default)]
    pub amount_dx: f32,
    /// Vertical shift of the amount boxes.
    #[serde(default)]
    pub amount_dy: f32,

    /// Horizontal shift of the scan line.
    #[serde(default)]
    pub scan_line_dx: f32,
    /// Vertical shift of the scan line.
    #[serde(default)]
    pub scan_line_dy: f32,

    /// Base font size in template pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Scan-line font size override. `null` falls back to `font_size`.
    #[serde(default)]
    pub scan_line_font_size: Option<f32>,

    /// Letter spacing of the positioned scan-line markup, in millimeters.
    #[serde(default = "default_letter_spacing")]
    pub scan_line_letter_spacing: f32,

    /// Draw the decorated slip template. `false` renders on plain white,
    /// for printing onto pre-printed forms.
    #[serde(default = "default_background")]
    pub background: bool,

    /// Text color as RGBA.
    #[serde(default = "default_fill")]
    pub fill: [u8; 4],
}

impl LayoutConfig {
    /// Base font size when nothing is configured.
    pub const DEFAULT_FONT_SIZE: f32 = 20.0;

    /// Markup letter spacing when nothing is configured, in millimeters.
    pub const DEFAULT_LETTER_SPACING: f32 = 2.55;

    /// Effective scan-line font size (override or base).
    #[inline]
    pub fn scan_line_font_size(&self) -> f32 {
        self.scan_line_font_size.unwrap_or(self.font_size)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            address_dx: 0.0,
            address_dy: 0.0,
            bank_dx: 0.0,
            bank_dy: 0.0,
            amount_dx: 0.0,
            amount_dy: 0.0,
            scan_line_dx: 0.0,
            scan_line_dy: 0.0,
            font_size: Self::DEFAULT_FONT_SIZE,
            scan_line_font_size: None,
            scan_line_letter_spacing: Self::DEFAULT_LETTER_SPACING,
            background: true,
            fill: [0, 0, 0, 255],
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
