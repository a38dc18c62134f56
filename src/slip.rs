//! # Slip Computation and Rendering
//!
//! Ties the generators together: computes the derived [`Slip`] value for an
//! accounting line, validates that a line is printable, and composes the
//! full slip image.
//!
//! ## Template Anchors
//!
//! The draw plan targets the standard slip template at 144 DPI. Every field
//! is drawn twice, once per slip copy (receipt stub and payment part):
//!
//! | Field | Copy 1 | Copy 2 | Direction |
//! |-------|--------|--------|-----------|
//! | payee address | (10, 43) | (10, 355) | top to bottom |
//! | amount francs | (214, 290) | (560, 290) | right-aligned |
//! | amount cents | (304, 290) | (650, 290) | right-aligned |
//! | account number | (144, 240) | (490, 240) | plain text |
//! | scan line | (1296, 475) | — | right-aligned |
//!
//! Anchors shift by the corresponding [`LayoutConfig`](crate::LayoutConfig)
//! offsets, so slips can be nudged onto pre-printed forms.

use std::sync::OnceLock;

use image::RgbaImage;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::assets::{AssetProvider, DECORATED_TEMPLATE, OCR_FONT, PLAIN_TEMPLATE, ScaledFont};
use crate::context::PaymentContext;
use crate::error::SlipError;
use crate::{layout, reference, render, scanline};

const ADDRESS_ANCHORS: [(f32, f32); 2] = [(10.0, 43.0), (10.0, 355.0)];
const FRANC_ANCHORS: [(f32, f32); 2] = [(214.0, 290.0), (560.0, 290.0)];
const CENT_ANCHORS: [(f32, f32); 2] = [(304.0, 290.0), (650.0, 290.0)];
const BANK_ANCHORS: [(f32, f32); 2] = [(144.0, 240.0), (490.0, 240.0)];
const SCAN_LINE_ANCHOR: (f32, f32) = (1296.0, 475.0);

/// Derived payment-slip values for one accounting line.
///
/// A `Slip` is a pure function of its [`PaymentContext`]: identical context
/// yields an identical slip. Ineligible lines produce empty strings, never
/// errors. Slips are replaced on context change, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slip {
    /// 27-digit structured reference, or empty when not eligible.
    pub reference: String,
    /// Concatenated OCR scan line, or empty.
    pub scan_line: String,
    /// Positioned overlay markup for print templates, or empty.
    pub scan_line_markup: String,
}

impl Slip {
    /// Compute the slip for a context. Pure, no I/O.
    pub fn compute(ctx: &PaymentContext) -> Self {
        let reference = reference::generate(ctx).unwrap_or_default();
        let tokens = scanline::build(ctx, &reference);

        let (scan_line, scan_line_markup) = if tokens.is_empty() {
            (String::new(), String::new())
        } else {
            (
                scanline::line(&tokens),
                scanline::markup(&tokens, ctx.layout.scan_line_letter_spacing),
            )
        };

        Self {
            reference,
            scan_line,
            scan_line_markup,
        }
    }

    /// Compose the full slip image and encode it as PNG at 144 DPI.
    ///
    /// Validates the context first: rendering an unprintable slip is the
    /// fatal case validation exists to catch.
    pub fn render_image(
        &self,
        ctx: &PaymentContext,
        assets: &dyn AssetProvider,
    ) -> Result<Vec<u8>, SlipError> {
        validate(ctx)?;

        let layout_cfg = &ctx.layout;
        let template = if layout_cfg.background {
            DECORATED_TEMPLATE
        } else {
            PLAIN_TEMPLATE
        };
        let mut canvas = assets.load_image(template)?;
        let font = assets.load_font(OCR_FONT, layout_cfg.font_size)?;
        let fill = layout_cfg.fill;

        // Payee address, name first, on both copies
        let mut address = vec![ctx.partner.name().to_string()];
        address.extend(ctx.partner.address_lines().iter().cloned());
        for &(ax, ay) in &ADDRESS_ANCHORS {
            let origin = (ax + layout_cfg.address_dx, ay + layout_cfg.address_dy);
            for (line, x, y) in layout::address_positions(&address, origin, layout_cfg.font_size) {
                render::draw_text(&mut canvas, &font, x, y, line, fill);
            }
        }

        // Franc and cent boxes, right-aligned at their anchors
        let (francs, cents) = ctx.amount_parts();
        for (anchors, text) in [(&FRANC_ANCHORS, &francs), (&CENT_ANCHORS, &cents)] {
            for &(ax, ay) in anchors {
                let origin = (ax + layout_cfg.amount_dx, ay + layout_cfg.amount_dy);
                draw_right_aligned(&mut canvas, &font, text, origin, fill);
            }
        }

        // Raw account number, when the payer wants it visible
        if ctx.bank.print_account {
            for &(ax, ay) in &BANK_ANCHORS {
                let x = ax + layout_cfg.bank_dx;
                let y = ay + layout_cfg.bank_dy;
                render::draw_text(&mut canvas, &font, x, y, &ctx.bank.number, fill);
            }
        }

        // OCR scan line, right-aligned at the bottom anchor
        let tokens = scanline::build(ctx, &self.reference);
        if !tokens.is_empty() {
            let scan_font = assets.load_font(OCR_FONT, layout_cfg.scan_line_font_size())?;
            let origin = (
                SCAN_LINE_ANCHOR.0 + layout_cfg.scan_line_dx,
                SCAN_LINE_ANCHOR.1 + layout_cfg.scan_line_dy,
            );
            let glyphs: String = tokens.iter().rev().map(|t| t.glyph()).collect();
            for (c, x, y) in layout::positions_rtl(&glyphs, origin, &scan_font) {
                render::draw_text(&mut canvas, &scan_font, x, y, c.encode_utf8(&mut [0u8; 4]), fill);
            }
        }

        render::encode_png(&canvas)
    }
}

/// Draw `text` with its glyph sequence right-aligned at `origin`.
///
/// The placement walk runs right to left, so the reversed string puts the
/// last character at the anchor and the text reads normally.
fn draw_right_aligned(
    canvas: &mut RgbaImage,
    font: &ScaledFont,
    text: &str,
    origin: (f32, f32),
    fill: [u8; 4],
) {
    let reversed: String = text.chars().rev().collect();
    for (c, x, y) in layout::positions_rtl(&reversed, origin, font) {
        render::draw_text(canvas, font, x, y, c.encode_utf8(&mut [0u8; 4]), fill);
    }
}

fn account_pattern() -> &'static Regex {
    static ACCOUNT_PATTERN: OnceLock<Regex> = OnceLock::new();
    ACCOUNT_PATTERN
        .get_or_init(|| Regex::new(r"^\d{2}-\d{3,6}-\d$").expect("account pattern is valid"))
}

/// Check that a line is printable: an invoice must be attached and the bank
/// account number must have the `NN-NNN..NNNNNN-N` layout.
pub fn validate(ctx: &PaymentContext) -> Result<(), SlipError> {
    let invoice = ctx.invoice.as_ref().ok_or_else(|| SlipError::MissingInvoice {
        line: ctx.line_id.clone(),
    })?;

    if !account_pattern().is_match(&ctx.bank.number) {
        return Err(SlipError::InvalidBankAccount {
            account: ctx.bank.number.clone(),
            invoice: invoice.label.clone(),
        });
    }
    Ok(())
}

/// Compute slips for every eligible context, skipping ineligible ones.
pub fn compute_eligible(contexts: &[PaymentContext]) -> Vec<Slip> {
    contexts
        .iter()
        .filter(|ctx| ctx.can_generate())
        .map(Slip::compute)
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::context::{AccountState, BankAccount, Invoice, Partner};
    use rust_decimal_macros::dec;

    fn context() -> PaymentContext {
        PaymentContext {
            line_id: "987".into(),
            invoice: Some(Invoice::numbered("INV/2024/42", "INV42")),
            adherent_number: "01234".into(),
            bank: BankAccount::bvr("01-145-6"),
            amount: dec!(39.49),
            partner: Partner::Standard {
                name: "Muster AG".into(),
                address_lines: vec!["Bahnhofstrasse 1".into(), "8001 Zürich".into()],
            },
            layout: LayoutConfig::default(),
        }
    }

    // ── compute ─────────────────────────────────────────────────────────

    #[test]
    fn compute_full_slip() {
        let slip = Slip::compute(&context());
        assert_eq!(slip.reference, "012340000000000000000429877");
        assert_eq!(
            slip.scan_line,
            "0100000039493>012340000000000000000429877+ 010001456>"
        );
        assert!(slip.scan_line_markup.starts_with(r#"<div id="ocrbb">"#));
        assert!(slip.scan_line_markup.ends_with("</div>"));
    }

    #[test]
    fn compute_is_pure() {
        let ctx = context();
        assert_eq!(Slip::compute(&ctx), Slip::compute(&ctx));
    }

    #[test]
    fn compute_ineligible_state_is_all_empty() {
        let mut ctx = context();
        ctx.bank.state = AccountState::Bank;
        let slip = Slip::compute(&ctx);
        assert_eq!(slip.reference, "");
        assert_eq!(slip.scan_line, "");
        assert_eq!(slip.scan_line_markup, "");
    }

    #[test]
    fn compute_without_invoice_is_all_empty() {
        let mut ctx = context();
        ctx.invoice = None;
        let slip = Slip::compute(&ctx);
        assert_eq!(slip.reference, "");
        assert_eq!(slip.scan_line, "");
    }

    #[test]
    fn compute_malformed_account_keeps_reference() {
        // Token building refuses an account that does not split; the
        // reference itself does not depend on the account number
        let mut ctx = context();
        ctx.bank.number = "011456".into();
        let slip = Slip::compute(&ctx);
        assert_eq!(slip.reference.len(), 27);
        assert_eq!(slip.scan_line, "");
        assert_eq!(slip.scan_line_markup, "");
    }

    // ── validate ────────────────────────────────────────────────────────

    #[test]
    fn validate_accepts_well_formed_account() {
        assert!(validate(&context()).is_ok());

        let mut ctx = context();
        ctx.bank.number = "01-1456-6".into();
        assert!(validate(&ctx).is_ok());
    }

    #[test]
    fn validate_rejects_bad_account_layout() {
        let mut ctx = context();
        for bad in ["011-45-6", "1-145-6", "01-12-3", "01-1234567-8", "01-145-67"] {
            ctx.bank.number = bad.into();
            let err = validate(&ctx).unwrap_err();
            assert!(
                matches!(err, SlipError::InvalidBankAccount { .. }),
                "{} should fail",
                bad
            );
        }
    }

    #[test]
    fn validate_rejects_trailing_garbage() {
        let mut ctx = context();
        ctx.bank.number = "01-145-6X".into();
        assert!(validate(&ctx).is_err());
    }

    #[test]
    fn validate_reports_invoice_identity() {
        let mut ctx = context();
        ctx.bank.number = "011-45-6".into();
        let msg = validate(&ctx).unwrap_err().to_string();
        assert!(msg.contains("011-45-6"));
        assert!(msg.contains("INV/2024/42"));
    }

    #[test]
    fn validate_requires_invoice() {
        let mut ctx = context();
        ctx.invoice = None;
        let err = validate(&ctx).unwrap_err();
        assert!(matches!(err, SlipError::MissingInvoice { .. }));
        assert!(err.to_string().contains("987"));
    }

    // ── batch ───────────────────────────────────────────────────────────

    #[test]
    fn batch_skips_ineligible_lines() {
        let eligible = context();
        let mut no_invoice = context();
        no_invoice.invoice = None;
        let mut wrong_state = context();
        wrong_state.bank.state = AccountState::Iban;

        let slips = compute_eligible(&[eligible, no_invoice, wrong_state]);
        assert_eq!(slips.len(), 1);
        assert_eq!(slips[0].reference, "012340000000000000000429877");
    }

    // ── render ──────────────────────────────────────────────────────────

    #[test]
    fn render_fails_validation_before_touching_assets() {
        let mut ctx = context();
        ctx.invoice = None;
        let assets = crate::assets::FsAssets::new("/nonexistent");
        let slip = Slip::compute(&ctx);
        let err = slip.render_image(&ctx, &assets).unwrap_err();
        assert!(matches!(err, SlipError::MissingInvoice { .. }));
    }

    #[test]
    fn render_surfaces_asset_errors() {
        let ctx = context();
        let assets = crate::assets::FsAssets::new("/nonexistent");
        let slip = Slip::compute(&ctx);
        let err = slip.render_image(&ctx, &assets).unwrap_err();
        assert!(matches!(err, SlipError::Asset(_)));
    }
}
