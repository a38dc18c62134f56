//! # OCR Scan-Line Assembly
//!
//! Builds the machine-readable code line printed at the bottom of the slip,
//! one token per OCR-B glyph so the renderer can place every glyph
//! individually.
//!
//! ## Line Format
//!
//! ```text
//! 01<10-digit amount><check>  >  <27-digit reference>  +  ␣  <bank id>  >
//! └──── amount code ───────┘           └─ reference ─┘        └─ 9 digits ┘
//! ```
//!
//! | Part | Content |
//! |------|---------|
//! | amount code | literal `01`, amount in cents zero-padded to 10 digits, check digit over the padded digits |
//! | `>` | field separator |
//! | reference | the 27 digits, one token each |
//! | `+` `␣` | separator and a non-printing spacer |
//! | bank id | account `c0-c1-c2` reformatted as `c0 + pad(c1, 6) + c2` |
//! | `>` | final separator |
//!
//! Two projections exist per token: [`ScanToken::glyph`] for the ASCII line
//! and image drawing, and [`ScanToken::markup`] for the positioned overlay
//! markup used in print templates (`>` and the spacer must be entity-escaped
//! there).

use crate::checksum;
use crate::context::PaymentContext;

/// Horizontal start of the scan line in the print-template overlay, in
/// millimeters.
pub const REF_START_LEFT_MM: f32 = 1.5;

/// One glyph of the scan line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanToken {
    /// A decimal digit.
    Digit(char),
    /// The `>` field separator.
    FieldSep,
    /// The `+` separator between reference and bank identifier.
    Plus,
    /// Non-printing spacer, rendered as a blank.
    Blank,
}

impl ScanToken {
    /// ASCII glyph for the concatenated line and for image drawing.
    pub fn glyph(&self) -> char {
        match self {
            Self::Digit(c) => *c,
            Self::FieldSep => '>',
            Self::Plus => '+',
            Self::Blank => ' ',
        }
    }

    /// Entity-escaped text for the print-template overlay.
    pub fn markup(&self) -> String {
        match self {
            Self::Digit(c) => c.to_string(),
            Self::FieldSep => "&gt;".to_string(),
            Self::Plus => "+".to_string(),
            Self::Blank => "&nbsp;".to_string(),
        }
    }
}

/// Reformat a `c0-c1-c2` account number as the 9-digit clearing identifier.
///
/// The middle component is zero-padded to 6 digits; an account that does not
/// split into exactly three components yields `None`.
pub fn bank_identifier(account: &str) -> Option<String> {
    let mut parts = account.split('-');
    let c0 = parts.next()?;
    let c1 = parts.next()?;
    let c2 = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some(format!("{}{:0>6}{}", c0, c1, c2))
}

/// Amount code: `01` + zero-padded cents + check digit.
///
/// The check digit covers the padded 10-digit amount only; the `01` prefix
/// stays outside the checksum scope.
fn amount_code(cents: u64) -> String {
    format!("01{}", checksum::append(&format!("{:010}", cents)))
}

/// Build the scan-line token sequence for an accounting line.
///
/// Returns an empty sequence for ineligible lines and for account numbers
/// that do not split into three components (validation reports those; token
/// building never fails).
pub fn build(ctx: &PaymentContext, reference: &str) -> Vec<ScanToken> {
    if !ctx.can_generate() {
        return Vec::new();
    }
    let Some(bank_id) = bank_identifier(&ctx.bank.number) else {
        return Vec::new();
    };

    let amount = amount_code(ctx.amount_cents());
    let mut tokens = Vec::with_capacity(amount.len() + reference.len() + bank_id.len() + 4);

    tokens.extend(amount.chars().map(ScanToken::Digit));
    tokens.push(ScanToken::FieldSep);
    tokens.extend(reference.chars().map(ScanToken::Digit));
    tokens.push(ScanToken::Plus);
    tokens.push(ScanToken::Blank);
    tokens.extend(bank_id.chars().map(ScanToken::Digit));
    tokens.push(ScanToken::FieldSep);
    tokens
}

/// Concatenate tokens into the ASCII scan line.
pub fn line(tokens: &[ScanToken]) -> String {
    tokens.iter().map(|t| t.glyph()).collect()
}

/// Positioned markup for print templates: one absolutely positioned element
/// per token inside an `ocrbb` wrapper, at `1.5mm + index × letter_spacing`.
pub fn markup(tokens: &[ScanToken], letter_spacing: f32) -> String {
    let mut out = String::from(r#"<div id="ocrbb">"#);
    for (i, token) in tokens.iter().enumerate() {
        let left = REF_START_LEFT_MM + i as f32 * letter_spacing;
        out.push_str(&format!(
            r#"<div class="digitref" style="left:{}mm">{}</div>"#,
            format_mm(left),
            token.markup()
        ));
    }
    out.push_str("</div>");
    out
}

/// Group digits for human-readable display: a space goes before every index
/// `i` with `(i - 2) mod group_size == 0`, so the first group holds two
/// characters and the rest `group_size`.
///
/// Display only; never fed back into the machine line.
pub fn group(text: &str, group_size: usize) -> String {
    debug_assert!(group_size > 0, "group size must be positive");

    let mut out = String::with_capacity(text.len() + text.len() / group_size + 1);
    for (i, c) in text.chars().enumerate() {
        if i >= 2 && (i - 2) % group_size == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Format a millimeter offset with up to two decimals, trailing zeros
/// trimmed (`1.50` → `1.5`, `14.00` → `14`).
fn format_mm(value: f32) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

// ============================================================================
// TESTS
// ============================================================================
