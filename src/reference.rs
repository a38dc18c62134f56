//! # BVR/ESR Reference Generation
//!
//! Builds the 27-digit structured reference printed on the slip and encoded
//! in the scan line:
//!
//! ```text
//! <adherent (0-6 digits)><body (zero-padded seed)><check digit>
//! └────────────────── 26 digits ─────────────────┘└─ mod10r ─┘
//! ```
//!
//! The seed comes from the invoice number concatenated with the line
//! identifier (digits only); an unnumbered invoice falls back to the line
//! identifier alone. The body is the seed right-aligned to
//! `26 - len(adherent)`; a seed wider than the body keeps its rightmost
//! (least significant) digits.

use crate::checksum;
use crate::context::PaymentContext;

/// Keep only ASCII decimal digits of `s`, in order.
pub fn digits_of(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Right-align `digits` in a field of `width`, zero-padded.
///
/// Overlong input is truncated from the left so the least significant
/// digits survive.
fn right_aligned(digits: &str, width: usize) -> String {
    if digits.len() >= width {
        digits[digits.len() - width..].to_string()
    } else {
        format!("{}{}", "0".repeat(width - digits.len()), digits)
    }
}

/// Generate the 27-digit reference for an accounting line.
///
/// Returns `None` when the line is not eligible (non-BVR account or no
/// invoice attached); that is a normal negative outcome, not an error.
///
/// The adherent number contract (0-6 ASCII digits) is the caller's to
/// uphold, like the digit contract of [`checksum`].
pub fn generate(ctx: &PaymentContext) -> Option<String> {
    if !ctx.can_generate() {
        return None;
    }

    debug_assert!(
        ctx.adherent_number.len() <= 6
            && ctx.adherent_number.bytes().all(|b| b.is_ascii_digit()),
        "adherent number must be 0-6 digits: {:?}",
        ctx.adherent_number
    );

    let seed = match ctx.invoice_number() {
        Some(number) => digits_of(&format!("{}{}", number, ctx.line_id)),
        None => digits_of(&ctx.line_id),
    };

    let body_width = 26usize.saturating_sub(ctx.adherent_number.len());
    let body = right_aligned(&seed, body_width);

    Some(checksum::append(&format!("{}{}", ctx.adherent_number, body)))
}

// ============================================================================
// TESTS
// ============================================================================
