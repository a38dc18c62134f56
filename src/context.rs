//! Input context for slip computation.
//!
//! All types derive `Serialize + Deserialize` so the same types work for
//! both Rust API construction and JSON contexts fed to the CLI.
//!
//! A context is immutable per computation: the derived [`Slip`](crate::Slip)
//! is a pure function of it.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;

/// Invoice attached to an accounting line.
///
/// A line can carry an invoice that has not been numbered yet (draft state):
/// `number` is `None` then, and the reference seed falls back to the line
/// identifier. A line with no invoice at all (`PaymentContext::invoice` is
/// `None`) cannot be printed and fails validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Display identity, used in validation error messages.
    pub label: String,
    /// Definitive invoice number, once assigned.
    #[serde(default)]
    pub number: Option<String>,
}

impl Invoice {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            number: None,
        }
    }

    pub fn numbered(label: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            number: Some(number.into()),
        }
    }
}

/// Payment state of the bank account attached to the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountState {
    /// Swiss postal payment slip account; the only state that generates.
    Bvr,
    /// Ordinary bank transfer account.
    Bank,
    /// IBAN account.
    Iban,
}

/// Bank account of the payee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccount {
    /// Account number in `NN-NNN..NNNNNN-N` form (2 digits, 3-6 digits, 1 digit).
    pub number: String,
    pub state: AccountState,
    /// Draw the raw account number onto the slip image.
    #[serde(default)]
    pub print_account: bool,
}

impl BankAccount {
    /// A BVR account with the given number.
    pub fn bvr(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            state: AccountState::Bvr,
            print_account: false,
        }
    }
}

/// The payee, as resolved by the external context provider.
///
/// Commercial partners carry a separate trading name and address; the
/// distinction is made by the provider, never probed at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Partner {
    Standard {
        name: String,
        address_lines: Vec<String>,
    },
    Commercial {
        name: String,
        address_lines: Vec<String>,
    },
}

impl Partner {
    pub fn name(&self) -> &str {
        match self {
            Self::Standard { name, .. } => name,
            Self::Commercial { name, .. } => name,
        }
    }

    pub fn address_lines(&self) -> &[String] {
        match self {
            Self::Standard { address_lines, .. } => address_lines,
            Self::Commercial { address_lines, .. } => address_lines,
        }
    }
}

/// Everything needed to compute and render one payment slip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentContext {
    /// Opaque stable identifier of the source accounting line.
    pub line_id: String,
    /// Invoice attached to the line, if any.
    #[serde(default)]
    pub invoice: Option<Invoice>,
    /// Biller identifier, 0-6 digits, may be empty.
    #[serde(default)]
    pub adherent_number: String,
    pub bank: BankAccount,
    /// Amount due. Non-negative, two fractional digits.
    pub amount: Decimal,
    pub partner: Partner,
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl PaymentContext {
    /// Whether a reference and scan line can be generated for this line.
    ///
    /// Requires an attached invoice and a BVR account. Everything else
    /// yields empty outputs, not errors.
    pub fn can_generate(&self) -> bool {
        self.invoice.is_some() && self.bank.state == AccountState::Bvr
    }

    /// Invoice number, when an invoice is attached and numbered.
    pub fn invoice_number(&self) -> Option<&str> {
        self.invoice.as_ref()?.number.as_deref()
    }

    /// Amount in integer cents.
    ///
    /// The context contract guarantees a non-negative amount with two
    /// fractional digits; anything outside `u64` range clamps to zero.
    pub fn amount_cents(&self) -> u64 {
        let cents = (self.amount.round_dp(2) * Decimal::ONE_HUNDRED).trunc();
        cents.to_u64().unwrap_or(0)
    }

    /// Amount split into franc and zero-padded cent strings, for the
    /// franc/cent boxes on the slip.
    pub fn amount_parts(&self) -> (String, String) {
        let cents = self.amount_cents();
        (format!("{}", cents / 100), format!("{:02}", cents % 100))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn context(state: AccountState, invoice: Option<Invoice>) -> PaymentContext {
        PaymentContext {
            line_id: "987".into(),
            invoice,
            adherent_number: "01234".into(),
            bank: BankAccount {
                number: "01-145-6".into(),
                state,
                print_account: false,
            },
            amount: dec!(39.49),
            partner: Partner::Standard {
                name: "Muster AG".into(),
                address_lines: vec!["Bahnhofstrasse 1".into(), "8001 Zürich".into()],
            },
            layout: LayoutConfig::default(),
        }
    }

    #[test]
    fn test_can_generate_requires_bvr_state() {
        let invoice = Some(Invoice::numbered("INV/2024/42", "INV42"));
        assert!(context(AccountState::Bvr, invoice.clone()).can_generate());
        assert!(!context(AccountState::Bank, invoice.clone()).can_generate());
        assert!(!context(AccountState::Iban, invoice).can_generate());
    }

    #[test]
    fn test_can_generate_requires_invoice() {
        assert!(!context(AccountState::Bvr, None).can_generate());
        // An unnumbered invoice still generates (seed falls back to the line)
        assert!(context(AccountState::Bvr, Some(Invoice::new("draft"))).can_generate());
    }

    #[test]
    fn test_amount_cents() {
        let mut ctx = context(AccountState::Bvr, None);
        assert_eq!(ctx.amount_cents(), 3949);

        ctx.amount = dec!(0);
        assert_eq!(ctx.amount_cents(), 0);

        ctx.amount = dec!(1000039.49);
        assert_eq!(ctx.amount_cents(), 100003949);
    }

    #[test]
    fn test_amount_parts() {
        let mut ctx = context(AccountState::Bvr, None);
        assert_eq!(ctx.amount_parts(), ("39".to_string(), "49".to_string()));

        ctx.amount = dec!(7.05);
        assert_eq!(ctx.amount_parts(), ("7".to_string(), "05".to_string()));

        ctx.amount = dec!(1500);
        assert_eq!(ctx.amount_parts(), ("1500".to_string(), "00".to_string()));
    }

    #[test]
    fn test_partner_accessors() {
        let partner = Partner::Commercial {
            name: "ACME Trading".into(),
            address_lines: vec!["PO Box 5".into()],
        };
        assert_eq!(partner.name(), "ACME Trading");
        assert_eq!(partner.address_lines(), ["PO Box 5".to_string()]);
    }

    #[test]
    fn test_context_json_round_trip() {
        let ctx = context(AccountState::Bvr, Some(Invoice::numbered("INV/2024/42", "INV42")));
        let json = serde_json::to_string(&ctx).unwrap();
        let back: PaymentContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back.line_id, "987");
        assert_eq!(back.bank.state, AccountState::Bvr);
        assert_eq!(back.amount, dec!(39.49));
        assert_eq!(back.partner.name(), "Muster AG");
    }

    #[test]
    fn test_partner_json_tag() {
        let json = r#"{"type": "commercial", "name": "ACME", "address_lines": []}"#;
        let partner: Partner = serde_json::from_str(json).unwrap();
        assert!(matches!(partner, Partner::Commercial { .. }));
    }
}
