//! # Naranja - Swiss BVR/ESR Payment Slips
//!
//! Naranja generates the machine-readable parts of a Swiss structured
//! payment slip (BVR/ESR) for an invoice line and renders them onto the
//! orange slip template. It provides:
//!
//! - **Reference generation**: the 27-digit structured reference with its
//!   recursive mod-10 check digit
//! - **Scan-line assembly**: the OCR code line encoding amount, reference,
//!   and bank clearing identifier
//! - **Layout**: right-to-left glyph placement for OCR fields and the
//!   positioned overlay markup for print templates
//! - **Rendering**: OCR-B text composed onto the slip template, encoded as
//!   PNG at 144 DPI
//!
//! ## Quick Start
//!
//! ```
//! use naranja::{BankAccount, Invoice, LayoutConfig, PaymentContext, Partner, Slip};
//! use rust_decimal::Decimal;
//!
//! let ctx = PaymentContext {
//!     line_id: "987".into(),
//!     invoice: Some(Invoice::numbered("INV/2024/42", "INV42")),
//!     adherent_number: "01234".into(),
//!     bank: BankAccount::bvr("01-145-6"),
//!     amount: Decimal::new(3949, 2),
//!     partner: Partner::Standard {
//!         name: "Muster AG".into(),
//!         address_lines: vec!["Bahnhofstrasse 1".into(), "8001 Zürich".into()],
//!     },
//!     layout: LayoutConfig::default(),
//! };
//!
//! let slip = Slip::compute(&ctx);
//! assert_eq!(slip.reference.len(), 27);
//! assert!(slip.scan_line.ends_with("010001456>"));
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`checksum`] | Recursive mod-10 check digit |
//! | [`reference`] | 27-digit reference generation |
//! | [`scanline`] | OCR scan-line tokens, markup, display grouping |
//! | [`layout`] | Pure glyph placement |
//! | [`context`] | Input model for one accounting line |
//! | [`config`] | Layout configuration with defaults |
//! | [`slip`] | Slip computation, validation, image composition |
//! | [`store`] | At-most-one-slip-per-line storage |
//! | [`assets`] | Font and template loading |
//! | [`render`] | Glyph rasterization and PNG encoding |
//! | [`error`] | Error types |

pub mod assets;
pub mod checksum;
pub mod config;
pub mod context;
pub mod error;
pub mod layout;
pub mod reference;
pub mod render;
pub mod scanline;
pub mod slip;
pub mod store;

// Re-exports for convenience
pub use config::LayoutConfig;
pub use context::{AccountState, BankAccount, Invoice, Partner, PaymentContext};
pub use error::SlipError;
pub use slip::{Slip, validate};
pub use store::{MemoryStore, SlipStore};
