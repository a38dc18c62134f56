//! # Error Types
//!
//! This module defines error types used throughout the naranja library.
//!
//! Ineligibility (a line whose bank account is not a BVR account, or that has
//! no invoice yet) is **not** an error: generators return empty values for it.
//! Errors are reserved for validation failures that make a slip unprintable
//! and for asset/encoding problems during rendering.

use thiserror::Error;

/// Main error type for payment-slip operations
#[derive(Debug, Error)]
pub enum SlipError {
    /// The accounting line has no invoice attached; nothing to print
    #[error("No invoice attached to line {line}")]
    MissingInvoice { line: String },

    /// Bank account number does not match the NN-NNN..NNNNNN-N layout
    #[error("Bank account {account} on invoice {invoice} is not a valid BVR account number")]
    InvalidBankAccount { account: String, invoice: String },

    /// Font or background template unavailable or undecodable
    #[error("Asset error: {0}")]
    Asset(String),

    /// Payment context could not be parsed
    #[error("Invalid context: {0}")]
    Context(String),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
