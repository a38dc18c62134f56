//! # Recursive Modulo-10 Checksum
//!
//! This module implements the recursive mod-10 check digit (`mod10r`) used by
//! the Swiss postal payment system for BVR/ESR reference numbers and the
//! amount control digit on the scan line.
//!
//! ## Algorithm
//!
//! The carry starts at 0. For each digit, the next carry is looked up in a
//! fixed 10×10 transition table indexed by `(carry, digit)`. The check digit
//! is `(10 - finalCarry) mod 10`.
//!
//! Every row of the table is the base sequence `0 9 4 6 8 2 7 1 3 5` rotated
//! left by the row number:
//!
//! | carry | 0 | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9 |
//! |-------|---|---|---|---|---|---|---|---|---|---|
//! | 0     | 0 | 9 | 4 | 6 | 8 | 2 | 7 | 1 | 3 | 5 |
//! | 1     | 9 | 4 | 6 | 8 | 2 | 7 | 1 | 3 | 5 | 0 |
//! | 2     | 4 | 6 | 8 | 2 | 7 | 1 | 3 | 5 | 0 | 9 |
//! | ...   |   |   |   |   |   |   |   |   |   |   |
//!
//! The table is a bit-exact protocol requirement: a reference or amount code
//! with a wrong check digit is rejected by the payment network.
//!
//! ## Usage
//!
//! ```
//! use naranja::checksum;
//!
//! assert_eq!(checksum::check("0100003949"), 0);
//! assert_eq!(checksum::append("0100003949"), "01000039490");
//! ```
//!
//! Inputs must be pure ASCII decimal digit strings. Non-digit input is a
//! contract violation on the caller's side, not a recoverable error.

/// Carry transition table. `TRANSITIONS[carry][digit]` yields the next carry.
const TRANSITIONS: [[u8; 10]; 10] = [
    [0, 9, 4, 6, 8, 2, 7, 1, 3, 5],
    [9, 4, 6, 8, 2, 7, 1, 3, 5, 0],
    [4, 6, 8, 2, 7, 1, 3, 5, 0, 9],
    [6, 8, 2, 7, 1, 3, 5, 0, 9, 4],
    [8, 2, 7, 1, 3, 5, 0, 9, 4, 6],
    [2, 7, 1, 3, 5, 0, 9, 4, 6, 8],
    [7, 1, 3, 5, 0, 9, 4, 6, 8, 2],
    [1, 3, 5, 0, 9, 4, 6, 8, 2, 7],
    [3, 5, 0, 9, 4, 6, 8, 2, 7, 1],
    [5, 0, 9, 4, 6, 8, 2, 7, 1, 3],
];

/// Compute the recursive mod-10 check digit for a digit string.
///
/// ## Panics
///
/// Panics if `digits` contains anything but ASCII `0`-`9`. Callers sanitize
/// their input first (see `reference::digits_of`).
pub fn check(digits: &str) -> u8 {
    debug_assert!(
        digits.bytes().all(|b| b.is_ascii_digit()),
        "checksum input must be decimal digits: {:?}",
        digits
    );

    let mut carry = 0usize;
    for b in digits.bytes() {
        let digit = (b - b'0') as usize;
        carry = TRANSITIONS[carry][digit] as usize;
    }
    ((10 - carry) % 10) as u8
}

/// Append the check digit to a digit string.
///
/// Output length is always input length + 1.
pub fn append(digits: &str) -> String {
    format!("{}{}", digits, check(digits))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_published_amount_vector() {
        // Published Swiss check-digit table example
        assert_eq!(check("0100003949"), 0);
    }

    #[test]
    fn test_check_published_reference_vectors() {
        // PostFinance reference examples with known check digits
        assert_eq!(check("96111690000000660000000928"), 4);
        assert_eq!(check("21000000000313947143000901"), 7);
    }

    #[test]
    fn test_append_published_vectors() {
        assert_eq!(append("0100003949"), "01000039490");
        assert_eq!(
            append("96111690000000660000000928"),
            "961116900000006600000009284"
        );
        assert_eq!(
            append("21000000000313947143000901"),
            "210000000003139471430009017"
        );
    }

    #[test]
    fn test_append_length() {
        for input in ["", "0", "42", "0000003949", "96111690000000660000000928"] {
            assert_eq!(append(input).len(), input.len() + 1);
        }
    }

    #[test]
    fn test_empty_input_yields_zero() {
        // No digits leave the carry at 0, so the check digit is (10 - 0) % 10
        assert_eq!(check(""), 0);
        assert_eq!(append(""), "0");
    }

    #[test]
    fn test_all_zeros_stay_at_zero() {
        // TRANSITIONS[0][0] == 0, so leading zeros never move the carry
        assert_eq!(check("0"), 0);
        assert_eq!(check("0000000000"), 0);
    }

    #[test]
    fn test_single_digits() {
        // Single digit d: carry = TRANSITIONS[0][d], check = (10 - carry) % 10
        let expected = [0, 1, 6, 4, 2, 8, 3, 9, 7, 5];
        for d in 0..10u8 {
            let s = d.to_string();
            assert_eq!(check(&s), expected[d as usize], "digit {}", d);
        }
    }

    #[test]
    fn test_check_is_deterministic() {
        let input = "01234000000000000000042987";
        assert_eq!(check(input), check(input));
    }

    #[test]
    fn test_rows_are_rotations() {
        // Each row must be the base row rotated left by the row index
        let base = TRANSITIONS[0];
        for (r, row) in TRANSITIONS.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                assert_eq!(v, base[(c + r) % 10], "row {} col {}", r, c);
            }
        }
    }
}
