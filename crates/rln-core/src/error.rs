//! # Error Types — Field Element Parsing
//!
//! Errors raised while converting external representations (decimal
//! strings, hex strings, arbitrary-precision integers) into
//! [`FieldElement`](crate::FieldElement) values.

use thiserror::Error;

/// Error converting a value into a BN254 scalar field element.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The input string was empty (or only a `0x` prefix).
    #[error("empty field element literal")]
    Empty,

    /// The input contained characters outside the expected radix.
    #[error("invalid base-{radix} field element literal: {input:?}")]
    InvalidDigits {
        /// Radix the input was parsed in (10 or 16).
        radix: u32,
        /// The rejected input.
        input: String,
    },

    /// The value is not below the scalar field modulus.
    #[error("value {0} is not below the BN254 scalar field modulus")]
    OutOfRange(String),
}
