//! # Field Elements — BN254 Scalar Field
//!
//! Every hash output, tree node, identity component and circuit signal in the
//! RLN stack is an element of the BN254 scalar field:
//!
//! ```text
//! p = 21888242871839275222246405745257275088548364400416034343698204186575808495617
//! ```
//!
//! [`FieldElement`] wraps `ark_bn254::Fr` so that arithmetic always reduces
//! modulo `p`, and fixes the text forms used on the wire:
//!
//! - `Display` and serde use the decimal form (snarkjs convention).
//! - [`FieldElement::to_hex`] yields the minimal `0x`-prefixed form used by
//!   serialized identities.
//!
//! ## Strict vs. Reducing Conversions
//!
//! Parsing (`FromStr`, [`FieldElement::try_from_biguint`]) rejects values
//! that are not below `p`. Call sites that coerce arbitrary integers into
//! the field (message encoding, derived identity components) use
//! [`FieldElement::from_biguint_reduced`] or
//! [`FieldElement::from_be_bytes_mod_order`] explicitly.

use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;
use std::sync::OnceLock;

use ark_bn254::Fr;
use ark_ff::{BigInteger, Field, PrimeField, Zero};
use num_bigint::BigUint;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FieldError;

/// Decimal representation of the BN254 scalar field modulus.
pub const BN254_SCALAR_MODULUS: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

/// Width in bytes of a canonical big-endian field element encoding.
pub const FIELD_BYTES: usize = 32;

fn modulus() -> &'static BigUint {
    static MODULUS: OnceLock<BigUint> = OnceLock::new();
    MODULUS.get_or_init(|| BigUint::from_bytes_be(&Fr::MODULUS.to_bytes_be()))
}

/// An element of the BN254 scalar field.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FieldElement(Fr);

impl FieldElement {
    /// The additive identity.
    pub fn zero() -> Self {
        Self(Fr::zero())
    }

    /// The scalar field modulus `p` as an arbitrary-precision integer.
    pub fn modulus() -> BigUint {
        modulus().clone()
    }

    /// Interpret `bytes` as a big-endian unsigned integer and reduce mod `p`.
    pub fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
        Self(Fr::from_be_bytes_mod_order(bytes))
    }

    /// Reduce an arbitrary unsigned integer into the field.
    pub fn from_biguint_reduced(value: &BigUint) -> Self {
        Self::from_be_bytes_mod_order(&value.to_bytes_be())
    }

    /// Convert an unsigned integer, rejecting values `>= p`.
    pub fn try_from_biguint(value: &BigUint) -> Result<Self, FieldError> {
        if value >= modulus() {
            return Err(FieldError::OutOfRange(value.to_str_radix(10)));
        }
        Ok(Self::from_biguint_reduced(value))
    }

    /// Parse a hexadecimal literal with an optional `0x` prefix.
    pub fn parse_hex(input: &str) -> Result<Self, FieldError> {
        let digits = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .unwrap_or(input);
        let value = parse_radix(input, digits, 16)?;
        Self::try_from_biguint(&value)
    }

    /// Parse a decimal literal.
    pub fn parse_decimal(input: &str) -> Result<Self, FieldError> {
        let value = parse_radix(input, input, 10)?;
        Self::try_from_biguint(&value)
    }

    /// Canonical 32-byte big-endian encoding.
    pub fn to_be_bytes(&self) -> [u8; FIELD_BYTES] {
        let bytes = self.0.into_bigint().to_bytes_be();
        let mut out = [0u8; FIELD_BYTES];
        out[FIELD_BYTES - bytes.len()..].copy_from_slice(&bytes);
        out
    }

    /// The value as an arbitrary-precision integer in `[0, p)`.
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.to_be_bytes())
    }

    /// Minimal lowercase hex with a `0x` prefix (`0x0` for zero).
    pub fn to_hex(&self) -> String {
        format!("0x{}", self.to_biguint().to_str_radix(16))
    }

    /// Access the underlying arkworks scalar.
    pub fn inner(&self) -> Fr {
        self.0
    }

    /// Returns `true` for the additive identity.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiplicative inverse, `None` for zero.
    pub fn inverse(&self) -> Option<Self> {
        self.0.inverse().map(Self)
    }
}

fn parse_radix(original: &str, digits: &str, radix: u32) -> Result<BigUint, FieldError> {
    if digits.is_empty() {
        return Err(FieldError::Empty);
    }
    BigUint::parse_bytes(digits.as_bytes(), radix).ok_or_else(|| FieldError::InvalidDigits {
        radix,
        input: original.to_string(),
    })
}

impl From<Fr> for FieldElement {
    fn from(value: Fr) -> Self {
        Self(value)
    }
}

impl From<FieldElement> for Fr {
    fn from(value: FieldElement) -> Self {
        value.0
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self(Fr::from(value))
    }
}

impl FromStr for FieldElement {
    type Err = FieldError;

    /// Decimal, or hexadecimal when prefixed with `0x`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with("0x") || s.starts_with("0X") {
            Self::parse_hex(s)
        } else {
            Self::parse_decimal(s)
        }
    }
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_biguint().to_str_radix(10))
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({self})")
    }
}

impl fmt::LowerHex for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_biguint().to_str_radix(16))
    }
}

impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct FieldElementVisitor;

impl<'de> Visitor<'de> for FieldElementVisitor {
    type Value = FieldElement;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal or 0x-prefixed hex string, or an unsigned integer")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<FieldElement, E> {
        Ok(FieldElement::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<FieldElement, E> {
        u64::try_from(v)
            .map(FieldElement::from)
            .map_err(|_| E::custom(format!("negative field element: {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FieldElement, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldElementVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modulus_matches_published_constant() {
        assert_eq!(
            FieldElement::modulus().to_str_radix(10),
            BN254_SCALAR_MODULUS
        );
    }

    #[test]
    fn decimal_and_hex_parse_to_same_value() {
        let a: FieldElement = "255".parse().unwrap();
        let b: FieldElement = "0xff".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a, FieldElement::from(255u64));
    }

    #[test]
    fn parse_hex_accepts_missing_prefix() {
        assert_eq!(
            FieldElement::parse_hex("1c8").unwrap(),
            FieldElement::from(456u64)
        );
    }

    #[test]
    fn modulus_itself_is_rejected() {
        let err = BN254_SCALAR_MODULUS.parse::<FieldElement>().unwrap_err();
        assert!(matches!(err, FieldError::OutOfRange(_)));
    }

    #[test]
    fn reducing_conversion_wraps_modulus_to_zero() {
        let p = FieldElement::modulus();
        assert!(FieldElement::from_biguint_reduced(&p).is_zero());
        let p_plus_one = p + BigUint::from(1u8);
        assert_eq!(
            FieldElement::from_biguint_reduced(&p_plus_one),
            FieldElement::from(1u64)
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            "12a".parse::<FieldElement>(),
            Err(FieldError::InvalidDigits { radix: 10, .. })
        ));
        assert!(matches!(
            "0x".parse::<FieldElement>(),
            Err(FieldError::Empty)
        ));
        assert!(matches!("".parse::<FieldElement>(), Err(FieldError::Empty)));
    }

    #[test]
    fn zero_formats() {
        let z = FieldElement::zero();
        assert_eq!(z.to_string(), "0");
        assert_eq!(z.to_hex(), "0x0");
        assert_eq!(z.to_be_bytes(), [0u8; 32]);
    }

    #[test]
    fn hex_is_minimal() {
        assert_eq!(FieldElement::from(456u64).to_hex(), "0x1c8");
        assert_eq!(format!("{:x}", FieldElement::from(16u64)), "10");
    }

    #[test]
    fn be_bytes_are_left_padded() {
        let bytes = FieldElement::from(0x0102u64).to_be_bytes();
        assert_eq!(bytes[30], 0x01);
        assert_eq!(bytes[31], 0x02);
        assert!(bytes[..30].iter().all(|b| *b == 0));
        assert_eq!(
            FieldElement::from_be_bytes_mod_order(&bytes),
            FieldElement::from(0x0102u64)
        );
    }

    #[test]
    fn arithmetic_reduces_mod_p() {
        let p_minus_one = FieldElement::from_biguint_reduced(
            &(FieldElement::modulus() - BigUint::from(1u8)),
        );
        assert!((p_minus_one + FieldElement::from(1u64)).is_zero());
        assert_eq!(
            FieldElement::zero() - FieldElement::from(1u64),
            p_minus_one
        );
        let three = FieldElement::from(3u64);
        let inv = three.inverse().unwrap();
        assert_eq!(three * inv, FieldElement::from(1u64));
        assert!(FieldElement::zero().inverse().is_none());
    }

    #[test]
    fn serde_uses_decimal_strings() {
        let v = FieldElement::from(123u64);
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"123\"");
        let back: FieldElement = serde_json::from_str("\"0x7b\"").unwrap();
        assert_eq!(back, v);
        let from_number: FieldElement = serde_json::from_str("123").unwrap();
        assert_eq!(from_number, v);
        assert!(serde_json::from_str::<FieldElement>("-1").is_err());
    }
}
