//! # Identity
//!
//! An RLN identity is a pair of private field elements `(trapdoor,
//! nullifier)`. Everything else is derived:
//!
//! ```text
//! secret     = Poseidon2(nullifier, trapdoor)
//! commitment = Poseidon1(secret)
//! ```
//!
//! Identities come from one of three sources, picked once at construction
//! by [`IdentitySource`]:
//!
//! - **Random**: 31 bytes of OS randomness per component.
//! - **Seeded**: `h = hex(SHA512(seed))`; `nullifier = int(h[0..64]) >> 3`,
//!   `trapdoor = int(h[64..128]) >> 3`. Same seed, same identity.
//! - **Serialized**: the JSON array `["0x<trapdoor>", "0x<nullifier>"]`
//!   written by [`Identity::to_serialized`].

use std::fmt;

use num_bigint::BigUint;
use rand::rngs::OsRng;
use rand::RngCore;

use rln_core::FieldElement;
use rln_crypto::{poseidon1, poseidon2, sha512_hex};

use crate::error::IdentityError;

/// Bytes of randomness per component of a random identity.
pub const RANDOM_COMPONENT_BYTES: usize = 31;

/// Where an identity's `(trapdoor, nullifier)` pair comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum IdentitySource {
    Random,
    Seeded(String),
    Serialized { trapdoor: String, nullifier: String },
}

impl IdentitySource {
    /// Classify caller input: no input is random, a JSON array is a
    /// serialized identity, any other text is a seed.
    pub fn from_input(input: Option<&str>) -> Result<Self, IdentityError> {
        let Some(text) = input else {
            return Ok(Self::Random);
        };
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(serde_json::Value::Array(items)) => match items.as_slice() {
                [serde_json::Value::String(trapdoor), serde_json::Value::String(nullifier)] => {
                    Ok(Self::Serialized {
                        trapdoor: trapdoor.clone(),
                        nullifier: nullifier.clone(),
                    })
                }
                _ => Err(IdentityError::Malformed(
                    "expected [trapdoor, nullifier] hex strings".to_string(),
                )),
            },
            _ => Ok(Self::Seeded(text.to_string())),
        }
    }
}

impl fmt::Debug for IdentitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => f.write_str("Random"),
            Self::Seeded(_) => f.write_str("Seeded([REDACTED])"),
            Self::Serialized { .. } => f.write_str("Serialized([REDACTED])"),
        }
    }
}

/// A sender identity.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    trapdoor: FieldElement,
    nullifier: FieldElement,
    secret: FieldElement,
    commitment: FieldElement,
}

impl Identity {
    /// Build an identity from its source.
    pub fn new(source: IdentitySource) -> Result<Self, IdentityError> {
        match source {
            IdentitySource::Random => Self::random(),
            IdentitySource::Seeded(seed) => Self::from_seed(&seed),
            IdentitySource::Serialized {
                trapdoor,
                nullifier,
            } => Self::from_parts(
                parse_component("trapdoor", &trapdoor)?,
                parse_component("nullifier", &nullifier)?,
            ),
        }
    }

    /// Fresh identity from OS randomness.
    pub fn random() -> Result<Self, IdentityError> {
        let mut trapdoor = [0u8; RANDOM_COMPONENT_BYTES];
        let mut nullifier = [0u8; RANDOM_COMPONENT_BYTES];
        OsRng.fill_bytes(&mut trapdoor);
        OsRng.fill_bytes(&mut nullifier);
        Self::from_parts(
            FieldElement::from_be_bytes_mod_order(&trapdoor),
            FieldElement::from_be_bytes_mod_order(&nullifier),
        )
    }

    /// Deterministic identity from a seed string.
    pub fn from_seed(seed: &str) -> Result<Self, IdentityError> {
        let digest = sha512_hex(seed.as_bytes());
        let (head, tail) = digest.split_at(digest.len() / 2);
        Self::from_parts(shifted_half(tail)?, shifted_half(head)?)
    }

    /// Parse the JSON array form written by [`Identity::to_serialized`].
    pub fn from_serialized(serialized: &str) -> Result<Self, IdentityError> {
        match IdentitySource::from_input(Some(serialized))? {
            source @ IdentitySource::Serialized { .. } => Self::new(source),
            _ => Err(IdentityError::Malformed(
                "expected a JSON array of two hex strings".to_string(),
            )),
        }
    }

    /// Identity from explicit components.
    pub fn from_parts(
        trapdoor: FieldElement,
        nullifier: FieldElement,
    ) -> Result<Self, IdentityError> {
        let secret = poseidon2(&nullifier, &trapdoor)?;
        let commitment = poseidon1(&secret)?;
        Ok(Self {
            trapdoor,
            nullifier,
            secret,
            commitment,
        })
    }

    pub fn trapdoor(&self) -> FieldElement {
        self.trapdoor
    }

    pub fn nullifier(&self) -> FieldElement {
        self.nullifier
    }

    /// `Poseidon2(nullifier, trapdoor)`; the circuit's `identitySecret`.
    pub fn secret(&self) -> FieldElement {
        self.secret
    }

    /// `Poseidon1(secret)`; the public identifier.
    pub fn commitment(&self) -> FieldElement {
        self.commitment
    }

    /// `["0x<trapdoor>", "0x<nullifier>"]` with minimal lowercase hex.
    pub fn to_serialized(&self) -> String {
        serde_json::Value::from(vec![self.trapdoor.to_hex(), self.nullifier.to_hex()]).to_string()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_serialized())
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("trapdoor", &"[REDACTED]")
            .field("nullifier", &"[REDACTED]")
            .field("secret", &"[REDACTED]")
            .field("commitment", &self.commitment)
            .finish()
    }
}

fn shifted_half(hex_digits: &str) -> Result<FieldElement, IdentityError> {
    let value = BigUint::parse_bytes(hex_digits.as_bytes(), 16).ok_or_else(|| {
        IdentityError::InvalidComponent {
            component: "seed digest",
            value: hex_digits.to_string(),
        }
    })?;
    Ok(FieldElement::from_biguint_reduced(&(value >> 3u32)))
}

// Components wider than the field are reduced mod p.
fn parse_component(component: &'static str, text: &str) -> Result<FieldElement, IdentityError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    let invalid = || IdentityError::InvalidComponent {
        component,
        value: text.to_string(),
    };
    if digits.is_empty() {
        return Err(invalid());
    }
    let value = BigUint::parse_bytes(digits.as_bytes(), 16).ok_or_else(invalid)?;
    Ok(FieldElement::from_biguint_reduced(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_identity_is_deterministic() {
        let a = Identity::from_seed("hello world").unwrap();
        let b = Identity::new(IdentitySource::Seeded("hello world".to_string())).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Identity::from_seed("hello world!").unwrap());
    }

    #[test]
    fn seeded_components_follow_digest_halves() {
        let id = Identity::from_seed("abc").unwrap();
        let h = sha512_hex(b"abc");
        let nullifier = BigUint::parse_bytes(h[..64].as_bytes(), 16).unwrap() >> 3u32;
        let trapdoor = BigUint::parse_bytes(h[64..].as_bytes(), 16).unwrap() >> 3u32;
        assert_eq!(id.nullifier().to_biguint(), nullifier);
        assert_eq!(id.trapdoor().to_biguint(), trapdoor);
    }

    #[test]
    fn derived_values_chain() {
        let id = Identity::from_parts(FieldElement::from(1u64), FieldElement::from(2u64)).unwrap();
        let secret = poseidon2(&FieldElement::from(2u64), &FieldElement::from(1u64)).unwrap();
        assert_eq!(id.secret(), secret);
        assert_eq!(id.commitment(), poseidon1(&secret).unwrap());
    }

    #[test]
    fn serialized_round_trip() {
        let id = Identity::random().unwrap();
        let text = id.to_string();
        assert!(text.starts_with("[\"0x"));
        let back = Identity::from_serialized(&text).unwrap();
        assert_eq!(back.trapdoor(), id.trapdoor());
        assert_eq!(back.nullifier(), id.nullifier());
        assert_eq!(back.commitment(), id.commitment());
    }

    #[test]
    fn serialized_accepts_unprefixed_hex() {
        let id = Identity::from_serialized(r#"["ff", "0x10"]"#).unwrap();
        assert_eq!(id.trapdoor(), FieldElement::from(255u64));
        assert_eq!(id.nullifier(), FieldElement::from(16u64));
        assert_eq!(id.to_serialized(), r#"["0xff","0x10"]"#);
    }

    #[test]
    fn source_classification() {
        assert_eq!(IdentitySource::from_input(None).unwrap(), IdentitySource::Random);
        assert_eq!(
            IdentitySource::from_input(Some("my seed")).unwrap(),
            IdentitySource::Seeded("my seed".to_string())
        );
        assert!(matches!(
            IdentitySource::from_input(Some(r#"["0x1","0x2"]"#)).unwrap(),
            IdentitySource::Serialized { .. }
        ));
        // JSON that is not an array is still just a seed.
        assert_eq!(
            IdentitySource::from_input(Some("42")).unwrap(),
            IdentitySource::Seeded("42".to_string())
        );
        assert!(IdentitySource::from_input(Some(r#"["0x1"]"#)).is_err());
    }

    #[test]
    fn bad_component_rejected() {
        let err = Identity::from_serialized(r#"["0xzz", "0x1"]"#).unwrap_err();
        assert!(matches!(
            err,
            IdentityError::InvalidComponent {
                component: "trapdoor",
                ..
            }
        ));
        assert!(Identity::from_serialized("plain seed").is_err());
    }

    #[test]
    fn random_identities_differ() {
        let a = Identity::random().unwrap();
        let b = Identity::random().unwrap();
        assert_ne!(a.commitment(), b.commitment());
    }

    #[test]
    fn debug_redacts_private_parts() {
        let id = Identity::from_seed("debug").unwrap();
        let rendered = format!("{id:?}");
        assert!(!rendered.contains(&id.trapdoor().to_string()));
        assert!(!rendered.contains(&id.nullifier().to_string()));
        assert!(!rendered.contains(&id.secret().to_string()));
        assert!(rendered.contains(&id.commitment().to_string()));
        assert!(format!("{:?}", IdentitySource::Seeded("pw".into())).contains("REDACTED"));
    }
}
