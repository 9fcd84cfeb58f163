//! # Poseidon — circom-compatible ZK-friendly hashing over BN254
//!
//! Thin wrappers around `light-poseidon` configured with the circom
//! parameter set (`x^5` S-box, 8 full rounds, width = inputs + 1). The
//! outputs are bit-identical to circomlib's `Poseidon(n)` template, which
//! the RLN circuit uses for identity commitments, rate commitments, Merkle
//! nodes and nullifiers.
//!
//! Supported input counts are 1 through 12; anything else is reported as
//! [`HashError::Poseidon`].

use ark_bn254::Fr;
use light_poseidon::{Poseidon, PoseidonHasher};
use rln_core::FieldElement;

use crate::error::HashError;
use crate::merkle::NodeHasher;

/// Hash an arbitrary number of field elements with circom Poseidon.
pub fn poseidon_hash(inputs: &[FieldElement]) -> Result<FieldElement, HashError> {
    let mut hasher = Poseidon::<Fr>::new_circom(inputs.len())?;
    let scalars: Vec<Fr> = inputs.iter().map(FieldElement::inner).collect();
    Ok(FieldElement::from(hasher.hash(&scalars)?))
}

/// `Poseidon1(x)`.
pub fn poseidon1(x: &FieldElement) -> Result<FieldElement, HashError> {
    poseidon_hash(std::slice::from_ref(x))
}

/// `Poseidon2(a, b)`.
pub fn poseidon2(a: &FieldElement, b: &FieldElement) -> Result<FieldElement, HashError> {
    poseidon_hash(&[*a, *b])
}

/// Node hasher for binary Poseidon Merkle trees: `node = Poseidon2(left, right)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Poseidon2Hasher;

impl NodeHasher for Poseidon2Hasher {
    fn hash_pair(
        &self,
        left: &FieldElement,
        right: &FieldElement,
    ) -> Result<FieldElement, HashError> {
        poseidon2(left, right)
    }
}
