//! # RLN Circuit Relations
//!
//! Native evaluation of the RLN circuit: the constraints a witness must
//! satisfy and the public signals it produces.
//!
//! ```text
//! identityCommitment = Poseidon1(identitySecret)
//! rateCommitment     = Poseidon2(identityCommitment, userMessageLimit)
//! root               = MerklePath(rateCommitment, pathIndices, siblings)
//! messageId          < userMessageLimit < 2^LIMIT_BIT_SIZE
//! externalNullifier  = Poseidon2(epoch, rlnIdentifier)
//! a1                 = Poseidon3(identitySecret, externalNullifier, messageId)
//! y                  = identitySecret + a1 * x
//! nullifier          = Poseidon1(a1)
//! ```
//!
//! Two messages from one identity in one epoch with the same `messageId`
//! share `a1`, hence the nullifier, and their `(x, y)` pairs are two points
//! on the same line, which reveals `identitySecret`.

use rln_core::FieldElement;
use rln_crypto::{poseidon1, poseidon2, poseidon_hash, Poseidon2Hasher};

use crate::input::ProofInput;
use crate::proof::PublicSignals;
use crate::traits::ProverError;

/// Merkle depth the RLN circuit is compiled for.
pub const CIRCUIT_DEPTH: usize = 20;

/// Bit width of the circuit's message-limit range check.
pub const LIMIT_BIT_SIZE: u32 = 16;

/// Check the witness constraints for a tree of `depth` levels and compute
/// the public signals.
pub fn evaluate(input: &ProofInput, depth: usize) -> Result<PublicSignals, ProverError> {
    let limit_bound = 1u64 << LIMIT_BIT_SIZE;
    if input.user_message_limit == 0 || input.user_message_limit >= limit_bound {
        return Err(ProverError::Witness(format!(
            "userMessageLimit {} outside [1, {limit_bound})",
            input.user_message_limit
        )));
    }
    if input.message_id >= input.user_message_limit {
        return Err(ProverError::Witness(format!(
            "messageId {} must be below userMessageLimit {}",
            input.message_id, input.user_message_limit
        )));
    }

    let proof = &input.merkle_proof;
    if proof.depth() != depth || proof.path_indices.len() != depth {
        return Err(ProverError::Witness(format!(
            "merkle proof spans {} levels, circuit expects {depth}",
            proof.depth()
        )));
    }

    let identity_commitment = poseidon1(&input.identity_secret)?;
    let rate_commitment = poseidon2(
        &identity_commitment,
        &FieldElement::from(input.user_message_limit),
    )?;
    let mut path = proof.clone();
    path.leaf = rate_commitment;
    let root = path.compute_root(&Poseidon2Hasher).ok_or_else(|| {
        ProverError::Witness("merkle path contains an invalid index".to_string())
    })?;
    if root != proof.root {
        return Err(ProverError::Witness(
            "rate commitment is not included under the claimed root".to_string(),
        ));
    }

    let external_nullifier = input.external_nullifier()?;
    let a1 = poseidon_hash(&[
        input.identity_secret,
        external_nullifier,
        FieldElement::from(input.message_id),
    ])?;
    let y = input.identity_secret + a1 * input.x;
    let nullifier = poseidon1(&a1)?;

    Ok(PublicSignals {
        y,
        root,
        nullifier,
        x: input.x,
        external_nullifier,
    })
}
