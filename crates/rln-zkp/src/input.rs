//! # Proof Input Vector
//!
//! [`ProofInput`] is the exact vector the RLN prover consumes:
//! `{rlnIdentifier, identitySecret, userMessageLimit, messageId,
//! merkleProof, x, epoch}`. It is created and consumed within a single
//! proof request.
//!
//! The circuit itself takes `externalNullifier = Poseidon2(epoch,
//! rlnIdentifier)` rather than the two components; [`CircuitInput`] is the
//! witness-calculator form, keyed by the circuit's signal names.

use std::fmt;

use serde::{Deserialize, Serialize};

use rln_core::FieldElement;
use rln_crypto::{poseidon2, HashError, MerkleProof};

/// Inputs for one RLN proof.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofInput {
    /// Room identifier; also the group's domain-separation id.
    pub rln_identifier: FieldElement,
    /// `Poseidon2(nullifier, trapdoor)` of the sender identity. Private.
    pub identity_secret: FieldElement,
    /// Quota the sender is registered with.
    pub user_message_limit: u64,
    /// Index of this message within the quota, `0 <= messageId < limit`.
    pub message_id: u64,
    /// Inclusion proof of the sender's rate commitment.
    pub merkle_proof: MerkleProof,
    /// `Poseidon1(encode(message))`.
    pub x: FieldElement,
    /// Epoch the message is bound to.
    pub epoch: FieldElement,
}

impl fmt::Debug for ProofInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProofInput")
            .field("rln_identifier", &self.rln_identifier)
            .field("identity_secret", &"[REDACTED]")
            .field("user_message_limit", &self.user_message_limit)
            .field("message_id", &self.message_id)
            .field("merkle_proof", &self.merkle_proof)
            .field("x", &self.x)
            .field("epoch", &self.epoch)
            .finish()
    }
}

/// `externalNullifier = Poseidon2(epoch, rlnIdentifier)`.
pub fn external_nullifier(
    epoch: &FieldElement,
    rln_identifier: &FieldElement,
) -> Result<FieldElement, HashError> {
    poseidon2(epoch, rln_identifier)
}

impl ProofInput {
    /// The circuit's `externalNullifier` public input.
    pub fn external_nullifier(&self) -> Result<FieldElement, HashError> {
        external_nullifier(&self.epoch, &self.rln_identifier)
    }

    /// Witness-calculator input keyed by circuit signal names.
    pub fn to_circuit_input(&self) -> Result<CircuitInput, HashError> {
        Ok(CircuitInput {
            identity_secret: self.identity_secret,
            user_message_limit: FieldElement::from(self.user_message_limit),
            message_id: FieldElement::from(self.message_id),
            path_elements: self.merkle_proof.siblings.clone(),
            identity_path_index: self.merkle_proof.path_indices.clone(),
            x: self.x,
            external_nullifier: self.external_nullifier()?,
        })
    }
}

/// Signal assignment for the RLN circuit's witness calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitInput {
    pub identity_secret: FieldElement,
    pub user_message_limit: FieldElement,
    pub message_id: FieldElement,
    pub path_elements: Vec<FieldElement>,
    pub identity_path_index: Vec<u8>,
    pub x: FieldElement,
    pub external_nullifier: FieldElement,
}
