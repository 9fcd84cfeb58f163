//! # Proof Artifacts
//!
//! The shapes returned by a [`Prover`](crate::traits::Prover):
//!
//! - [`Groth16Proof`]: snarkjs `proof.json` (BN254 base-field coordinates,
//!   kept as decimal strings because they are not scalar-field values).
//! - [`PublicSignals`]: the circuit outputs and public inputs, in snarkjs
//!   `public.json` order `[y, root, nullifier, x, externalNullifier]`.
//! - [`RlnFullProof`]: the snark proof together with the epoch and room
//!   identifier it was generated for.

use serde::{Deserialize, Serialize};

use rln_core::FieldElement;

use crate::traits::ProverError;

/// Number of public signals the RLN circuit exposes.
pub const PUBLIC_SIGNAL_COUNT: usize = 5;

/// A Groth16 proof in snarkjs JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Groth16Proof {
    pub pi_a: Vec<String>,
    pub pi_b: Vec<Vec<String>>,
    pub pi_c: Vec<String>,
    pub protocol: String,
    pub curve: String,
}

/// RLN circuit public signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSignals {
    /// Secret share `identitySecret + a1 * x`.
    pub y: FieldElement,
    /// Merkle root the sender proved membership against.
    pub root: FieldElement,
    /// `Poseidon1(a1)`; collides across messages sharing an `a1`.
    pub nullifier: FieldElement,
    /// Message signal.
    pub x: FieldElement,
    /// `Poseidon2(epoch, rlnIdentifier)`.
    pub external_nullifier: FieldElement,
}

impl PublicSignals {
    /// Build from the snarkjs `public.json` ordering.
    pub fn from_ordered(signals: &[FieldElement]) -> Result<Self, ProverError> {
        match signals {
            [y, root, nullifier, x, external_nullifier] => Ok(Self {
                y: *y,
                root: *root,
                nullifier: *nullifier,
                x: *x,
                external_nullifier: *external_nullifier,
            }),
            _ => Err(ProverError::Prover(format!(
                "expected {PUBLIC_SIGNAL_COUNT} public signals, got {}",
                signals.len()
            ))),
        }
    }

    /// The snarkjs `public.json` ordering.
    pub fn to_ordered(&self) -> [FieldElement; PUBLIC_SIGNAL_COUNT] {
        [
            self.y,
            self.root,
            self.nullifier,
            self.x,
            self.external_nullifier,
        ]
    }
}

/// A Groth16 proof with its public signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnarkProof {
    pub proof: Groth16Proof,
    pub public_signals: PublicSignals,
}

/// A complete RLN proof as broadcast alongside a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RlnFullProof {
    pub snark_proof: SnarkProof,
    pub epoch: FieldElement,
    pub rln_identifier: FieldElement,
}

impl RlnFullProof {
    /// The proof's nullifier, the value that identifies the sender slot
    /// within an epoch.
    pub fn nullifier(&self) -> FieldElement {
        self.snark_proof.public_signals.nullifier
    }
}
