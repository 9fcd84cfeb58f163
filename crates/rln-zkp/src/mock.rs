//! # Mock Prover
//!
//! A deterministic, transparent prover. It enforces every circuit
//! constraint natively and computes the real public signals, but the
//! Groth16 proof is a placeholder bound to those signals by a Poseidon
//! digest.
//!
//! ## Security Notice
//!
//! Mock proofs carry NO zero-knowledge guarantee and no soundness beyond
//! the binding digest. Use for tests and local tooling only.

use async_trait::async_trait;

use rln_core::FieldElement;
use rln_crypto::poseidon_hash;

use crate::circuit::{evaluate, CIRCUIT_DEPTH};
use crate::input::{external_nullifier, ProofInput};
use crate::proof::{Groth16Proof, PublicSignals, RlnFullProof, SnarkProof};
use crate::traits::{Prover, ProverError};

/// Transparent prover for a fixed tree depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockProver {
    depth: usize,
}

impl Default for MockProver {
    fn default() -> Self {
        Self {
            depth: CIRCUIT_DEPTH,
        }
    }
}

impl MockProver {
    /// Mock prover for trees of `depth` levels.
    pub fn with_depth(depth: usize) -> Self {
        Self { depth }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Check a mock proof: the placeholder must bind the signals and the
    /// external nullifier must match the claimed epoch and room.
    pub fn verify(&self, proof: &RlnFullProof) -> bool {
        let signals = &proof.snark_proof.public_signals;
        let Ok(expected_ext) = external_nullifier(&proof.epoch, &proof.rln_identifier) else {
            return false;
        };
        if expected_ext != signals.external_nullifier {
            return false;
        }
        match placeholder_proof(signals) {
            Ok(expected) => expected == proof.snark_proof.proof,
            Err(_) => false,
        }
    }
}

fn placeholder_proof(signals: &PublicSignals) -> Result<Groth16Proof, ProverError> {
    let binding = poseidon_hash(&signals.to_ordered())?.to_string();
    let one = || "1".to_string();
    let zero = || "0".to_string();
    Ok(Groth16Proof {
        pi_a: vec![binding.clone(), zero(), one()],
        pi_b: vec![vec![zero(), zero()], vec![zero(), zero()], vec![one(), zero()]],
        pi_c: vec![binding, zero(), one()],
        protocol: "groth16".to_string(),
        curve: "bn128".to_string(),
    })
}

#[async_trait]
impl Prover for MockProver {
    fn backend(&self) -> &'static str {
        "mock"
    }

    async fn generate_proof(&self, input: &ProofInput) -> Result<RlnFullProof, ProverError> {
        let public_signals = evaluate(input, self.depth)?;
        let proof = placeholder_proof(&public_signals)?;
        tracing::debug!(
            nullifier = %public_signals.nullifier,
            root = %public_signals.root,
            "mock proof generated"
        );
        Ok(RlnFullProof {
            snark_proof: SnarkProof {
                proof,
                public_signals,
            },
            epoch: input.epoch,
            rln_identifier: input.rln_identifier,
        })
    }
}

/// Convenience for tests that need a proof without a tree: the nullifier
/// a mock proof would carry for these values.
pub fn expected_nullifier(
    identity_secret: FieldElement,
    epoch: FieldElement,
    rln_identifier: FieldElement,
    message_id: u64,
) -> Result<FieldElement, ProverError> {
    let ext = external_nullifier(&epoch, &rln_identifier)?;
    let a1 = poseidon_hash(&[identity_secret, ext, FieldElement::from(message_id)])?;
    Ok(rln_crypto::poseidon1(&a1)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rln_crypto::{poseidon1, poseidon2, IncrementalMerkleTree, Poseidon2Hasher};

    fn input(depth: usize) -> ProofInput {
        let secret = FieldElement::from(424242u64);
        let rate = poseidon2(&poseidon1(&secret).unwrap(), &FieldElement::from(1u64)).unwrap();
        let tree =
            IncrementalMerkleTree::new(Poseidon2Hasher, depth, FieldElement::zero(), vec![rate])
                .unwrap();
        ProofInput {
            rln_identifier: FieldElement::from(123u64),
            identity_secret: secret,
            user_message_limit: 1,
            message_id: 0,
            merkle_proof: tree.create_proof(0).unwrap().into(),
            x: FieldElement::from(99u64),
            epoch: FieldElement::from(7u64),
        }
    }

    #[tokio::test]
    async fn generates_verifiable_proof() {
        let prover = MockProver::with_depth(5);
        let proof = prover.generate_proof(&input(5)).await.unwrap();
        assert_eq!(prover.backend(), "mock");
        assert_eq!(proof.epoch, FieldElement::from(7u64));
        assert!(prover.verify(&proof));
        assert_eq!(
            proof.nullifier(),
            expected_nullifier(
                FieldElement::from(424242u64),
                FieldElement::from(7u64),
                FieldElement::from(123u64),
                0
            )
            .unwrap()
        );
    }

    #[tokio::test]
    async fn tampered_signals_fail_verification() {
        let prover = MockProver::with_depth(5);
        let mut proof = prover.generate_proof(&input(5)).await.unwrap();
        proof.snark_proof.public_signals.y = FieldElement::from(1u64);
        assert!(!prover.verify(&proof));
    }

    #[tokio::test]
    async fn mismatched_epoch_fails_verification() {
        let prover = MockProver::with_depth(5);
        let mut proof = prover.generate_proof(&input(5)).await.unwrap();
        proof.epoch = FieldElement::from(8u64);
        assert!(!prover.verify(&proof));
    }

    #[tokio::test]
    async fn default_depth_rejects_shallow_proof() {
        let err = MockProver::default()
            .generate_proof(&input(5))
            .await
            .unwrap_err();
        assert!(matches!(err, ProverError::Witness(_)));
    }

    #[test]
    fn default_depth_is_circuit_depth() {
        assert_eq!(MockProver::default().depth(), CIRCUIT_DEPTH);
    }
}
