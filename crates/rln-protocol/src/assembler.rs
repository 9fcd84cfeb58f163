//! # Proof Assembler
//!
//! Turns a room snapshot, a message and a sender identity into an RLN proof
//! input, then hands it to the injected [`Prover`].
//!
//! Each request rebuilds the room's [`Group`] from the supplied member list.
//! No tree is cached or shared between requests; the only suspension point
//! is the prover call.

use std::sync::Arc;

use rln_core::FieldElement;
use rln_crypto::{poseidon1, poseidon2};
use rln_zkp::{ProofInput, Prover};

use crate::epoch::Clock;
use crate::error::AssemblyError;
use crate::group::{Group, DEFAULT_DEPTH};
use crate::identity::Identity;
use crate::message::Message;
use crate::room::Room;

/// `x = Poseidon1(int_be(utf8(message)) mod p)`.
///
/// Distinct messages longer than 31 bytes may reduce to the same element.
pub fn encode_message(message: &str) -> Result<FieldElement, AssemblyError> {
    let encoded = FieldElement::from_be_bytes_mod_order(message.as_bytes());
    Ok(poseidon1(&encoded)?)
}

/// `rateCommitment = Poseidon2(identityCommitment, limit)`.
pub fn rate_commitment(identity: &Identity, limit: u64) -> Result<FieldElement, AssemblyError> {
    Ok(poseidon2(&identity.commitment(), &FieldElement::from(limit))?)
}

/// One proof request.
#[derive(Debug, Clone)]
pub struct GenProofRequest<'a> {
    pub room: &'a Room,
    pub message: &'a str,
    pub identity: &'a Identity,
    pub message_id: u64,
    pub message_limit: u64,
}

impl<'a> GenProofRequest<'a> {
    /// Request with `message_id = 0` and `message_limit = 1`.
    pub fn new(room: &'a Room, message: &'a str, identity: &'a Identity) -> Self {
        Self {
            room,
            message,
            identity,
            message_id: 0,
            message_limit: 1,
        }
    }

    pub fn message_id(mut self, message_id: u64) -> Self {
        self.message_id = message_id;
        self
    }

    pub fn message_limit(mut self, message_limit: u64) -> Self {
        self.message_limit = message_limit;
        self
    }
}

/// Assembles proof inputs and drives a prover.
pub struct ProofAssembler<P, C> {
    prover: Arc<P>,
    clock: C,
    depth: usize,
}

impl<P: Prover, C: Clock> ProofAssembler<P, C> {
    /// Assembler building groups at [`DEFAULT_DEPTH`].
    pub fn new(prover: Arc<P>, clock: C) -> Self {
        Self {
            prover,
            clock,
            depth: DEFAULT_DEPTH,
        }
    }

    /// Override the group depth. The prover must be built for the same
    /// depth.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn prover(&self) -> &Arc<P> {
        &self.prover
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Build the proof input for `request` without proving.
    pub fn assemble_input(&self, request: &GenProofRequest<'_>) -> Result<ProofInput, AssemblyError> {
        let rln_identifier = request.room.id.to_field()?;
        if request.message_limit == 0 {
            return Err(AssemblyError::InvalidMessageLimit(0));
        }
        let x = encode_message(request.message)?;
        let group = Group::new(rln_identifier, self.depth, request.room.members().to_vec())?;

        let rate_commitment = rate_commitment(request.identity, request.message_limit)?;
        let index = group
            .index_of(&rate_commitment)
            .ok_or_else(|| AssemblyError::MemberNotFound {
                room_id: request.room.id.to_string(),
                limit: request.message_limit,
                rate_commitment: rate_commitment.to_string(),
            })?;
        let merkle_proof = group.generate_merkle_proof(index)?;
        let epoch = self.clock.epoch();

        tracing::debug!(
            room = %request.room.id,
            members = group.size(),
            index,
            %epoch,
            "assembled proof input"
        );

        Ok(ProofInput {
            rln_identifier,
            identity_secret: request.identity.secret(),
            user_message_limit: request.message_limit,
            message_id: request.message_id,
            merkle_proof,
            x,
            epoch,
        })
    }

    /// Assemble, prove, and wrap the result as a [`Message`].
    pub async fn gen_proof(&self, request: GenProofRequest<'_>) -> Result<Message, AssemblyError> {
        let input = self.assemble_input(&request)?;
        let proof = match self.prover.generate_proof(&input).await {
            Ok(proof) => proof,
            Err(err) => {
                tracing::warn!(
                    backend = self.prover.backend(),
                    room = %request.room.id,
                    error = %err,
                    "proof generation failed"
                );
                return Err(err.into());
            }
        };
        tracing::info!(
            backend = self.prover.backend(),
            room = %request.room.id,
            nullifier = %proof.nullifier(),
            "proof generated"
        );
        Ok(Message {
            id: proof.nullifier().to_string(),
            message: request.message.to_string(),
            room_id: input.rln_identifier,
            proof,
        })
    }
}
