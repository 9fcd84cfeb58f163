//! # Protocol Error Types
//!
//! Errors raised while constructing identities and groups, assembling
//! proof inputs, and recovering secrets from double signals.
//!
//! Construction, index and lookup failures are synchronous and fatal.
//! Prover failures are propagated unchanged. Nothing here retries.

use thiserror::Error;

use rln_core::FieldError;
use rln_crypto::{HashError, TreeError};
use rln_zkp::ProverError;

/// Errors constructing or parsing an [`Identity`](crate::identity::Identity).
#[derive(Error, Debug)]
pub enum IdentityError {
    /// Serialized identity is not a JSON array of two strings.
    #[error("malformed serialized identity: {0}")]
    Malformed(String),

    /// A component is not a hexadecimal integer.
    #[error("invalid identity {component} {value:?}")]
    InvalidComponent {
        /// `trapdoor` or `nullifier`.
        component: &'static str,
        /// The rejected text.
        value: String,
    },

    /// Deriving the secret or commitment failed.
    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Errors constructing or mutating a [`Group`](crate::group::Group).
#[derive(Error, Debug)]
pub enum GroupError {
    /// Group depth outside `[MIN_DEPTH, MAX_DEPTH]`.
    #[error("group depth {depth} outside supported range [{min}, {max}]")]
    InvalidDepth {
        depth: usize,
        min: usize,
        max: usize,
    },

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Errors assembling a proof input or generating a proof.
#[derive(Error, Debug)]
pub enum AssemblyError {
    /// The room id is not a decimal or hex field element.
    #[error("invalid room id {id:?}: {source}")]
    InvalidRoomId {
        id: String,
        #[source]
        source: FieldError,
    },

    /// The message limit must be at least one.
    #[error("message limit must be at least 1, got {0}")]
    InvalidMessageLimit(u64),

    /// The identity's rate commitment for this limit is not a room member.
    #[error("rate commitment {rate_commitment} for message limit {limit} is not a member of room {room_id}")]
    MemberNotFound {
        room_id: String,
        limit: u64,
        rate_commitment: String,
    },

    #[error("group error: {0}")]
    Group(#[from] GroupError),

    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("hash error: {0}")]
    Hash(#[from] HashError),

    /// The prover rejected the input or failed.
    #[error("proof generation failed: {0}")]
    Prover(#[from] ProverError),
}

/// Errors recovering a secret from two shares.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SlashingError {
    /// The proofs carry different nullifiers, so the shares lie on
    /// different lines.
    #[error("nullifiers differ; shares belong to different slots")]
    NullifierMismatch,

    /// Both shares use the same `x`; the line is underdetermined.
    #[error("shares have identical x; secret cannot be interpolated")]
    SameSignal,

    /// The proofs are for different external nullifiers.
    #[error("proofs are bound to different external nullifiers")]
    ExternalNullifierMismatch,

    #[error("hash error: {0}")]
    Hash(String),
}

impl From<HashError> for SlashingError {
    fn from(err: HashError) -> Self {
        Self::Hash(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_not_found_display() {
        let err = AssemblyError::MemberNotFound {
            room_id: "123".to_string(),
            limit: 2,
            rate_commitment: "99".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("message limit 2"));
        assert!(msg.contains("room 123"));
    }

    #[test]
    fn invalid_room_id_carries_source() {
        let err = AssemblyError::InvalidRoomId {
            id: "abc".to_string(),
            source: FieldError::InvalidDigits {
                radix: 10,
                input: "abc".to_string(),
            },
        };
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn prover_error_propagates() {
        let err = AssemblyError::from(ProverError::Prover("zkey mismatch".to_string()));
        assert!(format!("{err}").contains("zkey mismatch"));
    }

    #[test]
    fn group_depth_display() {
        let err = GroupError::InvalidDepth {
            depth: 8,
            min: 16,
            max: 32,
        };
        assert!(format!("{err}").contains("[16, 32]"));
    }

    #[test]
    fn all_variants_are_debug() {
        let errors: Vec<Box<dyn std::fmt::Debug>> = vec![
            Box::new(IdentityError::Malformed("x".to_string())),
            Box::new(AssemblyError::InvalidMessageLimit(0)),
            Box::new(SlashingError::SameSignal),
            Box::new(SlashingError::NullifierMismatch),
        ];
        for e in &errors {
            assert!(!format!("{e:?}").is_empty());
        }
    }
}
