//! # Cryptographic Error Types
//!
//! Structured errors for hashing and Merkle accumulator operations in
//! `rln-crypto`. Uses `thiserror` for derive-based `Display` and `Error`.
//!
//! Tree construction and mutation errors are fatal and surface
//! synchronously; nothing in this crate retries.

use thiserror::Error;

/// Errors from the hash primitives.
#[derive(Error, Debug)]
pub enum HashError {
    /// The Poseidon backend rejected the input (arity out of range).
    #[error("poseidon error: {0}")]
    Poseidon(String),
}

impl From<light_poseidon::PoseidonError> for HashError {
    fn from(err: light_poseidon::PoseidonError) -> Self {
        Self::Poseidon(err.to_string())
    }
}

/// Errors from [`IncrementalMerkleTree`](crate::merkle::IncrementalMerkleTree)
/// construction and mutation.
#[derive(Error, Debug)]
pub enum TreeError {
    /// Tree depth outside the supported range.
    #[error("tree depth {depth} outside supported range [{min}, {max}]")]
    InvalidDepth {
        /// Requested depth.
        depth: usize,
        /// Smallest accepted depth.
        min: usize,
        /// Largest accepted depth.
        max: usize,
    },

    /// More initial leaves than the tree can hold.
    #[error("{count} leaves exceed tree capacity of {capacity}")]
    TooManyLeaves {
        /// Number of leaves supplied.
        count: usize,
        /// Maximum number of leaves (`2^depth`).
        capacity: u64,
    },

    /// Insert attempted on a full tree.
    #[error("tree is full ({capacity} leaves)")]
    TreeFull {
        /// Maximum number of leaves (`2^depth`).
        capacity: u64,
    },

    /// Operation on a leaf index that does not exist.
    #[error("leaf index {index} out of range (tree holds {len} leaves)")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Current number of leaves.
        len: usize,
    },

    /// Node hashing failed.
    #[error("hash error: {0}")]
    Hash(#[from] HashError),
}
