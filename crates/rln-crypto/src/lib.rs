//! # rln-crypto — Cryptographic Primitives
//!
//! Provides the hashing and accumulator building blocks for the RLN stack:
//!
//! - **Poseidon** (circom parameters, BN254) for commitments, nullifiers and
//!   Merkle nodes.
//! - **Keccak-256** for per-room zero-value derivation.
//! - **SHA-512** for seeded identity derivation.
//! - **Incremental Merkle tree**: fixed-depth binary accumulator with
//!   insert/update/delete and inclusion proofs.
//!
//! ## Crate Policy
//!
//! - Depends only on `rln-core` internally.
//! - No mocking of cryptographic operations in tests; Poseidon vectors are
//!   checked against circomlib outputs.

pub mod digest;
pub mod error;
pub mod merkle;
pub mod poseidon;

pub use digest::{keccak256, sha512, sha512_hex};
pub use error::{HashError, TreeError};
pub use merkle::{IncrementalMerkleTree, MerkleProof, NodeHasher, TreeProof, ARITY};
pub use poseidon::{poseidon1, poseidon2, poseidon_hash, Poseidon2Hasher};
