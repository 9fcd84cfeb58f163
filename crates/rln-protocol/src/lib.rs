//! # rln-protocol — Rate-Limiting Nullifier Protocol
//!
//! Room membership, sender identities, and the assembly of RLN proof
//! inputs.
//!
//! ## Architecture
//!
//! - **Group** (`group.rs`): a room id bound to a Poseidon Merkle tree of
//!   rate commitments, padded with a zero value derived from the id.
//! - **Identity** (`identity.rs`): random, seeded or serialized
//!   `(trapdoor, nullifier)` pairs and their derived secret and commitment.
//! - **Assembler** (`assembler.rs`): room + message + identity into a
//!   `ProofInput`, proven by an injected `Prover`, returned as a `Message`.
//! - **Epoch** (`epoch.rs`): the clock that stamps each request.
//! - **Slashing** (`slashing.rs`): secret recovery from two proofs sharing
//!   a nullifier.
//!
//! ## Crate Policy
//!
//! - Depends on `rln-core`, `rln-crypto` and `rln-zkp` internally.
//! - No persistence: rooms are read-only snapshots supplied per request.
//! - Private identity material never appears in `Debug` output or logs.

pub mod assembler;
pub mod epoch;
pub mod error;
pub mod group;
pub mod identity;
pub mod message;
pub mod room;
pub mod slashing;

pub use assembler::{encode_message, rate_commitment, GenProofRequest, ProofAssembler};
pub use epoch::{Clock, FixedClock, SystemClock};
pub use error::{AssemblyError, GroupError, IdentityError, SlashingError};
pub use group::{derive_zero_value, Group, DEFAULT_DEPTH};
pub use identity::{Identity, IdentitySource};
pub use message::Message;
pub use room::{Membership, Room, RoomId};
pub use slashing::{recover_identity_commitment, recover_identity_secret, Share};
