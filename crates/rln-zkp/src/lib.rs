//! # rln-zkp — Proof-System Boundary
//!
//! Everything between an assembled proof input and a finished RLN proof.
//!
//! ## Architecture
//!
//! - **Input** (`input.rs`): `ProofInput`, the vector handed to a prover,
//!   and `CircuitInput`, its witness-calculator form.
//!
//! - **Circuit** (`circuit.rs`): native evaluation of the RLN relations
//!   (inclusion, range checks, share and nullifier derivation).
//!
//! - **Traits** (`traits.rs`): the async `Prover` trait. Mock and real
//!   backends are interchangeable behind it.
//!
//! - **Mock** (`mock.rs`, feature `mock`): `MockProver` enforces the circuit
//!   natively and emits a placeholder Groth16 proof bound to the signals.
//!
//! - **snarkjs** (`snarkjs.rs`): `SnarkjsProver` runs witness calculation
//!   and Groth16 proving through the `snarkjs` CLI.
//!
//! ## Crate Policy
//!
//! - Depends on `rln-core` and `rln-crypto` internally.
//! - Provers hold no per-request state; one instance serves concurrent
//!   requests.
//! - No `unsafe`.

pub mod circuit;
pub mod config;
pub mod input;
#[cfg(feature = "mock")]
pub mod mock;
pub mod proof;
pub mod snarkjs;
pub mod traits;

pub use circuit::{CIRCUIT_DEPTH, LIMIT_BIT_SIZE};
pub use config::{ConfigError, ProverConfig};
pub use input::{external_nullifier, CircuitInput, ProofInput};
#[cfg(feature = "mock")]
pub use mock::MockProver;
pub use proof::{Groth16Proof, PublicSignals, RlnFullProof, SnarkProof, PUBLIC_SIGNAL_COUNT};
pub use snarkjs::SnarkjsProver;
pub use traits::{Prover, ProverError};
