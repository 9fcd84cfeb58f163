//! # Prover Trait
//!
//! The boundary between proof-input assembly and the proving system. A
//! prover is created once (circuit and proving key fixed at construction),
//! shared read-only across concurrent requests, and awaited per request.
//!
//! No cancellation or timeout is defined here; callers needing deadlines
//! wrap the future themselves. Errors are propagated unchanged and never
//! retried.

use async_trait::async_trait;
use thiserror::Error;

use rln_crypto::HashError;

use crate::config::ConfigError;
use crate::input::ProofInput;
use crate::proof::RlnFullProof;

/// Error during proof generation.
#[derive(Error, Debug)]
pub enum ProverError {
    /// The input does not satisfy the circuit constraints.
    #[error("witness error: {0}")]
    Witness(String),
    /// The proving backend failed or produced unusable output.
    #[error("prover error: {0}")]
    Prover(String),
    /// Prover configuration is invalid.
    #[error("prover configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Filesystem or process I/O failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Prover artifacts could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<HashError> for ProverError {
    fn from(err: HashError) -> Self {
        ProverError::Witness(format!("hash failure: {err}"))
    }
}

/// An asynchronous RLN proof generator.
#[async_trait]
pub trait Prover: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Generate a proof for `input`.
    async fn generate_proof(&self, input: &ProofInput) -> Result<RlnFullProof, ProverError>;
}
