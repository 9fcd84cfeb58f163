//! # Prove Subcommand
//!
//! Assembles a proof input from a room file and proves it with the chosen
//! backend. The snarkjs backend reads its configuration from the
//! environment (`RLN_CIRCUIT_WASM`, `RLN_PROVING_KEY`, `RLN_SNARKJS_BIN`).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, ValueEnum};
use serde_json::Value;

use rln_protocol::{GenProofRequest, Identity, ProofAssembler, Room, SystemClock};
use rln_zkp::{MockProver, Prover, ProverConfig, SnarkjsProver};

/// Proving backend.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Transparent mock prover. Not zero-knowledge.
    Mock,
    /// Groth16 through the snarkjs CLI.
    Snarkjs,
}

/// Arguments for the prove subcommand.
#[derive(Args, Debug)]
pub struct ProveArgs {
    /// Room snapshot: `{"id": ..., "membership": {"identityCommitments": [...]}}`.
    #[arg(long)]
    pub room: PathBuf,
    /// Serialized identity.
    #[arg(long)]
    pub identity: String,
    /// Message text.
    #[arg(long)]
    pub message: String,
    #[arg(long, default_value_t = 0)]
    pub message_id: u64,
    #[arg(long, default_value_t = 1)]
    pub limit: u64,
    #[arg(long, value_enum, default_value_t = Backend::Mock)]
    pub backend: Backend,
}

pub fn read_room(path: &Path) -> anyhow::Result<Room> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading room from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing room in {}", path.display()))
}

pub async fn run(args: &ProveArgs) -> anyhow::Result<Value> {
    let room = read_room(&args.room)?;
    let identity = Identity::from_serialized(&args.identity).context("parsing identity")?;
    match args.backend {
        Backend::Mock => prove_with(Arc::new(MockProver::default()), &room, &identity, args).await,
        Backend::Snarkjs => {
            let config = ProverConfig::from_env()?;
            let prover = SnarkjsProver::new(config)?;
            prove_with(Arc::new(prover), &room, &identity, args).await
        }
    }
}

async fn prove_with<P: Prover>(
    prover: Arc<P>,
    room: &Room,
    identity: &Identity,
    args: &ProveArgs,
) -> anyhow::Result<Value> {
    let assembler = ProofAssembler::new(prover, SystemClock);
    let request = GenProofRequest::new(room, &args.message, identity)
        .message_id(args.message_id)
        .message_limit(args.limit);
    let message = assembler.gen_proof(request).await?;
    Ok(serde_json::to_value(message)?)
}
