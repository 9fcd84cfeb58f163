//! # snarkjs Prover
//!
//! Generates real Groth16 proofs by shelling out to `snarkjs`:
//!
//! 1. write the circuit input to `input.json` in a scratch directory,
//! 2. `snarkjs wtns calculate <wasm> input.json witness.wtns`,
//! 3. `snarkjs groth16 prove <zkey> witness.wtns proof.json public.json`,
//! 4. read back the proof and the public signals.
//!
//! The scratch directory is removed when the request finishes.

use std::ffi::OsStr;
use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

use rln_core::FieldElement;

use crate::config::ProverConfig;
use crate::input::ProofInput;
use crate::proof::{Groth16Proof, PublicSignals, RlnFullProof, SnarkProof};
use crate::traits::{Prover, ProverError};

/// Prover backed by the `snarkjs` CLI.
#[derive(Debug, Clone)]
pub struct SnarkjsProver {
    config: ProverConfig,
}

impl SnarkjsProver {
    /// Create a prover after checking the circuit artifacts exist.
    pub fn new(config: ProverConfig) -> Result<Self, ProverError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProverConfig {
        &self.config
    }

    async fn run<I, S>(&self, args: I) -> Result<(), ProverError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = Command::new(&self.config.snarkjs_bin)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await?;
        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() {
                stdout
            } else {
                stderr
            };
            Err(ProverError::Prover(format!(
                "snarkjs exited with {}: {}",
                output.status,
                detail.trim()
            )))
        }
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ProverError> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl Prover for SnarkjsProver {
    fn backend(&self) -> &'static str {
        "snarkjs"
    }

    async fn generate_proof(&self, input: &ProofInput) -> Result<RlnFullProof, ProverError> {
        let circuit_input = input.to_circuit_input()?;

        let scratch = tempfile::tempdir()?;
        let input_path = scratch.path().join("input.json");
        let witness_path = scratch.path().join("witness.wtns");
        let proof_path = scratch.path().join("proof.json");
        let public_path = scratch.path().join("public.json");

        tokio::fs::write(&input_path, serde_json::to_vec(&circuit_input)?).await?;

        tracing::info!(
            wasm = %self.config.circuit_wasm.display(),
            "calculating witness"
        );
        self.run([
            OsStr::new("wtns"),
            OsStr::new("calculate"),
            self.config.circuit_wasm.as_os_str(),
            input_path.as_os_str(),
            witness_path.as_os_str(),
        ])
        .await?;

        tracing::info!(
            zkey = %self.config.proving_key.display(),
            "generating groth16 proof"
        );
        self.run([
            OsStr::new("groth16"),
            OsStr::new("prove"),
            self.config.proving_key.as_os_str(),
            witness_path.as_os_str(),
            proof_path.as_os_str(),
            public_path.as_os_str(),
        ])
        .await?;

        let proof: Groth16Proof = read_json(&proof_path).await?;
        let ordered: Vec<FieldElement> = read_json(&public_path).await?;
        let public_signals = PublicSignals::from_ordered(&ordered)?;

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
