//! Prover configuration.
//!
//! Locates the circuit's witness-calculator WASM, the Groth16 proving key,
//! and the `snarkjs` executable. Load from environment variables or
//! construct explicitly for tests.

use std::path::{Path, PathBuf};

/// Environment variable holding the circuit WASM path.
pub const ENV_CIRCUIT_WASM: &str = "RLN_CIRCUIT_WASM";
/// Environment variable holding the proving key (`.zkey`) path.
pub const ENV_PROVING_KEY: &str = "RLN_PROVING_KEY";
/// Environment variable overriding the `snarkjs` executable.
pub const ENV_SNARKJS_BIN: &str = "RLN_SNARKJS_BIN";

const DEFAULT_SNARKJS_BIN: &str = "snarkjs";

/// Paths the snarkjs prover needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProverConfig {
    /// Witness calculator compiled from the RLN circuit.
    pub circuit_wasm: PathBuf,
    /// Groth16 proving key from the trusted setup.
    pub proving_key: PathBuf,
    /// `snarkjs` executable, resolved through `PATH` when bare.
    pub snarkjs_bin: PathBuf,
}

impl ProverConfig {
    /// Explicit construction with the default `snarkjs` executable.
    pub fn new(circuit_wasm: impl Into<PathBuf>, proving_key: impl Into<PathBuf>) -> Self {
        Self {
            circuit_wasm: circuit_wasm.into(),
            proving_key: proving_key.into(),
            snarkjs_bin: PathBuf::from(DEFAULT_SNARKJS_BIN),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `RLN_CIRCUIT_WASM` (required)
    /// - `RLN_PROVING_KEY` (required)
    /// - `RLN_SNARKJS_BIN` (default: `snarkjs`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingVar(var))
        };
        Ok(Self {
            circuit_wasm: PathBuf::from(required(ENV_CIRCUIT_WASM)?),
            proving_key: PathBuf::from(required(ENV_PROVING_KEY)?),
            snarkjs_bin: PathBuf::from(
                lookup(ENV_SNARKJS_BIN).unwrap_or_else(|| DEFAULT_SNARKJS_BIN.to_string()),
            ),
        })
    }

    /// Check that the circuit and proving key files exist.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_file("circuit wasm", &self.circuit_wasm)?;
        check_file("proving key", &self.proving_key)
    }
}

fn check_file(what: &'static str, path: &Path) -> Result<(), ConfigError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ConfigError::MissingFile {
            what,
            path: path.to_path_buf(),
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),
    #[error("{what} not found at {}", .path.display())]
    MissingFile { what: &'static str, path: PathBuf },
}
