//! # Identity Subcommand
//!
//! Identity generation and inspection.

use anyhow::Context;
use clap::{Args, Subcommand};
use serde_json::{json, Value};

use rln_protocol::{rate_commitment, Identity};

/// Arguments for the identity subcommand.
#[derive(Args, Debug)]
pub struct IdentityArgs {
    #[command(subcommand)]
    pub command: IdentityCommand,
}

#[derive(Subcommand, Debug)]
pub enum IdentityCommand {
    /// Create an identity, random unless a seed is given.
    New {
        /// Derive the identity deterministically from this seed.
        #[arg(long)]
        seed: Option<String>,
    },
    /// Show the public values of a serialized identity.
    Inspect {
        /// Identity as printed by `identity new`.
        serialized: String,
        /// Message limit for the rate commitment.
        #[arg(long, default_value_t = 1)]
        limit: u64,
    },
}

pub fn run(args: &IdentityArgs) -> anyhow::Result<Value> {
    match &args.command {
        IdentityCommand::New { seed } => {
            let identity = match seed {
                Some(seed) => Identity::from_seed(seed)?,
                None => Identity::random()?,
            };
            Ok(json!({
                "identity": identity.to_serialized(),
                "commitment": identity.commitment(),
            }))
        }
        IdentityCommand::Inspect { serialized, limit } => {
            let identity =
                Identity::from_serialized(serialized).context("parsing serialized identity")?;
            Ok(json!({
                "commitment": identity.commitment(),
                "messageLimit": limit,
                "rateCommitment": rate_commitment(&identity, *limit)?,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_new_is_deterministic() {
        let args = IdentityArgs {
            command: IdentityCommand::New {
                seed: Some("cli".to_string()),
            },
        };
        assert_eq!(run(&args).unwrap(), run(&args).unwrap());
    }

    #[test]
    fn inspect_reports_rate_commitment() {
        let identity = Identity::from_seed("cli").unwrap();
        let args = IdentityArgs {
            command: IdentityCommand::Inspect {
                serialized: identity.to_serialized(),
                limit: 3,
            },
        };
        let out = run(&args).unwrap();
        assert_eq!(
            out["rateCommitment"],
            json!(rate_commitment(&identity, 3).unwrap().to_string())
        );
        assert_eq!(out["commitment"], json!(identity.commitment().to_string()));
    }

    #[test]
    fn inspect_rejects_garbage() {
        let args = IdentityArgs {
            command: IdentityCommand::Inspect {
                serialized: "not an identity".to_string(),
                limit: 1,
            },
        };
        assert!(run(&args).is_err());
    }
}
