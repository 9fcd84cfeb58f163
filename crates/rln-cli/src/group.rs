//! # Group Subcommand
//!
//! Computes a room's membership root from a member list file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Subcommand};
use serde_json::{json, Value};

use rln_core::FieldElement;
use rln_protocol::{Group, RoomId, DEFAULT_DEPTH};

/// Arguments for the group subcommand.
#[derive(Args, Debug)]
pub struct GroupArgs {
    #[command(subcommand)]
    pub command: GroupCommand,
}

#[derive(Subcommand, Debug)]
pub enum GroupCommand {
    /// Print the Merkle root of a room's membership.
    Root {
        /// Room identifier (decimal or 0x hex).
        #[arg(long)]
        room_id: String,
        /// JSON array of rate commitments.
        #[arg(long)]
        members: PathBuf,
        /// Tree depth.
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: usize,
    },
}

/// Read a JSON array of field elements.
pub fn read_members(path: &Path) -> anyhow::Result<Vec<FieldElement>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading members from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing members in {}", path.display()))
}

pub fn run(args: &GroupArgs) -> anyhow::Result<Value> {
    match &args.command {
        GroupCommand::Root {
            room_id,
            members,
            depth,
        } => {
            let id = RoomId::Text(room_id.clone()).to_field()?;
            let members = read_members(members)?;
            tracing::debug!(room = %id, count = members.len(), depth, "building group");
            let group = Group::new(id, *depth, members)?;
            Ok(json!({
                "roomId": group.id(),
                "depth": group.depth(),
                "size": group.size(),
                "zeroValue": group.zero_value(),
                "root": group.root(),
            }))
        }
    }
}
