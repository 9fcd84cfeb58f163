//! # rln-cli — RLN Command-Line Interface
//!
//! ## Subcommands
//!
//! - `identity` — generate a random or seeded identity, inspect a
//!   serialized one
//! - `group` — compute a room's membership root
//! - `prove` — assemble and prove a rate-limited message
//!
//! Every subcommand prints one JSON document to stdout. Logs go to stderr.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives next to each handler; handlers return JSON
//!   values and never print.
//! - Handlers delegate to `rln-protocol` and `rln-zkp`; no protocol logic
//!   here.

pub mod group;
pub mod identity;
pub mod prove;
