//! # rln-core — Foundational Types for the RLN Stack
//!
//! The leaf of the workspace DAG. Defines [`FieldElement`], the BN254 scalar
//! field type that every other crate hashes, stores and serializes, together
//! with its parse/format rules and error type.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `rln-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod field;

pub use error::FieldError;
pub use field::{FieldElement, BN254_SCALAR_MODULUS, FIELD_BYTES};
