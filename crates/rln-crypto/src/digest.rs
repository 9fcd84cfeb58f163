//! # Byte-Oriented Digests — Keccak-256 and SHA-512
//!
//! Keccak-256 derives the per-room Merkle zero value; SHA-512 derives
//! seeded identities. Both are plain byte-in/byte-out functions; the
//! callers decide how digests map into the field.

use sha2::Sha512;
use sha3::{Digest, Keccak256};

/// Keccak-256 (the pre-standard Ethereum variant, not SHA3-256).
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let hash = Keccak256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hash);
    out
}

/// SHA-512 of raw bytes.
pub fn sha512(data: &[u8]) -> [u8; 64] {
    let hash = Sha512::digest(data);
    let mut out = [0u8; 64];
    out.copy_from_slice(&hash);
    out
}

/// SHA-512 as 128 lowercase hex characters.
pub fn sha512_hex(data: &[u8]) -> String {
    hex::encode(sha512(data))
}
