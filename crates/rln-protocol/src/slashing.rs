//! # Secret Recovery
//!
//! Every proof publishes one point `(x, y)` on the line
//! `y = identitySecret + a1 * x`. Two proofs with the same nullifier share
//! `a1`, so two points with distinct `x` pin the line and its intercept:
//!
//! ```text
//! identitySecret = (y1 * x2 - y2 * x1) / (x2 - x1)
//! ```

use rln_core::FieldElement;
use rln_crypto::poseidon1;
use rln_zkp::RlnFullProof;

use crate::error::SlashingError;

/// A published share `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Share {
    pub x: FieldElement,
    pub y: FieldElement,
}

impl From<&RlnFullProof> for Share {
    fn from(proof: &RlnFullProof) -> Self {
        let signals = &proof.snark_proof.public_signals;
        Self {
            x: signals.x,
            y: signals.y,
        }
    }
}

/// Interpolate the intercept of the line through two shares.
pub fn recover_secret_from_shares(a: Share, b: Share) -> Result<FieldElement, SlashingError> {
    let denominator = (b.x - a.x).inverse().ok_or(SlashingError::SameSignal)?;
    Ok((a.y * b.x - b.y * a.x) * denominator)
}

/// Recover the sender's `identitySecret` from two proofs that reused a
/// nullifier.
pub fn recover_identity_secret(
    first: &RlnFullProof,
    second: &RlnFullProof,
) -> Result<FieldElement, SlashingError> {
    let (s1, s2) = (
        &first.snark_proof.public_signals,
        &second.snark_proof.public_signals,
    );
    if s1.external_nullifier != s2.external_nullifier {
        return Err(SlashingError::ExternalNullifierMismatch);
    }
    if s1.nullifier != s2.nullifier {
        return Err(SlashingError::NullifierMismatch);
    }
    let secret = recover_secret_from_shares(first.into(), second.into())?;
    tracing::warn!(nullifier = %s1.nullifier, "rate limit exceeded; identity secret recovered");
    Ok(secret)
}

/// The offender's identity commitment, `Poseidon1(secret)`, for removal
/// from the group.
pub fn recover_identity_commitment(
    first: &RlnFullProof,
    second: &RlnFullProof,
) -> Result<FieldElement, SlashingError> {
    let secret = recover_identity_secret(first, second)?;
    Ok(poseidon1(&secret)?)
}
