//! Output message: the plaintext together with the proof that authorises it.

use serde::{Deserialize, Serialize};

use rln_core::FieldElement;
use rln_zkp::RlnFullProof;

/// A rate-limited message ready for broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Decimal nullifier of the proof.
    pub id: String,
    pub message: String,
    pub room_id: FieldElement,
    pub proof: RlnFullProof,
}
