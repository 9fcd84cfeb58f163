//! Epoch sources for proof assembly.
//!
//! [`SystemClock`] yields the current wall-clock time in milliseconds. Every
//! message therefore lands in its own epoch and nullifiers only collide for
//! messages minted in the same millisecond. A coarse, externally agreed
//! window is the intended RLN epoch; callers wanting that inject their own
//! [`Clock`].

use rln_core::FieldElement;

/// Supplies the epoch for a proof request.
pub trait Clock: Send + Sync {
    fn epoch(&self) -> FieldElement;
}

/// Wall-clock milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch(&self) -> FieldElement {
        let millis = chrono::Utc::now().timestamp_millis();
        FieldElement::from(u64::try_from(millis).unwrap_or(0))
    }
}

/// A constant epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub FieldElement);

impl FixedClock {
    pub fn new(epoch: u64) -> Self {
        Self(FieldElement::from(epoch))
    }
}

impl Clock for FixedClock {
    fn epoch(&self) -> FieldElement {
        self.0
    }
}
