//! # Room Group
//!
//! A [`Group`] binds a room identifier to a Poseidon Merkle tree of rate
//! commitments. The tree's zero value is derived from the room id, so two
//! rooms with identical membership still have distinct roots.
//!
//! Groups are plainly mutable and single-owner: mutations take `&mut self`
//! and nothing is shared between instances.

use rln_core::FieldElement;
use rln_crypto::{keccak256, IncrementalMerkleTree, MerkleProof, Poseidon2Hasher};

use crate::error::GroupError;

/// Depth of the RLN circuit's membership tree.
pub const DEFAULT_DEPTH: usize = 20;
/// Shallowest supported group tree.
pub const MIN_DEPTH: usize = 16;
/// Deepest supported group tree.
pub const MAX_DEPTH: usize = 32;

/// Per-room zero value: `keccak256(be32(id)) >> 8`.
///
/// Dropping the low byte leaves a 248-bit value, always below the field
/// modulus.
pub fn derive_zero_value(id: &FieldElement) -> FieldElement {
    let digest = keccak256(&id.to_be_bytes());
    let mut shifted = [0u8; 32];
    shifted[1..].copy_from_slice(&digest[..31]);
    FieldElement::from_be_bytes_mod_order(&shifted)
}

/// A room's membership accumulator.
#[derive(Debug, Clone)]
pub struct Group {
    id: FieldElement,
    tree: IncrementalMerkleTree<Poseidon2Hasher>,
}

impl Group {
    /// Build a group of `depth` levels holding `members` in order.
    pub fn new(
        id: FieldElement,
        depth: usize,
        members: Vec<FieldElement>,
    ) -> Result<Self, GroupError> {
        if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
            return Err(GroupError::InvalidDepth {
                depth,
                min: MIN_DEPTH,
                max: MAX_DEPTH,
            });
        }
        let tree = IncrementalMerkleTree::new(
            Poseidon2Hasher,
            depth,
            derive_zero_value(&id),
            members,
        )?;
        Ok(Self { id, tree })
    }

    /// Group at [`DEFAULT_DEPTH`].
    pub fn with_members(id: FieldElement, members: Vec<FieldElement>) -> Result<Self, GroupError> {
        Self::new(id, DEFAULT_DEPTH, members)
    }

    pub fn id(&self) -> FieldElement {
        self.id
    }

    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    pub fn root(&self) -> FieldElement {
        self.tree.root()
    }

    pub fn zero_value(&self) -> FieldElement {
        self.tree.zeroes()[0]
    }

    /// Copy of the member list in insertion order.
    pub fn members(&self) -> Vec<FieldElement> {
        self.tree.leaves()
    }

    /// Number of member slots used, including removed ones.
    pub fn size(&self) -> usize {
        self.tree.len()
    }

    /// First index holding `member`.
    pub fn index_of(&self, member: &FieldElement) -> Option<usize> {
        self.tree.index_of(member)
    }

    /// Append a member, returning its index.
    pub fn add_member(&mut self, member: FieldElement) -> Result<usize, GroupError> {
        Ok(self.tree.insert(member)?)
    }

    pub fn add_members(
        &mut self,
        members: impl IntoIterator<Item = FieldElement>,
    ) -> Result<(), GroupError> {
        for member in members {
            self.tree.insert(member)?;
        }
        Ok(())
    }

    pub fn update_member(&mut self, index: usize, member: FieldElement) -> Result<(), GroupError> {
        Ok(self.tree.update(index, member)?)
    }

    /// Reset a slot to the zero value. The index stays occupied.
    pub fn remove_member(&mut self, index: usize) -> Result<(), GroupError> {
        Ok(self.tree.delete(index)?)
    }

    /// Inclusion proof for `index` with one scalar sibling per level.
    pub fn generate_merkle_proof(&self, index: usize) -> Result<MerkleProof, GroupError> {
        Ok(self.tree.create_proof(index)?.into())
    }

    /// Check a proof against this group's hash. The proof's own root is
    /// used; compare it with [`Group::root`] to pin the current state.
    pub fn verify_merkle_proof(&self, proof: &MerkleProof) -> bool {
        proof.verify(self.tree.hasher())
    }
}
