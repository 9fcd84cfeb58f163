//! # Incremental Merkle Tree
//!
//! A fixed-depth binary accumulator over field elements. Leaves are stored
//! in insertion order; every level keeps only the nodes that have a real
//! descendant, and any missing right-hand child is replaced by that level's
//! zero value:
//!
//! ```text
//! zeroes[0]   = zero_value
//! zeroes[l]   = H(zeroes[l-1], zeroes[l-1])
//! empty root  = H(zeroes[depth-1], zeroes[depth-1])
//! ```
//!
//! Inserting, updating or deleting a leaf rewrites exactly one node per
//! level along the leaf's path. The new path is computed in full before
//! anything is written, so a failed hash leaves the tree untouched.
//!
//! ## Mutation Discipline
//!
//! The tree is a plainly mutable, single-owner container: mutations take
//! `&mut self` and there is no interior mutability. Accessors for the leaf
//! and zero arrays return owned copies.

use serde::{Deserialize, Serialize};

use rln_core::FieldElement;

use crate::error::{HashError, TreeError};
use crate::poseidon::Poseidon2Hasher;

/// Number of children per node.
pub const ARITY: usize = 2;

/// Smallest supported tree depth.
pub const MIN_DEPTH: usize = 1;

/// Largest supported tree depth.
pub const MAX_DEPTH: usize = 32;

/// Two-to-one compression used for interior nodes.
pub trait NodeHasher {
    /// Hash an ordered `(left, right)` pair into the parent node.
    fn hash_pair(&self, left: &FieldElement, right: &FieldElement)
        -> Result<FieldElement, HashError>;
}

impl<F> NodeHasher for F
where
    F: Fn(&FieldElement, &FieldElement) -> Result<FieldElement, HashError>,
{
    fn hash_pair(
        &self,
        left: &FieldElement,
        right: &FieldElement,
    ) -> Result<FieldElement, HashError> {
        self(left, right)
    }
}

fn hash_window<H: NodeHasher>(
    hasher: &H,
    window: &[FieldElement; ARITY],
) -> Result<FieldElement, HashError> {
    hasher.hash_pair(&window[0], &window[1])
}

/// Place `node` at `position` and fill the remaining slots from `siblings`.
///
/// Returns `None` if the position is outside the window or there are too
/// few siblings.
fn assemble_window<'a>(
    node: FieldElement,
    position: usize,
    mut siblings: impl Iterator<Item = &'a FieldElement>,
) -> Option<[FieldElement; ARITY]> {
    if position >= ARITY {
        return None;
    }
    let mut window = [FieldElement::zero(); ARITY];
    for (slot, value) in window.iter_mut().enumerate() {
        *value = if slot == position {
            node
        } else {
            *siblings.next()?
        };
    }
    Some(window)
}

/// Fold a leaf up a path of `(position, sibling-window)` steps.
fn fold_path<'a, H: NodeHasher>(
    hasher: &H,
    leaf: FieldElement,
    steps: impl Iterator<Item = (u8, &'a [FieldElement])>,
) -> Option<FieldElement> {
    let mut node = leaf;
    for (position, siblings) in steps {
        let window = assemble_window(node, usize::from(position), siblings.iter())?;
        node = hash_window(hasher, &window).ok()?;
    }
    Some(node)
}

/// Inclusion proof as produced by the tree: one sibling window per level.
///
/// Each window holds the `ARITY - 1` nodes that share a parent with the
/// path node; `path_indices[level]` is the path node's slot in that pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeProof {
    /// Root the proof was generated against.
    pub root: FieldElement,
    /// The proven leaf value.
    pub leaf: FieldElement,
    /// Slot of the path node at each level (0 = left, 1 = right).
    pub path_indices: Vec<u8>,
    /// Sibling window at each level.
    pub siblings: Vec<[FieldElement; ARITY - 1]>,
}

/// Inclusion proof with one scalar sibling per level.
///
/// This is the shape the RLN circuit consumes (`pathElements`,
/// `identityPathIndex`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerkleProof {
    /// Root the proof was generated against.
    pub root: FieldElement,
    /// The proven leaf value.
    pub leaf: FieldElement,
    /// Slot of the path node at each level (0 = left, 1 = right).
    pub path_indices: Vec<u8>,
    /// The single sibling at each level.
    pub siblings: Vec<FieldElement>,
}

impl From<TreeProof> for MerkleProof {
    fn from(proof: TreeProof) -> Self {
        Self {
            root: proof.root,
            leaf: proof.leaf,
            path_indices: proof.path_indices,
            siblings: proof.siblings.into_iter().map(|[s]| s).collect(),
        }
    }
}

impl From<MerkleProof> for TreeProof {
    fn from(proof: MerkleProof) -> Self {
        Self {
            root: proof.root,
            leaf: proof.leaf,
            path_indices: proof.path_indices,
            siblings: proof.siblings.into_iter().map(|s| [s]).collect(),
        }
    }
}

impl MerkleProof {
    /// Number of levels the proof spans.
    pub fn depth(&self) -> usize {
        self.siblings.len()
    }

    /// Recompute the root implied by `leaf` and the path.
    ///
    /// Returns `None` for malformed proofs or hash failures.
    pub fn compute_root<H: NodeHasher>(&self, hasher: &H) -> Option<FieldElement> {
        if self.path_indices.len() != self.siblings.len() {
            return None;
        }
        fold_path(
            hasher,
            self.leaf,
            self.path_indices
                .iter()
                .copied()
                .zip(self.siblings.iter().map(std::slice::from_ref)),
        )
    }

    /// Check that the path folds from `leaf` to `root`. Never errors.
    pub fn verify<H: NodeHasher>(&self, hasher: &H) -> bool {
        self.compute_root(hasher) == Some(self.root)
    }
}

/// A fixed-depth binary Merkle accumulator.
#[derive(Debug, Clone)]
pub struct IncrementalMerkleTree<H = Poseidon2Hasher> {
    hasher: H,
    depth: usize,
    /// Padding value per level, `zeroes[0]` being the leaf-level zero.
    zeroes: Vec<FieldElement>,
    /// `nodes[0]` are the leaves; `nodes[l]` the populated nodes of level `l`.
    nodes: Vec<Vec<FieldElement>>,
    root: FieldElement,
}

impl<H: NodeHasher> IncrementalMerkleTree<H> {
    /// Build a tree of `depth` levels, optionally pre-populated with `leaves`.
    ///
    /// Levels are built bottom-up; an incomplete trailing pair at any level
    /// is padded with that level's zero value.
    pub fn new(
        hasher: H,
        depth: usize,
        zero_value: FieldElement,
        leaves: Vec<FieldElement>,
    ) -> Result<Self, TreeError> {
        if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
            return Err(TreeError::InvalidDepth {
                depth,
                min: MIN_DEPTH,
                max: MAX_DEPTH,
            });
        }
        let capacity = 1u64 << depth;
        if leaves.len() as u64 > capacity {
            return Err(TreeError::TooManyLeaves {
                count: leaves.len(),
                capacity,
            });
        }

        let mut zeroes = Vec::with_capacity(depth);
        let mut zero = zero_value;
        for _ in 0..depth {
            zeroes.push(zero);
            zero = hash_window(&hasher, &[zero; ARITY])?;
        }

        let mut nodes: Vec<Vec<FieldElement>> = vec![Vec::new(); depth];
        let root = if leaves.is_empty() {
            zero
        } else {
            let leaf_count = leaves.len();
            let mut level_nodes = leaves;
            for (level, pad) in zeroes.iter().enumerate() {
                let parents = level_nodes
                    .chunks(ARITY)
                    .map(|pair| {
                        let right = pair.get(1).copied().unwrap_or(*pad);
                        hasher.hash_pair(&pair[0], &right)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                nodes[level] = std::mem::replace(&mut level_nodes, parents);
            }
            tracing::debug!(depth, leaves = leaf_count, "built populated merkle tree");
            // After `depth` halvings exactly one node remains.
            level_nodes.first().copied().unwrap_or(zero)
        };

        Ok(Self {
            hasher,
            depth,
            zeroes,
            nodes,
            root,
        })
    }

    /// Current root.
    pub fn root(&self) -> FieldElement {
        self.root
    }

    /// Number of levels below the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Maximum number of leaves (`2^depth`).
    pub fn capacity(&self) -> u64 {
        1u64 << self.depth
    }

    /// Number of leaves inserted so far (deleted leaves still count).
    pub fn len(&self) -> usize {
        self.nodes[0].len()
    }

    /// Returns `true` if no leaf has been inserted.
    pub fn is_empty(&self) -> bool {
        self.nodes[0].is_empty()
    }

    /// Owned copy of the leaves in insertion order.
    pub fn leaves(&self) -> Vec<FieldElement> {
        self.nodes[0].clone()
    }

    /// Owned copy of the per-level zero values.
    pub fn zeroes(&self) -> Vec<FieldElement> {
        self.zeroes.clone()
    }

    /// Leaf at `index`, if present.
    pub fn leaf(&self, index: usize) -> Option<FieldElement> {
        self.nodes[0].get(index).copied()
    }

    /// The node hasher.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Index of the first leaf equal to `leaf`, in insertion order.
    pub fn index_of(&self, leaf: &FieldElement) -> Option<usize> {
        self.nodes[0].iter().position(|l| l == leaf)
    }

    /// Append a leaf at index `len()`.
    pub fn insert(&mut self, leaf: FieldElement) -> Result<usize, TreeError> {
        let index = self.len();
        if index as u64 >= self.capacity() {
            return Err(TreeError::TreeFull {
                capacity: self.capacity(),
            });
        }
        self.write_path(index, leaf)?;
        tracing::trace!(index, "inserted merkle leaf");
        Ok(index)
    }

    /// Replace the leaf at `index`.
    pub fn update(&mut self, index: usize, value: FieldElement) -> Result<(), TreeError> {
        self.check_index(index)?;
        self.write_path(index, value)
    }

    /// Reset the leaf at `index` to the leaf-level zero value.
    ///
    /// The slot is kept; `len()` does not shrink.
    pub fn delete(&mut self, index: usize) -> Result<(), TreeError> {
        let zero = self.zeroes[0];
        self.update(index, zero)
    }

    /// Build an inclusion proof for the leaf at `index`.
    pub fn create_proof(&self, index: usize) -> Result<TreeProof, TreeError> {
        self.check_index(index)?;
        let leaf = self.nodes[0][index];

        let mut path_indices = Vec::with_capacity(self.depth);
        let mut siblings = Vec::with_capacity(self.depth);
        let mut idx = index;
        for level in 0..self.depth {
            let position = idx % ARITY;
            let start = idx - position;
            let mut window = [FieldElement::zero(); ARITY - 1];
            let mut slot = 0;
            for i in start..start + ARITY {
                if i != idx {
                    window[slot] = self.node_or_zero(level, i);
                    slot += 1;
                }
            }
            // position < ARITY = 2
            path_indices.push(position as u8);
            siblings.push(window);
            idx /= ARITY;
        }

        Ok(TreeProof {
            root: self.root,
            leaf,
            path_indices,
            siblings,
        })
    }

    /// Fold the proof from its leaf and compare with `proof.root`.
    ///
    /// Returns `false` for any malformed proof (wrong depth, mismatched
    /// lengths, out-of-window path index) or hash failure. Never errors.
    pub fn verify_proof(&self, proof: &TreeProof) -> bool {
        if proof.path_indices.len() != self.depth || proof.siblings.len() != self.depth {
            return false;
        }
        let steps = proof
            .path_indices
            .iter()
            .copied()
            .zip(proof.siblings.iter().map(|w| w.as_slice()));
        fold_path(&self.hasher, proof.leaf, steps) == Some(proof.root)
    }

    fn check_index(&self, index: usize) -> Result<(), TreeError> {
        if index >= self.len() {
            return Err(TreeError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }

    fn node_or_zero(&self, level: usize, index: usize) -> FieldElement {
        self.nodes[level]
            .get(index)
            .copied()
            .unwrap_or(self.zeroes[level])
    }

    /// Recompute the path from leaf `index` (holding `leaf`) to the root and
    /// commit it.
    fn write_path(&mut self, index: usize, leaf: FieldElement) -> Result<(), TreeError> {
        let mut path = Vec::with_capacity(self.depth);
        let mut node = leaf;
        let mut idx = index;
        for level in 0..self.depth {
            path.push((idx, node));
            let start = idx - idx % ARITY;
            let mut window = [FieldElement::zero(); ARITY];
            for (offset, slot) in window.iter_mut().enumerate() {
                let i = start + offset;
                *slot = if i == idx {
                    node
                } else {
                    self.node_or_zero(level, i)
                };
            }
            node = hash_window(&self.hasher, &window)?;
            idx /= ARITY;
        }

        for (level, (idx, value)) in path.into_iter().enumerate() {
            let level_nodes = &mut self.nodes[level];
            if idx < level_nodes.len() {
                level_nodes[idx] = value;
            } else {
                level_nodes.push(value);
            }
        }
        self.root = node;
        Ok(())
    }
}
