//! Membership proof generation.
//!
//! A `MerkleProof` carries the sibling digest of every node on the path from
//! one leaf to the root, each tagged with the side the sibling sits on. It is
//! everything a verifier needs besides the item itself and a trusted root.


use std::fmt;

use crate::{hash::CryptoHash, store::NodeStore, Error, Result};

/// Side of the current node on which a proof step's sibling sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Sibling is the left child: parent = `H(sibling || current)`.
    Left,
    /// Sibling is the right child: parent = `H(current || sibling)`.
    Right,
}

impl Position {
    /// Position of the sibling of the node at `index`.
    pub fn of_sibling(index: usize) -> Self {
        if index % 2 == 0 {
            Position::Right
        } else {
            Position::Left
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Left => f.write_str("left"),
            Position::Right => f.write_str("right"),
        }
    }
}

/// One level of a proof path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofStep {
    /// Digest of the sibling node.
    pub digest: CryptoHash,
    /// Side of the sibling.
    pub position: Position,
}

/// Membership proof for a single leaf.
///
/// The path is ordered leaf to root and its length equals the tree height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProof {
    pub(crate) leaf_index: usize,
    pub(crate) path: Vec<ProofStep>,
    pub(crate) root: CryptoHash,
    pub(crate) root_level: usize,
}

impl MerkleProof {
    /// Assemble a proof from parts received out of band.
    pub fn new(
        leaf_index: usize,
        path: Vec<ProofStep>,
        root: CryptoHash,
        root_level: usize,
    ) -> Self {
        Self {
            leaf_index,
            path,
            root,
            root_level,
        }
    }

    /// Walk the store from `(0, leaf_index)` up to the root collecting
    /// siblings.
    pub(crate) fn generate(
        store: &NodeStore,
        leaf_count: usize,
        leaf_index: usize,
    ) -> Result<Self> {
        if leaf_index >= leaf_count {
            return Err(Error::IndexOutOfRange {
                level: 0,
                index: leaf_index,
                len: leaf_count,
            });
        }

        let root_level = store.height();
        let mut path = Vec::with_capacity(root_level);
        let mut index = leaf_index;
        for level in 0..root_level {
            let digest = *store.get(level, index ^ 1)?;
            path.push(ProofStep {
                digest,
                position: Position::of_sibling(index),
            });
            index /= 2;
        }

        Ok(MerkleProof {
            leaf_index,
            path,
            root: *store.root(),
            root_level,
        })
    }

    /// Index of the proved leaf.
    pub fn leaf_index(&self) -> usize {
        self.leaf_index
    }

    /// Sibling steps, leaf to root.
    pub fn path(&self) -> &[ProofStep] {
        &self.path
    }

    /// Root digest of the tree the proof was generated from.
    pub fn root(&self) -> &CryptoHash {
        &self.root
    }

    /// Level of that root.
    pub fn root_level(&self) -> usize {
        self.root_level
    }

    /// Number of steps in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// True for a single-leaf tree, where the leaf digest is the root.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}
