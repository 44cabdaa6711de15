//! Level-indexed node arena.
//!
//! Each level is a contiguous vector of digests. Parent/child relations are
//! arithmetic on `(level, index)`: the parent of `(l, i)` is `(l + 1, i / 2)`
//! and the children of `(l, i)` are `(l - 1, 2i)` and `(l - 1, 2i + 1)`.
//!
//! Levels are stored after padding, so every level below the root has an even
//! length and every node below the root has a sibling. A padding node repeats
//! its left neighbour's digest and has no children of its own.

use crate::{hash::CryptoHash, Error, Result};

/// A node addressed by `(level, index)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    /// Distance from the leaves; leaves are level 0.
    pub level: usize,
    /// Position within the level.
    pub index: usize,
    /// Digest stored at this position.
    pub digest: CryptoHash,
    /// Whether this is a level-0 node.
    pub is_leaf: bool,
    /// Whether this node is the duplicate appended to an odd level.
    pub is_padding: bool,
}

impl Node {
    /// Address of the parent node.
    pub fn parent_position(&self) -> (usize, usize) {
        (self.level + 1, self.index / 2)
    }

    /// Address of the sibling this node is paired with.
    pub fn sibling_position(&self) -> (usize, usize) {
        (self.level, self.index ^ 1)
    }

    /// Addresses of the two children, `None` for leaves and padding nodes.
    pub fn children_positions(&self) -> Option<((usize, usize), (usize, usize))> {
        if self.is_leaf || self.is_padding {
            return None;
        }
        let level = self.level - 1;
        Some(((level, 2 * self.index), (level, 2 * self.index + 1)))
    }
}

/// Immutable per-level storage of every digest produced during construction.
///
/// Read-only once built, so it can be shared between threads without
/// synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStore {
    levels: Vec<Vec<CryptoHash>>,
    /// Per-level node count before padding.
    widths: Vec<usize>,
}

impl NodeStore {
    /// The caller guarantees at least one level, a single-node top level and
    /// `leaf_count` unpadded leaves at level 0.
    pub(crate) fn from_levels(levels: Vec<Vec<CryptoHash>>, leaf_count: usize) -> Self {
        debug_assert!(levels.last().is_some_and(|top| top.len() == 1));
        // Level k + 1 holds one parent per stored pair of level k.
        let widths = std::iter::once(leaf_count)
            .chain(
                levels
                    .iter()
                    .take(levels.len().saturating_sub(1))
                    .map(|below| below.len() / 2),
            )
            .collect();
        Self { levels, widths }
    }

    /// Number of stored levels, the root level included.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Number of levels above the leaves.
    pub fn height(&self) -> usize {
        self.levels.len() - 1
    }

    /// The digest of the single top-level node.
    pub fn root(&self) -> &CryptoHash {
        &self.levels[self.height()][0]
    }

    /// All digests stored at `level`.
    pub fn level(&self, level: usize) -> Result<&[CryptoHash]> {
        self.levels
            .get(level)
            .map(Vec::as_slice)
            .ok_or(Error::IndexOutOfRange {
                level,
                index: 0,
                len: 0,
            })
    }

    /// Number of nodes at `level` before padding.
    pub fn unpadded_len(&self, level: usize) -> Result<usize> {
        self.widths.get(level).copied().ok_or(Error::IndexOutOfRange {
            level,
            index: 0,
            len: 0,
        })
    }

    /// Digest at `(level, index)`.
    pub fn get(&self, level: usize, index: usize) -> Result<&CryptoHash> {
        let nodes = self.levels.get(level).ok_or(Error::IndexOutOfRange {
            level,
            index,
            len: 0,
        })?;
        nodes.get(index).ok_or(Error::IndexOutOfRange {
            level,
            index,
            len: nodes.len(),
        })
    }

    /// Node at `(level, index)`.
    pub fn node(&self, level: usize, index: usize) -> Result<Node> {
        let digest = *self.get(level, index)?;
        Ok(Node {
            level,
            index,
            digest,
            is_leaf: level == 0,
            is_padding: index >= self.widths[level],
        })
    }

    /// Every stored node: leaves first in index order, then each internal
    /// level in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.levels
            .iter()
            .zip(&self.widths)
            .enumerate()
            .flat_map(|(level, (digests, &width))| {
                digests.iter().enumerate().map(move |(index, digest)| Node {
                    level,
                    index,
                    digest: *digest,
                    is_leaf: level == 0,
                    is_padding: index >= width,
                })
            })
    }
}
