use merkletree_costs::{cost_return_on_error, CostResult, CostsExt, OperationCost};
use tracing::{debug, trace};

use crate::{
    hash::CryptoHash,
    leaf::hash_items,
    proof::MerkleProof,
    store::{Node, NodeStore},
    Error, HashAlgorithm, MerkleHasher, Result,
};

/// Levels with at least this many nodes are hashed with rayon when the
/// `parallel` feature is enabled.
#[cfg(feature = "parallel")]
pub(crate) const PARALLEL_THRESHOLD: usize = 1024;

/// An immutable binary Merkle tree over an ordered item list.
///
/// Built once with [`build`](MerkleTree::build); afterwards every method takes
/// `&self`, so proofs can be generated from many threads at once.
///
/// Odd levels are padded by repeating their last digest, independently at
/// every level. For items `[A, B, C]`:
///
/// ```text
/// level 2:            H(n0 || n1)
/// level 1:    n0 = H(a || b)    n1 = H(c || c)
/// level 0:    a      b          c      c
/// ```
#[derive(Debug, Clone)]
pub struct MerkleTree<H = HashAlgorithm> {
    store: NodeStore,
    leaf_count: usize,
    hasher: H,
}

impl MerkleTree<HashAlgorithm> {
    /// Build a tree choosing the hash primitive by name (`sha256`, `blake3`).
    ///
    /// An empty or unknown name fails with [`Error::InvalidInput`] before any
    /// hashing happens.
    pub fn build_named<I: AsRef<[u8]> + Sync>(
        items: &[I],
        hash_name: &str,
    ) -> CostResult<Self, Error> {
        match HashAlgorithm::from_name(hash_name) {
            Ok(algorithm) => Self::build(items, algorithm),
            Err(e) => Err(e).wrap_with_cost(OperationCost::default()),
        }
    }
}

impl<H: MerkleHasher> MerkleTree<H> {
    /// Build a tree from `items` in order.
    ///
    /// Fails with [`Error::InvalidInput`] if `items` is empty. The returned
    /// cost counts one `hash_byte_calls` per item and one `hash_node_calls`
    /// per pair merge.
    pub fn build<I: AsRef<[u8]> + Sync>(items: &[I], hasher: H) -> CostResult<Self, Error> {
        let mut cost = OperationCost::default();

        let leaves = cost_return_on_error!(&mut cost, hash_items(items, &hasher));
        let leaf_count = leaves.len();

        let mut levels: Vec<Vec<CryptoHash>> = Vec::new();
        let mut current = leaves;
        while current.len() > 1 {
            if current.len() % 2 == 1 {
                let last = current[current.len() - 1];
                current.push(last);
            }
            let next = merge_level(&current, &hasher);
            cost += OperationCost::with_hash_node_calls(saturating_count(next.len()));
            trace!(
                level = levels.len(),
                nodes = current.len(),
                "merged Merkle tree level"
            );
            levels.push(current);
            current = next;
        }
        levels.push(current);

        let store = NodeStore::from_levels(levels, leaf_count);
        debug!(
            hash = hasher.name(),
            leaf_count,
            height = store.height(),
            root = %hex::encode(store.root()),
            "built Merkle tree"
        );

        Ok(MerkleTree {
            store,
            leaf_count,
            hasher,
        })
        .wrap_with_cost(cost)
    }

    /// Number of input items.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of stored level-0 nodes, the padding duplicate included.
    pub fn padded_leaf_count(&self) -> usize {
        self.store.level(0).map_or(0, <[CryptoHash]>::len)
    }

    /// Number of levels above the leaves; also the proof path length.
    pub fn height(&self) -> usize {
        self.store.height()
    }

    /// Level of the root node. Equal to [`height`](Self::height).
    pub fn root_level(&self) -> usize {
        self.store.height()
    }

    /// The root digest.
    pub fn root_hash(&self) -> CryptoHash {
        *self.store.root()
    }

    /// Root digest as lowercase hex together with the root level.
    pub fn root(&self) -> (String, usize) {
        (hex::encode(self.store.root()), self.root_level())
    }

    /// The node arena.
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    /// Node at `(level, index)`.
    pub fn node(&self, level: usize, index: usize) -> Result<Node> {
        self.store.node(level, index)
    }

    /// The hash primitive this tree was built with.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Name of the hash primitive.
    pub fn hash_name(&self) -> &str {
        self.hasher.name()
    }

    /// Membership proof for the leaf at `leaf_index`.
    ///
    /// Fails with [`Error::IndexOutOfRange`] unless `leaf_index <
    /// leaf_count()`; the padding duplicate is not provable on its own.
    pub fn prove(&self, leaf_index: usize) -> Result<MerkleProof> {
        MerkleProof::generate(&self.store, self.leaf_count, leaf_index)
    }

    /// Recompute the root from a claimed item at `leaf_index` and return it as
    /// hex.
    ///
    /// The caller compares the result with [`root`](Self::root): equality
    /// means `item` is the committed item at that index, inequality means
    /// either a tampered item or a wrong index.
    pub fn prove_membership(&self, item: &[u8], leaf_index: usize) -> Result<String> {
        let proof = self.prove(leaf_index)?;
        let computed = proof.compute_root(&self.hasher, item).value;
        Ok(hex::encode(computed))
    }
}

/// Hash-call counter for `len` calls, saturating at `u32::MAX`.
pub(crate) fn saturating_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Hash consecutive pairs of an even-length level into the next level.
fn merge_level<H: MerkleHasher>(level: &[CryptoHash], hasher: &H) -> Vec<CryptoHash> {
    #[cfg(feature = "parallel")]
    {
        if level.len() >= PARALLEL_THRESHOLD {
            use rayon::prelude::*;
            return level
                .par_chunks_exact(2)
                .map(|pair| hasher.merge(&pair[0], &pair[1]))
                .collect();
        }
    }

    level
        .chunks_exact(2)
        .map(|pair| hasher.merge(&pair[0], &pair[1]))
        .collect()
}
