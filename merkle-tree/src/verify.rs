//! Proof verification.
//!
//! Pure functions over a proof path; no tree or node store is needed, so a
//! party holding only the trusted root, the item and the path can verify.

use merkletree_costs::{CostContext, CostsExt, OperationCost};

use crate::{
    hash::CryptoHash,
    proof::{MerkleProof, Position, ProofStep},
    tree::saturating_count,
    MerkleHasher,
};

/// Recompute the root implied by `item` and `path`.
///
/// Starts from `H(item)` and folds each step in order: a `Left` sibling is
/// hashed before the running digest, a `Right` sibling after it.
pub fn compute_root<H: MerkleHasher + ?Sized>(
    hasher: &H,
    item: &[u8],
    path: &[ProofStep],
) -> CostContext<CryptoHash> {
    let mut current = hasher.hash(item);
    for step in path {
        current = match step.position {
            Position::Left => hasher.merge(&step.digest, &current),
            Position::Right => hasher.merge(&current, &step.digest),
        };
    }
    current.wrap_with_cost(OperationCost {
        hash_byte_calls: 1,
        hash_node_calls: saturating_count(path.len()),
    })
}

/// Check that `item` and `path` reproduce `expected_root` byte for byte.
///
/// The hasher must be the one the tree was built with.
pub fn verify_proof<H: MerkleHasher + ?Sized>(
    hasher: &H,
    item: &[u8],
    path: &[ProofStep],
    expected_root: &CryptoHash,
) -> bool {
    &compute_root(hasher, item, path).value == expected_root
}

impl MerkleProof {
    /// Recompute the root for `item` from this proof's path.
    pub fn compute_root<H: MerkleHasher + ?Sized>(
        &self,
        hasher: &H,
        item: &[u8],
    ) -> CostContext<CryptoHash> {
        compute_root(hasher, item, &self.path)
    }

    /// Verify `item` against a root obtained from a trusted source.
    ///
    /// Only `expected_root` is compared; the root carried in the proof is not
    /// consulted.
    pub fn verify<H: MerkleHasher + ?Sized>(
        &self,
        hasher: &H,
        item: &[u8],
        expected_root: &CryptoHash,
    ) -> bool {
        verify_proof(hasher, item, &self.path, expected_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Blake3Hasher, Sha256Hasher};

    #[test]
    fn test_empty_path_yields_item_hash() {
        let ctx = compute_root(&Sha256Hasher, b"only", &[]);
        assert_eq!(ctx.value, Sha256Hasher.hash(b"only"));
        assert_eq!(ctx.cost, OperationCost::with_hash_byte_calls(1));
    }

    #[test]
    fn test_position_decides_concatenation_order() {
        let sibling = Blake3Hasher.hash(b"sibling");
        let leaf = Blake3Hasher.hash(b"item");

        let left = [ProofStep {
            digest: sibling,
            position: Position::Left,
        }];
        assert_eq!(
            compute_root(&Blake3Hasher, b"item", &left).value,
            Blake3Hasher.merge(&sibling, &leaf)
        );

        let right = [ProofStep {
            digest: sibling,
            position: Position::Right,
        }];
        assert_eq!(
            compute_root(&Blake3Hasher, b"item", &right).value,
            Blake3Hasher.merge(&leaf, &sibling)
        );
    }

    #[test]
    fn test_verify_proof_works_through_trait_object() {
        let hasher: &dyn MerkleHasher = &Sha256Hasher;
        let sibling = hasher.hash(b"b");
        let path = [ProofStep {
            digest: sibling,
            position: Position::Right,
        }];
        let root = hasher.merge(&hasher.hash(b"a"), &sibling);
        assert!(verify_proof(hasher, b"a", &path, &root));
        assert!(!verify_proof(hasher, b"b", &path, &root));
    }
}
