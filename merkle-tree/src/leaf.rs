//! Leaf digests from raw items.

use merkletree_costs::{CostResult, CostsExt, OperationCost};

use crate::{hash::CryptoHash, tree::saturating_count, Error, MerkleHasher};

/// Hash every item into its level-0 digest, preserving order.
///
/// Fails with [`Error::InvalidInput`] when `items` is empty.
pub(crate) fn hash_items<I, H>(items: &[I], hasher: &H) -> CostResult<Vec<CryptoHash>, Error>
where
    I: AsRef<[u8]> + Sync,
    H: MerkleHasher,
{
    if items.is_empty() {
        return Err(Error::InvalidInput(
            "cannot build a Merkle tree from an empty item list".to_string(),
        ))
        .wrap_with_cost(OperationCost::default());
    }

    let cost = OperationCost::with_hash_byte_calls(saturating_count(items.len()));

    #[cfg(feature = "parallel")]
    {
        if items.len() >= crate::tree::PARALLEL_THRESHOLD {
            use rayon::prelude::*;
            let leaves: Vec<CryptoHash> = items
                .par_iter()
                .map(|item| hasher.hash(item.as_ref()))
                .collect();
            return Ok(leaves).wrap_with_cost(cost);
        }
    }

    let leaves: Vec<CryptoHash> = items.iter().map(|item| hasher.hash(item.as_ref())).collect();
    Ok(leaves).wrap_with_cost(cost)
}
