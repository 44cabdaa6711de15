//! Binary Merkle tree commitments with single-item membership proofs.
//!
//! A [`MerkleTree`] commits to an ordered list of items with one fixed-size
//! root digest. Any item can later be proved to be part of that commitment
//! with a [`MerkleProof`]: the sibling digests on the path from its leaf to the
//! root. A verifier needs only the trusted root, the item and the proof.
//!
//! # Construction
//!
//! - Level 0 holds `H(item)` for every item, in order.
//! - A level with an odd number of nodes (more than one) is padded by
//!   repeating its last digest. This happens independently at every level.
//! - Level `k + 1` holds `H(left || right)` for consecutive pairs of level `k`.
//! - The single node of the last level is the root.
//!
//! The hash primitive is injected through [`MerkleHasher`]; [`HashAlgorithm`]
//! selects SHA-256 or BLAKE3 at runtime.
//!
//! # Example
//! ```
//! use merkletree::{MerkleTree, HashAlgorithm};
//!
//! let items: Vec<&[u8]> = vec![b"doc0", b"doc1", b"doc2"];
//! let tree = MerkleTree::build(&items, HashAlgorithm::Sha256)
//!     .unwrap()
//!     .expect("non-empty item list");
//!
//! let proof = tree.prove(2).expect("leaf 2 exists");
//! assert!(proof.verify(&HashAlgorithm::Sha256, b"doc2", &tree.root_hash()));
//! assert!(!proof.verify(&HashAlgorithm::Sha256, b"tampered", &tree.root_hash()));
//! ```
//!
//! # Features
//!
//! - `parallel`: hash large levels with rayon. Results are identical.
//! - `visualize`: implement `merkletree_visualize::Visualize` for the tree.

#![warn(missing_docs)]

mod error;
pub mod export;
pub(crate) mod hash;
pub(crate) mod leaf;
pub(crate) mod proof;
pub(crate) mod store;
pub(crate) mod tree;
mod verify;
#[cfg(feature = "visualize")]
mod visualize;


pub use error::{Error, Result};
pub use export::export_tree;
pub use hash::{Blake3Hasher, CryptoHash, HashAlgorithm, MerkleHasher, Sha256Hasher, HASH_LENGTH};
pub use merkletree_costs::{CostContext, CostResult, CostsExt, OperationCost};
pub use proof::{MerkleProof, Position, ProofStep};
pub use store::{Node, NodeStore};
pub use tree::MerkleTree;
pub use verify::{compute_root, verify_proof};
