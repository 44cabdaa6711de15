//! Line-oriented text export of a built tree.
//!
//! ```text
//! MerkleTree:<hashName>:<leafCount>:<rootLevel>:<rootDigestHex>
//! <level>:<index>:<digestHex>
//! ...
//! ```
//!
//! Node lines are leaves first in index order, then each internal level in
//! ascending order. Padding duplicates are stored nodes and are listed too.
//! Lines are separated by `\n` with no trailing newline.

use std::fmt::Write;

use crate::{MerkleHasher, MerkleTree};

/// Prefix of the header line.
pub const EXPORT_HEADER_TAG: &str = "MerkleTree";

/// Render `tree` in the export format.
pub fn export_tree<H: MerkleHasher>(tree: &MerkleTree<H>) -> String {
    let (root_hex, root_level) = tree.root();
    let mut out = format!(
        "{}:{}:{}:{}:{}",
        EXPORT_HEADER_TAG,
        tree.hash_name(),
        tree.leaf_count(),
        root_level,
        root_hex
    );
    for node in tree.store().nodes() {
        // Writing into a `String` cannot fail.
        let _ = write!(
            out,
            "\n{}:{}:{}",
            node.level,
            node.index,
            hex::encode(node.digest)
        );
    }
    out
}

impl<H: MerkleHasher> MerkleTree<H> {
    /// Text export of this tree, see [`export_tree`].
    pub fn export(&self) -> String {
        export_tree(self)
    }
}
