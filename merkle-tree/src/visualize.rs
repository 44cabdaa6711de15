use std::io::{Result, Write};

use merkletree_visualize::{Drawer, Visualize};

use crate::{MerkleHasher, MerkleTree};

impl<H: MerkleHasher> Visualize for MerkleTree<H> {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        drawer.write(
            format!(
                "MerkleTree {} ({} leaves, height {})",
                self.hash_name(),
                self.leaf_count(),
                self.height()
            )
            .as_bytes(),
        )?;
        drawer.down();
        drawer = self.visualize_node(drawer, self.root_level(), 0)?;
        drawer.up();
        Ok(drawer)
    }
}

impl<H: MerkleHasher> MerkleTree<H> {
    fn visualize_node<W: Write>(
        &self,
        mut drawer: Drawer<W>,
        level: usize,
        index: usize,
    ) -> Result<Drawer<W>> {
        let node = self
            .node(level, index)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        drawer.write(format!("\n[{}:{}] ", node.level, node.index).as_bytes())?;
        if !node.is_leaf && level == self.root_level() {
            drawer.write(b"root ")?;
        }
        drawer = node.digest.visualize(drawer)?;
        if node.is_padding {
            drawer.write(b" (padding)")?;
        }

        if let Some(((child_level, left), (_, right))) = node.children_positions() {
            drawer.down();
            drawer = self.visualize_node(drawer, child_level, left)?;
            drawer = self.visualize_node(drawer, child_level, right)?;
            drawer.up();
        }
        Ok(drawer)
    }
}

#[cfg(test)]
mod tests {
    use merkletree_visualize::visualize_to_vec;

    use crate::{MerkleTree, Sha256Hasher};

    #[test]
    fn test_visualize_marks_padding() {
        let items: Vec<&[u8]> = vec![b"a", b"b", b"c"];
        let tree = MerkleTree::build(&items, Sha256Hasher)
            .unwrap()
            .expect("three items");
        let mut out = Vec::new();
        visualize_to_vec(&mut out, &tree).expect("vec write");
        let text = String::from_utf8(out).expect("utf8");

        assert!(text.starts_with("MerkleTree sha256 (3 leaves, height 2)"));
        assert!(text.contains("[2:0] root [hex: "));
        assert!(text.contains("[0:3] [hex: "));
        assert_eq!(text.matches("(padding)").count(), 1);
        // 1 root + 2 inner + 4 leaves
        assert_eq!(text.lines().count(), 8);
    }

    fn draw(count: u8) -> String {
        let items: Vec<Vec<u8>> = (0..count).map(|i| vec![i]).collect();
        let tree = MerkleTree::build(&items, Sha256Hasher)
            .unwrap()
            .expect("non-empty items");
        let mut out = Vec::new();
        visualize_to_vec(&mut out, &tree).expect("vec write");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn test_visualize_padding_above_leaves() {
        // 5 -> 6 | 3 -> 4 | 2 | 1; (1:3) is drawn but not expanded.
        let text = draw(5);
        assert!(text.contains("[1:3] [hex: "));
        assert!(text.contains("[0:5] [hex: "));
        assert!(!text.contains("[0:6]"));
        assert_eq!(text.matches("(padding)").count(), 2);
        // header + 1 + 2 + 4 + 6 leaves under the three real level-1 nodes
        assert_eq!(text.lines().count(), 14);

        // 11 -> 12 | 6 | 3 -> 4 | 2 | 1; (2:3) is padding.
        let text = draw(11);
        assert!(text.starts_with("MerkleTree sha256 (11 leaves, height 4)"));
        assert_eq!(text.matches("(padding)").count(), 2);
        assert!(!text.contains("[1:6]"));
        assert_eq!(text.lines().count(), 26);
    }
}
