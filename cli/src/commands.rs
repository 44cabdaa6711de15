use std::{io::Write, path::Path};

use merkletree::{MerkleTree, OperationCost};
use merkletree_visualize::{Drawer, Visualize};
use tracing::{debug, info};

use crate::{
    error::CliError,
    items::{read_item, read_items},
};

fn build_tree<P: AsRef<Path>>(files: &[P], hash: &str) -> Result<MerkleTree, CliError> {
    let items = read_items(files)?;
    let mut cost = OperationCost::default();
    let tree = MerkleTree::build_named(&items, hash).unwrap_add_cost(&mut cost)?;
    debug!(hash_calls = cost.total_hash_calls(), "built tree from files");
    Ok(tree)
}

/// Print the text export of the tree over `files`.
pub fn run_export<P: AsRef<Path>, W: Write>(
    files: &[P],
    hash: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let tree = build_tree(files, hash)?;
    writeln!(out, "{}", tree.export())?;
    Ok(())
}

/// Print `<rootHex> <rootLevel>`.
pub fn run_root<P: AsRef<Path>, W: Write>(
    files: &[P],
    hash: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let tree = build_tree(files, hash)?;
    let (root_hex, root_level) = tree.root();
    writeln!(out, "{root_hex} {root_level}")?;
    Ok(())
}

/// Check the contents of `item` against leaf `index` of the tree over
/// `files`. Returns whether the item is a member.
pub fn run_prove<P: AsRef<Path>, W: Write>(
    files: &[P],
    hash: &str,
    index: usize,
    item: &Path,
    out: &mut W,
) -> Result<bool, CliError> {
    let tree = build_tree(files, hash)?;
    let claimed = read_item(item)?;

    let returned = tree.prove_membership(&claimed, index)?;
    let (expected, _) = tree.root();
    let member = returned == expected;
    info!(index, member, "checked membership");

    writeln!(out, "returned root: {returned}")?;
    writeln!(out, "expected root: {expected}")?;
    writeln!(out, "{}", if member { "member" } else { "not a member" })?;
    Ok(member)
}

/// Draw the tree over `files`, root first.
pub fn run_show<P: AsRef<Path>, W: Write>(
    files: &[P],
    hash: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let tree = build_tree(files, hash)?;
    let mut drawer = tree.visualize(Drawer::new(out))?;
    drawer.flush()?;
    Ok(())
}

/// Flush `out` and turn a command outcome into a process exit status.
/// Errors, including a failed flush, are printed to stderr and map to 1.
pub fn finish<W: Write>(result: Result<i32, CliError>, out: &mut W) -> i32 {
    let flushed = result.and_then(|status| {
        out.flush()?;
        Ok(status)
    });
    match flushed {
        Ok(status) => status,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, io, path::PathBuf};

    use assert_matches::assert_matches;
    use merkletree::{Error, HashAlgorithm};
    use tempfile::TempDir;

    use super::*;

    fn write_docs(bodies: &[&[u8]]) -> (TempDir, Vec<PathBuf>) {
        let dir = tempfile::tempdir().expect("temp dir");
        let paths = bodies
            .iter()
            .enumerate()
            .map(|(i, body)| {
                let path = dir.path().join(format!("doc{i}.dat"));
                fs::write(&path, body).expect("write doc");
                path
            })
            .collect();
        (dir, paths)
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn test_root_matches_library() {
        let bodies: [&[u8]; 3] = [b"A", b"B", b"C"];
        let (_dir, paths) = write_docs(&bodies);

        let mut out = Vec::new();
        run_root(&paths, "sha256", &mut out).expect("root");

        let tree = MerkleTree::build(&bodies, HashAlgorithm::Sha256)
            .unwrap()
            .expect("build");
        let (root_hex, root_level) = tree.root();
        assert_eq!(output(out), format!("{root_hex} 2\n"));
        assert_eq!(root_level, 2);
    }

    #[test]
    fn test_export_prints_header_and_nodes() {
        let (_dir, paths) = write_docs(&[b"A", b"B", b"C", b"D", b"E"]);
        let mut out = Vec::new();
        run_export(&paths, "blake3", &mut out).expect("export");
        let text = output(out);
        let mut lines = text.lines();
        assert!(lines
            .next()
            .expect("header")
            .starts_with("MerkleTree:blake3:5:3:"));
        // 6 padded leaves, 4 at level 1, 2 at level 2, the root
        assert_eq!(lines.count(), 13);
    }

    #[test]
    fn test_prove_reports_membership() {
        let (dir, paths) = write_docs(&[b"A", b"B", b"C"]);

        let mut out = Vec::new();
        assert!(run_prove(&paths, "sha256", 1, &paths[1], &mut out).expect("prove"));
        let text = output(out);
        assert!(text.ends_with("member\n"));
        let roots: Vec<&str> = text
            .lines()
            .take(2)
            .map(|l| l.rsplit(' ').next().expect("root"))
            .collect();
        assert_eq!(roots[0], roots[1]);

        let forged = dir.path().join("forged.dat");
        fs::write(&forged, b"B, edited").expect("write forged");
        let mut out = Vec::new();
        assert!(!run_prove(&paths, "sha256", 1, &forged, &mut out).expect("prove"));
        assert!(output(out).ends_with("not a member\n"));

        let mut out = Vec::new();
        assert!(!run_prove(&paths, "sha256", 0, &paths[1], &mut out).expect("prove"));
    }

    #[test]
    fn test_prove_out_of_range() {
        let (_dir, paths) = write_docs(&[b"A", b"B", b"C"]);
        let mut out = Vec::new();
        let err = run_prove(&paths, "sha256", 3, &paths[0], &mut out).expect_err("padding");
        assert_matches!(err, CliError::Tree(Error::IndexOutOfRange { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_unknown_hash_rejected() {
        let (_dir, paths) = write_docs(&[b"A"]);
        let mut out = Vec::new();
        let err = run_root(&paths, "md5", &mut out).expect_err("unknown hash");
        assert_matches!(err, CliError::Tree(Error::InvalidInput(_)));
    }

    #[test]
    fn test_show_draws_every_node() {
        let (_dir, paths) = write_docs(&[b"A", b"B", b"C"]);
        let mut out = Vec::new();
        run_show(&paths, "sha256", &mut out).expect("show");
        let text = output(out);
        assert!(text.starts_with("MerkleTree sha256 (3 leaves, height 2)"));
        assert_eq!(text.matches("[hex: ").count(), 7);
    }

    #[test]
    fn test_show_with_padded_internal_levels() {
        let five: [&[u8]; 5] = [b"A", b"B", b"C", b"D", b"E"];
        let (_dir, paths) = write_docs(&five);
        let mut out = Vec::new();
        run_show(&paths, "sha256", &mut out).expect("show five");
        let text = output(out);
        assert!(text.starts_with("MerkleTree sha256 (5 leaves, height 3)"));
        // 1 + 2 + 4 + 6: the padded level-1 node is not expanded
        assert_eq!(text.matches("[hex: ").count(), 13);
        assert_eq!(text.matches("(padding)").count(), 2);

        let eleven: Vec<Vec<u8>> = (0..11u8).map(|i| vec![b'a' + i]).collect();
        let bodies: Vec<&[u8]> = eleven.iter().map(Vec::as_slice).collect();
        let (_dir, paths) = write_docs(&bodies);
        let mut out = Vec::new();
        run_show(&paths, "blake3", &mut out).expect("show eleven");
        let text = output(out);
        assert!(text.starts_with("MerkleTree blake3 (11 leaves, height 4)"));
        assert_eq!(text.matches("[hex: ").count(), 25);
        assert_eq!(text.matches("(padding)").count(), 2);
    }

    /// Accepts writes, fails every flush.
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_finish_maps_outcomes_to_status() {
        let mut sink = Vec::new();
        assert_eq!(finish(Ok(0), &mut sink), 0);
        assert_eq!(finish(Ok(2), &mut sink), 2);
        assert_eq!(
            finish(Err(CliError::Tree(Error::InvalidInput("x".into()))), &mut sink),
            1
        );
    }

    #[test]
    fn test_finish_reports_failed_flush() {
        assert_eq!(finish(Ok(0), &mut BrokenPipe), 1);
        assert_eq!(finish(Ok(2), &mut BrokenPipe), 1);
    }
}
