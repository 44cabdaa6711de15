//! Item loading. The tree only ever sees bytes; where they come from is
//! decided here.

use std::{fs, path::Path};

use tracing::debug;

use crate::error::CliError;

/// Read one item file.
pub fn read_item(path: &Path) -> Result<Vec<u8>, CliError> {
    let bytes = fs::read(path).map_err(|source| CliError::ReadItem {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), size = bytes.len(), "read item");
    Ok(bytes)
}

/// Read every file in argument order. The first unreadable file aborts.
pub fn read_items<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Vec<u8>>, CliError> {
    paths.iter().map(|p| read_item(p.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_read_items_in_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut paths = Vec::new();
        for (i, body) in [b"zero".as_slice(), b"one", b"two"].iter().enumerate() {
            let path = dir.path().join(format!("doc{i}.dat"));
            let mut file = fs::File::create(&path).expect("create");
            file.write_all(body).expect("write");
            paths.push(path);
        }

        let items = read_items(&paths).expect("readable");
        assert_eq!(items, vec![b"zero".to_vec(), b"one".to_vec(), b"two".to_vec()]);
    }

    #[test]
    fn test_missing_file_is_reported_with_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("absent.dat");
        let err = read_items(&[missing.clone()]).expect_err("missing file");
        assert_matches!(&err, CliError::ReadItem { path, .. } if path == &missing);
        assert!(err.to_string().contains("absent.dat"));
    }
}
