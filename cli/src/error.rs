use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the command line front end.
#[derive(Debug, Error)]
pub enum CliError {
    /// An item file could not be read.
    #[error("cannot read item {}: {source}", path.display())]
    ReadItem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing the report failed.
    #[error("cannot write output: {0}")]
    Output(#[from] std::io::Error),
    /// Construction or proof generation failed.
    #[error(transparent)]
    Tree(#[from] merkletree::Error),
}
