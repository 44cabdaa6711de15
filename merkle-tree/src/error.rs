use thiserror::Error;

/// Alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors from Merkle tree construction, lookup and proof generation.
///
/// Every error is a deterministic function of the input; none of them is
/// transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Empty item list, or a missing/unknown hash primitive.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A leaf index or a `(level, index)` address outside the tree. Levels
    /// above the root report a length of 0.
    #[error("index {index} out of range at level {level} (length {len})")]
    IndexOutOfRange {
        /// Level that was addressed.
        level: usize,
        /// Index that was requested.
        index: usize,
        /// Number of nodes stored at that level.
        len: usize,
    },
}
