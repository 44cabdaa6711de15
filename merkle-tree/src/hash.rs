//! Pluggable hash primitive.
//!
//! The tree algorithms never name a concrete hash function; they only call
//! [`MerkleHasher::hash`] for items and [`MerkleHasher::merge`] for pairs of
//! child digests. [`HashAlgorithm`] is the runtime-selectable identity used by
//! the by-name entry points and the export header.

use std::{fmt, str::FromStr};

use sha2::{Digest, Sha256};

use crate::Error;

/// The length of a `CryptoHash` (in bytes).
pub const HASH_LENGTH: usize = 32;
pub(crate) const HASH_LENGTH_X2: usize = 64;

/// A fixed-length digest.
pub type CryptoHash = [u8; HASH_LENGTH];

/// Hash primitive injected into tree construction and proof verification.
///
/// Implementations must be deterministic. `merge` defaults to hashing the
/// concatenation `left || right`, which is what the tree and the verifier
/// rely on; override it only with an equivalent computation.
pub trait MerkleHasher: Send + Sync {
    /// Name written into the export header, e.g. `sha256`.
    fn name(&self) -> &str;

    /// Hash an arbitrary byte sequence.
    fn hash(&self, bytes: &[u8]) -> CryptoHash;

    /// Hash two child digests concatenated in index order.
    fn merge(&self, left: &CryptoHash, right: &CryptoHash) -> CryptoHash {
        let mut input = [0u8; HASH_LENGTH_X2];
        input[..HASH_LENGTH].copy_from_slice(left);
        input[HASH_LENGTH..].copy_from_slice(right);
        self.hash(&input)
    }
}

impl<H: MerkleHasher + ?Sized> MerkleHasher for &H {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn hash(&self, bytes: &[u8]) -> CryptoHash {
        (**self).hash(bytes)
    }

    fn merge(&self, left: &CryptoHash, right: &CryptoHash) -> CryptoHash {
        (**self).merge(left, right)
    }
}

/// SHA-256.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Sha256Hasher;

impl MerkleHasher for Sha256Hasher {
    fn name(&self) -> &str {
        "sha256"
    }

    fn hash(&self, bytes: &[u8]) -> CryptoHash {
        Sha256::digest(bytes).into()
    }
}

/// BLAKE3.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Blake3Hasher;

impl MerkleHasher for Blake3Hasher {
    fn name(&self) -> &str {
        "blake3"
    }

    fn hash(&self, bytes: &[u8]) -> CryptoHash {
        *blake3::hash(bytes).as_bytes()
    }

    fn merge(&self, left: &CryptoHash, right: &CryptoHash) -> CryptoHash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(left);
        hasher.update(right);
        *hasher.finalize().as_bytes()
    }
}

/// Runtime-selectable hash primitive identity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256, see [`Sha256Hasher`].
    #[default]
    Sha256,
    /// BLAKE3, see [`Blake3Hasher`].
    Blake3,
}

impl HashAlgorithm {
    /// All supported algorithms.
    pub const ALL: [HashAlgorithm; 2] = [HashAlgorithm::Sha256, HashAlgorithm::Blake3];

    /// Resolve an algorithm from its name.
    ///
    /// An empty or unknown name means no hash primitive was supplied and is
    /// reported as [`Error::InvalidInput`].
    pub fn from_name(name: &str) -> Result<Self, Error> {
        match name.trim().to_ascii_lowercase().as_str() {
            "" => Err(Error::InvalidInput(
                "no hash primitive supplied".to_string(),
            )),
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "blake3" => Ok(HashAlgorithm::Blake3),
            other => Err(Error::InvalidInput(format!(
                "unknown hash primitive `{}`",
                other
            ))),
        }
    }
}

impl MerkleHasher for HashAlgorithm {
    fn name(&self) -> &str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }

    fn hash(&self, bytes: &[u8]) -> CryptoHash {
        match self {
            HashAlgorithm::Sha256 => Sha256Hasher.hash(bytes),
            HashAlgorithm::Blake3 => Blake3Hasher.hash(bytes),
        }
    }

    fn merge(&self, left: &CryptoHash, right: &CryptoHash) -> CryptoHash {
        match self {
            HashAlgorithm::Sha256 => Sha256Hasher.merge(left, right),
            HashAlgorithm::Blake3 => Blake3Hasher.merge(left, right),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
