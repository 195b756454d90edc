//! Whole-file fingerprints.
//!
//! An NSF is identified in rip collections by digests of the complete file,
//! not just the header. Two pairings are in common use, and both are
//! supported as a [`DigestSet`]:
//!
//! | Set | Algorithms |
//! |-----|------------|
//! | [`DigestSet::Md5Sha256`] | MD5 + SHA-256 (default) |
//! | [`DigestSet::Md5Sha1`]   | MD5 + SHA-1 |
//!
//! The hashing itself lives in [`hash`] and requires the `digest` feature
//! (on by default). The types here are always available so reports can be
//! built from digests computed elsewhere.

use std::fmt;

#[cfg(feature = "digest")]
pub mod hash;

#[cfg(feature = "digest")]
pub use hash::{digest_bytes, digest_file, digest_reader};

/// A supported digest algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// MD5, 128-bit.
    Md5,
    /// SHA-1, 160-bit.
    Sha1,
    /// SHA-256, 256-bit.
    Sha256,
}

impl Algorithm {
    /// Lowercase name used as the report key.
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
        }
    }

    /// Length of the hex-encoded digest.
    pub const fn hex_len(self) -> usize {
        match self {
            Algorithm::Md5 => 32,
            Algorithm::Sha1 => 40,
            Algorithm::Sha256 => 64,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which pair of digests to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestSet {
    /// MD5 and SHA-256.
    #[default]
    Md5Sha256,
    /// MD5 and SHA-1.
    Md5Sha1,
}

impl DigestSet {
    /// Algorithms in report order.
    pub const fn algorithms(self) -> [Algorithm; 2] {
        match self {
            DigestSet::Md5Sha256 => [Algorithm::Md5, Algorithm::Sha256],
            DigestSet::Md5Sha1 => [Algorithm::Md5, Algorithm::Sha1],
        }
    }
}

/// One computed digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    /// Algorithm that produced it.
    pub algorithm: Algorithm,
    /// Lowercase hex encoding.
    pub hex: String,
}

/// The digests of one file, in report order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Digests(Vec<FileDigest>);

impl Digests {
    /// Collect already-computed digests.
    pub fn new(digests: Vec<FileDigest>) -> Self {
        Self(digests)
    }

    /// Iterate in report order.
    pub fn iter(&self) -> impl Iterator<Item = &FileDigest> {
        self.0.iter()
    }

    /// Hex digest for `algorithm`, if it was computed.
    pub fn get(&self, algorithm: Algorithm) -> Option<&str> {
        self.0
            .iter()
            .find(|d| d.algorithm == algorithm)
            .map(|d| d.hex.as_str())
    }

    /// Number of digests.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no digests are held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
