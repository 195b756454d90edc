//! Streaming digest computation (requires the `digest` feature).
//!
//! The input is read once in fixed-size chunks and every chunk is fed to all
//! hashers of the selected [`DigestSet`], so files of any size are hashed in
//! constant memory.

#![cfg(feature = "digest")]

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use sha1::Sha1;
use sha2::Sha256;
use tracing::{debug, trace};

use super::{Algorithm, DigestSet, Digests, FileDigest};
use crate::Result;

/// Read chunk size.
const CHUNK_SIZE: usize = 64 * 1024;

enum Hasher {
    Md5(md5::Context),
    Sha1(Sha1),
    Sha256(Sha256),
}

impl Hasher {
    fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Md5 => Hasher::Md5(md5::Context::new()),
            Algorithm::Sha1 => Hasher::Sha1(<Sha1 as sha1::Digest>::new()),
            Algorithm::Sha256 => Hasher::Sha256(<Sha256 as sha2::Digest>::new()),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Hasher::Md5(ctx) => ctx.consume(data),
            Hasher::Sha1(h) => sha1::Digest::update(h, data),
            Hasher::Sha256(h) => sha2::Digest::update(h, data),
        }
    }

    fn finish(self) -> FileDigest {
        let (algorithm, hex) = match self {
            Hasher::Md5(ctx) => (Algorithm::Md5, format!("{:x}", ctx.compute())),
            Hasher::Sha1(h) => (Algorithm::Sha1, hex::encode(sha1::Digest::finalize(h))),
            Hasher::Sha256(h) => (Algorithm::Sha256, hex::encode(sha2::Digest::finalize(h))),
        };
        FileDigest { algorithm, hex }
    }
}

/// Digest everything `r` yields until end of stream.
///
/// Returns [`crate::Error::OutOfMemory`] if the chunk buffer cannot be
/// allocated and [`crate::Error::Io`] if reading fails.
pub fn digest_reader<R: Read>(set: DigestSet, r: &mut R) -> Result<Digests> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(CHUNK_SIZE)?;
    buf.resize(CHUNK_SIZE, 0);

    let mut hashers = set.algorithms().map(Hasher::new);
    let mut total = 0u64;
    loop {
        let n = match r.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        for hasher in hashers.iter_mut() {
            hasher.update(&buf[..n]);
        }
        total += n as u64;
        trace!(bytes = n, "digest chunk");
    }

    let digests = Digests::new(hashers.into_iter().map(Hasher::finish).collect());
    debug!(bytes = total, ?set, "computed digests");
    Ok(digests)
}

/// Digest the whole file at `path`.
///
/// The file is opened independently of any header read and closed before
/// returning.
pub fn digest_file<P: AsRef<Path>>(set: DigestSet, path: P) -> Result<Digests> {
    let mut file = File::open(path)?;
    digest_reader(set, &mut file)
}

/// Digest an in-memory buffer.
pub fn digest_bytes(set: DigestSet, data: &[u8]) -> Result<Digests> {
    let mut r = data;
    digest_reader(set, &mut r)
}
