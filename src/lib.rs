//! **nsfinfo** - inspect NES Sound Format (NSF) files.
//!
//! The crate decodes and validates the fixed 128-byte NSF header,
//! fingerprints the whole file with a pair of digests, and renders both as a
//! plain-text or JSON report.
//!
//! # Modules
//! | Module | Purpose |
//! |--------|---------|
//! | [`formats::nsf`] | Header layout, validation and decoding |
//! | [`digest`]       | MD5 / SHA-1 / SHA-256 whole-file digests |
//! | [`report`]       | Text and JSON rendering, JSON string escaping |
//!
//! # Example
//! ```no_run
//! use nsfinfo::digest::{self, DigestSet};
//! use nsfinfo::formats::nsf::NsfHeader;
//! use nsfinfo::report::{OutputFormat, Report};
//!
//! # fn main() -> nsfinfo::Result<()> {
//! let header = NsfHeader::open("smb.nsf")?;
//! let digests = digest::digest_file(DigestSet::default(), "smb.nsf")?;
//! let out = Report::new(&header, &digests).render(OutputFormat::Json)?;
//! print!("{}", String::from_utf8_lossy(&out));
//! # Ok(())
//! # }
//! ```

pub mod digest;
pub mod error;
pub mod formats;
pub mod report;
mod utils;

pub use error::{Error, Result};
