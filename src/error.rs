//! Library-wide error and result types.

use std::collections::TryReserveError;
use std::fmt;
use std::io;

use crate::formats::nsf::Field;

/// Result alias used throughout nsfinfo.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the library can produce.
///
/// Error messages are kept intentionally terse; the binary prints them as a
/// single diagnostic line.
#[derive(Debug)]
pub enum Error {
    /// The input file could not be opened.
    Open(io::Error),
    /// The input ended before a full header block could be read.
    ShortRead {
        /// Bytes required.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },
    /// A header block was handed over with more bytes than the fixed layout.
    InvalidLength(usize),
    /// The `NESM\x1A` magic did not match.
    BadMagic,
    /// A fixed-width text field had no NUL in its last byte.
    UnterminatedField(Field),
    /// An underlying I/O operation failed after the input was opened.
    Io(io::Error),
    /// A working buffer could not be allocated.
    OutOfMemory(TryReserveError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Open(e) => write!(f, "cannot open input: {e}"),
            Error::ShortRead { expected, actual } => {
                write!(f, "read was short: file too small ({actual} of {expected} bytes)")
            }
            Error::InvalidLength(len) => write!(f, "header block has invalid length {len}"),
            Error::BadMagic => write!(f, "file is not in NSF format"),
            Error::UnterminatedField(field) => {
                write!(f, "NSF {field} field has no trailing null")
            }
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::OutOfMemory(e) => write!(f, "allocation failed: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open(e) | Error::Io(e) => Some(e),
            Error::OutOfMemory(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<TryReserveError> for Error {
    fn from(e: TryReserveError) -> Self {
        Error::OutOfMemory(e)
    }
}

impl Error {
    /// Whether the error describes malformed or truncated input data rather
    /// than an environment failure.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Error::ShortRead { .. }
                | Error::InvalidLength(_)
                | Error::BadMagic
                | Error::UnterminatedField(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_diagnostics() {
        assert_eq!(Error::BadMagic.to_string(), "file is not in NSF format");
        assert_eq!(
            Error::UnterminatedField(Field::Artist).to_string(),
            "NSF artist field has no trailing null"
        );
        assert_eq!(
            Error::ShortRead {
                expected: 128,
                actual: 3
            }
            .to_string(),
            "read was short: file too small (3 of 128 bytes)"
        );
    }

    #[test]
    fn data_errors_are_classified() {
        assert!(Error::BadMagic.is_data_error());
        assert!(Error::InvalidLength(129).is_data_error());
        assert!(!Error::Io(io::Error::other("boom")).is_data_error());
        assert!(!Error::Open(io::Error::from(io::ErrorKind::NotFound)).is_data_error());
    }

    #[test]
    fn io_errors_expose_source() {
        use std::error::Error as _;
        let err = Error::from(io::Error::other("disk"));
        assert!(err.source().is_some());
        assert!(Error::BadMagic.source().is_none());
    }
}
