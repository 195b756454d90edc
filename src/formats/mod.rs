//! Parsers for NES binary formats.
//!
//! Parsers follow the same conventions:
//!
//! * **Generic over** [`std::io::Read`] - pass a [`std::fs::File`], a
//!   [`std::io::Cursor`], a byte slice, or anything else that implements it.
//! * **Header only** - the `parse` method reads the fixed header and builds
//!   an in-memory description of it. Program data is never loaded.
//! * **Validate, then decode** - every structural check runs before any
//!   field is extracted, so a failed parse never yields a partial record.
//!
//! ## Format overview
//!
//! | Module  | Format | Description |
//! |---------|--------|-------------|
//! | [`nsf`] | NSF    | NES Sound Format: 6502 music driver plus a 128-byte metadata header |

pub mod nsf;
