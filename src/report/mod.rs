//! Rendering of a decoded header and its digests.
//!
//! Two formats are produced from the same field table, so they always carry
//! the same values:
//!
//! * **Text** - one `key = value` line per field. Addresses and speeds are
//!   4 hex digits, single bytes 2, counts are decimal and text fields are
//!   printed raw between quotes.
//! * **JSON** - an object with an `"nsf"` member holding the header and a
//!   `"metadata"` member holding the digests. Counts are numbers, all other
//!   header values are hex strings, text goes through [`escape::escape_json`].
//!
//! Reports are rendered only from fully decoded headers, so there is no
//! partial output path.

use std::io::{self, Write};

use crate::digest::Digests;
use crate::formats::nsf::{FixedStr, NsfHeader};

pub mod escape;

use escape::escape_json;

/// Width of the key column in text output, separator space included.
const KEY_WIDTH: usize = 13;

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `key = value` lines.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

enum Value<'a> {
    Dec(u8),
    Hex(String),
    Text(&'a FixedStr),
}

/// A header plus digests, ready to print.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    header: &'a NsfHeader,
    digests: &'a Digests,
}

impl<'a> Report<'a> {
    /// Pair a decoded header with the digests of its file.
    pub fn new(header: &'a NsfHeader, digests: &'a Digests) -> Self {
        Self { header, digests }
    }

    fn fields(&self) -> [(&'static str, Value<'a>); 15] {
        let h = self.header;
        [
            ("version", Value::Dec(h.version)),
            ("song_count", Value::Dec(h.song_count)),
            ("song_start", Value::Dec(h.song_start)),
            ("load_addr", Value::Hex(format!("{:04x}", h.load_addr))),
            ("init_addr", Value::Hex(format!("{:04x}", h.init_addr))),
            ("play_addr", Value::Hex(format!("{:04x}", h.play_addr))),
            ("name", Value::Text(&h.name)),
            ("artist", Value::Text(&h.artist)),
            ("copyright", Value::Text(&h.copyright)),
            ("speed_ntsc", Value::Hex(format!("{:04x}", h.speed_ntsc))),
            ("bankswitch", Value::Hex(hex_bytes(&h.bankswitch))),
            ("speed_pal", Value::Hex(format!("{:04x}", h.speed_pal))),
            ("region", Value::Hex(format!("{:02x}", h.region))),
            ("extra_sound", Value::Hex(format!("{:02x}", h.extra_sound))),
            ("reserved", Value::Hex(hex_bytes(&h.reserved))),
        ]
    }

    /// Write the `key = value` report.
    pub fn write_text<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for (key, value) in self.fields() {
            write!(w, "{key:<KEY_WIDTH$}= ")?;
            match value {
                Value::Dec(n) => write!(w, "{n}")?,
                Value::Hex(s) => w.write_all(s.as_bytes())?,
                Value::Text(text) => {
                    w.write_all(b"\"")?;
                    w.write_all(text.as_bytes())?;
                    w.write_all(b"\"")?;
                }
            }
            writeln!(w)?;
        }
        for digest in self.digests.iter() {
            writeln!(w, "{:<KEY_WIDTH$}= {}", digest.algorithm.name(), digest.hex)?;
        }
        Ok(())
    }

    /// Write the JSON report.
    pub fn write_json<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "{{")?;
        writeln!(w, "  \"nsf\": {{")?;
        let fields = self.fields();
        let last = fields.len() - 1;
        for (i, (key, value)) in fields.into_iter().enumerate() {
            let sep = if i == last { "" } else { "," };
            match value {
                Value::Dec(n) => writeln!(w, "    \"{key}\": {n}{sep}")?,
                Value::Hex(s) => writeln!(w, "    \"{key}\": \"{s}\"{sep}")?,
                Value::Text(text) => {
                    writeln!(w, "    \"{key}\": \"{}\"{sep}", escape_json(text.raw()))?
                }
            }
        }
        writeln!(w, "  }},")?;
        writeln!(w, "  \"metadata\": {{")?;
        let count = self.digests.len();
        for (i, digest) in self.digests.iter().enumerate() {
            let sep = if i + 1 == count { "" } else { "," };
            writeln!(w, "    \"{}\": \"{}\"{sep}", digest.algorithm.name(), digest.hex)?;
        }
        writeln!(w, "  }}")?;
        writeln!(w, "}}")?;
        Ok(())
    }

    /// Write the report in `format`.
    pub fn write<W: Write>(&self, format: OutputFormat, w: &mut W) -> io::Result<()> {
        match format {
            OutputFormat::Text => self.write_text(w),
            OutputFormat::Json => self.write_json(w),
        }
    }

    /// Render the whole report into memory.
    pub fn render(&self, format: OutputFormat) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(1024);
        self.write(format, &mut out)?;
        Ok(out)
    }
}

/// Bytes as one lowercase hex string, in stored order.
fn hex_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
