//! NSF (NES Sound Format) - ripped NES/Famicom soundtrack.
//!
//! An NSF file is a fixed 0x80-byte header followed by 6502 driver code and
//! music data. Only the header is understood here; the program image is
//! opaque.
//!
//! ## Layout
//! ```text
//! [0x00] Magic "NESM" 0x1A          (5 bytes)
//! [0x05] Version                    (u8)
//! [0x06] Total songs                (u8)
//! [0x07] Starting song, 1-based     (u8)
//! [0x08] Load address               (u16 LE)
//! [0x0A] Init address               (u16 LE)
//! [0x0C] Play address               (u16 LE)
//! [0x0E] Song name                  (32 bytes, NUL-terminated)
//! [0x2E] Artist                     (32 bytes, NUL-terminated)
//! [0x4E] Copyright holder           (32 bytes, NUL-terminated)
//! [0x6E] NTSC play speed, 1/1µs     (u16 LE)
//! [0x70] Bankswitch init values     (8 bytes)
//! [0x78] PAL play speed, 1/1µs      (u16 LE)
//! [0x7A] PAL/NTSC bits              (u8)
//! [0x7B] Extra sound chip support   (u8)
//! [0x7C] Reserved                   (4 bytes)
//! ```
//!
//! ## Notes
//! * The last byte of every text field must be NUL. Bytes after the first
//!   NUL are padding; they are kept in [`FixedStr`] but never displayed.
//! * The bankswitch block is eight independent bank numbers, not an
//!   integer, and is stored as a byte array.
//! * NSF2 and NSFe extensions are not interpreted.

use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use bitflags::bitflags;
use tracing::debug;

use crate::utils::{bytesa, c_str, le_u16, magic, read_block, u8};
use crate::{Error, Result};

/// Size of the fixed NSF header in bytes.
pub const HEADER_SIZE: usize = 0x80;

/// Magic tag at offset 0.
pub const MAGIC: &[u8; 5] = b"NESM\x1a";

/// Width of each text field, terminator included.
pub const TEXT_FIELD_SIZE: usize = 32;

/// One of the three fixed-width text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Song name at 0x0E.
    Name,
    /// Artist at 0x2E.
    Artist,
    /// Copyright holder at 0x4E.
    Copyright,
}

impl Field {
    /// All text fields in header order.
    pub const ALL: [Field; 3] = [Field::Name, Field::Artist, Field::Copyright];

    /// Byte offset of the field within the header.
    pub const fn offset(self) -> usize {
        match self {
            Field::Name => 0x0E,
            Field::Artist => 0x2E,
            Field::Copyright => 0x4E,
        }
    }

    /// Offset of the byte that must hold the terminating NUL.
    pub const fn terminator_offset(self) -> usize {
        self.offset() + TEXT_FIELD_SIZE - 1
    }

    /// Lowercase field name as used in reports and diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Artist => "artist",
            Field::Copyright => "copyright",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 32-byte NUL-padded text field, stored verbatim.
///
/// The text is the bytes before the first NUL. No character encoding is
/// assumed; most rips are ASCII, some carry Shift-JIS or Latin-1.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FixedStr([u8; TEXT_FIELD_SIZE]);

impl FixedStr {
    /// Wrap a raw field exactly as it appears in the file.
    pub const fn from_raw(raw: [u8; TEXT_FIELD_SIZE]) -> Self {
        Self(raw)
    }

    /// Build a terminated field from `text`, padding with NUL.
    ///
    /// Returns [`None`] if `text` does not leave room for the terminator.
    pub fn new(text: &[u8]) -> Option<Self> {
        if text.len() >= TEXT_FIELD_SIZE {
            return None;
        }
        let mut raw = [0u8; TEXT_FIELD_SIZE];
        raw[..text.len()].copy_from_slice(text);
        Some(Self(raw))
    }

    /// All 32 stored bytes, padding included.
    pub fn raw(&self) -> &[u8; TEXT_FIELD_SIZE] {
        &self.0
    }

    /// The meaningful text: bytes before the first NUL.
    pub fn as_bytes(&self) -> &[u8] {
        c_str(&self.0)
    }

    /// The text decoded as UTF-8, replacing invalid sequences.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Whether the last byte holds a NUL terminator.
    pub fn is_terminated(&self) -> bool {
        self.0[TEXT_FIELD_SIZE - 1] == 0
    }
}

impl fmt::Debug for FixedStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_string_lossy(), f)
    }
}

/// Video standard the tune was ripped for, from bits 0-1 of the region byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// NTSC only.
    Ntsc,
    /// PAL only.
    Pal,
    /// Plays on both.
    Dual,
}

impl Region {
    /// Interpret a raw region byte. Bits above 1 are ignored.
    pub fn from_bits(bits: u8) -> Self {
        if bits & 0x02 != 0 {
            Region::Dual
        } else if bits & 0x01 != 0 {
            Region::Pal
        } else {
            Region::Ntsc
        }
    }
}

bitflags! {
    /// Expansion audio chips the tune drives (the extra sound byte).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ExpansionAudio: u8 {
        /// Konami VRC6
        const VRC6 = 0x01;
        /// Konami VRC7
        const VRC7 = 0x02;
        /// Famicom Disk System wavetable
        const FDS = 0x04;
        /// Nintendo MMC5
        const MMC5 = 0x08;
        /// Namco 163
        const NAMCO_163 = 0x10;
        /// Sunsoft 5B
        const SUNSOFT_5B = 0x20;
    }
}

/// Decoded NSF header.
///
/// Produced by [`NsfHeader::decode`] and friends; every value is taken
/// verbatim from its fixed offset. The magic tag is not stored since a
/// decoded header always carries [`MAGIC`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NsfHeader {
    /// Format version.
    pub version: u8,
    /// Total number of songs.
    pub song_count: u8,
    /// Default song, 1-based.
    pub song_start: u8,
    /// Address the program image is loaded at.
    pub load_addr: u16,
    /// Init routine address.
    pub init_addr: u16,
    /// Play routine address.
    pub play_addr: u16,
    /// Song name.
    pub name: FixedStr,
    /// Artist.
    pub artist: FixedStr,
    /// Copyright holder.
    pub copyright: FixedStr,
    /// NTSC play routine period in microseconds.
    pub speed_ntsc: u16,
    /// Initial bank numbers for $8000-$FFFF, one per 4 KiB slot.
    pub bankswitch: [u8; 8],
    /// PAL play routine period in microseconds.
    pub speed_pal: u16,
    /// Raw PAL/NTSC bits; see [`Region`].
    pub region: u8,
    /// Raw expansion audio bits; see [`ExpansionAudio`].
    pub extra_sound: u8,
    /// Reserved bytes, kept verbatim.
    pub reserved: [u8; 4],
}

impl NsfHeader {
    /// Decode a header block.
    ///
    /// Checks run in a fixed order and stop at the first failure: the magic
    /// tag, then the name, artist and copyright terminators at their declared
    /// offsets. Nothing is decoded until every check has passed.
    pub fn decode(block: &[u8; HEADER_SIZE]) -> Result<Self> {
        let mut r: &[u8] = block;

        magic(&mut r, MAGIC)?;
        for field in Field::ALL {
            if block[field.terminator_offset()] != 0 {
                return Err(Error::UnterminatedField(field));
            }
        }

        let header = Self {
            version: u8(&mut r)?,
            song_count: u8(&mut r)?,
            song_start: u8(&mut r)?,
            load_addr: le_u16(&mut r)?,
            init_addr: le_u16(&mut r)?,
            play_addr: le_u16(&mut r)?,
            name: FixedStr(bytesa(&mut r)?),
            artist: FixedStr(bytesa(&mut r)?),
            copyright: FixedStr(bytesa(&mut r)?),
            speed_ntsc: le_u16(&mut r)?,
            bankswitch: bytesa(&mut r)?,
            speed_pal: le_u16(&mut r)?,
            region: u8(&mut r)?,
            extra_sound: u8(&mut r)?,
            reserved: bytesa(&mut r)?,
        };
        debug_assert!(r.is_empty());

        debug!(
            version = header.version,
            songs = header.song_count,
            start = header.song_start,
            name = %header.name.to_string_lossy(),
            "decoded NSF header"
        );
        Ok(header)
    }

    /// Decode a header from a slice that must hold exactly [`HEADER_SIZE`]
    /// bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        match <&[u8; HEADER_SIZE]>::try_from(data) {
            Ok(block) => Self::decode(block),
            Err(_) if data.len() < HEADER_SIZE => Err(Error::ShortRead {
                expected: HEADER_SIZE,
                actual: data.len(),
            }),
            Err(_) => Err(Error::InvalidLength(data.len())),
        }
    }

    /// Read and decode a header from `r`.
    ///
    /// The reader must be positioned at the start of the file. Exactly
    /// [`HEADER_SIZE`] bytes are consumed on success.
    pub fn parse<R: Read>(r: &mut R) -> Result<Self> {
        let block = read_header(r)?;
        Self::decode(&block)
    }

    /// Open `path`, read its header and decode it.
    ///
    /// The file is closed before this returns, whatever the outcome.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path).map_err(Error::Open)?;
        Self::parse(&mut file)
    }

    /// Lay the header back out in its on-disk form.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0x00..0x05].copy_from_slice(MAGIC);
        out[0x05] = self.version;
        out[0x06] = self.song_count;
        out[0x07] = self.song_start;
        out[0x08..0x0A].copy_from_slice(&self.load_addr.to_le_bytes());
        out[0x0A..0x0C].copy_from_slice(&self.init_addr.to_le_bytes());
        out[0x0C..0x0E].copy_from_slice(&self.play_addr.to_le_bytes());
        for field in Field::ALL {
            let start = field.offset();
            out[start..start + TEXT_FIELD_SIZE].copy_from_slice(self.text(field).raw());
        }
        out[0x6E..0x70].copy_from_slice(&self.speed_ntsc.to_le_bytes());
        out[0x70..0x78].copy_from_slice(&self.bankswitch);
        out[0x78..0x7A].copy_from_slice(&self.speed_pal.to_le_bytes());
        out[0x7A] = self.region;
        out[0x7B] = self.extra_sound;
        out[0x7C..0x80].copy_from_slice(&self.reserved);
        out
    }

    /// Look up a text field by name.
    pub fn text(&self, field: Field) -> &FixedStr {
        match field {
            Field::Name => &self.name,
            Field::Artist => &self.artist,
            Field::Copyright => &self.copyright,
        }
    }

    /// Video standard from the region byte.
    pub fn region_kind(&self) -> Region {
        Region::from_bits(self.region)
    }

    /// Expansion chips flagged in the extra sound byte. Unknown bits are
    /// dropped here but remain in [`NsfHeader::extra_sound`].
    pub fn expansion_audio(&self) -> ExpansionAudio {
        ExpansionAudio::from_bits_truncate(self.extra_sound)
    }

    /// Whether the tune uses bankswitching (any non-zero bank value).
    pub fn uses_bankswitching(&self) -> bool {
        self.bankswitch.iter().any(|&b| b != 0)
    }

    /// NTSC play routine rate in Hz, if a speed is set.
    pub fn ntsc_rate_hz(&self) -> Option<f64> {
        rate_hz(self.speed_ntsc)
    }

    /// PAL play routine rate in Hz, if a speed is set.
    pub fn pal_rate_hz(&self) -> Option<f64> {
        rate_hz(self.speed_pal)
    }
}

fn rate_hz(period_us: u16) -> Option<f64> {
    (period_us != 0).then(|| 1_000_000.0 / f64::from(period_us))
}

/// Read the raw header block from the start of `r`.
///
/// Fails with [`Error::ShortRead`] if the stream ends first; no format
/// check is made.
pub fn read_header<R: Read>(r: &mut R) -> Result<[u8; HEADER_SIZE]> {
    read_block::<HEADER_SIZE, _>(r)
}
