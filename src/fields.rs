//! Field-level view of the 16-byte layout.
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          time_low                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |       time_mid                |         time_hi_and_version   |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |clk_seq_hi_res |  clk_seq_low  |         node (0-1)            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                         node (2-5)                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use fstr::FStr;

use crate::types::hex_fstr;
use crate::{Error, Hexadecimal, Result};

/// Layout family marker stored in the top bits of byte 8.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Variant {
    /// `0xx`: reserved, NCS backward compatibility.
    ReservedNcs = 0,
    /// `10x`: the layout specified by RFC 4122.
    Rfc4122 = 2,
    /// `110`: reserved, Microsoft Corporation backward compatibility.
    ReservedMicrosoft = 6,
    /// `111`: reserved for future definition.
    ReservedFuture = 7,
}

impl Variant {
    /// Reads the variant from the value of byte 8.
    pub const fn from_octet(octet: u8) -> Self {
        match octet >> 5 {
            0b000..=0b011 => Self::ReservedNcs,
            0b100 | 0b101 => Self::Rfc4122,
            0b110 => Self::ReservedMicrosoft,
            _ => Self::ReservedFuture,
        }
    }
}

/// Generation algorithm marker held in the high nibble of byte 6 of RFC 4122 identifiers.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Version {
    Time = 1,
    DceSecurity = 2,
    HashMd5 = 3,
    Random = 4,
    HashSha1 = 5,
    ReorderedTime = 6,
    UnixTime = 7,
    Custom = 8,
}

impl Version {
    /// Returns the version whose number is `n`, if any.
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Time),
            2 => Some(Self::DceSecurity),
            3 => Some(Self::HashMd5),
            4 => Some(Self::Random),
            5 => Some(Self::HashSha1),
            6 => Some(Self::ReorderedTime),
            7 => Some(Self::UnixTime),
            8 => Some(Self::Custom),
            _ => None,
        }
    }

    /// Returns the number stored in the version nibble.
    pub const fn number(self) -> u8 {
        self as u8
    }
}

/// A read-only view over exactly 16 bytes exposing the RFC 4122 sub-fields.
///
/// Each accessor returns a fixed-width, zero-padded, lowercase hexadecimal string.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Fields([u8; 16]);

impl Fields {
    /// Wraps a 16-byte array.
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn time_low(&self) -> FStr<8> {
        hex_fstr(&self.0[0..4])
    }

    pub fn time_mid(&self) -> FStr<4> {
        hex_fstr(&self.0[4..6])
    }

    pub fn time_hi_and_version(&self) -> FStr<4> {
        hex_fstr(&self.0[6..8])
    }

    pub fn clock_seq_hi_and_reserved(&self) -> FStr<2> {
        hex_fstr(&self.0[8..9])
    }

    pub fn clock_seq_low(&self) -> FStr<2> {
        hex_fstr(&self.0[9..10])
    }

    pub fn node(&self) -> FStr<12> {
        hex_fstr(&self.0[10..16])
    }

    /// Returns the 14-bit clock sequence with the variant bits masked out.
    pub fn clock_seq(&self) -> FStr<4> {
        hex_fstr(&[self.0[8] & 0x3f, self.0[9]])
    }

    pub const fn variant(&self) -> Variant {
        Variant::from_octet(self.0[8])
    }

    /// Returns the version, or `None` if the variant is not [`Variant::Rfc4122`] or the nibble
    /// does not name a known version.
    pub const fn version(&self) -> Option<Version> {
        match self.variant() {
            Variant::Rfc4122 => Version::from_number(self.0[6] >> 4),
            _ => None,
        }
    }

    /// Returns the 60-bit Gregorian timestamp embedded in a version 1, 2, or 6 identifier.
    ///
    /// Fails with [`Error::UnsupportedOperation`] for any other version.
    pub fn timestamp(&self) -> Result<Hexadecimal> {
        let b = &self.0;
        let ordered = match self.version() {
            Some(Version::Time | Version::DceSecurity) => [
                b[6] & 0x0f,
                b[7],
                b[4],
                b[5],
                b[0],
                b[1],
                b[2],
                b[3],
            ],
            Some(Version::ReorderedTime) => {
                let hi = u64::from_be_bytes([0, 0, b[0], b[1], b[2], b[3], b[4], b[5]]);
                let lo = u16::from_be_bytes([b[6] & 0x0f, b[7]]) as u64;
                ((hi << 12) | lo).to_be_bytes()
            }
            _ => {
                return Err(Error::unsupported(
                    "not a time-based identifier with a Gregorian timestamp",
                ))
            }
        };
        Hexadecimal::from_bytes(&ordered).pad(15)
    }

    /// Returns `true` if all bits are zero.
    pub fn is_nil(&self) -> bool {
        self.0 == [0x00; 16]
    }

    /// Returns `true` if all bits are one.
    pub fn is_max(&self) -> bool {
        self.0 == [0xff; 16]
    }
}

impl TryFrom<&[u8]> for Fields {
    type Error = Error;

    /// Fails with [`Error::InvalidArgument`] unless given exactly 16 bytes.
    fn try_from(src: &[u8]) -> Result<Self> {
        <[u8; 16]>::try_from(src)
            .map(Self)
            .map_err(|_| Error::invalid_argument(format!("expected 16 bytes, got {}", src.len())))
    }
}

impl From<[u8; 16]> for Fields {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl From<Fields> for [u8; 16] {
    fn from(src: Fields) -> Self {
        src.0
    }
}
