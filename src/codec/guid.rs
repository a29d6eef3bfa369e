//! Microsoft GUID codec.

use super::{string, Codec};
use crate::{Fields, Result};

/// Codec whose binary form stores `time_low`, `time_mid`, and `time_hi_and_version`
/// little-endian, as in the in-memory layout of Microsoft GUIDs.
///
/// The textual form is the canonical one.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct GuidStringCodec;

impl Codec for GuidStringCodec {
    fn encode(&self, fields: &Fields) -> String {
        string::format_hyphenated(fields.as_bytes()).to_string()
    }

    fn encode_binary(&self, fields: &Fields) -> [u8; 16] {
        swap_endianness(fields.as_bytes())
    }

    fn decode(&self, encoded: &str) -> Result<Fields> {
        string::parse(encoded).map(Fields::new)
    }

    fn decode_bytes(&self, bytes: &[u8]) -> Result<Fields> {
        let fields = Fields::try_from(bytes)?;
        Ok(Fields::new(swap_endianness(fields.as_bytes())))
    }
}

fn swap_endianness(src: &[u8; 16]) -> [u8; 16] {
    let mut dst = *src;
    dst[0..4].reverse();
    dst[4..6].reverse();
    dst[6..8].reverse();
    dst
}
