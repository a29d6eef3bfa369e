//! Transforms between [`Fields`] and their textual and binary representations.
//!
//! The [`StringCodec`] maps fields to the canonical 8-4-4-4-12 string and to the big-endian byte
//! order of RFC 4122. The other codecs keep the same textual grammar but permute the bytes:
//!
//! - [`TimestampFirstCombCodec`] swaps the first and the last 48 bits so that identifiers whose
//!   trailing bytes hold a timestamp (see [`CombGenerator`](crate::generator::CombGenerator))
//!   sort by creation time in their string and binary forms.
//! - [`GuidStringCodec`] stores the first three fields little-endian in the binary form, as
//!   Microsoft GUIDs do.

use std::fmt;

use crate::{Fields, Result};

mod comb;
pub use comb::TimestampFirstCombCodec;

mod guid;
pub use guid::GuidStringCodec;

mod string;
pub use string::StringCodec;
pub(crate) use string::parse_hyphenated;

/// A pluggable mapping between [`Fields`] and external representations.
///
/// For any codec, `encode(decode(s)) == s` holds for every string `s` the codec itself produced,
/// and `decode_bytes(encode_binary(f)) == f` holds for all fields `f`.
pub trait Codec: fmt::Debug + Send + Sync {
    /// Returns the string representation of `fields`.
    fn encode(&self, fields: &Fields) -> String;

    /// Returns the binary representation of `fields`.
    fn encode_binary(&self, fields: &Fields) -> [u8; 16];

    /// Parses a string representation.
    ///
    /// Fails with [`Error::InvalidFormat`](crate::Error::InvalidFormat) if `encoded` does not
    /// match an accepted pattern.
    fn decode(&self, encoded: &str) -> Result<Fields>;

    /// Reads a binary representation.
    ///
    /// Fails with [`Error::InvalidArgument`](crate::Error::InvalidArgument) unless given exactly
    /// 16 bytes.
    fn decode_bytes(&self, bytes: &[u8]) -> Result<Fields>;
}
