//! Timestamp-first COMB codec.

use super::{string, Codec};
use crate::{Fields, Result};

/// Codec that swaps the first 48 bits with the last 48 bits of the RFC 4122 layout.
///
/// Pairs with [`CombGenerator`](crate::generator::CombGenerator), which writes a timestamp into
/// the last six bytes: the encoded string and binary forms then lead with that timestamp, while
/// bytes 6 to 9, holding version and variant, stay in place.
///
/// # Examples
///
/// ```rust
/// use rfc4122::codec::{Codec, TimestampFirstCombCodec};
/// use rfc4122::Fields;
///
/// let fields = Fields::new([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
/// assert_eq!(
///     TimestampFirstCombCodec.encode(&fields),
///     "0a0b0c0d-0e0f-0607-0809-000102030405"
/// );
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct TimestampFirstCombCodec;

impl Codec for TimestampFirstCombCodec {
    fn encode(&self, fields: &Fields) -> String {
        string::format_hyphenated(&swap_bytes(fields.as_bytes())).to_string()
    }

    fn encode_binary(&self, fields: &Fields) -> [u8; 16] {
        swap_bytes(fields.as_bytes())
    }

    fn decode(&self, encoded: &str) -> Result<Fields> {
        string::parse(encoded).map(|e| Fields::new(swap_bytes(&e)))
    }

    fn decode_bytes(&self, bytes: &[u8]) -> Result<Fields> {
        let fields = Fields::try_from(bytes)?;
        Ok(Fields::new(swap_bytes(fields.as_bytes())))
    }
}

fn swap_bytes(src: &[u8; 16]) -> [u8; 16] {
    let mut dst = *src;
    dst[..6].copy_from_slice(&src[10..]);
    dst[10..].copy_from_slice(&src[..6]);
    dst
}

#[cfg(test)]
mod tests {
    use super::TimestampFirstCombCodec;
    use crate::codec::{Codec, StringCodec};
    use crate::Fields;

    /// Swaps first and last 48 bits in prepared cases
    #[test]
    fn swaps_first_and_last_48_bits_in_prepared_cases() {
        let cases = [
            (
                "ff6f8cb0-c57d-11e1-8b21-0800200c9a66",
                "0800200c-9a66-11e1-8b21-ff6f8cb0c57d",
            ),
            (
                "00000000-0000-4000-8000-0180a8f05b82",
                "0180a8f0-5b82-4000-8000-000000000000",
            ),
        ];
        for (standard, swapped) in cases {
            let fields = StringCodec.decode(standard).unwrap();
            assert_eq!(TimestampFirstCombCodec.encode(&fields), swapped);
            assert_eq!(
                TimestampFirstCombCodec.encode_binary(&fields),
                *StringCodec.decode(swapped).unwrap().as_bytes()
            );
            assert_eq!(TimestampFirstCombCodec.decode(swapped).unwrap(), fields);
        }
    }

    /// Matches the field-level permutation of a random value
    #[test]
    fn matches_the_field_level_permutation_of_a_random_value() {
        let fields = Fields::new(rand::random());
        let expected = format!(
            "{}{}{}{}{}{}{}",
            &fields.node()[..8],
            &fields.node()[8..],
            fields.time_hi_and_version(),
            fields.clock_seq_hi_and_reserved(),
            fields.clock_seq_low(),
            fields.time_low(),
            fields.time_mid(),
        );
        assert_eq!(
            TimestampFirstCombCodec.encode(&fields).replace('-', ""),
            expected
        );
    }

    /// Round-trips strings and bytes
    #[test]
    fn round_trips_strings_and_bytes() {
        for _ in 0..1_000 {
            let bytes: [u8; 16] = rand::random();
            let fields = TimestampFirstCombCodec.decode_bytes(&bytes).unwrap();
            assert_eq!(TimestampFirstCombCodec.encode_binary(&fields), bytes);
            let binary = TimestampFirstCombCodec.encode_binary(&fields);
            assert_eq!(TimestampFirstCombCodec.decode_bytes(&binary), Ok(fields));
            let text = TimestampFirstCombCodec.encode(&fields);
            let decoded = TimestampFirstCombCodec.decode(&text).unwrap();
            assert_eq!(decoded, fields);
            assert_eq!(TimestampFirstCombCodec.encode(&decoded), text);
        }
    }
}
