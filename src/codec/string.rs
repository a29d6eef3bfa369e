//! The standard codec.

use fstr::FStr;

use super::Codec;
use crate::{Error, Fields, Result};

/// Codec producing the canonical 8-4-4-4-12 lowercase string and the RFC 4122 byte order.
///
/// Decoding accepts, case-insensitively, 32 bare hexadecimal digits, the dashed 8-4-4-4-12 form,
/// the dashed form wrapped in braces, and the dashed form prefixed with `urn:uuid:`.
///
/// # Examples
///
/// ```rust
/// use rfc4122::codec::{Codec, StringCodec};
///
/// let fields = StringCodec.decode("{FF6F8CB0-C57D-11E1-8B21-0800200C9A66}")?;
/// assert_eq!(StringCodec.encode(&fields), "ff6f8cb0-c57d-11e1-8b21-0800200c9a66");
/// # Ok::<(), rfc4122::Error>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct StringCodec;

impl Codec for StringCodec {
    fn encode(&self, fields: &Fields) -> String {
        format_hyphenated(fields.as_bytes()).to_string()
    }

    fn encode_binary(&self, fields: &Fields) -> [u8; 16] {
        *fields.as_bytes()
    }

    fn decode(&self, encoded: &str) -> Result<Fields> {
        parse(encoded).map(Fields::new)
    }

    fn decode_bytes(&self, bytes: &[u8]) -> Result<Fields> {
        Fields::try_from(bytes)
    }
}

/// Returns the 8-4-4-4-12 lowercase hexadecimal representation of `bytes`.
pub(crate) fn format_hyphenated(bytes: &[u8; 16]) -> FStr<36> {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";

    let mut buffer = [0u8; 36];
    let mut j = 0;
    for (i, e) in bytes.iter().enumerate() {
        buffer[j] = DIGITS[(e >> 4) as usize];
        buffer[j + 1] = DIGITS[(e & 15) as usize];
        j += 2;
        if i == 3 || i == 5 || i == 7 || i == 9 {
            buffer[j] = b'-';
            j += 1;
        }
    }
    debug_assert!(buffer.is_ascii());
    unsafe { FStr::from_bytes_unchecked(buffer) }
}

/// Parses the dashed 8-4-4-4-12 form, accepting upper- and lowercase digits.
pub(crate) fn parse_hyphenated(src: &str) -> Option<[u8; 16]> {
    let mut dst = [0u8; 16];
    let mut iter = src.chars();
    for (i, e) in dst.iter_mut().enumerate() {
        let hi = iter.next()?.to_digit(16)? as u8;
        let lo = iter.next()?.to_digit(16)? as u8;
        *e = (hi << 4) | lo;
        if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next()? != '-' {
            return None;
        }
    }
    iter.next().is_none().then_some(dst)
}

fn parse_simple(src: &str) -> Option<[u8; 16]> {
    let mut dst = [0u8; 16];
    let mut iter = src.chars();
    for e in dst.iter_mut() {
        let hi = iter.next()?.to_digit(16)? as u8;
        let lo = iter.next()?.to_digit(16)? as u8;
        *e = (hi << 4) | lo;
    }
    iter.next().is_none().then_some(dst)
}

/// Parses any of the accepted textual forms.
pub(super) fn parse(src: &str) -> Result<[u8; 16]> {
    const URN_PREFIX: &str = "urn:uuid:";

    let bytes = if src.len() == 32 {
        parse_simple(src)
    } else if let Some(inner) = src.strip_prefix('{').and_then(|e| e.strip_suffix('}')) {
        parse_hyphenated(inner)
    } else if src
        .get(..URN_PREFIX.len())
        .is_some_and(|e| e.eq_ignore_ascii_case(URN_PREFIX))
    {
        parse_hyphenated(&src[URN_PREFIX.len()..])
    } else {
        parse_hyphenated(src)
    };
    bytes.ok_or_else(|| Error::invalid_format(format!("invalid UUID string: '{src}'")))
}

#[cfg(test)]
mod tests {
    use super::{Codec, StringCodec};
    use crate::{ErrorKind, Fields};

    /// Decodes every accepted form to the same fields
    #[test]
    fn decodes_every_accepted_form_to_the_same_fields() {
        let expected = Fields::new([
            0xff, 0x6f, 0x8c, 0xb0, 0xc5, 0x7d, 0x11, 0xe1, 0x8b, 0x21, 0x08, 0x00, 0x20, 0x0c,
            0x9a, 0x66,
        ]);
        let cases = [
            "ff6f8cb0-c57d-11e1-8b21-0800200c9a66",
            "ff6f8cb0c57d11e18b210800200c9a66",
            "{ff6f8cb0-c57d-11e1-8b21-0800200c9a66}",
            "urn:uuid:ff6f8cb0-c57d-11e1-8b21-0800200c9a66",
        ];
        for e in cases {
            assert_eq!(StringCodec.decode(e), Ok(expected), "{e}");
            assert_eq!(StringCodec.decode(&e.to_uppercase()), Ok(expected), "{e}");
        }
        assert_eq!(
            StringCodec.encode(&expected),
            "ff6f8cb0-c57d-11e1-8b21-0800200c9a66"
        );
    }

    /// Returns error to invalid string representation
    #[test]
    fn returns_error_to_invalid_string_representation() {
        let cases = [
            "",
            "foobar",
            " ff6f8cb0-c57d-11e1-8b21-0800200c9a66",
            "ff6f8cb0-c57d-11e1-8b21-0800200c9a66 ",
            "gf6f8cb0-c57d-51e1-bb21-0800200c9a66",
            "ff6f8cb0-c57d11e1-8b21-0800200c9a66",
            "ff6f8cb0-c57d-11e1-8b21_0800200c9a66",
            "ff6f8cb0c57d11e18b210800200c9a6",
            "ff6f8cb0c57d11e18b210800200c9a666",
            "{ff6f8cb0c57d11e18b210800200c9a66}",
            "{ff6f8cb0-c57d-11e1-8b21-0800200c9a66",
            "urn:uuid:ff6f8cb0c57d11e18b210800200c9a66",
            "uuid:ff6f8cb0-c57d-11e1-8b21-0800200c9a66",
            "+f6f8cb0-c57d-11e1-8b21-0800200c9a66",
        ];
        for e in cases {
            assert_eq!(
                StringCodec.decode(e).unwrap_err().kind(),
                ErrorKind::InvalidFormat,
                "{e}"
            );
        }
    }

    /// Round-trips canonical strings and random byte sequences
    #[test]
    fn round_trips_canonical_strings_and_random_byte_sequences() {
        for _ in 0..1_000 {
            let bytes: [u8; 16] = rand::random();
            let fields = StringCodec.decode_bytes(&bytes).unwrap();
            assert_eq!(StringCodec.encode_binary(&fields), bytes);
            let text = StringCodec.encode(&fields);
            assert_eq!(StringCodec.encode(&StringCodec.decode(&text).unwrap()), text);
        }
    }

    /// Rejects byte sequences of the wrong length
    #[test]
    fn rejects_byte_sequences_of_the_wrong_length() {
        assert_eq!(
            StringCodec.decode_bytes(&[0; 15]).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }
}
