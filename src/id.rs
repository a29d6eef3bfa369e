use std::{cmp, fmt, hash, sync::Arc};

use crate::codec::Codec;
use crate::converter::{NumberConverter, TimeConverter};
use crate::{Decimal, Error, Fields, Hexadecimal, Result, Time, Variant, Version};

/// Nil UUID, with all 128 bits set to zero.
pub const NIL: &str = "00000000-0000-0000-0000-000000000000";

/// Max UUID, with all 128 bits set to one.
pub const MAX: &str = "ffffffff-ffff-ffff-ffff-ffffffffffff";

/// Namespace for fully-qualified domain names.
pub const NAMESPACE_DNS: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";

/// Namespace for URLs.
pub const NAMESPACE_URL: &str = "6ba7b811-9dad-11d1-80b4-00c04fd430c8";

/// Namespace for ISO object identifiers.
pub const NAMESPACE_OID: &str = "6ba7b812-9dad-11d1-80b4-00c04fd430c8";

/// Namespace for X.500 distinguished names.
pub const NAMESPACE_X500: &str = "6ba7b814-9dad-11d1-80b4-00c04fd430c8";

/// Represents a Universally Unique IDentifier.
///
/// A value is immutable and carries the [`Codec`], [`NumberConverter`], and [`TimeConverter`]
/// that were in effect when it was built, so its string, binary, integer, and time views stay
/// stable even if the factory that created it is reconfigured afterwards.
///
/// Equality and hashing consider the 128-bit field payload only. Two values with the same fields
/// are equal even if they were built with different codecs. Distinct values are ordered by the
/// binary representation of their codecs.
///
/// # Examples
///
/// ```rust
/// use rfc4122::{UuidFactory, Version};
///
/// let factory = UuidFactory::new();
/// let uuid = factory.from_string("ff6f8cb0-c57d-11e1-8b21-0800200c9a66")?;
/// assert_eq!(uuid.version(), Some(Version::Time));
/// assert_eq!(uuid.urn(), "urn:uuid:ff6f8cb0-c57d-11e1-8b21-0800200c9a66");
/// assert_eq!(uuid.integer()?.as_str(), "339532337419071774304650190139318639206");
/// assert_eq!(uuid.timestamp()?.seconds(), 1_341_368_074);
/// # Ok::<(), rfc4122::Error>(())
/// ```
#[derive(Clone)]
pub struct Uuid {
    fields: Fields,
    codec: Arc<dyn Codec>,
    number_converter: Arc<dyn NumberConverter>,
    time_converter: Arc<dyn TimeConverter>,
}

impl Uuid {
    /// Creates a value from fields and the collaborators that render it.
    ///
    /// Values are usually obtained from a [`UuidFactory`](crate::UuidFactory) or a
    /// [`UuidBuilder`](crate::UuidBuilder) instead.
    pub fn new(
        fields: Fields,
        codec: Arc<dyn Codec>,
        number_converter: Arc<dyn NumberConverter>,
        time_converter: Arc<dyn TimeConverter>,
    ) -> Self {
        Self {
            fields,
            codec,
            number_converter,
            time_converter,
        }
    }

    /// Returns the RFC 4122 field view.
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }

    pub const fn version(&self) -> Option<Version> {
        self.fields.version()
    }

    pub const fn variant(&self) -> Variant {
        self.fields.variant()
    }

    /// Returns the binary representation produced by the bound codec.
    pub fn bytes(&self) -> [u8; 16] {
        self.codec.encode_binary(&self.fields)
    }

    /// Returns 32 lowercase hexadecimal digits of [`bytes`](Self::bytes).
    pub fn hex(&self) -> Hexadecimal {
        Hexadecimal::from_bytes(&self.bytes())
    }

    /// Returns the unsigned decimal integer of [`bytes`](Self::bytes).
    pub fn integer(&self) -> Result<Decimal> {
        self.number_converter.from_hex(&self.hex())
    }

    /// Returns the `urn:uuid:` form of the string representation.
    pub fn urn(&self) -> String {
        format!("urn:uuid:{self}")
    }

    /// Returns the time embedded in a time-based identifier.
    ///
    /// Versions 1, 2, and 6 are read through the bound [`TimeConverter`]; version 7 carries Unix
    /// milliseconds directly.
    ///
    /// Fails with [`Error::UnsupportedOperation`] for any other version or variant.
    pub fn timestamp(&self) -> Result<Time> {
        match self.version() {
            Some(Version::UnixTime) => {
                let b = self.fields.as_bytes();
                let unix_ts_ms = u64::from_be_bytes([0, 0, b[0], b[1], b[2], b[3], b[4], b[5]]);
                Time::new(
                    (unix_ts_ms / 1_000) as i64,
                    (unix_ts_ms % 1_000) as u32 * 1_000,
                )
            }
            Some(Version::Time | Version::DceSecurity | Version::ReorderedTime) => self
                .time_converter
                .convert_time(&self.fields.timestamp()?),
            _ => Err(Error::unsupported(format!(
                "{self} is not a time-based identifier"
            ))),
        }
    }

    /// Returns `true` if all bits are zero.
    pub fn is_nil(&self) -> bool {
        self.fields.is_nil()
    }

    /// Returns `true` if all bits are one.
    pub fn is_max(&self) -> bool {
        self.fields.is_max()
    }
}

impl fmt::Display for Uuid {
    /// Returns the string representation produced by the bound codec.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.codec.encode(&self.fields))
    }
}

impl fmt::Debug for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Uuid").field(&format_args!("{self}")).finish()
    }
}

impl PartialEq for Uuid {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for Uuid {}

impl PartialOrd for Uuid {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uuid {
    /// Orders by the binary representation of each value's bound codec, so that sorting agrees
    /// with [`integer`](Self::integer) and `u128`.
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        if self.fields == other.fields {
            return cmp::Ordering::Equal;
        }
        self.bytes()
            .cmp(&other.bytes())
            .then_with(|| self.fields.cmp(&other.fields))
    }
}

impl hash::Hash for Uuid {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.fields.hash(state);
    }
}

impl From<&Uuid> for u128 {
    /// Returns the big-endian integer of [`Uuid::bytes`].
    fn from(src: &Uuid) -> Self {
        Self::from_be_bytes(src.bytes())
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from(&src)
    }
}

impl From<&Uuid> for String {
    fn from(src: &Uuid) -> Self {
        src.to_string()
    }
}

#[cfg(feature = "global_factory")]
#[cfg_attr(docsrs, doc(cfg(feature = "global_factory")))]
impl std::str::FromStr for Uuid {
    type Err = Error;

    /// Parses a string with the default factory; see [`from_string`](crate::from_string).
    fn from_str(src: &str) -> Result<Self> {
        crate::from_string(src)
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use std::sync::Arc;

    use super::Uuid;
    use crate::codec::StringCodec;
    use crate::{Fields, UuidBuilder};

    impl From<&Uuid> for uuid::Uuid {
        fn from(src: &Uuid) -> Self {
            uuid::Uuid::from_bytes(*src.fields().as_bytes())
        }
    }

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            Self::from(&src)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        /// Binds the standard codec and converters.
        fn from(src: uuid::Uuid) -> Self {
            UuidBuilder::default()
                .build_from_fields(Arc::new(StringCodec), Fields::new(src.into_bytes()))
        }
    }

}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        /// Parses a string or reads 16 bytes with the default factory.
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_str(VisitorImpl)
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            crate::from_string(value).map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            crate::from_bytes(value).map_err(de::Error::custom)
        }
    }

    #[cfg(test)]
    mod tests {
        use serde_test::{assert_de_tokens, assert_de_tokens_error, assert_tokens, Token};

        use crate::UuidFactory;

        /// Serializes and deserializes prepared cases correctly
        #[test]
        fn serializes_and_deserializes_prepared_cases_correctly() {
            let factory = UuidFactory::new();
            let cases: [(&str, &str, &[u8]); 3] = [
                (
                    "ff6f8cb0-c57d-11e1-8b21-0800200c9a66",
                    "FF6F8CB0-C57D-11E1-8B21-0800200C9A66",
                    &[
                        255, 111, 140, 176, 197, 125, 17, 225, 139, 33, 8, 0, 32, 12, 154, 102,
                    ],
                ),
                (
                    "0180ae59-078c-7b80-b113-2fe14a615fb3",
                    "urn:uuid:0180ae59-078c-7b80-b113-2fe14a615fb3",
                    &[
                        1, 128, 174, 89, 7, 140, 123, 128, 177, 19, 47, 225, 74, 97, 95, 179,
                    ],
                ),
                (
                    "886313e1-3b8a-5372-9b90-0c9aee199e5d",
                    "886313e13b8a53729b900c9aee199e5d",
                    &[
                        136, 99, 19, 225, 59, 138, 83, 114, 155, 144, 12, 154, 238, 25, 158, 93,
                    ],
                ),
            ];

            for (text, alt, bytes) in cases {
                let e = factory.from_string(text).unwrap();
                assert_tokens(&e, &[Token::String(text)]);
                assert_de_tokens(&e, &[Token::Str(alt)]);
                assert_de_tokens(&e, &[Token::Bytes(bytes)]);
            }
        }

        /// Rejects invalid representations
        #[test]
        fn rejects_invalid_representations() {
            assert_de_tokens_error::<crate::Uuid>(
                &[Token::Str("ff6f8cb0-c57d-11e1-8b21")],
                "invalid format: invalid UUID string: 'ff6f8cb0-c57d-11e1-8b21'",
            );
            assert_de_tokens_error::<crate::Uuid>(
                &[Token::Bytes(&[0; 15])],
                "invalid argument: expected 16 bytes, got 15",
            );
        }

        /// Produces JSON strings
        #[test]
        fn produces_json_strings() {
            let factory = UuidFactory::new();
            let e = factory.from_string("ff6f8cb0-c57d-11e1-8b21-0800200c9a66").unwrap();
            let json = serde_json::to_string(&e).unwrap();
            assert_eq!(json, r#""ff6f8cb0-c57d-11e1-8b21-0800200c9a66""#);
            assert_eq!(serde_json::from_str::<crate::Uuid>(&json).unwrap(), e);
        }
    }
}
