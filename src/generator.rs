//! Generators producing version-correct 16-byte sequences.
//!
//! | Generator              | Capability          | Version |
//! | ---------------------- | ------------------- | ------- |
//! | [`DefaultTimeGenerator`] | [`TimeGenerator`]   | 1       |
//! | [`UnixTimeGenerator`]    | [`TimeGenerator`]   | 7       |
//! | [`DefaultNameGenerator`] | [`NameGenerator`]   | 3, 5    |
//! | [`RandomBytesGenerator`] | [`RandomGenerator`] | 4       |
//! | [`CombGenerator`]        | [`RandomGenerator`] | 4       |
//!
//! Every capability is a small object-safe trait, so the [`UuidFactory`](crate::UuidFactory)
//! can hold any implementation behind an `Arc`. Regardless of what a generator returns, the
//! factory forces the version nibble and the RFC 4122 variant onto the bytes before building a
//! [`Uuid`].

use std::fmt;

use crate::{Error, Hexadecimal, Result, Uuid, Version};

mod comb;
pub use comb::CombGenerator;

mod name;
pub use name::DefaultNameGenerator;

mod random;
pub use random::RandomBytesGenerator;

mod time;
pub use time::DefaultTimeGenerator;

mod unix_time;
pub use unix_time::UnixTimeGenerator;

/// A source of random bytes.
pub trait RandomGenerator: fmt::Debug + Send + Sync {
    /// Returns `length` random bytes.
    ///
    /// Fails with [`Error::UnsatisfiedDependency`] if the entropy source is unavailable.
    fn generate(&self, length: usize) -> Result<Vec<u8>>;

    /// Returns 16 random bytes with the version nibble set to 4 and the RFC 4122 variant.
    fn generate_v4(&self) -> Result<[u8; 16]> {
        let mut bytes = to_array(&self.generate(16)?)?;
        apply_version(&mut bytes, Version::Random);
        Ok(bytes)
    }
}

/// A generator of time-based identifiers.
pub trait TimeGenerator: fmt::Debug + Send + Sync {
    /// Returns the bytes of a time-based identifier.
    ///
    /// `node` and `clock_seq` override the node provider and the random clock sequence;
    /// generators whose layout has no such fields ignore them.
    fn generate(&self, node: Option<&Hexadecimal>, clock_seq: Option<u16>) -> Result<[u8; 16]>;
}

/// Hash function of a name-based identifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum HashAlgorithm {
    /// MD5, used by version 3.
    Md5,
    /// SHA-1 truncated to 16 bytes, used by version 5.
    Sha1,
}

impl HashAlgorithm {
    /// Returns the version of identifiers derived with this algorithm.
    pub const fn version(self) -> Version {
        match self {
            Self::Md5 => Version::HashMd5,
            Self::Sha1 => Version::HashSha1,
        }
    }
}

/// A generator of name-based identifiers.
///
/// Implementations must be pure: the same namespace, name, and algorithm always yield the same
/// bytes.
pub trait NameGenerator: fmt::Debug + Send + Sync {
    fn generate(&self, namespace: &Uuid, name: &[u8], algorithm: HashAlgorithm)
        -> Result<[u8; 16]>;
}

/// Overwrites the version nibble of byte 6 and the variant bits of byte 8 with RFC 4122 values.
pub(crate) fn apply_version(bytes: &mut [u8; 16], version: Version) {
    bytes[6] = (version.number() << 4) | (bytes[6] & 0x0f);
    bytes[8] = 0x80 | (bytes[8] & 0x3f);
}

pub(crate) fn to_array(bytes: &[u8]) -> Result<[u8; 16]> {
    <[u8; 16]>::try_from(bytes).map_err(|_| {
        Error::invalid_argument(format!("generator returned {} bytes, expected 16", bytes.len()))
    })
}
