//! Strict validation of UUID strings.

use std::fmt;

use crate::codec::parse_hyphenated;
use crate::{Error, Result};

/// Checks whether a string is a well-formed UUID representation.
pub trait Validator: fmt::Debug + Send + Sync {
    /// Fails with [`Error::InvalidFormat`] if `uuid` is not acceptable.
    fn validate(&self, uuid: &str) -> Result<()>;

    /// Returns `true` if `uuid` passes [`validate`](Validator::validate).
    fn is_valid(&self, uuid: &str) -> bool {
        self.validate(uuid).is_ok()
    }
}

/// Validator accepting only the dashed 8-4-4-4-12 form, optionally wrapped in braces or prefixed
/// with `urn:uuid:`, in any letter case.
///
/// Unlike the decoders, this rejects 32 bare hexadecimal digits.
///
/// # Examples
///
/// ```rust
/// use rfc4122::validator::{GenericValidator, Validator};
///
/// assert!(GenericValidator.is_valid("ffffffff-ffff-ffff-ffff-ffffffffffff"));
/// assert!(!GenericValidator.is_valid("ffffffffffffffffffffffffffffffff"));
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct GenericValidator;

impl Validator for GenericValidator {
    fn validate(&self, uuid: &str) -> Result<()> {
        const URN_PREFIX: &str = "urn:uuid:";

        let dashed = if let Some(inner) = uuid.strip_prefix('{').and_then(|e| e.strip_suffix('}'))
        {
            inner
        } else if uuid
            .get(..URN_PREFIX.len())
            .is_some_and(|e| e.eq_ignore_ascii_case(URN_PREFIX))
        {
            &uuid[URN_PREFIX.len()..]
        } else {
            uuid
        };
        parse_hyphenated(dashed)
            .map(|_| ())
            .ok_or_else(|| Error::invalid_format(format!("invalid UUID string: '{uuid}'")))
    }
}
