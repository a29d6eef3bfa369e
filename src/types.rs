//! Validated wrapper values passed between components.

use std::{fmt, ops, str};

use fstr::FStr;

use crate::{Error, Result};

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Writes the lowercase hexadecimal representation of `bytes` into a stack string of `N`
/// characters.
///
/// # Panics
///
/// Panics if `N` is not twice the length of `bytes`.
pub(crate) fn hex_fstr<const N: usize>(bytes: &[u8]) -> FStr<N> {
    assert_eq!(N, bytes.len() * 2, "buffer size mismatch");
    let mut buffer = [0u8; N];
    for (i, e) in bytes.iter().enumerate() {
        buffer[i * 2] = DIGITS[(e >> 4) as usize];
        buffer[i * 2 + 1] = DIGITS[(e & 15) as usize];
    }
    debug_assert!(buffer.is_ascii());
    unsafe { FStr::from_bytes_unchecked(buffer) }
}

/// Decodes a string of hexadecimal digits of even length into bytes.
pub(crate) fn decode_hex(src: &str) -> Option<Vec<u8>> {
    if src.len() % 2 != 0 {
        return None;
    }
    let mut dst = Vec::with_capacity(src.len() / 2);
    let mut iter = src.chars();
    while let Some(c) = iter.next() {
        let hi = c.to_digit(16)? as u8;
        let lo = iter.next()?.to_digit(16)? as u8;
        dst.push((hi << 4) | lo);
    }
    Some(dst)
}

/// A non-empty run of lowercase hexadecimal digits.
///
/// Constructors accept upper-case digits and an optional `0x` prefix and normalize them away.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Hexadecimal(String);

impl Hexadecimal {
    /// Validates and normalizes `src`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::Hexadecimal;
    ///
    /// let hex = Hexadecimal::new("0xFFF")?;
    /// assert_eq!(hex.as_str(), "fff");
    /// # Ok::<(), rfc4122::Error>(())
    /// ```
    pub fn new(src: &str) -> Result<Self> {
        let digits = src
            .strip_prefix("0x")
            .or_else(|| src.strip_prefix("0X"))
            .unwrap_or(src);
        if digits.is_empty() || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::invalid_argument(format!(
                "'{src}' is not a hexadecimal value"
            )));
        }
        Ok(Self(digits.to_ascii_lowercase()))
    }

    /// Creates the hexadecimal representation of a byte sequence, two digits per byte.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut dst = String::with_capacity(bytes.len() * 2);
        for e in bytes {
            dst.push(DIGITS[(e >> 4) as usize] as char);
            dst.push(DIGITS[(e & 15) as usize] as char);
        }
        Self(dst)
    }

    /// Returns the digits as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a copy left-padded with zeros to `width` digits.
    ///
    /// Fails with [`Error::InvalidArgument`] if the significant digits do not fit in `width`;
    /// values are never truncated.
    pub fn pad(&self, width: usize) -> Result<Self> {
        let significant = self.0.trim_start_matches('0');
        if significant.len() > width {
            return Err(Error::invalid_argument(format!(
                "'{}' does not fit in {width} hexadecimal digits",
                self.0
            )));
        }
        Ok(Self(format!("{significant:0>width$}")))
    }

    /// Decodes the digits into bytes, left-padding an odd number of digits with a zero.
    pub fn to_bytes(&self) -> Vec<u8> {
        let even = if self.0.len() % 2 == 0 {
            self.0.clone()
        } else {
            format!("0{}", self.0)
        };
        // digits were validated on construction
        decode_hex(&even).unwrap_or_default()
    }
}

impl From<u64> for Hexadecimal {
    fn from(src: u64) -> Self {
        Self(format!("{src:x}"))
    }
}

impl str::FromStr for Hexadecimal {
    type Err = Error;

    fn from_str(src: &str) -> Result<Self> {
        Self::new(src)
    }
}

impl ops::Deref for Hexadecimal {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Hexadecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An unsigned decimal integer of arbitrary magnitude, without leading zeros except for the
/// literal `0`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Decimal(String);

impl Decimal {
    /// Validates and normalizes `src`.
    ///
    /// An optional leading `+` is accepted. Negative and non-numeric values fail with
    /// [`Error::InvalidArgument`].
    pub fn new(src: &str) -> Result<Self> {
        if src.starts_with('-') && src.len() > 1 && src[1..].bytes().any(|c| c != b'0') {
            return Err(Error::invalid_argument(format!(
                "'{src}' is negative; an unsigned integer is required"
            )));
        }
        let digits = src
            .strip_prefix('+')
            .or_else(|| src.strip_prefix('-'))
            .unwrap_or(src);
        if digits.is_empty() || !digits.bytes().all(|c| c.is_ascii_digit()) {
            return Err(Error::invalid_argument(format!(
                "'{src}' is not an unsigned integer"
            )));
        }
        let trimmed = digits.trim_start_matches('0');
        Ok(Self(if trimmed.is_empty() { "0" } else { trimmed }.to_owned()))
    }

    /// Returns the digits as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl str::FromStr for Decimal {
    type Err = Error;

    fn from_str(src: &str) -> Result<Self> {
        Self::new(src)
    }
}

impl ops::Deref for Decimal {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A point in time as seconds and microseconds since the Unix epoch.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Time {
    seconds: i64,
    microseconds: u32,
}

impl Time {
    /// Creates a time value, failing if `microseconds` is not below one million.
    pub fn new(seconds: i64, microseconds: u32) -> Result<Self> {
        if microseconds >= 1_000_000 {
            return Err(Error::invalid_argument(format!(
                "microseconds out of range: {microseconds}"
            )));
        }
        Ok(Self {
            seconds,
            microseconds,
        })
    }

    /// Returns the whole seconds since the Unix epoch.
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Returns the sub-second part in microseconds.
    pub const fn microseconds(&self) -> u32 {
        self.microseconds
    }
}

#[cfg(test)]
mod tests {
    use super::{hex_fstr, Decimal, Hexadecimal, Time};
    use crate::ErrorKind;

    /// Normalizes hexadecimal input
    #[test]
    fn normalizes_hexadecimal_input() {
        assert_eq!(Hexadecimal::new("ABCdef").unwrap().as_str(), "abcdef");
        assert_eq!(Hexadecimal::new("0x00Ff").unwrap().as_str(), "00ff");
        for e in ["", "0x", "xyz", "12 3", "-1f"] {
            assert_eq!(
                Hexadecimal::new(e).unwrap_err().kind(),
                ErrorKind::InvalidArgument,
                "{e}"
            );
        }
    }

    /// Pads without truncating
    #[test]
    fn pads_without_truncating() {
        let hex = Hexadecimal::from(0xfff_ffffu64);
        assert_eq!(hex.pad(12).unwrap().as_str(), "00000fffffff");
        assert_eq!(
            Hexadecimal::new("0001").unwrap().pad(2).unwrap().as_str(),
            "01"
        );
        assert!(Hexadecimal::new("123").unwrap().pad(2).is_err());
        assert_eq!(Hexadecimal::new("abc").unwrap().to_bytes(), vec![0x0a, 0xbc]);
        assert_eq!(Hexadecimal::from_bytes(&[0, 0x7f, 0xff]).as_str(), "007fff");
    }

    /// Normalizes decimal input and rejects negatives
    #[test]
    fn normalizes_decimal_input_and_rejects_negatives() {
        assert_eq!(Decimal::new("000123").unwrap().as_str(), "123");
        assert_eq!(Decimal::new("0000").unwrap().as_str(), "0");
        assert_eq!(Decimal::new("+42").unwrap().as_str(), "42");
        assert_eq!(Decimal::new("-0").unwrap().as_str(), "0");
        for e in ["", "-1", "12a", "1.5", "+", " 1"] {
            assert_eq!(
                Decimal::new(e).unwrap_err().kind(),
                ErrorKind::InvalidArgument,
                "{e}"
            );
        }
    }

    /// Writes fixed-width hex strings
    #[test]
    fn writes_fixed_width_hex_strings() {
        assert_eq!(hex_fstr::<4>(&[0x0a, 0xf0]).as_str(), "0af0");
        assert_eq!(hex_fstr::<2>(&[0]).as_str(), "00");
    }

    /// Rejects out-of-range microseconds
    #[test]
    fn rejects_out_of_range_microseconds() {
        assert!(Time::new(0, 999_999).is_ok());
        assert!(Time::new(0, 1_000_000).is_err());
    }
}
