//! Number and time conversions.
//!
//! [`NumberConverter`] translates between hexadecimal and decimal magnitudes of any length by
//! schoolbook long division over digit vectors, so no fixed-width integer type bounds the values
//! it can handle. [`TimeConverter`] translates between Unix time and the 60-bit count of
//! 100-nanosecond intervals since the Gregorian reform used by time-based UUIDs.

use std::fmt;

use crate::{Decimal, Error, Hexadecimal, Result, Time};

/// Difference between the Gregorian epoch (1582-10-15T00:00:00Z) and the Unix epoch in
/// 100-nanosecond intervals.
pub const GREGORIAN_OFFSET: u64 = 0x01b2_1dd2_1381_4000;

/// Converts magnitudes between hexadecimal and decimal representations.
pub trait NumberConverter: fmt::Debug + Send + Sync {
    /// Returns the decimal representation of `hex`.
    fn from_hex(&self, hex: &Hexadecimal) -> Result<Decimal>;

    /// Returns the hexadecimal representation of `decimal` left-padded with zeros to `width`
    /// digits, or with no padding if `width` is zero.
    ///
    /// Fails with [`Error::InvalidArgument`] if the value needs more than `width` digits.
    fn to_hex(&self, decimal: &Decimal, width: usize) -> Result<Hexadecimal>;
}

/// Default [`NumberConverter`] implemented with arbitrary-precision digit arithmetic.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct BigNumberConverter;

impl NumberConverter for BigNumberConverter {
    fn from_hex(&self, hex: &Hexadecimal) -> Result<Decimal> {
        let digits = parse_digits(hex, 16)?;
        Decimal::new(&render_digits(&convert_base(&digits, 16, 10)))
    }

    fn to_hex(&self, decimal: &Decimal, width: usize) -> Result<Hexadecimal> {
        let digits = parse_digits(decimal, 10)?;
        let hex = Hexadecimal::new(&render_digits(&convert_base(&digits, 10, 16)))?;
        if width == 0 {
            Ok(hex)
        } else {
            hex.pad(width)
        }
    }
}

fn parse_digits(src: &str, radix: u32) -> Result<Vec<u32>> {
    src.chars()
        .map(|c| c.to_digit(radix))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| Error::invalid_argument(format!("'{src}' is not a base-{radix} number")))
}

fn render_digits(digits: &[u32]) -> String {
    digits
        .iter()
        .filter_map(|&d| char::from_digit(d, 16))
        .collect()
}

/// Converts a big-endian digit sequence from one radix to another by repeated division.
fn convert_base(digits: &[u32], from: u32, to: u32) -> Vec<u32> {
    let mut number: Vec<u32> = digits.iter().copied().skip_while(|&d| d == 0).collect();
    let mut dst = Vec::new();
    while !number.is_empty() {
        let mut remainder = 0;
        let mut quotient = Vec::with_capacity(number.len());
        for d in number {
            let acc = remainder * from + d;
            remainder = acc % to;
            if !quotient.is_empty() || acc / to != 0 {
                quotient.push(acc / to);
            }
        }
        dst.push(remainder);
        number = quotient;
    }
    if dst.is_empty() {
        dst.push(0);
    }
    dst.reverse();
    dst
}

/// Converts between Unix time and RFC 4122 60-bit timestamps.
pub trait TimeConverter: fmt::Debug + Send + Sync {
    /// Returns the timestamp of `time` as 100-nanosecond intervals since the Gregorian epoch.
    fn calculate_time(&self, time: &Time) -> Result<Hexadecimal>;

    /// Returns the Unix time that a 60-bit Gregorian timestamp denotes.
    fn convert_time(&self, timestamp: &Hexadecimal) -> Result<Time>;
}

/// Default [`TimeConverter`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct GenericTimeConverter;

impl TimeConverter for GenericTimeConverter {
    fn calculate_time(&self, time: &Time) -> Result<Hexadecimal> {
        const MAX_TIMESTAMP: i64 = (1 << 60) - 1;

        let ticks = time
            .seconds()
            .checked_mul(10_000_000)
            .and_then(|e| e.checked_add(time.microseconds() as i64 * 10))
            .and_then(|e| e.checked_add(GREGORIAN_OFFSET as i64))
            .filter(|e| (0..=MAX_TIMESTAMP).contains(e))
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "{}.{:06} is outside the range of 60-bit timestamps",
                    time.seconds(),
                    time.microseconds()
                ))
            })?;
        Ok(Hexadecimal::from(ticks as u64))
    }

    fn convert_time(&self, timestamp: &Hexadecimal) -> Result<Time> {
        let ticks = timestamp
            .pad(15)
            .ok()
            .and_then(|e| u64::from_str_radix(&e, 16).ok())
            .ok_or_else(|| {
                Error::invalid_argument(format!("'{timestamp}' is not a 60-bit timestamp"))
            })?;
        let unix_us = (ticks as i64 - GREGORIAN_OFFSET as i64).div_euclid(10);
        Time::new(
            unix_us.div_euclid(1_000_000),
            unix_us.rem_euclid(1_000_000) as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{BigNumberConverter, GenericTimeConverter, NumberConverter, TimeConverter};
    use crate::{Decimal, ErrorKind, Hexadecimal, Time};

    /// Converts prepared cases in both directions
    #[test]
    fn converts_prepared_cases_in_both_directions() {
        let cases = [
            ("0", "0"),
            ("ff", "255"),
            ("10000000000000000", "18446744073709551616"),
            (
                "ff6f8cb0c57d11e18b210800200c9a66",
                "339532337419071774304650190139318639206",
            ),
            (
                "ffffffffffffffffffffffffffffffff",
                "340282366920938463463374607431768211455",
            ),
            (
                "1ffffffffffffffffffffffffffffffff",
                "680564733841876926926749214863536422911",
            ),
        ];

        let c = BigNumberConverter;
        for (hex, dec) in cases {
            let h = Hexadecimal::new(hex).unwrap();
            let d = Decimal::new(dec).unwrap();
            assert_eq!(c.from_hex(&h).unwrap(), d);
            assert_eq!(c.to_hex(&d, 0).unwrap(), h);
        }
    }

    /// Agrees with native integers on random samples
    #[test]
    fn agrees_with_native_integers_on_random_samples() {
        let c = BigNumberConverter;
        for _ in 0..1_000 {
            let n: u128 = rand::random::<u128>() >> (rand::random::<u32>() % 128);
            let hex = Hexadecimal::new(&format!("{n:032x}")).unwrap();
            assert_eq!(c.from_hex(&hex).unwrap().as_str(), n.to_string());
            let dec = Decimal::new(&n.to_string()).unwrap();
            assert_eq!(c.to_hex(&dec, 32).unwrap(), hex);
        }
    }

    /// Strips leading zeros from decimal output and pads hex output
    #[test]
    fn strips_leading_zeros_from_decimal_output_and_pads_hex_output() {
        let c = BigNumberConverter;
        let zero = Hexadecimal::new("00000000000000000000000000000000").unwrap();
        assert_eq!(c.from_hex(&zero).unwrap().as_str(), "0");
        let one = Decimal::new("1").unwrap();
        assert_eq!(c.to_hex(&one, 12).unwrap().as_str(), "000000000001");
    }

    /// Rejects values wider than the requested width
    #[test]
    fn rejects_values_wider_than_the_requested_width() {
        let c = BigNumberConverter;
        let too_big = Decimal::new("340282366920938463463374607431768211456").unwrap();
        assert_eq!(
            c.to_hex(&too_big, 32).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(c.to_hex(&too_big, 0).unwrap().as_str().len(), 33);
    }

    /// Calculates Gregorian timestamps from Unix time
    #[test]
    fn calculates_gregorian_timestamps_from_unix_time() {
        let c = GenericTimeConverter;
        let epoch = Time::new(0, 0).unwrap();
        assert_eq!(c.calculate_time(&epoch).unwrap().as_str(), "1b21dd213814000");

        let time = Time::new(1_578_522_046, 10_000).unwrap();
        let hex = c.calculate_time(&time).unwrap();
        assert_eq!(
            u64::from_str_radix(&hex, 16).unwrap(),
            1_578_522_046 * 10_000_000 + 100_000 + 0x01b2_1dd2_1381_4000
        );
        assert_eq!(c.convert_time(&hex).unwrap(), time);
    }

    /// Handles times before the Unix epoch and rejects times before 1582
    #[test]
    fn handles_times_before_the_unix_epoch_and_rejects_times_before_1582() {
        let c = GenericTimeConverter;
        let time = Time::new(-1, 500_000).unwrap();
        let hex = c.calculate_time(&time).unwrap();
        assert_eq!(c.convert_time(&hex).unwrap(), time);

        let gregorian = Time::new(-12_219_292_800, 0).unwrap();
        assert_eq!(c.calculate_time(&gregorian).unwrap().as_str(), "0");
        let before = Time::new(-12_219_292_801, 0).unwrap();
        assert_eq!(
            c.calculate_time(&before).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    /// Rejects timestamps wider than 60 bits
    #[test]
    fn rejects_timestamps_wider_than_60_bits() {
        let c = GenericTimeConverter;
        let hex = Hexadecimal::new("1000000000000000").unwrap();
        assert_eq!(
            c.convert_time(&hex).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }
}
