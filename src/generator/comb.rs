//! COMB generator.

use std::sync::Arc;

use super::RandomGenerator;
use crate::converter::NumberConverter;
use crate::provider::TimeProvider;
use crate::{Decimal, Error, Hexadecimal, Result};

const TIMESTAMP_BYTES: usize = 6;

/// Decorates a [`RandomGenerator`] by replacing the trailing six bytes of its output with the
/// current time.
///
/// The time is written as the decimal number formed by the Unix seconds followed by five digits
/// of the fraction (units of ten microseconds), converted with the [`NumberConverter`] to 48 bits.
/// Successive identifiers thus share increasing trailing bytes while the leading bytes stay
/// uniformly random. Combine with
/// [`TimestampFirstCombCodec`](crate::codec::TimestampFirstCombCodec) to move the timestamp to
/// the front of the encoded forms.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use rfc4122::codec::TimestampFirstCombCodec;
/// use rfc4122::generator::CombGenerator;
/// use rfc4122::UuidFactory;
///
/// let mut factory = UuidFactory::new();
/// factory.set_random_generator(Arc::new(CombGenerator::new(
///     factory.random_generator().clone(),
///     factory.number_converter().clone(),
/// )));
/// factory.set_codec(Arc::new(TimestampFirstCombCodec));
/// println!("{}", factory.uuid4()?);
/// # Ok::<(), rfc4122::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct CombGenerator {
    generator: Arc<dyn RandomGenerator>,
    converter: Arc<dyn NumberConverter>,
    time_provider: Arc<dyn TimeProvider>,
}

impl CombGenerator {
    /// Creates a generator sampling the system clock.
    pub fn new(generator: Arc<dyn RandomGenerator>, converter: Arc<dyn NumberConverter>) -> Self {
        Self::with_time_provider(
            generator,
            converter,
            Arc::new(crate::provider::SystemTimeProvider),
        )
    }

    /// Creates a generator with a specified time source.
    pub fn with_time_provider(
        generator: Arc<dyn RandomGenerator>,
        converter: Arc<dyn NumberConverter>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            generator,
            converter,
            time_provider,
        }
    }

    fn timestamp(&self) -> Result<Vec<u8>> {
        let time = self.time_provider.get_time()?;
        let decimal = Decimal::new(&format!(
            "{}{:05}",
            time.seconds(),
            time.microseconds() / 10
        ))?;
        let hex = self.converter.to_hex(&decimal, 0)?;
        // keep the low 48 bits
        let low = &hex[hex.len().saturating_sub(TIMESTAMP_BYTES * 2)..];
        Ok(Hexadecimal::new(low)?.pad(TIMESTAMP_BYTES * 2)?.to_bytes())
    }
}

impl RandomGenerator for CombGenerator {
    /// Returns `length - 6` random bytes followed by the six timestamp bytes.
    ///
    /// Fails with [`Error::InvalidArgument`] unless `length` is even and at least 6.
    fn generate(&self, length: usize) -> Result<Vec<u8>> {
        if length < TIMESTAMP_BYTES {
            return Err(Error::invalid_argument(format!(
                "length must be at least {TIMESTAMP_BYTES}, got {length}"
            )));
        }
        if length % 2 != 0 {
            return Err(Error::invalid_argument(format!(
                "length must be an even number, got {length}"
            )));
        }

        let random_length = length - TIMESTAMP_BYTES;
        let mut bytes = if random_length > 0 {
            self.generator.generate(random_length)?
        } else {
            Vec::new()
        };
        if bytes.len() != random_length {
            return Err(Error::invalid_argument(format!(
                "generator returned {} bytes, expected {random_length}",
                bytes.len()
            )));
        }
        bytes.extend(self.timestamp()?);
        Ok(bytes)
    }
}
