//! Version 7 generator.

use std::{fmt, sync};

use super::{RandomGenerator, TimeGenerator};
use crate::provider::{SystemTimeProvider, TimeProvider};
use crate::{Error, Hexadecimal, Result};

const MAX_COUNTER: u64 = (1 << 42) - 1;

/// Default amount of clock rollback, in milliseconds, that the generator absorbs.
pub const DEFAULT_ROLLBACK_ALLOWANCE: u64 = 10_000;

/// Generates version 7 identifiers, guaranteeing monotonic order of the values produced by one
/// instance.
///
/// ```text
/// bytes 0-5   48-bit Unix timestamp in milliseconds
/// bytes 6-7   version 0111 and the top 12 bits of the counter
/// bytes 8-11  variant 10 and the next 30 bits of the counter
/// bytes 12-15 random
/// ```
///
/// The 42-bit counter is reseeded with random bits whenever the timestamp advances and
/// incremented when it does not. If the clock goes backwards by no more than the rollback
/// allowance (ten seconds by default), the previous timestamp is reused so that the order is
/// preserved; a larger rollback resets the generator to the new timestamp. Counter overflow
/// moves the timestamp forward by one millisecond.
///
/// The node and clock sequence arguments of [`TimeGenerator::generate`] are ignored.
pub struct UnixTimeGenerator {
    random: sync::Arc<dyn RandomGenerator>,
    time_provider: sync::Arc<dyn TimeProvider>,
    rollback_allowance: u64,
    state: sync::Mutex<State>,
}

#[derive(Copy, Clone, Default)]
struct State {
    timestamp: u64,
    counter: u64,
}

impl UnixTimeGenerator {
    /// Creates a generator sampling the system clock.
    pub fn new(random: sync::Arc<dyn RandomGenerator>) -> Self {
        Self::with_time_provider(random, sync::Arc::new(SystemTimeProvider))
    }

    /// Creates a generator with a specified time source.
    pub fn with_time_provider(
        random: sync::Arc<dyn RandomGenerator>,
        time_provider: sync::Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            random,
            time_provider,
            rollback_allowance: DEFAULT_ROLLBACK_ALLOWANCE,
            state: Default::default(),
        }
    }

    /// Returns a generator absorbing `rollback_allowance` milliseconds of clock rollback.
    pub fn rollback_allowance(mut self, rollback_allowance: u64) -> Self {
        self.rollback_allowance = rollback_allowance;
        self
    }

    /// Generates the bytes of a version 7 identifier from the `unix_ts_ms` passed, or resets
    /// the generator upon significant timestamp rollback.
    ///
    /// Fails with [`Error::InvalidArgument`] if `unix_ts_ms` is not a 48-bit positive integer.
    pub fn generate_core(&self, unix_ts_ms: u64) -> Result<[u8; 16]> {
        if unix_ts_ms == 0 || unix_ts_ms >= 1 << 48 {
            return Err(Error::invalid_argument(format!(
                "unix_ts_ms must be a 48-bit positive integer, got {unix_ts_ms}"
            )));
        }

        let mut state = self.state.lock().unwrap_or_else(sync::PoisonError::into_inner);
        if unix_ts_ms > state.timestamp {
            state.timestamp = unix_ts_ms;
            state.counter = self.next_u64()? & MAX_COUNTER;
        } else if unix_ts_ms.saturating_add(self.rollback_allowance) >= state.timestamp {
            // go on with previous timestamp if new one is not much smaller
            state.counter += 1;
            if state.counter > MAX_COUNTER {
                // increment timestamp at counter overflow
                state.timestamp += 1;
                state.counter = self.next_u64()? & MAX_COUNTER;
            }
        } else {
            // reset state and resume
            log::warn!(
                "clock moved back from {} to {unix_ts_ms}; resetting generator state",
                state.timestamp
            );
            state.timestamp = unix_ts_ms;
            state.counter = self.next_u64()? & MAX_COUNTER;
        }

        let State { timestamp, counter } = *state;
        drop(state);

        let tail = self.random.generate(4)?;
        let tail = <[u8; 4]>::try_from(tail.as_slice()).map_err(|_| {
            Error::invalid_argument(format!("generator returned {} bytes, expected 4", tail.len()))
        })?;

        let mut bytes = [0u8; 16];
        bytes[0..6].copy_from_slice(&timestamp.to_be_bytes()[2..]);
        bytes[6..8].copy_from_slice(&(0x7000 | (counter >> 30) as u16).to_be_bytes());
        bytes[8..12].copy_from_slice(&(0x8000_0000 | (counter & 0x3fff_ffff) as u32).to_be_bytes());
        bytes[12..16].copy_from_slice(&tail);
        Ok(bytes)
    }

    fn next_u64(&self) -> Result<u64> {
        let bytes = self.random.generate(8)?;
        let bytes = <[u8; 8]>::try_from(bytes.as_slice()).map_err(|_| {
            Error::invalid_argument(format!("generator returned {} bytes, expected 8", bytes.len()))
        })?;
        Ok(u64::from_be_bytes(bytes))
    }
}

impl TimeGenerator for UnixTimeGenerator {
    fn generate(&self, _: Option<&Hexadecimal>, _: Option<u16>) -> Result<[u8; 16]> {
        let time = self.time_provider.get_time()?;
        let unix_ts_ms = u64::try_from(time.seconds())
            .ok()
            .and_then(|secs| secs.checked_mul(1_000))
            .and_then(|ms| ms.checked_add(u64::from(time.microseconds() / 1_000)))
            .ok_or_else(|| {
                Error::unsatisfied(format!(
                    "time {}.{:06} is out of the Unix millisecond range",
                    time.seconds(),
                    time.microseconds()
                ))
            })?;
        self.generate_core(unix_ts_ms)
    }
}

impl fmt::Debug for UnixTimeGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnixTimeGenerator")
            .field("random", &self.random)
            .field("time_provider", &self.time_provider)
            .field("rollback_allowance", &self.rollback_allowance)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{TimeGenerator, UnixTimeGenerator};
    use crate::generator::RandomBytesGenerator;
    use crate::provider::FixedTimeProvider;
    use crate::{ErrorKind, Fields, Time, Variant, Version};

    fn new_gen() -> UnixTimeGenerator {
        UnixTimeGenerator::new(Arc::new(RandomBytesGenerator::default()))
    }

    /// Generates increasing identifiers even with decreasing or constant timestamp
    #[test]
    fn generates_increasing_identifiers_even_with_decreasing_or_constant_timestamp() {
        let ts = 0x0123_4567_89abu64;
        let g = new_gen();
        let mut prev = g.generate_core(ts).unwrap();
        assert_eq!(prev[..6], ts.to_be_bytes()[2..]);
        for i in 0..100_000u64 {
            let curr = g.generate_core(ts - i.min(4_000)).unwrap();
            assert!(prev < curr);
            prev = curr;
        }
        assert!(prev[..6] >= ts.to_be_bytes()[2..]);
    }

    /// Breaks increasing order if timestamp goes backwards a lot
    #[test]
    fn breaks_increasing_order_if_timestamp_goes_backwards_a_lot() {
        let ts = 0x0123_4567_89abu64;
        let g = new_gen();
        let mut prev = g.generate_core(ts).unwrap();
        assert_eq!(prev[..6], ts.to_be_bytes()[2..]);

        let mut curr = g.generate_core(ts - 10_000).unwrap();
        assert!(prev < curr);

        prev = curr;
        curr = g.generate_core(ts - 10_001).unwrap();
        assert!(prev > curr);
        assert_eq!(curr[..6], (ts - 10_001).to_be_bytes()[2..]);

        prev = curr;
        curr = g.generate_core(ts - 10_002).unwrap();
        assert!(prev < curr);
    }

    /// Honors a custom rollback allowance
    #[test]
    fn honors_a_custom_rollback_allowance() {
        let ts = 0x0123_4567_89abu64;
        let g = new_gen().rollback_allowance(0);
        let prev = g.generate_core(ts).unwrap();
        let curr = g.generate_core(ts).unwrap();
        assert!(prev < curr);
        let curr = g.generate_core(ts - 1).unwrap();
        assert_eq!(curr[..6], (ts - 1).to_be_bytes()[2..]);
    }

    /// Rejects timestamps outside 48 bits
    #[test]
    fn rejects_timestamps_outside_48_bits() {
        let g = new_gen();
        for ts in [0, 1 << 48, u64::MAX] {
            assert_eq!(
                g.generate_core(ts).unwrap_err().kind(),
                ErrorKind::InvalidArgument
            );
        }
    }

    /// Encodes the time provider in milliseconds
    #[test]
    fn encodes_the_time_provider_in_milliseconds() {
        let time = Time::new(1_645_557_742, 123_999).unwrap();
        let g = UnixTimeGenerator::with_time_provider(
            Arc::new(RandomBytesGenerator::default()),
            Arc::new(FixedTimeProvider(time)),
        );
        let ms = 1_645_557_742_123u64;
        for _ in 0..1_000 {
            let fields = Fields::new(g.generate(None, None).unwrap());
            assert_eq!(fields.as_bytes()[..6], ms.to_be_bytes()[2..]);
            assert_eq!(fields.variant(), Variant::Rfc4122);
            assert_eq!(fields.version(), Some(Version::UnixTime));
        }
    }

    /// Fails before the Unix epoch
    #[test]
    fn fails_before_the_unix_epoch() {
        let g = UnixTimeGenerator::with_time_provider(
            Arc::new(RandomBytesGenerator::default()),
            Arc::new(FixedTimeProvider(Time::new(-1, 0).unwrap())),
        );
        assert_eq!(
            g.generate(None, None).unwrap_err().kind(),
            ErrorKind::UnsatisfiedDependency
        );
    }
}
