//! Version 1 generator.

use std::sync::Arc;

use super::{apply_version, TimeGenerator};
use crate::converter::TimeConverter;
use crate::provider::{NodeProvider, TimeProvider};
use crate::{Hexadecimal, Result, Version};

/// Generates version 1 identifiers from a node, a clock sequence, and the current time.
///
/// ```text
/// bytes 0-3   low 32 bits of the 60-bit timestamp
/// bytes 4-5   next 16 bits
/// bytes 6-7   version 0001 and the top 12 bits
/// bytes 8-9   variant 10 and the 14-bit clock sequence
/// bytes 10-15 node
/// ```
///
/// The clock sequence is random unless supplied by the caller; a supplied value is masked to 14
/// bits. An explicit node takes precedence over the node provider. With a fixed node, clock
/// sequence, and time provider, the output is fully deterministic.
#[derive(Clone, Debug)]
pub struct DefaultTimeGenerator {
    node_provider: Arc<dyn NodeProvider>,
    time_converter: Arc<dyn TimeConverter>,
    time_provider: Arc<dyn TimeProvider>,
}

impl DefaultTimeGenerator {
    pub fn new(
        node_provider: Arc<dyn NodeProvider>,
        time_converter: Arc<dyn TimeConverter>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            node_provider,
            time_converter,
            time_provider,
        }
    }
}

impl TimeGenerator for DefaultTimeGenerator {
    fn generate(&self, node: Option<&Hexadecimal>, clock_seq: Option<u16>) -> Result<[u8; 16]> {
        let node = match node {
            Some(node) => node.pad(12)?,
            None => self.node_provider.get_node()?.pad(12)?,
        };
        let clock_seq = clock_seq.unwrap_or_else(rand::random) & 0x3fff;

        let time = self.time_provider.get_time()?;
        let timestamp = self.time_converter.calculate_time(&time)?.pad(16)?.to_bytes();

        let mut bytes = [0u8; 16];
        bytes[0..4].copy_from_slice(&timestamp[4..8]);
        bytes[4..6].copy_from_slice(&timestamp[2..4]);
        bytes[6..8].copy_from_slice(&timestamp[0..2]);
        bytes[8..10].copy_from_slice(&clock_seq.to_be_bytes());
        bytes[10..16].copy_from_slice(&node.to_bytes());
        apply_version(&mut bytes, Version::Time);
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{DefaultTimeGenerator, TimeGenerator};
    use crate::converter::{GenericTimeConverter, TimeConverter};
    use crate::provider::{FixedTimeProvider, RandomNodeProvider, StaticNodeProvider};
    use crate::{ErrorKind, Fields, Hexadecimal, Result, Time, Variant, Version};

    #[derive(Debug)]
    struct ConcatenatingTimeConverter;

    impl TimeConverter for ConcatenatingTimeConverter {
        fn calculate_time(&self, time: &Time) -> Result<Hexadecimal> {
            Hexadecimal::new(&format!(
                "abcd{:x}{:x}",
                time.microseconds(),
                time.seconds()
            ))
        }

        fn convert_time(&self, _: &Hexadecimal) -> Result<Time> {
            unimplemented!()
        }
    }

    fn fixed_time() -> Arc<FixedTimeProvider> {
        Arc::new(FixedTimeProvider(Time::new(1_578_522_046, 10_000).unwrap()))
    }

    /// Packs converter output, clock sequence, and node
    #[test]
    fn packs_converter_output_clock_sequence_and_node() {
        let node = Hexadecimal::new("0123456789ab").unwrap();
        let g = DefaultTimeGenerator::new(
            Arc::new(StaticNodeProvider::new(&node).unwrap()),
            Arc::new(ConcatenatingTimeConverter),
            fixed_time(),
        );
        let fields = Fields::new(g.generate(None, Some(4095)).unwrap());
        assert_eq!(fields.time_low().as_str(), "5e1655be");
        assert_eq!(fields.time_mid().as_str(), "2710");
        assert_eq!(fields.time_hi_and_version().as_str(), "1bcd");
        assert_eq!(fields.clock_seq_hi_and_reserved().as_str(), "8f");
        assert_eq!(fields.clock_seq_low().as_str(), "ff");
        assert_eq!(fields.node().as_str(), "0123456789ab");
    }

    /// Honors explicit node and masks clock sequence
    #[test]
    fn honors_explicit_node_and_masks_clock_sequence() {
        let g = DefaultTimeGenerator::new(
            Arc::new(RandomNodeProvider::default()),
            Arc::new(GenericTimeConverter),
            fixed_time(),
        );
        let node = Hexadecimal::new("00000fffffff").unwrap();
        let fields = Fields::new(g.generate(Some(&node), Some(0xffff)).unwrap());
        assert_eq!(fields.node().as_str(), "00000fffffff");
        assert_eq!(fields.clock_seq().as_str(), "3fff");
        assert_eq!(fields.variant(), Variant::Rfc4122);
        assert_eq!(fields.version(), Some(Version::Time));

        let short = Hexadecimal::from(268_435_455u64);
        let fields = Fields::new(g.generate(Some(&short), None).unwrap());
        assert_eq!(fields.node().as_str(), "00000fffffff");
    }

    /// Encodes the Gregorian timestamp of the time provider
    #[test]
    fn encodes_the_gregorian_timestamp_of_the_time_provider() {
        let g = DefaultTimeGenerator::new(
            Arc::new(RandomNodeProvider::default()),
            Arc::new(GenericTimeConverter),
            fixed_time(),
        );
        let fields = Fields::new(g.generate(None, None).unwrap());
        let expected = GenericTimeConverter
            .calculate_time(&Time::new(1_578_522_046, 10_000).unwrap())
            .unwrap();
        assert_eq!(fields.timestamp().unwrap(), expected);
    }

    /// Is deterministic given fixed inputs
    #[test]
    fn is_deterministic_given_fixed_inputs() {
        let g = DefaultTimeGenerator::new(
            Arc::new(RandomNodeProvider::default()),
            Arc::new(GenericTimeConverter),
            fixed_time(),
        );
        let node = Hexadecimal::new("0800200c9a66").unwrap();
        assert_eq!(
            g.generate(Some(&node), Some(0x0b21)).unwrap(),
            g.generate(Some(&node), Some(0x0b21)).unwrap()
        );
    }

    /// Rejects nodes wider than 48 bits
    #[test]
    fn rejects_nodes_wider_than_48_bits() {
        let g = DefaultTimeGenerator::new(
            Arc::new(RandomNodeProvider::default()),
            Arc::new(GenericTimeConverter),
            fixed_time(),
        );
        let node = Hexadecimal::new("1000000000000").unwrap();
        assert_eq!(
            g.generate(Some(&node), None).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }
}
