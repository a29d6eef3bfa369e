use std::sync::Arc;

use crate::codec::{Codec, StringCodec};
use crate::converter::{BigNumberConverter, GenericTimeConverter, NumberConverter, TimeConverter};
use crate::generator::{
    apply_version, DefaultNameGenerator, DefaultTimeGenerator, HashAlgorithm, NameGenerator,
    RandomBytesGenerator, RandomGenerator, TimeGenerator, UnixTimeGenerator,
};
use crate::provider::{FallbackNodeProvider, NodeProvider, SystemTimeProvider, TimeProvider};
use crate::validator::{GenericValidator, Validator};
use crate::{Decimal, Hexadecimal, Result, Uuid, UuidBuilder, Version};

/// Wires the converters, codec, builder, generators, and providers into the named UUID
/// operations.
///
/// Every collaborator can be replaced at runtime with the `set_*` methods. A replacement affects
/// values produced or parsed afterwards only: each [`Uuid`] keeps the codec and converters that
/// were current when it was built.
///
/// # Examples
///
/// ```rust
/// use rfc4122::{UuidFactory, Version, NAMESPACE_DNS};
///
/// let factory = UuidFactory::new();
///
/// let v4 = factory.uuid4()?;
/// assert_eq!(v4.version(), Some(Version::Random));
///
/// let dns = factory.from_string(NAMESPACE_DNS)?;
/// let v5 = factory.uuid5(&dns, "python.org")?;
/// assert_eq!(v5.to_string(), "886313e1-3b8a-5372-9b90-0c9aee199e5d");
/// # Ok::<(), rfc4122::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct UuidFactory {
    codec: Arc<dyn Codec>,
    number_converter: Arc<dyn NumberConverter>,
    time_converter: Arc<dyn TimeConverter>,
    builder: UuidBuilder,
    validator: Arc<dyn Validator>,
    node_provider: Arc<dyn NodeProvider>,
    time_provider: Arc<dyn TimeProvider>,
    random_generator: Arc<dyn RandomGenerator>,
    time_generator: Arc<dyn TimeGenerator>,
    unix_time_generator: Arc<dyn TimeGenerator>,
    name_generator: Arc<dyn NameGenerator>,
}

impl UuidFactory {
    /// Creates a factory with the default collaborators.
    pub fn new() -> Self {
        let number_converter: Arc<dyn NumberConverter> = Arc::new(BigNumberConverter);
        let time_converter: Arc<dyn TimeConverter> = Arc::new(GenericTimeConverter);
        let node_provider: Arc<dyn NodeProvider> = Arc::new(FallbackNodeProvider::default());
        let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider);
        Self {
            codec: Arc::new(StringCodec),
            builder: UuidBuilder::new(number_converter.clone(), time_converter.clone()),
            validator: Arc::new(GenericValidator),
            random_generator: Arc::new(RandomBytesGenerator::default()),
            time_generator: Arc::new(DefaultTimeGenerator::new(
                node_provider.clone(),
                time_converter.clone(),
                time_provider.clone(),
            )),
            unix_time_generator: new_unix_time_generator(time_provider.clone()),
            name_generator: Arc::new(DefaultNameGenerator),
            number_converter,
            time_converter,
            node_provider,
            time_provider,
        }
    }

    pub fn codec(&self) -> &Arc<dyn Codec> {
        &self.codec
    }

    pub fn number_converter(&self) -> &Arc<dyn NumberConverter> {
        &self.number_converter
    }

    pub fn time_converter(&self) -> &Arc<dyn TimeConverter> {
        &self.time_converter
    }

    pub fn builder(&self) -> &UuidBuilder {
        &self.builder
    }

    pub fn validator(&self) -> &Arc<dyn Validator> {
        &self.validator
    }

    pub fn node_provider(&self) -> &Arc<dyn NodeProvider> {
        &self.node_provider
    }

    pub fn time_provider(&self) -> &Arc<dyn TimeProvider> {
        &self.time_provider
    }

    pub fn random_generator(&self) -> &Arc<dyn RandomGenerator> {
        &self.random_generator
    }

    pub fn time_generator(&self) -> &Arc<dyn TimeGenerator> {
        &self.time_generator
    }

    pub fn unix_time_generator(&self) -> &Arc<dyn TimeGenerator> {
        &self.unix_time_generator
    }

    pub fn name_generator(&self) -> &Arc<dyn NameGenerator> {
        &self.name_generator
    }

    pub fn set_codec(&mut self, codec: Arc<dyn Codec>) {
        self.codec = codec;
    }

    /// Replaces the number converter and rebuilds the builder around it.
    pub fn set_number_converter(&mut self, number_converter: Arc<dyn NumberConverter>) {
        self.number_converter = number_converter;
        self.rebuild_builder();
    }

    /// Replaces the time converter and rebuilds the builder and the version 1 generator around
    /// it.
    pub fn set_time_converter(&mut self, time_converter: Arc<dyn TimeConverter>) {
        self.time_converter = time_converter;
        self.rebuild_builder();
        self.rebuild_time_generator();
    }

    /// Replaces the node provider and rebuilds the version 1 generator around it.
    pub fn set_node_provider(&mut self, node_provider: Arc<dyn NodeProvider>) {
        self.node_provider = node_provider;
        self.rebuild_time_generator();
    }

    /// Replaces the time provider and rebuilds the version 1 and version 7 generators around it.
    pub fn set_time_provider(&mut self, time_provider: Arc<dyn TimeProvider>) {
        self.time_provider = time_provider;
        self.rebuild_time_generator();
        self.unix_time_generator = new_unix_time_generator(self.time_provider.clone());
    }

    pub fn set_builder(&mut self, builder: UuidBuilder) {
        self.builder = builder;
    }

    pub fn set_validator(&mut self, validator: Arc<dyn Validator>) {
        self.validator = validator;
    }

    pub fn set_random_generator(&mut self, random_generator: Arc<dyn RandomGenerator>) {
        self.random_generator = random_generator;
    }

    pub fn set_time_generator(&mut self, time_generator: Arc<dyn TimeGenerator>) {
        self.time_generator = time_generator;
    }

    pub fn set_unix_time_generator(&mut self, unix_time_generator: Arc<dyn TimeGenerator>) {
        self.unix_time_generator = unix_time_generator;
    }

    pub fn set_name_generator(&mut self, name_generator: Arc<dyn NameGenerator>) {
        self.name_generator = name_generator;
    }

    fn rebuild_builder(&mut self) {
        self.builder = UuidBuilder::new(self.number_converter.clone(), self.time_converter.clone());
    }

    fn rebuild_time_generator(&mut self) {
        self.time_generator = Arc::new(DefaultTimeGenerator::new(
            self.node_provider.clone(),
            self.time_converter.clone(),
            self.time_provider.clone(),
        ));
    }

    /// Generates a version 1 identifier from a node, a clock sequence, and the current time.
    ///
    /// `node` defaults to the node provider's value and `clock_seq` to a random 14-bit number.
    pub fn uuid1(&self, node: Option<&Hexadecimal>, clock_seq: Option<u16>) -> Result<Uuid> {
        let bytes = self.time_generator.generate(node, clock_seq)?;
        self.uuid_from_bytes_and_version(bytes, Version::Time)
    }

    /// Generates a version 3 identifier from the MD5 hash of a namespace and a name.
    pub fn uuid3(&self, namespace: &Uuid, name: impl AsRef<[u8]>) -> Result<Uuid> {
        self.uuid_from_ns_and_name(namespace, name.as_ref(), HashAlgorithm::Md5)
    }

    /// Generates a version 4 identifier from random bytes.
    pub fn uuid4(&self) -> Result<Uuid> {
        let bytes = self.random_generator.generate_v4()?;
        self.uuid_from_bytes_and_version(bytes, Version::Random)
    }

    /// Generates a version 5 identifier from the SHA-1 hash of a namespace and a name.
    pub fn uuid5(&self, namespace: &Uuid, name: impl AsRef<[u8]>) -> Result<Uuid> {
        self.uuid_from_ns_and_name(namespace, name.as_ref(), HashAlgorithm::Sha1)
    }

    /// Generates a version 6 identifier: a version 1 layout with the timestamp reordered so that
    /// its most significant bits lead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::{Hexadecimal, UuidFactory, Version};
    ///
    /// let factory = UuidFactory::new();
    /// let node = Hexadecimal::new("0800200c9a66")?;
    /// let v6 = factory.uuid6(Some(&node), Some(0x0b21))?;
    /// assert_eq!(v6.version(), Some(Version::ReorderedTime));
    /// assert!(v6.to_string().ends_with("-8b21-0800200c9a66"));
    /// # Ok::<(), rfc4122::Error>(())
    /// ```
    pub fn uuid6(&self, node: Option<&Hexadecimal>, clock_seq: Option<u16>) -> Result<Uuid> {
        let v1 = self.time_generator.generate(node, clock_seq)?;
        let timestamp = u64::from_be_bytes([
            v1[6] & 0x0f,
            v1[7],
            v1[4],
            v1[5],
            v1[0],
            v1[1],
            v1[2],
            v1[3],
        ]);

        let mut bytes = [0u8; 16];
        bytes[0..6].copy_from_slice(&(timestamp >> 12).to_be_bytes()[2..]);
        bytes[6..8].copy_from_slice(&((timestamp & 0xfff) as u16).to_be_bytes());
        bytes[8..16].copy_from_slice(&v1[8..16]);
        self.uuid_from_bytes_and_version(bytes, Version::ReorderedTime)
    }

    /// Generates a version 7 identifier from the Unix time in milliseconds and a monotonic
    /// counter.
    pub fn uuid7(&self) -> Result<Uuid> {
        let bytes = self.unix_time_generator.generate(None, None)?;
        self.uuid_from_bytes_and_version(bytes, Version::UnixTime)
    }

    /// Reads the binary representation of the current codec.
    ///
    /// Fails with [`Error::InvalidArgument`](crate::Error::InvalidArgument) unless given exactly
    /// 16 bytes.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_bytes(&self, bytes: &[u8]) -> Result<Uuid> {
        let fields = self.codec.decode_bytes(bytes)?;
        Ok(self.builder.build_from_fields(self.codec.clone(), fields))
    }

    /// Parses a string representation with the current codec.
    ///
    /// Fails with [`Error::InvalidFormat`](crate::Error::InvalidFormat) if the codec does not
    /// accept `uuid`.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_string(&self, uuid: &str) -> Result<Uuid> {
        let fields = self.codec.decode(uuid)?;
        Ok(self.builder.build_from_fields(self.codec.clone(), fields))
    }

    /// Creates a value from the unsigned decimal integer of its binary representation.
    ///
    /// Fails with [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `integer` is not a
    /// non-negative decimal number below 2<sup>128</sup>.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::UuidFactory;
    ///
    /// let factory = UuidFactory::new();
    /// let uuid = factory.from_integer("339532337419071774304650190139318639206")?;
    /// assert_eq!(uuid.to_string(), "ff6f8cb0-c57d-11e1-8b21-0800200c9a66");
    /// # Ok::<(), rfc4122::Error>(())
    /// ```
    #[allow(clippy::wrong_self_convention)]
    pub fn from_integer(&self, integer: &str) -> Result<Uuid> {
        let hex = self.number_converter.to_hex(&Decimal::new(integer)?, 32)?;
        self.from_bytes(&hex.to_bytes())
    }

    /// Fails with [`Error::InvalidFormat`](crate::Error::InvalidFormat) if the validator rejects
    /// `uuid`.
    pub fn validate(&self, uuid: &str) -> Result<()> {
        self.validator.validate(uuid)
    }

    /// Returns `true` if the validator accepts `uuid`.
    pub fn is_valid(&self, uuid: &str) -> bool {
        self.validator.is_valid(uuid)
    }

    fn uuid_from_ns_and_name(
        &self,
        namespace: &Uuid,
        name: &[u8],
        algorithm: HashAlgorithm,
    ) -> Result<Uuid> {
        let bytes = self.name_generator.generate(namespace, name, algorithm)?;
        self.uuid_from_bytes_and_version(bytes, algorithm.version())
    }

    fn uuid_from_bytes_and_version(&self, mut bytes: [u8; 16], version: Version) -> Result<Uuid> {
        apply_version(&mut bytes, version);
        self.builder.build(self.codec.clone(), &bytes)
    }
}

impl Default for UuidFactory {
    fn default() -> Self {
        Self::new()
    }
}

fn new_unix_time_generator(time_provider: Arc<dyn TimeProvider>) -> Arc<dyn TimeGenerator> {
    Arc::new(UnixTimeGenerator::with_time_provider(
        Arc::new(RandomBytesGenerator::default()),
        time_provider,
    ))
}
