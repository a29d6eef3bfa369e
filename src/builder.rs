use std::sync::Arc;

use crate::codec::Codec;
use crate::converter::{BigNumberConverter, GenericTimeConverter, NumberConverter, TimeConverter};
use crate::{Fields, Result, Uuid};

/// Assembles [`Uuid`] values from raw bytes, binding the collaborators every value needs for its
/// derived views.
#[derive(Clone, Debug)]
pub struct UuidBuilder {
    number_converter: Arc<dyn NumberConverter>,
    time_converter: Arc<dyn TimeConverter>,
}

impl UuidBuilder {
    pub fn new(
        number_converter: Arc<dyn NumberConverter>,
        time_converter: Arc<dyn TimeConverter>,
    ) -> Self {
        Self {
            number_converter,
            time_converter,
        }
    }

    /// Builds a value from 16 bytes in RFC 4122 field order, bound to `codec`.
    ///
    /// The bytes are taken as they are; the codec's binary permutation is not applied.
    ///
    /// Fails with [`Error::InvalidArgument`](crate::Error::InvalidArgument) unless given exactly
    /// 16 bytes.
    pub fn build(&self, codec: Arc<dyn Codec>, bytes: &[u8]) -> Result<Uuid> {
        Ok(self.build_from_fields(codec, Fields::try_from(bytes)?))
    }

    /// Builds a value from decoded fields, bound to `codec`.
    pub fn build_from_fields(&self, codec: Arc<dyn Codec>, fields: Fields) -> Uuid {
        Uuid::new(
            fields,
            codec,
            Arc::clone(&self.number_converter),
            Arc::clone(&self.time_converter),
        )
    }
}

impl Default for UuidBuilder {
    fn default() -> Self {
        Self::new(Arc::new(BigNumberConverter), Arc::new(GenericTimeConverter))
    }
}
