//! RFC 4122 UUID generation, parsing, and representation with pluggable components
//!
//! ```rust
//! let uuid = rfc4122::uuid4()?;
//! println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//! println!("{}", uuid.urn()); // e.g. "urn:uuid:2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//!
//! let dns = rfc4122::from_string(rfc4122::NAMESPACE_DNS)?;
//! let uuid = rfc4122::uuid5(&dns, "python.org")?;
//! assert_eq!(uuid.to_string(), "886313e1-3b8a-5372-9b90-0c9aee199e5d");
//! # Ok::<(), rfc4122::Error>(())
//! ```
//!
//! See [RFC 4122](https://www.rfc-editor.org/rfc/rfc4122).
//!
//! # Field and bit layout
//!
//! Every identifier is viewed through the RFC 4122 field layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          time_low                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |       time_mid                |  ver  |      time_hi          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|  clock_seq_hi |  clock_seq_low |        node (0-1)        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                         node (2-5)                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The `var` field, one to three bits wide, selects the layout family ([`Variant`]). Only
//!   under [`Variant::Rfc4122`] does the 4-bit `ver` field name a [`Version`].
//! - Versions 1, 2, and 6 carry a 60-bit count of 100-nanosecond intervals since
//!   1582-10-15T00:00:00Z, a 14-bit clock sequence, and a 48-bit node.
//! - Versions 3 and 5 carry a truncated MD5 or SHA-1 hash of a namespace and a name.
//! - Version 4 carries 122 random bits.
//! - Version 7 carries the Unix time in milliseconds in its first 48 bits, followed by a
//!   42-bit counter and 32 random bits.
//!
//! # Components
//!
//! A [`UuidFactory`] wires together small, independently replaceable components:
//!
//! | Capability                                        | Default                                   |
//! | ------------------------------------------------- | ----------------------------------------- |
//! | [`NumberConverter`](converter::NumberConverter)   | [`BigNumberConverter`](converter::BigNumberConverter) |
//! | [`TimeConverter`](converter::TimeConverter)       | [`GenericTimeConverter`](converter::GenericTimeConverter) |
//! | [`Codec`](codec::Codec)                           | [`StringCodec`](codec::StringCodec)       |
//! | [`Validator`](validator::Validator)               | [`GenericValidator`](validator::GenericValidator) |
//! | [`RandomGenerator`](generator::RandomGenerator)   | [`RandomBytesGenerator`](generator::RandomBytesGenerator) |
//! | [`TimeGenerator`](generator::TimeGenerator)       | [`DefaultTimeGenerator`](generator::DefaultTimeGenerator), [`UnixTimeGenerator`](generator::UnixTimeGenerator) |
//! | [`NameGenerator`](generator::NameGenerator)       | [`DefaultNameGenerator`](generator::DefaultNameGenerator) |
//! | [`NodeProvider`](provider::NodeProvider)          | [`FallbackNodeProvider`](provider::FallbackNodeProvider) |
//! | [`TimeProvider`](provider::TimeProvider)          | [`SystemTimeProvider`](provider::SystemTimeProvider) |
//!
//! Each [`Uuid`] keeps the codec and converters in effect when it was created, so replacing a
//! component never changes how an existing value renders itself.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use rfc4122::codec::TimestampFirstCombCodec;
//! use rfc4122::generator::CombGenerator;
//! use rfc4122::UuidFactory;
//!
//! let mut factory = UuidFactory::new();
//! let before = factory.uuid4()?;
//!
//! factory.set_random_generator(Arc::new(CombGenerator::new(
//!     factory.random_generator().clone(),
//!     factory.number_converter().clone(),
//! )));
//! factory.set_codec(Arc::new(TimestampFirstCombCodec));
//! let after = factory.uuid4()?;
//! println!("{}", after); // leads with a timestamp
//!
//! assert_eq!(factory.from_string(&after.to_string())?, after);
//! assert_eq!(before.to_string().len(), after.to_string().len());
//! assert_ne!(factory.from_string(&before.to_string())?, before);
//! # Ok::<(), rfc4122::Error>(())
//! ```
//!
//! # Crate features
//!
//! Default features:
//!
//! - `global_factory`: enables the process-wide default factory and the entry point functions
//!   such as [`uuid4()`] and [`from_string()`].
//!
//! Optional features:
//!
//! - `serde`: enables serialization and deserialization of [`Uuid`] as its string form.
//! - `uuid`: enables conversion to and from [`uuid::Uuid`](https://docs.rs/uuid).

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
pub use builder::UuidBuilder;

pub mod codec;

pub mod converter;

mod error;
pub use error::{Error, ErrorKind, Result};

mod factory;
pub use factory::UuidFactory;

mod fields;
pub use fields::{Fields, Variant, Version};

pub mod generator;

mod global_factory;
#[cfg(feature = "global_factory")]
pub use global_factory::{
    from_bytes, from_integer, from_string, get_factory, is_valid, set_factory, uuid1, uuid3,
    uuid4, uuid5, uuid6, uuid7,
};

mod id;
pub use id::{Uuid, MAX, NAMESPACE_DNS, NAMESPACE_OID, NAMESPACE_URL, NAMESPACE_X500, NIL};

pub mod provider;

mod types;
pub use types::{Decimal, Hexadecimal, Time};

pub mod validator;
