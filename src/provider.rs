//! Environment probes feeding the time-based generators.
//!
//! Each provider is an independently swappable capability. Node providers that can fail are
//! combined with a [`FallbackNodeProvider`]; the default chain ends with a
//! [`RandomNodeProvider`], which always yields a value.

use std::fmt;

use crate::{Hexadecimal, Result, Time};

mod node;
pub use node::{FallbackNodeProvider, RandomNodeProvider, StaticNodeProvider, SystemNodeProvider};

mod time;
pub use time::{FixedTimeProvider, SystemTimeProvider};

/// Supplies the 48-bit node identifier embedded in time-based UUIDs.
pub trait NodeProvider: fmt::Debug + Send + Sync {
    /// Returns the node identifier as 12 hexadecimal digits.
    ///
    /// Fails with [`Error::UnsatisfiedDependency`](crate::Error::UnsatisfiedDependency) if the
    /// provider cannot determine a node.
    fn get_node(&self) -> Result<Hexadecimal>;
}

/// Supplies the current time.
pub trait TimeProvider: fmt::Debug + Send + Sync {
    fn get_time(&self) -> Result<Time>;
}
