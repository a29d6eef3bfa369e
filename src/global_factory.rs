//! Default factory and entry point functions.

#![cfg(feature = "global_factory")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_factory")))]

use std::sync;

use crate::{Hexadecimal, Result, Uuid, UuidFactory};

fn registry() -> &'static sync::RwLock<sync::Arc<UuidFactory>> {
    static G: sync::OnceLock<sync::RwLock<sync::Arc<UuidFactory>>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
}

/// Returns the process-wide default factory, creating one with the default collaborators if none
/// exists.
pub fn get_factory() -> sync::Arc<UuidFactory> {
    registry()
        .read()
        .unwrap_or_else(sync::PoisonError::into_inner)
        .clone()
}

/// Replaces the process-wide default factory and returns the previous one.
///
/// The swap is atomic: a concurrent caller observes either the previous or the new factory.
/// Values created before the swap keep rendering with the collaborators they were built with.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use rfc4122::provider::FixedTimeProvider;
/// use rfc4122::{Time, UuidFactory};
///
/// let mut factory = UuidFactory::new();
/// factory.set_time_provider(Arc::new(FixedTimeProvider(Time::new(1_578_522_046, 0)?)));
/// let previous = rfc4122::set_factory(factory);
///
/// assert_eq!(rfc4122::uuid1(None, None)?.timestamp()?.seconds(), 1_578_522_046);
/// rfc4122::set_factory(previous);
/// # Ok::<(), rfc4122::Error>(())
/// ```
pub fn set_factory(factory: impl Into<sync::Arc<UuidFactory>>) -> sync::Arc<UuidFactory> {
    let factory = factory.into();
    log::debug!("replacing default factory with {factory:?}");
    let mut guard = registry()
        .write()
        .unwrap_or_else(sync::PoisonError::into_inner);
    std::mem::replace(&mut *guard, factory)
}

/// Generates a version 1 identifier with the default factory.
///
/// See [`UuidFactory::uuid1`].
pub fn uuid1(node: Option<&Hexadecimal>, clock_seq: Option<u16>) -> Result<Uuid> {
    get_factory().uuid1(node, clock_seq)
}

/// Generates a version 3 identifier with the default factory.
///
/// # Examples
///
/// ```rust
/// let dns = rfc4122::from_string(rfc4122::NAMESPACE_DNS)?;
/// let uuid = rfc4122::uuid3(&dns, "python.org")?;
/// assert_eq!(uuid.to_string(), "6fa459ea-ee8a-3ca4-894e-db77e160355e");
/// # Ok::<(), rfc4122::Error>(())
/// ```
pub fn uuid3(namespace: &Uuid, name: impl AsRef<[u8]>) -> Result<Uuid> {
    get_factory().uuid3(namespace, name)
}

/// Generates a version 4 identifier with the default factory.
///
/// # Examples
///
/// ```rust
/// let uuid = rfc4122::uuid4()?;
/// println!("{}", uuid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// println!("{:?}", uuid.bytes()); // as 16-byte big-endian array
/// # Ok::<(), rfc4122::Error>(())
/// ```
pub fn uuid4() -> Result<Uuid> {
    get_factory().uuid4()
}

/// Generates a version 5 identifier with the default factory.
pub fn uuid5(namespace: &Uuid, name: impl AsRef<[u8]>) -> Result<Uuid> {
    get_factory().uuid5(namespace, name)
}

/// Generates a version 6 identifier with the default factory.
pub fn uuid6(node: Option<&Hexadecimal>, clock_seq: Option<u16>) -> Result<Uuid> {
    get_factory().uuid6(node, clock_seq)
}

/// Generates a version 7 identifier with the default factory.
///
/// The default factory shares one version 7 generator across threads, so identifiers created
/// within the same process are monotonically ordered unless the system clock moves back by more
/// than ten seconds.
///
/// # Examples
///
/// ```rust
/// let uuid = rfc4122::uuid7()?;
/// println!("{}", uuid); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
/// # Ok::<(), rfc4122::Error>(())
/// ```
pub fn uuid7() -> Result<Uuid> {
    get_factory().uuid7()
}

/// Reads a binary representation with the default factory.
pub fn from_bytes(bytes: &[u8]) -> Result<Uuid> {
    get_factory().from_bytes(bytes)
}

/// Parses a string representation with the default factory.
pub fn from_string(uuid: &str) -> Result<Uuid> {
    get_factory().from_string(uuid)
}

/// Creates a value from a decimal integer string with the default factory.
pub fn from_integer(integer: &str) -> Result<Uuid> {
    get_factory().from_integer(integer)
}

/// Returns `true` if the default factory's validator accepts `uuid`.
///
/// # Examples
///
/// ```rust
/// assert!(rfc4122::is_valid("urn:uuid:ff6f8cb0-c57d-11e1-8b21-0800200c9a66"));
/// assert!(!rfc4122::is_valid("ff6f8cb0c57d11e18b210800200c9a66"));
/// ```
pub fn is_valid(uuid: &str) -> bool {
    get_factory().is_valid(uuid)
}

/// Serializes tests that replace or depend on the default factory.
#[cfg(test)]
fn lock_for_test() -> sync::MutexGuard<'static, ()> {
    static LOCK: sync::Mutex<()> = sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(sync::PoisonError::into_inner)
}
