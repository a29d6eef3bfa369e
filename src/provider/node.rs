//! Node identifier providers.

use std::sync::{Arc, OnceLock};

use rand::{rngs::OsRng, RngCore};

use super::NodeProvider;
use crate::{Error, Hexadecimal, Result};

/// Provides a fixed, caller-supplied node.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct StaticNodeProvider {
    node: Hexadecimal,
}

impl StaticNodeProvider {
    /// Creates a provider returning `node` left-padded to 12 digits.
    ///
    /// Fails with [`Error::InvalidArgument`] if `node` is wider than 48 bits.
    pub fn new(node: &Hexadecimal) -> Result<Self> {
        Ok(Self {
            node: node.pad(12)?,
        })
    }
}

impl NodeProvider for StaticNodeProvider {
    fn get_node(&self) -> Result<Hexadecimal> {
        Ok(self.node.clone())
    }
}

/// Provides the hardware address of a network interface of the host.
///
/// The lookup runs once per provider; its outcome is cached. On Linux the first non-zero
/// `/sys/class/net/*/address` in interface name order is used. Other platforms report
/// [`Error::UnsatisfiedDependency`].
#[derive(Debug, Default)]
pub struct SystemNodeProvider {
    node: OnceLock<Option<Hexadecimal>>,
}

impl NodeProvider for SystemNodeProvider {
    fn get_node(&self) -> Result<Hexadecimal> {
        self.node
            .get_or_init(lookup_system_node)
            .clone()
            .ok_or_else(|| Error::unsatisfied("no network interface address available"))
    }
}

#[cfg(target_os = "linux")]
fn lookup_system_node() -> Option<Hexadecimal> {
    let mut paths: Vec<_> = std::fs::read_dir("/sys/class/net")
        .ok()?
        .filter_map(|e| e.ok().map(|e| e.path().join("address")))
        .collect();
    paths.sort();
    paths.iter().find_map(|path| {
        let text = std::fs::read_to_string(path).ok()?;
        let node = parse_mac_address(text.trim());
        if node.is_none() {
            log::debug!("skipping interface address at {}", path.display());
        }
        node
    })
}

#[cfg(not(target_os = "linux"))]
fn lookup_system_node() -> Option<Hexadecimal> {
    None
}

/// Parses a colon-separated 48-bit hardware address, rejecting the all-zero address.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_mac_address(src: &str) -> Option<Hexadecimal> {
    let parts: Vec<&str> = src.split(':').collect();
    if parts.len() != 6 || parts.iter().any(|e| e.len() != 2) {
        return None;
    }
    let node = Hexadecimal::new(&parts.concat()).ok()?;
    (node.as_str() != "000000000000").then_some(node)
}

/// Provides a random node with the multicast bit set (RFC 4122, section 4.5), generated once per
/// provider.
#[derive(Debug, Default)]
pub struct RandomNodeProvider {
    node: OnceLock<Hexadecimal>,
}

impl NodeProvider for RandomNodeProvider {
    fn get_node(&self) -> Result<Hexadecimal> {
        if let Some(node) = self.node.get() {
            return Ok(node.clone());
        }
        let mut bytes = [0u8; 6];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|err| Error::unsatisfied(format!("could not read random bytes: {err}")))?;
        bytes[0] |= 0x01;
        Ok(self
            .node
            .get_or_init(|| Hexadecimal::from_bytes(&bytes))
            .clone())
    }
}

/// Tries a list of providers in order and returns the first node obtained.
#[derive(Clone, Debug)]
pub struct FallbackNodeProvider {
    providers: Vec<Arc<dyn NodeProvider>>,
}

impl FallbackNodeProvider {
    pub fn new(providers: Vec<Arc<dyn NodeProvider>>) -> Self {
        Self { providers }
    }
}

impl Default for FallbackNodeProvider {
    /// Returns a provider preferring the host address and falling back to a random node.
    fn default() -> Self {
        Self::new(vec![
            Arc::new(SystemNodeProvider::default()),
            Arc::new(RandomNodeProvider::default()),
        ])
    }
}

impl NodeProvider for FallbackNodeProvider {
    fn get_node(&self) -> Result<Hexadecimal> {
        for provider in &self.providers {
            match provider.get_node() {
                Ok(node) => return Ok(node),
                Err(err) => log::debug!("node provider {provider:?} failed: {err}"),
            }
        }
        log::warn!("every node provider failed");
        Err(Error::unsatisfied("unable to find a suitable node provider"))
    }
}
