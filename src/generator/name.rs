//! Version 3 and 5 generator.

use md5::{Digest, Md5};
use sha1::Sha1;

use super::{apply_version, HashAlgorithm, NameGenerator};
use crate::{Result, Uuid};

/// Default [`NameGenerator`], hashing the namespace bytes followed by the name.
///
/// Version 3 uses the MD5 digest; version 5 uses the first 16 bytes of the SHA-1 digest.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct DefaultNameGenerator;

impl NameGenerator for DefaultNameGenerator {
    fn generate(
        &self,
        namespace: &Uuid,
        name: &[u8],
        algorithm: HashAlgorithm,
    ) -> Result<[u8; 16]> {
        let namespace = namespace.bytes();
        let mut bytes = [0u8; 16];
        match algorithm {
            HashAlgorithm::Md5 => {
                let mut hasher = Md5::new();
                hasher.update(namespace);
                hasher.update(name);
                bytes.copy_from_slice(&hasher.finalize());
            }
            HashAlgorithm::Sha1 => {
                let mut hasher = Sha1::new();
                hasher.update(namespace);
                hasher.update(name);
                bytes.copy_from_slice(&hasher.finalize()[..16]);
            }
        }
        apply_version(&mut bytes, algorithm.version());
        Ok(bytes)
    }
}
