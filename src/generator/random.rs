//! Cryptographically strong random bytes.

use std::{fmt, sync};

use rand::rngs::{adapter::ReseedingRng, OsRng};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha12Core;

use super::RandomGenerator;
use crate::{Error, Result};

type ReseedingChaCha = ReseedingRng<ChaCha12Core, OsRng>;

/// Default [`RandomGenerator`].
///
/// Employs [`ChaCha12Core`] with a [`ReseedingRng`] wrapper, reseeded from the operating system
/// every 64 KiB, to emulate the strategy used by [`rand::rngs::ThreadRng`] while being shareable
/// across threads. The core is seeded lazily on first use so that an unavailable entropy source
/// surfaces as an error from [`generate`](RandomGenerator::generate).
#[derive(Default)]
pub struct RandomBytesGenerator {
    rng: sync::Mutex<Option<ReseedingChaCha>>,
}

impl fmt::Debug for RandomBytesGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomBytesGenerator").finish_non_exhaustive()
    }
}

impl RandomGenerator for RandomBytesGenerator {
    fn generate(&self, length: usize) -> Result<Vec<u8>> {
        let mut guard = self.rng.lock().unwrap_or_else(sync::PoisonError::into_inner);
        let rng = match guard.take() {
            Some(rng) => rng,
            None => new_rng()?,
        };
        let rng = guard.insert(rng);

        let mut bytes = vec![0u8; length];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|err| Error::unsatisfied(format!("could not read random bytes: {err}")))?;
        Ok(bytes)
    }
}

fn new_rng() -> Result<ReseedingChaCha> {
    let core = ChaCha12Core::from_rng(OsRng)
        .map_err(|err| Error::unsatisfied(format!("could not seed random generator: {err}")))?;
    Ok(ReseedingRng::new(core, 1024 * 64, OsRng))
}
