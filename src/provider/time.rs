//! Time providers.

use std::time::{SystemTime, UNIX_EPOCH};

use super::TimeProvider;
use crate::{Error, Result, Time};

/// Samples the system clock.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn get_time(&self) -> Result<Time> {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| Error::unsatisfied("system clock is set before the Unix epoch"))?;
        Time::new(elapsed.as_secs() as i64, elapsed.subsec_micros())
    }
}

/// Returns the same time on every call.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct FixedTimeProvider(pub Time);

impl TimeProvider for FixedTimeProvider {
    fn get_time(&self) -> Result<Time> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{FixedTimeProvider, SystemTimeProvider, TimeProvider};
    use crate::Time;

    /// Returns the fixed time verbatim
    #[test]
    fn returns_the_fixed_time_verbatim() {
        let time = Time::new(1_578_522_046, 10_000).unwrap();
        assert_eq!(FixedTimeProvider(time).get_time().unwrap(), time);
    }

    /// Reads an up-to-date system time
    #[test]
    fn reads_an_up_to_date_system_time() {
        use std::time;
        let now = time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_secs() as i64;
        let time = SystemTimeProvider.get_time().unwrap();
        assert!((time.seconds() - now).abs() < 2);
    }
}
