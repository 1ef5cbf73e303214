use serde::{Deserialize, Serialize};
use tz::TimeZoneRef;
use std::time::Duration;

/// Whole seconds from UNIX_EPOCH. Age arithmetic never needs sub-second
/// resolution, so none is carried.
#[derive(Deserialize, Serialize, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Debug)]
pub struct UnixMoment(i64);

impl UnixMoment {
    pub fn new(s: impl Into<i64>) -> Self {
        Self(s.into())
    }
    pub fn now() -> Self {
        let sys_t = std::time::SystemTime::now();
        let d = sys_t
            .duration_since(std::time::UNIX_EPOCH)
            .expect("Could not get current SystemTime");
        Self(d.as_secs() as i64)
    }
    pub fn seconds(&self) -> i64 {
        self.0
    }
    /// Returns seconds between UnixMoments.
    /// Negative seconds indicate that the given UnixMoment is before
    /// (less than) this one.
    pub fn seconds_until(&self, rhs: Self) -> i64 {
        rhs.0 - self.0
    }
    pub fn as_datetime(&self, tzref: TimeZoneRef) -> Option<tz::DateTime> {
        tz::DateTime::from_timespec(self.0, 0, tzref).ok()
    }
}

impl std::ops::Add<Duration> for UnixMoment {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs.as_secs() as i64)
    }
}

impl std::ops::Sub<Duration> for UnixMoment {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        Self(self.0 - rhs.as_secs() as i64)
    }
}
