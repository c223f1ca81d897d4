// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * A point on the continuous UTC timeline, independent of any zone or calendar.
 */

use std::fmt;
use std::ops::{Add, Sub};

use crate::duration::Duration;
use crate::errors::Error;
use crate::offset::Offset;
use crate::offset_date_time::OffsetDateTime;
use crate::units::TICKS_PER_SECOND;
use crate::zone::DateTimeZone;
use crate::zoned_date_time::ZonedDateTime;

/// A point on the timeline, stored as ticks (100ns units) since the Unix epoch.
///
/// The timeline has no leap seconds: it is a continuous tick axis.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    ticks: i64,
}

impl Instant {
    /// The earliest representable instant.
    pub const MIN: Instant = Instant { ticks: i64::MIN };
    /// The latest representable instant.
    pub const MAX: Instant = Instant { ticks: i64::MAX };
    /// The Unix epoch, 1970-01-01T00:00:00Z.
    pub const UNIX_EPOCH: Instant = Instant { ticks: 0 };

    /// Makes a new `Instant` from a raw tick count since the Unix epoch.
    #[inline]
    pub const fn from_unix_ticks(ticks: i64) -> Instant {
        Instant { ticks }
    }

    /// Makes a new `Instant` from whole seconds since the Unix epoch.
    #[inline]
    pub fn from_unix_seconds(secs: i64) -> Instant {
        Instant { ticks: secs.saturating_mul(TICKS_PER_SECOND) }
    }

    /// The raw tick count since the Unix epoch.
    #[inline]
    pub const fn unix_ticks(&self) -> i64 {
        self.ticks
    }

    /// Adds a `Duration`, panicking on overflow.
    #[inline]
    pub fn plus(&self, d: Duration) -> Instant {
        self.checked_plus(d).expect("instant arithmetic overflow")
    }

    /// Adds a `Duration`, returning a structured error on overflow.
    #[inline]
    pub fn checked_plus(&self, d: Duration) -> Result<Instant, Error> {
        self.ticks
            .checked_add(d.ticks())
            .map(|ticks| Instant { ticks })
            .ok_or(Error::ArithmeticOverflow)
    }

    /// Subtracts another `Instant`, yielding the `Duration` between them.
    #[inline]
    pub fn minus(&self, other: Instant) -> Duration {
        self.checked_minus(other).expect("instant arithmetic overflow")
    }

    /// Subtracts another `Instant`, returning a structured error on overflow.
    #[inline]
    pub fn checked_minus(&self, other: Instant) -> Result<Duration, Error> {
        self.ticks
            .checked_sub(other.ticks)
            .map(Duration::from_ticks)
            .ok_or(Error::ArithmeticOverflow)
    }

    /// Pairs this instant with an explicit `Offset`, producing an `OffsetDateTime`.
    pub fn with_offset(&self, offset: Offset) -> OffsetDateTime {
        OffsetDateTime::from_instant(*self, offset)
    }

    /// Pairs this instant with the UTC offset (zero).
    pub fn in_utc(&self) -> ZonedDateTime {
        ZonedDateTime::from_instant(*self, DateTimeZone::utc())
    }

    /// Resolves this instant in the given zone, producing a `ZonedDateTime`.
    pub fn in_zone(&self, zone: DateTimeZone) -> ZonedDateTime {
        ZonedDateTime::from_instant(*self, zone)
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    #[inline]
    fn add(self, rhs: Duration) -> Instant {
        self.plus(rhs)
    }
}

impl Sub<Duration> for Instant {
    type Output = Instant;

    #[inline]
    fn sub(self, rhs: Duration) -> Instant {
        self.plus(-rhs)
    }
}

impl Sub<Instant> for Instant {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Instant) -> Duration {
        self.minus(rhs)
    }
}

impl fmt::Debug for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.with_offset(Offset::UTC))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_duration_roundtrip() {
        let a = Instant::from_unix_seconds(1_000_000);
        let d = Duration::from_hours(3);
        assert_eq!((a + d) - a, d);
        assert_eq!(a - a, Duration::ZERO);
    }

    #[test]
    fn checked_plus_overflow() {
        assert!(Instant::MAX.checked_plus(Duration::from_ticks(1)).is_err());
    }
}
