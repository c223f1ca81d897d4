// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * An elapsed amount of time between two `Instant`s, independent of any
 * calendar or zone.
 */

use std::fmt;
use std::ops::{Add, Neg, Sub};

use crate::errors::Error;
use crate::units::{
    NANOSECONDS_PER_TICK, TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MILLISECOND, TICKS_PER_MINUTE,
    TICKS_PER_SECOND,
};

/// A signed span of time, stored as 100-nanosecond ticks.
///
/// `Duration` is total-ordered and forms a 1-D axis with `Instant`:
/// `Instant + Duration = Instant`, `Instant - Instant = Duration`.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    ticks: i64,
}

impl Duration {
    /// The zero duration.
    pub const ZERO: Duration = Duration { ticks: 0 };
    /// The smallest representable duration.
    pub const MIN: Duration = Duration { ticks: i64::MIN };
    /// The largest representable duration.
    pub const MAX: Duration = Duration { ticks: i64::MAX };

    /// Makes a new `Duration` from a raw tick count.
    #[inline]
    pub const fn from_ticks(ticks: i64) -> Duration {
        Duration { ticks }
    }

    /// Makes a new `Duration` from whole nanoseconds, truncating to the tick resolution.
    #[inline]
    pub const fn from_nanoseconds(nanos: i64) -> Duration {
        Duration { ticks: nanos / NANOSECONDS_PER_TICK }
    }

    /// Makes a new `Duration` from whole milliseconds.
    ///
    /// Fails on overflow.
    #[inline]
    pub fn from_milliseconds(millis: i64) -> Duration {
        Duration::try_from_milliseconds(millis).expect("duration out of range")
    }

    /// Returns `None` on overflow instead of panicking.
    #[inline]
    pub fn try_from_milliseconds(millis: i64) -> Option<Duration> {
        millis.checked_mul(TICKS_PER_MILLISECOND).map(|ticks| Duration { ticks })
    }

    /// Makes a new `Duration` from whole seconds.
    ///
    /// Fails on overflow.
    #[inline]
    pub fn from_seconds(secs: i64) -> Duration {
        Duration::try_from_seconds(secs).expect("duration out of range")
    }

    #[inline]
    pub fn try_from_seconds(secs: i64) -> Option<Duration> {
        secs.checked_mul(TICKS_PER_SECOND).map(|ticks| Duration { ticks })
    }

    /// Makes a new `Duration` from whole minutes.
    ///
    /// Fails on overflow.
    #[inline]
    pub fn from_minutes(mins: i64) -> Duration {
        Duration::try_from_minutes(mins).expect("duration out of range")
    }

    #[inline]
    pub fn try_from_minutes(mins: i64) -> Option<Duration> {
        mins.checked_mul(TICKS_PER_MINUTE).map(|ticks| Duration { ticks })
    }

    /// Makes a new `Duration` from whole hours.
    ///
    /// Fails on overflow.
    #[inline]
    pub fn from_hours(hours: i64) -> Duration {
        Duration::try_from_hours(hours).expect("duration out of range")
    }

    #[inline]
    pub fn try_from_hours(hours: i64) -> Option<Duration> {
        hours.checked_mul(TICKS_PER_HOUR).map(|ticks| Duration { ticks })
    }

    /// Makes a new `Duration` from whole days (each exactly 24 hours).
    ///
    /// Fails on overflow.
    #[inline]
    pub fn from_days(days: i64) -> Duration {
        Duration::try_from_days(days).expect("duration out of range")
    }

    #[inline]
    pub fn try_from_days(days: i64) -> Option<Duration> {
        days.checked_mul(TICKS_PER_DAY).map(|ticks| Duration { ticks })
    }

    /// The raw tick count.
    #[inline]
    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    /// The duration expressed in whole nanoseconds (may truncate for huge durations,
    /// since a tick is not evenly divisible past `i64` range; in practice the product
    /// fits since ticks are already sub-second-resolution fractions of the same range).
    #[inline]
    pub const fn nanoseconds(&self) -> i128 {
        self.ticks as i128 * NANOSECONDS_PER_TICK as i128
    }

    /// Integer factor multiplication.
    ///
    /// Fails on overflow.
    #[inline]
    pub fn checked_mul(&self, factor: i64) -> Option<Duration> {
        self.ticks.checked_mul(factor).map(|ticks| Duration { ticks })
    }

    /// The absolute value of this duration.
    ///
    /// Fails on overflow (only possible for `Duration::MIN`).
    #[inline]
    pub fn abs(&self) -> Duration {
        Duration { ticks: self.ticks.wrapping_abs() }
    }

    /// The negation of this duration.
    #[inline]
    pub fn negate(&self) -> Duration {
        -*self
    }

    /// Checked addition; fails with `Error::ArithmeticOverflow` instead of panicking.
    #[inline]
    pub fn checked_add(&self, rhs: Duration) -> Result<Duration, Error> {
        self.ticks
            .checked_add(rhs.ticks)
            .map(|ticks| Duration { ticks })
            .ok_or(Error::ArithmeticOverflow)
    }

    /// Checked subtraction; fails with `Error::ArithmeticOverflow` instead of panicking.
    #[inline]
    pub fn checked_sub(&self, rhs: Duration) -> Result<Duration, Error> {
        self.ticks
            .checked_sub(rhs.ticks)
            .map(|ticks| Duration { ticks })
            .ok_or(Error::ArithmeticOverflow)
    }
}

impl Add for Duration {
    type Output = Duration;

    #[inline]
    fn add(self, rhs: Duration) -> Duration {
        Duration { ticks: self.ticks + rhs.ticks }
    }
}

impl Sub for Duration {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Duration) -> Duration {
        Duration { ticks: self.ticks - rhs.ticks }
    }
}

impl Neg for Duration {
    type Output = Duration;

    #[inline]
    fn neg(self) -> Duration {
        Duration { ticks: -self.ticks }
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.ticks < 0 { "-" } else { "" };
        let total = self.ticks.unsigned_abs();
        let secs = total / TICKS_PER_SECOND as u64;
        let frac = total % TICKS_PER_SECOND as u64;
        if frac == 0 {
            write!(f, "{sign}PT{secs}S")
        } else {
            write!(f, "{sign}PT{secs}.{frac:07}S")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub_roundtrip() {
        let a = Duration::from_hours(5);
        let b = Duration::from_minutes(30);
        assert_eq!(a + b - a, b);
        assert_eq!(a - a, Duration::ZERO);
    }

    #[test]
    fn negate_abs() {
        let d = Duration::from_seconds(-42);
        assert_eq!(d.negate(), Duration::from_seconds(42));
        assert_eq!(d.abs(), Duration::from_seconds(42));
    }

    #[test]
    fn overflow_checked() {
        assert!(Duration::MAX.checked_add(Duration::from_ticks(1)).is_err());
    }
}
