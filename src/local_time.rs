// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * A time-of-day with nanosecond resolution and no associated date or zone.
 */

use std::fmt;

use crate::errors::Error;
use crate::period::Period;
use crate::units::{floor_mod, NANOSECONDS_PER_DAY, NANOSECONDS_PER_SECOND};

/// A wall-clock time of day, `[00:00:00.000000000, 24:00:00)`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalTime {
    nanosecond_of_day: i64,
}

impl LocalTime {
    /// Midnight, the start of the day.
    pub const MIDNIGHT: LocalTime = LocalTime { nanosecond_of_day: 0 };
    /// One nanosecond before the next midnight.
    pub const MAX: LocalTime = LocalTime { nanosecond_of_day: NANOSECONDS_PER_DAY - 1 };

    /// Makes a new `LocalTime` from hour, minute and second.
    ///
    /// Fails on invalid hour, minute and/or second.
    #[inline]
    pub fn from_hms(hour: u32, min: u32, sec: u32) -> LocalTime {
        LocalTime::try_from_hms(hour, min, sec).expect("invalid time")
    }

    /// Returns an error on invalid hour, minute and/or second.
    pub fn try_from_hms(hour: u32, min: u32, sec: u32) -> Result<LocalTime, Error> {
        LocalTime::try_from_hms_nano(hour, min, sec, 0)
    }

    /// Makes a new `LocalTime` from hour, minute, second and nanosecond.
    ///
    /// Fails on invalid components.
    #[inline]
    pub fn from_hms_nano(hour: u32, min: u32, sec: u32, nano: u32) -> LocalTime {
        LocalTime::try_from_hms_nano(hour, min, sec, nano).expect("invalid time")
    }

    /// Returns an error on invalid components.
    pub fn try_from_hms_nano(hour: u32, min: u32, sec: u32, nano: u32) -> Result<LocalTime, Error> {
        if hour >= 24 {
            return Err(Error::ArgumentOutOfRange { field: "hour", value: hour as i64, min: 0, max: 23 });
        }
        if min >= 60 {
            return Err(Error::ArgumentOutOfRange { field: "minute", value: min as i64, min: 0, max: 59 });
        }
        if sec >= 60 {
            return Err(Error::ArgumentOutOfRange { field: "second", value: sec as i64, min: 0, max: 59 });
        }
        if nano >= NANOSECONDS_PER_SECOND as u32 {
            return Err(Error::ArgumentOutOfRange {
                field: "nanosecond",
                value: nano as i64,
                min: 0,
                max: NANOSECONDS_PER_SECOND - 1,
            });
        }
        let nanosecond_of_day = ((hour as i64 * 3600 + min as i64 * 60 + sec as i64)
            * NANOSECONDS_PER_SECOND)
            + nano as i64;
        Ok(LocalTime { nanosecond_of_day })
    }

    /// Makes a `LocalTime` from a raw nanosecond-of-day value.
    ///
    /// Fails when `nanosecond_of_day` is outside `[0, 86_400_000_000_000)`.
    pub fn try_from_nanosecond_of_day(nanosecond_of_day: i64) -> Result<LocalTime, Error> {
        if !(0..NANOSECONDS_PER_DAY).contains(&nanosecond_of_day) {
            return Err(Error::ArgumentOutOfRange {
                field: "nanosecond_of_day",
                value: nanosecond_of_day,
                min: 0,
                max: NANOSECONDS_PER_DAY - 1,
            });
        }
        Ok(LocalTime { nanosecond_of_day })
    }

    /// The raw nanosecond-of-day value.
    #[inline]
    pub const fn nanosecond_of_day(&self) -> i64 {
        self.nanosecond_of_day
    }

    #[inline]
    pub fn hour(&self) -> u32 {
        (self.nanosecond_of_day / (3600 * NANOSECONDS_PER_SECOND)) as u32
    }

    #[inline]
    pub fn minute(&self) -> u32 {
        ((self.nanosecond_of_day / (60 * NANOSECONDS_PER_SECOND)) % 60) as u32
    }

    #[inline]
    pub fn second(&self) -> u32 {
        ((self.nanosecond_of_day / NANOSECONDS_PER_SECOND) % 60) as u32
    }

    #[inline]
    pub fn nanosecond(&self) -> u32 {
        (self.nanosecond_of_day % NANOSECONDS_PER_SECOND) as u32
    }

    /// Adds whole hours, wrapping modulo 24h. Returns the wrapped time and the
    /// number of whole days the wrap carried into (positive or negative).
    pub fn plus_hours(&self, hours: i64) -> (LocalTime, i64) {
        self.plus_nanoseconds(hours.saturating_mul(3600 * NANOSECONDS_PER_SECOND))
    }

    /// Adds whole minutes, wrapping modulo 24h, with day-carry like [`plus_hours`].
    pub fn plus_minutes(&self, minutes: i64) -> (LocalTime, i64) {
        self.plus_nanoseconds(minutes.saturating_mul(60 * NANOSECONDS_PER_SECOND))
    }

    /// Adds whole seconds, wrapping modulo 24h, with day-carry like [`plus_hours`].
    pub fn plus_seconds(&self, seconds: i64) -> (LocalTime, i64) {
        self.plus_nanoseconds(seconds.saturating_mul(NANOSECONDS_PER_SECOND))
    }

    /// Adds nanoseconds, wrapping modulo 24h, returning the wrapped time and the
    /// signed day-carry (matches spec.md §4.1's "wraps modulo 24h" rule).
    pub fn plus_nanoseconds(&self, nanos: i64) -> (LocalTime, i64) {
        let total = self.nanosecond_of_day + nanos;
        let wrapped = floor_mod(total, NANOSECONDS_PER_DAY);
        let days = crate::units::floor_div(total, NANOSECONDS_PER_DAY);
        (LocalTime { nanosecond_of_day: wrapped }, days)
    }

    /// Adds a time-only `Period` (no date units), wrapping modulo 24h.
    ///
    /// Fails with `Error::InvalidPeriod` if `period` carries any date unit.
    pub fn plus_period(&self, period: &Period) -> Result<(LocalTime, i64), Error> {
        if period.has_date_component() {
            return Err(Error::InvalidPeriod("cannot add a date-bearing period to a LocalTime"));
        }
        let nanos = period.total_time_nanoseconds();
        Ok(self.plus_nanoseconds(nanos))
    }
}

impl fmt::Debug for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour(), self.minute(), self.second())?;
        let nano = self.nanosecond();
        if nano != 0 {
            write!(f, ".{nano:09}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct_and_read_back() {
        let t = LocalTime::from_hms_nano(13, 45, 6, 7);
        assert_eq!((t.hour(), t.minute(), t.second(), t.nanosecond()), (13, 45, 6, 7));
    }

    #[test]
    fn wraps_past_midnight() {
        let t = LocalTime::from_hms(23, 30, 0);
        let (wrapped, days) = t.plus_hours(2);
        assert_eq!(wrapped, LocalTime::from_hms(1, 30, 0));
        assert_eq!(days, 1);
    }

    #[test]
    fn wraps_before_midnight() {
        let t = LocalTime::from_hms(0, 30, 0);
        let (wrapped, days) = t.plus_hours(-2);
        assert_eq!(wrapped, LocalTime::from_hms(22, 30, 0));
        assert_eq!(days, -1);
    }

    #[test]
    fn rejects_invalid_hour() {
        assert!(LocalTime::try_from_hms(24, 0, 0).is_err());
    }
}
