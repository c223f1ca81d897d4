// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * A constant displacement from UTC, e.g. `-07:00`.
 *
 * Stored as signed seconds, the unit chosen in DESIGN.md's resolution of the
 * "offset representation" open question. The practical recommended bound is
 * ±18 hours, but the stored range is the historical `(-24h, +24h)` exclusive
 * — values outside that are reduced modulo 24h on construction rather than
 * rejected, matching spec.md §3's documented historical behavior.
 */

use std::fmt;
use std::ops::{Add, Neg, Sub};

use crate::duration::Duration;
use crate::units::{floor_mod, SECONDS_PER_DAY, SECONDS_PER_HOUR};

/// A UTC offset, stored as seconds.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Offset {
    seconds: i32,
}

impl Offset {
    /// The zero offset (UTC).
    pub const UTC: Offset = Offset { seconds: 0 };
    /// The practical recommended minimum, -18 hours.
    pub const MIN: Offset = Offset { seconds: -18 * SECONDS_PER_HOUR };
    /// The practical recommended maximum, +18 hours.
    pub const MAX: Offset = Offset { seconds: 18 * SECONDS_PER_HOUR };

    /// Makes an `Offset` from a signed second count, reducing modulo 24h if needed.
    #[inline]
    pub fn from_seconds(seconds: i32) -> Offset {
        let reduced = floor_mod(seconds as i64 + SECONDS_PER_DAY as i64, 2 * SECONDS_PER_DAY as i64)
            - SECONDS_PER_DAY as i64;
        Offset { seconds: reduced as i32 }
    }

    /// Makes an `Offset` from whole hours and minutes; the sign of `hours` is applied
    /// to both components (pass a negative zero via `hours = 0, minutes` negative for
    /// offsets like `-00:30`).
    #[inline]
    pub fn from_hours_minutes(hours: i32, minutes: i32) -> Offset {
        let sign = if hours < 0 || minutes < 0 { -1 } else { 1 };
        let total = hours.abs() * SECONDS_PER_HOUR + minutes.abs() * 60;
        Offset::from_seconds(sign * total)
    }

    /// Makes an `Offset` from whole hours.
    #[inline]
    pub fn from_hours(hours: i32) -> Offset {
        Offset::from_seconds(hours * SECONDS_PER_HOUR)
    }

    /// The raw second count.
    #[inline]
    pub const fn total_seconds(&self) -> i32 {
        self.seconds
    }

    /// This offset as a `Duration` (`local - utc`).
    #[inline]
    pub fn as_duration(&self) -> Duration {
        Duration::from_seconds(self.seconds as i64)
    }

    /// The negation of this offset.
    #[inline]
    pub fn negate(&self) -> Offset {
        -*self
    }
}

impl Add for Offset {
    type Output = Offset;

    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset::from_seconds(self.seconds + rhs.seconds)
    }
}

impl Sub for Offset {
    type Output = Offset;

    #[inline]
    fn sub(self, rhs: Offset) -> Offset {
        Offset::from_seconds(self.seconds - rhs.seconds)
    }
}

impl Neg for Offset {
    type Output = Offset;

    #[inline]
    fn neg(self) -> Offset {
        Offset { seconds: -self.seconds }
    }
}

impl fmt::Debug for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.seconds < 0 { '-' } else { '+' };
        let total = self.seconds.unsigned_abs();
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let secs = total % 60;
        if secs == 0 {
            write!(f, "{sign}{hours:02}:{minutes:02}")
        } else {
            write!(f, "{sign}{hours:02}:{minutes:02}:{secs:02}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s5_offset_arithmetic() {
        let a = Offset::from_hours_minutes(5, 30);
        let b = Offset::from_hours_minutes(-2, 0);
        assert_eq!(a + b, Offset::from_hours_minutes(3, 30));
    }

    #[test]
    fn wraps_modulo_24h() {
        let o = Offset::from_seconds(25 * SECONDS_PER_HOUR);
        assert!(o.total_seconds().abs() < SECONDS_PER_DAY);
    }

    #[test]
    fn display_format() {
        assert_eq!(format!("{}", Offset::from_hours_minutes(5, 30)), "+05:30");
        assert_eq!(format!("{}", Offset::from_hours_minutes(-2, 0)), "-02:00");
    }
}
