// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * A `LocalDateTime` paired with a fixed `Offset` from UTC: enough to compute
 * a unique `Instant`, but without the zone transition rules `ZonedDateTime`
 * carries (spec.md §3, §4.3).
 */

use std::cmp::Ordering;
use std::fmt;

use crate::calendar::CalendarSystem;
use crate::duration::Duration;
use crate::errors::Error;
use crate::instant::Instant;
use crate::local_date::LocalDate;
use crate::local_date_time::LocalDateTime;
use crate::local_time::LocalTime;
use crate::offset::Offset;
use crate::period::Period;
use crate::units::{floor_div, floor_mod, NANOSECONDS_PER_TICK, TICKS_PER_DAY};

/// A calendar date and time, plus the fixed UTC offset that applies to it.
#[derive(Copy, Clone)]
pub struct OffsetDateTime {
    local: LocalDateTime,
    offset: Offset,
}

impl OffsetDateTime {
    /// Pairs a `LocalDateTime` with an `Offset` directly; the two are taken
    /// as given and not cross-checked against any zone.
    pub fn new(local: LocalDateTime, offset: Offset) -> OffsetDateTime {
        OffsetDateTime { local, offset }
    }

    /// Derives the local wall-clock reading that `instant` has at `offset`.
    pub fn from_instant(instant: Instant, offset: Offset) -> OffsetDateTime {
        let local_ticks = instant.unix_ticks() + offset.as_duration().ticks();
        let days = floor_div(local_ticks, TICKS_PER_DAY);
        let ticks_of_day = floor_mod(local_ticks, TICKS_PER_DAY);
        let date = LocalDate::from_days_since_epoch(days, CalendarSystem::iso());
        let time = LocalTime::try_from_nanosecond_of_day(ticks_of_day * NANOSECONDS_PER_TICK)
            .expect("ticks-of-day is always within a single day");
        OffsetDateTime { local: LocalDateTime::new(date, time), offset }
    }

    #[inline]
    pub fn local_date_time(&self) -> LocalDateTime {
        self.local
    }

    #[inline]
    pub fn date(&self) -> LocalDate {
        self.local.date()
    }

    #[inline]
    pub fn time(&self) -> LocalTime {
        self.local.time()
    }

    #[inline]
    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn year(&self) -> i32 {
        self.local.year()
    }
    pub fn month(&self) -> u32 {
        self.local.month()
    }
    pub fn day(&self) -> u32 {
        self.local.day()
    }
    pub fn hour(&self) -> u32 {
        self.local.hour()
    }
    pub fn minute(&self) -> u32 {
        self.local.minute()
    }
    pub fn second(&self) -> u32 {
        self.local.second()
    }
    pub fn nanosecond(&self) -> u32 {
        self.local.nanosecond()
    }

    /// The unique `Instant` this local reading plus offset denotes.
    pub fn to_instant(&self) -> Instant {
        let days = self.local.date().days_since_epoch();
        let ticks_of_day = self.local.time().nanosecond_of_day() / NANOSECONDS_PER_TICK;
        let local_ticks = days * TICKS_PER_DAY + ticks_of_day;
        Instant::from_unix_ticks(local_ticks - self.offset.as_duration().ticks())
    }

    /// Re-expresses this value at a different fixed offset, preserving the instant.
    pub fn with_offset(&self, offset: Offset) -> OffsetDateTime {
        OffsetDateTime::from_instant(self.to_instant(), offset)
    }

    /// Adds a `Duration` on the instant timeline, carrying any offset forward as-is.
    pub fn plus_duration(&self, d: Duration) -> OffsetDateTime {
        OffsetDateTime::from_instant(self.to_instant().plus(d), self.offset)
    }

    /// Adds a `Period` against the local calendar fields, leaving the offset unchanged
    /// (spec.md §4.3: calendar-unit arithmetic ignores the instant timeline).
    pub fn plus_period(&self, period: &Period) -> Result<OffsetDateTime, Error> {
        Ok(OffsetDateTime { local: self.local.plus_period(period)?, offset: self.offset })
    }

    /// Compares by local calendar fields, ignoring offset (spec.md §4.3 "Local comparator").
    pub fn compare_local(&self, other: &OffsetDateTime) -> Option<Ordering> {
        self.local.partial_cmp(&other.local)
    }

    /// Compares by the underlying instant, the offset-independent ordering
    /// (spec.md §4.3 "Instant comparator"; see S8).
    pub fn compare_instant(&self, other: &OffsetDateTime) -> Ordering {
        self.to_instant().cmp(&other.to_instant())
    }
}

impl PartialEq for OffsetDateTime {
    fn eq(&self, other: &Self) -> bool {
        self.local == other.local && self.offset == other.offset
    }
}

impl Eq for OffsetDateTime {}

impl fmt::Debug for OffsetDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.local, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_roundtrip() {
        let instant = Instant::from_unix_seconds(1_600_000_000);
        let odt = OffsetDateTime::from_instant(instant, Offset::from_hours(-7));
        assert_eq!(odt.to_instant(), instant);
    }

    #[test]
    fn with_offset_preserves_instant() {
        let instant = Instant::from_unix_seconds(1_600_000_000);
        let odt = OffsetDateTime::from_instant(instant, Offset::from_hours(-7));
        let shifted = odt.with_offset(Offset::from_hours(9));
        assert_eq!(shifted.to_instant(), instant);
        assert_ne!(shifted.hour(), odt.hour());
    }

    /// spec.md S8: equal instants at different offsets compare equal by
    /// instant but differ by local fields.
    #[test]
    fn s8_instant_vs_local_comparator() {
        let instant = Instant::from_unix_seconds(1_600_000_000);
        let a = OffsetDateTime::from_instant(instant, Offset::from_hours(-7));
        let b = OffsetDateTime::from_instant(instant, Offset::from_hours(9));
        assert_eq!(a.compare_instant(&b), Ordering::Equal);
        assert_ne!(a.compare_local(&b), Some(Ordering::Equal));
        assert_ne!(a, b);
    }
}
