// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * A `LocalDateTime` anchored to a real `DateTimeZone`: the full civil-time
 * composite, carrying enough to recompute the unique `Instant` it denotes
 * (spec.md §3, §6.1).
 */

use std::fmt;

use crate::duration::Duration;
use crate::errors::Error;
use crate::instant::Instant;
use crate::local_date::LocalDate;
use crate::local_date_time::LocalDateTime;
use crate::local_instant::LocalInstant;
use crate::local_time::LocalTime;
use crate::offset::Offset;
use crate::offset_date_time::OffsetDateTime;
use crate::period::Period;
use crate::units::{NANOSECONDS_PER_TICK, TICKS_PER_DAY};
use crate::zone::{DateTimeZone, ZoneIntervalPair};

/// How a local-to-instant construction should handle DST gaps and overlaps
/// (spec.md §6.4).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolverPolicy {
    /// Fail on both gaps and overlaps (spec.md §4.4's default failure surface).
    Strict,
    /// Pick the earlier of an ambiguous pair; fail on gaps.
    EarlierOfAmbiguous,
    /// Pick the later of an ambiguous pair; fail on gaps.
    LaterOfAmbiguous,
    /// Pick the later of an ambiguous pair; for a gap, advance past it to the
    /// first valid instant on the far side.
    PushForward,
}

fn to_local_instant(local: &LocalDateTime) -> LocalInstant {
    let ticks = local.date().days_since_epoch() * TICKS_PER_DAY + local.time().nanosecond_of_day() / NANOSECONDS_PER_TICK;
    LocalInstant::from_ticks(ticks)
}

/// A calendar date and time in a specific time zone.
#[derive(Clone, PartialEq, Debug)]
pub struct ZonedDateTime {
    local: LocalDateTime,
    zone: DateTimeZone,
    offset: Offset,
}

impl ZonedDateTime {
    /// Resolves `local` in `zone` using `resolver` to pick an offset across
    /// gaps/overlaps (spec.md §4.4, §6.4).
    pub fn new(local: LocalDateTime, zone: DateTimeZone, resolver: ResolverPolicy) -> Result<ZonedDateTime, Error> {
        let local_instant = to_local_instant(&local);
        match zone.get_zone_intervals(local_instant) {
            ZoneIntervalPair::Unambiguous(interval) => {
                Ok(ZonedDateTime { local, zone, offset: interval.wall_offset })
            }
            ZoneIntervalPair::Ambiguous(earlier, later) => match resolver {
                ResolverPolicy::Strict => Err(Error::AmbiguousTime {
                    local,
                    zone: zone.id().to_string(),
                    earlier,
                    later,
                }),
                ResolverPolicy::EarlierOfAmbiguous => {
                    Ok(ZonedDateTime { local, zone, offset: earlier.wall_offset })
                }
                ResolverPolicy::LaterOfAmbiguous | ResolverPolicy::PushForward => {
                    Ok(ZonedDateTime { local, zone, offset: later.wall_offset })
                }
            },
            ZoneIntervalPair::Gap => match resolver {
                ResolverPolicy::PushForward => {
                    let guess = local_instant.as_instant_guess();
                    let guessed_interval = zone.get_zone_interval(guess);
                    let after = if guessed_interval.end != Instant::MAX {
                        zone.get_zone_interval(guessed_interval.end)
                    } else {
                        guessed_interval
                    };
                    let resolved = OffsetDateTime::from_instant(after.start, after.wall_offset);
                    Ok(ZonedDateTime { local: resolved.local_date_time(), zone, offset: after.wall_offset })
                }
                _ => Err(Error::SkippedTime { local, zone: zone.id().to_string() }),
            },
        }
    }

    /// Makes a `ZonedDateTime` directly from an `Instant` and a zone; always
    /// succeeds since every instant resolves to exactly one offset.
    pub fn from_instant(instant: Instant, zone: DateTimeZone) -> ZonedDateTime {
        let offset = zone.get_offset_from_utc(instant);
        let local = OffsetDateTime::from_instant(instant, offset).local_date_time();
        ZonedDateTime { local, zone, offset }
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

    #[inline]
    pub fn zone(&self) -> &DateTimeZone {
        &self.zone
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

    /// The unique instant this zoned reading denotes.
    pub fn to_instant(&self) -> Instant {
        OffsetDateTime::new(self.local, self.offset).to_instant()
    }

    /// Re-expresses this value in another zone, recomputing local fields
    /// from the instant (spec.md §6.1: "recomputes local from instant").
    pub fn with_zone(&self, zone: DateTimeZone) -> ZonedDateTime {
        ZonedDateTime::from_instant(self.to_instant(), zone)
    }

    /// Adds a `Duration` on the instant timeline; the local fields (and
    /// possibly the offset, if a zone transition is crossed) are recomputed.
    pub fn plus_duration(&self, d: Duration) -> ZonedDateTime {
        ZonedDateTime::from_instant(self.to_instant().plus(d), self.zone.clone())
    }

    /// Adds a `Period` against the local calendar fields, local-preserving
    /// (spec.md §6.1): the offset is re-resolved for the new local reading,
    /// using `resolver` across any gap/overlap crossed.
    pub fn plus_period(&self, period: &Period, resolver: ResolverPolicy) -> Result<ZonedDateTime, Error> {
        let new_local = self.local.plus_period(period)?;
        ZonedDateTime::new(new_local, self.zone.clone(), resolver)
    }
}

impl fmt::Display for ZonedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{} [{}]", self.local, self.offset, self.zone.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_date::LocalDate;
    use crate::offset::Offset;
    use crate::year_month_day::Weekday;
    use crate::zone::daylight::DaylightRuleZone;
    use crate::zone::recurrence::{TransitionMode, ZoneRecurrence};

    fn us_pacific() -> DateTimeZone {
        DateTimeZone::DaylightRule(DaylightRuleZone::new(
            "America/Los_Angeles".to_string(),
            Offset::from_hours(-8),
            ZoneRecurrence {
                name: "PST".to_string(),
                savings: Offset::UTC,
                year_start: 2007,
                year_end: 2100,
                month_of_year: 11,
                day_of_month: 1,
                day_of_week: Some(Weekday::Sunday),
                advance: true,
                time_of_day: LocalTime::from_hms(2, 0, 0),
                mode: TransitionMode::Wall,
            },
            ZoneRecurrence {
                name: "PDT".to_string(),
                savings: Offset::from_hours(1),
                year_start: 2007,
                year_end: 2100,
                month_of_year: 3,
                day_of_month: 8,
                day_of_week: Some(Weekday::Sunday),
                advance: true,
                time_of_day: LocalTime::from_hms(2, 0, 0),
                mode: TransitionMode::Wall,
            },
        ))
    }

    #[test]
    fn strict_fails_in_gap() {
        let local = LocalDateTime::new(LocalDate::from_ymd(2010, 3, 14), LocalTime::from_hms(2, 30, 0));
        let err = ZonedDateTime::new(local, us_pacific(), ResolverPolicy::Strict).unwrap_err();
        assert!(matches!(err, Error::SkippedTime { .. }));
    }

    #[test]
    fn push_forward_resolves_gap() {
        let local = LocalDateTime::new(LocalDate::from_ymd(2010, 3, 14), LocalTime::from_hms(2, 30, 0));
        let zdt = ZonedDateTime::new(local, us_pacific(), ResolverPolicy::PushForward).unwrap();
        assert_eq!(zdt.offset(), Offset::from_hours(-7));
    }

    #[test]
    fn strict_fails_on_ambiguous_time() {
        let local = LocalDateTime::new(LocalDate::from_ymd(2010, 11, 7), LocalTime::from_hms(1, 30, 0));
        let err = ZonedDateTime::new(local, us_pacific(), ResolverPolicy::Strict).unwrap_err();
        assert!(matches!(err, Error::AmbiguousTime { .. }));
    }

    #[test]
    fn earlier_and_later_resolvers_differ() {
        let local = LocalDateTime::new(LocalDate::from_ymd(2010, 11, 7), LocalTime::from_hms(1, 30, 0));
        let earlier = ZonedDateTime::new(local, us_pacific(), ResolverPolicy::EarlierOfAmbiguous).unwrap();
        let later = ZonedDateTime::new(local, us_pacific(), ResolverPolicy::LaterOfAmbiguous).unwrap();
        assert_eq!(earlier.offset(), Offset::from_hours(-7));
        assert_eq!(later.offset(), Offset::from_hours(-8));
        assert!(earlier.to_instant() < later.to_instant());
    }

    #[test]
    fn with_zone_preserves_instant() {
        let local = LocalDateTime::new(LocalDate::from_ymd(2010, 6, 1), LocalTime::from_hms(12, 0, 0));
        let zdt = ZonedDateTime::new(local, us_pacific(), ResolverPolicy::Strict).unwrap();
        let instant = zdt.to_instant();
        let utc = zdt.with_zone(DateTimeZone::utc());
        assert_eq!(utc.to_instant(), instant);
    }
}
