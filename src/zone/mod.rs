// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * The time-zone engine: `DateTimeZone`, `ZoneInterval`, and the local-instant
 * resolution algorithm that maps a wall-clock reading onto the instant
 * timeline (spec.md §4.4).
 */

pub mod cached;
pub mod daylight;
pub mod fixed;
pub mod precalculated;
pub mod provider;
pub mod recurrence;
pub mod tzdb;

use crate::duration::Duration;
use crate::instant::Instant;
use crate::local_instant::LocalInstant;
use crate::offset::Offset;

use cached::CachedZone;
use daylight::DaylightRuleZone;
use fixed::FixedZone;
use precalculated::PrecalculatedZone;

/// A maximal contiguous range during which a zone's offset and abbreviation
/// are constant: half-open `[start, end)` on the instant timeline.
#[derive(Clone, PartialEq, Debug)]
pub struct ZoneInterval {
    pub name: String,
    pub start: Instant,
    pub end: Instant,
    pub wall_offset: Offset,
    /// The daylight-savings portion of `wall_offset`; `standard_offset() ==
    /// wall_offset - savings`.
    pub savings: Offset,
}

impl ZoneInterval {
    pub fn standard_offset(&self) -> Offset {
        self.wall_offset - self.savings
    }

    pub fn contains(&self, instant: Instant) -> bool {
        self.start <= instant && instant < self.end
    }

    fn local_bound(instant: Instant, offset: Offset) -> i64 {
        if instant == Instant::MIN {
            i64::MIN
        } else if instant == Instant::MAX {
            i64::MAX
        } else {
            instant.unix_ticks() + offset.as_duration().ticks()
        }
    }

    fn contains_local(&self, local: LocalInstant) -> bool {
        let lo = Self::local_bound(self.start, self.wall_offset);
        let hi = Self::local_bound(self.end, self.wall_offset);
        lo <= local.ticks() && local.ticks() < hi
    }
}

/// The result of mapping a local instant onto the timeline: a local time may
/// not exist (a DST gap), may exist once, or may exist twice (a DST overlap).
#[derive(Clone, PartialEq, Debug)]
pub enum ZoneIntervalPair {
    /// The local time falls in a spring-forward gap.
    Gap,
    /// The local time maps unambiguously to one interval.
    Unambiguous(ZoneInterval),
    /// The local time falls in a fall-back overlap: `earlier.end ==
    /// later.start` and `earlier.wall_offset > later.wall_offset`.
    Ambiguous(ZoneInterval, ZoneInterval),
}

/// A time zone: a total function from `Instant` to `ZoneInterval`.
///
/// Tagged-variant polymorphism (spec.md §9) stands in for the trait-object
/// design the abstract model suggests — the concrete variant set is closed
/// and known up front.
#[derive(Clone, PartialEq, Debug)]
pub enum DateTimeZone {
    Fixed(FixedZone),
    Precalculated(PrecalculatedZone),
    DaylightRule(DaylightRuleZone),
    Cached(CachedZone),
}

impl DateTimeZone {
    /// The sentinel fixed zone with zero offset (spec.md §3).
    pub fn utc() -> DateTimeZone {
        DateTimeZone::Fixed(FixedZone::new("UTC".to_string(), Offset::UTC))
    }

    /// A fixed zone for an arbitrary offset, with a generated `"+05:30"`-style id.
    pub fn for_offset(offset: Offset) -> DateTimeZone {
        DateTimeZone::Fixed(FixedZone::for_offset(offset))
    }

    /// Wraps `self` with a small LRU of recently-resolved intervals.
    pub fn cached(self) -> DateTimeZone {
        DateTimeZone::Cached(CachedZone::new(self))
    }

    pub fn id(&self) -> &str {
        match self {
            DateTimeZone::Fixed(z) => &z.id,
            DateTimeZone::Precalculated(z) => &z.id,
            DateTimeZone::DaylightRule(z) => &z.id,
            DateTimeZone::Cached(z) => z.id(),
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, DateTimeZone::Fixed(_))
    }

    pub fn min_offset(&self) -> Offset {
        match self {
            DateTimeZone::Fixed(z) => z.offset,
            DateTimeZone::Precalculated(z) => z.min_offset(),
            DateTimeZone::DaylightRule(z) => z.min_offset(),
            DateTimeZone::Cached(z) => z.inner().min_offset(),
        }
    }

    pub fn max_offset(&self) -> Offset {
        match self {
            DateTimeZone::Fixed(z) => z.offset,
            DateTimeZone::Precalculated(z) => z.max_offset(),
            DateTimeZone::DaylightRule(z) => z.max_offset(),
            DateTimeZone::Cached(z) => z.inner().max_offset(),
        }
    }

    /// The interval containing `instant`. Total: always returns a value.
    pub fn get_zone_interval(&self, instant: Instant) -> ZoneInterval {
        match self {
            DateTimeZone::Fixed(z) => z.get_zone_interval(),
            DateTimeZone::Precalculated(z) => z.get_zone_interval(instant),
            DateTimeZone::DaylightRule(z) => z.get_zone_interval(instant),
            DateTimeZone::Cached(z) => z.get_zone_interval(instant),
        }
    }

    pub fn get_name(&self, instant: Instant) -> String {
        self.get_zone_interval(instant).name
    }

    pub fn get_offset_from_utc(&self, instant: Instant) -> Offset {
        self.get_zone_interval(instant).wall_offset
    }

    /// The local-to-instant resolution algorithm (spec.md §4.4 "the hard
    /// algorithm"): classifies a local instant as a gap, an unambiguous
    /// mapping, or an overlap.
    pub(crate) fn get_zone_intervals(&self, local: LocalInstant) -> ZoneIntervalPair {
        let guess = local.as_instant_guess();
        let interval = self.get_zone_interval(guess);

        let previous = if interval.start == Instant::MIN {
            None
        } else {
            Some(self.get_zone_interval(interval.start - Duration::from_ticks(1)))
        };
        let next = if interval.end == Instant::MAX {
            None
        } else {
            Some(self.get_zone_interval(interval.end))
        };

        if interval.contains_local(local) {
            if let Some(prev) = &previous {
                if prev.contains_local(local) {
                    return ZoneIntervalPair::Ambiguous(prev.clone(), interval);
                }
            }
            if let Some(next) = &next {
                if next.contains_local(local) {
                    return ZoneIntervalPair::Ambiguous(interval, next.clone());
                }
            }
            ZoneIntervalPair::Unambiguous(interval)
        } else {
            let prev_contains = previous.as_ref().is_some_and(|iv| iv.contains_local(local));
            let next_contains = next.as_ref().is_some_and(|iv| iv.contains_local(local));
            match (prev_contains, next_contains) {
                (true, false) => ZoneIntervalPair::Unambiguous(previous.unwrap()),
                (false, true) => ZoneIntervalPair::Unambiguous(next.unwrap()),
                _ => ZoneIntervalPair::Gap,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_date::LocalDate;
    use crate::local_date_time::LocalDateTime;
    use crate::local_time::LocalTime;
    use crate::year_month_day::Weekday;
    use recurrence::{TransitionMode, ZoneRecurrence};

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

    fn local_instant_for(date: LocalDate, time: LocalTime) -> LocalInstant {
        let dt = LocalDateTime::new(date, time);
        LocalInstant::from_ticks(
            dt.date().days_since_epoch() * crate::units::TICKS_PER_DAY
                + dt.time().nanosecond_of_day() / crate::units::NANOSECONDS_PER_TICK,
        )
    }

    /// spec.md S2: the spring-forward gap.
    #[test]
    fn s2_dst_gap() {
        let zone = us_pacific();
        let local = local_instant_for(LocalDate::from_ymd(2010, 3, 14), LocalTime::from_hms(2, 30, 0));
        assert_eq!(zone.get_zone_intervals(local), ZoneIntervalPair::Gap);
    }

    /// spec.md S3: the fall-back overlap.
    #[test]
    fn s3_dst_ambiguity() {
        let zone = us_pacific();
        let local = local_instant_for(LocalDate::from_ymd(2010, 11, 7), LocalTime::from_hms(1, 30, 0));
        match zone.get_zone_intervals(local) {
            ZoneIntervalPair::Ambiguous(earlier, later) => {
                assert_eq!(earlier.name, "PDT");
                assert_eq!(later.name, "PST");
                assert!(earlier.wall_offset > later.wall_offset);
                assert_eq!(earlier.end, later.start);
            }
            other => panic!("expected Ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn unambiguous_local_time() {
        let zone = us_pacific();
        let local = local_instant_for(LocalDate::from_ymd(2010, 6, 1), LocalTime::from_hms(12, 0, 0));
        assert!(matches!(zone.get_zone_intervals(local), ZoneIntervalPair::Unambiguous(_)));
    }

    #[test]
    fn utc_is_always_unambiguous() {
        let zone = DateTimeZone::utc();
        let local = local_instant_for(LocalDate::from_ymd(2010, 3, 14), LocalTime::from_hms(2, 30, 0));
        assert!(matches!(zone.get_zone_intervals(local), ZoneIntervalPair::Unambiguous(_)));
    }
}
