// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

//! Property-based checks for invariants that a handful of fixed examples
//! can't pin down: round-trips, totality of the zone engine, and the
//! exactly-one-of-{gap, unambiguous, ambiguous} classification.

use proptest::prelude::*;

use civil_time::{
    CalendarSystem, DateTimeZone, Duration, Instant, LocalDate, LocalDateTime, LocalTime, Offset,
    Period, PeriodType, ResolverPolicy, TransitionMode, Weekday, ZoneRecurrence, ZonedDateTime,
};

fn us_pacific() -> DateTimeZone {
    DateTimeZone::DaylightRule(civil_time::DaylightRuleZone::new(
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

proptest! {
    /// `Instant + Duration - Instant == Duration` over a range that never
    /// overflows `i64` ticks.
    #[test]
    fn instant_duration_roundtrip(
        secs in -1_000_000_000_i64..1_000_000_000_i64,
        delta_secs in -1_000_000_i64..1_000_000_i64,
    ) {
        let a = Instant::from_unix_seconds(secs);
        let d = Duration::from_seconds(delta_secs);
        prop_assert_eq!((a.plus(d)).minus(a), d);
    }

    /// Every `Offset` ever constructed from `from_seconds` stays within the
    /// documented `(-24h, +24h)` exclusive range.
    #[test]
    fn offset_from_seconds_stays_bounded(secs in any::<i32>()) {
        let offset = Offset::from_seconds(secs);
        prop_assert!(offset.total_seconds() > -86_400 && offset.total_seconds() < 86_400);
    }

    /// `LocalTime::plus_nanoseconds` always produces a value inside one day,
    /// and the returned day-carry reconstructs the original total exactly.
    #[test]
    fn local_time_wrap_is_total(
        start_nanos in 0_i64..86_400_000_000_000_i64,
        delta in -200_000_000_000_000_i64..200_000_000_000_000_i64,
    ) {
        let t = LocalTime::try_from_nanosecond_of_day(start_nanos).unwrap();
        let (wrapped, days) = t.plus_nanoseconds(delta);
        prop_assert!(wrapped.nanosecond_of_day() >= 0 && wrapped.nanosecond_of_day() < 86_400_000_000_000);
        prop_assert_eq!(days * 86_400_000_000_000 + wrapped.nanosecond_of_day(), start_nanos + delta);
    }

    /// Converting an ISO `LocalDate` to days-since-epoch and back is the
    /// identity, across a wide span of representable years.
    #[test]
    fn local_date_days_since_epoch_roundtrip(days in -3_000_000_i64..3_000_000_i64) {
        let date = LocalDate::from_days_since_epoch(days, CalendarSystem::iso());
        prop_assert_eq!(date.days_since_epoch(), days);
    }

    /// `LocalDate::plus_days` followed by the same negative offset returns to
    /// the starting date.
    #[test]
    fn local_date_plus_days_is_invertible(
        year in 1600_i32..2400_i32,
        month in 1_u32..=12_u32,
        day in 1_u32..=28_u32,
        delta in -50_000_i64..50_000_i64,
    ) {
        let start = LocalDate::from_ymd(year, month, day);
        let moved = start.plus_days(delta).unwrap();
        let back = moved.plus_days(-delta).unwrap();
        prop_assert_eq!(back, start);
    }

    /// `DateTimeZone::get_zone_interval` is total: the returned interval
    /// always actually contains the instant that was looked up.
    #[test]
    fn zone_interval_lookup_is_self_consistent(unix_secs in -2_000_000_000_i64..2_000_000_000_i64) {
        let zone = us_pacific();
        let instant = Instant::from_unix_seconds(unix_secs);
        let interval = zone.get_zone_interval(instant);
        prop_assert!(interval.contains(instant));
    }

    /// Resolving any instant through a zone and reconstructing a
    /// `ZonedDateTime` from it always yields back the same instant: the
    /// instant-preserving direction of the local/instant relationship is
    /// total, unlike the local-to-instant direction which can hit gaps and
    /// overlaps.
    #[test]
    fn zoned_date_time_from_instant_preserves_instant(unix_secs in -2_000_000_000_i64..2_000_000_000_i64) {
        let zone = us_pacific();
        let instant = Instant::from_unix_seconds(unix_secs);
        let zdt = ZonedDateTime::from_instant(instant, zone);
        prop_assert_eq!(zdt.to_instant(), instant);
    }

    /// `ZonedDateTime::new` under `PushForward`/`LaterOfAmbiguous` never
    /// fails: those policies are total over every local reading.
    #[test]
    fn push_forward_resolver_never_fails(
        year in 2008_i32..2050_i32,
        month in 1_u32..=12_u32,
        day in 1_u32..=28_u32,
        hour in 0_u32..24_u32,
    ) {
        let local = LocalDateTime::from_ymd_hms(year, month, day, hour, 0, 0);
        let result = ZonedDateTime::new(local, us_pacific(), ResolverPolicy::PushForward);
        prop_assert!(result.is_ok());
    }

    /// `Period::between(a, b, YEAR_MONTH_DAY)` applied back to `a` via
    /// `plus_period` always reconstructs `b` exactly (the defining property
    /// of a calendar-unit "between" operation).
    #[test]
    fn period_between_round_trips(
        y1 in 1_i32..3000_i32, m1 in 1_u32..=12_u32, d1 in 1_u32..=28_u32,
        y2 in 1_i32..3000_i32, m2 in 1_u32..=12_u32, d2 in 1_u32..=28_u32,
    ) {
        let start = LocalDate::from_ymd(y1, m1, d1);
        let end = LocalDate::from_ymd(y2, m2, d2);
        let period = Period::between(&start, &end, PeriodType::YEAR_MONTH_DAY).unwrap();
        prop_assert_eq!(start.plus_period(&period).unwrap(), end);
    }
}
