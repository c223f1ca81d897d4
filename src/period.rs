// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * `Period`: a duration expressed in calendar units, and `PeriodType`, the
 * mask of which units are present (spec.md §4.5).
 *
 * `PeriodType` is implemented with `bitflags`, grounded on `boa_temporal`'s
 * Cargo.toml (part of the teacher's own wider workspace) which depends on
 * `bitflags` for an analogous field-presence mask.
 */

use std::fmt;
use std::ops::Add;

use bitflags::bitflags;

use crate::errors::Error;
use crate::local_date::LocalDate;
use crate::units::NANOSECONDS_PER_SECOND;

bitflags! {
    /// Which calendar units a `Period` carries.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct PeriodType: u16 {
        const YEARS        = 1 << 0;
        const MONTHS       = 1 << 1;
        const WEEKS        = 1 << 2;
        const DAYS         = 1 << 3;
        const HOURS        = 1 << 4;
        const MINUTES      = 1 << 5;
        const SECONDS      = 1 << 6;
        const MILLISECONDS = 1 << 7;
        const NANOSECONDS  = 1 << 8;
    }
}

impl PeriodType {
    /// The conventional "calendar date" selection used by `Period.Between` on dates.
    pub const YEAR_MONTH_DAY: PeriodType =
        PeriodType::YEARS.union(PeriodType::MONTHS).union(PeriodType::DAYS);

    /// Every date unit.
    pub const DATE: PeriodType = PeriodType::YEARS
        .union(PeriodType::MONTHS)
        .union(PeriodType::WEEKS)
        .union(PeriodType::DAYS);

    /// Every time unit.
    pub const TIME: PeriodType = PeriodType::HOURS
        .union(PeriodType::MINUTES)
        .union(PeriodType::SECONDS)
        .union(PeriodType::MILLISECONDS)
        .union(PeriodType::NANOSECONDS);
}

/// Index order matches spec.md §3: "units descend year→month→week→day→hour→min→sec→ms→tick/ns".
const UNIT_COUNT: usize = 9;
const IDX_YEARS: usize = 0;
const IDX_MONTHS: usize = 1;
const IDX_WEEKS: usize = 2;
const IDX_DAYS: usize = 3;
const IDX_HOURS: usize = 4;
const IDX_MINUTES: usize = 5;
const IDX_SECONDS: usize = 6;
const IDX_MILLISECONDS: usize = 7;
const IDX_NANOSECONDS: usize = 8;

const UNIT_FLAGS: [PeriodType; UNIT_COUNT] = [
    PeriodType::YEARS,
    PeriodType::MONTHS,
    PeriodType::WEEKS,
    PeriodType::DAYS,
    PeriodType::HOURS,
    PeriodType::MINUTES,
    PeriodType::SECONDS,
    PeriodType::MILLISECONDS,
    PeriodType::NANOSECONDS,
];

/// A duration expressed in calendar units; its length in ticks depends on an anchor date.
#[derive(Clone, PartialEq, Eq)]
pub struct Period {
    period_type: PeriodType,
    values: [i64; UNIT_COUNT],
}

impl Period {
    /// The empty period of the given type (all present units are zero).
    pub fn zero(period_type: PeriodType) -> Period {
        Period { period_type, values: [0; UNIT_COUNT] }
    }

    fn single(flag: PeriodType, idx: usize, value: i64) -> Period {
        let mut values = [0; UNIT_COUNT];
        values[idx] = value;
        Period { period_type: flag, values }
    }

    pub fn from_years(n: i64) -> Period {
        Period::single(PeriodType::YEARS, IDX_YEARS, n)
    }

    pub fn from_months(n: i64) -> Period {
        Period::single(PeriodType::MONTHS, IDX_MONTHS, n)
    }

    pub fn from_weeks(n: i64) -> Period {
        Period::single(PeriodType::WEEKS, IDX_WEEKS, n)
    }

    pub fn from_days(n: i64) -> Period {
        Period::single(PeriodType::DAYS, IDX_DAYS, n)
    }

    pub fn from_hours(n: i64) -> Period {
        Period::single(PeriodType::HOURS, IDX_HOURS, n)
    }

    pub fn from_minutes(n: i64) -> Period {
        Period::single(PeriodType::MINUTES, IDX_MINUTES, n)
    }

    pub fn from_seconds(n: i64) -> Period {
        Period::single(PeriodType::SECONDS, IDX_SECONDS, n)
    }

    pub fn from_milliseconds(n: i64) -> Period {
        Period::single(PeriodType::MILLISECONDS, IDX_MILLISECONDS, n)
    }

    pub fn from_nanoseconds(n: i64) -> Period {
        Period::single(PeriodType::NANOSECONDS, IDX_NANOSECONDS, n)
    }

    pub fn period_type(&self) -> PeriodType {
        self.period_type
    }

    fn get(&self, flag: PeriodType, idx: usize) -> i64 {
        if self.period_type.contains(flag) { self.values[idx] } else { 0 }
    }

    pub fn years(&self) -> i64 {
        self.get(PeriodType::YEARS, IDX_YEARS)
    }
    pub fn months(&self) -> i64 {
        self.get(PeriodType::MONTHS, IDX_MONTHS)
    }
    pub fn weeks(&self) -> i64 {
        self.get(PeriodType::WEEKS, IDX_WEEKS)
    }
    pub fn days(&self) -> i64 {
        self.get(PeriodType::DAYS, IDX_DAYS)
    }
    pub fn hours(&self) -> i64 {
        self.get(PeriodType::HOURS, IDX_HOURS)
    }
    pub fn minutes(&self) -> i64 {
        self.get(PeriodType::MINUTES, IDX_MINUTES)
    }
    pub fn seconds(&self) -> i64 {
        self.get(PeriodType::SECONDS, IDX_SECONDS)
    }
    pub fn milliseconds(&self) -> i64 {
        self.get(PeriodType::MILLISECONDS, IDX_MILLISECONDS)
    }
    pub fn nanoseconds(&self) -> i64 {
        self.get(PeriodType::NANOSECONDS, IDX_NANOSECONDS)
    }

    pub fn has_date_component(&self) -> bool {
        self.period_type.intersects(PeriodType::DATE)
    }

    pub fn has_time_component(&self) -> bool {
        self.period_type.intersects(PeriodType::TIME)
    }

    /// The date-unit-only projection of this period (years/months/weeks/days).
    pub fn date_component(&self) -> Period {
        let period_type = self.period_type & PeriodType::DATE;
        let mut values = [0i64; UNIT_COUNT];
        for idx in [IDX_YEARS, IDX_MONTHS, IDX_WEEKS, IDX_DAYS] {
            values[idx] = self.values[idx];
        }
        Period { period_type, values }
    }

    /// The time-unit-only projection of this period (hours through nanoseconds).
    pub fn time_component(&self) -> Period {
        let period_type = self.period_type & PeriodType::TIME;
        let mut values = [0i64; UNIT_COUNT];
        for idx in [IDX_HOURS, IDX_MINUTES, IDX_SECONDS, IDX_MILLISECONDS, IDX_NANOSECONDS] {
            values[idx] = self.values[idx];
        }
        Period { period_type, values }
    }

    /// The total nanoseconds represented by this period's time units (used when
    /// adding a time-only period to a `LocalTime`; callers must ensure
    /// `!has_date_component()` first).
    pub(crate) fn total_time_nanoseconds(&self) -> i64 {
        self.hours() * 3_600 * NANOSECONDS_PER_SECOND
            + self.minutes() * 60 * NANOSECONDS_PER_SECOND
            + self.seconds() * NANOSECONDS_PER_SECOND
            + self.milliseconds() * 1_000_000
            + self.nanoseconds()
    }

    /// The negation of every present component.
    pub fn negate(&self) -> Period {
        let mut values = self.values;
        for v in values.iter_mut() {
            *v = -*v;
        }
        Period { period_type: self.period_type, values }
    }

    /// Computes `Period.Between(start, end, period_type)` (spec.md §4.3's protocol,
    /// §9's worked example: `Between(Jan 31, Mar 31, YearMonthDay)` must yield
    /// `{months=2}`, never `{months=1, days=31}`).
    ///
    /// Fails with `Error::ArgumentInvalid` if `start` and `end` use different calendars.
    pub fn between(start: &LocalDate, end: &LocalDate, period_type: PeriodType) -> Result<Period, Error> {
        start.try_cmp(end).map(|_| ())?; // validates same calendar; ordering itself is unused here.

        if start == end {
            return Ok(Period::zero(period_type));
        }

        let mut values = [0i64; UNIT_COUNT];
        let mut cursor = *start;

        if period_type.contains(PeriodType::YEARS) {
            let estimate = end.year() as i64 - cursor.year() as i64;
            let n = Period::greedy_count(cursor, *end, estimate, |c, n| c.plus_years(n));
            values[IDX_YEARS] = n;
            cursor = cursor.plus_years(n).expect("bounded by greedy_count");
        }

        if period_type.contains(PeriodType::MONTHS) {
            let estimate = Period::estimate_months(cursor, *end);
            let n = Period::greedy_count(cursor, *end, estimate, |c, n| c.plus_months(n));
            values[IDX_MONTHS] = n;
            cursor = cursor.plus_months(n).expect("bounded by greedy_count");
        }

        let remaining_days = end.days_since_epoch() - cursor.days_since_epoch();

        if period_type.contains(PeriodType::WEEKS) {
            values[IDX_WEEKS] = remaining_days / 7;
            values[IDX_DAYS] = remaining_days % 7;
        } else if period_type.contains(PeriodType::DAYS) {
            values[IDX_DAYS] = remaining_days;
        }
        // If neither WEEKS nor DAYS is selected, any non-zero day remainder is
        // simply dropped (the requested period type doesn't carry it).

        Ok(Period { period_type, values })
    }

    /// Finds the largest-magnitude integer `n` (same sign as `end - cursor`) such
    /// that `step(cursor, n)` does not cross past `end`. This is the "toward
    /// start" rounding rule applied one unit at a time.
    fn greedy_count(
        cursor: LocalDate,
        end: LocalDate,
        mut estimate: i64,
        step: impl Fn(LocalDate, i64) -> Result<LocalDate, Error>,
    ) -> i64 {
        let forward = end > cursor;
        loop {
            let candidate = step(cursor, estimate).unwrap_or(cursor);
            let overshoot = if forward { candidate > end } else { candidate < end };
            if overshoot {
                estimate -= if forward { 1 } else { -1 };
                continue;
            }
            let next = step(cursor, estimate + if forward { 1 } else { -1 }).unwrap_or(candidate);
            let next_overshoots = if forward { next > end } else { next < end };
            if !next_overshoots {
                estimate += if forward { 1 } else { -1 };
                continue;
            }
            return estimate;
        }
    }

    fn estimate_months(cursor: LocalDate, end: LocalDate) -> i64 {
        (end.year() as i64 - cursor.year() as i64) * 12 + (end.month() as i64 - cursor.month() as i64)
    }
}

impl Add for Period {
    type Output = Period;

    /// Union of both periods' types; present-in-either components are summed.
    fn add(self, rhs: Period) -> Period {
        let period_type = self.period_type | rhs.period_type;
        let mut values = [0i64; UNIT_COUNT];
        for (i, flag) in UNIT_FLAGS.iter().enumerate() {
            if period_type.intersects(*flag) {
                values[i] = self.get(*flag, i) + rhs.get(*flag, i);
            }
        }
        Period { period_type, values }
    }
}

impl fmt::Debug for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Period {{ ")?;
        for (i, flag) in UNIT_FLAGS.iter().enumerate() {
            if self.period_type.contains(*flag) {
                write!(f, "{:?}={} ", flag, self.values[i])?;
            }
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s4_period_between_iso_dates() {
        let start = LocalDate::from_ymd(2012, 1, 30);
        let end = LocalDate::from_ymd(2013, 3, 1);
        let period = Period::between(&start, &end, PeriodType::YEAR_MONTH_DAY).unwrap();
        assert_eq!((period.years(), period.months(), period.days()), (1, 1, 1));
        assert_eq!(start.plus_period(&period).unwrap(), end);
    }

    #[test]
    fn month_boundary_corner_case() {
        let start = LocalDate::from_ymd(2021, 1, 31);
        let end = LocalDate::from_ymd(2021, 3, 31);
        let period = Period::between(&start, &end, PeriodType::YEAR_MONTH_DAY).unwrap();
        assert_eq!((period.years(), period.months(), period.days()), (0, 2, 0));
    }

    #[test]
    fn negative_direction() {
        let start = LocalDate::from_ymd(2020, 3, 1);
        let end = LocalDate::from_ymd(2019, 1, 15);
        let period = Period::between(&start, &end, PeriodType::YEAR_MONTH_DAY).unwrap();
        assert!(period.years() <= 0 && period.months() <= 0 && period.days() <= 0);
        assert_eq!(start.plus_period(&period).unwrap(), end);
    }
}
