// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * A calendar date without a time-of-day or zone.
 */

use std::cmp::Ordering;
use std::fmt;

use crate::calendar::{CalendarSystem, Era};
use crate::errors::Error;
use crate::local_date_time::LocalDateTime;
use crate::local_time::LocalTime;
use crate::period::{Period, PeriodType};
use crate::year_month_day::{Weekday, YearMonthDay};

/// A date in some [`CalendarSystem`], with no time-of-day or zone component.
#[derive(Copy, Clone)]
pub struct LocalDate {
    ymd: YearMonthDay,
    calendar: CalendarSystem,
}

impl LocalDate {
    /// Makes a new `LocalDate` in the ISO calendar.
    ///
    /// Fails on out-of-range year, invalid month and/or day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> LocalDate {
        LocalDate::try_from_ymd(year, month, day).expect("invalid date")
    }

    /// Returns an error on out-of-range year, invalid month and/or day.
    pub fn try_from_ymd(year: i32, month: u32, day: u32) -> Result<LocalDate, Error> {
        LocalDate::try_from_ymd_calendar(year, month, day, CalendarSystem::iso())
    }

    /// Makes a new `LocalDate` in the given calendar.
    ///
    /// Fails on out-of-range year, invalid month and/or day for that calendar.
    pub fn try_from_ymd_calendar(
        year: i32,
        month: u32,
        day: u32,
        calendar: CalendarSystem,
    ) -> Result<LocalDate, Error> {
        let ymd = calendar.year_month_day(year, month, day)?;
        Ok(LocalDate { ymd, calendar })
    }

    pub(crate) fn from_parts(ymd: YearMonthDay, calendar: CalendarSystem) -> LocalDate {
        LocalDate { ymd, calendar }
    }

    /// Makes a new `LocalDate` from a days-since-Unix-epoch count in the given calendar.
    pub fn from_days_since_epoch(days: i64, calendar: CalendarSystem) -> LocalDate {
        let ymd = calendar.year_month_day_from_days_since_epoch(days);
        LocalDate { ymd, calendar }
    }

    #[inline]
    pub fn calendar(&self) -> CalendarSystem {
        self.calendar
    }

    #[inline]
    pub fn year(&self) -> i32 {
        self.ymd.year()
    }

    #[inline]
    pub fn month(&self) -> u32 {
        self.ymd.month()
    }

    #[inline]
    pub fn month0(&self) -> u32 {
        self.ymd.month() - 1
    }

    #[inline]
    pub fn day(&self) -> u32 {
        self.ymd.day()
    }

    #[inline]
    pub fn day0(&self) -> u32 {
        self.ymd.day() - 1
    }

    pub fn days_since_epoch(&self) -> i64 {
        self.calendar.days_since_epoch(self.ymd)
    }

    pub fn weekday(&self) -> Weekday {
        self.calendar.day_of_week(self.ymd)
    }

    pub fn week_year(&self) -> i32 {
        self.calendar.week_year_and_week(self.ymd).0
    }

    pub fn week_of_week_year(&self) -> u32 {
        self.calendar.week_year_and_week(self.ymd).1
    }

    pub fn era(&self) -> Era {
        self.calendar.era(self.ymd)
    }

    pub fn year_of_era(&self) -> i32 {
        self.calendar.year_of_era(self.ymd)
    }

    /// Converts this date to the same point on the timeline in another calendar
    /// (spec.md S6: the ISO epoch maps to Julian 1969-12-19).
    pub fn with_calendar(&self, calendar: CalendarSystem) -> LocalDate {
        LocalDate::from_days_since_epoch(self.days_since_epoch(), calendar)
    }

    /// Adds whole years, clamping the day-of-month if it doesn't exist in the
    /// target month (e.g. Feb 29 + 1 year in a non-leap year clamps to Feb 28).
    ///
    /// Fails on out-of-range results.
    pub fn plus_years(&self, years: i64) -> Result<LocalDate, Error> {
        let target_year = self.year() as i64 + years;
        let target_year = i32::try_from(target_year)
            .map_err(|_| Error::ArgumentOutOfRange { field: "year", value: target_year, min: i32::MIN as i64, max: i32::MAX as i64 })?;
        self.with_year_month_day_clamped(target_year, self.month())
    }

    /// Adds whole months, clamping the day-of-month as in [`plus_years`].
    pub fn plus_months(&self, months: i64) -> Result<LocalDate, Error> {
        let months_in_year = self.calendar.months_in_year(self.year()) as i64;
        let absolute_month0 = self.year() as i64 * months_in_year + (self.month() as i64 - 1) + months;
        let target_year = crate::units::floor_div(absolute_month0, months_in_year);
        let target_month0 = crate::units::floor_mod(absolute_month0, months_in_year);
        let target_year = i32::try_from(target_year)
            .map_err(|_| Error::ArgumentOutOfRange { field: "year", value: target_year, min: i32::MIN as i64, max: i32::MAX as i64 })?;
        self.with_year_month_day_clamped(target_year, target_month0 as u32 + 1)
    }

    fn with_year_month_day_clamped(&self, year: i32, month: u32) -> Result<LocalDate, Error> {
        let max_day = self.calendar.days_in_month(year, month)?;
        let day = self.day().min(max_day);
        self.calendar.year_month_day(year, month, day).map(|ymd| LocalDate { ymd, calendar: self.calendar })
    }

    /// Adds whole weeks (`7 * weeks` days).
    pub fn plus_weeks(&self, weeks: i64) -> Result<LocalDate, Error> {
        self.plus_days(weeks.checked_mul(7).ok_or(Error::ArithmeticOverflow)?)
    }

    /// Adds whole days.
    pub fn plus_days(&self, days: i64) -> Result<LocalDate, Error> {
        let target = self.days_since_epoch().checked_add(days).ok_or(Error::ArithmeticOverflow)?;
        Ok(LocalDate::from_days_since_epoch(target, self.calendar))
    }

    /// Adds a date-only `Period`.
    ///
    /// Fails with `Error::InvalidPeriod` if `period` carries any time component.
    pub fn plus_period(&self, period: &Period) -> Result<LocalDate, Error> {
        if period.has_time_component() {
            return Err(Error::InvalidPeriod("cannot add a time-bearing period to a LocalDate"));
        }
        let mut result = *self;
        if period.years() != 0 {
            result = result.plus_years(period.years())?;
        }
        if period.months() != 0 {
            result = result.plus_months(period.months())?;
        }
        if period.weeks() != 0 {
            result = result.plus_weeks(period.weeks())?;
        }
        if period.days() != 0 {
            result = result.plus_days(period.days())?;
        }
        Ok(result)
    }

    /// Subtracts a date-only `Period`; symmetric to [`plus_period`].
    pub fn minus_period(&self, period: &Period) -> Result<LocalDate, Error> {
        self.plus_period(&period.negate())
    }

    /// The next date falling on `weekday`, strictly after `self`.
    pub fn next(&self, weekday: Weekday) -> LocalDate {
        let delta = crate::units::floor_mod(
            weekday.number_from_monday() as i64 - self.weekday().number_from_monday() as i64 + 7 - 1,
            7,
        ) + 1;
        self.plus_days(delta).expect("date out of range")
    }

    /// The previous date falling on `weekday`, strictly before `self`.
    pub fn previous(&self, weekday: Weekday) -> LocalDate {
        let delta = crate::units::floor_mod(
            self.weekday().number_from_monday() as i64 - weekday.number_from_monday() as i64 + 7 - 1,
            7,
        ) + 1;
        self.plus_days(-delta).expect("date out of range")
    }

    /// Pairs this date with a `LocalTime` to produce a `LocalDateTime`.
    pub fn and_time(&self, time: LocalTime) -> LocalDateTime {
        LocalDateTime::new(*self, time)
    }

    /// Convenience: pairs this date with hour/minute/second.
    ///
    /// Fails on invalid hour, minute and/or second.
    pub fn and_hms(&self, hour: u32, min: u32, sec: u32) -> LocalDateTime {
        self.and_time(LocalTime::from_hms(hour, min, sec))
    }

    /// The `Period.Between(self, other)` protocol (spec.md §4.3/§4.5): for each
    /// field in `period_type`, greedily compute the largest integer count that
    /// doesn't overshoot `other`, "rounding toward start".
    ///
    /// Fails with `Error::ArgumentInvalid` if the two dates use different calendars.
    pub fn period_until(&self, other: &LocalDate, period_type: PeriodType) -> Result<Period, Error> {
        Period::between(self, other, period_type)
    }

    /// Explicit, calendar-checked comparison (spec.md §4.3: "Ordering across
    /// calendars fails").
    pub fn try_cmp(&self, other: &LocalDate) -> Result<Ordering, Error> {
        if self.calendar.ordinal() != other.calendar.ordinal() {
            return Err(Error::ArgumentInvalid("cannot compare LocalDate values from different calendars"));
        }
        Ok(self.calendar.compare(self.ymd, other.ymd))
    }
}

impl PartialEq for LocalDate {
    fn eq(&self, other: &Self) -> bool {
        self.calendar.ordinal() == other.calendar.ordinal() && self.ymd == other.ymd
    }
}

impl Eq for LocalDate {}

impl PartialOrd for LocalDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl Ord for LocalDate {
    /// Panics if `other` uses a different calendar; see [`LocalDate::try_cmp`]
    /// for a fallible alternative (spec.md §4.3).
    fn cmp(&self, other: &Self) -> Ordering {
        self.try_cmp(other).expect("cannot order LocalDate values from different calendars")
    }
}

impl fmt::Debug for LocalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self.ymd, self.calendar.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarSystem;

    #[test]
    fn s6_cross_calendar_conversion() {
        let iso = LocalDate::from_ymd(1970, 1, 1);
        let julian = iso.with_calendar(CalendarSystem::julian());
        assert_eq!((julian.year(), julian.month(), julian.day()), (1969, 12, 19));
    }

    #[test]
    fn month_addition_clamps_day() {
        let d = LocalDate::from_ymd(2013, 1, 31);
        let next_month = d.plus_months(1).unwrap();
        assert_eq!((next_month.year(), next_month.month(), next_month.day()), (2013, 2, 28));
    }

    #[test]
    fn different_calendar_ordering_fails() {
        let a = LocalDate::from_ymd(2020, 1, 1);
        let b = a.with_calendar(CalendarSystem::julian());
        assert!(a.try_cmp(&b).is_err());
    }

    #[test]
    fn next_and_previous_weekday() {
        let d = LocalDate::from_ymd(2020, 1, 1); // a Wednesday
        assert_eq!(d.weekday(), Weekday::Wednesday);
        let next_monday = d.next(Weekday::Monday);
        assert_eq!(next_monday.weekday(), Weekday::Monday);
        assert!(next_monday > d);
        let prev_monday = d.previous(Weekday::Monday);
        assert_eq!(prev_monday.weekday(), Weekday::Monday);
        assert!(prev_monday < d);
    }
}
