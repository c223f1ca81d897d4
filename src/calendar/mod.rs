// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * `CalendarSystem`: a tagged-variant abstraction over the concrete calendars
 * (spec.md §4.2, §9 — "a `CalendarSystem` enum discriminating concrete
 * calendars" rather than a trait-object hierarchy).
 */

mod coptic;
mod era;
mod islamic;
mod iso;

pub use era::Era;
pub use islamic::{IslamicEpoch, IslamicLeapYearPattern};

use std::cmp::Ordering;
use std::fmt;

use crate::errors::Error;
use crate::year_month_day::{Weekday, YearMonthDay};

/// The default ISO-8601 `minDaysInFirstWeek` for week-year calculations.
pub const ISO_MIN_DAYS_IN_FIRST_WEEK: u8 = 4;

/// A stable small integer identifying a calendar system (spec.md §3's "ordinal").
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CalendarOrdinal {
    Iso = 0,
    Julian = 1,
    Coptic = 2,
    Islamic = 3,
}

/// A calendar system: proleptic Gregorian (ISO), proleptic Julian, Coptic, or
/// one of the tabular Islamic variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CalendarSystem {
    Iso { min_days_in_first_week: u8 },
    Julian { min_days_in_first_week: u8 },
    Coptic,
    Islamic { pattern: IslamicLeapYearPattern, epoch: IslamicEpoch },
}

impl CalendarSystem {
    /// The default ISO-8601 / proleptic Gregorian calendar.
    pub const fn iso() -> CalendarSystem {
        CalendarSystem::Iso { min_days_in_first_week: ISO_MIN_DAYS_IN_FIRST_WEEK }
    }

    /// The ISO calendar with a non-default `minDaysInFirstWeek` (spec.md §6.4).
    pub const fn iso_with_min_days_in_first_week(min_days_in_first_week: u8) -> CalendarSystem {
        CalendarSystem::Iso { min_days_in_first_week }
    }

    /// The proleptic Julian calendar.
    pub const fn julian() -> CalendarSystem {
        CalendarSystem::Julian { min_days_in_first_week: ISO_MIN_DAYS_IN_FIRST_WEEK }
    }

    /// The Coptic calendar.
    pub const fn coptic() -> CalendarSystem {
        CalendarSystem::Coptic
    }

    /// A tabular Islamic calendar with the given leap-year pattern and epoch.
    pub const fn islamic(pattern: IslamicLeapYearPattern, epoch: IslamicEpoch) -> CalendarSystem {
        CalendarSystem::Islamic { pattern, epoch }
    }

    /// A short machine-stable id, e.g. `"ISO"`, `"Julian"`, `"Coptic"`, `"Islamic Civil-Base15"`.
    pub fn id(&self) -> String {
        match self {
            CalendarSystem::Iso { .. } => "ISO".to_string(),
            CalendarSystem::Julian { .. } => "Julian".to_string(),
            CalendarSystem::Coptic => "Coptic".to_string(),
            CalendarSystem::Islamic { pattern, epoch } => {
                format!("Islamic {epoch:?}-{pattern:?}")
            }
        }
    }

    /// A human-readable name; identical to `id()` for this implementation.
    pub fn name(&self) -> String {
        self.id()
    }

    /// The stable small integer ordinal used for flyweight identity comparisons.
    pub fn ordinal(&self) -> CalendarOrdinal {
        match self {
            CalendarSystem::Iso { .. } => CalendarOrdinal::Iso,
            CalendarSystem::Julian { .. } => CalendarOrdinal::Julian,
            CalendarSystem::Coptic => CalendarOrdinal::Coptic,
            CalendarSystem::Islamic { .. } => CalendarOrdinal::Islamic,
        }
    }

    /// Months in a year: 12 for every calendar here except Coptic's 13.
    pub fn months_in_year(&self, _year: i32) -> u32 {
        match self {
            CalendarSystem::Coptic => 13,
            _ => 12,
        }
    }

    pub fn is_leap_year(&self, year: i32) -> bool {
        match self {
            CalendarSystem::Iso { .. } => iso::is_leap_year(year as i64, false),
            CalendarSystem::Julian { .. } => iso::is_leap_year(year as i64, true),
            CalendarSystem::Coptic => coptic::is_leap_year(year as i64),
            CalendarSystem::Islamic { pattern, .. } => islamic::is_leap_year(year as i64, *pattern),
        }
    }

    pub fn days_in_year(&self, year: i32) -> u32 {
        (match self {
            CalendarSystem::Iso { .. } => iso::days_in_year(year as i64, false),
            CalendarSystem::Julian { .. } => iso::days_in_year(year as i64, true),
            CalendarSystem::Coptic => coptic::days_in_year(year as i64),
            CalendarSystem::Islamic { pattern, .. } => islamic::days_in_year(year as i64, *pattern),
        }) as u32
    }

    /// Fails with `Error::ArgumentOutOfRange` if `month` is out of range for this calendar.
    pub fn days_in_month(&self, year: i32, month: u32) -> Result<u32, Error> {
        self.check_month(year, month)?;
        Ok((match self {
            CalendarSystem::Iso { .. } => iso::days_in_month(year as i64, month, false),
            CalendarSystem::Julian { .. } => iso::days_in_month(year as i64, month, true),
            CalendarSystem::Coptic => coptic::days_in_month(year as i64, month),
            CalendarSystem::Islamic { pattern, .. } => islamic::days_in_month(year as i64, month, *pattern),
        }) as u32)
    }

    fn check_month(&self, year: i32, month: u32) -> Result<(), Error> {
        let max = self.months_in_year(year);
        if month < 1 || month > max {
            return Err(Error::ArgumentOutOfRange { field: "month", value: month as i64, min: 1, max: max as i64 });
        }
        Ok(())
    }

    /// Fails with `Error::ArgumentOutOfRange` when `month` or `day` is invalid for `year`.
    pub fn validate_year_month_day(&self, year: i32, month: u32, day: u32) -> Result<(), Error> {
        let max_day = self.days_in_month(year, month)?;
        if day < 1 || day > max_day {
            return Err(Error::ArgumentOutOfRange { field: "day", value: day as i64, min: 1, max: max_day as i64 });
        }
        Ok(())
    }

    /// Builds a `YearMonthDay` after validating its components.
    pub(crate) fn year_month_day(&self, year: i32, month: u32, day: u32) -> Result<YearMonthDay, Error> {
        self.validate_year_month_day(year, month, day)?;
        Ok(YearMonthDay::pack(year, month, day))
    }

    pub fn days_since_epoch(&self, ymd: YearMonthDay) -> i64 {
        let (y, m, d) = (ymd.year() as i64, ymd.month(), ymd.day());
        match self {
            CalendarSystem::Iso { .. } => iso::days_since_epoch(y, m, d, false),
            CalendarSystem::Julian { .. } => iso::days_since_epoch(y, m, d, true),
            CalendarSystem::Coptic => coptic::days_since_epoch(y, m, d),
            CalendarSystem::Islamic { pattern, epoch } => islamic::days_since_epoch(y, m, d, *pattern, *epoch),
        }
    }

    pub fn year_month_day_from_days_since_epoch(&self, days: i64) -> YearMonthDay {
        let (y, m, d) = match self {
            CalendarSystem::Iso { .. } => iso::year_month_day_from_days_since_epoch(days, false),
            CalendarSystem::Julian { .. } => iso::year_month_day_from_days_since_epoch(days, true),
            CalendarSystem::Coptic => coptic::year_month_day_from_days_since_epoch(days),
            CalendarSystem::Islamic { pattern, epoch } => {
                islamic::year_month_day_from_days_since_epoch(days, *pattern, *epoch)
            }
        };
        YearMonthDay::pack(y as i32, m, d)
    }

    /// ISO day of the week (Monday = 1 … Sunday = 7) for every calendar here
    /// (spec.md §4.2: "an override of `usesIsoDayOfWeek`" — all four variants
    /// described in scope use it, Coptic included).
    pub fn day_of_week(&self, ymd: YearMonthDay) -> Weekday {
        let days = self.days_since_epoch(ymd);
        // 1970-01-01 (days == 0) was a Thursday.
        Weekday::from_iso_number(days + 4)
    }

    /// The ISO-8601-style week-year and week-of-week-year for `ymd`, using this
    /// calendar's `minDaysInFirstWeek` (spec.md §4.2's week-year algorithm).
    pub fn week_year_and_week(&self, ymd: YearMonthDay) -> (i32, u32) {
        let min_days = self.min_days_in_first_week();
        let weekday = self.day_of_week(ymd).number_from_monday() as i64;
        let days_since_epoch = self.days_since_epoch(ymd);
        // Monday of the ISO week containing `ymd`.
        let monday_of_week = days_since_epoch - (weekday - 1);

        let candidate_year = ymd.year();
        for &year in &[candidate_year - 1, candidate_year, candidate_year + 1] {
            let week1_monday = self.week1_monday(year, min_days);
            let next_week1_monday = self.week1_monday(year + 1, min_days);
            if monday_of_week >= week1_monday && monday_of_week < next_week1_monday {
                let week = (monday_of_week - week1_monday) / 7 + 1;
                return (year, week as u32);
            }
        }
        unreachable!("week-year search failed to bracket the date")
    }

    /// Monday that starts week 1 of `year`: the Monday on/before the first day
    /// of `year` that has at least `min_days_in_first_week` days in `year`.
    fn week1_monday(&self, year: i32, min_days_in_first_week: u8) -> i64 {
        let jan1 = self.year_month_day(year, 1, 1).unwrap_or_else(|_| YearMonthDay::pack(year, 1, 1));
        let jan1_days = self.days_since_epoch(jan1);
        let jan1_weekday = self.day_of_week(jan1).number_from_monday() as i64;
        let monday_on_or_before_jan1 = jan1_days - (jan1_weekday - 1);
        // Days of `year` that fall in the week starting at monday_on_or_before_jan1.
        let days_of_year_in_week = 7 - (jan1_weekday - 1);
        if days_of_year_in_week >= min_days_in_first_week as i64 {
            monday_on_or_before_jan1
        } else {
            monday_on_or_before_jan1 + 7
        }
    }

    fn min_days_in_first_week(&self) -> u8 {
        match self {
            CalendarSystem::Iso { min_days_in_first_week } => *min_days_in_first_week,
            CalendarSystem::Julian { min_days_in_first_week } => *min_days_in_first_week,
            _ => ISO_MIN_DAYS_IN_FIRST_WEEK,
        }
    }

    pub fn era(&self, ymd: YearMonthDay) -> Era {
        match self {
            CalendarSystem::Iso { .. } | CalendarSystem::Julian { .. } => era::gj_era(ymd.year()),
            CalendarSystem::Coptic => Era::AnnoMartyrum,
            CalendarSystem::Islamic { .. } => Era::AnnoHegirae,
        }
    }

    pub fn year_of_era(&self, ymd: YearMonthDay) -> i32 {
        match self {
            CalendarSystem::Iso { .. } | CalendarSystem::Julian { .. } => era::gj_year_of_era(ymd.year()),
            _ => ymd.year(),
        }
    }

    pub fn absolute_year(&self, year_of_era: i32, era: Era) -> i32 {
        match self {
            CalendarSystem::Iso { .. } | CalendarSystem::Julian { .. } => era::gj_absolute_year(year_of_era, era),
            _ => year_of_era,
        }
    }

    pub fn compare(&self, a: YearMonthDay, b: YearMonthDay) -> Ordering {
        a.cmp(&b)
    }
}

impl fmt::Display for CalendarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s7_week_year() {
        let iso = CalendarSystem::iso();
        let ymd = iso.year_month_day(2011, 1, 1).unwrap();
        assert_eq!(iso.week_year_and_week(ymd), (2010, 52));

        let ymd2 = iso.year_month_day(2012, 12, 31).unwrap();
        assert_eq!(iso.week_year_and_week(ymd2), (2013, 1));
    }

    #[test]
    fn month_day_bounds() {
        let iso = CalendarSystem::iso();
        assert!(iso.year_month_day(2000, 2, 29).is_ok());
        assert!(iso.year_month_day(1900, 2, 29).is_err());
        assert!(iso.year_month_day(2100, 2, 29).is_err());
    }

    #[test]
    fn month_lengths_sum_to_year_length() {
        for cal in [
            CalendarSystem::iso(),
            CalendarSystem::julian(),
            CalendarSystem::coptic(),
            CalendarSystem::islamic(IslamicLeapYearPattern::Base15, IslamicEpoch::Civil),
        ] {
            for year in [-5, 1, 4, 100, 1970, 2000] {
                let total: u32 = (1..=cal.months_in_year(year)).map(|m| cal.days_in_month(year, m).unwrap()).sum();
                assert_eq!(total, cal.days_in_year(year), "{cal:?} year {year}");
            }
        }
    }
}
