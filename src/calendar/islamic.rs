// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * The tabular Islamic calendar: a fixed 30-year cycle with 11 leap years,
 * selected by [`IslamicLeapYearPattern`], and an epoch choice of one day
 * (spec.md §4.2, §6.4).
 */

use crate::units::floor_div;

/// Which of the 30-year cycle's 11 years carry an extra day.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IslamicLeapYearPattern {
    Base15,
    Base16,
    Indian,
    HabashAlHasib,
}

impl IslamicLeapYearPattern {
    fn leap_years_in_cycle(&self) -> &'static [i64] {
        match self {
            IslamicLeapYearPattern::Base15 => &[2, 5, 7, 10, 13, 15, 18, 21, 24, 26, 29],
            IslamicLeapYearPattern::Base16 => &[2, 5, 7, 10, 13, 16, 18, 21, 24, 27, 29],
            IslamicLeapYearPattern::Indian => &[2, 5, 8, 10, 13, 16, 19, 21, 24, 27, 29],
            IslamicLeapYearPattern::HabashAlHasib => &[2, 5, 8, 11, 13, 16, 19, 21, 24, 27, 30],
        }
    }

    fn is_leap_position(&self, position_in_cycle: i64) -> bool {
        self.leap_years_in_cycle().contains(&position_in_cycle)
    }
}

/// Which day the Islamic epoch falls on, one day apart (spec.md §6.4).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IslamicEpoch {
    /// R.D. 227015 (Friday, July 16, 622 CE Julian).
    Astronomical,
    /// R.D. 227014 (Thursday, July 15, 622 CE Julian).
    Civil,
}

impl IslamicEpoch {
    fn days_since_unix_epoch(&self) -> i64 {
        const GREGORIAN_RD_EPOCH: i64 = 1;
        let rd = match self {
            IslamicEpoch::Astronomical => 227_015,
            IslamicEpoch::Civil => 227_014,
        };
        (rd - GREGORIAN_RD_EPOCH) - crate::units::DAYS_FROM_YEAR_1_TO_1970
    }
}

const DAYS_PER_30_YEAR_CYCLE: i64 = 10_631;

fn position_in_cycle(year: i64) -> i64 {
    // 1-based position within the 30-year cycle, 1..=30.
    let zero_based = (year - 1).rem_euclid(30);
    zero_based + 1
}

pub(crate) fn is_leap_year(year: i64, pattern: IslamicLeapYearPattern) -> bool {
    pattern.is_leap_position(position_in_cycle(year))
}

pub(crate) fn days_in_year(year: i64, pattern: IslamicLeapYearPattern) -> i64 {
    if is_leap_year(year, pattern) { 355 } else { 354 }
}

pub(crate) fn days_in_month(year: i64, month: u32, pattern: IslamicLeapYearPattern) -> i64 {
    if month % 2 == 1 {
        30
    } else if month == 12 && is_leap_year(year, pattern) {
        30
    } else {
        29
    }
}

pub(crate) fn days_before_year(year: i64, pattern: IslamicLeapYearPattern) -> i64 {
    let cycle = floor_div(year - 1, 30);
    let pos0 = (year - 1) - cycle * 30; // 0-based offset within the cycle, 0..=29
    let mut days = cycle * DAYS_PER_30_YEAR_CYCLE;
    for p in 0..pos0 {
        let y_in_cycle = p + 1;
        days += if pattern.is_leap_position(y_in_cycle) { 355 } else { 354 };
    }
    days
}

pub(crate) fn days_since_epoch(year: i64, month: u32, day: u32, pattern: IslamicLeapYearPattern, epoch: IslamicEpoch) -> i64 {
    let mut days_before_month = 0i64;
    for m in 1..month {
        days_before_month += days_in_month(year, m, pattern);
    }
    epoch.days_since_unix_epoch() + days_before_year(year, pattern) + days_before_month + (day as i64 - 1)
}

pub(crate) fn year_month_day_from_days_since_epoch(
    days: i64,
    pattern: IslamicLeapYearPattern,
    epoch: IslamicEpoch,
) -> (i64, u32, u32) {
    let calendar_day_index = days - epoch.days_since_unix_epoch();

    let mut year = floor_div(calendar_day_index, 355) + 1;
    loop {
        let start = days_before_year(year, pattern);
        if start > calendar_day_index {
            year -= 1;
            continue;
        }
        if days_before_year(year + 1, pattern) <= calendar_day_index {
            year += 1;
            continue;
        }
        break;
    }

    let mut remaining = calendar_day_index - days_before_year(year, pattern);
    let mut month = 1u32;
    loop {
        let len = days_in_month(year, month, pattern);
        if remaining < len {
            break;
        }
        remaining -= len;
        month += 1;
    }
    (year, month, (remaining + 1) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_patterns() {
        for &pattern in &[
            IslamicLeapYearPattern::Base15,
            IslamicLeapYearPattern::Base16,
            IslamicLeapYearPattern::Indian,
            IslamicLeapYearPattern::HabashAlHasib,
        ] {
            for &epoch in &[IslamicEpoch::Astronomical, IslamicEpoch::Civil] {
                for days in [-100_000i64, -1, 0, 1, 200_000] {
                    let (y, m, d) = year_month_day_from_days_since_epoch(days, pattern, epoch);
                    assert_eq!(days_since_epoch(y, m, d, pattern, epoch), days, "{pattern:?} {epoch:?}");
                }
            }
        }
    }

    #[test]
    fn epoch_choices_differ_by_one_day() {
        let astro = IslamicEpoch::Astronomical.days_since_unix_epoch();
        let civil = IslamicEpoch::Civil.days_since_unix_epoch();
        assert_eq!(astro - civil, 1);
    }

    #[test]
    fn cycle_has_eleven_leap_years() {
        for pattern in [
            IslamicLeapYearPattern::Base15,
            IslamicLeapYearPattern::Base16,
            IslamicLeapYearPattern::Indian,
            IslamicLeapYearPattern::HabashAlHasib,
        ] {
            let leap_count = (1..=30).filter(|&y| is_leap_year(y, pattern)).count();
            assert_eq!(leap_count, 11);
        }
    }
}
