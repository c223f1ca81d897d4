// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * The Coptic calendar: 12 months of 30 days plus a 13th month of 5 or 6
 * days, leap when `year mod 4 == 3` (spec.md §4.2).
 */

use crate::units::floor_div;

/// Days from the Unix epoch to the Coptic epoch (year 1, month 1, day 1),
/// anchored at R.D. 103605 (Dershowitz & Reingold's "Calendrical Calculations"
/// fixed-date epoch for the Coptic calendar, non-goal of historical accuracy
/// notwithstanding — this only needs to be a stable, self-consistent anchor).
const EPOCH_DAYS_SINCE_UNIX_EPOCH: i64 = -615_558;

#[inline]
pub(crate) fn is_leap_year(year: i64) -> bool {
    year.rem_euclid(4) == 3
}

pub(crate) fn days_in_month(year: i64, month: u32) -> i64 {
    if month <= 12 {
        30
    } else if is_leap_year(year) {
        6
    } else {
        5
    }
}

pub(crate) fn days_in_year(year: i64) -> i64 {
    if is_leap_year(year) { 366 } else { 365 }
}

pub(crate) fn days_before_year(year: i64) -> i64 {
    let y = year - 1;
    365 * y + floor_div(y, 4)
}

pub(crate) fn days_since_epoch(year: i64, month: u32, day: u32) -> i64 {
    let days_before_month = (month as i64 - 1) * 30;
    EPOCH_DAYS_SINCE_UNIX_EPOCH + days_before_year(year) + days_before_month + (day as i64 - 1)
}

pub(crate) fn year_month_day_from_days_since_epoch(days: i64) -> (i64, u32, u32) {
    let calendar_day_index = days - EPOCH_DAYS_SINCE_UNIX_EPOCH;

    let mut year = floor_div(calendar_day_index, 365) + 1;
    loop {
        let start = days_before_year(year);
        if start > calendar_day_index {
            year -= 1;
            continue;
        }
        if days_before_year(year + 1) <= calendar_day_index {
            year += 1;
            continue;
        }
        break;
    }

    let day_of_year0 = calendar_day_index - days_before_year(year);
    let month = (day_of_year0 / 30) + 1;
    let month = month.min(13) as u32;
    let day = (day_of_year0 - (month as i64 - 1) * 30 + 1) as u32;
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        for days in [-400_000i64, -1, 0, 1, 500_000] {
            let (y, m, d) = year_month_day_from_days_since_epoch(days);
            assert_eq!(days_since_epoch(y, m, d), days);
        }
    }

    #[test]
    fn leap_year_has_six_day_month_13() {
        let leap_year = (0..40).map(|n| n * 4 + 3).next().unwrap();
        assert!(is_leap_year(leap_year));
        assert_eq!(days_in_month(leap_year, 13), 6);
        assert_eq!(days_in_year(leap_year), 366);
    }
}
