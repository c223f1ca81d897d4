// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * A calendar date paired with a time-of-day, with no zone component.
 */

use std::cmp::Ordering;
use std::fmt;

use crate::calendar::CalendarSystem;
use crate::errors::Error;
use crate::local_date::LocalDate;
use crate::local_time::LocalTime;
use crate::period::Period;

/// A `LocalDate` and `LocalTime` pair.
#[derive(Copy, Clone)]
pub struct LocalDateTime {
    date: LocalDate,
    time: LocalTime,
}

impl LocalDateTime {
    pub(crate) fn new(date: LocalDate, time: LocalTime) -> LocalDateTime {
        LocalDateTime { date, time }
    }

    /// Makes a new `LocalDateTime` in the ISO calendar.
    ///
    /// Fails on an invalid date or time.
    pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> LocalDateTime {
        LocalDate::from_ymd(year, month, day).and_hms(hour, min, sec)
    }

    #[inline]
    pub fn date(&self) -> LocalDate {
        self.date
    }

    #[inline]
    pub fn time(&self) -> LocalTime {
        self.time
    }

    #[inline]
    pub fn calendar(&self) -> CalendarSystem {
        self.date.calendar()
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }
    pub fn month(&self) -> u32 {
        self.date.month()
    }
    pub fn day(&self) -> u32 {
        self.date.day()
    }
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }
    pub fn minute(&self) -> u32 {
        self.time.minute()
    }
    pub fn second(&self) -> u32 {
        self.time.second()
    }
    pub fn nanosecond(&self) -> u32 {
        self.time.nanosecond()
    }

    /// Adds a `Period`, using the calendar for date units and wrapping time
    /// units with overflow into the date portion (spec.md §4.3).
    pub fn plus_period(&self, period: &Period) -> Result<LocalDateTime, Error> {
        let (new_time, carry_days) = self.time.plus_period(&period.time_component())?;
        let new_date = self.date.plus_days(carry_days)?.plus_period(&period.date_component())?;
        Ok(LocalDateTime { date: new_date, time: new_time })
    }

    pub fn minus_period(&self, period: &Period) -> Result<LocalDateTime, Error> {
        self.plus_period(&period.negate())
    }
}

impl PartialEq for LocalDateTime {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date && self.time == other.time
    }
}

impl Eq for LocalDateTime {}

impl PartialOrd for LocalDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.date.try_cmp(&other.date).ok()? {
            Ordering::Equal => self.time.partial_cmp(&other.time),
            ord => Some(ord),
        }
    }
}

impl fmt::Debug for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}T{:?}", self.date, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_construction() {
        let dt = LocalDateTime::from_ymd_hms(2020, 6, 15, 13, 45, 0);
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour(), dt.minute()), (2020, 6, 15, 13, 45));
    }

    #[test]
    fn time_overflow_carries_into_date() {
        let dt = LocalDateTime::from_ymd_hms(2020, 1, 1, 23, 0, 0);
        let later = dt.plus_period(&Period::from_hours(2)).unwrap();
        assert_eq!((later.day(), later.hour()), (2, 1));
    }
}
