// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * `ZoneRecurrence`: a yearly transition rule, the building block of
 * [`super::daylight::DaylightRuleZone`] and of a `Precalculated` zone's tail
 * (spec.md §4.4).
 */

use crate::local_date::LocalDate;
use crate::local_date_time::LocalDateTime;
use crate::local_time::LocalTime;
use crate::offset::Offset;
use crate::offset_date_time::OffsetDateTime;
use crate::year_month_day::Weekday;

/// Which clock reading `time_of_day` is measured against.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransitionMode {
    /// The wall clock including whatever savings were in effect beforehand.
    Wall,
    /// The zone's standard (non-daylight) clock.
    Standard,
    /// UTC.
    Utc,
}

/// One side of a daylight-saving rule pair: "transitions to this offset every
/// year on such-and-such a date".
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneRecurrence {
    pub name: String,
    /// The savings in effect once this recurrence applies (zero for the
    /// standard-time side of a rule pair).
    pub savings: Offset,
    pub year_start: i32,
    pub year_end: i32,
    pub month_of_year: u32,
    /// A positive day-of-month, or a negative count from the end of the
    /// month (`-1` is the last day).
    pub day_of_month: i32,
    /// If set, the transition falls on this weekday on-or-after (`advance =
    /// true`) or on-or-before (`advance = false`) `day_of_month`.
    pub day_of_week: Option<Weekday>,
    pub advance: bool,
    pub time_of_day: LocalTime,
    pub mode: TransitionMode,
}

impl ZoneRecurrence {
    /// The transition date in `year`, applying the day-of-month/day-of-week rule.
    pub fn transition_date(&self, year: i32) -> LocalDate {
        let base_day = if self.day_of_month > 0 {
            self.day_of_month as u32
        } else {
            let days_in_month = crate::calendar::CalendarSystem::iso()
                .days_in_month(year, self.month_of_year)
                .expect("valid month");
            (days_in_month as i32 + self.day_of_month + 1) as u32
        };
        let base = LocalDate::from_ymd(year, self.month_of_year, base_day);
        match self.day_of_week {
            None => base,
            Some(weekday) if base.weekday() == weekday => base,
            Some(weekday) if self.advance => base.next(weekday),
            Some(weekday) => base.previous(weekday),
        }
    }

    /// The transition as a local wall-clock reading in `year`.
    pub fn transition_local_date_time(&self, year: i32) -> LocalDateTime {
        self.transition_date(year).and_time(self.time_of_day)
    }

    /// The instant this recurrence transitions at in `year`, given the
    /// standard offset of the owning zone and the savings in effect just
    /// before the transition (needed to interpret [`TransitionMode::Wall`]).
    pub fn transition_instant(
        &self,
        year: i32,
        standard_offset: Offset,
        savings_before: Offset,
    ) -> crate::instant::Instant {
        let local = self.transition_local_date_time(year);
        let offset = match self.mode {
            TransitionMode::Utc => Offset::UTC,
            TransitionMode::Standard => standard_offset,
            TransitionMode::Wall => standard_offset + savings_before,
        };
        OffsetDateTime::new(local, offset).to_instant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_sunday_of_month() {
        // Transition on the last Sunday of October, matching the classic
        // European "last Sunday" rule shape.
        let rule = ZoneRecurrence {
            name: "TEST".to_string(),
            savings: Offset::UTC,
            year_start: 2000,
            year_end: 2100,
            month_of_year: 10,
            day_of_month: -1,
            day_of_week: Some(Weekday::Sunday),
            advance: false,
            time_of_day: LocalTime::from_hms(1, 0, 0),
            mode: TransitionMode::Utc,
        };
        let date = rule.transition_date(2010);
        assert_eq!(date.weekday(), Weekday::Sunday);
        assert_eq!(date.month(), 10);
        assert!(date.day() >= 25);
    }

    #[test]
    fn fixed_day_with_no_weekday_constraint() {
        let rule = ZoneRecurrence {
            name: "TEST".to_string(),
            savings: Offset::from_hours(1),
            year_start: 2000,
            year_end: 2100,
            month_of_year: 4,
            day_of_month: 15,
            day_of_week: None,
            advance: true,
            time_of_day: LocalTime::MIDNIGHT,
            mode: TransitionMode::Standard,
        };
        assert_eq!(rule.transition_date(2012), LocalDate::from_ymd(2012, 4, 15));
    }
}
