// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * A zone described by a standard/daylight pair of yearly [`ZoneRecurrence`]s
 * rather than a precomputed interval table (spec.md §4.4's
 * "daylight-savings-rule" variant).
 */

use crate::instant::Instant;
use crate::offset::Offset;

use super::recurrence::ZoneRecurrence;
use super::ZoneInterval;

#[derive(Clone, Debug, PartialEq)]
pub struct DaylightRuleZone {
    pub id: String,
    pub standard_offset: Offset,
    pub standard_rule: ZoneRecurrence,
    pub daylight_rule: ZoneRecurrence,
}

impl DaylightRuleZone {
    pub fn new(
        id: String,
        standard_offset: Offset,
        standard_rule: ZoneRecurrence,
        daylight_rule: ZoneRecurrence,
    ) -> DaylightRuleZone {
        DaylightRuleZone { id, standard_offset, standard_rule, daylight_rule }
    }

    pub fn min_offset(&self) -> Offset {
        self.standard_offset.min(self.standard_offset + self.daylight_rule.savings)
    }

    pub fn max_offset(&self) -> Offset {
        self.standard_offset.max(self.standard_offset + self.daylight_rule.savings)
    }

    /// Projects the standard/daylight rule pair to concrete transition
    /// instants for the three years surrounding `instant`'s (UTC) year, then
    /// picks the bracket containing it.
    pub fn get_zone_interval(&self, instant: Instant) -> ZoneInterval {
        let probe_year = instant.in_utc().year();
        let mut transitions: Vec<(Instant, Offset, &str)> = Vec::new();
        for year in (probe_year - 1)..=(probe_year + 1) {
            if year < self.standard_rule.year_start || year > self.standard_rule.year_end {
                continue;
            }
            let standard_instant =
                self.standard_rule.transition_instant(year, self.standard_offset, self.daylight_rule.savings);
            transitions.push((standard_instant, Offset::UTC, self.standard_rule.name.as_str()));

            let daylight_instant =
                self.daylight_rule.transition_instant(year, self.standard_offset, Offset::UTC);
            transitions.push((daylight_instant, self.daylight_rule.savings, self.daylight_rule.name.as_str()));
        }
        transitions.sort_by_key(|(at, _, _)| *at);

        let mut start = Instant::MIN;
        let mut savings = Offset::UTC;
        let mut name = self.standard_rule.name.as_str();
        let mut end = Instant::MAX;
        for (at, savings_after, name_after) in &transitions {
            if *at <= instant {
                start = *at;
                savings = *savings_after;
                name = name_after;
            } else {
                end = *at;
                break;
            }
        }

        ZoneInterval {
            name: name.to_string(),
            start,
            end,
            wall_offset: self.standard_offset + savings,
            savings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_time::LocalTime;
    use crate::year_month_day::Weekday;
    use crate::zone::recurrence::TransitionMode;

    fn us_pacific() -> DaylightRuleZone {
        DaylightRuleZone::new(
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
        )
    }

    #[test]
    fn winter_instant_is_standard() {
        let zone = us_pacific();
        let winter = Instant::from_unix_seconds(1_262_332_800); // 2010-01-01T08:00:00Z
        let iv = zone.get_zone_interval(winter);
        assert_eq!(iv.wall_offset, Offset::from_hours(-8));
        assert_eq!(iv.name, "PST");
    }

    #[test]
    fn summer_instant_is_daylight() {
        let zone = us_pacific();
        let summer = Instant::from_unix_seconds(1_277_985_600); // 2010-07-01T12:00:00Z
        let iv = zone.get_zone_interval(summer);
        assert_eq!(iv.wall_offset, Offset::from_hours(-7));
        assert_eq!(iv.name, "PDT");
    }
}
