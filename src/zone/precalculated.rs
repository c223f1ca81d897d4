// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * An explicit, sorted table of [`ZoneInterval`]s covering a historical
 * window, with an optional daylight-rule tail for the open-ended future
 * (spec.md §4.4's `Precalculated` variant).
 */

use crate::instant::Instant;
use crate::offset::Offset;

use super::daylight::DaylightRuleZone;
use super::ZoneInterval;

#[derive(Clone, Debug, PartialEq)]
pub struct PrecalculatedZone {
    pub id: String,
    /// Sorted by `start`, contiguous (`intervals[i].end == intervals[i+1].start`).
    pub intervals: Vec<ZoneInterval>,
    /// Governs instants at or beyond the last interval's end.
    pub tail: Option<Box<DaylightRuleZone>>,
}

impl PrecalculatedZone {
    pub fn new(id: String, intervals: Vec<ZoneInterval>, tail: Option<Box<DaylightRuleZone>>) -> PrecalculatedZone {
        assert!(!intervals.is_empty(), "a precalculated zone needs at least one interval");
        PrecalculatedZone { id, intervals, tail }
    }

    pub fn min_offset(&self) -> Offset {
        let table_min = self.intervals.iter().map(|iv| iv.wall_offset).min().unwrap();
        match &self.tail {
            Some(tail) => table_min.min(tail.min_offset()),
            None => table_min,
        }
    }

    pub fn max_offset(&self) -> Offset {
        let table_max = self.intervals.iter().map(|iv| iv.wall_offset).max().unwrap();
        match &self.tail {
            Some(tail) => table_max.max(tail.max_offset()),
            None => table_max,
        }
    }

    /// Binary search by `start`, falling through to the tail rule past the
    /// end of the table.
    pub fn get_zone_interval(&self, instant: Instant) -> ZoneInterval {
        let last = self.intervals.last().expect("non-empty by construction");
        if instant >= last.end {
            if let Some(tail) = &self.tail {
                return tail.get_zone_interval(instant);
            }
        }
        let idx = match self.intervals.binary_search_by(|iv| iv.start.cmp(&instant)) {
            Ok(i) => i,
            Err(0) => 0,
            Err(i) => i - 1,
        };
        self.intervals[idx].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PrecalculatedZone {
        let a = ZoneInterval {
            name: "A".to_string(),
            start: Instant::MIN,
            end: Instant::from_unix_seconds(1_000),
            wall_offset: Offset::from_hours(1),
            savings: Offset::UTC,
        };
        let b = ZoneInterval {
            name: "B".to_string(),
            start: Instant::from_unix_seconds(1_000),
            end: Instant::MAX,
            wall_offset: Offset::from_hours(2),
            savings: Offset::from_hours(1),
        };
        PrecalculatedZone::new("TEST".to_string(), vec![a, b], None)
    }

    #[test]
    fn binary_search_finds_bracket() {
        let zone = table();
        assert_eq!(zone.get_zone_interval(Instant::from_unix_seconds(500)).name, "A");
        assert_eq!(zone.get_zone_interval(Instant::from_unix_seconds(1_000)).name, "B");
        assert_eq!(zone.get_zone_interval(Instant::from_unix_seconds(10_000)).name, "B");
    }
}
