// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * The simplest zone variant: one constant offset for all time (spec.md
 * §4.4's `Fixed` variant; also backs `DateTimeZone::Utc`).
 */

use crate::instant::Instant;
use crate::offset::Offset;

use super::ZoneInterval;

#[derive(Clone, Debug, PartialEq)]
pub struct FixedZone {
    pub id: String,
    pub offset: Offset,
}

impl FixedZone {
    pub fn new(id: String, offset: Offset) -> FixedZone {
        FixedZone { id, offset }
    }

    /// The generated `"+05:30"`-style id/name `DateTimeZone::for_offset` uses.
    pub fn for_offset(offset: Offset) -> FixedZone {
        FixedZone { id: format!("{offset}"), offset }
    }

    pub fn get_zone_interval(&self) -> ZoneInterval {
        ZoneInterval {
            name: self.id.clone(),
            start: Instant::MIN,
            end: Instant::MAX,
            wall_offset: self.offset,
            savings: Offset::UTC,
        }
    }
}
