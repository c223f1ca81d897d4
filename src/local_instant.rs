// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * `LocalInstant`: the tick value that, interpreted as UTC, would display the
 * same wall-clock reading as the intended local time.
 *
 * This is purely an internal book-keeping device for the zone resolution
 * algorithm (`crate::zone`); it is never part of the public API (DESIGN.md
 * §9, resolution of the corresponding Open Question).
 */

use crate::duration::Duration;
use crate::instant::Instant;
use crate::offset::Offset;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub(crate) struct LocalInstant {
    ticks: i64,
}

impl LocalInstant {
    pub(crate) const fn from_ticks(ticks: i64) -> LocalInstant {
        LocalInstant { ticks }
    }

    pub(crate) const fn ticks(&self) -> i64 {
        self.ticks
    }

    /// Treats the local-instant's tick value as a candidate UTC instant.
    pub(crate) fn as_instant_guess(&self) -> Instant {
        Instant::from_unix_ticks(self.ticks)
    }

    /// Converts a UTC `Instant` plus a wall offset into a `LocalInstant`.
    pub(crate) fn from_instant_and_offset(instant: Instant, offset: Offset) -> LocalInstant {
        LocalInstant { ticks: instant.unix_ticks() + offset.as_duration().ticks() }
    }

    /// Converts this local instant back to a UTC `Instant` given the offset that applies.
    pub(crate) fn to_instant(&self, offset: Offset) -> Instant {
        Instant::from_unix_ticks(self.ticks - offset.as_duration().ticks())
    }

    pub(crate) fn plus(&self, d: Duration) -> LocalInstant {
        LocalInstant { ticks: self.ticks + d.ticks() }
    }
}
