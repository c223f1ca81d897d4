// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * Calendar-aware, time-zone-aware civil date and time.
 *
 * The core types are immutable values: [`Instant`] is a point on the
 * continuous UTC timeline; [`LocalDate`], [`LocalTime`] and
 * [`LocalDateTime`] are calendar readings with no attached offset or zone;
 * [`OffsetDateTime`] pins a local reading to a fixed offset; [`ZonedDateTime`]
 * pins one to a real [`DateTimeZone`], resolving DST gaps and overlaps
 * through a [`ResolverPolicy`]. [`CalendarSystem`] supports ISO/Gregorian,
 * Julian, Coptic and tabular-Islamic arithmetic; [`Period`] expresses
 * calendar-unit differences between two dates.
 */

mod calendar;
mod duration;
mod errors;
mod instant;
mod interval;
mod local_date;
mod local_date_time;
mod local_instant;
mod local_time;
mod offset;
mod offset_date_time;
mod period;
mod units;
mod year_month_day;
mod zone;
mod zoned_date_time;

pub use calendar::{CalendarSystem, Era, IslamicEpoch, IslamicLeapYearPattern};
pub use duration::Duration;
pub use errors::{Error, Result};
pub use instant::Instant;
pub use interval::Interval;
pub use local_date::LocalDate;
pub use local_date_time::LocalDateTime;
pub use local_time::LocalTime;
pub use offset::Offset;
pub use offset_date_time::OffsetDateTime;
pub use period::{Period, PeriodType};
pub use year_month_day::Weekday;
pub use zoned_date_time::{ResolverPolicy, ZonedDateTime};

pub use zone::cached::CachedZone;
pub use zone::daylight::DaylightRuleZone;
pub use zone::fixed::FixedZone;
pub use zone::precalculated::PrecalculatedZone;
pub use zone::provider::{
    current_zone, register_provider, resolve_zone, set_current_zone, DateTimeZoneProvider, DateTimeZoneSource,
    MapZoneSource,
};
pub use zone::recurrence::{TransitionMode, ZoneRecurrence};
pub use zone::tzdb::{self, GeoLocation, TzdbContainer};
pub use zone::{DateTimeZone, ZoneInterval, ZoneIntervalPair};
