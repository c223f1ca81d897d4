// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * The structured error surface (spec §7). Every fallible operation that
 * cannot express its failure as a plain `Option` returns `Result<T, Error>`.
 */

use crate::local_date_time::LocalDateTime;
use crate::zone::ZoneInterval;

/// The single error type for the crate.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// A year/month/day/hour/… value is outside the permitted range for its calendar.
    #[error("{field} out of range: {value} (expected {min}..={max})")]
    ArgumentOutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Two values that require the same calendar (or zone) were mixed.
    #[error("{0}")]
    ArgumentInvalid(&'static str),

    /// A 64-bit tick/nanosecond computation exceeded the representable range.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    /// `getOffsetFromLocal`/`ZonedDateTime` construction landed in a DST gap.
    #[error("local time {local:?} does not exist in zone {zone} (DST gap)")]
    SkippedTime { local: LocalDateTime, zone: String },

    /// `getOffsetFromLocal`/`ZonedDateTime` construction landed in an overlap.
    #[error("local time {local:?} is ambiguous in zone {zone} (DST overlap)")]
    AmbiguousTime {
        local: LocalDateTime,
        zone: String,
        earlier: ZoneInterval,
        later: ZoneInterval,
    },

    /// `forId`'s "require" variant found no match across any provider.
    #[error("unknown time zone id: {0}")]
    UnknownZoneId(String),

    /// The tzdb reader hit a bad discriminator, length, or pool index.
    #[error("malformed tzdb stream: {0}")]
    MalformedTzdbStream(&'static str),

    /// A date-bearing `Period` was added to a `LocalTime`, or vice versa.
    #[error("invalid period operation: {0}")]
    InvalidPeriod(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
