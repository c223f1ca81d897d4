// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * The persisted tzdb container format (spec.md §4.4): a field-tagged binary
 * stream the provider reads zones, the IANA alias map, and related metadata
 * from. The *compiler* that produces this stream from IANA source files is
 * out of scope (spec.md §1); only the container's shape is implemented here.
 */

use std::collections::HashMap;

use crate::errors::Error;
use crate::local_time::LocalTime;
use crate::offset::Offset;
use crate::year_month_day::Weekday;

use super::daylight::DaylightRuleZone;
use super::fixed::FixedZone;
use super::precalculated::PrecalculatedZone;
use super::recurrence::{TransitionMode, ZoneRecurrence};
use super::{DateTimeZone, ZoneInterval};

const MAGIC_VERSION: u32 = 0x435A_5401; // "civil_time tzdb, format 1"

const TAG_TIME_ZONE: u8 = 0;
const TAG_TZDB_VERSION: u8 = 1;
const TAG_TZDB_ID_MAP: u8 = 2;
const TAG_CLDR_WINDOWS_ZONES: u8 = 3;
const TAG_WINDOWS_STANDARD_NAME_MAP: u8 = 4;
const TAG_GEO_LOCATIONS: u8 = 5;

const ZONE_KIND_FIXED: u8 = 0;
const ZONE_KIND_PRECALCULATED: u8 = 1;
const ZONE_KIND_DAYLIGHT_RULE: u8 = 2;

/// A geographic anchor for a zone id, as carried by the `GeoLocations` tag.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub zone_id: String,
    pub country_name: String,
    pub country_code: String,
    pub comment: String,
}

/// The decoded contents of a tzdb container.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TzdbContainer {
    pub version: Option<String>,
    pub zones: HashMap<String, DateTimeZone>,
    /// Alias id → canonical id, already fully resolved (spec.md: "chains collapsed").
    pub id_map: HashMap<String, String>,
    pub cldr_windows_zones: HashMap<String, String>,
    pub windows_standard_name_map: HashMap<String, String>,
    pub geo_locations: Vec<GeoLocation>,
}

// --- varint / zigzag -------------------------------------------------------

fn write_varint(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        }
        buf.push(byte | 0x80);
    }
}

fn read_varint(bytes: &[u8], pos: &mut usize) -> Result<u64, Error> {
    let mut result: u64 = 0;
    let mut shift = 0;
    loop {
        let byte = *bytes.get(*pos).ok_or(Error::MalformedTzdbStream("truncated varint"))?;
        *pos += 1;
        result |= ((byte & 0x7f) as u64) << shift;
        if byte & 0x80 == 0 {
            return Ok(result);
        }
        shift += 7;
        if shift >= 64 {
            return Err(Error::MalformedTzdbStream("varint too long"));
        }
    }
}

fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

fn write_svarint(buf: &mut Vec<u8>, value: i64) {
    write_varint(buf, zigzag_encode(value));
}

fn read_svarint(bytes: &[u8], pos: &mut usize) -> Result<i64, Error> {
    Ok(zigzag_decode(read_varint(bytes, pos)?))
}

fn write_string(buf: &mut Vec<u8>, s: &str) {
    write_varint(buf, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

fn read_string(bytes: &[u8], pos: &mut usize) -> Result<String, Error> {
    let len = read_varint(bytes, pos)? as usize;
    let end = pos.checked_add(len).ok_or(Error::MalformedTzdbStream("string length overflow"))?;
    let slice = bytes.get(*pos..end).ok_or(Error::MalformedTzdbStream("truncated string"))?;
    *pos = end;
    String::from_utf8(slice.to_vec()).map_err(|_| Error::MalformedTzdbStream("string is not valid utf-8"))
}

// --- zone blob encode/decode ------------------------------------------------

fn write_zone_interval(buf: &mut Vec<u8>, base: crate::instant::Instant, iv: &ZoneInterval) {
    write_svarint(buf, iv.start.unix_ticks().saturating_sub(base.unix_ticks()));
    write_svarint(buf, iv.wall_offset.total_seconds() as i64);
    write_svarint(buf, iv.savings.total_seconds() as i64);
    write_string(buf, &iv.name);
}

fn read_zone_interval(
    bytes: &[u8],
    pos: &mut usize,
    base: crate::instant::Instant,
    end: crate::instant::Instant,
) -> Result<ZoneInterval, Error> {
    let delta = read_svarint(bytes, pos)?;
    let start = crate::instant::Instant::from_unix_ticks(base.unix_ticks().saturating_add(delta));
    let wall_offset = Offset::from_seconds(read_svarint(bytes, pos)? as i32);
    let savings = Offset::from_seconds(read_svarint(bytes, pos)? as i32);
    let name = read_string(bytes, pos)?;
    Ok(ZoneInterval { name, start, end, wall_offset, savings })
}

fn write_recurrence(buf: &mut Vec<u8>, rule: &ZoneRecurrence) {
    write_string(buf, &rule.name);
    write_svarint(buf, rule.savings.total_seconds() as i64);
    write_svarint(buf, rule.year_start as i64);
    write_svarint(buf, rule.year_end as i64);
    write_varint(buf, rule.month_of_year as u64);
    write_svarint(buf, rule.day_of_month as i64);
    match rule.day_of_week {
        Some(weekday) => write_varint(buf, weekday as u64),
        None => write_varint(buf, 0),
    }
    buf.push(rule.advance as u8);
    write_varint(buf, rule.time_of_day.nanosecond_of_day() as u64);
    let mode = match rule.mode {
        TransitionMode::Wall => 0u8,
        TransitionMode::Standard => 1u8,
        TransitionMode::Utc => 2u8,
    };
    buf.push(mode);
}

fn read_recurrence(bytes: &[u8], pos: &mut usize) -> Result<ZoneRecurrence, Error> {
    let name = read_string(bytes, pos)?;
    let savings = Offset::from_seconds(read_svarint(bytes, pos)? as i32);
    let year_start = read_svarint(bytes, pos)? as i32;
    let year_end = read_svarint(bytes, pos)? as i32;
    let month_of_year = read_varint(bytes, pos)? as u32;
    let day_of_month = read_svarint(bytes, pos)? as i32;
    let day_of_week_raw = read_varint(bytes, pos)?;
    let day_of_week = if day_of_week_raw == 0 { None } else { Some(Weekday::from_iso_number(day_of_week_raw as i64)) };
    let advance = *bytes.get(*pos).ok_or(Error::MalformedTzdbStream("truncated recurrence"))? != 0;
    *pos += 1;
    let time_of_day_nanos = read_varint(bytes, pos)?;
    let time_of_day = LocalTime::try_from_nanosecond_of_day(time_of_day_nanos as i64)
        .map_err(|_| Error::MalformedTzdbStream("invalid recurrence time-of-day"))?;
    let mode_byte = *bytes.get(*pos).ok_or(Error::MalformedTzdbStream("truncated recurrence"))?;
    *pos += 1;
    let mode = match mode_byte {
        0 => TransitionMode::Wall,
        1 => TransitionMode::Standard,
        2 => TransitionMode::Utc,
        _ => return Err(Error::MalformedTzdbStream("unknown transition mode")),
    };
    Ok(ZoneRecurrence { name, savings, year_start, year_end, month_of_year, day_of_month, day_of_week, advance, time_of_day, mode })
}

fn write_zone(buf: &mut Vec<u8>, zone: &DateTimeZone) -> Result<(), Error> {
    match zone {
        DateTimeZone::Fixed(fixed) => {
            buf.push(ZONE_KIND_FIXED);
            write_svarint(buf, fixed.offset.total_seconds() as i64);
            write_string(buf, &fixed.id);
        }
        DateTimeZone::Precalculated(table) => {
            buf.push(ZONE_KIND_PRECALCULATED);
            write_varint(buf, table.intervals.len() as u64);
            let base = table.intervals.first().map(|iv| iv.start).unwrap_or(crate::instant::Instant::MIN);
            for iv in &table.intervals {
                write_zone_interval(buf, base, iv);
            }
            match &table.tail {
                Some(tail) => {
                    buf.push(1);
                    // The table's last interval doesn't carry its own `end`
                    // in this scheme (it's implied by the next interval's
                    // start); when a tail rule takes over, write the cutoff
                    // explicitly so the reader knows where the table ends.
                    let last_end = table.intervals.last().expect("non-empty").end;
                    let last_start = table.intervals.last().expect("non-empty").start;
                    write_svarint(buf, last_end.unix_ticks().saturating_sub(last_start.unix_ticks()));
                    write_zone(buf, &DateTimeZone::DaylightRule((**tail).clone()))?;
                }
                None => buf.push(0),
            }
        }
        DateTimeZone::DaylightRule(rule) => {
            buf.push(ZONE_KIND_DAYLIGHT_RULE);
            write_string(buf, &rule.id);
            write_svarint(buf, rule.standard_offset.total_seconds() as i64);
            write_recurrence(buf, &rule.standard_rule);
            write_recurrence(buf, &rule.daylight_rule);
        }
        DateTimeZone::Cached(cached) => {
            // The cache is a runtime memoization detail, not part of a
            // zone's persisted identity; serialize the wrapped zone instead.
            write_zone(buf, cached.inner())?;
        }
    }
    Ok(())
}

fn read_zone(bytes: &[u8], pos: &mut usize) -> Result<DateTimeZone, Error> {
    let kind = *bytes.get(*pos).ok_or(Error::MalformedTzdbStream("truncated zone blob"))?;
    *pos += 1;
    match kind {
        ZONE_KIND_FIXED => {
            let offset = Offset::from_seconds(read_svarint(bytes, pos)? as i32);
            let id = read_string(bytes, pos)?;
            Ok(DateTimeZone::Fixed(FixedZone::new(id, offset)))
        }
        ZONE_KIND_PRECALCULATED => {
            let count = read_varint(bytes, pos)? as usize;
            let mut intervals = Vec::with_capacity(count);
            let mut running_base = crate::instant::Instant::MIN;
            for _ in 0..count {
                // `end` is patched below once the next interval's start is known.
                let iv = read_zone_interval(bytes, pos, running_base, crate::instant::Instant::MAX)?;
                running_base = iv.start;
                intervals.push(iv);
            }
            for i in 0..intervals.len().saturating_sub(1) {
                intervals[i].end = intervals[i + 1].start;
            }
            let has_tail = *bytes.get(*pos).ok_or(Error::MalformedTzdbStream("truncated tail marker"))?;
            *pos += 1;
            let tail = if has_tail != 0 {
                let last_start = intervals.last().map(|iv| iv.start).unwrap_or(crate::instant::Instant::MIN);
                let delta = read_svarint(bytes, pos)?;
                if let Some(last) = intervals.last_mut() {
                    last.end = crate::instant::Instant::from_unix_ticks(last_start.unix_ticks().saturating_add(delta));
                }
                match read_zone(bytes, pos)? {
                    DateTimeZone::DaylightRule(rule) => Some(Box::new(rule)),
                    _ => return Err(Error::MalformedTzdbStream("tail is not a daylight-rule zone")),
                }
            } else {
                None
            };
            let id = intervals.first().map(|iv| iv.name.clone()).unwrap_or_default();
            Ok(DateTimeZone::Precalculated(PrecalculatedZone::new(id, intervals, tail)))
        }
        ZONE_KIND_DAYLIGHT_RULE => {
            let id = read_string(bytes, pos)?;
            let standard_offset = Offset::from_seconds(read_svarint(bytes, pos)? as i32);
            let standard_rule = read_recurrence(bytes, pos)?;
            let daylight_rule = read_recurrence(bytes, pos)?;
            Ok(DateTimeZone::DaylightRule(DaylightRuleZone::new(id, standard_offset, standard_rule, daylight_rule)))
        }
        _ => Err(Error::MalformedTzdbStream("unknown zone discriminator")),
    }
}

// --- container encode/decode ------------------------------------------------

/// Serializes `container` to the binary tzdb format.
pub fn write(container: &TzdbContainer) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    out.extend_from_slice(&MAGIC_VERSION.to_le_bytes());

    let mut field = |out: &mut Vec<u8>, tag: u8, payload: Vec<u8>| {
        out.push(tag);
        write_varint(out, payload.len() as u64);
        out.extend_from_slice(&payload);
    };

    if let Some(version) = &container.version {
        let mut payload = Vec::new();
        write_string(&mut payload, version);
        field(&mut out, TAG_TZDB_VERSION, payload);
    }

    let mut zone_ids: Vec<&String> = container.zones.keys().collect();
    zone_ids.sort();
    for id in zone_ids {
        let zone = &container.zones[id];
        let mut payload = Vec::new();
        write_string(&mut payload, id);
        write_zone(&mut payload, zone)?;
        field(&mut out, TAG_TIME_ZONE, payload);
    }

    if !container.id_map.is_empty() {
        let mut payload = Vec::new();
        write_varint(&mut payload, container.id_map.len() as u64);
        let mut entries: Vec<(&String, &String)> = container.id_map.iter().collect();
        entries.sort();
        for (alias, canonical) in entries {
            write_string(&mut payload, alias);
            write_string(&mut payload, canonical);
        }
        field(&mut out, TAG_TZDB_ID_MAP, payload);
    }

    if !container.cldr_windows_zones.is_empty() {
        let mut payload = Vec::new();
        write_varint(&mut payload, container.cldr_windows_zones.len() as u64);
        let mut entries: Vec<(&String, &String)> = container.cldr_windows_zones.iter().collect();
        entries.sort();
        for (windows_id, iana_id) in entries {
            write_string(&mut payload, windows_id);
            write_string(&mut payload, iana_id);
        }
        field(&mut out, TAG_CLDR_WINDOWS_ZONES, payload);
    }

    if !container.windows_standard_name_map.is_empty() {
        let mut payload = Vec::new();
        write_varint(&mut payload, container.windows_standard_name_map.len() as u64);
        let mut entries: Vec<(&String, &String)> = container.windows_standard_name_map.iter().collect();
        entries.sort();
        for (standard_name, canonical) in entries {
            write_string(&mut payload, standard_name);
            write_string(&mut payload, canonical);
        }
        field(&mut out, TAG_WINDOWS_STANDARD_NAME_MAP, payload);
    }

    if !container.geo_locations.is_empty() {
        let mut payload = Vec::new();
        write_varint(&mut payload, container.geo_locations.len() as u64);
        for geo in &container.geo_locations {
            payload.extend_from_slice(&geo.latitude.to_le_bytes());
            payload.extend_from_slice(&geo.longitude.to_le_bytes());
            write_string(&mut payload, &geo.zone_id);
            write_string(&mut payload, &geo.country_name);
            write_string(&mut payload, &geo.country_code);
            write_string(&mut payload, &geo.comment);
        }
        field(&mut out, TAG_GEO_LOCATIONS, payload);
    }

    Ok(out)
}

/// Parses a binary tzdb container, ignoring any tag it doesn't recognize
/// (spec.md: "Readers MUST ignore unknown tags and advance by their
/// declared length" — forward compatibility with future writers).
pub fn read(bytes: &[u8]) -> Result<TzdbContainer, Error> {
    if bytes.len() < 4 {
        return Err(Error::MalformedTzdbStream("stream shorter than the magic-version header"));
    }
    let magic = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
    if magic != MAGIC_VERSION {
        return Err(Error::MalformedTzdbStream("unrecognized magic-version header"));
    }

    let mut container = TzdbContainer::default();
    let mut pos = 4usize;
    while pos < bytes.len() {
        let tag = bytes[pos];
        pos += 1;
        let len = read_varint(bytes, &mut pos)? as usize;
        let end = pos.checked_add(len).ok_or(Error::MalformedTzdbStream("field length overflow"))?;
        let payload = bytes.get(pos..end).ok_or(Error::MalformedTzdbStream("truncated field"))?;
        pos = end;

        let mut p = 0usize;
        match tag {
            TAG_TZDB_VERSION => {
                container.version = Some(read_string(payload, &mut p)?);
            }
            TAG_TIME_ZONE => {
                let id = read_string(payload, &mut p)?;
                let zone = read_zone(payload, &mut p)?;
                container.zones.insert(id, zone);
            }
            TAG_TZDB_ID_MAP => {
                let count = read_varint(payload, &mut p)? as usize;
                for _ in 0..count {
                    let alias = read_string(payload, &mut p)?;
                    let canonical = read_string(payload, &mut p)?;
                    container.id_map.insert(alias, canonical);
                }
            }
            TAG_CLDR_WINDOWS_ZONES => {
                let count = read_varint(payload, &mut p)? as usize;
                for _ in 0..count {
                    let windows_id = read_string(payload, &mut p)?;
                    let iana_id = read_string(payload, &mut p)?;
                    container.cldr_windows_zones.insert(windows_id, iana_id);
                }
            }
            TAG_WINDOWS_STANDARD_NAME_MAP => {
                let count = read_varint(payload, &mut p)? as usize;
                for _ in 0..count {
                    let standard_name = read_string(payload, &mut p)?;
                    let canonical = read_string(payload, &mut p)?;
                    container.windows_standard_name_map.insert(standard_name, canonical);
                }
            }
            TAG_GEO_LOCATIONS => {
                let count = read_varint(payload, &mut p)? as usize;
                for _ in 0..count {
                    let lat_bytes = payload
                        .get(p..p + 8)
                        .ok_or(Error::MalformedTzdbStream("truncated geo location"))?;
                    let latitude = f64::from_le_bytes(lat_bytes.try_into().unwrap());
                    p += 8;
                    let lon_bytes = payload
                        .get(p..p + 8)
                        .ok_or(Error::MalformedTzdbStream("truncated geo location"))?;
                    let longitude = f64::from_le_bytes(lon_bytes.try_into().unwrap());
                    p += 8;
                    let zone_id = read_string(payload, &mut p)?;
                    let country_name = read_string(payload, &mut p)?;
                    let country_code = read_string(payload, &mut p)?;
                    let comment = read_string(payload, &mut p)?;
                    container.geo_locations.push(GeoLocation { latitude, longitude, zone_id, country_name, country_code, comment });
                }
            }
            _ => {
                // Unknown tag: already skipped by advancing `pos` past its
                // declared length above.
            }
        }
    }
    Ok(container)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_zone_roundtrip() {
        let mut container = TzdbContainer::default();
        container.version = Some("2024a-civil".to_string());
        container.zones.insert("UTC".to_string(), DateTimeZone::utc());
        container.zones.insert("FIVE_THIRTY".to_string(), DateTimeZone::for_offset(Offset::from_hours_minutes(5, 30)));
        container.id_map.insert("Etc/UTC".to_string(), "UTC".to_string());

        let bytes = write(&container).unwrap();
        let decoded = read(&bytes).unwrap();
        assert_eq!(decoded, container);
    }

    #[test]
    fn unknown_tag_is_skipped() {
        let mut container = TzdbContainer::default();
        container.zones.insert("UTC".to_string(), DateTimeZone::utc());
        let mut bytes = write(&container).unwrap();
        // Append a field with a tag this reader doesn't recognize.
        bytes.push(200);
        write_varint(&mut bytes, 3);
        bytes.extend_from_slice(&[1, 2, 3]);
        let decoded = read(&bytes).unwrap();
        assert_eq!(decoded.zones.len(), 1);
    }

    #[test]
    fn rejects_bad_magic() {
        assert!(read(&[0, 0, 0, 0]).is_err());
    }

    #[test]
    fn geo_locations_roundtrip() {
        let mut container = TzdbContainer::default();
        container.geo_locations.push(GeoLocation {
            latitude: 51.5074,
            longitude: -0.1278,
            zone_id: "Europe/London".to_string(),
            country_name: "United Kingdom".to_string(),
            country_code: "GB".to_string(),
            comment: String::new(),
        });

        let bytes = write(&container).unwrap();
        let decoded = read(&bytes).unwrap();
        assert_eq!(decoded, container);
    }

    #[test]
    fn truncated_geo_location_is_malformed_not_a_panic() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAGIC_VERSION.to_le_bytes());

        let mut payload = Vec::new();
        write_varint(&mut payload, 1); // declares one entry
        payload.extend_from_slice(&[0, 0, 0, 0]); // but supplies only 4 of 8 latitude bytes

        bytes.push(TAG_GEO_LOCATIONS);
        write_varint(&mut bytes, payload.len() as u64);
        bytes.extend_from_slice(&payload);

        assert!(matches!(read(&bytes), Err(Error::MalformedTzdbStream(_))));
    }
}
