// This is a part of civil_time.
// See README.md and LICENSE.txt for details.

/*!
 * Wraps another zone with a small interior-mutable cache of recently-queried
 * intervals, to amortize recurrence-projection cost (spec.md §4.4's `Cached`
 * variant — the one place this design departs from pure immutability).
 */

use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;

use crate::instant::Instant;

use super::DateTimeZone;
use super::ZoneInterval;

const DEFAULT_CAPACITY: usize = 32;

pub struct CachedZone {
    id: String,
    inner: Box<DateTimeZone>,
    capacity: usize,
    entries: Mutex<VecDeque<ZoneInterval>>,
}

impl CachedZone {
    pub fn new(inner: DateTimeZone) -> CachedZone {
        CachedZone::with_capacity(inner, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(inner: DateTimeZone, capacity: usize) -> CachedZone {
        let id = inner.id().to_string();
        CachedZone { id, inner: Box::new(inner), capacity, entries: Mutex::new(VecDeque::new()) }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn inner(&self) -> &DateTimeZone {
        &self.inner
    }

    /// Looks the interval up in the cache first (most-recently-used at the
    /// front), falling back to `inner` and remembering the result.
    pub fn get_zone_interval(&self, instant: Instant) -> ZoneInterval {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        if let Some(pos) = entries.iter().position(|iv| iv.contains(instant)) {
            let hit = entries.remove(pos).unwrap();
            entries.push_front(hit.clone());
            return hit;
        }
        drop(entries);

        let fresh = self.inner.get_zone_interval(instant);
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.push_front(fresh.clone());
        if entries.len() > self.capacity {
            entries.pop_back();
        }
        fresh
    }
}

impl Clone for CachedZone {
    /// Clones the wrapped zone with an empty cache; cached entries are a
    /// pure memoization detail, not part of the zone's logical value.
    fn clone(&self) -> CachedZone {
        CachedZone {
            id: self.id.clone(),
            inner: self.inner.clone(),
            capacity: self.capacity,
            entries: Mutex::new(VecDeque::new()),
        }
    }
}

impl PartialEq for CachedZone {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.inner == other.inner
    }
}

impl fmt::Debug for CachedZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedZone").field("id", &self.id).field("inner", &self.inner).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offset::Offset;

    #[test]
    fn caches_repeated_lookups() {
        let cached = CachedZone::new(DateTimeZone::for_offset(Offset::from_hours(5)));
        let a = cached.get_zone_interval(Instant::from_unix_seconds(0));
        let b = cached.get_zone_interval(Instant::from_unix_seconds(0));
        assert_eq!(a, b);
    }
}
