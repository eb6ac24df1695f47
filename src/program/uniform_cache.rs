use rustc_hash::FxHashMap;

use crate::backend::Location;

/// Equality on the bit patterns a write would upload.
///
/// Unlike `PartialEq`, a NaN payload equals itself, so a degenerate value
/// that repeats is still recognized as unchanged.
pub trait BitwiseEq {
    fn bitwise_eq(&self, other: &Self) -> bool;
}

impl BitwiseEq for bool {
    #[inline]
    fn bitwise_eq(&self, other: &Self) -> bool {
        self == other
    }
}

/// Last value written per location.
///
/// A write whose value is bitwise equal to the last one recorded for the
/// location is suppressed, so redundant GPU state changes never reach the
/// driver.
#[derive(Debug)]
pub struct LastWrittenCache<V> {
    last: FxHashMap<Location, V>,
}

impl<V> Default for LastWrittenCache<V> {
    fn default() -> Self {
        Self {
            last: FxHashMap::default(),
        }
    }
}

impl<V: BitwiseEq> LastWrittenCache<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls `issue` and records `value` unless it matches the last value
    /// written to `location`. Returns whether `issue` was called.
    pub fn write(&mut self, location: Location, value: V, issue: impl FnOnce(&V)) -> bool {
        if self.last.get(&location).is_some_and(|last| last.bitwise_eq(&value)) {
            return false;
        }
        issue(&value);
        self.last.insert(location, value);
        true
    }

    #[must_use]
    pub fn last_written(&self, location: Location) -> Option<&V> {
        self.last.get(&location)
    }

    /// Forgets every recorded value. The next write to each location is
    /// issued unconditionally.
    pub fn invalidate(&mut self) {
        self.last.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.last.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }
}
