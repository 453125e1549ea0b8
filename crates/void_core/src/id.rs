//! Typed identifiers and the project-scoped ID counter
//!
//! Every asset, scene and instance in a project draws its ID from one
//! monotonic counter. IDs are persisted verbatim, so an `Id<T>` is just a
//! tagged `u64` with no generation bits.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

/// Largest raw value a persisted ID may take. The counter must always be
/// able to move past every ID in use.
pub const MAX_RAW_ID: u64 = u64::MAX - 1;

/// A type-safe identifier for an entity of type T
#[repr(transparent)]
pub struct Id<T> {
    raw: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Create an ID from its raw persisted value
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    /// Get the raw value written to disk
    #[inline]
    pub const fn raw(&self) -> u64 {
        self.raw
    }
}

// Manual trait implementations to avoid T bounds
impl<T> Clone for Id<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = core::any::type_name::<T>();
        let short = name.rsplit("::").next().unwrap_or(name);
        write!(f, "Id<{}>({})", short, self.raw)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Monotonic ID source scoped to one project
///
/// The counter value is persisted as the project's next-available ID, so a
/// reloaded project keeps handing out fresh numbers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdCounter {
    next: u64,
}

impl IdCounter {
    /// Create a counter starting at zero
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Resume a counter from a persisted next-available value
    pub const fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// Allocate the next ID
    pub fn next<T>(&mut self) -> Id<T> {
        Id::new(self.next_raw())
    }

    /// Allocate the next raw value. The counter saturates at `u64::MAX`.
    pub fn next_raw(&mut self) -> u64 {
        let raw = self.next;
        self.next = self.next.saturating_add(1);
        raw
    }

    /// The value the next allocation will return
    #[inline]
    pub const fn peek(&self) -> u64 {
        self.next
    }

    /// Make sure `raw` can never be handed out again.
    ///
    /// Returns `true` if the counter had to move. `u64::MAX` cannot be
    /// reserved past; the counter stops there.
    pub fn reserve_past(&mut self, raw: u64) -> bool {
        if raw >= self.next {
            self.next = raw.saturating_add(1);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Model;
    struct Terrain;

    #[test]
    fn test_id_roundtrip_raw() {
        let id: Id<Model> = Id::new(42);
        assert_eq!(id.raw(), 42);
    }

    #[test]
    fn test_id_debug_uses_short_type_name() {
        let id: Id<Model> = Id::new(7);
        assert_eq!(format!("{:?}", id), "Id<Model>(7)");
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn test_counter_is_monotonic() {
        let mut counter = IdCounter::new();
        let a: Id<Model> = counter.next();
        let b: Id<Terrain> = counter.next();
        assert_eq!(a.raw(), 0);
        assert_eq!(b.raw(), 1);
        assert_eq!(counter.peek(), 2);
    }

    #[test]
    fn test_reserve_past() {
        let mut counter = IdCounter::starting_at(3);
        assert!(!counter.reserve_past(1));
        assert_eq!(counter.peek(), 3);
        assert!(counter.reserve_past(3));
        assert_eq!(counter.peek(), 4);
        assert!(counter.reserve_past(10));
        assert_eq!(counter.next_raw(), 11);
    }

    #[test]
    fn test_counter_saturates_at_max() {
        let mut counter = IdCounter::starting_at(u64::MAX - 1);
        assert_eq!(counter.next_raw(), u64::MAX - 1);
        assert_eq!(counter.next_raw(), u64::MAX);
        assert_eq!(counter.peek(), u64::MAX);

        let mut counter = IdCounter::new();
        assert!(counter.reserve_past(u64::MAX));
        assert_eq!(counter.peek(), u64::MAX);
        assert!(!counter.reserve_past(u64::MAX));
    }
}
