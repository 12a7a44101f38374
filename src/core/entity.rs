//! Card instance identification.
//!
//! Every card copy in a deck gets its own `CardInstanceId`, allocated by a
//! `CardInstanceAllocator`. Templates share a string id (`"strike"`), instances
//! do not: two Strikes in the same deck are two different instances.
//!
//! ## Usage
//!
//! ```
//! use rust_deckbattler::core::CardInstanceAllocator;
//!
//! let mut alloc = CardInstanceAllocator::new();
//! let a = alloc.next_id();
//! let b = alloc.next_id();
//!
//! assert_ne!(a, b);
//! assert_eq!(b.raw(), a.raw() + 1);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
///
/// The zero value is reserved for cards built outside an allocator
/// (tests, ad-hoc templates). Allocated ids start at 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardInstanceId(pub u32);

impl CardInstanceId {
    /// Id used by cards that were never registered with an allocator.
    pub const UNASSIGNED: Self = Self(0);

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check whether this id came from an allocator.
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl From<u32> for CardInstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardInstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CardInstance({})", self.0)
    }
}

/// Monotonic allocator for card instance ids.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardInstanceAllocator {
    next: u32,
}

impl Default for CardInstanceAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl CardInstanceAllocator {
    /// Create a new allocator starting at id 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn next_id(&mut self) -> CardInstanceId {
        let id = CardInstanceId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next - 1
    }
}
