//! Stable widget identity.
//!
//! A `SourceId` names a widget across frames: scroll containers, buttons,
//! and hit targets all register under one. IDs are either allocated from a
//! process-wide counter (transient widgets) or derived from a name
//! (widgets that must keep the same ID every frame).

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

static SOURCE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a widget or hit target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(pub u64);

impl SourceId {
    /// Create a new unique source ID.
    ///
    /// Each call returns a different ID.
    pub fn new() -> Self {
        Self(SOURCE_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Create a stable source ID from a name.
    ///
    /// Deterministic: same name always produces the same ID.
    /// Uses the high bit to avoid collision with the atomic counter.
    pub fn named(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self(hasher.finish() | (1 << 63))
    }

    /// Create a source ID from an existing value.
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw numeric value.
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for SourceId {
    fn default() -> Self {
        Self::new()
    }
}
