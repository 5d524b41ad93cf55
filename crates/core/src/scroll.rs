//! Per-path scroll position memory.
//!
//! The offset is recorded for a path every time the shopper leaves it. Coming
//! back through history restores it; any fresh navigation starts at the top.
//! Whether a navigation is history traversal is decided by the router, not
//! here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// How a route was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationKind {
    /// A new history entry (link click).
    #[default]
    Push,
    /// The current history entry was replaced.
    Replace,
    /// Back/forward through history.
    Pop,
}

/// A scroll offset that cannot be recorded.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum OffsetError {
    #[error("scroll offset cannot be negative: {0}")]
    Negative(f64),

    #[error("scroll offset must be finite")]
    NotFinite,
}

/// Vertical scroll offsets in CSS pixels, keyed by route path.
///
/// Offsets are kept as reported, fractions included (zoomed and HiDPI pages
/// scroll by sub-pixel amounts). Entries are overwritten but never removed;
/// the number of routes is small and fixed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScrollMemory {
    offsets: HashMap<String, f64>,
}

impl ScrollMemory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the offset of a path being left.
    ///
    /// # Errors
    ///
    /// Returns an [`OffsetError`] for negative or non-finite offsets; nothing
    /// is recorded in that case.
    pub fn leave(&mut self, path: &str, offset: f64) -> Result<(), OffsetError> {
        if !offset.is_finite() {
            return Err(OffsetError::NotFinite);
        }
        if offset < 0.0 {
            return Err(OffsetError::Negative(offset));
        }
        self.offsets.insert(path.to_owned(), offset);
        Ok(())
    }

    /// The offset to scroll to when entering `path`.
    #[must_use]
    pub fn enter(&self, path: &str, kind: NavigationKind) -> f64 {
        match kind {
            NavigationKind::Pop => self.recorded(path).unwrap_or(0.0),
            NavigationKind::Push | NavigationKind::Replace => 0.0,
        }
    }

    /// The last offset recorded for `path`.
    #[must_use]
    pub fn recorded(&self, path: &str) -> Option<f64> {
        self.offsets.get(path).copied()
    }
}
