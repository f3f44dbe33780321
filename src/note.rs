//! Sticky note data structures.

use serde::{Deserialize, Serialize};

/// A free-form note on the sticky wall.
///
/// Pinned notes sort ahead of unpinned ones when the wall is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickyNote {
    pub id: u64,
    pub title: String,
    pub content: String,
    /// Hex color, e.g. "#FEF08A".
    pub color: String,
    #[serde(default)]
    pub pinned: bool,
    pub created_at_utc: i64,
    pub updated_at_utc: i64,
}

/// A partial update applied to an existing sticky note.
///
/// `None` fields are left untouched. Any applied patch bumps the note's
/// `updated_at_utc`.
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub color: Option<String>,
    pub pinned: Option<bool>,
}
