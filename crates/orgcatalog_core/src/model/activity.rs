//! Activity taxonomy node.
//!
//! # Invariants
//! - The parent chain from any activity to its root has at most
//!   [`MAX_ACTIVITY_DEPTH`] nodes (a root sits at depth 1).
//! - Activities are immutable once created.

use serde::{Deserialize, Serialize};

/// Stable identifier for one activity.
pub type ActivityId = i64;

/// Maximum nesting depth of the activity taxonomy.
pub const MAX_ACTIVITY_DEPTH: u8 = 3;

/// One node of the bounded-depth activity forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    /// `None` for a root activity.
    pub parent_id: Option<ActivityId>,
}

impl Activity {
    /// Returns whether this activity has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
