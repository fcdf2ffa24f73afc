//! Clock identity.
//!
//! Clock identities are opaque tokens generated at creation and stable for
//! the clock's lifetime. They use UUID v7 so that creation order is also
//! the natural sort order.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Unique identifier for a clock on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ClockId(pub Uuid);

impl ClockId {
    /// A fresh time-ordered identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// The wrapped [`Uuid`].
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ClockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for ClockId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}
