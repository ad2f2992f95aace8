//! Player identity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named player. Wallets, progression, and stats all key off the id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub id: Uuid,
    pub name: String,
    pub created_at_ms: i64,
    pub last_active_at_ms: i64,
}

impl PlayerProfile {
    /// Create a profile with a random id, active as of `now_ms`.
    #[must_use]
    pub fn new(name: impl Into<String>, now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at_ms: now_ms,
            last_active_at_ms: now_ms,
        }
    }

    /// Mark the profile active.
    pub fn touch(&mut self, now_ms: i64) {
        self.last_active_at_ms = now_ms;
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}
