//! Type-safe identifier for session participants.
//!
//! Participants are owned by the host environment; the coordinator only
//! ever refers to them by this stable identity. The wrapper keeps
//! participant ids from being confused with any other [`Uuid`] the host
//! may hand around. UUID v7 (time-ordered) keeps join order roughly
//! recoverable from the id itself.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant in the shared session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub Uuid);

impl ParticipantId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ParticipantId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<ParticipantId> for Uuid {
    fn from(id: ParticipantId) -> Self {
        id.0
    }
}
