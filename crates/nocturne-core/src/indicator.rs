//! Status indicator seam and banner copy.
//!
//! The indicator is pure projection: given a tally or a clear signal it
//! updates whatever visual the host renders per participant. Showing a
//! banner replaces any banner that participant already sees; clearing
//! one that does not exist is a safe no-op.

use std::collections::BTreeMap;

use nocturne_types::{AggregateStatus, ParticipantId};

/// Per-participant status display.
pub trait StatusIndicator {
    /// Show (or replace) the participant's status banner.
    fn show(&mut self, id: ParticipantId, status: AggregateStatus);

    /// Remove the participant's status banner, if any. Idempotent.
    fn clear(&mut self, id: ParticipantId);
}

/// Render the banner line for a partial tally.
pub fn banner_text(status: AggregateStatus) -> String {
    format!(
        "{}/{} resting - night will skip when everyone is ready.",
        status.waiting, status.total
    )
}

/// In-memory indicator recording what each participant currently sees.
///
/// Used by tests to observe projector behavior without a renderer.
#[derive(Debug, Clone, Default)]
pub struct MemoryIndicator {
    /// Banner currently visible to each participant.
    visible: BTreeMap<ParticipantId, AggregateStatus>,
}

impl MemoryIndicator {
    /// Create an indicator with no visible banners.
    pub const fn new() -> Self {
        Self {
            visible: BTreeMap::new(),
        }
    }

    /// The banner the participant currently sees, if any.
    pub fn visible(&self, id: ParticipantId) -> Option<AggregateStatus> {
        self.visible.get(&id).copied()
    }

    /// Number of participants currently seeing a banner.
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }
}

impl StatusIndicator for MemoryIndicator {
    fn show(&mut self, id: ParticipantId, status: AggregateStatus) {
        // Replaces any existing banner for this participant.
        self.visible.insert(id, status);
    }

    fn clear(&mut self, id: ParticipantId) {
        self.visible.remove(&id);
    }
}
