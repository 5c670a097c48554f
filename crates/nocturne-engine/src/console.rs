//! Console rendering of the per-participant status banner.
//!
//! Pure projection: the coordinator decides what to show, this type only
//! prints it. Each participant's banner is one line, labeled with the
//! name the session registered for them.

use std::collections::{BTreeMap, BTreeSet};

use nocturne_core::indicator::{StatusIndicator, banner_text};
use nocturne_types::{AggregateStatus, ParticipantId};

/// Indicator that prints banner updates to stdout.
#[derive(Debug, Default)]
pub struct ConsoleIndicator {
    /// Display names registered at join time.
    labels: BTreeMap<ParticipantId, String>,

    /// Participants whose banner is currently visible, so clears of a
    /// banner that was never shown stay quiet.
    shown: BTreeSet<ParticipantId>,
}

impl ConsoleIndicator {
    /// Create an indicator with no banners and no labels.
    pub const fn new() -> Self {
        Self {
            labels: BTreeMap::new(),
            shown: BTreeSet::new(),
        }
    }

    /// Register the display name for a participant.
    pub fn register(&mut self, id: ParticipantId, name: &str) {
        self.labels.insert(id, name.to_owned());
    }

    /// Display label for a participant: the registered name, or the raw
    /// id for participants that never registered one.
    fn label(&self, id: ParticipantId) -> String {
        self.labels
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }
}

impl StatusIndicator for ConsoleIndicator {
    fn show(&mut self, id: ParticipantId, status: AggregateStatus) {
        println!("  [banner -> {}] {}", self.label(id), banner_text(status));
        self.shown.insert(id);
    }

    fn clear(&mut self, id: ParticipantId) {
        if self.shown.remove(&id) {
            println!("  [banner -> {}] cleared", self.label(id));
        }
    }
}
