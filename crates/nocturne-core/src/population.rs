//! Population seam: who is connected and who is resting.
//!
//! The population is owned by the host environment; the coordinator only
//! reads connection state and flips the per-participant resting flag
//! through this trait. [`Roster`] is the in-memory implementation used
//! by the bundled engine and by tests.

use std::collections::BTreeMap;

use nocturne_types::ParticipantId;
use tracing::debug;

/// The dynamic set of session participants.
///
/// Implementations own participant lifecycle entirely; the coordinator
/// never creates or destroys participants. `set_waiting` carries an
/// implied notify-peers side effect: whenever the flag changes, the
/// implementation must sync the new state to every connected peer.
pub trait Population {
    /// Snapshot of currently connected participants (order irrelevant).
    fn connected(&self) -> Vec<ParticipantId>;

    /// True when the participant exists and is connected.
    fn is_connected(&self, id: ParticipantId) -> bool;

    /// True when the participant is currently resting.
    ///
    /// Unknown participants are reported as not resting.
    fn is_waiting(&self, id: ParticipantId) -> bool;

    /// Set the participant's resting flag and sync it to peers.
    ///
    /// Unknown participants are ignored.
    fn set_waiting(&mut self, id: ParticipantId, waiting: bool);
}

/// Per-participant state tracked by [`Roster`].
#[derive(Debug, Clone, Default)]
struct RosterEntry {
    /// Whether the participant is currently connected.
    connected: bool,

    /// Whether the participant is currently resting.
    waiting: bool,

    /// Number of peer syncs triggered by `set_waiting`.
    syncs: u64,
}

/// In-memory population registry.
///
/// Participants join connected and not resting. Leaving marks the entry
/// disconnected and drops the resting flag (a disconnected participant
/// no longer takes part in the vote); the entry itself is retained so a
/// later [`rejoin`] keeps the same identity.
///
/// [`rejoin`]: Roster::rejoin
#[derive(Debug, Default)]
pub struct Roster {
    /// All participants ever seen, keyed by identity.
    entries: BTreeMap<ParticipantId, RosterEntry>,
}

impl Roster {
    /// Create an empty roster.
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add a new participant, connected and not resting.
    pub fn join(&mut self) -> ParticipantId {
        let id = ParticipantId::new();
        self.entries.insert(
            id,
            RosterEntry {
                connected: true,
                ..RosterEntry::default()
            },
        );
        debug!(%id, "participant joined");
        id
    }

    /// Reconnect a previously seen participant.
    ///
    /// Returns false (and does nothing) for unknown ids. The participant
    /// comes back not resting.
    pub fn rejoin(&mut self, id: ParticipantId) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.connected = true;
                entry.waiting = false;
                debug!(%id, "participant rejoined");
                true
            }
            None => false,
        }
    }

    /// Disconnect a participant.
    ///
    /// The resting flag is dropped: disconnected participants do not
    /// count toward the all-resting condition.
    pub fn leave(&mut self, id: ParticipantId) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.connected = false;
            entry.waiting = false;
            debug!(%id, "participant left");
        }
    }

    /// Number of peer syncs `set_waiting` has triggered for this
    /// participant. Zero for unknown ids.
    pub fn sync_count(&self, id: ParticipantId) -> u64 {
        self.entries.get(&id).map_or(0, |entry| entry.syncs)
    }
}

impl Population for Roster {
    fn connected(&self) -> Vec<ParticipantId> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.connected)
            .map(|(&id, _)| id)
            .collect()
    }

    fn is_connected(&self, id: ParticipantId) -> bool {
        self.entries.get(&id).is_some_and(|entry| entry.connected)
    }

    fn is_waiting(&self, id: ParticipantId) -> bool {
        self.entries.get(&id).is_some_and(|entry| entry.waiting)
    }

    fn set_waiting(&mut self, id: ParticipantId, waiting: bool) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.waiting = waiting;
            entry.syncs = entry.syncs.saturating_add(1);
            debug!(%id, waiting, "participant state synced to peers");
        } else {
            debug!(%id, "set_waiting on unknown participant ignored");
        }
    }
}
