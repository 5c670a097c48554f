//! Rest-site precondition seam.
//!
//! The host environment decides whether a participant is standing on a
//! qualifying rest site (a bed or sleeping bag). In the original world
//! this is a physics raycast under the participant's feet; at this
//! boundary it collapses to a single boolean capability check, so the
//! coordinator carries no geometry or type-case logic of its own.

use std::collections::BTreeSet;

use nocturne_types::ParticipantId;

/// Answers whether a participant currently stands on a rest site.
pub trait RestSiteQuery {
    /// True when the participant is on a bed or sleeping bag.
    fn is_on_rest_site(&self, id: ParticipantId) -> bool;
}

/// Fixed-answer rest-site query for tests and the bundled engine.
///
/// Participants are simply placed on or off a site; there is no
/// geometry behind it.
#[derive(Debug, Clone, Default)]
pub struct FixedRestSites {
    /// Participants currently standing on a rest site.
    on_site: BTreeSet<ParticipantId>,
}

impl FixedRestSites {
    /// Create a query with nobody on a rest site.
    pub const fn new() -> Self {
        Self {
            on_site: BTreeSet::new(),
        }
    }

    /// Put the participant on a rest site.
    pub fn place(&mut self, id: ParticipantId) {
        self.on_site.insert(id);
    }

    /// Take the participant off their rest site.
    pub fn vacate(&mut self, id: ParticipantId) {
        self.on_site.remove(&id);
    }

    /// Toggle the participant's rest-site occupancy; returns the new state.
    pub fn toggle(&mut self, id: ParticipantId) -> bool {
        if self.on_site.remove(&id) {
            false
        } else {
            self.on_site.insert(id);
            true
        }
    }
}

impl RestSiteQuery for FixedRestSites {
    fn is_on_rest_site(&self, id: ParticipantId) -> bool {
        self.on_site.contains(&id)
    }
}
