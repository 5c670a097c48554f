//! Aggregate readiness status derived from the live population.
//!
//! [`AggregateStatus`] is a point-in-time tally, never a stored value:
//! every consumer recomputes it from a fresh population snapshot, so it
//! is always consistent with the snapshot it was derived from.

use serde::{Deserialize, Serialize};

/// Tally of resting participants against the connected population.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AggregateStatus {
    /// Number of connected participants currently resting.
    pub waiting: u32,

    /// Number of connected participants in total.
    pub total: u32,
}

impl AggregateStatus {
    /// Create a status from explicit counts.
    pub const fn new(waiting: u32, total: u32) -> Self {
        Self { waiting, total }
    }

    /// Tally a snapshot of per-participant waiting flags.
    ///
    /// Each item is one connected participant's waiting flag. Counts
    /// saturate at `u32::MAX`.
    pub fn tally<I>(flags: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut waiting: u32 = 0;
        let mut total: u32 = 0;
        for is_waiting in flags {
            total = total.saturating_add(1);
            if is_waiting {
                waiting = waiting.saturating_add(1);
            }
        }
        Self { waiting, total }
    }

    /// True when the snapshot contained no connected participants.
    pub const fn is_empty(self) -> bool {
        self.total == 0
    }

    /// True when nobody in the snapshot is resting.
    pub const fn none_waiting(self) -> bool {
        self.waiting == 0
    }

    /// True when every connected participant is resting.
    ///
    /// An empty population never satisfies the condition.
    pub const fn all_waiting(self) -> bool {
        self.total > 0 && self.waiting == self.total
    }

    /// True when some, but not all, connected participants are resting.
    ///
    /// This is the only state the status banner renders.
    pub const fn is_partial(self) -> bool {
        self.waiting > 0 && self.waiting < self.total
    }
}
