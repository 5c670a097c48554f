//! Readiness coordinator: toggle, aggregate, and skip the night.
//!
//! A toggle request enters through [`request_toggle`], which mutates at
//! most one participant's resting flag, re-projects the aggregate
//! status, and -- when the vote becomes unanimous -- runs the night skip
//! in the same pass. The whole sequence runs to completion before the
//! next request is dispatched; there is exactly one logical actor, so no
//! locking happens here. A host that takes requests from a network layer
//! must funnel them through a single consumer to keep these semantics.

use nocturne_types::ParticipantId;
use tracing::{debug, info};

use crate::clock::{WorldClock, is_daytime};
use crate::config::SessionConfig;
use crate::indicator::StatusIndicator;
use crate::population::Population;
use crate::projector;
use crate::site::RestSiteQuery;

/// Borrowed view of everything a toggle request may touch.
///
/// The coordinator holds no state of its own; each request operates on
/// the collaborators the host passes in.
pub struct SessionContext<'a> {
    /// Immutable session configuration.
    pub config: &'a SessionConfig,

    /// The dynamic participant population.
    pub population: &'a mut dyn Population,

    /// Rest-site precondition oracle.
    pub rest_sites: &'a dyn RestSiteQuery,

    /// The shared world clock.
    pub clock: &'a mut dyn WorldClock,

    /// Per-participant status display.
    pub indicator: &'a mut dyn StatusIndicator,
}

/// Why a request to start resting was turned down.
///
/// Rejections are expected negative outcomes communicated back to the
/// requester, not errors; they never change any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The participant is not standing on a rest site.
    NoRestSite,

    /// It is still daytime; resting is only allowed at night.
    Daytime,
}

impl core::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoRestSite => {
                write!(f, "You must be standing on a bed or sleeping bag to turn in.")
            }
            Self::Daytime => write!(f, "You can only turn in at night."),
        }
    }
}

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The requester is unknown or disconnected; nothing happened.
    Ignored,

    /// The requester was resting and got back up.
    Woke,

    /// The request to start resting was turned down; nothing changed.
    Rejected(RejectReason),

    /// The requester is now resting.
    Waiting {
        /// True when this request completed the vote and the night was
        /// skipped in the same pass.
        advanced: bool,
    },
}

/// Handle a participant's request to toggle their resting state.
///
/// A resting participant always gets back up, regardless of time of day
/// or location. A participant lying down passes two gates in order --
/// rest site (when required by configuration), then time of day -- and
/// on success the aggregate is re-projected and the all-resting
/// condition evaluated, skipping the night if it holds.
pub fn request_toggle(ctx: &mut SessionContext<'_>, id: ParticipantId) -> ToggleOutcome {
    // Defensive guard, not a reportable error: commands from unknown or
    // disconnected participants vanish without a trace.
    if !ctx.population.is_connected(id) {
        debug!(%id, "toggle request from unknown or disconnected participant ignored");
        return ToggleOutcome::Ignored;
    }

    // Getting up is always allowed. No further checks.
    if ctx.population.is_waiting(id) {
        ctx.population.set_waiting(id, false);
        projector::broadcast_status(ctx.config, &*ctx.population, &mut *ctx.indicator);
        return ToggleOutcome::Woke;
    }

    if ctx.config.require_rest_site && !ctx.rest_sites.is_on_rest_site(id) {
        return ToggleOutcome::Rejected(RejectReason::NoRestSite);
    }

    let hour = ctx.clock.hour();
    if is_daytime(hour, ctx.config.day_start_hour, ctx.config.night_start_hour) {
        return ToggleOutcome::Rejected(RejectReason::Daytime);
    }

    ctx.population.set_waiting(id, true);
    projector::broadcast_status(ctx.config, &*ctx.population, &mut *ctx.indicator);

    // The projector has already cleared the display if the vote just
    // became unanimous; the skip must come after that, never before.
    if all_waiting(&*ctx.population) {
        skip_to_day(ctx);
        return ToggleOutcome::Waiting { advanced: true };
    }

    ToggleOutcome::Waiting { advanced: false }
}

/// True when the connected population is non-empty and everyone in it
/// is resting. An empty population never satisfies the condition.
pub fn all_waiting(population: &dyn Population) -> bool {
    let snapshot = population.connected();
    if snapshot.is_empty() {
        return false;
    }
    snapshot.iter().all(|&id| population.is_waiting(id))
}

/// Skip to morning: clear the display, set the clock, wake everyone.
///
/// The display clear comes strictly before the clock write. When
/// `autowake` is disabled the resting flags intentionally survive the
/// skip.
pub fn skip_to_day(ctx: &mut SessionContext<'_>) {
    projector::clear_all(&*ctx.population, &mut *ctx.indicator);

    ctx.clock.set_hour(ctx.config.day_start_hour);

    if !ctx.config.autowake {
        info!(
            hour = ctx.config.day_start_hour,
            "night skipped, autowake disabled, participants stay resting"
        );
        return;
    }

    let mut woken: u32 = 0;
    for id in ctx.population.connected() {
        if ctx.population.is_waiting(id) {
            ctx.population.set_waiting(id, false);
            woken = woken.saturating_add(1);
        }
    }
    info!(
        hour = ctx.config.day_start_hour,
        woken, "night skipped, everyone woken"
    );
}

/// Session teardown: remove all display state.
///
/// Touches neither the clock nor any resting flag.
pub fn shutdown(population: &dyn Population, indicator: &mut dyn StatusIndicator) {
    projector::clear_all(population, indicator);
}
