//! Status projector: derives the display-worthy summary and forwards it.
//!
//! Every call is a full recompute from a live population snapshot; no
//! state is kept between calls. The projector either shows the partial
//! tally to everyone or clears everything -- it never renders an empty,
//! complete, or disabled state.

use nocturne_types::AggregateStatus;
use tracing::debug;

use crate::config::SessionConfig;
use crate::indicator::StatusIndicator;
use crate::population::Population;

/// Recompute the aggregate tally and project it to every participant.
///
/// The banner is shown only for a partial tally (`0 < waiting < total`).
/// Every other case clears the display:
///
/// - banners disabled by configuration
/// - empty population
/// - nobody resting (nothing to announce)
/// - everyone resting (the skip is about to clear the display anyway;
///   never flash a 100% banner first)
pub fn broadcast_status(
    config: &SessionConfig,
    population: &dyn Population,
    indicator: &mut dyn StatusIndicator,
) {
    if !config.show_banner {
        clear_all(population, indicator);
        return;
    }

    let snapshot = population.connected();
    if snapshot.is_empty() {
        clear_all(population, indicator);
        return;
    }

    let status = AggregateStatus::tally(snapshot.iter().map(|&id| population.is_waiting(id)));

    if status.none_waiting() || status.all_waiting() {
        clear_all(population, indicator);
        return;
    }

    debug!(
        waiting = status.waiting,
        total = status.total,
        "projecting rest tally"
    );
    for &id in &snapshot {
        indicator.show(id, status);
    }
}

/// Clear the status banner for every connected participant.
///
/// Safe to call when no banner exists; clearing is idempotent.
pub fn clear_all(population: &dyn Population, indicator: &mut dyn StatusIndicator) {
    for id in population.connected() {
        indicator.clear(id);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nocturne_types::ParticipantId;

    use super::*;
    use crate::indicator::MemoryIndicator;
    use crate::population::Roster;

    fn roster_of(waiting_flags: &[bool]) -> (Roster, Vec<ParticipantId>) {
        let mut roster = Roster::new();
        let mut ids = Vec::new();
        for &waiting in waiting_flags {
            let id = roster.join();
            if waiting {
                roster.set_waiting(id, true);
            }
            ids.push(id);
        }
        (roster, ids)
    }

    #[test]
    fn partial_tally_is_shown_to_everyone() {
        let (roster, ids) = roster_of(&[true, false, false]);
        let mut indicator = MemoryIndicator::new();

        broadcast_status(&SessionConfig::default(), &roster, &mut indicator);

        for &id in &ids {
            assert_eq!(
                indicator.visible(id),
                Some(AggregateStatus::new(1, 3))
            );
        }
    }

    #[test]
    fn nobody_resting_clears_the_display() {
        let (roster, ids) = roster_of(&[false, false]);
        let mut indicator = MemoryIndicator::new();
        let first = ids.first().copied().unwrap();
        indicator.show(first, AggregateStatus::new(1, 2));

        broadcast_status(&SessionConfig::default(), &roster, &mut indicator);
        assert_eq!(indicator.visible_count(), 0);
    }

    #[test]
    fn everyone_resting_clears_instead_of_flashing_full_banner() {
        let (roster, _ids) = roster_of(&[true, true]);
        let mut indicator = MemoryIndicator::new();

        broadcast_status(&SessionConfig::default(), &roster, &mut indicator);
        assert_eq!(indicator.visible_count(), 0);
    }

    #[test]
    fn disabled_banner_clears_existing_display() {
        let (roster, ids) = roster_of(&[true, false]);
        let mut indicator = MemoryIndicator::new();
        let last = ids.last().copied().unwrap();
        indicator.show(last, AggregateStatus::new(1, 2));

        let config = SessionConfig {
            show_banner: false,
            ..SessionConfig::default()
        };
        broadcast_status(&config, &roster, &mut indicator);
        assert_eq!(indicator.visible_count(), 0);
    }

    #[test]
    fn empty_population_is_a_clean_no_show() {
        let roster = Roster::new();
        let mut indicator = MemoryIndicator::new();

        broadcast_status(&SessionConfig::default(), &roster, &mut indicator);
        assert_eq!(indicator.visible_count(), 0);
    }

    #[test]
    fn clear_all_twice_matches_clear_all_once() {
        let (roster, ids) = roster_of(&[true, false]);
        let mut indicator = MemoryIndicator::new();
        broadcast_status(&SessionConfig::default(), &roster, &mut indicator);
        assert_eq!(indicator.visible_count(), 2);

        clear_all(&roster, &mut indicator);
        let after_once: Vec<_> = ids.iter().map(|&id| indicator.visible(id)).collect();

        clear_all(&roster, &mut indicator);
        let after_twice: Vec<_> = ids.iter().map(|&id| indicator.visible(id)).collect();

        assert_eq!(after_once, after_twice);
        assert_eq!(indicator.visible_count(), 0);
    }
}
