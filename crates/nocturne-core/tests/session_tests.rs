//! Integration tests for a full night-skip session.
//!
//! These drive the coordinator through the public crate surface only,
//! with the bundled in-memory collaborators standing in for the host
//! environment: configuration bootstrapped from a real file, a roster
//! of participants, fixed rest sites, and a recording indicator.

#![allow(clippy::unwrap_used)]

use nocturne_core::clock::{LocalClock, WorldClock as _};
use nocturne_core::config::SessionConfig;
use nocturne_core::coordinator::{self, RejectReason, SessionContext, ToggleOutcome};
use nocturne_core::indicator::MemoryIndicator;
use nocturne_core::population::{Population as _, Roster};
use nocturne_core::site::FixedRestSites;
use nocturne_types::AggregateStatus;

/// Collaborator bundle plus a toggle shorthand.
struct Session {
    config: SessionConfig,
    roster: Roster,
    sites: FixedRestSites,
    clock: LocalClock,
    indicator: MemoryIndicator,
}

impl Session {
    fn new(config: SessionConfig) -> Self {
        let clock = LocalClock::new(config.night_start_hour).unwrap();
        Self {
            config,
            roster: Roster::new(),
            sites: FixedRestSites::new(),
            clock,
            indicator: MemoryIndicator::new(),
        }
    }

    fn toggle(&mut self, id: nocturne_types::ParticipantId) -> ToggleOutcome {
        let mut ctx = SessionContext {
            config: &self.config,
            population: &mut self.roster,
            rest_sites: &self.sites,
            clock: &mut self.clock,
            indicator: &mut self.indicator,
        };
        coordinator::request_toggle(&mut ctx, id)
    }

    fn assert_hour(&self, expected: f64) {
        assert!(
            (self.clock.hour() - expected).abs() < f64::EPSILON,
            "expected hour {expected}, got {}",
            self.clock.hour()
        );
    }
}

#[test]
fn full_night_cycle_with_rest_sites() {
    let mut session = Session::new(SessionConfig::default());
    let ada = session.roster.join();
    let ben = session.roster.join();
    let cyd = session.roster.join();

    // Nobody is on a rest site yet: the precondition gate holds.
    assert_eq!(
        session.toggle(ada),
        ToggleOutcome::Rejected(RejectReason::NoRestSite)
    );

    // Ada and Ben find beds and turn in; the tally is partial, so the
    // banner is projected to all three participants.
    session.sites.place(ada);
    session.sites.place(ben);
    assert_eq!(session.toggle(ada), ToggleOutcome::Waiting { advanced: false });
    assert_eq!(session.toggle(ben), ToggleOutcome::Waiting { advanced: false });
    for id in [ada, ben, cyd] {
        assert_eq!(
            session.indicator.visible(id),
            Some(AggregateStatus::new(2, 3))
        );
    }

    // Ben changes his mind; the banner drops back to 1/3.
    assert_eq!(session.toggle(ben), ToggleOutcome::Woke);
    assert_eq!(
        session.indicator.visible(cyd),
        Some(AggregateStatus::new(1, 3))
    );

    // Ben and Cyd complete the vote: morning comes, everyone is up,
    // and no banner survives the skip.
    session.sites.place(cyd);
    assert_eq!(session.toggle(ben), ToggleOutcome::Waiting { advanced: false });
    assert_eq!(session.toggle(cyd), ToggleOutcome::Waiting { advanced: true });
    session.assert_hour(8.0);
    for id in [ada, ben, cyd] {
        assert!(!session.roster.is_waiting(id));
        assert_eq!(session.indicator.visible(id), None);
    }

    // It is morning now, so lying down again is refused.
    assert_eq!(
        session.toggle(ada),
        ToggleOutcome::Rejected(RejectReason::Daytime)
    );
}

#[test]
fn disconnect_does_not_complete_the_vote() {
    let config = SessionConfig {
        require_rest_site: false,
        ..SessionConfig::default()
    };
    let mut session = Session::new(config);
    let ada = session.roster.join();
    let ben = session.roster.join();

    assert_eq!(session.toggle(ada), ToggleOutcome::Waiting { advanced: false });

    // Ben leaves; the aggregate is only re-evaluated on toggle events,
    // so the night does not skip just because Ada is now alone.
    session.roster.leave(ben);
    session.assert_hour(20.0);
    assert!(session.roster.is_waiting(ada));

    // A toggle from the departed participant is silently ignored.
    assert_eq!(session.toggle(ben), ToggleOutcome::Ignored);

    // Ada getting up and turning in again completes the one-member vote.
    assert_eq!(session.toggle(ada), ToggleOutcome::Woke);
    assert_eq!(session.toggle(ada), ToggleOutcome::Waiting { advanced: true });
    session.assert_hour(8.0);
}

#[test]
fn bootstrapped_config_drives_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nocturne.yaml");
    std::fs::write(
        &path,
        "autowake: false\nrequire_rest_site: false\nday_start_hour: 25\n",
    )
    .unwrap();

    // The corrupt day_start_hour is repaired to 8 and persisted.
    let config = SessionConfig::load_or_init(&path).unwrap();
    let mut session = Session::new(config);
    let ada = session.roster.join();

    assert_eq!(session.toggle(ada), ToggleOutcome::Waiting { advanced: true });
    session.assert_hour(8.0);

    // autowake came from the file: the flag survives the skip.
    assert!(session.roster.is_waiting(ada));
}
