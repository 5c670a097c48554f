//! Readiness aggregation and night-skip coordination for a shared world.
//!
//! Participants opt into a "resting" state; when every connected
//! participant is resting, the shared world clock snaps to morning and
//! everyone is released. This crate owns that decision logic and the
//! trait seams to the host environment.
//!
//! # Modules
//!
//! - [`clock`] -- World-hour seam, [`LocalClock`], and the daytime
//!   window predicate.
//! - [`config`] -- Self-repairing YAML session configuration.
//! - [`coordinator`] -- Toggle handling, the all-resting condition, and
//!   the night-skip action.
//! - [`indicator`] -- Status banner seam and banner copy.
//! - [`population`] -- Participant population seam and the in-memory
//!   [`Roster`].
//! - [`projector`] -- Stateless projection of the aggregate tally onto
//!   the indicator.
//! - [`site`] -- Rest-site precondition seam.
//!
//! [`LocalClock`]: clock::LocalClock
//! [`Roster`]: population::Roster

pub mod clock;
pub mod config;
pub mod coordinator;
pub mod indicator;
pub mod population;
pub mod projector;
pub mod site;
