//! Host binary for the Nocturne night-skip coordinator.
//!
//! Runs an interactive session over stdin: participants join and leave,
//! lie down with `wait` (or its `sleep` alias), and once everyone is
//! resting the world clock snaps to morning. All commands funnel
//! through this single line loop, so every toggle -- including a
//! cascading night skip -- runs to completion before the next one is
//! read.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Bootstrap configuration from `nocturne.yaml` (created or repaired
//!    in place on first run)
//! 3. Create the world clock at dusk
//! 4. Run the command session
//! 5. Clear all display state on the way out

mod command;
mod console;
mod error;

use std::collections::BTreeMap;
use std::path::Path;

use nocturne_core::clock::{LocalClock, WorldClock as _};
use nocturne_core::config::SessionConfig;
use nocturne_core::coordinator::{self, SessionContext, ToggleOutcome};
use nocturne_core::population::{Population as _, Roster};
use nocturne_core::site::FixedRestSites;
use nocturne_types::{AggregateStatus, ParticipantId};
use tokio::io::AsyncBufReadExt as _;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::command::Command;
use crate::console::ConsoleIndicator;
use crate::error::EngineError;

/// Everything the command session mutates.
struct SessionState {
    /// Immutable session configuration.
    config: SessionConfig,

    /// Participant population.
    roster: Roster,

    /// Rest-site occupancy.
    sites: FixedRestSites,

    /// World clock.
    clock: LocalClock,

    /// Console banner renderer.
    indicator: ConsoleIndicator,

    /// Display-name to identity mapping.
    names: BTreeMap<String, ParticipantId>,
}

/// Application entry point.
///
/// Initializes logging, bootstraps configuration, then hands control to
/// the command session until EOF or `quit`.
///
/// # Errors
///
/// Returns an error if initialization or the command stream fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("nocturne-engine starting");

    // 2. Bootstrap configuration.
    let config = load_config()?;
    info!(
        autowake = config.autowake,
        require_rest_site = config.require_rest_site,
        show_banner = config.show_banner,
        day_start_hour = config.day_start_hour,
        night_start_hour = config.night_start_hour,
        "Configuration loaded"
    );

    // 3. The session starts at dusk, when resting first becomes legal.
    let clock = LocalClock::new(config.night_start_hour).map_err(EngineError::from)?;
    info!(hour = clock.hour(), "World clock initialized");

    // 4. Run the command session.
    run_session(config, clock).await?;

    info!("nocturne-engine shutdown complete");
    Ok(())
}

/// Bootstrap the session configuration from `nocturne.yaml`.
///
/// A missing or corrupt file is replaced by defaults and written back;
/// only the write-back can fail.
fn load_config() -> Result<SessionConfig, EngineError> {
    let config = SessionConfig::load_or_init(Path::new("nocturne.yaml"))?;
    Ok(config)
}

/// Read command lines from stdin and dispatch them until EOF or `quit`.
///
/// # Errors
///
/// Returns [`EngineError::Io`] if reading from stdin fails.
async fn run_session(config: SessionConfig, clock: LocalClock) -> Result<(), EngineError> {
    let mut state = SessionState {
        config,
        roster: Roster::new(),
        sites: FixedRestSites::new(),
        clock,
        indicator: ConsoleIndicator::new(),
        names: BTreeMap::new(),
    };

    println!("nocturne session - type 'help' for commands");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match command::parse(trimmed) {
            Ok(Command::Quit) => break,
            Ok(parsed) => dispatch(&mut state, parsed),
            Err(err) => println!("{err}"),
        }
    }

    // 5. Teardown: the display never outlives the session.
    coordinator::shutdown(&state.roster, &mut state.indicator);

    Ok(())
}

/// Execute one parsed command against the session state.
fn dispatch(state: &mut SessionState, parsed: Command) {
    match parsed {
        Command::Join(name) => join(state, &name),
        Command::Leave(name) => leave(state, &name),
        Command::Wait(name) => wait(state, &name),
        Command::Bed(name) => bed(state, &name),
        Command::Hour(hour) => {
            state.clock.set_hour(hour);
            println!("world hour is now {:.2}", state.clock.hour());
        }
        Command::Status => status(state),
        Command::Help => help(),
        // `quit` is handled by the session loop.
        Command::Quit => {}
    }
}

/// Connect a participant, reconnecting a previously seen name.
fn join(state: &mut SessionState, name: &str) {
    if let Some(&id) = state.names.get(name) {
        if state.roster.is_connected(id) {
            println!("{name} is already in the session");
        } else if state.roster.rejoin(id) {
            println!("{name} reconnected");
        }
        return;
    }

    let id = state.roster.join();
    state.indicator.register(id, name);
    state.names.insert(name.to_owned(), id);
    println!("{name} joined");
}

/// Disconnect a participant and take them off any rest site.
fn leave(state: &mut SessionState, name: &str) {
    match state.names.get(name) {
        Some(&id) => {
            state.roster.leave(id);
            state.sites.vacate(id);
            println!("{name} left");
        }
        None => println!("no such participant: {name}"),
    }
}

/// Dispatch the readiness toggle for a named participant.
///
/// Unknown names map to an unknown identity, which the coordinator
/// silently ignores -- same as a command from a ghost connection.
fn wait(state: &mut SessionState, name: &str) {
    let id = state
        .names
        .get(name)
        .copied()
        .unwrap_or_else(ParticipantId::new);

    let mut ctx = SessionContext {
        config: &state.config,
        population: &mut state.roster,
        rest_sites: &state.sites,
        clock: &mut state.clock,
        indicator: &mut state.indicator,
    };

    match coordinator::request_toggle(&mut ctx, id) {
        ToggleOutcome::Ignored => {}
        ToggleOutcome::Woke => println!("{name} gets up"),
        ToggleOutcome::Rejected(reason) => println!("{reason}"),
        ToggleOutcome::Waiting { advanced: false } => println!("{name} lies down"),
        ToggleOutcome::Waiting { advanced: true } => {
            println!("{name} lies down");
            println!(
                "everyone is resting - night skipped, world hour is now {:.2}",
                state.clock.hour()
            );
        }
    }
}

/// Toggle rest-site occupancy for a named participant.
fn bed(state: &mut SessionState, name: &str) {
    match state.names.get(name) {
        Some(&id) => {
            if state.sites.toggle(id) {
                println!("{name} steps onto a rest site");
            } else {
                println!("{name} steps off the rest site");
            }
        }
        None => println!("no such participant: {name}"),
    }
}

/// Print the current tally and world hour.
fn status(state: &SessionState) {
    let snapshot = state.roster.connected();
    let tally = AggregateStatus::tally(snapshot.iter().map(|&id| state.roster.is_waiting(id)));
    println!(
        "world hour {:.2}, {}/{} resting",
        state.clock.hour(),
        tally.waiting,
        tally.total
    );
}

/// Print the command list.
fn help() {
    println!("commands:");
    println!("  join <name>   connect a participant");
    println!("  leave <name>  disconnect a participant");
    println!("  wait <name>   toggle resting (alias: sleep)");
    println!("  bed <name>    toggle standing on a rest site");
    println!("  hour <h>      set the world hour");
    println!("  status        show tally and world hour");
    println!("  quit          end the session");
}
