//! Line-command grammar for the interactive session.
//!
//! One command per line, keyword first. `wait` is the user-facing
//! readiness toggle; `sleep` is accepted as an alias for it. Parsing is
//! separated from dispatch so the grammar can be tested on its own.

/// A parsed session command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Connect a participant (or reconnect a previous one) by name.
    Join(String),

    /// Disconnect a participant by name.
    Leave(String),

    /// Toggle the named participant's resting state.
    Wait(String),

    /// Toggle whether the named participant stands on a rest site.
    Bed(String),

    /// Set the world hour.
    Hour(f64),

    /// Print the current tally and world hour.
    Status,

    /// Print the command list.
    Help,

    /// End the session.
    Quit,
}

/// Errors produced while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The keyword is not part of the grammar.
    #[error("unknown command: {0} (try 'help')")]
    Unknown(String),

    /// The command was given the wrong arguments.
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Parse a non-empty command line.
///
/// The caller is expected to skip blank lines; a blank line here parses
/// as an unknown command.
///
/// # Errors
///
/// Returns [`ParseError`] when the keyword is unknown or the arguments
/// do not fit the command.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let mut tokens = line.split_whitespace();
    let keyword = tokens.next().unwrap_or_default();
    let arg = tokens.next();
    if tokens.next().is_some() {
        return Err(ParseError::Usage("one argument at most"));
    }

    match keyword {
        "join" => named(arg, "join <name>").map(Command::Join),
        "leave" => named(arg, "leave <name>").map(Command::Leave),
        "wait" | "sleep" => named(arg, "wait <name>").map(Command::Wait),
        "bed" => named(arg, "bed <name>").map(Command::Bed),
        "hour" => match arg.and_then(|raw| raw.parse::<f64>().ok()) {
            Some(hour) => Ok(Command::Hour(hour)),
            None => Err(ParseError::Usage("hour <0-24>")),
        },
        "status" => bare(arg, Command::Status, "status"),
        "help" => bare(arg, Command::Help, "help"),
        "quit" | "exit" => bare(arg, Command::Quit, "quit"),
        other => Err(ParseError::Unknown(other.to_owned())),
    }
}

/// Require a single name argument.
fn named(arg: Option<&str>, usage: &'static str) -> Result<String, ParseError> {
    arg.map(str::to_owned).ok_or(ParseError::Usage(usage))
}

/// Require no argument.
fn bare(arg: Option<&str>, command: Command, usage: &'static str) -> Result<Command, ParseError> {
    if arg.is_none() {
        Ok(command)
    } else {
        Err(ParseError::Usage(usage))
    }
}
