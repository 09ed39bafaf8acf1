//! Script commands and their line syntax.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use gator_core::events::StatusReport;
use gator_core::types::{Priority, SeatId, UserId};

use super::error::ScriptError;
use crate::engine::ReservationEngine;

/// One script command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum Command {
    /// `Initialize(seats)`
    Initialize {
        /// Number of seats to create.
        seats: i64,
    },
    /// `Available()`
    Available,
    /// `Reserve(user, priority)`
    Reserve {
        /// Requesting user.
        user: UserId,
        /// Waitlist priority if no seat is free.
        priority: Priority,
    },
    /// `Cancel(seat, user)`
    Cancel {
        /// Seat to give up.
        seat: SeatId,
        /// Holder of the seat.
        user: UserId,
    },
    /// `ExitWaitlist(user)`
    ExitWaitlist {
        /// Waitlisted user.
        user: UserId,
    },
    /// `UpdatePriority(user, priority)`
    UpdatePriority {
        /// Waitlisted user.
        user: UserId,
        /// New priority.
        priority: Priority,
    },
    /// `AddSeats(count)`
    AddSeats {
        /// Number of seats to append.
        count: i64,
    },
    /// `PrintReservations()`
    PrintReservations,
    /// `ReleaseSeats(lo, hi)`
    ReleaseSeats {
        /// Lowest user id, inclusive.
        lo: UserId,
        /// Highest user id, inclusive.
        hi: UserId,
    },
    /// `Quit()`
    Quit,
}

/// A successfully parsed script line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLine {
    /// 1-based line number.
    pub line: usize,
    /// The parsed command.
    pub command: Command,
}

impl Command {
    /// The command name as written in scripts.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialize { .. } => "Initialize",
            Self::Available => "Available",
            Self::Reserve { .. } => "Reserve",
            Self::Cancel { .. } => "Cancel",
            Self::ExitWaitlist { .. } => "ExitWaitlist",
            Self::UpdatePriority { .. } => "UpdatePriority",
            Self::AddSeats { .. } => "AddSeats",
            Self::PrintReservations => "PrintReservations",
            Self::ReleaseSeats { .. } => "ReleaseSeats",
            Self::Quit => "Quit",
        }
    }

    /// Whether the driver stops after this command.
    pub fn is_quit(&self) -> bool {
        matches!(self, Self::Quit)
    }

    /// Run this command against `engine`.
    pub fn apply(&self, engine: &mut ReservationEngine) -> StatusReport {
        match *self {
            Self::Initialize { seats } => engine.initialize(seats),
            Self::Available => engine.status(),
            Self::Reserve { user, priority } => engine.reserve(user, priority),
            Self::Cancel { seat, user } => engine.cancel(seat, user),
            Self::ExitWaitlist { user } => engine.exit_waitlist(user),
            Self::UpdatePriority { user, priority } => engine.update_priority(user, priority),
            Self::AddSeats { count } => engine.add_seats(count),
            Self::PrintReservations => engine.print_reservations(),
            Self::ReleaseSeats { lo, hi } => engine.release_seats(lo, hi),
            Self::Quit => engine.quit(),
        }
    }

    fn args(&self) -> Vec<i64> {
        match *self {
            Self::Initialize { seats } => vec![seats],
            Self::Reserve { user, priority } | Self::UpdatePriority { user, priority } => {
                vec![user.get(), priority]
            }
            Self::Cancel { seat, user } => vec![seat.get(), user.get()],
            Self::ExitWaitlist { user } => vec![user.get()],
            Self::AddSeats { count } => vec![count],
            Self::ReleaseSeats { lo, hi } => vec![lo.get(), hi.get()],
            Self::Available | Self::PrintReservations | Self::Quit => Vec::new(),
        }
    }
}

/// Canonical name and argument count for every command.
const COMMANDS: [(&str, usize); 10] = [
    ("Initialize", 1),
    ("Available", 0),
    ("Reserve", 2),
    ("Cancel", 2),
    ("ExitWaitlist", 1),
    ("UpdatePriority", 2),
    ("AddSeats", 1),
    ("PrintReservations", 0),
    ("ReleaseSeats", 2),
    ("Quit", 0),
];

impl FromStr for Command {
    type Err = ScriptError;

    /// Parse `Name(a, b)`. Whitespace around the line, the name, and each
    /// argument is ignored, as is anything after the closing parenthesis.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let missing_paren = || ScriptError::MissingParen {
            text: text.to_string(),
        };
        let (name, rest) = text.split_once('(').ok_or_else(missing_paren)?;
        let (raw_args, _) = rest.split_once(')').ok_or_else(missing_paren)?;

        let name = name.trim();
        let &(command, expected) = COMMANDS
            .iter()
            .find(|(known, _)| *known == name)
            .ok_or_else(|| ScriptError::UnknownCommand {
                name: name.to_string(),
            })?;

        let args = if raw_args.trim().is_empty() {
            Vec::new()
        } else {
            raw_args
                .split(',')
                .map(|arg| {
                    arg.trim()
                        .parse::<i64>()
                        .map_err(|_| ScriptError::BadArgument {
                            command,
                            text: arg.trim().to_string(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?
        };
        if args.len() != expected {
            return Err(ScriptError::Arity {
                command,
                expected,
                found: args.len(),
            });
        }

        let parsed = match (command, args.as_slice()) {
            ("Initialize", &[seats]) => Self::Initialize { seats },
            ("Available", []) => Self::Available,
            ("Reserve", &[user, priority]) => Self::Reserve {
                user: UserId(user),
                priority,
            },
            ("Cancel", &[seat, user]) => Self::Cancel {
                seat: SeatId(seat),
                user: UserId(user),
            },
            ("ExitWaitlist", &[user]) => Self::ExitWaitlist { user: UserId(user) },
            ("UpdatePriority", &[user, priority]) => Self::UpdatePriority {
                user: UserId(user),
                priority,
            },
            ("AddSeats", &[count]) => Self::AddSeats { count },
            ("PrintReservations", []) => Self::PrintReservations,
            ("ReleaseSeats", &[lo, hi]) => Self::ReleaseSeats {
                lo: UserId(lo),
                hi: UserId(hi),
            },
            ("Quit", []) => Self::Quit,
            _ => unreachable!("arity checked against COMMANDS"),
        };
        Ok(parsed)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = self.args().iter().map(i64::to_string).collect();
        write!(f, "{}({})", self.name(), args.join(", "))
    }
}

/// Parse every non-blank line of `script`, keeping line numbers.
pub fn parse_script(script: &str) -> Vec<Result<ParsedLine, ScriptError>> {
    script
        .lines()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(i, text)| {
            let line = i + 1;
            text.parse::<Command>()
                .map(|command| ParsedLine { line, command })
                .map_err(|e| e.at_line(line))
        })
        .collect()
}
