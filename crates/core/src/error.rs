use std::error::Error;
use std::fmt;
use std::fmt::Display;

/// Errors returned by [`GameState`](crate::GameState) operations.
///
/// All of them are local validation failures: the engine state is left exactly
/// as it was before the rejected call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameError {
    /// A throw reported a pin count outside 0-10.
    InvalidPinCount {
        /// The rejected count.
        pins_down: u8,
    },
    /// A throw reported more pins than were standing for it.
    TooManyPins {
        /// The rejected count.
        pins_down: u8,
        /// Pins available to this throw.
        standing: u8,
    },
    /// A throw was submitted before the game was started.
    GameNotStarted,
    /// A throw was submitted after every player finished.
    GameOver,
    /// Players can only be added, and the game only started, during setup.
    GameAlreadyStarted,
    /// The game cannot start without players.
    NoPlayers,
    /// Player names must contain something besides whitespace.
    EmptyPlayerName,
}

impl Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidPinCount { pins_down } => {
                write!(f, "Invalid pin count {}: must be between 0 and 10", pins_down)
            }
            GameError::TooManyPins {
                pins_down,
                standing,
            } => {
                write!(
                    f,
                    "Cannot knock down {} pins: only {} standing",
                    pins_down, standing
                )
            }
            GameError::GameNotStarted => write!(f, "The game has not been started."),
            GameError::GameOver => write!(f, "The game is over."),
            GameError::GameAlreadyStarted => write!(f, "The game has already started."),
            GameError::NoPlayers => write!(f, "Add at least one player first."),
            GameError::EmptyPlayerName => write!(f, "Player name must not be empty."),
        }
    }
}

impl Error for GameError {}
