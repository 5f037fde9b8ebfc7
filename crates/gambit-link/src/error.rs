//! Line protocol and session errors.

use gambit_core::{ConfigError, GameError, Team};

/// Errors raised while parsing commands, exchanging payloads or driving a session.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// A command was given without a required argument.
    #[error("{command}: missing argument")]
    MissingArgument {
        /// The command missing an argument.
        command: &'static str,
    },

    /// The `position` command is missing `startpos` or `fen`.
    #[error("malformed position command: missing startpos or fen keyword")]
    MalformedPosition,

    /// A square name could not be parsed.
    #[error("invalid square: {text}")]
    InvalidSquare {
        /// The offending text.
        text: String,
    },

    /// A coordinate move could not be parsed.
    #[error("invalid move: {text}")]
    InvalidMove {
        /// The offending text.
        text: String,
    },

    /// A promotion letter in a payload is not a piece.
    #[error("invalid promotion letter {found:?}")]
    InvalidPromotion {
        /// The character received.
        found: char,
    },

    /// `setoption` named an option that does not exist or gave it a bad value.
    #[error("invalid option {name} = {value:?}")]
    InvalidOption {
        /// Option name as given.
        name: String,
        /// Value as given.
        value: String,
    },

    /// A local move was attempted on the peer's turn.
    #[error("not your turn: {team} to move")]
    NotYourTurn {
        /// The team whose turn it is.
        team: Team,
    },

    /// A peer move arrived on the local side's turn.
    #[error("peer move out of turn: {team} to move")]
    OutOfTurn {
        /// The team whose turn it is.
        team: Team,
    },

    /// The peer announced a team other than the one it plays.
    #[error("peer announced {found}, expected {expected}")]
    TeamMismatch {
        /// The team the peer should play.
        expected: Team,
        /// The team it announced.
        found: Team,
    },

    /// A configuration value was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The game rejected an operation.
    #[error(transparent)]
    Game(#[from] GameError),

    /// A payload line was not valid JSON for any payload.
    #[error("bad payload: {source}")]
    Json {
        /// The underlying decode error.
        #[from]
        source: serde_json::Error,
    },

    /// Reading input failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
