//! Error types for configuration, snapshot parsing, board validation, and play.

use std::fmt;

use crate::piece_kind::PieceKind;
use crate::square::Square;
use crate::team::Team;

/// Errors raised while building a [`GameConfig`](crate::GameConfig) or [`TeamPair`](crate::TeamPair).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Both slots name the same team.
    #[error("a team cannot play itself: {team}")]
    SameTeams {
        /// The duplicated team.
        team: Team,
    },
    /// A team name did not match any identity.
    #[error("unknown team: \"{name}\"")]
    UnknownTeam {
        /// The unrecognized name.
        name: String,
    },
    /// The file count is outside the supported range.
    #[error("board must have {min}..={max} files, got {files}")]
    FilesOutOfRange { files: usize, min: u8, max: u8 },
    /// The rank count is outside the supported range.
    #[error("board must have {min}..={max} ranks, got {ranks}")]
    RanksOutOfRange { ranks: usize, min: u8, max: u8 },
}

/// Errors that occur when decoding a snapshot string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// The snapshot does not have exactly 6 space-separated fields.
    WrongFieldCount {
        /// Number of fields found.
        found: usize,
    },
    /// The piece placement describes a board outside the supported size.
    BadDimensions {
        /// The underlying size violation.
        source: ConfigError,
    },
    /// A rank describes a different number of squares than the first rank.
    BadRankLength {
        /// Zero-based rank index, counted from the top of the placement field.
        rank_index: usize,
        /// Number of squares described.
        length: usize,
        /// Width established by the first rank.
        expected: usize,
    },
    /// An unrecognized character appeared in the piece placement.
    InvalidPieceChar {
        /// The invalid character.
        character: char,
    },
    /// The active color field is not "w" or "b".
    InvalidColor {
        /// The invalid color string.
        found: String,
    },
    /// An unrecognized character appeared in the castling rights field.
    InvalidCastlingChar {
        /// The invalid character.
        character: char,
    },
    /// The en passant field is not "-" or a square on the board.
    InvalidEnPassant {
        /// The invalid en passant string.
        found: String,
    },
    /// A move counter is not a valid number.
    InvalidMoveCounter {
        /// The field name ("halfmove clock" or "fullmove number").
        field: &'static str,
        /// The invalid string.
        found: String,
    },
    /// The decoded position fails structural validation.
    InvalidBoard {
        /// The underlying board validation error.
        source: BoardError,
    },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::WrongFieldCount { found } => {
                write!(f, "expected 6 snapshot fields, found {found}")
            }
            SnapshotError::BadDimensions { source } => {
                write!(f, "unsupported board size: {source}")
            }
            SnapshotError::BadRankLength {
                rank_index,
                length,
                expected,
            } => {
                write!(
                    f,
                    "rank {rank_index} describes {length} squares, expected {expected}"
                )
            }
            SnapshotError::InvalidPieceChar { character } => {
                write!(f, "invalid piece character: '{character}'")
            }
            SnapshotError::InvalidColor { found } => {
                write!(f, "invalid active color: \"{found}\"")
            }
            SnapshotError::InvalidCastlingChar { character } => {
                write!(f, "invalid castling character: '{character}'")
            }
            SnapshotError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant square: \"{found}\"")
            }
            SnapshotError::InvalidMoveCounter { field, found } => {
                write!(f, "invalid {field}: \"{found}\"")
            }
            SnapshotError::InvalidBoard { source } => {
                write!(f, "invalid board: {source}")
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::BadDimensions { source } => Some(source),
            SnapshotError::InvalidBoard { source } => Some(source),
            _ => None,
        }
    }
}

impl From<BoardError> for SnapshotError {
    fn from(source: BoardError) -> Self {
        SnapshotError::InvalidBoard { source }
    }
}

impl From<ConfigError> for SnapshotError {
    fn from(source: ConfigError) -> Self {
        SnapshotError::BadDimensions { source }
    }
}

/// Errors from structural validation of a decoded position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A side does not have exactly one king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount {
        /// Which side has the wrong king count.
        color: &'static str,
        /// Number of kings found.
        count: usize,
    },
    /// Pawns occupy the first or last rank.
    #[error("pawns found on back rank")]
    PawnsOnBackRank,
    /// A castling flag is set but the king is off its back rank or no rook
    /// stands on that side of it.
    #[error("castling right '{flag}' has no king and rook to back it")]
    UnbackedCastlingRight {
        /// The castling flag character.
        flag: char,
    },
    /// The en passant target does not sit behind a pawn that just double-pushed.
    #[error("no double-pushed pawn behind en passant square {square}")]
    OrphanEnPassant {
        /// The en passant target square.
        square: Square,
    },
}

/// Errors returned by [`Game`](crate::Game) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Invalid configuration or team pair.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A snapshot could not be decoded.
    #[error("malformed snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
    /// The requested move is not in the legal set for the side to move.
    #[error("illegal move {from}{to}")]
    IllegalMove {
        /// Requested source, as given.
        from: String,
        /// Requested destination, as given.
        to: String,
    },
    /// A promotion to a pawn or king was requested.
    #[error("cannot promote to {kind:?}")]
    InvalidPromotion {
        /// The requested kind.
        kind: PieceKind,
    },
    /// The apply step found no piece on its source square.
    #[error("no piece on source square {square}; game state is inconsistent")]
    EmptySource {
        /// The empty source square.
        square: Square,
    },
    /// A team outside the current match was queried.
    #[error("{team} is not playing in this match")]
    TeamNotInMatch {
        /// The queried team.
        team: Team,
    },
    /// `undo` was called with no applied moves.
    #[error("no move to undo")]
    NothingToUndo,
}

#[cfg(test)]
mod tests {
    use super::{BoardError, ConfigError, GameError, SnapshotError};
    use crate::team::Team;

    #[test]
    fn snapshot_error_display() {
        let err = SnapshotError::WrongFieldCount { found: 4 };
        assert_eq!(format!("{err}"), "expected 6 snapshot fields, found 4");
    }

    #[test]
    fn snapshot_error_from_board_error() {
        let err: SnapshotError = BoardError::PawnsOnBackRank.into();
        assert!(matches!(err, SnapshotError::InvalidBoard { .. }));
        assert_eq!(format!("{err}"), "invalid board: pawns found on back rank");
    }

    #[test]
    fn game_error_wraps_config_error() {
        let err: GameError = ConfigError::SameTeams { team: Team::Blue }.into();
        assert_eq!(format!("{err}"), "a team cannot play itself: blue");
    }

    #[test]
    fn team_not_in_match_display() {
        let err = GameError::TeamNotInMatch { team: Team::DarkGray };
        assert_eq!(format!("{err}"), "dark_gray is not playing in this match");
    }
}
