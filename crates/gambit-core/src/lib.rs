//! Chess rules on boards of configurable size: pieces, move generation,
//! legality, snapshots, notation and the game state machine.

mod board;
mod castle_rights;
mod chess_move;
mod color;
mod config;
mod error;
mod game;
mod legality;
mod make_move;
mod movegen;
mod notation;
mod perft;
mod piece;
mod piece_kind;
mod position;
mod snapshot;
mod square;
mod team;

pub use board::{Board, PrettyBoard};
pub use castle_rights::{CastleRights, CastleSide, castling_rook};
pub use chess_move::{Move, MoveKind, MoveRequest};
pub use color::Color;
pub use config::{Dimensions, GameConfig, MAX_DIMENSION, MIN_FILES, MIN_RANKS};
pub use error::{BoardError, ConfigError, GameError, SnapshotError};
pub use game::{Game, LogEntry, MoveRecord, Phase};
pub use legality::{has_legal_move, is_in_check, keeps_king_safe, legal_destinations};
pub use movegen::{
    Targets, candidate_moves, classify, fill_pseudo_legal, is_attacked, pseudo_legal_moves,
};
pub use notation::{notate, transcript};
pub use perft::{divide, perft};
pub use piece::{LastMove, Piece};
pub use piece_kind::PieceKind;
pub use position::{KingStatus, Position, Status};
pub use snapshot::STARTING_SNAPSHOT;
pub use square::{Square, file_letters};
pub use team::{Team, TeamPair};
