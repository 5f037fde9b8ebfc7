//! The game state machine: selection, apply, king status and the move log.

use std::fmt;

use tracing::{debug, error, info, warn};

use crate::board::Board;
use crate::chess_move::{Move, MoveRequest};
use crate::color::Color;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::movegen::{Targets, classify};
use crate::notation::{notate, transcript};
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::{KingStatus, Position, Status};
use crate::square::Square;
use crate::team::{Team, TeamPair};

/// Where the selection cycle stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Nothing selected.
    Idle,
    /// An own piece is selected and its legal destinations are cached.
    Selected { from: Square, targets: Targets },
    /// A destination was chosen; the next [`Game::update`] applies it.
    PendingApply { from: Square, to: Square },
}

/// One applied move as it appears in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    /// The piece as it stood before moving.
    pub piece: Piece,
    pub captured: Option<Piece>,
    /// Algebraic notation, check suffix included.
    pub san: String,
    pub color: Color,
    /// Full move number the move was played in.
    pub fullmove: u16,
}

/// A line of the game log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Move(MoveRecord),
    /// Terminal entry after checkmate or stalemate.
    Result(&'static str),
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEntry::Move(record) => match record.color {
                Color::White => write!(f, "{}. {}", record.fullmove, record.san),
                Color::Black => write!(f, "{}... {}", record.fullmove, record.san),
            },
            LogEntry::Result(token) => f.write_str(token),
        }
    }
}

/// State saved before each applied move so it can be undone.
#[derive(Debug, Clone)]
struct Memento {
    position: Position,
    log_len: usize,
}

/// A match between two teams.
///
/// Owns the authoritative position. Every mutation goes through [`select`]
/// and [`update`], [`request_move`], [`apply_trusted`], [`undo`], [`reset`]
/// or [`load_snapshot`]; king status is recomputed once after each of them.
///
/// [`select`]: Game::select
/// [`update`]: Game::update
/// [`request_move`]: Game::request_move
/// [`apply_trusted`]: Game::apply_trusted
/// [`undo`]: Game::undo
/// [`reset`]: Game::reset
/// [`load_snapshot`]: Game::load_snapshot
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    position: Position,
    phase: Phase,
    kings: [KingStatus; Color::COUNT],
    log: Vec<LogEntry>,
    history: Vec<Memento>,
    /// Full move number and side the log starts from.
    log_start: (u16, Color),
}

impl Game {
    /// Start a match in the standard layout.
    pub fn new(config: GameConfig) -> Game {
        info!(
            files = config.dimensions.files(),
            ranks = config.dimensions.ranks(),
            first = %config.teams.first(),
            second = %config.teams.second(),
            "new game"
        );
        let position = Position::starting(config.dimensions);
        let mut game = Game {
            config,
            position,
            phase: Phase::Idle,
            kings: [KingStatus {
                square: None,
                in_check: false,
                can_move: true,
            }; Color::COUNT],
            log: Vec::new(),
            history: Vec::new(),
            log_start: (1, Color::White),
        };
        game.refresh_kings();
        game
    }

    /// Restart in the standard layout with a new pair of teams.
    ///
    /// # Errors
    ///
    /// [`GameError::Config`] if both teams are the same. The game is left as it was.
    pub fn reset(&mut self, first: Team, second: Team) -> Result<(), GameError> {
        let teams = TeamPair::new(first, second)?;
        *self = Game::new(GameConfig {
            dimensions: self.config.dimensions,
            teams,
        });
        Ok(())
    }

    /// Replace the position with a decoded snapshot. Clears the log and undo history.
    ///
    /// # Errors
    ///
    /// [`GameError::Snapshot`] if the text does not decode. The game is left as it was.
    pub fn load_snapshot(&mut self, text: &str) -> Result<(), GameError> {
        let position: Position = text.parse()?;
        info!(snapshot = text, "loaded snapshot");
        self.config.dimensions = position.dimensions();
        self.log_start = (position.fullmove_number(), position.side_to_move());
        self.position = position;
        self.phase = Phase::Idle;
        self.log.clear();
        self.history.clear();
        self.refresh_kings();
        Ok(())
    }

    /// Encode the current position.
    pub fn snapshot(&self) -> String {
        self.position.to_string()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn teams(&self) -> TeamPair {
        self.config.teams
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn board(&self) -> &Board {
        self.position.board()
    }

    /// The occupant at a coordinate; `None` when empty or off the board.
    pub fn piece_at(&self, file: i32, rank: i32) -> Option<Piece> {
        let sq = self.board().square(file, rank)?;
        self.board().piece_at(sq)
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    pub fn team_to_move(&self) -> Team {
        self.config.teams.team(self.side_to_move())
    }

    /// Check, mate or stalemate for the side to move, from the cached king status.
    pub fn status(&self) -> Status {
        let king = self.kings[self.side_to_move().index()];
        match (king.in_check, king.can_move) {
            (false, true) => Status::Ongoing,
            (true, true) => Status::Check,
            (true, false) => Status::Checkmate,
            (false, false) => Status::Stalemate,
        }
    }

    /// King status for the side `color`.
    pub fn king_of(&self, color: Color) -> KingStatus {
        self.kings[color.index()]
    }

    /// King status for `team`.
    ///
    /// # Errors
    ///
    /// [`GameError::TeamNotInMatch`] if `team` is not one of the two teams.
    pub fn king(&self, team: Team) -> Result<KingStatus, GameError> {
        let color = self
            .config
            .teams
            .color_of(team)
            .ok_or(GameError::TeamNotInMatch { team })?;
        Ok(self.king_of(color))
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The selected square, if a piece is selected or a move is pending.
    pub fn selected(&self) -> Option<Square> {
        match self.phase {
            Phase::Idle => None,
            Phase::Selected { from, .. } | Phase::PendingApply { from, .. } => Some(from),
        }
    }

    /// Cached legal destinations of the selected piece.
    pub fn legal_destinations(&self) -> &[Square] {
        match &self.phase {
            Phase::Selected { targets, .. } => targets.as_slice(),
            _ => &[],
        }
    }

    /// Touch a square.
    ///
    /// An own piece becomes the selection; a cached destination of the
    /// selection becomes the pending move; anything else clears the
    /// selection. Ignored while a move is pending.
    pub fn select(&mut self, file: i32, rank: i32) -> &Phase {
        if matches!(self.phase, Phase::PendingApply { .. }) {
            return &self.phase;
        }
        let Some(sq) = self.board().square(file, rank) else {
            self.phase = Phase::Idle;
            return &self.phase;
        };

        if let Phase::Selected { from, targets } = &self.phase {
            let from = *from;
            let chosen = targets.contains(&sq);
            if from == sq {
                self.phase = Phase::Idle;
                return &self.phase;
            }
            if chosen {
                self.phase = Phase::PendingApply { from, to: sq };
                return &self.phase;
            }
        }

        self.phase = match self.board().piece_at(sq) {
            Some(piece) if piece.color() == self.side_to_move() => Phase::Selected {
                from: sq,
                targets: self.position.legal_destinations(sq),
            },
            _ => Phase::Idle,
        };
        &self.phase
    }

    /// Apply the pending move, if any. Promotions become queens.
    pub fn update(&mut self) -> Result<Option<MoveRecord>, GameError> {
        let Phase::PendingApply { from, to } = self.phase else {
            return Ok(None);
        };
        self.phase = Phase::Idle;
        let mv = classify(self.board(), from, to, PieceKind::Queen).ok_or_else(|| {
            error!(square = %from, "pending move lost its piece");
            GameError::EmptySource { square: from }
        })?;
        self.apply(mv).map(Some)
    }

    /// Validate and apply a move for the side to move.
    ///
    /// # Errors
    ///
    /// [`GameError::IllegalMove`] or [`GameError::InvalidPromotion`]; the
    /// game is left untouched and nothing is logged.
    pub fn request_move(&mut self, req: &MoveRequest) -> Result<MoveRecord, GameError> {
        let mv = self.position.resolve(req).inspect_err(|err| {
            warn!(%err, "rejected move request");
        })?;
        self.apply(mv)
    }

    /// Apply a move without legality checks, for moves taken on trust.
    ///
    /// # Errors
    ///
    /// [`GameError::EmptySource`] if there is no piece to move, which means
    /// the two ends disagree about the position. Nothing is changed.
    pub fn apply_trusted(&mut self, req: &MoveRequest) -> Result<MoveRecord, GameError> {
        let mv = self.position.resolve_trusted(req).inspect_err(|err| {
            if matches!(err, GameError::EmptySource { .. }) {
                error!(%err, "trusted move has no piece to move");
            } else {
                warn!(%err, "rejected trusted move");
            }
        })?;
        self.apply(mv)
    }

    fn apply(&mut self, mv: Move) -> Result<MoveRecord, GameError> {
        let Some(piece) = self.board().piece_at(mv.from()) else {
            error!(%mv, "apply with an empty source square");
            return Err(GameError::EmptySource { square: mv.from() });
        };

        let before = self.position.clone();
        let captured = self.position.play(mv)?;
        self.phase = Phase::Idle;
        self.refresh_kings();

        let status = self.status();
        let record = MoveRecord {
            mv,
            piece,
            captured,
            san: notate(&before, mv, status),
            color: before.side_to_move(),
            fullmove: before.fullmove_number(),
        };
        self.history.push(Memento {
            position: before,
            log_len: self.log.len(),
        });
        debug!(%mv, san = %record.san, team = %self.config.teams.team(record.color), "applied move");
        self.log.push(LogEntry::Move(record.clone()));

        if let Some(result) = status.result(self.side_to_move()) {
            info!(result, ?status, "game over");
            self.log.push(LogEntry::Result(result));
        }
        Ok(record)
    }

    /// Take back the last applied move.
    ///
    /// # Errors
    ///
    /// [`GameError::NothingToUndo`] if no move has been applied since the
    /// last reset or snapshot load.
    pub fn undo(&mut self) -> Result<(), GameError> {
        let memento = self.history.pop().ok_or(GameError::NothingToUndo)?;
        self.position = memento.position;
        self.log.truncate(memento.log_len);
        self.phase = Phase::Idle;
        self.refresh_kings();
        debug!(snapshot = %self.position, "undid move");
        Ok(())
    }

    fn refresh_kings(&mut self) {
        for color in Color::ALL {
            self.kings[color.index()] = self.position.king_status(color);
        }
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Notation of the most recent move.
    pub fn latest_notation(&self) -> Option<&str> {
        self.log.iter().rev().find_map(|entry| match entry {
            LogEntry::Move(record) => Some(record.san.as_str()),
            LogEntry::Result(_) => None,
        })
    }

    /// The result token once the game has ended.
    pub fn result(&self) -> Option<&'static str> {
        match self.log.last() {
            Some(LogEntry::Result(token)) => Some(token),
            _ => None,
        }
    }

    /// The whole log as numbered text: `1. e4 e5 2. Nf3 ...`.
    pub fn transcript(&self) -> String {
        let moves = self.log.iter().filter_map(|entry| match entry {
            LogEntry::Move(record) => Some(record.san.as_str()),
            LogEntry::Result(_) => None,
        });
        transcript(self.log_start.0, self.log_start.1, moves, self.result())
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new(GameConfig::default())
    }
}
