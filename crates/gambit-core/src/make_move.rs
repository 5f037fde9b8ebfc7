//! Move execution: in place on the grid, copy-make on a position.

use tracing::error;

use crate::board::Board;
use crate::castle_rights::unmoved_rook_outward;
use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::error::GameError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

impl Board {
    /// Carry out `mv` on the grid and return the captured piece, if any.
    ///
    /// Handles the castling rook, the en passant victim and promotion, and
    /// records the move on every piece that moved. Does not clear old
    /// markers; [`Position::play`] does that before calling in.
    pub(crate) fn execute(&mut self, mv: Move) -> Result<Option<Piece>, GameError> {
        let mut piece = self
            .take(mv.from())
            .ok_or(GameError::EmptySource { square: mv.from() })?;

        let captured = match mv.kind() {
            MoveKind::EnPassant => self.take(Square::new(mv.to().file(), mv.from().rank())),
            _ => self.take(mv.to()),
        };

        if let MoveKind::Castle(side) = mv.kind()
            && let Some(rook_sq) = unmoved_rook_outward(self, mv.from(), side, piece.color())
            && let Some(rook_dest) = self.offset(mv.to(), -side.direction(), 0)
            && let Some(mut rook) = self.take(rook_sq)
        {
            rook.record_move(rook_sq, rook_dest);
            self.set(rook_dest, rook);
        }

        if let Some(kind) = mv.promotion() {
            piece = piece.promoted(kind);
        }
        piece.record_move(mv.from(), mv.to());
        self.set(mv.to(), piece);
        Ok(captured)
    }
}

impl Position {
    /// Apply a move and return the resulting position. Copy-make: `self` is not modified.
    ///
    /// If the source square is empty the position is returned unchanged.
    pub fn make_move(&self, mv: Move) -> Position {
        let mut next = self.clone();
        if let Err(err) = next.play(mv) {
            error!(%mv, %err, "make_move on a position without the moving piece");
            return self.clone();
        }
        next
    }

    /// Apply a move in place and return the captured piece.
    ///
    /// Clears the side to move's last-move markers, executes the move,
    /// advances both clocks and flips the side to move. Leaves `self`
    /// untouched when the source square is empty.
    pub(crate) fn play(&mut self, mv: Move) -> Result<Option<Piece>, GameError> {
        let mover = self
            .board
            .piece_at(mv.from())
            .ok_or(GameError::EmptySource { square: mv.from() })?;

        self.board.clear_last_moves(self.side_to_move);
        let captured = self.board.execute(mv)?;

        if mover.kind() == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if self.side_to_move == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = !self.side_to_move;
        Ok(captured)
    }
}
