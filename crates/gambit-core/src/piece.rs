//! A piece on the board: kind, side, and movement history.

use std::fmt;

use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// The most recent move a piece made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LastMove {
    /// Square the piece left.
    pub from: Square,
    /// Square the piece arrived on.
    pub to: Square,
}

impl LastMove {
    /// Return `true` if this move advanced two ranks along a file.
    #[inline]
    pub fn is_double_step(self) -> bool {
        self.from.file() == self.to.file() && self.from.rank().abs_diff(self.to.rank()) == 2
    }
}

/// A piece standing on the board.
///
/// The side never changes for the lifetime of the piece. `has_moved` gates
/// castling; `last_move` is set on every move the piece makes and cleared for
/// the whole side when that side next moves, which is what limits en passant
/// to the ply immediately after a double push.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    has_moved: bool,
    last_move: Option<LastMove>,
}

impl Piece {
    /// Create an unmoved piece.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece {
            kind,
            color,
            has_moved: false,
            last_move: None,
        }
    }

    /// Parse a snapshot character into an unmoved piece.
    ///
    /// Uppercase letters produce White pieces; lowercase letters produce Black pieces.
    #[inline]
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_fen_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }

    /// Return the piece kind.
    #[inline]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    /// Return the side this piece plays for.
    #[inline]
    pub const fn color(self) -> Color {
        self.color
    }

    /// Return `true` once the piece has moved at least once.
    #[inline]
    pub const fn has_moved(self) -> bool {
        self.has_moved
    }

    /// Return the piece's last move, if it has not been cleared yet.
    #[inline]
    pub const fn last_move(self) -> Option<LastMove> {
        self.last_move
    }

    /// Return `true` if this piece belongs to the side opposing `color`.
    #[inline]
    pub fn is_enemy_of(self, color: Color) -> bool {
        self.color != color
    }

    /// Return the snapshot character: uppercase for White, lowercase for Black.
    #[inline]
    pub fn fen_char(self) -> char {
        let base = self.kind.fen_char();
        match self.color {
            Color::White => base.to_ascii_uppercase(),
            Color::Black => base,
        }
    }

    /// Record a move made by this piece.
    #[inline]
    pub(crate) fn record_move(&mut self, from: Square, to: Square) {
        self.has_moved = true;
        self.last_move = Some(LastMove { from, to });
    }

    #[inline]
    pub(crate) fn clear_last_move(&mut self) {
        self.last_move = None;
    }

    #[inline]
    pub(crate) fn set_has_moved(&mut self, has_moved: bool) {
        self.has_moved = has_moved;
    }

    #[inline]
    pub(crate) fn set_last_move(&mut self, last_move: Option<LastMove>) {
        self.last_move = last_move;
    }

    /// The same piece history, with a new kind. Used for promotion.
    #[inline]
    pub(crate) fn promoted(self, kind: PieceKind) -> Piece {
        Piece { kind, ..self }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color_prefix = match self.color {
            Color::White => 'W',
            Color::Black => 'B',
        };
        let kind_char = self.kind.fen_char().to_ascii_uppercase();
        write!(f, "{}{}", color_prefix, kind_char)?;
        if self.has_moved {
            write!(f, "*")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{LastMove, Piece};
    use crate::color::Color;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    #[test]
    fn fen_char_roundtrip() {
        for color in Color::ALL {
            for kind in PieceKind::ALL {
                let piece = Piece::new(kind, color);
                assert_eq!(Piece::from_fen_char(piece.fen_char()), Some(piece));
            }
        }
        assert_eq!(Piece::from_fen_char('x'), None);
    }

    #[test]
    fn case_selects_color() {
        assert_eq!(Piece::from_fen_char('K').unwrap().color(), Color::White);
        assert_eq!(Piece::from_fen_char('k').unwrap().color(), Color::Black);
    }

    #[test]
    fn record_move_sets_history() {
        let mut pawn = Piece::new(PieceKind::Pawn, Color::White);
        assert!(!pawn.has_moved());
        pawn.record_move(Square::new(4, 1), Square::new(4, 3));
        assert!(pawn.has_moved());
        assert!(pawn.last_move().unwrap().is_double_step());

        pawn.clear_last_move();
        assert!(pawn.has_moved());
        assert_eq!(pawn.last_move(), None);
    }

    #[test]
    fn single_step_and_capture_are_not_double_steps() {
        let single = LastMove {
            from: Square::new(3, 5),
            to: Square::new(3, 4),
        };
        let diagonal = LastMove {
            from: Square::new(2, 6),
            to: Square::new(3, 4),
        };
        assert!(!single.is_double_step());
        assert!(!diagonal.is_double_step());
    }

    #[test]
    fn promotion_keeps_history() {
        let mut pawn = Piece::new(PieceKind::Pawn, Color::Black);
        pawn.record_move(Square::new(0, 1), Square::new(0, 0));
        let queen = pawn.promoted(PieceKind::Queen);
        assert_eq!(queen.kind(), PieceKind::Queen);
        assert_eq!(queen.color(), Color::Black);
        assert!(queen.has_moved());
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", Piece::new(PieceKind::Knight, Color::White)), "WN");
        assert_eq!(format!("{:?}", Piece::new(PieceKind::Queen, Color::Black)), "BQ");
    }
}
