//! Castling rights as a 4-bit field, derived from piece history on the board.

use std::fmt;
use std::ops::{BitAnd, BitOr};

use crate::board::Board;
use crate::color::Color;
use crate::error::SnapshotError;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Which side of the board to castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    /// File delta pointing from the king toward the castling rook.
    #[inline]
    pub const fn direction(self) -> i32 {
        match self {
            CastleSide::KingSide => 1,
            CastleSide::QueenSide => -1,
        }
    }

    /// Notation for a castle toward this side.
    #[inline]
    pub const fn notation(self) -> &'static str {
        match self {
            CastleSide::KingSide => "O-O",
            CastleSide::QueenSide => "O-O-O",
        }
    }
}

/// Castling rights encoded as a 4-bit field: bit 0 = WK, 1 = WQ, 2 = BK, 3 = BQ.
///
/// Rights are never stored alongside the board. They are read off the pieces:
/// a side keeps a right while its king and a rook outward from it on the
/// back rank have both never moved.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const NONE: CastleRights = CastleRights(0);
    pub const ALL: CastleRights = CastleRights(0b1111);

    pub const WHITE_KING: CastleRights = CastleRights(0b0001);
    pub const WHITE_QUEEN: CastleRights = CastleRights(0b0010);
    pub const BLACK_KING: CastleRights = CastleRights(0b0100);
    pub const BLACK_QUEEN: CastleRights = CastleRights(0b1000);

    /// Return `true` if no castling rights remain.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: CastleRights) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn insert(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }

    /// Check whether a specific color and side can castle.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.contains(Self::flag(color, side))
    }

    /// Return the single-bit flag for a color and side.
    #[inline]
    pub const fn flag(color: Color, side: CastleSide) -> CastleRights {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => Self::WHITE_KING,
            (Color::White, CastleSide::QueenSide) => Self::WHITE_QUEEN,
            (Color::Black, CastleSide::KingSide) => Self::BLACK_KING,
            (Color::Black, CastleSide::QueenSide) => Self::BLACK_QUEEN,
        }
    }

    /// The snapshot character for a flag.
    pub const fn flag_char(color: Color, side: CastleSide) -> char {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => 'K',
            (Color::White, CastleSide::QueenSide) => 'Q',
            (Color::Black, CastleSide::KingSide) => 'k',
            (Color::Black, CastleSide::QueenSide) => 'q',
        }
    }

    /// Read the rights implied by piece history on `board`.
    pub fn from_board(board: &Board) -> CastleRights {
        let mut rights = CastleRights::NONE;
        for color in Color::ALL {
            for side in CastleSide::ALL {
                if castling_rook(board, color, side).is_some() {
                    rights = rights.insert(Self::flag(color, side));
                }
            }
        }
        rights
    }

    /// Parse the snapshot castling field (e.g. "KQkq", "Kq", "-").
    pub fn from_field(s: &str) -> Result<CastleRights, SnapshotError> {
        if s == "-" {
            return Ok(CastleRights::NONE);
        }

        let mut rights = CastleRights::NONE;
        for c in s.chars() {
            let flag = match c {
                'K' => Self::WHITE_KING,
                'Q' => Self::WHITE_QUEEN,
                'k' => Self::BLACK_KING,
                'q' => Self::BLACK_QUEEN,
                _ => return Err(SnapshotError::InvalidCastlingChar { character: c }),
            };
            rights = rights.insert(flag);
        }
        Ok(rights)
    }

    /// Serialize to the snapshot castling field.
    pub fn to_field(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        let mut s = String::with_capacity(4);
        for color in Color::ALL {
            for side in CastleSide::ALL {
                if self.has(color, side) {
                    s.push(Self::flag_char(color, side));
                }
            }
        }
        s
    }
}

/// Find the rook `color` would castle with toward `side`.
///
/// The king must be unmoved and on its back rank, and an unmoved rook of
/// the same side must stand somewhere outward from it along that rank.
/// Pieces in between do not remove the right; they only block the castle.
pub fn castling_rook(board: &Board, color: Color, side: CastleSide) -> Option<Square> {
    let king_sq = board.king_square(color)?;
    let king = board.piece_at(king_sq)?;
    if king.has_moved() || king_sq.rank() != color.back_rank(board.ranks()) {
        return None;
    }
    unmoved_rook_outward(board, king_sq, side, color)
}

/// The nearest unmoved rook of `color` along the rank from `from` toward `side`.
pub(crate) fn unmoved_rook_outward(
    board: &Board,
    from: Square,
    side: CastleSide,
    color: Color,
) -> Option<Square> {
    let mut cursor = from;
    loop {
        cursor = board.offset(cursor, side.direction(), 0)?;
        if let Some(piece) = board.piece_at(cursor)
            && piece.kind() == PieceKind::Rook
            && piece.color() == color
            && !piece.has_moved()
        {
            return Some(cursor);
        }
    }
}

impl BitAnd for CastleRights {
    type Output = CastleRights;
    #[inline]
    fn bitand(self, rhs: CastleRights) -> CastleRights {
        CastleRights(self.0 & rhs.0)
    }
}

impl BitOr for CastleRights {
    type Output = CastleRights;
    #[inline]
    fn bitor(self, rhs: CastleRights) -> CastleRights {
        CastleRights(self.0 | rhs.0)
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_field())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({})", self.to_field())
    }
}
