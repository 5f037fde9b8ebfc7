//! Moves and move requests.

use std::fmt;

use crate::castle_rights::CastleSide;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// The category of a move, derived from the board when the move is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// A quiet move or an ordinary capture.
    Normal,
    /// The king moves two files and the rook jumps over it.
    Castle(CastleSide),
    /// A pawn captures the pawn that just double-pushed past it.
    EnPassant,
    /// A pawn reaches the far rank and becomes the given kind.
    Promotion(PieceKind),
}

/// A classified move: source, destination and the derived flags.
///
/// Moves are transient; they are built by [`classify`](crate::classify) from a
/// board and a (source, destination) pair and discarded after the apply.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    kind: MoveKind,
    capture: bool,
}

impl Move {
    /// Create a move. `capture` is true when a piece is removed, en passant included.
    pub const fn new(from: Square, to: Square, kind: MoveKind, capture: bool) -> Move {
        Move {
            from,
            to,
            kind,
            capture,
        }
    }

    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    #[inline]
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    /// Return `true` if the move removes an opposing piece.
    #[inline]
    pub const fn is_capture(self) -> bool {
        self.capture
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self.kind, MoveKind::Castle(_))
    }

    /// The side castled toward, if this is a castle.
    #[inline]
    pub const fn castle_side(self) -> Option<CastleSide> {
        match self.kind {
            MoveKind::Castle(side) => Some(side),
            _ => None,
        }
    }

    /// The promoted-to kind, if this is a promotion.
    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion(kind) => Some(kind),
            _ => None,
        }
    }

    /// The same move promoting to `kind` instead. Non-promotions are returned unchanged.
    pub(crate) fn with_promotion(self, kind: PieceKind) -> Move {
        match self.kind {
            MoveKind::Promotion(_) => Move {
                kind: MoveKind::Promotion(kind),
                ..self
            },
            _ => self,
        }
    }

    /// The request that reproduces this move.
    pub fn request(self) -> MoveRequest {
        MoveRequest::new(self.from, self.to).with_promotion(self.promotion())
    }
}

impl fmt::Display for Move {
    /// Coordinate form: `e2e4`, `e7e8q`, `aa2aa4`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion() {
            write!(f, "{}", kind.fen_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} kind={:?}", self, self.kind)?;
        if self.capture {
            write!(f, " capture")?;
        }
        write!(f, ")")
    }
}

/// A move as a collaborator asks for it: raw coordinates plus an optional
/// promotion choice. Coordinates may be off the board; resolving such a
/// request simply finds no square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRequest {
    pub from_file: i32,
    pub from_rank: i32,
    pub to_file: i32,
    pub to_rank: i32,
    /// Promotion choice; queen when absent.
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    /// Request a move between two squares.
    pub fn new(from: Square, to: Square) -> MoveRequest {
        MoveRequest {
            from_file: from.file() as i32,
            from_rank: from.rank() as i32,
            to_file: to.file() as i32,
            to_rank: to.rank() as i32,
            promotion: None,
        }
    }

    /// Attach a promotion choice.
    pub fn with_promotion(mut self, promotion: Option<PieceKind>) -> MoveRequest {
        self.promotion = promotion;
        self
    }

    /// Parse coordinate notation such as `e2e4`, `e7e8n` or `aa2aa4`.
    pub fn parse_coordinate(s: &str) -> Option<MoveRequest> {
        let (from, rest) = split_square(s)?;
        let (to, rest) = split_square(rest)?;
        let promotion = match rest {
            "" => None,
            _ => {
                let mut chars = rest.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                Some(PieceKind::from_fen_char(c)?)
            }
        };
        Some(MoveRequest::new(from, to).with_promotion(promotion))
    }

    /// Human-readable coordinates, used in error messages and logs.
    pub(crate) fn describe(&self) -> (String, String) {
        (
            describe_coordinate(self.from_file, self.from_rank),
            describe_coordinate(self.to_file, self.to_rank),
        )
    }
}

/// Split one square name (letters then digits) off the front of `s`.
fn split_square(s: &str) -> Option<(Square, &str)> {
    let letters = s.find(|c: char| !c.is_ascii_lowercase())?;
    let digits = s[letters..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |n| letters + n);
    let square = Square::from_algebraic(&s[..digits])?;
    Some((square, &s[digits..]))
}

fn describe_coordinate(file: i32, rank: i32) -> String {
    match (u8::try_from(file), u8::try_from(rank)) {
        (Ok(file), Ok(rank)) => Square::new(file, rank).to_string(),
        _ => format!("({file},{rank})"),
    }
}
