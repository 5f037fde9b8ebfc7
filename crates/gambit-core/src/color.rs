//! The two sides of a match.

use std::fmt;
use std::ops::Not;

/// A side slot: `White` moves first, `Black` second.
///
/// Slots are independent of the team identity playing them; see
/// [`TeamPair`](crate::TeamPair) for the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Total number of colors.
    pub const COUNT: usize = 2;

    /// All colors in index order.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Return the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Return the opposite color.
    #[inline]
    pub const fn flip(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a single pawn step: +1 for White, -1 for Black.
    #[inline]
    pub const fn forward(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The back rank this side starts on, for a board with `ranks` ranks.
    #[inline]
    pub const fn back_rank(self, ranks: u8) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => ranks - 1,
        }
    }

    /// The rank this side's pawns start on.
    #[inline]
    pub const fn pawn_rank(self, ranks: u8) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => ranks - 2,
        }
    }

    /// The rank a pawn of this side lands on after its double push.
    ///
    /// An opposing pawn may only capture it en passant while it stands here.
    #[inline]
    pub const fn double_push_rank(self, ranks: u8) -> u8 {
        match self {
            Color::White => 3,
            Color::Black => ranks - 4,
        }
    }

    /// The rank on which pawns of this side promote.
    #[inline]
    pub const fn promotion_rank(self, ranks: u8) -> u8 {
        self.flip().back_rank(ranks)
    }
}

impl Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.flip()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "w"),
            Color::Black => write!(f, "b"),
        }
    }
}
