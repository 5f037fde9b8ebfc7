//! The square grid: a flat array of optional occupants indexed by (file, rank).

use std::fmt;

use crate::color::Color;
use crate::config::Dimensions;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::{Square, file_letters};

/// Back rank layout from file a to file h.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece placement on a rectangular board.
///
/// Cloning copies the flat cell array, so a clone shares nothing with the
/// original. The legality filter relies on this to simulate moves.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    dims: Dimensions,
    /// Rank-major: index = rank * files + file.
    cells: Vec<Option<Piece>>,
}

impl Board {
    /// An empty board.
    pub fn empty(dims: Dimensions) -> Board {
        Board {
            dims,
            cells: vec![None; dims.area()],
        }
    }

    /// The standard starting layout. Boards wider than eight files get pawns
    /// across the full width and empty back-rank squares past file h.
    pub fn starting(dims: Dimensions) -> Board {
        let mut board = Board::empty(dims);
        for color in Color::ALL {
            let back = color.back_rank(dims.ranks());
            let pawns = color.pawn_rank(dims.ranks());
            for (file, kind) in BACK_RANK.into_iter().enumerate() {
                board.set(Square::new(file as u8, back), Piece::new(kind, color));
            }
            for file in 0..dims.files() {
                board.set(Square::new(file, pawns), Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }

    /// Return the board size.
    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    #[inline]
    pub fn files(&self) -> u8 {
        self.dims.files()
    }

    #[inline]
    pub fn ranks(&self) -> u8 {
        self.dims.ranks()
    }

    /// Look up a coordinate, returning `None` when it falls off the board.
    ///
    /// Ray and step generation walk off the edge freely and stop on `None`.
    #[inline]
    pub fn square(&self, file: i32, rank: i32) -> Option<Square> {
        if (0..self.files() as i32).contains(&file) && (0..self.ranks() as i32).contains(&rank) {
            Some(Square::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Step from `sq` by a file and rank delta.
    #[inline]
    pub fn offset(&self, sq: Square, df: i32, dr: i32) -> Option<Square> {
        self.square(sq.file() as i32 + df, sq.rank() as i32 + dr)
    }

    /// Return `true` if `sq` lies on this board.
    #[inline]
    pub fn contains(&self, sq: Square) -> bool {
        sq.file() < self.files() && sq.rank() < self.ranks()
    }

    #[inline]
    fn index(&self, sq: Square) -> Option<usize> {
        self.contains(sq)
            .then(|| sq.rank() as usize * self.files() as usize + sq.file() as usize)
    }

    /// Return the occupant of `sq`, if any. Off-board squares are empty.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.index(sq).and_then(|i| self.cells[i])
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, sq: Square) -> Option<&mut Piece> {
        let i = self.index(sq)?;
        self.cells[i].as_mut()
    }

    /// Return `true` if `sq` is on the board and holds no piece.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.contains(sq) && self.piece_at(sq).is_none()
    }

    /// Place `piece` on `sq`, returning the previous occupant. Off-board is a no-op.
    pub fn set(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        let i = self.index(sq)?;
        self.cells[i].replace(piece)
    }

    /// Empty `sq`, returning its occupant.
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        let i = self.index(sq)?;
        self.cells[i].take()
    }

    /// Iterate over all squares, rank by rank from rank 1.
    pub fn squares(&self) -> impl Iterator<Item = Square> + use<> {
        let (files, ranks) = (self.files(), self.ranks());
        (0..ranks).flat_map(move |rank| (0..files).map(move |file| Square::new(file, rank)))
    }

    /// Iterate over every occupied square and its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares()
            .filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Iterate over the pieces of one side.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color() == color)
    }

    /// Return the square of `color`'s king, or `None` if it has none.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind() == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Clear the last-move marker of every piece on `color`'s side.
    pub(crate) fn clear_last_moves(&mut self, color: Color) {
        for piece in self.cells.iter_mut().flatten() {
            if piece.color() == color {
                piece.clear_last_move();
            }
        }
    }

    /// Return a pretty-printable wrapper for this board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({}x{})\n{}", self.files(), self.ranks(), self.pretty())
    }
}

/// Wrapper for pretty-printing a board as a grid, top rank first.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        let label_width = board.ranks().to_string().len();
        for rank in (0..board.ranks()).rev() {
            write!(f, "{:>label_width$}  ", rank as u32 + 1)?;
            let row: Vec<String> = (0..board.files())
                .map(|file| match board.piece_at(Square::new(file, rank)) {
                    Some(piece) => piece.fen_char().to_string(),
                    None => ".".to_string(),
                })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        let footer: Vec<String> = (0..board.files()).map(file_letters).collect();
        write!(f, "{:label_width$}  {}", "", footer.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::color::Color;
    use crate::config::Dimensions;
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn starting_layout() {
        let board = Board::starting(Dimensions::STANDARD);
        assert_eq!(board.piece_at(sq("e1")), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(board.piece_at(sq("d8")), Some(Piece::new(PieceKind::Queen, Color::Black)));
        assert_eq!(board.piece_at(sq("a1")).unwrap().kind(), PieceKind::Rook);
        assert_eq!(board.piece_at(sq("g8")).unwrap().kind(), PieceKind::Knight);
        assert_eq!(board.piece_at(sq("e2")).unwrap().kind(), PieceKind::Pawn);
        assert_eq!(board.piece_at(sq("e4")), None);
        assert_eq!(board.pieces().count(), 32);
    }

    #[test]
    fn wide_board_has_full_pawn_rows() {
        let board = Board::starting(Dimensions::new(10, 8).unwrap());
        assert_eq!(board.pieces_of(Color::White).count(), 18);
        assert_eq!(board.piece_at(sq("j2")).unwrap().kind(), PieceKind::Pawn);
        assert_eq!(board.piece_at(sq("j1")), None);
    }

    #[test]
    fn out_of_range_lookup_is_none() {
        let board = Board::starting(Dimensions::STANDARD);
        assert_eq!(board.square(-1, 0), None);
        assert_eq!(board.square(0, 8), None);
        assert_eq!(board.square(8, 3), None);
        assert_eq!(board.square(7, 7), Some(sq("h8")));
        assert_eq!(board.offset(sq("h4"), 1, 0), None);
        assert_eq!(board.piece_at(Square::new(9, 9)), None);
    }

    #[test]
    fn king_square() {
        let board = Board::starting(Dimensions::STANDARD);
        assert_eq!(board.king_square(Color::White), Some(sq("e1")));
        assert_eq!(board.king_square(Color::Black), Some(sq("e8")));
        assert_eq!(Board::empty(Dimensions::STANDARD).king_square(Color::White), None);
    }

    #[test]
    fn set_and_take() {
        let mut board = Board::empty(Dimensions::STANDARD);
        let rook = Piece::new(PieceKind::Rook, Color::Black);
        assert_eq!(board.set(sq("c3"), rook), None);
        assert_eq!(board.piece_at(sq("c3")), Some(rook));
        assert_eq!(board.take(sq("c3")), Some(rook));
        assert!(board.is_empty(sq("c3")));
        assert_eq!(board.set(Square::new(8, 0), rook), None);
        assert_eq!(board.pieces().count(), 0);
    }

    #[test]
    fn clone_is_independent() {
        let original = Board::starting(Dimensions::STANDARD);
        let mut copy = original.clone();
        copy.take(sq("e2"));
        assert!(copy.is_empty(sq("e2")));
        assert!(!original.is_empty(sq("e2")));
    }

    #[test]
    fn clear_last_moves_only_touches_one_side() {
        let mut board = Board::starting(Dimensions::STANDARD);
        board.piece_mut(sq("e2")).unwrap().record_move(sq("e2"), sq("e2"));
        board.piece_mut(sq("e7")).unwrap().record_move(sq("e7"), sq("e7"));
        board.clear_last_moves(Color::White);
        assert_eq!(board.piece_at(sq("e2")).unwrap().last_move(), None);
        assert!(board.piece_at(sq("e7")).unwrap().last_move().is_some());
    }

    #[test]
    fn pretty_print() {
        let board = Board::starting(Dimensions::STANDARD);
        let output = format!("{}", board.pretty());
        assert!(output.contains("r n b q k b n r"));
        assert!(output.contains("R N B Q K B N R"));
        assert!(output.contains("a b c d e f g h"));
    }
}
