//! Pseudo-legal move generation.
//!
//! Every generator reads the board and writes into a caller-owned
//! [`Targets`] buffer, clearing it first, so repeated calls on the same
//! board always produce the same set. Generators never check whether the
//! mover's own king ends up attacked; that is the legality filter's job.

mod king;
mod knights;
mod pawns;
mod sliders;

use smallvec::SmallVec;

use crate::board::Board;
use crate::castle_rights::CastleSide;
use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Destination squares of a single piece. A queen in the middle of an
/// 8x8 board reaches 27 squares, so 32 stays inline for standard play.
pub type Targets = SmallVec<[Square; 32]>;

/// Destinations reachable by the piece on `sq`, ignoring king safety and
/// castling. Empty if `sq` holds no piece.
pub fn pseudo_legal_moves(board: &Board, sq: Square) -> Targets {
    let mut targets = Targets::new();
    fill_pseudo_legal(board, sq, &mut targets);
    targets
}

/// Rebuild `targets` with the pseudo-legal destinations of the piece on `sq`.
pub fn fill_pseudo_legal(board: &Board, sq: Square, targets: &mut Targets) {
    targets.clear();
    let Some(piece) = board.piece_at(sq) else {
        return;
    };
    match piece.kind() {
        PieceKind::Pawn => pawns::gen_pawn(board, sq, piece, targets),
        PieceKind::Knight => knights::gen_knight(board, sq, piece, targets),
        PieceKind::Bishop => sliders::gen_slider(board, sq, piece, &sliders::DIAGONALS, targets),
        PieceKind::Rook => sliders::gen_slider(board, sq, piece, &sliders::ORTHOGONALS, targets),
        PieceKind::Queen => {
            sliders::gen_slider(board, sq, piece, &sliders::DIAGONALS, targets);
            sliders::gen_slider(board, sq, piece, &sliders::ORTHOGONALS, targets);
        }
        PieceKind::King => king::gen_king_steps(board, sq, piece, targets),
    }
}

/// Pseudo-legal destinations plus castling destinations for a king.
///
/// Castling needs the whole board (check status, rook history), so it is
/// kept out of [`pseudo_legal_moves`], which attack detection relies on.
pub fn candidate_moves(board: &Board, sq: Square) -> Targets {
    let mut targets = pseudo_legal_moves(board, sq);
    if let Some(piece) = board.piece_at(sq)
        && piece.kind() == PieceKind::King
    {
        king::gen_castles(board, sq, piece, &mut targets);
    }
    targets
}

/// Return `true` if any piece of `by` has `target` in its pseudo-legal set.
pub fn is_attacked(board: &Board, target: Square, by: Color) -> bool {
    let mut scratch = Targets::new();
    board.pieces_of(by).any(|(sq, _)| {
        fill_pseudo_legal(board, sq, &mut scratch);
        scratch.contains(&target)
    })
}

/// Derive the flags of a (source, destination) pair from the board.
///
/// A king moving two files is a castle. A pawn moving diagonally onto an
/// empty square is en passant. A pawn arriving on its promotion rank promotes
/// to `promotion`. Returns `None` if `from` is empty.
pub fn classify(board: &Board, from: Square, to: Square, promotion: PieceKind) -> Option<Move> {
    let piece = board.piece_at(from)?;
    let target = board.piece_at(to);
    let df = to.file() as i32 - from.file() as i32;

    let mv = match piece.kind() {
        PieceKind::King if df.abs() == 2 && from.rank() == to.rank() => {
            let side = if df > 0 {
                CastleSide::KingSide
            } else {
                CastleSide::QueenSide
            };
            Move::new(from, to, MoveKind::Castle(side), false)
        }
        PieceKind::Pawn if df != 0 && target.is_none() => Move::new(from, to, MoveKind::EnPassant, true),
        PieceKind::Pawn if to.rank() == piece.color().promotion_rank(board.ranks()) => {
            Move::new(from, to, MoveKind::Promotion(promotion), target.is_some())
        }
        _ => Move::new(from, to, MoveKind::Normal, target.is_some()),
    };
    Some(mv)
}

#[cfg(test)]
mod tests {
    use super::{candidate_moves, classify, is_attacked, pseudo_legal_moves};
    use crate::board::Board;
    use crate::castle_rights::CastleSide;
    use crate::chess_move::MoveKind;
    use crate::color::Color;
    use crate::config::Dimensions;
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn sorted(mut squares: Vec<Square>) -> Vec<Square> {
        squares.sort();
        squares
    }

    fn names(board: &Board, from: &str) -> Vec<Square> {
        sorted(pseudo_legal_moves(board, sq(from)).to_vec())
    }

    fn squares(list: &[&str]) -> Vec<Square> {
        sorted(list.iter().map(|s| sq(s)).collect())
    }

    fn place(board: &mut Board, at: &str, kind: PieceKind, color: Color) {
        board.set(sq(at), Piece::new(kind, color));
    }

    #[test]
    fn starting_knight_and_pawn() {
        let board = Board::starting(Dimensions::STANDARD);
        assert_eq!(names(&board, "g1"), squares(&["f3", "h3"]));
        assert_eq!(names(&board, "e2"), squares(&["e3", "e4"]));
        assert_eq!(names(&board, "e7"), squares(&["e6", "e5"]));
        assert!(names(&board, "a1").is_empty());
        assert!(names(&board, "e4").is_empty());
    }

    #[test]
    fn rays_stop_independently() {
        let mut board = Board::empty(Dimensions::STANDARD);
        place(&mut board, "d4", PieceKind::Bishop, Color::White);
        place(&mut board, "f6", PieceKind::Pawn, Color::Black);
        place(&mut board, "b2", PieceKind::Pawn, Color::White);
        let targets = names(&board, "d4");
        // Up-right stops on the capture; down-left stops before the own pawn.
        assert!(targets.contains(&sq("f6")));
        assert!(!targets.contains(&sq("g7")));
        assert!(targets.contains(&sq("c3")));
        assert!(!targets.contains(&sq("b2")));
        // The other two rays are unaffected.
        assert!(targets.contains(&sq("a7")));
        assert!(targets.contains(&sq("g1")));
        assert_eq!(targets.len(), 9);
    }

    #[test]
    fn queen_combines_both_ray_sets() {
        let mut board = Board::empty(Dimensions::STANDARD);
        place(&mut board, "d4", PieceKind::Queen, Color::White);
        assert_eq!(names(&board, "d4").len(), 27);
        place(&mut board, "a1", PieceKind::Rook, Color::Black);
        assert_eq!(names(&board, "a1").len(), 14);
    }

    #[test]
    fn knight_in_corner() {
        let mut board = Board::empty(Dimensions::STANDARD);
        place(&mut board, "a1", PieceKind::Knight, Color::Black);
        place(&mut board, "c2", PieceKind::Pawn, Color::Black);
        assert_eq!(names(&board, "a1"), squares(&["b3"]));
    }

    #[test]
    fn pawn_blocked_and_capturing() {
        let mut board = Board::empty(Dimensions::STANDARD);
        place(&mut board, "e2", PieceKind::Pawn, Color::White);
        place(&mut board, "e4", PieceKind::Knight, Color::Black);
        place(&mut board, "d3", PieceKind::Rook, Color::Black);
        place(&mut board, "f3", PieceKind::Rook, Color::White);
        assert_eq!(names(&board, "e2"), squares(&["e3", "d3"]));
        place(&mut board, "e3", PieceKind::Knight, Color::Black);
        assert_eq!(names(&board, "e2"), squares(&["d3"]));
    }

    #[test]
    fn generation_is_idempotent() {
        let board = Board::starting(Dimensions::STANDARD);
        for (from, _) in board.pieces() {
            assert_eq!(pseudo_legal_moves(&board, from), pseudo_legal_moves(&board, from));
        }
    }

    #[test]
    fn castling_candidates_on_open_back_rank() {
        let mut board = Board::empty(Dimensions::STANDARD);
        place(&mut board, "e1", PieceKind::King, Color::White);
        place(&mut board, "a1", PieceKind::Rook, Color::White);
        place(&mut board, "h1", PieceKind::Rook, Color::White);
        place(&mut board, "e8", PieceKind::King, Color::Black);
        let targets = candidate_moves(&board, sq("e1"));
        assert!(targets.contains(&sq("g1")));
        assert!(targets.contains(&sq("c1")));
        assert!(!pseudo_legal_moves(&board, sq("e1")).contains(&sq("g1")));
    }

    #[test]
    fn no_castling_when_blocked_or_in_check() {
        let mut board = Board::starting(Dimensions::STANDARD);
        assert!(!candidate_moves(&board, sq("e1")).contains(&sq("g1")));

        board.take(sq("f1"));
        board.take(sq("g1"));
        assert!(candidate_moves(&board, sq("e1")).contains(&sq("g1")));

        board.take(sq("e2"));
        place(&mut board, "e5", PieceKind::Rook, Color::Black);
        assert!(!candidate_moves(&board, sq("e1")).contains(&sq("g1")));
    }

    #[test]
    fn attack_detection() {
        let mut board = Board::empty(Dimensions::STANDARD);
        place(&mut board, "a8", PieceKind::Rook, Color::Black);
        place(&mut board, "c4", PieceKind::Pawn, Color::White);
        assert!(is_attacked(&board, sq("a1"), Color::Black));
        assert!(is_attacked(&board, sq("h8"), Color::Black));
        assert!(!is_attacked(&board, sq("b7"), Color::Black));
        // Diagonal pawn captures count as attacks.
        place(&mut board, "d5", PieceKind::Knight, Color::Black);
        assert!(is_attacked(&board, sq("d5"), Color::White));
    }

    #[test]
    fn classification() {
        let mut board = Board::empty(Dimensions::STANDARD);
        place(&mut board, "e1", PieceKind::King, Color::White);
        place(&mut board, "b7", PieceKind::Pawn, Color::White);
        place(&mut board, "a8", PieceKind::Rook, Color::Black);
        place(&mut board, "e5", PieceKind::Pawn, Color::White);

        let castle = classify(&board, sq("e1"), sq("c1"), PieceKind::Queen).unwrap();
        assert_eq!(castle.kind(), MoveKind::Castle(CastleSide::QueenSide));

        let promo = classify(&board, sq("b7"), sq("a8"), PieceKind::Knight).unwrap();
        assert_eq!(promo.kind(), MoveKind::Promotion(PieceKind::Knight));
        assert!(promo.is_capture());

        let ep = classify(&board, sq("e5"), sq("d6"), PieceKind::Queen).unwrap();
        assert!(ep.is_en_passant());
        assert!(ep.is_capture());

        let quiet = classify(&board, sq("e5"), sq("e6"), PieceKind::Queen).unwrap();
        assert_eq!(quiet.kind(), MoveKind::Normal);
        assert!(!quiet.is_capture());

        assert!(classify(&board, sq("d4"), sq("d5"), PieceKind::Queen).is_none());
    }
}
