//! King steps and castling.

use crate::board::Board;
use crate::castle_rights::{CastleSide, castling_rook};
use crate::piece::Piece;
use crate::square::Square;

use super::knights::push_steps;
use super::{Targets, is_attacked};

const KING_STEPS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub(super) fn gen_king_steps(board: &Board, sq: Square, piece: Piece, targets: &mut Targets) {
    push_steps(board, sq, piece, &KING_STEPS, targets);
}

/// Add the two-file king moves for each side the king may castle toward.
///
/// Requires an unmoved king that is not in check and an unmoved rook with
/// only empty squares between the two. The rook must stand beyond the king's
/// destination so it can land on the square the king passed over. Whether
/// the passed-over square is attacked is left to the legality filter.
pub(super) fn gen_castles(board: &Board, sq: Square, piece: Piece, targets: &mut Targets) {
    let color = piece.color();
    if board.king_square(color) != Some(sq) || is_attacked(board, sq, !color) {
        return;
    }
    for side in CastleSide::ALL {
        let Some(rook_sq) = castling_rook(board, color, side) else {
            continue;
        };
        if rook_sq.file().abs_diff(sq.file()) <= 2 || !clear_between(board, sq, rook_sq) {
            continue;
        }
        if let Some(dest) = board.offset(sq, 2 * side.direction(), 0) {
            targets.push(dest);
        }
    }
}

/// Return `true` if every square strictly between two squares on one rank is empty.
fn clear_between(board: &Board, a: Square, b: Square) -> bool {
    let (lo, hi) = if a.file() < b.file() { (a.file(), b.file()) } else { (b.file(), a.file()) };
    (lo + 1..hi).all(|file| board.is_empty(Square::new(file, a.rank())))
}
