//! Knight generation.

use crate::board::Board;
use crate::piece::Piece;
use crate::square::Square;

use super::Targets;

const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(super) fn gen_knight(board: &Board, sq: Square, piece: Piece, targets: &mut Targets) {
    push_steps(board, sq, piece, &KNIGHT_JUMPS, targets);
}

/// Push every in-bounds offset that is empty or holds an opponent.
pub(super) fn push_steps(
    board: &Board,
    sq: Square,
    piece: Piece,
    offsets: &[(i32, i32)],
    targets: &mut Targets,
) {
    for &(df, dr) in offsets {
        let Some(dest) = board.offset(sq, df, dr) else {
            continue;
        };
        match board.piece_at(dest) {
            Some(other) if !other.is_enemy_of(piece.color()) => {}
            _ => targets.push(dest),
        }
    }
}
