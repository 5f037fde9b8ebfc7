//! Sliding piece (bishop, rook, queen) generation.

use crate::board::Board;
use crate::piece::Piece;
use crate::square::Square;

use super::Targets;

pub(super) const DIAGONALS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(super) const ORTHOGONALS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Walk each ray from `sq` until the edge or the first occupied square.
/// The blocker is included only when it belongs to the opponent.
pub(super) fn gen_slider(
    board: &Board,
    sq: Square,
    piece: Piece,
    rays: &[(i32, i32)],
    targets: &mut Targets,
) {
    for &(df, dr) in rays {
        let mut cursor = sq;
        while let Some(next) = board.offset(cursor, df, dr) {
            match board.piece_at(next) {
                None => targets.push(next),
                Some(blocker) => {
                    if blocker.is_enemy_of(piece.color()) {
                        targets.push(next);
                    }
                    break;
                }
            }
            cursor = next;
        }
    }
}
