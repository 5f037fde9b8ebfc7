//! Pawn generation, including en passant.

use crate::board::Board;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use super::Targets;

pub(super) fn gen_pawn(board: &Board, sq: Square, piece: Piece, targets: &mut Targets) {
    let color = piece.color();
    let forward = color.forward();

    if let Some(one) = board.offset(sq, 0, forward)
        && board.is_empty(one)
    {
        targets.push(one);
        if sq.rank() == color.pawn_rank(board.ranks())
            && let Some(two) = board.offset(sq, 0, 2 * forward)
            && board.is_empty(two)
        {
            targets.push(two);
        }
    }

    for df in [-1, 1] {
        let Some(diagonal) = board.offset(sq, df, forward) else {
            continue;
        };
        match board.piece_at(diagonal) {
            Some(other) if other.is_enemy_of(color) => targets.push(diagonal),
            Some(_) => {}
            None => {
                if en_passant_victim(board, sq, df, color).is_some() {
                    targets.push(diagonal);
                }
            }
        }
    }
}

/// The opposing pawn a pawn of `color` on `sq` could take en passant toward
/// file delta `df`.
///
/// The victim stands directly beside `sq`, is still on its double-push rank,
/// and its last move was the double push that put it there. Markers are
/// cleared when their side next moves, so this only holds for one ply.
fn en_passant_victim(board: &Board, sq: Square, df: i32, color: Color) -> Option<Square> {
    let beside = board.offset(sq, df, 0)?;
    let victim = board.piece_at(beside)?;
    let last = victim.last_move()?;
    let eligible = victim.kind() == PieceKind::Pawn
        && victim.is_enemy_of(color)
        && last.is_double_step()
        && last.to == beside
        && beside.rank() == victim.color().double_push_rank(board.ranks());
    eligible.then_some(beside)
}
