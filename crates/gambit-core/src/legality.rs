//! The legality filter.
//!
//! A candidate move is played on a clone of the grid and rejected if the
//! mover's king is then attacked. The clone is dropped straight after.

use crate::board::Board;
use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::movegen::{Targets, candidate_moves, classify, is_attacked};
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Return `true` if playing `mv` does not leave the mover's king attacked.
///
/// Also rejects any move onto the opposing king, and a castle whose
/// passed-over square is attacked (tested as the one-step king move).
pub fn keeps_king_safe(board: &Board, mv: Move) -> bool {
    let Some(piece) = board.piece_at(mv.from()) else {
        return false;
    };
    let color = piece.color();

    if let Some(target) = board.piece_at(mv.to())
        && target.kind() == PieceKind::King
        && target.is_enemy_of(color)
    {
        return false;
    }

    if let Some(side) = mv.castle_side() {
        let Some(step) = board.offset(mv.from(), side.direction(), 0) else {
            return false;
        };
        if !survives(board, Move::new(mv.from(), step, MoveKind::Normal, false), color) {
            return false;
        }
    }

    survives(board, mv, color)
}

fn survives(board: &Board, mv: Move, color: Color) -> bool {
    let mut scratch = board.clone();
    if scratch.execute(mv).is_err() {
        return false;
    }
    // A side without a king cannot be checked.
    match scratch.king_square(color) {
        Some(king) => !is_attacked(&scratch, king, !color),
        None => true,
    }
}

/// Candidate destinations of the piece on `sq` that pass the filter.
pub fn legal_destinations(board: &Board, sq: Square) -> Targets {
    candidate_moves(board, sq)
        .into_iter()
        .filter(|&to| classify(board, sq, to, PieceKind::Queen).is_some_and(|mv| keeps_king_safe(board, mv)))
        .collect()
}

/// Return `true` if `color`'s king is attacked.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    board
        .king_square(color)
        .is_some_and(|king| is_attacked(board, king, !color))
}

/// Return `true` if any piece of `color` has a legal destination.
pub fn has_legal_move(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .any(|(sq, _)| !legal_destinations(board, sq).is_empty())
}
