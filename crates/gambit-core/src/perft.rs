//! Perft: count leaf nodes of the legal move tree to check move generation.

use crate::position::Position;

/// Count the leaf nodes `depth` plies below `position`.
///
/// Depth 0 is the position itself. At depth 1 the legal moves are counted
/// without being played.
pub fn perft(position: &Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = position.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mv| perft(&position.make_move(mv), depth - 1))
        .sum()
}

/// Perft split by root move, as `(coordinate_move, node_count)` pairs sorted by move.
pub fn divide(position: &Position, depth: usize) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = position
        .legal_moves()
        .into_iter()
        .map(|mv| {
            let count = perft(&position.make_move(mv), depth.saturating_sub(1));
            (mv.to_string(), count)
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
