//! Algebraic move notation and game transcripts.

use std::fmt::Write;

use crate::chess_move::Move;
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::position::{Position, Status};
use crate::square::file_letters;

/// Notation for `mv`, played from `before` and leading to `status` for the
/// side then to move.
///
/// Piece letter (none for pawns), origin file for pawn captures, `x` on
/// capture, destination, `=Q` on promotion, ` e.p.` on en passant, then `+`
/// or `#`. Castles render as `O-O` and `O-O-O`. Returns an empty string if
/// `before` has no piece on the source square.
pub fn notate(before: &Position, mv: Move, status: Status) -> String {
    let Some(piece) = before.board().piece_at(mv.from()) else {
        return String::new();
    };

    let mut text = String::new();
    if let Some(side) = mv.castle_side() {
        text.push_str(side.notation());
    } else {
        text.push_str(piece.kind().notation());
        if mv.is_capture() {
            if piece.kind() == PieceKind::Pawn {
                text.push_str(&file_letters(mv.from().file()));
            }
            text.push('x');
        }
        let _ = write!(text, "{}", mv.to());
        if let Some(kind) = mv.promotion() {
            text.push('=');
            text.push_str(kind.notation());
        }
        if mv.is_en_passant() {
            text.push_str(" e.p.");
        }
    }

    match status {
        Status::Checkmate => text.push('#'),
        Status::Check => text.push('+'),
        Status::Ongoing | Status::Stalemate => {}
    }
    text
}

/// Number moves per full move: `1. e4 e5 2. Nf3`.
///
/// `first_move` and `first_side` say where the sequence starts; a sequence
/// starting with Black opens with `N...`. The result token, if any, is
/// appended last.
pub fn transcript<'a>(
    first_move: u16,
    first_side: Color,
    moves: impl IntoIterator<Item = &'a str>,
    result: Option<&str>,
) -> String {
    let mut out = String::new();
    let mut number = first_move;
    let mut side = first_side;
    for (i, san) in moves.into_iter().enumerate() {
        if !out.is_empty() {
            out.push(' ');
        }
        match (side, i) {
            (Color::White, _) => {
                let _ = write!(out, "{number}. ");
            }
            (Color::Black, 0) => {
                let _ = write!(out, "{number}... ");
            }
            (Color::Black, _) => {}
        }
        out.push_str(san);
        if side == Color::Black {
            number = number.saturating_add(1);
        }
        side = !side;
    }
    if let Some(result) = result {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(result);
    }
    out
}
