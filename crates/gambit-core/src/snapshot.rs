//! Snapshot text: FEN extended to any board size.
//!
//! Ranks are written from the top, empty runs as decimal counts (which may
//! take more than one digit on wide boards), and the board size is read back
//! from the placement field itself. Castling rights and the en passant
//! target are encoded from, and decoded into, piece history.

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::castle_rights::{CastleRights, CastleSide, unmoved_rook_outward};
use crate::color::Color;
use crate::config::Dimensions;
use crate::error::{BoardError, SnapshotError};
use crate::piece::{LastMove, Piece};
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::Square;

/// The snapshot of the standard starting position.
pub const STARTING_SNAPSHOT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl FromStr for Position {
    type Err = SnapshotError;

    fn from_str(snapshot: &str) -> Result<Position, SnapshotError> {
        let fields: Vec<&str> = snapshot.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(SnapshotError::WrongFieldCount {
                found: fields.len(),
            });
        }

        let rows = parse_placement(fields[0])?;
        let dims = Dimensions::new(rows[0].len(), rows.len())?;
        let mut board = Board::empty(dims);
        for (rank_index, row) in rows.iter().enumerate() {
            let rank = (rows.len() - 1 - rank_index) as u8;
            for (file, cell) in row.iter().enumerate() {
                if let Some(piece) = cell {
                    board.set(Square::new(file as u8, rank), *piece);
                }
            }
        }

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(SnapshotError::InvalidColor {
                    found: other.to_string(),
                });
            }
        };

        let rights = CastleRights::from_field(fields[2])?;

        let en_passant = match fields[3] {
            "-" => None,
            name => Some(
                Square::from_algebraic(name)
                    .filter(|sq| board.contains(*sq))
                    .ok_or_else(|| SnapshotError::InvalidEnPassant {
                        found: name.to_string(),
                    })?,
            ),
        };

        let halfmove_clock = fields[4]
            .parse::<u16>()
            .map_err(|_| SnapshotError::InvalidMoveCounter {
                field: "halfmove clock",
                found: fields[4].to_string(),
            })?;
        let fullmove_number = fields[5]
            .parse::<u16>()
            .map_err(|_| SnapshotError::InvalidMoveCounter {
                field: "fullmove number",
                found: fields[5].to_string(),
            })?;

        board.validate()?;
        restore_castling(&mut board, rights)?;
        if let Some(target) = en_passant {
            restore_en_passant(&mut board, target, !side_to_move)?;
        }

        Ok(Position::from_parts(
            board,
            side_to_move,
            halfmove_clock,
            fullmove_number,
        ))
    }
}

/// Split the placement field into rows of cells, top rank first.
fn parse_placement(field: &str) -> Result<Vec<Vec<Option<Piece>>>, SnapshotError> {
    let mut rows: Vec<Vec<Option<Piece>>> = Vec::new();
    for (rank_index, text) in field.split('/').enumerate() {
        let mut row = Vec::new();
        let mut run: usize = 0;
        for c in text.chars() {
            if let Some(digit) = c.to_digit(10) {
                if run == 0 && digit == 0 {
                    return Err(SnapshotError::InvalidPieceChar { character: c });
                }
                // Anything past the largest board is rejected by the size check.
                run = run.saturating_mul(10).saturating_add(digit as usize).min(1 << 16);
                continue;
            }
            row.resize(row.len() + run, None);
            run = 0;
            let piece = Piece::from_fen_char(c).ok_or(SnapshotError::InvalidPieceChar { character: c })?;
            row.push(Some(piece));
        }
        row.resize(row.len() + run, None);

        if let Some(first) = rows.first()
            && first.len() != row.len()
        {
            return Err(SnapshotError::BadRankLength {
                rank_index,
                length: row.len(),
                expected: first.len(),
            });
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Give kings and rooks the move history the castling field describes.
///
/// A flagged side keeps its king and the nearest rook outward unmoved; every
/// other king and rook is marked as having moved.
fn restore_castling(board: &mut Board, rights: CastleRights) -> Result<(), BoardError> {
    for color in Color::ALL {
        let mut keep: Vec<Square> = Vec::new();
        let king_sq = board.king_square(color);
        for side in CastleSide::ALL {
            if !rights.has(color, side) {
                continue;
            }
            let rook = king_sq
                .filter(|sq| sq.rank() == color.back_rank(board.ranks()))
                .and_then(|sq| unmoved_rook_outward(board, sq, side, color));
            match rook {
                Some(rook_sq) => keep.push(rook_sq),
                None => {
                    return Err(BoardError::UnbackedCastlingRight {
                        flag: CastleRights::flag_char(color, side),
                    });
                }
            }
        }

        let movers: Vec<Square> = board
            .pieces_of(color)
            .filter(|(sq, piece)| match piece.kind() {
                PieceKind::Rook => !keep.contains(sq),
                PieceKind::King => keep.is_empty(),
                _ => false,
            })
            .map(|(sq, _)| sq)
            .collect();
        for sq in movers {
            if let Some(piece) = board.piece_mut(sq) {
                piece.set_has_moved(true);
            }
        }

        let ranks = board.ranks();
        for (sq, piece) in board.pieces_of(color).collect::<Vec<_>>() {
            if piece.kind() == PieceKind::Pawn
                && sq.rank() != color.pawn_rank(ranks)
                && let Some(pawn) = board.piece_mut(sq)
            {
                pawn.set_has_moved(true);
            }
        }
    }
    Ok(())
}

/// Mark the pawn that double-pushed past `target` as having just done so.
fn restore_en_passant(board: &mut Board, target: Square, mover: Color) -> Result<(), BoardError> {
    let orphan = BoardError::OrphanEnPassant { square: target };
    let pawn_sq = board.offset(target, 0, mover.forward()).ok_or(orphan.clone())?;
    let origin = board.offset(target, 0, -mover.forward()).ok_or(orphan.clone())?;

    let pawn_ok = board
        .piece_at(pawn_sq)
        .is_some_and(|p| p.kind() == PieceKind::Pawn && p.color() == mover)
        && pawn_sq.rank() == mover.double_push_rank(board.ranks());
    if !pawn_ok || !board.is_empty(target) || !board.is_empty(origin) {
        return Err(orphan);
    }

    if let Some(pawn) = board.piece_mut(pawn_sq) {
        pawn.set_has_moved(true);
        pawn.set_last_move(Some(LastMove {
            from: origin,
            to: pawn_sq,
        }));
    }
    Ok(())
}

impl Board {
    /// Check structural invariants: one king per side, no pawns on the
    /// first or last rank.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let count = self
                .pieces_of(color)
                .filter(|(_, piece)| piece.kind() == PieceKind::King)
                .count();
            if count != 1 {
                return Err(BoardError::InvalidKingCount {
                    color: match color {
                        Color::White => "white",
                        Color::Black => "black",
                    },
                    count,
                });
            }
        }

        let last = self.ranks() - 1;
        let pawn_on_edge = self
            .pieces()
            .any(|(sq, piece)| piece.kind() == PieceKind::Pawn && (sq.rank() == 0 || sq.rank() == last));
        if pawn_on_edge {
            return Err(BoardError::PawnsOnBackRank);
        }
        Ok(())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.board();
        for rank in (0..board.ranks()).rev() {
            let mut empty_count = 0u32;
            for file in 0..board.files() {
                match board.piece_at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            write!(f, "{empty_count}")?;
                            empty_count = 0;
                        }
                        write!(f, "{}", piece.fen_char())?;
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                write!(f, "{empty_count}")?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }

        write!(f, " {} {} ", self.side_to_move(), self.castling_rights())?;
        match self.en_passant() {
            Some(sq) => write!(f, "{sq}")?,
            None => write!(f, "-")?,
        }
        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}

#[cfg(test)]
mod tests {
    use super::STARTING_SNAPSHOT;
    use crate::color::Color;
    use crate::config::Dimensions;
    use crate::error::{BoardError, SnapshotError};
    use crate::piece_kind::PieceKind;
    use crate::position::Position;
    use crate::square::Square;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn roundtrip(snapshot: &str) {
        let pos: Position = snapshot.parse().unwrap();
        assert_eq!(pos.to_string(), snapshot, "roundtrip failed for {snapshot}");
    }

    #[test]
    fn starting_snapshot_matches_layout() {
        let pos: Position = STARTING_SNAPSHOT.parse().unwrap();
        assert_eq!(pos, Position::starting(Dimensions::STANDARD));
        assert_eq!(Position::starting(Dimensions::STANDARD).to_string(), STARTING_SNAPSHOT);
    }

    #[test]
    fn roundtrips() {
        roundtrip(STARTING_SNAPSHOT);
        roundtrip("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1");
        roundtrip("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
        roundtrip("r1bqkbnr/pppppppp/n7/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 2");
        roundtrip("4k3/8/8/8/8/8/8/4K3 b - - 12 40");
    }

    #[test]
    fn wide_board_uses_multi_digit_runs() {
        let pos = Position::starting(Dimensions::new(12, 8).unwrap());
        let text = pos.to_string();
        assert!(text.starts_with("rnbqkbnr4/pppppppppppp/12/"), "{text}");
        let back: Position = text.parse().unwrap();
        assert_eq!(back.dimensions(), Dimensions::new(12, 8).unwrap());
        assert_eq!(back.to_string(), text);
    }

    #[test]
    fn en_passant_target_sets_marker() {
        let pos: Position = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
        assert_eq!(pos.en_passant(), Some(sq("d6")));
        assert!(pos.legal_destinations(sq("e5")).contains(&sq("d6")));
    }

    #[test]
    fn castling_field_sets_history() {
        let pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1".parse().unwrap();
        let board = pos.board();
        assert!(!board.piece_at(sq("e1")).unwrap().has_moved());
        assert!(!board.piece_at(sq("h1")).unwrap().has_moved());
        assert!(board.piece_at(sq("a1")).unwrap().has_moved());
        assert!(board.piece_at(sq("h8")).unwrap().has_moved());
        assert!(!pos.legal_destinations(sq("e1")).contains(&sq("c1")));
        assert!(pos.legal_destinations(sq("e1")).contains(&sq("g1")));
    }

    #[test]
    fn castling_flag_credits_nearest_rook() {
        // The text cannot say which of the two rooks is unmoved.
        let pos: Position = "4k3/8/8/8/8/8/8/4KR1R w K - 0 1".parse().unwrap();
        let board = pos.board();
        assert!(!board.piece_at(sq("f1")).unwrap().has_moved());
        assert!(board.piece_at(sq("h1")).unwrap().has_moved());
    }

    #[test]
    fn decoded_fields() {
        let pos: Position = "4k3/8/8/8/8/8/8/4K2R b K - 7 21".parse().unwrap();
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.halfmove_clock(), 7);
        assert_eq!(pos.fullmove_number(), 21);
        assert_eq!(pos.board().piece_at(sq("h1")).unwrap().kind(), PieceKind::Rook);
    }

    #[test]
    fn parse_errors() {
        let cases: [(&str, fn(&SnapshotError) -> bool); 9] = [
            ("8/8/8/8", |e| matches!(e, SnapshotError::WrongFieldCount { found: 1 })),
            ("4k3/8/8/8/8/8/8/4K4 w - - 0 1", |e| {
                matches!(e, SnapshotError::BadRankLength { rank_index: 7, length: 9, expected: 8 })
            }),
            ("4k3/8/8/8/8/8/8/4X3 w - - 0 1", |e| {
                matches!(e, SnapshotError::InvalidPieceChar { character: 'X' })
            }),
            ("4k3/8/8/8/8/8/8/4K3 x - - 0 1", |e| matches!(e, SnapshotError::InvalidColor { .. })),
            ("4k3/8/8/8/8/8/8/4K3 w Z - 0 1", |e| {
                matches!(e, SnapshotError::InvalidCastlingChar { character: 'Z' })
            }),
            ("4k3/8/8/8/8/8/8/4K3 w - j9 0 1", |e| matches!(e, SnapshotError::InvalidEnPassant { .. })),
            ("4k3/8/8/8/8/8/8/4K3 w - - x 1", |e| {
                matches!(e, SnapshotError::InvalidMoveCounter { field: "halfmove clock", .. })
            }),
            ("4k3/8/8/8/8 w - - 0 1", |e| matches!(e, SnapshotError::BadDimensions { .. })),
            ("4k3/8/8/8/8/8/8/4K3 w - - 0 -1", |e| {
                matches!(e, SnapshotError::InvalidMoveCounter { field: "fullmove number", .. })
            }),
        ];
        for (text, check) in cases {
            let err = text.parse::<Position>().unwrap_err();
            assert!(check(&err), "unexpected error for {text}: {err:?}");
        }
    }

    #[test]
    fn board_errors() {
        let cases = [
            (
                "8/8/8/8/8/8/8/4K3 w - - 0 1",
                BoardError::InvalidKingCount {
                    color: "black",
                    count: 0,
                },
            ),
            ("P3k3/8/8/8/8/8/8/4K3 w - - 0 1", BoardError::PawnsOnBackRank),
            (
                "4k3/8/8/8/8/8/8/4K3 w K - 0 1",
                BoardError::UnbackedCastlingRight { flag: 'K' },
            ),
            (
                "4k3/8/8/8/8/8/8/4K3 w - d6 0 1",
                BoardError::OrphanEnPassant { square: sq("d6") },
            ),
        ];
        for (text, expected) in cases {
            let err = text.parse::<Position>().unwrap_err();
            assert_eq!(err, SnapshotError::InvalidBoard { source: expected }, "for {text}");
        }
    }

    #[test]
    fn zero_run_is_rejected() {
        assert!("4k3/8/8/8/8/8/8/04K3 w - - 0 1".parse::<Position>().is_err());
    }
}
