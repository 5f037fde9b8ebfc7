//! A board plus whose turn it is and the move clocks.

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::chess_move::{Move, MoveRequest};
use crate::color::Color;
use crate::config::Dimensions;
use crate::error::GameError;
use crate::legality::{has_legal_move, is_in_check, keeps_king_safe, legal_destinations};
use crate::movegen::{Targets, candidate_moves, classify};
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Where the side to move stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Not in check, with at least one legal move.
    Ongoing,
    /// In check, with at least one legal move.
    Check,
    /// In check with no legal move.
    Checkmate,
    /// Not in check with no legal move.
    Stalemate,
}

impl Status {
    /// Return `true` if the side to move has no legal move.
    #[inline]
    pub const fn is_over(self) -> bool {
        matches!(self, Status::Checkmate | Status::Stalemate)
    }

    /// Return `true` if the side to move is in check.
    #[inline]
    pub const fn is_check(self) -> bool {
        matches!(self, Status::Check | Status::Checkmate)
    }

    /// Result token when the game is over: `1-0`, `0-1` or `½-½`.
    pub const fn result(self, side_to_move: Color) -> Option<&'static str> {
        match (self, side_to_move) {
            (Status::Checkmate, Color::White) => Some("0-1"),
            (Status::Checkmate, Color::Black) => Some("1-0"),
            (Status::Stalemate, _) => Some("½-½"),
            _ => None,
        }
    }
}

/// Check and mobility of one king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KingStatus {
    /// Where the king stands; `None` on boards set up without one.
    pub square: Option<Square>,
    /// The king is attacked.
    pub in_check: bool,
    /// The king's side has at least one legal move.
    pub can_move: bool,
}

/// A complete game position.
///
/// Castling rights and the en passant target are not stored; both are read
/// from piece history on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
}

impl Position {
    /// The starting layout with White to move.
    pub fn starting(dims: Dimensions) -> Position {
        Position::from_parts(Board::starting(dims), Color::White, 0, 1)
    }

    /// Assemble a position from a board and the turn fields.
    pub fn from_parts(
        board: Board,
        side_to_move: Color,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Position {
        Position {
            board,
            side_to_move,
            halfmove_clock,
            fullmove_number,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.board.dimensions()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Plies since the last pawn move or capture.
    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    /// Starts at 1 and increments after Black moves.
    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Castling rights implied by piece history.
    pub fn castling_rights(&self) -> CastleRights {
        CastleRights::from_board(&self.board)
    }

    /// The square passed over by a pawn that double-pushed on the last ply.
    pub fn en_passant(&self) -> Option<Square> {
        self.board.pieces_of(!self.side_to_move).find_map(|(sq, piece)| {
            let last = piece.last_move()?;
            let double_push = piece.kind() == PieceKind::Pawn && last.is_double_step() && last.to == sq;
            double_push.then(|| Square::new(sq.file(), (last.from.rank() + last.to.rank()) / 2))
        })
    }

    /// Return `true` if the side to move is in check.
    pub fn is_in_check(&self) -> bool {
        is_in_check(&self.board, self.side_to_move)
    }

    /// Legal destinations for the piece on `sq`. Empty unless that piece
    /// belongs to the side to move.
    pub fn legal_destinations(&self, sq: Square) -> Targets {
        match self.board.piece_at(sq) {
            Some(piece) if piece.color() == self.side_to_move => legal_destinations(&self.board, sq),
            _ => Targets::new(),
        }
    }

    /// Every legal move for the side to move. Promotions appear once per
    /// promotion kind.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for (from, _) in self.board.pieces_of(self.side_to_move) {
            for to in legal_destinations(&self.board, from) {
                let Some(mv) = classify(&self.board, from, to, PieceKind::Queen) else {
                    continue;
                };
                if mv.promotion().is_some() {
                    moves.extend(PieceKind::PROMOTIONS.map(|kind| mv.with_promotion(kind)));
                } else {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    /// Return `true` if `mv` is a legal move for the side to move.
    pub fn is_legal(&self, mv: Move) -> bool {
        let Some(piece) = self.board.piece_at(mv.from()) else {
            return false;
        };
        piece.color() == self.side_to_move
            && candidate_moves(&self.board, mv.from()).contains(&mv.to())
            && classify(&self.board, mv.from(), mv.to(), mv.promotion().unwrap_or(PieceKind::Queen)) == Some(mv)
            && keeps_king_safe(&self.board, mv)
    }

    /// Check and mobility for `color`'s king, as if `color` were to move.
    pub fn king_status(&self, color: Color) -> KingStatus {
        KingStatus {
            square: self.board.king_square(color),
            in_check: is_in_check(&self.board, color),
            can_move: has_legal_move(&self.board, color),
        }
    }

    /// Check, mate or stalemate for the side to move.
    pub fn status(&self) -> Status {
        let king = self.king_status(self.side_to_move);
        match (king.in_check, king.can_move) {
            (false, true) => Status::Ongoing,
            (true, true) => Status::Check,
            (true, false) => Status::Checkmate,
            (false, false) => Status::Stalemate,
        }
    }

    /// Turn a request into a legal move for the side to move.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidPromotion`] for a pawn or king promotion choice,
    /// [`GameError::IllegalMove`] for anything not in the legal set.
    pub fn resolve(&self, req: &MoveRequest) -> Result<Move, GameError> {
        let promotion = req.promotion.unwrap_or(PieceKind::Queen);
        if !promotion.is_promotion_target() {
            return Err(GameError::InvalidPromotion { kind: promotion });
        }
        let illegal = || {
            let (from, to) = req.describe();
            GameError::IllegalMove { from, to }
        };

        let from = self.board.square(req.from_file, req.from_rank).ok_or_else(illegal)?;
        let to = self.board.square(req.to_file, req.to_rank).ok_or_else(illegal)?;
        if !self.legal_destinations(from).contains(&to) {
            return Err(illegal());
        }
        classify(&self.board, from, to, promotion).ok_or_else(illegal)
    }

    /// Classify a request without checking legality. Used for moves taken on
    /// trust from a peer.
    ///
    /// # Errors
    ///
    /// [`GameError::EmptySource`] if there is no piece to move,
    /// [`GameError::IllegalMove`] if a coordinate is off the board.
    pub fn resolve_trusted(&self, req: &MoveRequest) -> Result<Move, GameError> {
        let promotion = req.promotion.unwrap_or(PieceKind::Queen);
        if !promotion.is_promotion_target() {
            return Err(GameError::InvalidPromotion { kind: promotion });
        }
        let off_board = || {
            let (from, to) = req.describe();
            GameError::IllegalMove { from, to }
        };
        let from = self.board.square(req.from_file, req.from_rank).ok_or_else(off_board)?;
        let to = self.board.square(req.to_file, req.to_rank).ok_or_else(off_board)?;
        classify(&self.board, from, to, promotion).ok_or(GameError::EmptySource { square: from })
    }
}

#[cfg(test)]
mod tests {
    use super::{Position, Status};
    use crate::chess_move::{MoveKind, MoveRequest};
    use crate::color::Color;
    use crate::config::Dimensions;
    use crate::error::GameError;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn req(coords: &str) -> MoveRequest {
        MoveRequest::parse_coordinate(coords).unwrap()
    }

    #[test]
    fn starting_position_has_20_moves() {
        let pos = Position::starting(Dimensions::STANDARD);
        assert_eq!(pos.legal_moves().len(), 20);
        assert_eq!(pos.status(), Status::Ongoing);
        assert_eq!(pos.castling_rights().to_field(), "KQkq");
        assert_eq!(pos.en_passant(), None);
    }

    #[test]
    fn wide_board_has_more_moves() {
        let pos = Position::starting(Dimensions::new(10, 8).unwrap());
        // Two more pawns with two pushes each, and the h1 rook reaches the empty i1 and j1.
        assert_eq!(pos.legal_moves().len(), 26);
    }

    #[test]
    fn destinations_only_for_side_to_move() {
        let pos = Position::starting(Dimensions::STANDARD);
        assert_eq!(pos.legal_destinations(sq("b1")).len(), 2);
        assert!(pos.legal_destinations(sq("b8")).is_empty());
        assert!(pos.legal_destinations(sq("e4")).is_empty());
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let pos: Position = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
            .parse()
            .unwrap();
        assert_eq!(pos.status(), Status::Checkmate);
        assert_eq!(pos.status().result(pos.side_to_move()), Some("0-1"));
        let king = pos.king_status(Color::White);
        assert!(king.in_check);
        assert!(!king.can_move);
        assert_eq!(king.square, Some(sq("e1")));
        assert!(pos.legal_moves().is_empty());
    }

    #[test]
    fn stalemate_is_not_check() {
        let pos: Position = "7k/5Q2/8/8/8/8/8/K7 b - - 0 1".parse().unwrap();
        assert_eq!(pos.status(), Status::Stalemate);
        assert!(!pos.status().is_check());
        assert_eq!(pos.status().result(Color::Black), Some("½-½"));
    }

    #[test]
    fn check_with_escape() {
        let pos: Position = "4k3/8/8/8/8/8/8/R3K3 b - - 0 1".parse().unwrap();
        assert_eq!(pos.status(), Status::Ongoing);
        let pos: Position = "4k3/8/8/8/8/8/8/4KR2 w - - 0 1".parse().unwrap();
        assert!(!pos.is_in_check());
        let pos: Position = "4k3/8/8/8/8/8/8/4R1K1 b - - 0 1".parse().unwrap();
        assert_eq!(pos.status(), Status::Check);
        assert!(pos.is_in_check());
    }

    #[test]
    fn promotions_expand_in_move_list() {
        let pos: Position = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let promos: Vec<_> = pos
            .legal_moves()
            .into_iter()
            .filter_map(|mv| mv.promotion())
            .collect();
        assert_eq!(promos.len(), 4);
        assert!(promos.contains(&PieceKind::Knight));
    }

    #[test]
    fn resolve_rejects_illegal_requests() {
        let pos = Position::starting(Dimensions::STANDARD);
        assert!(matches!(pos.resolve(&req("e2e5")), Err(GameError::IllegalMove { .. })));
        assert!(matches!(pos.resolve(&req("e7e5")), Err(GameError::IllegalMove { .. })));
        assert!(matches!(pos.resolve(&req("e3e4")), Err(GameError::IllegalMove { .. })));

        let off_board = MoveRequest {
            from_file: 4,
            from_rank: 1,
            to_file: 4,
            to_rank: 9,
            promotion: None,
        };
        assert_eq!(
            pos.resolve(&off_board),
            Err(GameError::IllegalMove {
                from: "e2".to_string(),
                to: "e10".to_string()
            })
        );
    }

    #[test]
    fn resolve_rejects_king_promotion() {
        let pos = Position::starting(Dimensions::STANDARD);
        let bad = req("e2e4").with_promotion(Some(PieceKind::King));
        assert_eq!(
            pos.resolve(&bad),
            Err(GameError::InvalidPromotion {
                kind: PieceKind::King
            })
        );
    }

    #[test]
    fn resolve_classifies() {
        let pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let castle = pos.resolve(&req("e1c1")).unwrap();
        assert!(matches!(castle.kind(), MoveKind::Castle(_)));
        assert!(pos.is_legal(castle));
    }

    #[test]
    fn trusted_resolution_skips_legality() {
        let pos = Position::starting(Dimensions::STANDARD);
        let mv = pos.resolve_trusted(&req("e2e5")).unwrap();
        assert!(!pos.is_legal(mv));
        assert_eq!(
            pos.resolve_trusted(&req("e4e5")),
            Err(GameError::EmptySource { square: sq("e4") })
        );
    }
}
