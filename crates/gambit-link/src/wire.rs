//! Payloads exchanged between the two ends of a match.
//!
//! Each payload is one JSON object on one line, tagged by `type`:
//!
//! ```text
//! {"type":"hello","team":"red"}
//! {"type":"move","from_file":4,"from_rank":1,"to_file":4,"to_rank":3}
//! {"type":"snapshot","fen":"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"}
//! ```

use serde::{Deserialize, Serialize};

use gambit_core::{Move, MoveRequest, PieceKind, Team};

use crate::error::LinkError;

/// A message for the other end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
    /// Announce the team this end plays.
    Hello { team: String },
    /// A move by raw coordinates. Coordinates are zero-based.
    Move {
        from_file: i32,
        from_rank: i32,
        to_file: i32,
        to_rank: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        promotion: Option<char>,
    },
    /// Full state, as a snapshot string.
    Snapshot { fen: String },
}

impl Payload {
    /// Greeting for `team`.
    pub fn hello(team: Team) -> Payload {
        Payload::Hello {
            team: team.name().to_string(),
        }
    }

    /// The move packet for an applied move.
    pub fn from_move(mv: Move) -> Payload {
        Payload::Move {
            from_file: i32::from(mv.from().file()),
            from_rank: i32::from(mv.from().rank()),
            to_file: i32::from(mv.to().file()),
            to_rank: i32::from(mv.to().rank()),
            promotion: mv.promotion().map(PieceKind::fen_char),
        }
    }

    /// Encode as a single line of JSON.
    pub fn encode(&self) -> Result<String, LinkError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode one line of JSON.
    pub fn decode(line: &str) -> Result<Payload, LinkError> {
        Ok(serde_json::from_str(line.trim())?)
    }
}

/// Turn move packet fields into a request.
pub(crate) fn move_request(
    from_file: i32,
    from_rank: i32,
    to_file: i32,
    to_rank: i32,
    promotion: Option<char>,
) -> Result<MoveRequest, LinkError> {
    let promotion = promotion
        .map(|c| PieceKind::from_fen_char(c).ok_or(LinkError::InvalidPromotion { found: c }))
        .transpose()?;
    Ok(MoveRequest {
        from_file,
        from_rank,
        to_file,
        to_rank,
        promotion,
    })
}
