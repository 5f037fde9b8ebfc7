//! One end of a two-player match.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info, warn};

use gambit_core::{Color, Game, MoveRecord, MoveRequest, Team};

use crate::error::LinkError;
use crate::wire::{Payload, move_request};

/// Which side of the board this end plays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LocalSide {
    /// The team moving first.
    First,
    /// The team moving second.
    Second,
    /// Both teams, for hot-seat play. No peer moves are accepted.
    #[default]
    Both,
}

impl LocalSide {
    /// Return `true` if this end moves for `color`.
    pub fn owns(self, color: Color) -> bool {
        match self {
            LocalSide::First => color == Color::White,
            LocalSide::Second => color == Color::Black,
            LocalSide::Both => true,
        }
    }
}

impl fmt::Display for LocalSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LocalSide::First => "first",
            LocalSide::Second => "second",
            LocalSide::Both => "both",
        })
    }
}

impl FromStr for LocalSide {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<LocalSide, LinkError> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(LocalSide::First),
            "second" => Ok(LocalSide::Second),
            "both" => Ok(LocalSide::Both),
            _ => Err(LinkError::InvalidOption {
                name: "LocalSide".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// A game plus the rules for who may move it.
///
/// Local moves are taken on the local side's turn and produce a payload for
/// the peer. Peer payloads are taken on the peer's turn; their moves go
/// through full validation unless the peer is trusted.
#[derive(Debug, Clone)]
pub struct Session {
    game: Game,
    local: LocalSide,
    trust_peer: bool,
}

impl Session {
    pub fn new(game: Game, local: LocalSide, trust_peer: bool) -> Session {
        Session {
            game,
            local,
            trust_peer,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Mutable access for operations that are not turn-bound: reset, undo, snapshot loads.
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn local(&self) -> LocalSide {
        self.local
    }

    pub fn set_local(&mut self, local: LocalSide) {
        self.local = local;
    }

    pub fn trust_peer(&self) -> bool {
        self.trust_peer
    }

    pub fn set_trust_peer(&mut self, trust: bool) {
        self.trust_peer = trust;
    }

    /// Greeting for the peer; `None` in hot-seat play.
    pub fn hello(&self) -> Option<Payload> {
        let teams = self.game.teams();
        match self.local {
            LocalSide::First => Some(Payload::hello(teams.first())),
            LocalSide::Second => Some(Payload::hello(teams.second())),
            LocalSide::Both => None,
        }
    }

    /// Full-state payload for resynchronizing the peer.
    pub fn snapshot(&self) -> Payload {
        Payload::Snapshot {
            fen: self.game.snapshot(),
        }
    }

    fn ensure_local_turn(&self) -> Result<(), LinkError> {
        if self.local.owns(self.game.side_to_move()) {
            Ok(())
        } else {
            Err(LinkError::NotYourTurn {
                team: self.game.team_to_move(),
            })
        }
    }

    /// Play a local move and return it with the payload to send.
    pub fn local_move(&mut self, req: &MoveRequest) -> Result<(MoveRecord, Payload), LinkError> {
        self.ensure_local_turn()?;
        let record = self.game.request_move(req)?;
        let payload = Payload::from_move(record.mv);
        Ok((record, payload))
    }

    /// Touch a square locally. Returns the move and its payload when the
    /// touch completes one.
    pub fn local_select(
        &mut self,
        file: i32,
        rank: i32,
    ) -> Result<Option<(MoveRecord, Payload)>, LinkError> {
        self.ensure_local_turn()?;
        self.game.select(file, rank);
        let Some(record) = self.game.update()? else {
            return Ok(None);
        };
        let payload = Payload::from_move(record.mv);
        Ok(Some((record, payload)))
    }

    /// Handle a payload from the peer. Returns the applied move, if any.
    pub fn receive(&mut self, payload: Payload) -> Result<Option<MoveRecord>, LinkError> {
        match payload {
            Payload::Hello { team } => {
                let found: Team = team.parse()?;
                let teams = self.game.teams();
                let expected = match self.local {
                    LocalSide::First => teams.second(),
                    LocalSide::Second => teams.first(),
                    LocalSide::Both => found,
                };
                if found != expected {
                    warn!(%found, %expected, "peer announced the wrong team");
                    return Err(LinkError::TeamMismatch { expected, found });
                }
                info!(team = %found, "peer joined");
                Ok(None)
            }
            Payload::Move {
                from_file,
                from_rank,
                to_file,
                to_rank,
                promotion,
            } => {
                if self.local.owns(self.game.side_to_move()) {
                    return Err(LinkError::OutOfTurn {
                        team: self.game.team_to_move(),
                    });
                }
                let req = move_request(from_file, from_rank, to_file, to_rank, promotion)?;
                let record = if self.trust_peer {
                    self.game.apply_trusted(&req)?
                } else {
                    self.game.request_move(&req)?
                };
                debug!(san = %record.san, trusted = self.trust_peer, "applied peer move");
                Ok(Some(record))
            }
            Payload::Snapshot { fen } => {
                self.game.load_snapshot(&fen)?;
                info!(snapshot = %fen, "synchronized from peer");
                Ok(None)
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Game::default(), LocalSide::default(), false)
    }
}
