//! Line-driven driver: reads commands, runs them against a session and
//! writes one response per command.

use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use gambit_core::{
    Game, GameConfig, KingStatus, MoveRecord, Status, Team, TeamPair,
};

use crate::command::{Command, LinkOption, PositionSource, parse_command};
use crate::error::LinkError;
use crate::session::{LocalSide, Session};
use crate::wire::Payload;

/// Knobs adjustable via `setoption`.
///
/// Board size and teams take effect at the next `newgame`; the local side
/// and peer trust apply immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    pub files: usize,
    pub ranks: usize,
    pub team_a: Team,
    pub team_b: Team,
    pub local: LocalSide,
    pub trust_peer: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            files: 8,
            ranks: 8,
            team_a: Team::White,
            team_b: Team::Black,
            local: LocalSide::Both,
            trust_peer: false,
        }
    }
}

/// The protocol driver, holding the link configuration and the live session.
pub struct LinkEngine {
    config: LinkConfig,
    session: Session,
}

impl LinkEngine {
    /// Create an engine with the default configuration and a standard game.
    pub fn new() -> Self {
        let config = LinkConfig::default();
        let session = Session::new(Game::default(), config.local, config.trust_peer);
        Self { config, session }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run on stdin and stdout until `quit` or end of input.
    pub fn run(self) -> Result<(), LinkError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), &mut stdout.lock())
    }

    /// Run over any line source and sink.
    ///
    /// Parse failures and rejected operations are answered with an `error`
    /// line and the loop carries on. Only I/O failures end it early.
    pub fn run_with<R: BufRead, W: Write>(mut self, input: R, out: &mut W) -> Result<(), LinkError> {
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(cmd = %trimmed, "received command");

            let cmd = match parse_command(trimmed) {
                Ok(Command::Quit) => break,
                Ok(Command::Unknown(name)) => {
                    debug!(%name, "ignoring unknown command");
                    continue;
                }
                Ok(cmd) => cmd,
                Err(err) => {
                    warn!(error = %err, "parse error");
                    writeln!(out, "error {err}")?;
                    continue;
                }
            };

            match self.handle(cmd, out) {
                Ok(()) => {}
                Err(LinkError::Io { source }) => return Err(LinkError::Io { source }),
                Err(err) => {
                    warn!(error = %err, "command rejected");
                    writeln!(out, "error {err}")?;
                }
            }
            out.flush()?;
        }

        info!("gambit link shutting down");
        Ok(())
    }

    fn handle<W: Write>(&mut self, cmd: Command, out: &mut W) -> Result<(), LinkError> {
        match cmd {
            Command::NewGame(teams) => self.handle_newgame(teams, out),
            Command::Select(sq) => {
                let played = self
                    .session
                    .local_select(i32::from(sq.file()), i32::from(sq.rank()))?;
                match played {
                    Some((record, payload)) => self.report_move(&record, Some(payload), out),
                    None => match self.session.game().selected() {
                        Some(from) => {
                            let targets = self.session.game().legal_destinations();
                            writeln!(out, "selected {from} {}", join(targets))?;
                            Ok(())
                        }
                        None => Ok(writeln!(out, "idle")?),
                    },
                }
            }
            Command::Move(req) => {
                let (record, payload) = self.session.local_move(&req)?;
                self.report_move(&record, Some(payload), out)
            }
            Command::Undo => {
                self.session.game_mut().undo()?;
                Ok(writeln!(out, "ok")?)
            }
            Command::Position(source) => {
                let game = self.session.game_mut();
                match source {
                    PositionSource::StartPos => {
                        let teams = game.teams();
                        game.reset(teams.first(), teams.second())?;
                    }
                    PositionSource::Snapshot(text) => game.load_snapshot(&text)?,
                }
                Ok(writeln!(out, "ok")?)
            }
            Command::Fen => Ok(writeln!(out, "fen {}", self.session.game().snapshot())?),
            Command::Board => Ok(writeln!(out, "{}", self.session.game().board().pretty())?),
            Command::Legal => {
                let game = self.session.game();
                if game.selected().is_some() {
                    writeln!(out, "legal {}", join(game.legal_destinations()))?;
                } else {
                    writeln!(out, "legal {}", join(&game.position().legal_moves()))?;
                }
                Ok(())
            }
            Command::Log => Ok(writeln!(out, "log {}", self.session.game().transcript())?),
            Command::Status => {
                let status = match self.session.game().status() {
                    Status::Ongoing => "ongoing",
                    Status::Check => "check",
                    Status::Checkmate => "checkmate",
                    Status::Stalemate => "stalemate",
                };
                Ok(writeln!(out, "status {status}")?)
            }
            Command::King(team) => {
                let king = self.session.game().king(team)?;
                Ok(writeln!(out, "king {team} {}", describe_king(king))?)
            }
            Command::Recv(payload) => match self.session.receive(payload)? {
                Some(record) => self.report_move(&record, None, out),
                None => Ok(writeln!(out, "ok")?),
            },
            Command::SetOption(option) => {
                self.handle_setoption(option);
                Ok(())
            }
            Command::Quit | Command::Unknown(_) => Ok(()),
        }
    }

    fn handle_newgame<W: Write>(
        &mut self,
        teams: Option<(Team, Team)>,
        out: &mut W,
    ) -> Result<(), LinkError> {
        let (team_a, team_b) = teams.unwrap_or((self.config.team_a, self.config.team_b));
        let config = GameConfig::new(
            self.config.files,
            self.config.ranks,
            TeamPair::new(team_a, team_b)?,
        )?;
        self.config.team_a = team_a;
        self.config.team_b = team_b;
        self.session = Session::new(Game::new(config), self.config.local, self.config.trust_peer);

        let dims = config.dimensions;
        writeln!(out, "ready {team_a} {team_b} {}x{}", dims.files(), dims.ranks())?;
        if let Some(hello) = self.session.hello() {
            writeln!(out, "send {}", hello.encode()?)?;
        }
        Ok(())
    }

    fn handle_setoption(&mut self, option: LinkOption) {
        debug!(?option, "setoption");
        match option {
            LinkOption::Files(files) => self.config.files = files,
            LinkOption::Ranks(ranks) => self.config.ranks = ranks,
            LinkOption::TeamA(team) => self.config.team_a = team,
            LinkOption::TeamB(team) => self.config.team_b = team,
            LinkOption::LocalSide(local) => {
                self.config.local = local;
                self.session.set_local(local);
            }
            LinkOption::TrustPeer(trust) => {
                self.config.trust_peer = trust;
                self.session.set_trust_peer(trust);
            }
        }
    }

    /// Print an applied move, the payload for the peer, and the result if the game ended.
    fn report_move<W: Write>(
        &self,
        record: &MoveRecord,
        payload: Option<Payload>,
        out: &mut W,
    ) -> Result<(), LinkError> {
        writeln!(out, "played {} {}", record.mv, record.san)?;
        if let Some(payload) = payload
            && self.session.local() != LocalSide::Both
        {
            writeln!(out, "send {}", payload.encode()?)?;
        }
        if let Some(result) = self.session.game().result() {
            writeln!(out, "result {result}")?;
        }
        Ok(())
    }
}

impl Default for LinkEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn join<T: ToString>(items: &[T]) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

fn describe_king(king: KingStatus) -> String {
    let square = king
        .square
        .map_or_else(|| "none".to_string(), |sq| sq.to_string());
    format!("square {square} check {} canmove {}", king.in_check, king.can_move)
}
