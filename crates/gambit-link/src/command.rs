//! Line protocol command parsing.

use gambit_core::{MoveRequest, Square, Team};

use crate::error::LinkError;
use crate::session::LocalSide;
use crate::wire::Payload;

/// Where a `position` command starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionSource {
    /// The standard layout on the configured board size.
    StartPos,
    /// A snapshot string.
    Snapshot(String),
}

/// A `setoption` value, checked for shape but not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOption {
    Files(usize),
    Ranks(usize),
    TeamA(Team),
    TeamB(Team),
    LocalSide(LocalSide),
    TrustPeer(bool),
}

/// A parsed protocol command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `newgame [teamA teamB]` -- restart in the standard layout.
    NewGame(Option<(Team, Team)>),
    /// `select <sq>` -- touch a square.
    Select(Square),
    /// `move <from><to>[promotion]` -- request a move.
    Move(MoveRequest),
    /// `undo` -- take back the last move.
    Undo,
    /// `position startpos` or `position fen <snapshot>`.
    Position(PositionSource),
    /// `fen` -- print the snapshot.
    Fen,
    /// `board` -- print the board.
    Board,
    /// `legal` -- print the selected piece's destinations, or every legal move.
    Legal,
    /// `log` -- print the transcript.
    Log,
    /// `status` -- print check, mate or stalemate for the side to move.
    Status,
    /// `king <team>` -- print that team's king status.
    King(Team),
    /// `recv <json>` -- a payload from the peer.
    Recv(Payload),
    /// `setoption name <N> value <V>`.
    SetOption(LinkOption),
    /// `quit` -- exit.
    Quit,
    /// Unrecognized command (ignored).
    Unknown(String),
}

/// Parse a single line of input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, LinkError> {
    let line = line.trim();
    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let tokens: Vec<&str> = rest.split_whitespace().collect();

    match head {
        "newgame" => parse_newgame(&tokens),
        "select" => {
            let text = tokens.first().ok_or(LinkError::MissingArgument { command: "select" })?;
            let sq = Square::from_algebraic(text).ok_or_else(|| LinkError::InvalidSquare {
                text: text.to_string(),
            })?;
            Ok(Command::Select(sq))
        }
        "move" => {
            let text = tokens.first().ok_or(LinkError::MissingArgument { command: "move" })?;
            let req = MoveRequest::parse_coordinate(text).ok_or_else(|| LinkError::InvalidMove {
                text: text.to_string(),
            })?;
            Ok(Command::Move(req))
        }
        "undo" => Ok(Command::Undo),
        "position" => parse_position(&tokens),
        "fen" => Ok(Command::Fen),
        "board" => Ok(Command::Board),
        "legal" => Ok(Command::Legal),
        "log" => Ok(Command::Log),
        "status" => Ok(Command::Status),
        "king" => {
            let text = tokens.first().ok_or(LinkError::MissingArgument { command: "king" })?;
            Ok(Command::King(text.parse()?))
        }
        "recv" => {
            if rest.is_empty() {
                return Err(LinkError::MissingArgument { command: "recv" });
            }
            Ok(Command::Recv(Payload::decode(rest)?))
        }
        "setoption" => parse_setoption(&tokens),
        "quit" => Ok(Command::Quit),
        _ => Ok(Command::Unknown(head.to_string())),
    }
}

fn parse_newgame(tokens: &[&str]) -> Result<Command, LinkError> {
    match tokens {
        [] => Ok(Command::NewGame(None)),
        [a, b] => Ok(Command::NewGame(Some((a.parse()?, b.parse()?)))),
        _ => Err(LinkError::MissingArgument { command: "newgame" }),
    }
}

/// Parse `position startpos` or `position fen <six fields>`.
fn parse_position(tokens: &[&str]) -> Result<Command, LinkError> {
    match tokens.first() {
        Some(&"startpos") => Ok(Command::Position(PositionSource::StartPos)),
        Some(&"fen") if tokens.len() > 1 => {
            Ok(Command::Position(PositionSource::Snapshot(tokens[1..].join(" "))))
        }
        _ => Err(LinkError::MalformedPosition),
    }
}

/// Parse `setoption name <N> value <V>`. Option names are case-insensitive.
fn parse_setoption(tokens: &[&str]) -> Result<Command, LinkError> {
    let (name, value) = match tokens {
        ["name", name, "value", value] => (*name, *value),
        _ => return Err(LinkError::MissingArgument { command: "setoption" }),
    };
    let invalid = || LinkError::InvalidOption {
        name: name.to_string(),
        value: value.to_string(),
    };

    let option = match name.to_ascii_lowercase().as_str() {
        "files" => LinkOption::Files(value.parse().map_err(|_| invalid())?),
        "ranks" => LinkOption::Ranks(value.parse().map_err(|_| invalid())?),
        "teama" => LinkOption::TeamA(value.parse()?),
        "teamb" => LinkOption::TeamB(value.parse()?),
        "localside" => LinkOption::LocalSide(value.parse()?),
        "trustpeer" => LinkOption::TrustPeer(value.parse().map_err(|_| invalid())?),
        _ => return Err(invalid()),
    };
    Ok(Command::SetOption(option))
}

#[cfg(test)]
mod tests {
    use gambit_core::PieceKind;

    use super::*;

    #[test]
    fn parse_bare_commands() {
        assert_eq!(parse_command("undo").unwrap(), Command::Undo);
        assert_eq!(parse_command("fen").unwrap(), Command::Fen);
        assert_eq!(parse_command("board").unwrap(), Command::Board);
        assert_eq!(parse_command("legal").unwrap(), Command::Legal);
        assert_eq!(parse_command("log").unwrap(), Command::Log);
        assert_eq!(parse_command("status").unwrap(), Command::Status);
        assert_eq!(parse_command("  quit  ").unwrap(), Command::Quit);
    }

    #[test]
    fn parse_newgame_teams() {
        assert_eq!(parse_command("newgame").unwrap(), Command::NewGame(None));
        assert_eq!(
            parse_command("newgame red light_gray").unwrap(),
            Command::NewGame(Some((Team::Red, Team::LightGray)))
        );
        assert!(matches!(
            parse_command("newgame red mauve"),
            Err(LinkError::Config(_))
        ));
        assert!(parse_command("newgame red").is_err());
    }

    #[test]
    fn parse_select() {
        assert_eq!(
            parse_command("select e2").unwrap(),
            Command::Select(Square::new(4, 1))
        );
        assert!(matches!(
            parse_command("select"),
            Err(LinkError::MissingArgument { command: "select" })
        ));
        assert!(matches!(
            parse_command("select 22"),
            Err(LinkError::InvalidSquare { .. })
        ));
    }

    #[test]
    fn parse_move_with_promotion() {
        let Command::Move(req) = parse_command("move a7a8n").unwrap() else {
            panic!("expected Move");
        };
        assert_eq!((req.from_file, req.from_rank, req.to_file, req.to_rank), (0, 6, 0, 7));
        assert_eq!(req.promotion, Some(PieceKind::Knight));
        assert!(matches!(
            parse_command("move e2"),
            Err(LinkError::InvalidMove { .. })
        ));
    }

    #[test]
    fn parse_position_variants() {
        assert_eq!(
            parse_command("position startpos").unwrap(),
            Command::Position(PositionSource::StartPos)
        );
        assert_eq!(
            parse_command("position fen 4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap(),
            Command::Position(PositionSource::Snapshot(
                "4k3/8/8/8/8/8/8/4K3 w - - 0 1".to_string()
            ))
        );
        assert!(matches!(
            parse_command("position"),
            Err(LinkError::MalformedPosition)
        ));
        assert!(matches!(
            parse_command("position fen"),
            Err(LinkError::MalformedPosition)
        ));
    }

    #[test]
    fn parse_king_and_recv() {
        assert_eq!(parse_command("king Black").unwrap(), Command::King(Team::Black));
        let cmd = parse_command(r#"recv {"type":"hello","team":"blue"}"#).unwrap();
        assert_eq!(
            cmd,
            Command::Recv(Payload::Hello {
                team: "blue".to_string()
            })
        );
        assert!(matches!(parse_command("recv {"), Err(LinkError::Json { .. })));
        assert!(matches!(
            parse_command("recv"),
            Err(LinkError::MissingArgument { command: "recv" })
        ));
    }

    #[test]
    fn parse_setoptions() {
        assert_eq!(
            parse_command("setoption name Files value 10").unwrap(),
            Command::SetOption(LinkOption::Files(10))
        );
        assert_eq!(
            parse_command("setoption name TrustPeer value true").unwrap(),
            Command::SetOption(LinkOption::TrustPeer(true))
        );
        assert_eq!(
            parse_command("setoption name TeamA value cyan").unwrap(),
            Command::SetOption(LinkOption::TeamA(Team::Cyan))
        );
        assert_eq!(
            parse_command("setoption name LocalSide value second").unwrap(),
            Command::SetOption(LinkOption::LocalSide(LocalSide::Second))
        );
        assert!(matches!(
            parse_command("setoption name Ranks value many"),
            Err(LinkError::InvalidOption { .. })
        ));
        assert!(matches!(
            parse_command("setoption name Hash value 16"),
            Err(LinkError::InvalidOption { .. })
        ));
        assert!(parse_command("setoption name Files").is_err());
    }

    #[test]
    fn parse_unknown_and_empty() {
        assert_eq!(
            parse_command("foobar 1 2").unwrap(),
            Command::Unknown("foobar".to_string())
        );
        assert_eq!(parse_command("").unwrap(), Command::Unknown(String::new()));
    }
}
