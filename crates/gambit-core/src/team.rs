//! Team identities and the pair of teams playing a match.

use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::error::ConfigError;

/// A team identity. Which identities play is chosen per match; the rules only
/// care about which [`Color`] slot a team occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
    Pink,
    DarkGray,
    LightGray,
    White,
    Black,
}

impl Team {
    /// All team identities.
    pub const ALL: [Team; 12] = [
        Team::Red,
        Team::Orange,
        Team::Yellow,
        Team::Green,
        Team::Cyan,
        Team::Blue,
        Team::Purple,
        Team::Pink,
        Team::DarkGray,
        Team::LightGray,
        Team::White,
        Team::Black,
    ];

    /// Return the lowercase, underscore-separated name.
    pub const fn name(self) -> &'static str {
        match self {
            Team::Red => "red",
            Team::Orange => "orange",
            Team::Yellow => "yellow",
            Team::Green => "green",
            Team::Cyan => "cyan",
            Team::Blue => "blue",
            Team::Purple => "purple",
            Team::Pink => "pink",
            Team::DarkGray => "dark_gray",
            Team::LightGray => "light_gray",
            Team::White => "white",
            Team::Black => "black",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Team {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Team, ConfigError> {
        let wanted = s.to_ascii_lowercase().replace('-', "_");
        Team::ALL
            .into_iter()
            .find(|team| team.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownTeam {
                name: s.to_string(),
            })
    }
}

/// The two distinct teams of a match. `first` plays [`Color::White`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TeamPair {
    first: Team,
    second: Team,
}

impl TeamPair {
    /// Pair two teams, rejecting a team playing itself.
    pub fn new(first: Team, second: Team) -> Result<TeamPair, ConfigError> {
        if first == second {
            return Err(ConfigError::SameTeams { team: first });
        }
        Ok(TeamPair { first, second })
    }

    /// The team moving first.
    #[inline]
    pub fn first(self) -> Team {
        self.first
    }

    /// The team moving second.
    #[inline]
    pub fn second(self) -> Team {
        self.second
    }

    /// The team occupying `color`.
    #[inline]
    pub fn team(self, color: Color) -> Team {
        match color {
            Color::White => self.first,
            Color::Black => self.second,
        }
    }

    /// The slot `team` plays, or `None` if it is not part of this match.
    pub fn color_of(self, team: Team) -> Option<Color> {
        if team == self.first {
            Some(Color::White)
        } else if team == self.second {
            Some(Color::Black)
        } else {
            None
        }
    }
}

impl Default for TeamPair {
    fn default() -> Self {
        TeamPair {
            first: Team::White,
            second: Team::Black,
        }
    }
}
