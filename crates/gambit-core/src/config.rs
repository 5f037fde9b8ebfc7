//! Match configuration: board dimensions and the two teams.

use crate::error::ConfigError;
use crate::team::TeamPair;

/// Fewest files a board may have; the back rank layout needs eight.
pub const MIN_FILES: u8 = 8;
/// Fewest ranks a board may have; both double-push ranks must stay distinct.
pub const MIN_RANKS: u8 = 6;
/// Largest supported dimension on either axis.
pub const MAX_DIMENSION: u8 = 64;

/// Board width and height, validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    files: u8,
    ranks: u8,
}

impl Dimensions {
    /// The standard 8×8 board.
    pub const STANDARD: Dimensions = Dimensions { files: 8, ranks: 8 };

    /// Validate a board size.
    pub fn new(files: usize, ranks: usize) -> Result<Dimensions, ConfigError> {
        let in_range = |n: usize, min: u8| n >= min as usize && n <= MAX_DIMENSION as usize;
        if !in_range(files, MIN_FILES) {
            return Err(ConfigError::FilesOutOfRange {
                files,
                min: MIN_FILES,
                max: MAX_DIMENSION,
            });
        }
        if !in_range(ranks, MIN_RANKS) {
            return Err(ConfigError::RanksOutOfRange {
                ranks,
                min: MIN_RANKS,
                max: MAX_DIMENSION,
            });
        }
        Ok(Dimensions {
            files: files as u8,
            ranks: ranks as u8,
        })
    }

    #[inline]
    pub fn files(self) -> u8 {
        self.files
    }

    #[inline]
    pub fn ranks(self) -> u8 {
        self.ranks
    }

    /// Number of squares on the board.
    #[inline]
    pub fn area(self) -> usize {
        self.files as usize * self.ranks as usize
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Dimensions::STANDARD
    }
}

/// Everything needed to start a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameConfig {
    pub dimensions: Dimensions,
    pub teams: TeamPair,
}

impl GameConfig {
    /// Build a configuration, validating the board size.
    pub fn new(files: usize, ranks: usize, teams: TeamPair) -> Result<GameConfig, ConfigError> {
        Ok(GameConfig {
            dimensions: Dimensions::new(files, ranks)?,
            teams,
        })
    }
}
