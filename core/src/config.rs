use core::fmt;
use core::ops::RangeInclusive;

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Classic,
    Hexagon,
    Custom,
}

impl Mode {
    pub const ALL: [Self; 3] = [Self::Classic, Self::Hexagon, Self::Custom];

    pub const fn topology(self) -> Topology {
        match self {
            Self::Classic | Self::Custom => Topology::Square,
            Self::Hexagon => Topology::Hex,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Hexagon => "hexagon",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
    Random,
}

impl Difficulty {
    pub const ALL: [Self; 4] = [
        Self::Beginner,
        Self::Intermediate,
        Self::Expert,
        Self::Random,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Expert => "Expert",
            Self::Random => "Random",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const CLASSIC_RANDOM_SIDE: RangeInclusive<Coord> = 10..=30;
const CLASSIC_RANDOM_MIN_MINES: CellCount = 10;
const HEXAGON_RANDOM_SIDE: RangeInclusive<Coord> = 6..=20;
const HEXAGON_RANDOM_MIN_MINES: CellCount = 5;

/// Limits a custom board has to respect.
pub struct CustomBounds;

impl CustomBounds {
    pub const SIDE: RangeInclusive<Coord> = 10..=30;
    pub const MIN_MINES: CellCount = 10;
    /// Cells kept free for the first click, a full 3x3 block.
    pub const SAFE_AREA: CellCount = 9;

    pub fn max_mines(total_cells: CellCount) -> CellCount {
        let max = total_cells.saturating_sub(Self::SAFE_AREA);
        if max < Self::MIN_MINES {
            total_cells.saturating_sub(1)
        } else {
            max
        }
    }
}

/// Everything a session needs to know about the game it is about to run.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSetup {
    pub mode: Mode,
    /// `None` for custom games.
    pub difficulty: Option<Difficulty>,
    pub config: GameConfig,
}

impl GameSetup {
    /// Classic or hexagon game. Random difficulty rolls its own size and mine count with `rng`.
    ///
    /// Custom mode has no difficulties and yields `None`.
    pub fn preset<R: Rng + ?Sized>(
        mode: Mode,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Option<Self> {
        use Difficulty::*;

        let config = match (mode, difficulty) {
            (Mode::Custom, _) => return None,
            (Mode::Classic, Beginner) => GameConfig::new(Topology::Square, (9, 9), 10),
            (Mode::Classic, Intermediate) => GameConfig::new(Topology::Square, (16, 16), 40),
            (Mode::Classic, Expert) => GameConfig::new(Topology::Square, (16, 30), 99),
            (Mode::Classic, Random) => random_classic(rng),
            (Mode::Hexagon, Beginner) => GameConfig::new(Topology::Hex, (8, 8), 10),
            (Mode::Hexagon, Intermediate) => GameConfig::new(Topology::Hex, (12, 12), 25),
            (Mode::Hexagon, Expert) => GameConfig::new(Topology::Hex, (16, 16), 60),
            (Mode::Hexagon, Random) => random_hexagon(rng),
        };

        Some(Self {
            mode,
            difficulty: Some(difficulty),
            config,
        })
    }

    /// Player-chosen square board, checked against [`CustomBounds`].
    pub fn custom(width: u32, height: u32, mines: u32) -> core::result::Result<Self, ConfigError> {
        let side = |value: u32| {
            Coord::try_from(value)
                .ok()
                .filter(|side| CustomBounds::SIDE.contains(side))
                .ok_or(ConfigError::DimensionOutOfRange {
                    min: *CustomBounds::SIDE.start(),
                    max: *CustomBounds::SIDE.end(),
                })
        };
        let width = side(width)?;
        let height = side(height)?;

        if mines < u32::from(CustomBounds::MIN_MINES) {
            return Err(ConfigError::TooFewMines {
                min: CustomBounds::MIN_MINES,
            });
        }

        let max = CustomBounds::max_mines(mult(width, height));
        if mines > u32::from(max) {
            return Err(ConfigError::TooManyMines {
                mines,
                max,
                width,
                height,
            });
        }

        Ok(Self {
            mode: Mode::Custom,
            difficulty: None,
            config: GameConfig::new(Topology::Square, (height, width), mines as CellCount),
        })
    }
}

fn random_classic<R: Rng + ?Sized>(rng: &mut R) -> GameConfig {
    let cols = rng.random_range(CLASSIC_RANDOM_SIDE);
    let rows = rng.random_range(CLASSIC_RANDOM_SIDE);
    let total = mult(rows, cols);

    let max = (u32::from(total) * 9 / 10) as CellCount;
    let mut mines = if max < CLASSIC_RANDOM_MIN_MINES {
        CLASSIC_RANDOM_MIN_MINES.min(total.saturating_sub(1))
    } else {
        rng.random_range(CLASSIC_RANDOM_MIN_MINES..=max)
    };
    if mines >= total {
        mines = total.saturating_sub(1);
    }

    GameConfig::new(Topology::Square, (rows, cols), mines)
}

fn random_hexagon<R: Rng + ?Sized>(rng: &mut R) -> GameConfig {
    let rows = rng.random_range(HEXAGON_RANDOM_SIDE);
    let cols = rng.random_range(HEXAGON_RANDOM_SIDE);
    let total = mult(rows, cols);

    // a hex cell and its six neighbours stay free on the first click
    let mut max = total.saturating_sub(7);
    if max < HEXAGON_RANDOM_MIN_MINES {
        max = total.saturating_sub(1);
    }
    let mines = if HEXAGON_RANDOM_MIN_MINES > max {
        max
    } else {
        rng.random_range(HEXAGON_RANDOM_MIN_MINES..=max)
    };

    GameConfig::new(Topology::Hex, (rows, cols), mines)
}

/// What a won session hands to the leaderboard.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub mode: Mode,
    pub difficulty: Option<Difficulty>,
    pub elapsed_secs: f64,
    /// `(rows, cols)`
    pub size: Coord2,
    /// Mines actually placed, which can be fewer than requested.
    pub mines: CellCount,
}

impl GameResult {
    pub const fn width(&self) -> Coord {
        self.size.1
    }

    pub const fn height(&self) -> Coord {
        self.size.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(5)
    }

    #[test]
    fn classic_presets_match_menu() {
        let expert = GameSetup::preset(Mode::Classic, Difficulty::Expert, &mut rng()).unwrap();

        assert_eq!(expert.config.size, (16, 30));
        assert_eq!(expert.config.mines, 99);
        assert_eq!(expert.config.topology, Topology::Square);
        assert_eq!(expert.difficulty, Some(Difficulty::Expert));
    }

    #[test]
    fn hexagon_presets_use_hex_topology() {
        for (difficulty, size, mines) in [
            (Difficulty::Beginner, (8, 8), 10),
            (Difficulty::Intermediate, (12, 12), 25),
            (Difficulty::Expert, (16, 16), 60),
        ] {
            let setup = GameSetup::preset(Mode::Hexagon, difficulty, &mut rng()).unwrap();

            assert_eq!(setup.config, GameConfig::new(Topology::Hex, size, mines));
        }
    }

    #[test]
    fn custom_mode_has_no_presets() {
        assert_eq!(GameSetup::preset(Mode::Custom, Difficulty::Beginner, &mut rng()), None);
    }

    #[test]
    fn random_classic_stays_in_range() {
        let mut rng = rng();
        for _ in 0..500 {
            let config = GameSetup::preset(Mode::Classic, Difficulty::Random, &mut rng)
                .unwrap()
                .config;

            assert!(CLASSIC_RANDOM_SIDE.contains(&config.rows()));
            assert!(CLASSIC_RANDOM_SIDE.contains(&config.cols()));
            assert!(config.mines >= CLASSIC_RANDOM_MIN_MINES);
            assert!(u32::from(config.mines) * 10 <= u32::from(config.total_cells()) * 9);
        }
    }

    #[test]
    fn random_hexagon_leaves_room_for_the_safe_zone() {
        let mut rng = rng();
        for _ in 0..500 {
            let config = GameSetup::preset(Mode::Hexagon, Difficulty::Random, &mut rng)
                .unwrap()
                .config;

            assert_eq!(config.topology, Topology::Hex);
            assert!(HEXAGON_RANDOM_SIDE.contains(&config.rows()));
            assert!(HEXAGON_RANDOM_SIDE.contains(&config.cols()));
            assert!(config.mines >= HEXAGON_RANDOM_MIN_MINES);
            assert!(config.mines <= config.total_cells() - 7);
        }
    }

    #[test]
    fn custom_accepts_valid_board() {
        let setup = GameSetup::custom(12, 20, 50).unwrap();

        assert_eq!(setup.mode, Mode::Custom);
        assert_eq!(setup.difficulty, None);
        assert_eq!(setup.config.size, (20, 12));
        assert_eq!(setup.config.mines, 50);
    }

    #[test]
    fn custom_rejects_out_of_range_input() {
        assert_eq!(
            GameSetup::custom(9, 10, 10),
            Err(ConfigError::DimensionOutOfRange { min: 10, max: 30 })
        );
        assert_eq!(
            GameSetup::custom(10, 1000, 10),
            Err(ConfigError::DimensionOutOfRange { min: 10, max: 30 })
        );
        assert_eq!(
            GameSetup::custom(10, 10, 9),
            Err(ConfigError::TooFewMines { min: 10 })
        );
        assert_eq!(
            GameSetup::custom(10, 10, 92),
            Err(ConfigError::TooManyMines {
                mines: 92,
                max: 91,
                width: 10,
                height: 10
            })
        );
        assert!(GameSetup::custom(10, 10, 91).is_ok());
    }

    #[test]
    fn custom_errors_read_as_messages() {
        let err = GameSetup::custom(10, 10, 200).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Mines (200) exceed maximum allowed (91) for a 10x10 grid to ensure safe first click."
        );
    }
}
