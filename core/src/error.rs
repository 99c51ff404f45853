use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Rejected custom board setup, the message is shown to the player as is.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Width/Height must be between {min} and {max}.")]
    DimensionOutOfRange { min: Coord, max: Coord },
    #[error("Mines must be >= {min}.")]
    TooFewMines { min: CellCount },
    #[error("Mines ({mines}) exceed maximum allowed ({max}) for a {width}x{height} grid to ensure safe first click.")]
    TooManyMines {
        mines: u32,
        max: CellCount,
        width: Coord,
        height: Coord,
    },
}
