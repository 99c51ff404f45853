use serde::{Deserialize, Serialize};

/// Player-facing state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

/// One board cell. `adjacent_mines` is filled in once mines are placed and never changes
/// afterwards.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub adjacent_mines: u8,
    pub state: CellState,
}

impl Cell {
    pub const fn is_revealed(self) -> bool {
        matches!(self.state, CellState::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.state, CellState::Flagged)
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self.state, CellState::Hidden)
    }
}

/// What a front end draws for a cell, derived from the board and the session outcome.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileView {
    Hidden,
    Flagged,
    Open(u8),
    TriggeredMine,
    Mine,
    Misflagged,
    // only shown after a win, mines the player never flagged
    AutoFlagged,
}

/// Text colour of a revealed count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CountColor {
    Blue,
    Green,
    Red,
    DarkBlue,
    Maroon,
    Teal,
    Black,
    Gray,
}

impl CountColor {
    /// Colour for an adjacency count, zero has no label.
    pub const fn for_count(count: u8) -> Option<Self> {
        use CountColor::*;
        Some(match count {
            1 => Blue,
            2 => Green,
            3 => Red,
            4 => DarkBlue,
            5 => Maroon,
            6 => Teal,
            7 => Black,
            8 => Gray,
            _ => return None,
        })
    }

    pub const fn name(self) -> &'static str {
        use CountColor::*;
        match self {
            Blue => "blue",
            Green => "green",
            Red => "red",
            DarkBlue => "darkblue",
            Maroon => "maroon",
            Teal => "teal",
            Black => "black",
            Gray => "gray",
        }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        use CountColor::*;
        match self {
            Blue => (0, 0, 255),
            Green => (0, 128, 0),
            Red => (255, 0, 0),
            DarkBlue => (0, 0, 139),
            Maroon => (128, 0, 0),
            Teal => (0, 128, 128),
            Black => (0, 0, 0),
            Gray => (128, 128, 128),
        }
    }
}
