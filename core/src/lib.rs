use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use adjacency::*;
pub use board::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use reveal::*;
pub use session::*;
pub use tile::*;
pub use types::*;
pub use win::*;

mod adjacency;
mod board;
mod config;
mod error;
mod generator;
mod reveal;
mod session;
mod tile;
mod types;
mod win;

/// Board shape plus the number of mines the player asked for.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub topology: Topology,
    /// `(rows, cols)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(topology: Topology, size: Coord2, mines: CellCount) -> Self {
        Self {
            topology,
            size,
            mines,
        }
    }

    pub fn new(topology: Topology, (rows, cols): Coord2, mines: CellCount) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, Coord::MAX);
        let mines = mines.min(mult(rows, cols));
        Self::new_unchecked(topology, (rows, cols), mines)
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Immutable mine placement of one session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    topology: Topology,
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(topology: Topology, mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let max = usize::from(Coord::MAX);
        if rows == 0 || cols == 0 || rows > max || cols > max {
            return Err(GameError::InvalidBoardShape);
        }

        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Ok(Self::new_unchecked(topology, mine_mask, mine_count))
    }

    pub(crate) fn new_unchecked(
        topology: Topology,
        mine_mask: Array2<bool>,
        mine_count: CellCount,
    ) -> Self {
        Self {
            topology,
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(
        topology: Topology,
        size: Coord2,
        mine_coords: &[Coord2],
    ) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(topology, mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.topology, self.size(), self.mine_count)
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// `(rows, cols)`, both fit in [`Coord`] by construction.
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.topology.neighbors(coords, self.size())
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.mine_mask[(row as usize, col as usize)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
