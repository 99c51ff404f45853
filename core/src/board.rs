use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Mutable per-cell state of one session, plain data indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    topology: Topology,
    cells: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
}

impl Board {
    pub fn new(config: GameConfig) -> Self {
        let GameConfig { topology, size, .. } = GameConfig::new(config.topology, config.size, 0);
        Self {
            topology,
            cells: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
        }
    }

    /// A board whose mines are already armed from `layout`.
    pub fn from_layout(layout: &MineLayout) -> Self {
        let mut board = Self::new(layout.game_config());
        board.arm(layout, &compute_adjacency(layout));
        board
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_mine).count() as CellCount
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.topology.neighbors(coords, self.size())
    }

    /// Copies mine positions and adjacency counts onto the board.
    pub fn arm(&mut self, layout: &MineLayout, adjacency: &Array2<u8>) {
        debug_assert_eq!(layout.size(), self.size());
        debug_assert_eq!(adjacency.dim(), self.cells.dim());

        for ((index, cell), &count) in self.cells.indexed_iter_mut().zip(adjacency.iter()) {
            cell.is_mine = layout[(index.0 as Coord, index.1 as Coord)];
            cell.adjacent_mines = count;
        }
    }

    /// Hidden and flagged swap, revealed cells ignore the request.
    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        let cell = &mut self.cells[coords.to_nd_index()];
        match cell.state {
            CellState::Hidden => {
                cell.state = CellState::Flagged;
                self.flagged_count += 1;
                MarkOutcome::Changed
            }
            CellState::Flagged => {
                cell.state = CellState::Hidden;
                self.flagged_count -= 1;
                MarkOutcome::Changed
            }
            CellState::Revealed => MarkOutcome::NoChange,
        }
    }

    /// Reveals a hidden cell, returns whether anything changed.
    pub(crate) fn open(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        if !cell.is_hidden() {
            return false;
        }
        cell.state = CellState::Revealed;
        if !cell.is_mine {
            self.revealed_count += 1;
        }
        true
    }

    /// Game-over sweep: reveals every unflagged mine.
    ///
    /// Returns the cells the sweep touched plus every flag on a safe cell, so a front end can
    /// redraw both.
    pub fn disclose_mines(&mut self) -> Vec<Coord2> {
        let mut touched = Vec::new();
        for ((row, col), cell) in self.cells.indexed_iter_mut() {
            let coords = (row as Coord, col as Coord);
            match (cell.is_mine, cell.state) {
                (true, CellState::Hidden) => {
                    cell.state = CellState::Revealed;
                    touched.push(coords);
                }
                (false, CellState::Flagged) => touched.push(coords),
                _ => {}
            }
        }
        touched
    }
}
