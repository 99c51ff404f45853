use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Adjacency rule of a board.
///
/// Hex boards use offset rows where every odd row is drawn shifted right by
/// half a cell, so only the diagonal offsets depend on row parity.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topology {
    #[default]
    Square,
    Hex,
}

const SQUARE_DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const HEX_EVEN_ROW_DISPLACEMENTS: [(isize, isize); 6] =
    [(0, -1), (0, 1), (-1, -1), (-1, 0), (1, -1), (1, 0)];

const HEX_ODD_ROW_DISPLACEMENTS: [(isize, isize); 6] =
    [(0, -1), (0, 1), (-1, 0), (-1, 1), (1, 0), (1, 1)];

impl Topology {
    /// Upper bound on the neighbour count of any cell.
    pub const fn max_neighbors(self) -> usize {
        match self {
            Self::Square => SQUARE_DISPLACEMENTS.len(),
            Self::Hex => HEX_ODD_ROW_DISPLACEMENTS.len(),
        }
    }

    fn displacements(self, row: Coord) -> &'static [(isize, isize)] {
        match self {
            Self::Square => &SQUARE_DISPLACEMENTS,
            Self::Hex if row % 2 == 1 => &HEX_ODD_ROW_DISPLACEMENTS,
            Self::Hex => &HEX_EVEN_ROW_DISPLACEMENTS,
        }
    }

    /// In-bounds neighbours of `coords` on a board of `size` `(rows, cols)`.
    pub fn neighbors(self, coords: Coord2, size: Coord2) -> NeighborIter {
        NeighborIter::new(self.displacements(coords.0), coords, size)
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

#[derive(Debug, Clone)]
pub struct NeighborIter {
    displacements: &'static [(isize, isize)],
    center: Coord2,
    bounds: Coord2,
    index: usize,
}

impl NeighborIter {
    fn new(displacements: &'static [(isize, isize)], center: Coord2, bounds: Coord2) -> Self {
        Self {
            displacements,
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let &delta = self.displacements.get(self.index)?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}
