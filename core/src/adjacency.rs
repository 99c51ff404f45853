use ndarray::Array2;

use crate::*;

/// Mine-adjacency count of every cell, computed once per layout.
///
/// Mine cells are left at zero, their count is never shown.
pub fn compute_adjacency(layout: &MineLayout) -> Array2<u8> {
    let (rows, cols) = layout.size();
    let mut counts: Array2<u8> = Array2::zeros(layout.size().to_nd_index());

    for row in 0..rows {
        for col in 0..cols {
            let coords = (row, col);
            if !layout.contains_mine(coords) {
                counts[coords.to_nd_index()] = layout.adjacent_mine_count(coords);
            }
        }
    }

    counts
}
