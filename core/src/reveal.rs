use hashbrown::HashSet;

use crate::*;

/// Opens `start` and, through zero-count cells, the whole connected region around it.
///
/// Uses an explicit work stack so large empty boards cannot overflow the call stack. Flagged and
/// mined cells are never opened, cells with a nonzero count are opened but do not spread. Returns
/// the newly opened cells in the order they were opened.
pub fn flood_reveal(board: &mut Board, start: Coord2) -> Vec<Coord2> {
    let mut opened = Vec::new();
    let mut visited = HashSet::new();
    let mut to_visit = vec![start];

    while let Some(coords) = to_visit.pop() {
        if visited.contains(&coords) {
            continue;
        }

        let cell = board.cell_at(coords);
        if !cell.is_hidden() || cell.is_mine {
            log::trace!("Skipping cell at {:?}", coords);
            continue;
        }

        visited.insert(coords);
        board.open(coords);
        opened.push(coords);
        log::trace!(
            "Flood opened cell at {:?}, mine count: {}",
            coords,
            cell.adjacent_mines
        );

        if cell.adjacent_mines == 0 {
            to_visit.extend(
                board
                    .iter_neighbors(coords)
                    .filter(|&pos| {
                        let neighbor = board.cell_at(pos);
                        neighbor.is_hidden() && !neighbor.is_mine
                    })
                    .filter(|pos| !visited.contains(pos)),
            );
        }
    }

    opened
}
