use ndarray::Array2;
use rand::prelude::*;
use smallvec::SmallVec;

use super::*;

/// Generation strategy that keeps the first revealed cell and all of its neighbours free of mines,
/// every other cell has the same chance of holding one.
#[derive(Clone, Debug, PartialEq)]
pub struct SafeZoneGenerator {
    seed: u64,
    start: Coord2,
}

impl SafeZoneGenerator {
    pub fn new(seed: u64, start: Coord2) -> Self {
        Self { seed, start }
    }
}

impl MinefieldGenerator for SafeZoneGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        place_mines(config, self.start, &mut rng)
    }
}

/// The clicked cell plus its in-bounds neighbours.
pub fn safe_zone(topology: Topology, size: Coord2, safe: Coord2) -> SmallVec<[Coord2; 9]> {
    let mut zone = SmallVec::new();
    zone.push(safe);
    zone.extend(topology.neighbors(safe, size));
    zone
}

/// Places `config.mines` mines outside the safe zone around `safe`.
///
/// Requests that do not fit are clamped to the number of cells left outside the safe zone, so the
/// returned layout may hold fewer mines than asked for.
pub fn place_mines<R: Rng + ?Sized>(config: GameConfig, safe: Coord2, rng: &mut R) -> MineLayout {
    let GameConfig {
        topology,
        size: (rows, cols),
        mines,
    } = config;
    let zone = safe_zone(topology, config.size, safe);

    let mut candidates: Vec<Coord2> = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .filter(|coords| !zone.contains(coords))
        .collect();
    candidates.shuffle(rng);

    let capacity = candidates.len() as CellCount;
    if mines > capacity {
        log::warn!(
            "Safe zone leaves room for {} mines, requested {}, placing {}",
            capacity,
            mines,
            capacity
        );
    }
    let mine_count = mines.min(capacity);

    let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
    for &coords in &candidates[..mine_count as usize] {
        mine_mask[coords.to_nd_index()] = true;
    }

    log::debug!(
        "Placed {} mines on {:?} {}x{} board, safe start at {:?}",
        mine_count,
        topology,
        rows,
        cols,
        safe
    );
    MineLayout::new_unchecked(topology, mine_mask, mine_count)
}
