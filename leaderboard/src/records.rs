use core::cmp::Ordering;

use hexsweep_core::{Difficulty, Mode};
use serde::{Deserialize, Serialize};

/// Entries kept per table.
pub const TABLE_LIMIT: usize = 10;

/// Whole leaderboard file.
///
/// Every key is required, a file missing one is treated as corrupt and replaced by the empty
/// default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub classic: DifficultyTables,
    pub hexagon: DifficultyTables,
    pub custom_mode: CustomTable,
}

impl Leaderboard {
    /// Table of a classic or hexagon difficulty, custom mode has a single table of its own.
    pub fn table(&self, mode: Mode, difficulty: Difficulty) -> Option<&[Record]> {
        let tables = match mode {
            Mode::Classic => &self.classic,
            Mode::Hexagon => &self.hexagon,
            Mode::Custom => return None,
        };
        Some(tables.table(difficulty))
    }

    pub(crate) fn table_mut(
        &mut self,
        mode: Mode,
        difficulty: Difficulty,
    ) -> Option<&mut Vec<Record>> {
        let tables = match mode {
            Mode::Classic => &mut self.classic,
            Mode::Hexagon => &mut self.hexagon,
            Mode::Custom => return None,
        };
        Some(tables.table_mut(difficulty))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DifficultyTables {
    pub beginner: Vec<Record>,
    pub intermediate: Vec<Record>,
    pub expert: Vec<Record>,
    pub random: Vec<Record>,
}

impl DifficultyTables {
    pub fn table(&self, difficulty: Difficulty) -> &[Record] {
        match difficulty {
            Difficulty::Beginner => &self.beginner,
            Difficulty::Intermediate => &self.intermediate,
            Difficulty::Expert => &self.expert,
            Difficulty::Random => &self.random,
        }
    }

    fn table_mut(&mut self, difficulty: Difficulty) -> &mut Vec<Record> {
        match difficulty {
            Difficulty::Beginner => &mut self.beginner,
            Difficulty::Intermediate => &mut self.intermediate,
            Difficulty::Expert => &mut self.expert,
            Difficulty::Random => &mut self.random,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomTable {
    pub records: Vec<CustomRecord>,
}

/// Classic or hexagon entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub time: f64,
    /// Mines per cell, only on random boards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proportion: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomRecord {
    pub name: String,
    pub mine_percentage: f64,
    pub time: f64,
    pub config: String,
}

/// Fastest first.
pub fn by_time(a: &Record, b: &Record) -> Ordering {
    a.time.total_cmp(&b.time)
}

/// Densest board first, fastest among equal densities.
pub fn by_proportion_then_time(a: &Record, b: &Record) -> Ordering {
    let a_proportion = a.proportion.unwrap_or(0.0);
    let b_proportion = b.proportion.unwrap_or(0.0);
    b_proportion
        .total_cmp(&a_proportion)
        .then_with(|| by_time(a, b))
}

pub fn by_percentage_then_time(a: &CustomRecord, b: &CustomRecord) -> Ordering {
    b.mine_percentage
        .total_cmp(&a.mine_percentage)
        .then_with(|| a.time.total_cmp(&b.time))
}

/// Whether `entry` would make it into `records` under `cmp`.
///
/// A full table only takes entries that strictly beat its last one, ties keep the older entry.
pub fn qualifies<T>(records: &[T], entry: &T, cmp: impl Fn(&T, &T) -> Ordering) -> bool {
    if records.len() < TABLE_LIMIT {
        return true;
    }
    records
        .iter()
        .max_by(|a, b| cmp(a, b))
        .is_none_or(|last| cmp(entry, last).is_lt())
}

/// Inserts `entry` behind every entry ranked equal or better, then cuts the table to
/// [`TABLE_LIMIT`].
///
/// Returns the 0-based rank of the new entry, or `None` if it fell off the end.
pub fn insert_ranked<T>(
    records: &mut Vec<T>,
    entry: T,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Option<usize> {
    records.sort_by(|a, b| cmp(a, b));
    let rank = records.partition_point(|record| cmp(record, &entry).is_le());
    records.insert(rank, entry);
    records.truncate(TABLE_LIMIT);
    (rank < TABLE_LIMIT).then_some(rank)
}
