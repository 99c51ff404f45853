use core::cmp::Ordering;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use hexsweep_core::{Difficulty, GameResult, Mode};

use crate::*;

pub const DEFAULT_FILE_NAME: &str = "leaderboard_data.json";

const RANKED_TITLE: &str = "New High Score!";
const CUSTOM_TITLE: &str = "Custom Mode Leaderboard";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardSpec {
    pub width: u32,
    pub height: u32,
    pub mines: u32,
}

impl BoardSpec {
    /// Mines per cell.
    pub fn density(&self) -> f64 {
        let cells = self.width * self.height;
        if cells == 0 {
            0.0
        } else {
            f64::from(self.mines) / f64::from(cells)
        }
    }
}

/// A finished game as the leaderboard sees it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Submission {
    /// Classic or hexagon. Only random boards carry their dimensions.
    Ranked {
        mode: Mode,
        difficulty: Difficulty,
        time: f64,
        board: Option<BoardSpec>,
    },
    Custom { time: f64, board: BoardSpec },
}

impl Submission {
    /// `None` for a classic or hexagon result without a difficulty.
    pub fn from_result(result: &GameResult) -> Option<Self> {
        let board = BoardSpec {
            width: result.width().into(),
            height: result.height().into(),
            mines: result.mines.into(),
        };
        match (result.mode, result.difficulty) {
            (Mode::Custom, _) => Some(Self::Custom {
                time: result.elapsed_secs,
                board,
            }),
            (mode, Some(difficulty)) => Some(Self::Ranked {
                mode,
                difficulty,
                time: result.elapsed_secs,
                board: (difficulty == Difficulty::Random).then_some(board),
            }),
            (_, None) => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Not good enough for the table, the player was never asked.
    NotQualified,
    /// The player cancelled the name prompt.
    Declined,
    /// 0-based position in its table.
    Recorded { rank: usize },
}

/// Leaderboard file on disk.
///
/// Every call reads the file fresh and writes it back whole.
#[derive(Clone, Debug)]
pub struct LeaderboardStore {
    path: PathBuf,
}

impl Default for LeaderboardStore {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_NAME)
    }
}

impl LeaderboardStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the leaderboard, falling back to an empty one when the file is missing or unusable.
    pub fn load(&self) -> Leaderboard {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("No leaderboard at {}, starting empty", self.path.display());
                return Leaderboard::default();
            }
            Err(err) => {
                log::warn!(
                    "Could not read leaderboard {}: {err}, starting empty",
                    self.path.display()
                );
                return Leaderboard::default();
            }
        };

        if text.trim().is_empty() {
            log::warn!("Leaderboard {} is empty, starting empty", self.path.display());
            return Leaderboard::default();
        }

        match serde_json::from_str(&text) {
            Ok(leaderboard) => leaderboard,
            Err(err) => {
                log::warn!(
                    "Leaderboard {} is corrupt ({err}), starting empty",
                    self.path.display()
                );
                Leaderboard::default()
            }
        }
    }

    pub fn save(&self, leaderboard: &Leaderboard) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut json = serde_json::to_string_pretty(leaderboard)?;
        json.push('\n');
        fs::write(&self.path, json)?;
        log::debug!("Saved leaderboard to {}", self.path.display());
        Ok(())
    }

    /// Offers a won game to the leaderboard, asking for a name only if it makes the table.
    pub fn record_result(&self, result: &GameResult, prompt: &mut dyn NamePrompt) -> RecordOutcome {
        match Submission::from_result(result) {
            Some(submission) => self.submit(submission, prompt),
            None => {
                log::warn!("Result without a difficulty cannot be ranked: {result:?}");
                RecordOutcome::NotQualified
            }
        }
    }

    pub fn submit(&self, submission: Submission, prompt: &mut dyn NamePrompt) -> RecordOutcome {
        let mut leaderboard = self.load();

        let rank = match submission {
            Submission::Ranked {
                mode,
                difficulty,
                time,
                board,
            } => {
                let Some(table) = leaderboard.table_mut(mode, difficulty) else {
                    log::warn!("{mode} has no {difficulty} table");
                    return RecordOutcome::NotQualified;
                };
                let mut entry = Record {
                    name: String::new(),
                    time,
                    proportion: None,
                    config: None,
                };
                let cmp: fn(&Record, &Record) -> Ordering = match (difficulty, board) {
                    (Difficulty::Random, Some(board)) => {
                        entry.proportion = Some(board.density());
                        entry.config = Some(format!(
                            "{}x{}, {}m",
                            board.width, board.height, board.mines
                        ));
                        by_proportion_then_time
                    }
                    (Difficulty::Random, None) => {
                        entry.config = Some("N/A".to_owned());
                        by_time
                    }
                    _ => by_time,
                };

                if !qualifies(table.as_slice(), &entry, cmp) {
                    return RecordOutcome::NotQualified;
                }
                let Some(name) = prompt.ask_name(RANKED_TITLE) else {
                    return RecordOutcome::Declined;
                };
                entry.name = normalize_name(&name);
                insert_ranked(table, entry, cmp)
            }
            Submission::Custom { time, board } => {
                let density = board.density();
                let mut entry = CustomRecord {
                    name: String::new(),
                    mine_percentage: density,
                    time,
                    config: format!(
                        "{}x{}, {}m ({:.1}%)",
                        board.width,
                        board.height,
                        board.mines,
                        density * 100.0
                    ),
                };
                let table = &mut leaderboard.custom_mode.records;

                if !qualifies(table.as_slice(), &entry, by_percentage_then_time) {
                    return RecordOutcome::NotQualified;
                }
                let Some(name) = prompt.ask_name(CUSTOM_TITLE) else {
                    return RecordOutcome::Declined;
                };
                entry.name = normalize_name(&name);
                insert_ranked(table, entry, by_percentage_then_time)
            }
        };

        let Some(rank) = rank else {
            return RecordOutcome::NotQualified;
        };
        if let Err(err) = self.save(&leaderboard) {
            log::error!("Could not save leaderboard {}: {err}", self.path.display());
        }
        log::debug!("Recorded {submission:?} at rank {}", rank + 1);
        RecordOutcome::Recorded { rank }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{self, AtomicUsize};

    use super::*;

    struct TempFile(PathBuf);

    impl TempFile {
        fn new(name: &str) -> Self {
            static COUNTER: AtomicUsize = AtomicUsize::new(0);
            let n = COUNTER.fetch_add(1, atomic::Ordering::Relaxed);
            let path = std::env::temp_dir()
                .join(format!("hexsweep-{}-{n}", std::process::id()))
                .join(format!("{name}.json"));
            Self(path)
        }

        fn store(&self) -> LeaderboardStore {
            LeaderboardStore::new(&self.0)
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            if let Some(dir) = self.0.parent() {
                let _ = fs::remove_dir_all(dir);
            }
        }
    }

    fn named(name: &'static str) -> impl FnMut(&str) -> Option<String> {
        move |_| Some(name.to_owned())
    }

    fn never_asked(_: &str) -> Option<String> {
        panic!("prompt should not be shown")
    }

    fn ranked(mode: Mode, difficulty: Difficulty, time: f64) -> Submission {
        Submission::Ranked {
            mode,
            difficulty,
            time,
            board: None,
        }
    }

    fn intermediate(time: f64) -> Submission {
        ranked(Mode::Classic, Difficulty::Intermediate, time)
    }

    fn random(time: f64, width: u32, height: u32, mines: u32) -> Submission {
        Submission::Ranked {
            mode: Mode::Classic,
            difficulty: Difficulty::Random,
            time,
            board: Some(BoardSpec {
                width,
                height,
                mines,
            }),
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let file = TempFile::new("missing");

        assert_eq!(file.store().load(), Leaderboard::default());
    }

    #[test]
    fn empty_and_corrupt_files_load_empty() {
        let file = TempFile::new("corrupt");
        let store = file.store();

        for contents in ["", "  \n", "{not json", r#"{"classic": []}"#, r#"{"classic": {}}"#] {
            fs::create_dir_all(file.0.parent().unwrap()).unwrap();
            fs::write(&file.0, contents).unwrap();

            assert_eq!(store.load(), Leaderboard::default(), "{contents:?}");
        }
    }

    #[test]
    fn saved_file_has_documented_layout() {
        let file = TempFile::new("layout");
        let store = file.store();

        let beginner = ranked(Mode::Classic, Difficulty::Beginner, 12.5);
        let outcome = store.submit(beginner, &mut named("Ada"));
        assert_eq!(outcome, RecordOutcome::Recorded { rank: 0 });

        let text = fs::read_to_string(&file.0).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "classic": {
                    "Beginner": [{"name": "Ada", "time": 12.5}],
                    "Intermediate": [],
                    "Expert": [],
                    "Random": [],
                },
                "hexagon": {
                    "Beginner": [],
                    "Intermediate": [],
                    "Expert": [],
                    "Random": [],
                },
                "custom_mode": {"records": []},
            })
        );
        let text = fs::read_to_string(&file.0).unwrap();
        assert!(text.starts_with("{\n  \"classic\": {\n    \"Beginner\""));
    }

    #[test]
    fn fixed_difficulty_ranks_by_time() {
        let file = TempFile::new("fixed");
        let store = file.store();

        store.submit(ranked(Mode::Hexagon, Difficulty::Expert, 80.0), &mut named("slow"));
        store.submit(ranked(Mode::Hexagon, Difficulty::Expert, 40.0), &mut named("fast"));

        let leaderboard = store.load();
        let table = leaderboard.table(Mode::Hexagon, Difficulty::Expert).unwrap();
        let names: Vec<_> = table.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["fast", "slow"]);
        assert!(leaderboard.classic.expert.is_empty());
    }

    #[test]
    fn random_records_carry_density_and_config() {
        let file = TempFile::new("random");
        let store = file.store();

        store.submit(random(30.0, 10, 10, 20), &mut named("a"));
        store.submit(random(90.0, 20, 10, 80), &mut named("b"));

        let leaderboard = store.load();
        let table = &leaderboard.classic.random;
        assert_eq!(table[0].name, "b");
        assert_eq!(table[0].proportion, Some(0.4));
        assert_eq!(table[0].config.as_deref(), Some("20x10, 80m"));
        assert_eq!(table[1].name, "a");
    }

    #[test]
    fn random_without_dimensions_is_not_applicable() {
        let file = TempFile::new("random-na");
        let store = file.store();

        store.submit(ranked(Mode::Classic, Difficulty::Random, 30.0), &mut named("a"));

        let record = &store.load().classic.random[0];
        assert_eq!(record.proportion, None);
        assert_eq!(record.config.as_deref(), Some("N/A"));
    }

    #[test]
    fn full_table_skips_prompt_for_non_qualifying_time() {
        let file = TempFile::new("full");
        let store = file.store();
        for i in 1..=10 {
            store.submit(intermediate(f64::from(i)), &mut named("p"));
        }

        let tie = store.submit(intermediate(10.0), &mut never_asked);
        assert_eq!(tie, RecordOutcome::NotQualified);

        let better = store.submit(intermediate(2.5), &mut named("new"));
        assert_eq!(better, RecordOutcome::Recorded { rank: 2 });

        let table = &store.load().classic.intermediate;
        assert_eq!(table.len(), TABLE_LIMIT);
        assert_eq!(table[2].name, "new");
        assert_eq!(table[9].time, 9.0);
    }

    #[test]
    fn cancelled_prompt_records_nothing() {
        let file = TempFile::new("cancel");
        let store = file.store();

        let mut cancel = |_: &str| -> Option<String> { None };
        let outcome = store.submit(ranked(Mode::Classic, Difficulty::Beginner, 5.0), &mut cancel);

        assert_eq!(outcome, RecordOutcome::Declined);
        assert!(!file.0.exists());
    }

    #[test]
    fn blank_name_is_saved_as_player() {
        let file = TempFile::new("blank");
        let store = file.store();

        store.submit(ranked(Mode::Classic, Difficulty::Beginner, 5.0), &mut named("   "));

        assert_eq!(store.load().classic.beginner[0].name, "Player");
    }

    #[test]
    fn custom_results_rank_by_mine_percentage() {
        let file = TempFile::new("custom");
        let store = file.store();
        let custom = |time, width, height, mines| Submission::Custom {
            time,
            board: BoardSpec {
                width,
                height,
                mines,
            },
        };

        store.submit(custom(20.0, 10, 10, 10), &mut named("sparse"));
        let outcome = store.submit(custom(200.0, 20, 20, 100), &mut named("dense"));

        assert_eq!(outcome, RecordOutcome::Recorded { rank: 0 });
        let records = store.load().custom_mode.records;
        assert_eq!(records[0].name, "dense");
        assert_eq!(records[0].mine_percentage, 0.25);
        assert_eq!(records[0].config, "20x20, 100m (25.0%)");
        assert_eq!(records[1].config, "10x10, 10m (10.0%)");
    }

    #[test]
    fn game_results_map_to_submissions() {
        let result = GameResult {
            mode: Mode::Hexagon,
            difficulty: Some(Difficulty::Random),
            elapsed_secs: 33.0,
            size: (12, 15),
            mines: 40,
        };

        assert_eq!(
            Submission::from_result(&result),
            Some(Submission::Ranked {
                mode: Mode::Hexagon,
                difficulty: Difficulty::Random,
                time: 33.0,
                board: Some(BoardSpec {
                    width: 15,
                    height: 12,
                    mines: 40
                }),
            })
        );

        let beginner = GameResult {
            difficulty: Some(Difficulty::Beginner),
            ..result
        };
        assert!(matches!(
            Submission::from_result(&beginner),
            Some(Submission::Ranked { board: None, .. })
        ));

        let unranked = GameResult {
            mode: Mode::Classic,
            difficulty: None,
            ..result
        };
        assert_eq!(Submission::from_result(&unranked), None);
    }

    #[test]
    fn record_result_saves_through_store() {
        let file = TempFile::new("record");
        let store = file.store();
        let result = GameResult {
            mode: Mode::Custom,
            difficulty: None,
            elapsed_secs: 61.25,
            size: (10, 12),
            mines: 30,
        };

        let outcome = store.record_result(&result, &mut named("Grace"));

        assert_eq!(outcome, RecordOutcome::Recorded { rank: 0 });
        let records = store.load().custom_mode.records;
        assert_eq!(records[0].config, "12x10, 30m (25.0%)");
        assert_eq!(records[0].time, 61.25);
    }

    #[test]
    fn unwritable_path_is_not_fatal() {
        let file = TempFile::new("blocked");
        // a regular file where the parent directory should be
        let parent = file.0.parent().unwrap().to_path_buf();
        fs::create_dir_all(parent.parent().unwrap()).unwrap();
        fs::write(&parent, "").unwrap();

        let store = file.store();
        let beginner = ranked(Mode::Classic, Difficulty::Beginner, 5.0);
        let outcome = store.submit(beginner, &mut named("a"));

        assert_eq!(outcome, RecordOutcome::Recorded { rank: 0 });
        assert!(store.save(&Leaderboard::default()).is_err());
        fs::remove_file(&parent).unwrap();
    }
}
