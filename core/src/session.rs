use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No mines placed yet
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl SessionState {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from the first click to a win or a loss.
///
/// Mines are placed lazily on the first accepted reveal so that click can never hit one. Every cell
/// that changes is queued as dirty until the front end drains it for redrawing.
#[derive(Clone, Debug)]
pub struct GameSession {
    setup: GameSetup,
    seed: u64,
    board: Board,
    layout: Option<MineLayout>,
    state: SessionState,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    triggered_mine: Option<Coord2>,
    dirty: Vec<Coord2>,
}

impl GameSession {
    pub fn new(setup: GameSetup, seed: u64) -> Self {
        Self {
            board: Board::new(setup.config),
            setup,
            seed,
            layout: None,
            state: SessionState::default(),
            started_at: None,
            ended_at: None,
            triggered_mine: None,
            dirty: Vec::new(),
        }
    }

    pub fn setup(&self) -> &GameSetup {
        &self.setup
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn layout(&self) -> Option<&MineLayout> {
        self.layout.as_ref()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn topology(&self) -> Topology {
        self.board.topology()
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Placed mines once the game started, the requested amount before that.
    pub fn total_mines(&self) -> CellCount {
        self.layout
            .as_ref()
            .map_or(self.setup.config.mines, MineLayout::mine_count)
    }

    /// How many mines have not been flagged yet
    pub fn mines_left(&self) -> isize {
        (self.total_mines() as isize) - (self.board.flagged_count() as isize)
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs_at(Instant::now())
    }

    /// Seconds since the first reveal, frozen once the game ends, 0 if it hasn't started
    pub fn elapsed_secs_at(&self, now: Instant) -> f64 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        self.ended_at
            .unwrap_or(now)
            .saturating_duration_since(started_at)
            .as_secs_f64()
    }

    /// Left click.
    pub fn on_primary_action(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.on_primary_action_at(coords, Instant::now())
    }

    pub fn on_primary_action_at(&mut self, coords: Coord2, now: Instant) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() || !self.board.cell_at(coords).is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        if self.layout.is_none() {
            self.start(coords, now);
        }

        if self.board.cell_at(coords).is_mine {
            log::debug!("Hit mine at {:?}", coords);
            self.triggered_mine = Some(coords);
            self.board.open(coords);
            self.dirty.push(coords);
            let disclosed = self.board.disclose_mines();
            self.dirty.extend(disclosed);
            self.end(false, now);
            return Ok(RevealOutcome::HitMine);
        }

        let opened = flood_reveal(&mut self.board, coords);
        log::debug!("Open cell at {:?}, {} cells opened", coords, opened.len());
        self.dirty.extend(opened);

        if is_won(&self.board) {
            self.end(true, now);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Right click, toggles a flag on a hidden cell.
    pub fn on_secondary_action(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let outcome = self.board.toggle_flag(coords);
        if outcome.has_update() {
            self.dirty.push(coords);
        }
        Ok(outcome)
    }

    /// Cells changed since the last call, in the order they changed.
    pub fn drain_dirty(&mut self) -> impl Iterator<Item = Coord2> + '_ {
        self.dirty.drain(..)
    }

    pub fn tile_at(&self, coords: Coord2) -> TileView {
        let cell = self.board.cell_at(coords);

        match (self.state, cell.is_mine, cell.state) {
            (SessionState::Lost, true, CellState::Revealed)
                if self.triggered_mine == Some(coords) =>
            {
                TileView::TriggeredMine
            }
            (SessionState::Lost, true, CellState::Revealed) => TileView::Mine,
            (SessionState::Lost, false, CellState::Flagged) => TileView::Misflagged,
            (SessionState::Won, true, CellState::Hidden) => TileView::AutoFlagged,
            (_, _, CellState::Hidden) => TileView::Hidden,
            (_, _, CellState::Flagged) => TileView::Flagged,
            (_, _, CellState::Revealed) => TileView::Open(cell.adjacent_mines),
        }
    }

    /// What the leaderboard needs to know about a won game.
    pub fn result(&self) -> Option<GameResult> {
        if self.state != SessionState::Won {
            return None;
        }
        let ended_at = self.ended_at?;

        Some(GameResult {
            mode: self.setup.mode,
            difficulty: self.setup.difficulty,
            elapsed_secs: self.elapsed_secs_at(ended_at),
            size: self.size(),
            mines: self.total_mines(),
        })
    }

    fn start(&mut self, safe: Coord2, now: Instant) {
        let layout = SafeZoneGenerator::new(self.seed, safe).generate(self.setup.config);
        let adjacency = compute_adjacency(&layout);
        self.board.arm(&layout, &adjacency);
        log::debug!(
            "Game started at {:?} with {} of {} requested mines",
            safe,
            layout.mine_count(),
            self.setup.config.mines
        );

        self.layout = Some(layout);
        self.state = SessionState::InProgress;
        self.started_at = Some(now);
    }

    fn end(&mut self, won: bool, now: Instant) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            SessionState::Won
        } else {
            SessionState::Lost
        };
        self.ended_at = Some(now);

        if won {
            // unflagged mines are drawn as flags now
            if let Some(layout) = &self.layout {
                self.dirty.extend(layout.mine_coords());
            }
        }
        log::debug!("Game ended, won: {}", won);
    }
}

/// `mm:ss.xx`, negative durations show as zero.
pub fn format_time(secs: f64) -> String {
    let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
    let minutes = (secs / 60.0).floor();
    let rest = secs - minutes * 60.0;
    format!("{:02}:{:05.2}", minutes as u64, rest)
}
