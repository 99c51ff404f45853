use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use hexsweep_core::{Difficulty, GameSession, GameSetup, Mode};
use hexsweep_leaderboard::{DEFAULT_FILE_NAME, LeaderboardStore};
use log::LevelFilter;
use rand::prelude::*;

mod play;
mod render;
mod scores;
mod seed;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper on square and hexagonal boards", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Leaderboard file
    #[arg(long, global = true, default_value = DEFAULT_FILE_NAME)]
    leaderboard: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a game in the terminal
    Play {
        #[command(subcommand)]
        mode: PlayMode,
    },
    /// Show the leaderboard
    Scores {
        #[arg(value_enum)]
        mode: Option<ModeArg>,
    },
}

#[derive(Subcommand, Debug)]
enum PlayMode {
    /// Square board with eight neighbours per cell
    Classic(PresetArgs),
    /// Hexagonal board with six neighbours per cell
    Hexagon(PresetArgs),
    /// Square board of your own size
    Custom(CustomArgs),
}

#[derive(clap::Args, Debug)]
struct PresetArgs {
    #[arg(short, long, value_enum, default_value_t = DifficultyArg::Beginner)]
    difficulty: DifficultyArg,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<String>,
}

#[derive(clap::Args, Debug)]
struct CustomArgs {
    #[arg(long)]
    width: u32,
    #[arg(long)]
    height: u32,
    #[arg(long)]
    mines: u32,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<String>,
}

#[derive(ValueEnum, Copy, Clone, Debug)]
enum DifficultyArg {
    Beginner,
    Intermediate,
    Expert,
    Random,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Beginner => Difficulty::Beginner,
            DifficultyArg::Intermediate => Difficulty::Intermediate,
            DifficultyArg::Expert => Difficulty::Expert,
            DifficultyArg::Random => Difficulty::Random,
        }
    }
}

#[derive(ValueEnum, Copy, Clone, Debug)]
enum ModeArg {
    Classic,
    Hexagon,
    Custom,
}

impl From<ModeArg> for Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Classic => Mode::Classic,
            ModeArg::Hexagon => Mode::Hexagon,
            ModeArg::Custom => Mode::Custom,
        }
    }
}

fn setup_game(mode: PlayMode) -> Result<(GameSetup, u64)> {
    let (mode, preset, seed) = match mode {
        PlayMode::Classic(args) => (Mode::Classic, args.difficulty, args.seed),
        PlayMode::Hexagon(args) => (Mode::Hexagon, args.difficulty, args.seed),
        PlayMode::Custom(args) => {
            let setup = GameSetup::custom(args.width, args.height, args.mines)?;
            return Ok((setup, seed::resolve_seed(args.seed.as_deref())));
        }
    };

    let seed = seed::resolve_seed(seed.as_deref());
    log::debug!("seed: {seed}");
    // random sizes come from the same seed as the mines
    let mut rng = SmallRng::seed_from_u64(seed);
    let setup = GameSetup::preset(mode, preset.into(), &mut rng)
        .with_context(|| format!("{mode} has no preset difficulties"))?;
    Ok((setup, rng.random()))
}

fn run(args: Args) -> Result<ExitCode> {
    let store = LeaderboardStore::new(args.leaderboard);

    match args.command {
        Command::Play { mode } => {
            let (setup, seed) = setup_game(mode)?;
            let color = io::stdout().is_terminal();
            let state = play::play(
                GameSession::new(setup, seed),
                &mut io::stdin().lock(),
                &mut io::stdout().lock(),
                &store,
                color,
            )?;
            Ok(ExitCode::from(play::exit_code(state)))
        }
        Command::Scores { mode } => {
            let leaderboard = store.load();
            scores::print_scores(&mut io::stdout().lock(), &leaderboard, mode.map(Mode::from))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(level: LevelFilter) -> Result<()> {
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .try_init()
        .context("Error initializing logger")
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose.log_level_filter())?;
    log::debug!("{args:?}");

    run(args)
}
