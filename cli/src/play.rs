use std::io::{BufRead, Write};

use anyhow::Result;
use hexsweep_core::{Coord, Coord2, GameError, GameSession, SessionState, format_time};
use hexsweep_leaderboard::{LeaderboardStore, RecordOutcome};

use crate::render::render_board;

const SKIP_NAME: &str = "-";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Help,
    Quit,
}

fn parse_command(line: &str) -> core::result::Result<Command, String> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default().to_lowercase();
    let mut coords = || -> core::result::Result<Coord2, String> {
        let mut next = |what: &str| -> core::result::Result<Coord, String> {
            parts
                .next()
                .ok_or_else(|| format!("Usage: {verb} ROW COL"))?
                .parse::<Coord>()
                .map_err(|_| format!("Invalid {what}"))
        };
        let row = next("row")?;
        let col = next("col")?;
        Ok((row, col))
    };

    match verb.as_str() {
        "r" | "reveal" => coords().map(Command::Reveal),
        "f" | "flag" => coords().map(Command::Flag),
        "h" | "help" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        _ => Err(format!("Unknown command '{}', type 'h' for help", line.trim())),
    }
}

fn print_help(out: &mut impl Write) -> Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  r ROW COL  reveal a cell")?;
    writeln!(out, "  f ROW COL  toggle a flag")?;
    writeln!(out, "  q          quit")?;
    writeln!(out, "  h          show this help")?;
    Ok(())
}

fn print_status(
    out: &mut impl Write,
    session: &GameSession,
    changed: &[Coord2],
    color: bool,
) -> Result<()> {
    write!(out, "\n{}", render_board(session, changed, color))?;
    writeln!(
        out,
        "Mines left: {}  Time: {}",
        session.mines_left(),
        format_time(session.elapsed_secs())
    )?;
    Ok(())
}

/// Runs one game on `input`/`out` until it is won, lost or abandoned.
///
/// A win is offered to `store`, the name prompt reads from the same input.
pub fn play<R: BufRead, W: Write>(
    mut session: GameSession,
    input: &mut R,
    out: &mut W,
    store: &LeaderboardStore,
    color: bool,
) -> Result<SessionState> {
    let setup = *session.setup();
    let (rows, cols) = setup.config.size;
    match setup.difficulty {
        Some(difficulty) => write!(out, "{} {difficulty}", setup.mode)?,
        None => write!(out, "{}", setup.mode)?,
    }
    writeln!(out, ": {rows}x{cols}, {} mines. Type 'h' for help.", setup.config.mines)?;

    let mut line = String::new();
    let mut changed = Vec::new();
    while !session.is_finished() {
        print_status(out, &session, &changed, color)?;
        changed.clear();
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            log::debug!("Input closed, abandoning game");
            return Ok(session.state());
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(msg) => {
                writeln!(out, "{msg}")?;
                continue;
            }
        };
        let result = match command {
            Command::Help => {
                print_help(out)?;
                continue;
            }
            Command::Quit => return Ok(session.state()),
            Command::Reveal(coords) => session
                .on_primary_action(coords)
                .map(|outcome| outcome.has_update()),
            Command::Flag(coords) => session
                .on_secondary_action(coords)
                .map(|outcome| outcome.has_update()),
        };
        match result {
            Ok(true) => {
                changed.extend(session.drain_dirty());
                log::debug!("{} cells changed", changed.len());
            }
            Ok(false) => writeln!(out, "Nothing to do there")?,
            Err(GameError::InvalidCoords) => {
                writeln!(out, "Out of bounds, the board is {rows} rows by {cols} columns")?
            }
            Err(err) => return Err(err.into()),
        }
    }

    print_status(out, &session, &changed, color)?;
    match session.state() {
        SessionState::Won => {
            writeln!(out, "Cleared in {}!", format_time(session.elapsed_secs()))?;
            if let Some(result) = session.result() {
                let mut prompt = |title: &str| ask_name(title, input, out);
                report(store.record_result(&result, &mut prompt), out)?;
            }
        }
        SessionState::Lost => writeln!(out, "Boom! Game over.")?,
        _ => {}
    }
    Ok(session.state())
}

fn ask_name<R: BufRead, W: Write>(title: &str, input: &mut R, out: &mut W) -> Option<String> {
    write!(out, "{title} Enter your name ('-' to skip): ").ok()?;
    out.flush().ok()?;
    let mut name = String::new();
    match input.read_line(&mut name) {
        Ok(0) | Err(_) => None,
        Ok(_) if name.trim() == SKIP_NAME => None,
        Ok(_) => Some(name),
    }
}

fn report(outcome: RecordOutcome, out: &mut impl Write) -> Result<()> {
    match outcome {
        RecordOutcome::NotQualified => {
            writeln!(out, "Not fast enough for the leaderboard this time.")?
        }
        RecordOutcome::Declined => writeln!(out, "Score not saved.")?,
        RecordOutcome::Recorded { rank } => {
            writeln!(out, "Saved as #{} on the leaderboard.", rank + 1)?
        }
    }
    Ok(())
}

pub fn exit_code(state: SessionState) -> u8 {
    match state {
        SessionState::Won => 0,
        SessionState::Lost => 1,
        SessionState::NotStarted | SessionState::InProgress => 2,
    }
}
