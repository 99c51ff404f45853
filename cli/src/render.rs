use core::fmt::Write;

use hexsweep_core::{Coord2, CountColor, GameSession, TileView, Topology};

const RESET: &str = "\x1b[0m";
const UNDERLINE: &str = "\x1b[4m";

fn glyph(tile: TileView) -> char {
    match tile {
        TileView::Hidden => '.',
        TileView::Flagged | TileView::AutoFlagged => 'F',
        TileView::Open(0) => ' ',
        TileView::Open(n) => char::from(b'0' + n.min(9)),
        TileView::TriggeredMine => 'X',
        TileView::Mine => '*',
        TileView::Misflagged => '!',
    }
}

fn paint(out: &mut String, tile: TileView, highlight: bool, color: bool) {
    let ch = glyph(tile);
    if !color {
        out.push(ch);
        return;
    }

    let rgb = match tile {
        TileView::Open(n) => CountColor::for_count(n).map(CountColor::rgb),
        TileView::TriggeredMine | TileView::Misflagged => Some((220, 20, 20)),
        _ => None,
    };
    if highlight {
        out.push_str(UNDERLINE);
    }
    match rgb {
        Some((r, g, b)) => {
            let _ = write!(out, "\x1b[38;2;{r};{g};{b}m{ch}");
        }
        None => out.push(ch),
    }
    if highlight || rgb.is_some() {
        out.push_str(RESET);
    }
}

/// Text picture of the board with row and column labels.
///
/// Hex boards shift odd rows half a cell to the right, matching their neighbour rule. With `color`
/// the cells in `changed` are underlined.
pub fn render_board(session: &GameSession, changed: &[Coord2], color: bool) -> String {
    let (rows, cols) = session.size();
    let hex = session.topology() == Topology::Hex;
    let mut out = String::new();

    out.push_str("    ");
    for col in 0..cols {
        let _ = write!(out, "{:<2}", col % 100);
    }
    out.push('\n');

    for row in 0..rows {
        let _ = write!(out, "{row:>3} ");
        if hex && row % 2 == 1 {
            out.push(' ');
        }
        for col in 0..cols {
            let coords = (row, col);
            paint(&mut out, session.tile_at(coords), changed.contains(&coords), color);
            if col + 1 < cols {
                out.push(' ');
            }
        }
        out.push('\n');
    }
    out
}
