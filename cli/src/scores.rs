use std::io::Write;

use anyhow::Result;
use hexsweep_core::{Difficulty, Mode, format_time};
use hexsweep_leaderboard::{Leaderboard, Record};

fn write_ranked(out: &mut impl Write, difficulty: Difficulty, records: &[Record]) -> Result<()> {
    writeln!(out, "  {difficulty}")?;
    if records.is_empty() {
        writeln!(out, "    (no records)")?;
        return Ok(());
    }
    for (rank, record) in records.iter().enumerate() {
        write!(out, "    {:>2}. {:<16} {}", rank + 1, record.name, format_time(record.time))?;
        if let Some(proportion) = record.proportion {
            write!(out, "  {:>5.1}%", proportion * 100.0)?;
        }
        if let Some(config) = &record.config {
            write!(out, "  {config}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Prints the tables of `mode`, or of every mode.
pub fn print_scores(
    out: &mut impl Write,
    leaderboard: &Leaderboard,
    mode: Option<Mode>,
) -> Result<()> {
    let modes = match mode {
        Some(mode) => vec![mode],
        None => Mode::ALL.to_vec(),
    };

    for mode in modes {
        writeln!(out, "{mode}")?;
        if mode == Mode::Custom {
            let records = &leaderboard.custom_mode.records;
            if records.is_empty() {
                writeln!(out, "    (no records)")?;
            }
            for (rank, record) in records.iter().enumerate() {
                writeln!(
                    out,
                    "    {:>2}. {:<16} {}  {}",
                    rank + 1,
                    record.name,
                    format_time(record.time),
                    record.config
                )?;
            }
            continue;
        }
        for difficulty in Difficulty::ALL {
            let records = leaderboard.table(mode, difficulty).unwrap_or_default();
            write_ranked(out, difficulty, records)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use hexsweep_leaderboard::CustomRecord;

    use super::*;

    #[test]
    fn empty_tables_say_so() {
        let mut out = Vec::new();
        print_scores(&mut out, &Leaderboard::default(), Some(Mode::Hexagon)).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("hexagon\n  Beginner\n    (no records)\n"));
        assert_eq!(text.matches("(no records)").count(), 4);
    }

    #[test]
    fn records_show_time_and_config() {
        let mut leaderboard = Leaderboard::default();
        leaderboard.classic.random.push(Record {
            name: "Ada".to_owned(),
            time: 75.5,
            proportion: Some(0.25),
            config: Some("20x10, 50m".to_owned()),
        });
        leaderboard.custom_mode.records.push(CustomRecord {
            name: "Grace".to_owned(),
            mine_percentage: 0.1,
            time: 3.0,
            config: "10x10, 10m (10.0%)".to_owned(),
        });

        let mut out = Vec::new();
        print_scores(&mut out, &leaderboard, None).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("     1. Ada              01:15.50   25.0%  20x10, 50m\n"));
        assert!(text.contains("     1. Grace            00:03.00  10x10, 10m (10.0%)\n"));
    }
}
