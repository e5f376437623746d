//! Formatting utilities for table output and age display

use std::io::{self, Write};

use chrono::{DateTime, Utc};

/// Age of `timestamp` relative to `now`, in its largest whole unit
/// (`2d`, `5h`, `30m`, `15s`). Timestamps ahead of `now` read as `0s`.
pub fn format_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let (value, unit) = [
        (elapsed.num_days(), 'd'),
        (elapsed.num_hours(), 'h'),
        (elapsed.num_minutes(), 'm'),
    ]
    .into_iter()
    .find(|(value, _)| *value > 0)
    .unwrap_or((elapsed.num_seconds().max(0), 's'));
    format!("{value}{unit}")
}

/// Write rows as a column-aligned table under `headers`.
///
/// Columns are separated by two spaces; trailing padding is trimmed.
pub fn write_table<W: Write>(out: &mut W, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let header: Vec<&str> = headers.to_vec();
    write_line(out, &widths, &header)?;
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        write_line(out, &widths, &cells)?;
    }
    Ok(())
}

fn write_line<W: Write>(out: &mut W, widths: &[usize], cells: &[&str]) -> io::Result<()> {
    let line: Vec<String> = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let w = widths.get(i).copied().unwrap_or(0);
            format!("{:<width$}", cell, width = w)
        })
        .collect();
    writeln!(out, "{}", line.join("  ").trim_end())
}
