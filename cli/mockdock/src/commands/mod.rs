pub mod build;
pub mod exec;
pub mod images;
pub mod login;
pub mod prune;
pub mod ps;
pub mod pull;
pub mod push;
pub mod rm;
pub mod rmi;
pub mod run;
pub mod start;
pub mod stop;
pub mod tag;

use std::io::{self, BufRead, Write};

const COLUMN_PADDING: usize = 3;

/// Left-aligned columns separated by at least three spaces; the last
/// column is not padded. Widths count characters, as `{:<w$}` pads by them.
pub(crate) fn write_table(out: &mut dyn Write, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_row: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    for row in std::iter::once(&header_row).chain(rows) {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            if i + 1 == row.len() {
                line.push_str(cell);
            } else {
                line.push_str(&format!("{:<w$}", cell, w = widths[i] + COLUMN_PADDING));
            }
        }
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Prints `label`, then reads one trimmed line from `input`.
pub(crate) fn prompt(input: &mut dyn BufRead, out: &mut dyn Write, label: &str) -> io::Result<String> {
    write!(out, "{label}")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
