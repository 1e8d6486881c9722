//! Human-readable table output
//!
//! Wide layout: one line per competitor, one column per checkpoint.

use std::fmt::Write as _;

use crate::series::DerivedSeries;
use crate::transform::Transform;

const MISSING: &str = "-";

/// Render a series as a fixed-width table with a title line
pub fn render_table(transform: Transform, series: &DerivedSeries, precision: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", transform.title(), series.unit.symbol());
    let _ = writeln!(out, "{}", transform.explanation());
    out.push('\n');

    if series.is_empty() {
        out.push_str("(no competitors selected)\n");
        return out;
    }

    let headers: Vec<String> = series
        .checkpoints
        .iter()
        .map(|km| format!("{} km", km))
        .collect();
    let cells: Vec<Vec<String>> = series
        .rows
        .iter()
        .map(|row| {
            row.values
                .iter()
                .map(|v| match v {
                    Some(v) => format!("{:.*}", precision, v),
                    None => MISSING.to_string(),
                })
                .collect()
        })
        .collect();

    let name_width = series
        .rows
        .iter()
        .map(|r| r.competitor.chars().count())
        .chain(std::iter::once("competitor".len()))
        .max()
        .unwrap_or_default();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(j, h)| {
            cells
                .iter()
                .map(|row| row[j].len())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let _ = write!(out, "{:<name_width$}", "competitor");
    for (header, width) in headers.iter().zip(&widths) {
        let _ = write!(out, "  {:>width$}", header, width = width);
    }
    out.push('\n');

    let total_width = name_width + widths.iter().map(|w| w + 2).sum::<usize>();
    out.push_str(&"─".repeat(total_width));
    out.push('\n');

    for (row, values) in series.rows.iter().zip(&cells) {
        let _ = write!(out, "{:<name_width$}", row.competitor);
        for (value, width) in values.iter().zip(&widths) {
            let _ = write!(out, "  {:>width$}", value, width = width);
        }
        out.push('\n');
    }

    out
}
