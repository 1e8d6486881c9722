// Section pace against the winner

use super::gaps::diff_to_winner;
use crate::matrix::SplitMatrix;
use crate::series::{DerivedSeries, SeriesRow, SeriesUnit};

/// Seconds per km slower (positive) or faster (negative) than the winner, per section
///
/// Column `i` of the result covers the section from checkpoint `i - 1` to
/// checkpoint `i` of the input, so the output has one column fewer and is
/// keyed by each section's end distance. Sections that cannot be computed
/// because of missing times read 0.
pub fn pace_delta_per_section(matrix: &SplitMatrix) -> DerivedSeries {
    let gaps = diff_to_winner(matrix);
    let sections: Vec<f64> = gaps.checkpoints.windows(2).map(|w| w[1] - w[0]).collect();

    let rows = gaps
        .rows
        .into_iter()
        .map(|row| {
            let values = row
                .values
                .windows(2)
                .zip(&sections)
                .map(|(pair, &length_km)| {
                    let delta_min = match (pair[0], pair[1]) {
                        (Some(from), Some(to)) => to - from,
                        _ => return Some(0.0),
                    };
                    let pace = delta_min * 60.0 / length_km;
                    Some(if pace.is_finite() { pace } else { 0.0 })
                })
                .collect();
            SeriesRow {
                competitor: row.competitor,
                values,
            }
        })
        .collect();

    DerivedSeries {
        unit: SeriesUnit::SecondsPerKm,
        checkpoints: gaps.checkpoints[1..].to_vec(),
        rows,
    }
}
