// Gap transforms: time behind the per-checkpoint leader or the eventual winner

use tracing::warn;

use super::seconds_grid;
use crate::matrix::{SplitMatrix, SplitRow};
use crate::series::{DerivedSeries, SeriesRow, SeriesUnit};

const SECONDS_PER_MINUTE: f64 = 60.0;

/// Competitor with the smallest start-to-finish time
///
/// Ties go to the competitor listed first. Competitors missing either the
/// start or the finish time cannot win.
pub fn fastest_finisher(matrix: &SplitMatrix) -> Option<&SplitRow> {
    let mut best: Option<(&SplitRow, f64)> = None;
    for row in matrix.rows() {
        if let Some(total) = row.total_elapsed_seconds() {
            if best.map_or(true, |(_, best_total)| total < best_total) {
                best = Some((row, total));
            }
        }
    }
    best.map(|(row, _)| row)
}

/// Gap in minutes to the fastest competitor at each checkpoint
///
/// The reference at each checkpoint is the earliest pass time in that
/// column, which need not belong to the same competitor everywhere. The
/// result is shifted so the first checkpoint reads zero.
pub fn diff_to_leader(matrix: &SplitMatrix) -> DerivedSeries {
    let grid = seconds_grid(matrix);
    let columns = matrix.checkpoints().len();

    let leader: Vec<Option<f64>> = (0..columns)
        .map(|j| {
            grid.iter()
                .filter_map(|(_, seconds)| seconds[j])
                .min_by(f64::total_cmp)
        })
        .collect();

    let rows = grid
        .into_iter()
        .map(|(competitor, seconds)| SeriesRow {
            competitor,
            values: anchored_gaps(&seconds, &leader),
        })
        .collect();

    DerivedSeries {
        unit: SeriesUnit::Minutes,
        checkpoints: matrix.checkpoints().to_vec(),
        rows,
    }
}

/// Gap in minutes to the winner of the selection at each checkpoint
///
/// The winner is [`fastest_finisher`]; its row is all zeros. If nobody in
/// the selection has both a start and a finish time every value is `None`.
pub fn diff_to_winner(matrix: &SplitMatrix) -> DerivedSeries {
    let checkpoints = matrix.checkpoints().to_vec();

    let reference = match fastest_finisher(matrix) {
        Some(winner) => winner.seconds(),
        None => {
            if !matrix.is_empty() {
                warn!("no competitor in the selection has both start and finish times");
            }
            vec![None; checkpoints.len()]
        }
    };

    let rows = seconds_grid(matrix)
        .into_iter()
        .map(|(competitor, seconds)| SeriesRow {
            competitor,
            values: anchored_gaps(&seconds, &reference),
        })
        .collect();

    DerivedSeries {
        unit: SeriesUnit::Minutes,
        checkpoints,
        rows,
    }
}

/// `(own - reference)` in minutes, minus the same quantity at the first checkpoint
fn anchored_gaps(seconds: &[Option<f64>], reference: &[Option<f64>]) -> Vec<Option<f64>> {
    let gaps: Vec<Option<f64>> = seconds
        .iter()
        .zip(reference)
        .map(|(own, reference)| Some((own.as_ref()? - reference.as_ref()?) / SECONDS_PER_MINUTE))
        .collect();

    let anchor = gaps.first().copied().flatten();
    gaps.iter().map(|gap| Some((*gap)? - anchor?)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn t(h: u32, m: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, 0)
    }

    #[test]
    fn test_fastest_finisher_uses_elapsed_not_clock() {
        // Beat crosses the line first but started 20 minutes earlier
        let m = SplitMatrix::from_rows(
            vec![0.0, 10.0],
            [
                ("Anna", vec![t(6, 20), t(7, 10)]),
                ("Beat", vec![t(6, 0), t(7, 0)]),
            ],
        )
        .unwrap();
        assert_eq!(fastest_finisher(&m).unwrap().competitor, "Anna");
    }

    #[test]
    fn test_fastest_finisher_tie_goes_to_first_row() {
        let m = SplitMatrix::from_rows(
            vec![0.0, 10.0],
            [
                ("Anna", vec![t(6, 0), t(7, 0)]),
                ("Beat", vec![t(6, 0), t(7, 0)]),
            ],
        )
        .unwrap();
        assert_eq!(fastest_finisher(&m).unwrap().competitor, "Anna");
    }

    #[test]
    fn test_fastest_finisher_skips_non_finishers() {
        let m = SplitMatrix::from_rows(
            vec![0.0, 10.0],
            [("Anna", vec![t(6, 0), None]), ("Beat", vec![t(6, 0), t(8, 0)])],
        )
        .unwrap();
        assert_eq!(fastest_finisher(&m).unwrap().competitor, "Beat");
    }

    #[test]
    fn test_anchored_gaps_missing_anchor() {
        let out = anchored_gaps(&[None, Some(120.0)], &[Some(0.0), Some(60.0)]);
        assert_eq!(out, vec![None, None]);
    }
}
