// Time-based views: raw pass time and elapsed time since the start

use super::seconds_grid;
use crate::matrix::SplitMatrix;
use crate::series::{DerivedSeries, SeriesRow, SeriesUnit};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Raw pass times as hours since midnight
pub fn race_time(matrix: &SplitMatrix) -> DerivedSeries {
    let rows = seconds_grid(matrix)
        .into_iter()
        .map(|(competitor, seconds)| SeriesRow {
            competitor,
            values: seconds
                .into_iter()
                .map(|s| s.map(|s| s / SECONDS_PER_HOUR))
                .collect(),
        })
        .collect();

    DerivedSeries {
        unit: SeriesUnit::ClockHours,
        checkpoints: matrix.checkpoints().to_vec(),
        rows,
    }
}

/// Elapsed hours since each competitor passed the first checkpoint
///
/// The first column is zero for every competitor with a start time. A
/// competitor without a start time has no elapsed values at all.
pub fn race_elapsed(matrix: &SplitMatrix) -> DerivedSeries {
    let rows = seconds_grid(matrix)
        .into_iter()
        .map(|(competitor, seconds)| {
            let start = seconds[0];
            let values = seconds
                .iter()
                .map(|s| Some(((*s)? - start?) / SECONDS_PER_HOUR))
                .collect();
            SeriesRow { competitor, values }
        })
        .collect();

    DerivedSeries {
        unit: SeriesUnit::Hours,
        checkpoints: matrix.checkpoints().to_vec(),
        rows,
    }
}
