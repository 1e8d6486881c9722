//! Split time transforms
//!
//! Every transform borrows a [`SplitMatrix`] and returns a new
//! [`DerivedSeries`]; nothing here mutates its input, so repeated calls with
//! the same matrix give identical output.
//!
//! Sign convention for the gap transforms: a positive value means the
//! competitor is *behind* the reference (leader or winner). Both gap
//! transforms are re-anchored so the first checkpoint reads zero, i.e. all
//! competitors are compared as if they had started together.
//!
//! Missing split times propagate as `None`, except in
//! [`pace_delta_per_section`], which reports an undefined section as 0.

mod elapsed;
mod gaps;
mod pace;

pub use elapsed::{race_elapsed, race_time};
pub use gaps::{diff_to_leader, diff_to_winner, fastest_finisher};
pub use pace::pace_delta_per_section;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matrix::SplitMatrix;
use crate::series::{DerivedSeries, SeriesUnit};

/// The available views of a split matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transform {
    /// Raw pass times, as hours since midnight
    RaceTime,
    /// Elapsed time since the start checkpoint
    Elapsed,
    /// Gap to whoever was fastest at each checkpoint
    Leader,
    /// Gap to the eventual winner of the selection
    Winner,
    /// Section pace difference against the winner
    Pace,
}

impl Transform {
    /// All transforms in menu order
    pub const ALL: [Transform; 5] = [
        Transform::Leader,
        Transform::Winner,
        Transform::RaceTime,
        Transform::Elapsed,
        Transform::Pace,
    ];

    /// Apply the transform to a matrix
    pub fn apply(&self, matrix: &SplitMatrix) -> DerivedSeries {
        debug!(
            transform = self.title(),
            competitors = matrix.len(),
            "applying split transform"
        );
        match self {
            Transform::RaceTime => race_time(matrix),
            Transform::Elapsed => race_elapsed(matrix),
            Transform::Leader => diff_to_leader(matrix),
            Transform::Winner => diff_to_winner(matrix),
            Transform::Pace => pace_delta_per_section(matrix),
        }
    }

    /// Unit of the produced series
    pub fn unit(&self) -> SeriesUnit {
        match self {
            Transform::RaceTime => SeriesUnit::ClockHours,
            Transform::Elapsed => SeriesUnit::Hours,
            Transform::Leader | Transform::Winner => SeriesUnit::Minutes,
            Transform::Pace => SeriesUnit::SecondsPerKm,
        }
    }

    /// Chart title
    pub fn title(&self) -> &'static str {
        match self {
            Transform::RaceTime => "Race Time",
            Transform::Elapsed => "Elapsed time",
            Transform::Leader => "vs. leader of selection",
            Transform::Winner => "vs. winner of selection",
            Transform::Pace => "sec/km vs. winner of selection",
        }
    }

    /// One-sentence explanation shown next to the chart
    pub fn explanation(&self) -> &'static str {
        match self {
            Transform::RaceTime => "The official race time of the selected skiers.",
            Transform::Elapsed => "Time since the start for each of the selected skiers.",
            Transform::Leader => {
                "Time gap to the leader of the race at the specific checkpoint, \
                 considering only the selected skiers."
            }
            Transform::Winner => {
                "Time difference to the eventual winner of the race, \
                 considering only the selected skiers."
            }
            Transform::Pace => {
                "Speed difference between checkpoints against eventual winner, \
                 considering only the selected skiers."
            }
        }
    }

    /// Y axis label
    pub fn y_label(&self) -> &'static str {
        match self {
            Transform::RaceTime => "Time of day [h]",
            Transform::Elapsed => "Elapsed time [h]",
            Transform::Leader | Transform::Winner => "Time difference [min]",
            Transform::Pace => "Speed difference [sec/km]",
        }
    }
}

impl std::fmt::Display for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Per-row seconds-since-midnight grid, shared by the transforms
fn seconds_grid(matrix: &SplitMatrix) -> Vec<(String, Vec<Option<f64>>)> {
    matrix
        .rows()
        .iter()
        .map(|row| (row.competitor.clone(), row.seconds()))
        .collect()
}
