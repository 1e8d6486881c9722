//! Derived numeric series produced by the split transforms

use serde::{Deserialize, Serialize};

/// Unit of the values in a [`DerivedSeries`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesUnit {
    /// Wall-clock time expressed as hours since midnight
    ClockHours,
    /// Elapsed hours since the start checkpoint
    Hours,
    /// Time gap in minutes
    Minutes,
    /// Pace difference in seconds per km
    SecondsPerKm,
}

impl SeriesUnit {
    /// Machine-readable name, matches the serialized form
    pub fn key(&self) -> &'static str {
        match self {
            SeriesUnit::ClockHours => "clock_hours",
            SeriesUnit::Hours => "hours",
            SeriesUnit::Minutes => "minutes",
            SeriesUnit::SecondsPerKm => "seconds_per_km",
        }
    }

    /// Short suffix used in tables
    pub fn symbol(&self) -> &'static str {
        match self {
            SeriesUnit::ClockHours => "h (clock)",
            SeriesUnit::Hours => "h",
            SeriesUnit::Minutes => "min",
            SeriesUnit::SecondsPerKm => "s/km",
        }
    }
}

/// One row of derived values for a competitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRow {
    pub competitor: String,
    /// One value per checkpoint of the owning series, `None` when undefined
    pub values: Vec<Option<f64>>,
}

/// Numeric competitor × checkpoint table, ready for charting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedSeries {
    pub unit: SeriesUnit,
    /// Checkpoint distances in km for the value columns
    pub checkpoints: Vec<f64>,
    pub rows: Vec<SeriesRow>,
}

/// A single `(competitor, km, value)` record in long format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub competitor: String,
    pub km: f64,
    pub value: Option<f64>,
}

impl DerivedSeries {
    /// Create a series with no rows
    pub fn empty(unit: SeriesUnit, checkpoints: Vec<f64>) -> Self {
        Self {
            unit,
            checkpoints,
            rows: Vec::new(),
        }
    }

    /// Number of competitor rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no competitor rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a row by competitor name
    pub fn row(&self, competitor: &str) -> Option<&SeriesRow> {
        self.rows.iter().find(|r| r.competitor == competitor)
    }

    /// Value for a competitor at a checkpoint, `None` if absent or undefined
    pub fn value(&self, competitor: &str, km: f64) -> Option<f64> {
        let column = self.checkpoints.iter().position(|&c| c == km)?;
        self.row(competitor)?.values.get(column).copied().flatten()
    }

    /// Flatten into long-format records, competitor-major
    pub fn to_records(&self) -> Vec<SeriesRecord> {
        self.rows
            .iter()
            .flat_map(|row| {
                row.values
                    .iter()
                    .zip(&self.checkpoints)
                    .map(move |(value, &km)| SeriesRecord {
                        competitor: row.competitor.clone(),
                        km,
                        value: *value,
                    })
            })
            .collect()
    }
}
