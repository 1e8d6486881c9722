//! Skier-by-checkpoint split time matrix
//!
//! A [`SplitMatrix`] holds one row per competitor and one column per
//! checkpoint. Columns are keyed by distance from the start in km and are
//! strictly increasing; cells are the wall-clock times at which the
//! competitor passed the checkpoint, or `None` when no time was recorded.
//!
//! The matrix is validated on construction, so every transform can rely on
//! at least two checkpoints and on non-decreasing times along each row.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveTime;
use tracing::debug;

use crate::error::{Result, SplitError};
use crate::split_time::{parse_time_of_day, seconds_of_day};

/// Header of the competitor column in club split sheets
pub const DEFAULT_COMPETITOR_COLUMN: &str = "skier";

/// Split times of one competitor
#[derive(Debug, Clone, PartialEq)]
pub struct SplitRow {
    /// Competitor name (unique within a matrix)
    pub competitor: String,
    /// Pass time per checkpoint, `None` if not recorded
    pub times: Vec<Option<NaiveTime>>,
}

impl SplitRow {
    /// Pass times as seconds since midnight
    pub fn seconds(&self) -> Vec<Option<f64>> {
        self.times.iter().map(|t| t.map(seconds_of_day)).collect()
    }

    /// Elapsed seconds between the first and the last checkpoint
    ///
    /// `None` if either end is missing.
    pub fn total_elapsed_seconds(&self) -> Option<f64> {
        let start = self.times.first().copied().flatten()?;
        let finish = self.times.last().copied().flatten()?;
        Some(seconds_of_day(finish) - seconds_of_day(start))
    }
}

/// Competitors × checkpoints table of raw split times
#[derive(Debug, Clone, PartialEq)]
pub struct SplitMatrix {
    checkpoints: Vec<f64>,
    rows: Vec<SplitRow>,
}

impl SplitMatrix {
    /// Create an empty matrix over the given checkpoint distances (km)
    pub fn new(checkpoints: Vec<f64>) -> Result<Self> {
        if checkpoints.len() < 2 {
            return Err(SplitError::TooFewCheckpoints {
                found: checkpoints.len(),
            });
        }

        for &km in &checkpoints {
            if !km.is_finite() || km < 0.0 {
                return Err(SplitError::InvalidCheckpointDistance(km));
            }
        }

        for pair in checkpoints.windows(2) {
            if pair[1] <= pair[0] {
                return Err(SplitError::NonIncreasingCheckpoints {
                    previous: pair[0],
                    next: pair[1],
                });
            }
        }

        Ok(Self {
            checkpoints,
            rows: Vec::new(),
        })
    }

    /// Build a matrix from checkpoints and `(competitor, times)` pairs
    pub fn from_rows<S: Into<String>>(
        checkpoints: Vec<f64>,
        rows: impl IntoIterator<Item = (S, Vec<Option<NaiveTime>>)>,
    ) -> Result<Self> {
        let mut matrix = Self::new(checkpoints)?;
        for (competitor, times) in rows {
            matrix.push_row(competitor, times)?;
        }
        Ok(matrix)
    }

    /// Append a competitor row after validating it against the matrix
    pub fn push_row(
        &mut self,
        competitor: impl Into<String>,
        times: Vec<Option<NaiveTime>>,
    ) -> Result<()> {
        let competitor = competitor.into();

        if competitor.trim().is_empty() {
            return Err(SplitError::EmptyCompetitorName);
        }

        if times.len() != self.checkpoints.len() {
            return Err(SplitError::RaggedRow {
                competitor,
                expected: self.checkpoints.len(),
                found: times.len(),
            });
        }

        if self.row(&competitor).is_some() {
            return Err(SplitError::DuplicateCompetitor(competitor));
        }

        // Gaps are allowed, going back in time is not
        let mut previous: Option<NaiveTime> = None;
        for (time, &km) in times.iter().zip(&self.checkpoints) {
            if let Some(time) = *time {
                if previous.is_some_and(|p| time < p) {
                    return Err(SplitError::NonMonotonicRow { competitor, km });
                }
                previous = Some(time);
            }
        }

        self.rows.push(SplitRow { competitor, times });
        Ok(())
    }

    /// Checkpoint distances in km, strictly increasing
    pub fn checkpoints(&self) -> &[f64] {
        &self.checkpoints
    }

    /// Competitor rows in insertion order
    pub fn rows(&self) -> &[SplitRow] {
        &self.rows
    }

    /// Competitor names in row order
    pub fn competitors(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.competitor.as_str())
    }

    /// Look up a competitor row by name
    pub fn row(&self, competitor: &str) -> Option<&SplitRow> {
        self.rows.iter().find(|r| r.competitor == competitor)
    }

    /// Number of competitor rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the matrix has no competitor rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest recorded time anywhere in the matrix, in seconds since midnight
    pub fn global_min_seconds(&self) -> Option<f64> {
        self.rows
            .iter()
            .flat_map(|r| r.times.iter().flatten())
            .min()
            .map(|t| seconds_of_day(*t))
    }

    /// Sub-matrix holding the named competitors, in the requested order
    ///
    /// An empty selection is valid and yields a matrix with no rows.
    pub fn select<S: AsRef<str>>(&self, competitors: &[S]) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut rows = Vec::with_capacity(competitors.len());

        for name in competitors {
            let name = name.as_ref();
            let row = self
                .row(name)
                .ok_or_else(|| SplitError::UnknownCompetitor(name.to_string()))?;
            if !seen.insert(name) {
                return Err(SplitError::DuplicateCompetitor(name.to_string()));
            }
            rows.push(row.clone());
        }

        Ok(Self {
            checkpoints: self.checkpoints.clone(),
            rows,
        })
    }

    /// Load a split sheet from a CSV file
    pub fn from_csv_path<P: AsRef<Path>>(path: P, competitor_column: &str) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(csv::Error::from)?;
        Self::from_csv_reader(file, competitor_column)
    }

    /// Load a split sheet from CSV text
    pub fn from_csv_str(data: &str, competitor_column: &str) -> Result<Self> {
        Self::from_csv_reader(data.as_bytes(), competitor_column)
    }

    /// Load a split sheet in the spreadsheet export layout
    ///
    /// One column named `competitor_column`, every other column header is a
    /// checkpoint distance in km. Empty cells are missing times; any other
    /// cell must parse as `HH:MM:SS`.
    pub fn from_csv_reader<R: Read>(reader: R, competitor_column: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let name_index = headers
            .iter()
            .position(|h| h == competitor_column)
            .ok_or_else(|| SplitError::MissingCompetitorColumn(competitor_column.to_string()))?;

        let mut checkpoints = Vec::with_capacity(headers.len().saturating_sub(1));
        for (i, header) in headers.iter().enumerate() {
            if i == name_index {
                continue;
            }
            let km = header
                .parse::<f64>()
                .map_err(|_| SplitError::InvalidCheckpointHeader(header.to_string()))?;
            checkpoints.push(km);
        }

        let mut matrix = Self::new(checkpoints)?;

        for record in reader.records() {
            let record = record?;
            if record.iter().all(str::is_empty) {
                continue;
            }

            let competitor = record.get(name_index).unwrap_or_default().to_string();
            let cells: Vec<&str> = record
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != name_index)
                .map(|(_, cell)| cell)
                .collect();

            if cells.len() != matrix.checkpoints.len() {
                return Err(SplitError::RaggedRow {
                    competitor,
                    expected: matrix.checkpoints.len(),
                    found: cells.len(),
                });
            }

            let mut times = Vec::with_capacity(cells.len());
            for (cell, &km) in cells.iter().zip(&matrix.checkpoints) {
                if cell.is_empty() {
                    times.push(None);
                    continue;
                }
                let time = parse_time_of_day(cell).ok_or_else(|| SplitError::InvalidTime {
                    competitor: competitor.clone(),
                    km,
                    value: cell.to_string(),
                })?;
                times.push(Some(time));
            }

            matrix.push_row(competitor, times)?;
        }

        debug!(
            competitors = matrix.len(),
            checkpoints = matrix.checkpoints.len(),
            "loaded split sheet"
        );

        Ok(matrix)
    }
}
