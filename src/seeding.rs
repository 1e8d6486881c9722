//! Synthetic seeding reference rows
//!
//! A seeding rule splits the field into finish-time bands (for example the
//! start blocks of a ski marathon) and adds one virtual competitor per band:
//! the mean elapsed time of every real competitor in the band at each
//! checkpoint, started at the earliest time in the matrix.
//!
//! Bands are evaluated in the order they are listed. A band claims every
//! competitor still in the pool whose finish time is strictly below its
//! threshold, so list bands fastest first to get non-overlapping groups.

use chrono::Duration;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::error::Result;
use crate::matrix::SplitMatrix;
use crate::split_time::{deserialize_duration, format_duration, time_from_seconds};
use crate::transform::race_elapsed;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// One finish-time band of a seeding rule
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedingBand {
    /// Band name, e.g. "Elite" or "Seed 2"
    pub label: String,
    /// Competitors finishing strictly faster than this belong to the band
    #[serde(deserialize_with = "deserialize_duration")]
    pub under: Duration,
}

/// A named set of finish-time bands
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedingRule {
    /// Reference group, e.g. the qualification series the bands belong to
    pub group: String,
    /// Bands in evaluation order
    pub bands: Vec<SeedingBand>,
}

impl SeedingBand {
    pub fn new(label: impl Into<String>, under: Duration) -> Self {
        Self {
            label: label.into(),
            under,
        }
    }
}

impl SeedingRule {
    pub fn new(group: impl Into<String>, bands: Vec<SeedingBand>) -> Self {
        Self {
            group: group.into(),
            bands,
        }
    }

    /// Name of the reference row produced for a band
    pub fn row_name(&self, band: &SeedingBand) -> String {
        format!("{}, {}", self.group, band.label)
    }

    /// Validate rule contents
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.group.trim().is_empty() {
            return Err("seeding group must not be empty".to_string());
        }

        if self.bands.is_empty() {
            return Err(format!("seeding group '{}' has no bands", self.group));
        }

        let mut labels = HashSet::new();
        for band in &self.bands {
            if !labels.insert(band.label.trim()) {
                return Err(format!(
                    "seeding group '{}' lists band '{}' twice",
                    self.group, band.label
                ));
            }
            if band.label.trim().is_empty() {
                return Err(format!(
                    "seeding group '{}' has a band without label",
                    self.group
                ));
            }
            if band.under <= Duration::zero() {
                return Err(format!(
                    "seeding band '{}' must have a positive threshold, got {}",
                    self.row_name(band),
                    format_duration(band.under)
                ));
            }
        }

        Ok(())
    }
}

/// Append one reference row per non-empty seeding band
///
/// Only the competitors present before the call are eligible; reference
/// rows added for one rule never feed into another. Existing rows are left
/// untouched. Bands that claim nobody are skipped. A reference cell is only
/// defined where every band member has a time at that checkpoint.
///
/// Either every reference row is appended or, on error, none is.
///
/// Returns the names of the appended rows.
pub fn inject_seeding_reference(
    matrix: &mut SplitMatrix,
    rules: &[SeedingRule],
) -> Result<Vec<String>> {
    let elapsed = race_elapsed(matrix);
    let Some(origin) = matrix.global_min_seconds() else {
        debug!("split matrix has no times, skipping seeding references");
        return Ok(Vec::new());
    };

    let finish_hours: Vec<Option<f64>> = elapsed
        .rows
        .iter()
        .map(|row| row.values.last().copied().flatten())
        .collect();

    // Rows are staged on a copy so a rejected row leaves the matrix unchanged
    let mut staged = matrix.clone();
    let mut reference_rows = Vec::new();

    for rule in rules {
        let mut pool: Vec<usize> = (0..elapsed.rows.len())
            .filter(|&i| finish_hours[i].is_some())
            .collect();

        for band in &rule.bands {
            let threshold_hours = band.under.num_milliseconds() as f64 / 1000.0 / SECONDS_PER_HOUR;
            let (claimed, rest): (Vec<usize>, Vec<usize>) = pool
                .into_iter()
                .partition(|&i| finish_hours[i].is_some_and(|h| h < threshold_hours));
            pool = rest;

            let name = rule.row_name(band);
            if claimed.is_empty() {
                warn!(band = %name, "no competitor finished under the band threshold");
                continue;
            }

            // Averaging over a fixed member set keeps the reference row monotonic
            let times = (0..elapsed.checkpoints.len())
                .map(|j| {
                    let total_hours = claimed
                        .iter()
                        .map(|&i| elapsed.rows[i].values[j])
                        .sum::<Option<f64>>()?;
                    let mean_hours = total_hours / claimed.len() as f64;
                    time_from_seconds(origin + mean_hours * SECONDS_PER_HOUR)
                })
                .collect();

            debug!(band = %name, members = claimed.len(), "adding seeding reference");
            staged.push_row(name.clone(), times)?;
            reference_rows.push(name);
        }
    }

    *matrix = staged;
    Ok(reference_rows)
}
