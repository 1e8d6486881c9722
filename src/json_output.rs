//! JSON output format for derived series

use serde::{Deserialize, Serialize};

use crate::series::{DerivedSeries, SeriesRecord, SeriesUnit};
use crate::transform::Transform;

/// Chart metadata for the series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonPlot {
    /// Chart title
    pub title: String,
    /// One-sentence explanation of the view
    pub explanation: String,
    /// X axis label
    pub x_label: String,
    /// Y axis label
    pub y_label: String,
}

/// Race context, when the series came from a configured race
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRace {
    pub name: String,
    pub date: String,
    pub location: String,
    pub distance_km: f64,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    /// Transform that produced the records
    pub transform: Transform,
    /// Unit of every value
    pub unit: SeriesUnit,
    pub plot: JsonPlot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub race: Option<JsonRace>,
    /// Competitors in row order
    pub competitors: Vec<String>,
    /// Long-format records, `value` is null when undefined
    pub records: Vec<SeriesRecord>,
}

impl JsonOutput {
    /// Build the output document for a transform result
    pub fn new(transform: Transform, series: &DerivedSeries) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "racesplits-json-v1".to_string(),
            transform,
            unit: series.unit,
            plot: JsonPlot {
                title: transform.title().to_string(),
                explanation: transform.explanation().to_string(),
                x_label: "Race Distance [km]".to_string(),
                y_label: transform.y_label().to_string(),
            },
            race: None,
            competitors: series.rows.iter().map(|r| r.competitor.clone()).collect(),
            records: series.to_records(),
        }
    }

    /// Attach race context
    pub fn with_race(mut self, race: &crate::race::Race) -> Self {
        self.race = Some(JsonRace {
            name: race.name.clone(),
            date: race.date.to_string(),
            location: race.location.clone(),
            distance_km: race.distance,
        });
        self
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
