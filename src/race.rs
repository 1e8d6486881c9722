//! Race catalog configuration
//!
//! Races are described in a TOML file:
//!
//! ```toml
//! [[races]]
//! name = "La Diagonela 2024"
//! date = "2024-01-20"
//! location = "Zuoz"
//! distance = 55
//! url = "https://www.ladiagonela.ch"
//! doc_id = "1yKpap4SXwDw6r8-JPViEgNwJw_a-POd13Y47790tGwo"
//! sheet_id = "0"
//!
//! [[races.seedings]]
//! group = "Engadiner"
//! bands = [
//!     { label = "Elite", under = "2:30:00" },
//!     { label = "Seed 1", under = "3:00:00" },
//! ]
//! ```

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::matrix::DEFAULT_COMPETITOR_COLUMN;
use crate::seeding::SeedingRule;

const SHEETS_EXPORT_BASE: &str = "https://docs.google.com/spreadsheets/d";

fn default_competitor_column() -> String {
    DEFAULT_COMPETITOR_COLUMN.to_string()
}

/// A single race and where its split sheet lives
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Race {
    pub name: String,
    pub date: NaiveDate,
    pub location: String,
    /// Course length in km
    pub distance: f64,
    /// Public race page
    pub url: String,
    /// Spreadsheet document holding the split sheet
    pub doc_id: String,
    /// Sheet (tab) id within the document
    pub sheet_id: String,
    /// Header of the competitor column in the split sheet
    #[serde(default = "default_competitor_column")]
    pub competitor_column: String,
    /// Seeding reference rules, evaluated in order
    #[serde(default)]
    pub seedings: Vec<SeedingRule>,
}

impl Race {
    /// Export URL of the split sheet in the given format (e.g. "csv")
    pub fn sheet_export_url(&self, format: &str) -> String {
        format!(
            "{}/{}/export?format={}&gid={}",
            SHEETS_EXPORT_BASE, self.doc_id, format, self.sheet_id
        )
    }

    /// Validate race fields and seeding rules
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("race name must not be empty".to_string());
        }

        if !(self.distance.is_finite() && self.distance > 0.0) {
            return Err(format!(
                "race '{}' must have a positive distance, got {}",
                self.name, self.distance
            ));
        }

        if self.doc_id.trim().is_empty() {
            return Err(format!("race '{}' is missing doc_id", self.name));
        }

        let mut groups = HashSet::new();
        for rule in &self.seedings {
            rule.validate()
                .map_err(|e| format!("race '{}': {}", self.name, e))?;
            if !groups.insert(rule.group.trim()) {
                return Err(format!(
                    "race '{}' lists seeding group '{}' twice",
                    self.name, rule.group
                ));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// All configured races
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RaceCatalog {
    #[serde(default)]
    pub races: Vec<Race>,
}

impl RaceCatalog {
    /// Load and validate a race catalog from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            bail!("Race catalog not found: {}", path_ref.display());
        }

        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read race catalog {}", path_ref.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid race catalog {}", path_ref.display()))
    }

    /// Parse and validate a race catalog from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let catalog: RaceCatalog = toml::from_str(contents).context("Invalid race catalog TOML")?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check every race and reject duplicate names
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for race in &self.races {
            if let Err(e) = race.validate() {
                bail!("{}", e);
            }
            if !names.insert(race.name.as_str()) {
                bail!("Duplicate race name: {}", race.name);
            }
        }
        Ok(())
    }

    /// Look up a race by exact name
    pub fn find(&self, name: &str) -> Option<&Race> {
        self.races.iter().find(|r| r.name == name)
    }

    /// Races sorted by date, most recent first
    pub fn by_date(&self) -> Vec<&Race> {
        let mut races: Vec<&Race> = self.races.iter().collect();
        races.sort_by(|a, b| b.date.cmp(&a.date));
        races
    }
}
