//! CSV output for derived series
//!
//! Long format, one `(competitor, km, value)` record per line, which is what
//! spreadsheet pivot tables and charting tools expect.

use std::io::Write;

use anyhow::{Context, Result};

use crate::series::DerivedSeries;

/// CSV output formatter
#[derive(Debug)]
pub struct CsvOutput {
    /// Decimal places for values
    precision: usize,
}

impl CsvOutput {
    /// Create a new CSV output formatter
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }

    /// Header row, the value column carries the unit
    fn header(series: &DerivedSeries) -> [String; 3] {
        [
            "competitor".to_string(),
            "km".to_string(),
            format!("value_{}", series.unit.key()),
        ]
    }

    /// Write the series as CSV; undefined values are empty cells
    pub fn write<W: Write>(&self, series: &DerivedSeries, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer
            .write_record(Self::header(series))
            .context("Failed to write CSV header")?;

        for record in series.to_records() {
            let value = record
                .value
                .map(|v| format!("{:.*}", self.precision, v))
                .unwrap_or_default();
            writer
                .write_record([record.competitor, record.km.to_string(), value])
                .context("Failed to write CSV record")?;
        }

        writer.flush().context("Failed to flush CSV output")?;
        Ok(())
    }

    /// Generate CSV output as string
    pub fn to_csv(&self, series: &DerivedSeries) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(series, &mut buffer)?;
        String::from_utf8(buffer).context("CSV output is not valid UTF-8")
    }
}

impl Default for CsvOutput {
    fn default() -> Self {
        Self::new(3)
    }
}
