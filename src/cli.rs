//! CLI argument parsing for racesplits

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::transform::Transform;

/// Output format for derived series
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table (default)
    Text,
    /// JSON document with chart metadata
    Json,
    /// Long-format CSV (competitor, km, value)
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "racesplits")]
#[command(version)]
#[command(about = "Compare skiers' checkpoint split times: gaps, pace and seeding references", long_about = None)]
pub struct Cli {
    /// Split sheet CSV (competitor column plus one column per checkpoint km)
    #[arg(value_name = "SPLITS")]
    pub splits: Option<PathBuf>,

    /// Race catalog (TOML)
    #[arg(short = 'r', long = "races", value_name = "FILE")]
    pub races: Option<PathBuf>,

    /// Race name from the catalog (enables --seed and race metadata)
    #[arg(long = "race", value_name = "NAME", requires = "races")]
    pub race: Option<String>,

    /// Competitor to include; repeat for several (default: everyone)
    #[arg(short = 's', long = "select", value_name = "NAME")]
    pub select: Vec<String>,

    /// View to compute
    #[arg(short = 't', long = "transform", value_enum, default_value = "winner")]
    pub transform: Transform,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Decimal places in text and CSV output
    #[arg(long = "precision", value_name = "DIGITS", default_value = "2")]
    pub precision: usize,

    /// Add the race's seeding reference rows before selecting competitors
    #[arg(long = "seed", requires = "race")]
    pub seed: bool,

    /// Header of the competitor column (default: race setting, else "skier")
    #[arg(long = "competitor-column", value_name = "HEADER")]
    pub competitor_column: Option<String>,

    /// Write output to a file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// List the races in the catalog and exit
    #[arg(long = "list-races", requires = "races")]
    pub list_races: bool,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
