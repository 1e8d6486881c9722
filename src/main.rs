use std::fs;
use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use racesplits::cli::{Cli, OutputFormat};
use racesplits::csv_output::CsvOutput;
use racesplits::json_output::JsonOutput;
use racesplits::matrix::{SplitMatrix, DEFAULT_COMPETITOR_COLUMN};
use racesplits::race::{Race, RaceCatalog};
use racesplits::seeding::inject_seeding_reference;
use racesplits::text_output::render_table;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Print the race catalog, most recent race first
fn print_races(catalog: &RaceCatalog) {
    println!("=== Races ===");
    for race in catalog.by_date() {
        println!(
            "{}  {:<30} {:<16} {:>6} km  seedings: {}",
            race.date,
            race.name,
            race.location,
            race.distance,
            race.seedings.len()
        );
    }
}

/// Resolve `--race` against the catalog
fn find_race<'a>(catalog: Option<&'a RaceCatalog>, name: Option<&str>) -> Result<Option<&'a Race>> {
    match (catalog, name) {
        (Some(catalog), Some(name)) => match catalog.find(name) {
            Some(race) => Ok(Some(race)),
            None => bail!("Unknown race: {}. Use --list-races to see the catalog.", name),
        },
        _ => Ok(None),
    }
}

fn render(args: &Cli, race: Option<&Race>, matrix: &SplitMatrix) -> Result<String> {
    let series = args.transform.apply(matrix);

    let rendered = match args.format {
        OutputFormat::Text => render_table(args.transform, &series, args.precision),
        OutputFormat::Csv => CsvOutput::new(args.precision).to_csv(&series)?,
        OutputFormat::Json => {
            let mut output = JsonOutput::new(args.transform, &series);
            if let Some(race) = race {
                output = output.with_race(race);
            }
            let mut json = output.to_json().context("Failed to serialize JSON output")?;
            json.push('\n');
            json
        }
    };

    Ok(rendered)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let catalog = match &args.races {
        Some(path) => Some(RaceCatalog::from_file(path)?),
        None => None,
    };

    if args.list_races {
        if let Some(catalog) = &catalog {
            print_races(catalog);
        }
        return Ok(());
    }

    let race = find_race(catalog.as_ref(), args.race.as_deref())?;

    let Some(splits) = &args.splits else {
        match race {
            Some(race) => bail!(
                "Missing split sheet. Export it from {} and pass the file path.",
                race.sheet_export_url("csv")
            ),
            None => bail!("Missing split sheet. Usage: racesplits SPLITS.csv [OPTIONS]"),
        }
    };

    let competitor_column = args
        .competitor_column
        .as_deref()
        .or(race.map(|r| r.competitor_column.as_str()))
        .unwrap_or(DEFAULT_COMPETITOR_COLUMN);

    let mut matrix = SplitMatrix::from_csv_path(splits, competitor_column)
        .with_context(|| format!("Failed to load split sheet {}", splits.display()))?;

    if args.seed {
        if let Some(race) = race {
            let added = inject_seeding_reference(&mut matrix, &race.seedings)?;
            info!(rows = added.len(), race = %race.name, "added seeding references");
        }
    }

    let selected = if args.select.is_empty() {
        matrix
    } else {
        matrix.select(&args.select)?
    };

    let rendered = render(&args, race, &selected)?;

    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Failed to write output to {}", path.display()))?,
        None => io::stdout()
            .write_all(rendered.as_bytes())
            .context("Failed to write output")?,
    }

    Ok(())
}
