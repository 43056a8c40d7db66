//! Build the smoothed per-player feature table from a Statcast-style CSV.
//!
//! Usage: `cargo run -p statline --features cli --bin build-features -- --events FILE --out FILE`
//! Example: `build-features --events statcast_2024.csv --roster roster.csv --out features.csv
//! --split-dir out/ --season-to-date`

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use clap::Parser;
use polars::prelude::*;
use statline::{
    pipeline::{
        EventColumns, FeatureAudit, FeaturePipeline, PipelineConfig, Roster, RosterConfig,
        RosterEnricher, enrich_or_degrade, events_from_frame, roster_template,
    },
    primitives::Role,
    utils::split_by_role,
    windows::{RollingConfig, SeasonMode},
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "build-features")]
#[command(about = "Rolling, season and smoothed hit-rate features per player and role")]
struct Args {
    /// Pitch-level events CSV
    #[arg(long)]
    events: PathBuf,

    /// Roster CSV with player names, handedness and team; an empty template is
    /// written here if the file does not exist
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Output CSV for the unified feature table
    #[arg(long)]
    out: PathBuf,

    /// Directory for per-role feature files
    #[arg(long)]
    split_dir: Option<PathBuf>,

    /// Season columns count only games up to each row's date
    #[arg(long)]
    season_to_date: bool,

    /// Short window width in days
    #[arg(long, default_value_t = RollingConfig::default().short_window)]
    short: usize,

    /// Long window width in days
    #[arg(long, default_value_t = RollingConfig::default().long_window)]
    long: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::level_filters::LevelFilter::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = PipelineConfig {
        rolling: RollingConfig { short_window: args.short, long_window: args.long },
        season_mode: if args.season_to_date { SeasonMode::ToDate } else { SeasonMode::default() },
        ..PipelineConfig::default()
    };
    let pipeline = FeaturePipeline::with_config(config)?;

    let raw = read_csv(&args.events)?;
    let batch = events_from_frame(&raw, &EventColumns::default())?;
    info!(
        component = "cli",
        event = "cli.events.loaded",
        path = %args.events.display(),
        rows = raw.height(),
        events = batch.events.len(),
        excluded = batch.excluded
    );

    let table = pipeline.run(&batch.events)?;

    let roster = match &args.roster {
        Some(path) if !path.exists() => {
            write_csv(&mut roster_template(), path)?;
            warn!(
                component = "cli",
                event = "cli.roster.template",
                path = %path.display(),
                "roster file not found, wrote an empty template to fill in"
            );
            Roster::default()
        }
        Some(path) => load_roster(path, &pipeline.config().roster),
        None => Roster::default(),
    };
    let mut features = enrich_or_degrade(table.to_frame()?, &RosterEnricher::new(roster));

    write_csv(&mut features, &args.out)?;

    if let Some(dir) = &args.split_dir {
        fs::create_dir_all(dir)?;
        let mut split = split_by_role(&features)?;
        let targets = [(Role::Batter, &mut split.batters), (Role::Pitcher, &mut split.pitchers)];
        for (role, frame) in targets {
            write_csv(frame, &dir.join(format!("{}_features.csv", role.as_str())))?;
        }
        if split.unassigned > 0 {
            warn!(
                component = "cli",
                event = "cli.split.unassigned",
                rows = split.unassigned,
                "rows with an unrecognised role were not written to a per-role file"
            );
        }
    }

    FeatureAudit::from_table(&table).print_summary();

    Ok(())
}

fn read_csv(path: &Path) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
}

fn write_csv(df: &mut DataFrame, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    info!(
        component = "cli",
        event = "cli.output.written",
        path = %path.display(),
        rows = df.height(),
        columns = df.width()
    );
    Ok(())
}

/// Load a roster, degrading to an empty one when the file is unusable.
fn load_roster(path: &Path, config: &RosterConfig) -> Roster {
    let loaded = read_csv(path)
        .map_err(|err| err.to_string())
        .and_then(|df| Roster::from_frame(&df, config).map_err(|err| err.to_string()));
    match loaded {
        Ok(roster) => roster,
        Err(error) => {
            warn!(
                component = "cli",
                event = "cli.roster.unusable",
                path = %path.display(),
                error = %error,
                "continuing without roster attributes"
            );
            Roster::default()
        }
    }
}
