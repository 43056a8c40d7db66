//! Roster enrichment.

use std::collections::BTreeMap;

use polars::prelude::*;
use statline_primitives::{PlayerId, RosterEntry};
use statline_traits::{EnrichError, Enricher};
use tracing::{info, warn};

/// Join key shared by feature frames and roster frames.
const PLAYER_KEY: &str = "player_id";

/// Temporary column used to restore feature row order after the join.
const ROW_INDEX: &str = "__row";

/// Columns added by [`RosterEnricher`].
const ENRICHMENT_COLUMNS: [&str; 3] = ["player_name", "handedness", "team"];

/// Which roster columns hold the key and each attribute.
///
/// Each list is a precedence order: the first column present wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    /// Player id column candidates.
    pub key_candidates: Vec<String>,
    /// Display name column candidates.
    pub name_candidates: Vec<String>,
    /// Handedness column candidates.
    pub handedness_candidates: Vec<String>,
    /// Team column candidates.
    pub team_candidates: Vec<String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().map(|s| (*s).to_string()).collect();
        Self {
            key_candidates: owned(&["player", "player_id", "id"]),
            name_candidates: owned(&["player_name", "name", "full_name"]),
            handedness_candidates: owned(&["handedness", "throws"]),
            team_candidates: owned(&["team"]),
        }
    }
}

/// Player attributes keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    entries: BTreeMap<PlayerId, RosterEntry>,
    skipped: usize,
}

impl Roster {
    /// Build a roster from entries. The first entry for an id wins.
    pub fn from_entries(entries: impl IntoIterator<Item = RosterEntry>) -> Self {
        let mut roster = Self::default();
        for entry in entries {
            roster.entries.entry(entry.player_id).or_insert(entry);
        }
        roster
    }

    /// Read a roster frame.
    ///
    /// Keys that do not parse as a player id are skipped and counted.
    /// Attribute columns that are absent leave the attribute unset.
    ///
    /// # Errors
    /// Returns `EnrichError::MissingKeyColumn` if no key candidate is present,
    /// `EnrichError::NoUsableRows` if no key parses, or `EnrichError::Polars`
    /// if a column cannot be read as text.
    pub fn from_frame(df: &DataFrame, config: &RosterConfig) -> Result<Self, EnrichError> {
        let key = first_present(df, &config.key_candidates).ok_or_else(|| {
            EnrichError::MissingKeyColumn { candidates: config.key_candidates.clone() }
        })?;
        let keys = text_values(df, key)?;
        let names = optional_text(df, &config.name_candidates)?;
        let handedness = optional_text(df, &config.handedness_candidates)?;
        let teams = optional_text(df, &config.team_candidates)?;

        let mut skipped = 0usize;
        let mut entries = Vec::with_capacity(keys.len());
        for (i, key) in keys.into_iter().enumerate() {
            let Some(player_id) = key.as_deref().and_then(parse_key) else {
                skipped += 1;
                continue;
            };
            entries.push(RosterEntry {
                player_id,
                name: names[i].clone(),
                handedness: handedness[i].clone(),
                team: teams[i].clone(),
            });
        }

        if entries.is_empty() {
            return Err(EnrichError::NoUsableRows);
        }

        let parsed = entries.len();
        let mut roster = Self::from_entries(entries);
        roster.skipped = skipped;

        if skipped > 0 {
            warn!(
                component = "pipeline",
                event = "pipeline.roster.skipped",
                skipped,
                key,
                "roster rows with an unparseable player id"
            );
        }
        info!(
            component = "pipeline",
            event = "pipeline.roster.loaded",
            key,
            players = roster.len(),
            duplicates = parsed - roster.len(),
        );

        Ok(roster)
    }

    /// Entry for a player.
    #[must_use]
    pub fn get(&self, player_id: PlayerId) -> Option<&RosterEntry> {
        self.entries.get(&player_id)
    }

    /// Number of distinct players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Source rows skipped for an unparseable key.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// One row per player with the enrichment columns.
    fn to_frame(&self) -> PolarsResult<DataFrame> {
        let entries = self.entries.values();
        let ids: Vec<u64> = entries.clone().map(|e| e.player_id.get()).collect();
        let names: Vec<Option<String>> = entries.clone().map(|e| e.name.clone()).collect();
        let hands: Vec<Option<String>> = entries.clone().map(|e| e.handedness.clone()).collect();
        let teams: Vec<Option<String>> = entries.map(|e| e.team.clone()).collect();

        DataFrame::new(vec![
            Column::new(PLAYER_KEY.into(), ids),
            Column::new(ENRICHMENT_COLUMNS[0].into(), names),
            Column::new(ENRICHMENT_COLUMNS[1].into(), hands),
            Column::new(ENRICHMENT_COLUMNS[2].into(), teams),
        ])
    }
}

fn first_present<'a>(df: &DataFrame, candidates: &'a [String]) -> Option<&'a str> {
    candidates.iter().map(String::as_str).find(|name| df.column(name).is_ok())
}

fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, EnrichError> {
    let column = df.column(name)?.cast(&DataType::String)?;
    Ok(column.str()?.into_iter().map(|v| v.map(|s| s.trim().to_string())).collect())
}

fn optional_text(
    df: &DataFrame,
    candidates: &[String],
) -> Result<Vec<Option<String>>, EnrichError> {
    match first_present(df, candidates) {
        Some(name) => text_values(df, name),
        None => Ok(vec![None; df.height()]),
    }
}

/// Parse a roster key. Integral floats such as `"660271.0"` are accepted.
fn parse_key(text: &str) -> Option<PlayerId> {
    let text = text.trim();
    text.parse::<PlayerId>().ok().or_else(|| {
        let value: f64 = text.parse().ok()?;
        (value >= 0.0 && value.fract() == 0.0 && value < u64::MAX as f64)
            .then(|| PlayerId::new(value as u64))
    })
}

/// Header of an empty roster file meant to be filled in by hand.
pub const ROSTER_TEMPLATE_COLUMNS: [&str; 6] =
    ["player", "player_name", "handedness", "team", "position", "mlb_debut"];

/// An empty roster frame with [`ROSTER_TEMPLATE_COLUMNS`], all text.
#[must_use]
pub fn roster_template() -> DataFrame {
    let columns = ROSTER_TEMPLATE_COLUMNS
        .iter()
        .map(|&name| Column::full_null(name.into(), 0, &DataType::String))
        .collect();
    DataFrame::new(columns).unwrap_or_default()
}

/// Left-joins roster attributes onto feature rows by `player_id`.
///
/// Row count and row order of the feature frame are preserved. Rows without
/// a roster match get nulls.
#[derive(Debug, Clone, Default)]
pub struct RosterEnricher {
    roster: Roster,
}

impl RosterEnricher {
    /// Create an enricher.
    #[must_use]
    pub const fn new(roster: Roster) -> Self {
        Self { roster }
    }

    /// Get the roster.
    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }
}

impl Enricher for RosterEnricher {
    fn enrich(&self, features: DataFrame) -> Result<DataFrame, EnrichError> {
        let key_dtype = features.column(PLAYER_KEY)?.dtype().clone();
        let roster = self.roster.to_frame()?.lazy().with_column(col(PLAYER_KEY).cast(key_dtype));

        let joined = features
            .lazy()
            .with_row_index(ROW_INDEX, None)
            .join(roster, [col(PLAYER_KEY)], [col(PLAYER_KEY)], JoinArgs::new(JoinType::Left))
            .sort([ROW_INDEX], SortMultipleOptions::default())
            .collect()?;

        Ok(joined.drop(ROW_INDEX)?)
    }

    fn output_columns(&self) -> &[&str] {
        &ENRICHMENT_COLUMNS
    }
}

/// Enrich `features`, falling back to all-null enrichment columns on failure.
///
/// Enrichment is descriptive only, so an error never fails the caller; it is
/// logged at `warn` instead.
pub fn enrich_or_degrade(features: DataFrame, enricher: &dyn Enricher) -> DataFrame {
    match enricher.enrich(features.clone()) {
        Ok(enriched) => enriched,
        Err(err) => {
            warn!(
                component = "pipeline",
                event = "pipeline.enrich.degraded",
                error = %err,
                "enrichment failed, adding null columns"
            );
            with_null_columns(features, enricher.output_columns())
        }
    }
}

fn with_null_columns(mut df: DataFrame, names: &[&str]) -> DataFrame {
    let height = df.height();
    for &name in names {
        if df.column(name).is_ok() {
            continue;
        }
        let nulls = Column::full_null(name.into(), height, &DataType::String);
        if let Err(err) = df.with_column(nulls) {
            warn!(
                component = "pipeline",
                event = "pipeline.enrich.null_column",
                column = name,
                error = %err
            );
        }
    }
    df
}
