//! Adapting event frames to typed events.

use polars::prelude::*;
use statline_primitives::{AtBatId, Date, GameId, PlayerId, RawEvent};
use tracing::{debug, warn};

use crate::PipelineError;

/// Days from 0001-01-01 to 1970-01-01, the epoch of polars `Date` values.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Column names of an event frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventColumns {
    /// Event date: string, date or datetime.
    pub date: String,
    /// Game identifier.
    pub game: String,
    /// At-bat sequence number within the game.
    pub at_bat: String,
    /// Batter identifier.
    pub batter: String,
    /// Pitcher identifier.
    pub pitcher: String,
    /// Outcome code. Optional in the frame.
    pub outcome: String,
    /// Pitch velocity. Optional in the frame.
    pub velocity: String,
}

impl Default for EventColumns {
    fn default() -> Self {
        Self {
            date: "game_date".to_string(),
            game: "game_pk".to_string(),
            at_bat: "at_bat_number".to_string(),
            batter: "batter".to_string(),
            pitcher: "pitcher".to_string(),
            outcome: "events".to_string(),
            velocity: "velo".to_string(),
        }
    }
}

/// Events read from a frame, plus the rows that could not be used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBatch {
    /// Parsed events, in frame order.
    pub events: Vec<RawEvent>,
    /// Rows excluded for a missing or unparseable date, game or at-bat.
    pub excluded: usize,
}

/// Convert an event frame into typed events.
///
/// Dates may be strings (`YYYY-MM-DD`, optionally followed by a time),
/// dates or datetimes. Identifiers may be integer, float or numeric string
/// columns; negative or unparseable values count as missing. A missing
/// batter or pitcher id is kept on the event and handled by the reducer.
///
/// # Errors
/// Returns `PipelineError::MissingColumn` if the date, game, at-bat, batter
/// or pitcher column is absent, or `PipelineError::Polars` if a column cannot
/// be cast.
pub fn events_from_frame(
    df: &DataFrame,
    columns: &EventColumns,
) -> Result<EventBatch, PipelineError> {
    let dates = date_values(required(df, &columns.date)?)?;
    let games = id_values(required(df, &columns.game)?)?;
    let at_bats = id_values(required(df, &columns.at_bat)?)?;
    let batters = id_values(required(df, &columns.batter)?)?;
    let pitchers = id_values(required(df, &columns.pitcher)?)?;

    let outcomes: Vec<Option<String>> = match df.column(&columns.outcome) {
        Ok(column) => column
            .cast(&DataType::String)?
            .str()?
            .into_iter()
            .map(|code| code.map(str::to_string))
            .collect(),
        Err(_) => vec![None; df.height()],
    };
    let velocities: Vec<Option<f64>> = match df.column(&columns.velocity) {
        Ok(column) => column.cast(&DataType::Float64)?.f64()?.into_iter().collect(),
        Err(_) => vec![None; df.height()],
    };

    let mut events = Vec::with_capacity(df.height());
    let mut excluded = 0usize;

    for i in 0..df.height() {
        let (Some(date), Some(game), Some(at_bat)) = (dates[i], games[i], at_bats[i]) else {
            excluded += 1;
            continue;
        };

        let mut event = RawEvent::new(
            date,
            GameId::new(game),
            AtBatId::new(at_bat),
            batters[i].map(PlayerId::new),
            pitchers[i].map(PlayerId::new),
        );
        event.outcome_code = outcomes[i].clone();
        event.velocity = velocities[i];
        events.push(event);
    }

    if excluded > 0 {
        warn!(
            component = "pipeline",
            event = "pipeline.frame.excluded",
            excluded,
            total = df.height(),
            "excluded event rows without a date, game or at-bat"
        );
    }
    debug!(component = "pipeline", event = "pipeline.frame.read", events = events.len());

    Ok(EventBatch { events, excluded })
}

fn required<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, PipelineError> {
    df.column(name).map_err(|_| PipelineError::MissingColumn(name.to_string()))
}

fn date_values(column: &Column) -> Result<Vec<Option<Date>>, PipelineError> {
    if column.dtype() == &DataType::String {
        return Ok(column.str()?.into_iter().map(|s| s.and_then(parse_date)).collect());
    }

    let days = column.cast(&DataType::Date)?.cast(&DataType::Int32)?;
    Ok(days.i32()?.into_iter().map(|d| d.and_then(date_from_epoch_days)).collect())
}

fn parse_date(text: &str) -> Option<Date> {
    let text = text.trim();
    let day = text.get(..10).unwrap_or(text);
    Date::parse_from_str(day, "%Y-%m-%d").ok()
}

fn date_from_epoch_days(days: i32) -> Option<Date> {
    Date::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

/// Non-negative integral ids; fractional or negative values count as missing.
fn id_values(column: &Column) -> Result<Vec<Option<u64>>, PipelineError> {
    if column.dtype().is_float() {
        let ids = column.cast(&DataType::Float64)?;
        return Ok(ids.f64()?.into_iter().map(|v| v.and_then(integral_id)).collect());
    }

    let ids = column.cast(&DataType::Int64)?;
    Ok(ids.i64()?.into_iter().map(|v| v.and_then(|v| u64::try_from(v).ok())).collect())
}

fn integral_id(value: f64) -> Option<u64> {
    (value >= 0.0 && value.fract() == 0.0 && value < u64::MAX as f64).then(|| value as u64)
}
