//! Local wall-clock time to UTC.
//!
//! The input is a fixed `DD-MM-YYYY HH:MM` string interpreted in the timezone
//! of the resolved location. Times that the timezone makes ambiguous (DST
//! fold) or skips (DST gap) are rejected instead of guessed.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use super::scales::AstroTime;
use crate::error::{ChartError, ChartResult};
use crate::models::location::serialize_tz;

/// chrono format of the observation time input.
pub const DATE_TIME_FORMAT: &str = "%d-%m-%Y %H:%M";

/// A local observation time pinned to a timezone and converted to UTC.
#[derive(Debug, Clone, Serialize)]
pub struct ObservationTime {
    /// The original wall-clock string
    pub input: String,
    #[serde(serialize_with = "serialize_tz")]
    pub timezone: Tz,
    pub local: DateTime<Tz>,
    pub utc: DateTime<Utc>,
    pub astro: AstroTime,
}

impl ObservationTime {
    /// Parse `DD-MM-YYYY HH:MM`, localize it to `timezone` and convert to UTC.
    pub fn parse(input: &str, timezone: Tz) -> ChartResult<Self> {
        let naive = parse_wall_clock(input)?;
        let local = localize(input, naive, timezone)?;
        let utc = local.with_timezone(&Utc);
        log::debug!("Localized '{}' in {} to {}", input, timezone.name(), utc);

        Ok(Self {
            input: input.to_string(),
            timezone,
            local,
            utc,
            astro: AstroTime::from_utc(utc),
        })
    }
}

/// Parse the wall-clock string without attaching a timezone.
pub fn parse_wall_clock(input: &str) -> ChartResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input.trim(), DATE_TIME_FORMAT).map_err(|e| {
        ChartError::invalid_datetime(input, format!("expected DD-MM-YYYY HH:MM ({})", e))
    })
}

fn localize(input: &str, naive: NaiveDateTime, timezone: Tz) -> ChartResult<DateTime<Tz>> {
    match timezone.from_local_datetime(&naive) {
        LocalResult::Single(local) => Ok(local),
        LocalResult::Ambiguous(earliest, latest) => Err(ChartError::AmbiguousLocalTime {
            input: input.to_string(),
            timezone: timezone.name().to_string(),
            earliest: earliest.to_rfc3339(),
            latest: latest.to_rfc3339(),
        }),
        LocalResult::None => Err(ChartError::NonexistentLocalTime {
            input: input.to_string(),
            timezone: timezone.name().to_string(),
        }),
    }
}
