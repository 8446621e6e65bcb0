//! Error types for the star chart pipeline.
//!
//! Every stage of the pipeline reports failures through [`ChartError`]. None of
//! them is recoverable inside a run: the binary surfaces the message and exits.

use crate::ephemeris::SpkError;

/// Result type for chart operations
pub type ChartResult<T> = Result<T, ChartError>;

/// Error type for chart operations
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// A place name was not known to one of the lookup sources.
    #[error("Location not found: '{place}' is unknown to the {source_name}")]
    LocationNotFound {
        place: String,
        source_name: &'static str,
    },

    /// Coordinates outside the valid geographic range.
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// The timezone database returned a name chrono-tz cannot resolve.
    #[error("Timezone error: {0}")]
    Timezone(String),

    /// The local date/time string does not match `DD-MM-YYYY HH:MM`.
    #[error("Invalid date/time '{input}': {reason}")]
    InvalidDateTime { input: String, reason: String },

    /// The local time occurs twice in the timezone (DST fold).
    #[error("Ambiguous local time '{input}' in {timezone}: could be {earliest} or {latest}")]
    AmbiguousLocalTime {
        input: String,
        timezone: String,
        earliest: String,
        latest: String,
    },

    /// The local time is skipped by the timezone (DST gap).
    #[error("Local time '{input}' does not exist in {timezone}")]
    NonexistentLocalTime { input: String, timezone: String },

    /// Star catalogue missing, unreadable or malformed.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Ephemeris file missing, corrupt or not covering the epoch.
    #[error("Ephemeris error: {0}")]
    Ephemeris(#[from] SpkError),

    /// Network failure talking to the geocoder or a data mirror.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file or override problem.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The plotting backend failed to draw or write the image.
    #[error("Render error: {0}")]
    Render(String),
}

impl ChartError {
    pub fn not_found(place: impl Into<String>, source_name: &'static str) -> Self {
        ChartError::LocationNotFound {
            place: place.into(),
            source_name,
        }
    }

    pub fn invalid_datetime(input: impl Into<String>, reason: impl Into<String>) -> Self {
        ChartError::InvalidDateTime {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
