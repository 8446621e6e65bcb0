use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Geographic coordinates returned by a geocoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in decimal degrees (-180 to 180), east positive
    pub longitude: f64,
    /// Elevation in meters above the WGS84 ellipsoid (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_m: Option<f64>,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64, elevation_m: Option<f64>) -> ChartResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ChartError::InvalidLocation(format!(
                "Latitude must be between -90 and 90 degrees, got {}",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ChartError::InvalidLocation(format!(
                "Longitude must be between -180 and 180 degrees, got {}",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
            elevation_m,
        })
    }
}

/// A resolved observing site.
///
/// Built once by the location resolver and never modified afterwards. The
/// coordinates and the timezone come from independent lookups of the same name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub name: String,
    pub coordinates: Coordinates,
    #[serde(serialize_with = "serialize_tz")]
    pub timezone: Tz,
}

impl Location {
    pub fn new(name: impl Into<String>, coordinates: Coordinates, timezone: Tz) -> Self {
        Self {
            name: name.into(),
            coordinates,
            timezone,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates.longitude
    }

    /// Elevation in meters, zero when the geocoder did not report one.
    pub fn elevation_m(&self) -> f64 {
        self.coordinates.elevation_m.unwrap_or(0.0)
    }

    pub fn timezone_name(&self) -> &'static str {
        self.timezone.name()
    }
}

pub(crate) fn serialize_tz<S>(tz: &Tz, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(tz.name())
}
