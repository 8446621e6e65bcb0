use qtty::{Degrees, HourAngles};
use serde::{Deserialize, Serialize};

/// One catalogue entry.
///
/// Right ascension is stored in degrees, as the Hipparcos main catalogue
/// publishes it. Astrometric extras are optional; a record without them is
/// treated as a fixed point at infinity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    /// Hipparcos identifier (0 for synthetic records)
    pub hip: u32,
    pub ra: Degrees,
    pub dec: Degrees,
    /// Apparent visual magnitude; lower is brighter
    pub magnitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallax_mas: Option<f64>,
    /// Proper motion in RA, already multiplied by cos(dec)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm_ra_mas_per_year: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm_dec_mas_per_year: Option<f64>,
}

impl StarRecord {
    /// Bare position and brightness.
    pub fn new(ra_deg: f64, dec_deg: f64, magnitude: f64) -> Self {
        Self {
            hip: 0,
            ra: Degrees::new(ra_deg),
            dec: Degrees::new(dec_deg),
            magnitude,
            parallax_mas: None,
            pm_ra_mas_per_year: None,
            pm_dec_mas_per_year: None,
        }
    }

    pub fn with_hip(mut self, hip: u32) -> Self {
        self.hip = hip;
        self
    }

    pub fn with_astrometry(mut self, parallax_mas: f64, pm_ra: f64, pm_dec: f64) -> Self {
        self.parallax_mas = Some(parallax_mas);
        self.pm_ra_mas_per_year = Some(pm_ra);
        self.pm_dec_mas_per_year = Some(pm_dec);
        self
    }
}

/// A star that survived the magnitude cut, with its chart coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedStar {
    pub star: StarRecord,
    /// Right ascension converted to hours (degrees / 15)
    pub ra_hours: HourAngles,
    /// Chart x; nominally within [-1, 1] above the horizon, never clamped
    pub x: f64,
    pub y: f64,
}

impl ProjectedStar {
    pub fn magnitude(&self) -> f64 {
        self.star.magnitude
    }

    /// Whether the star falls inside the fixed [-1, 1] chart window.
    pub fn in_view(&self) -> bool {
        self.x.abs() <= 1.0 && self.y.abs() <= 1.0
    }
}
