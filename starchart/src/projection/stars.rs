//! Catalogue stars to chart coordinates.

use qtty::{Degrees, HourAngles, Radian};
use serde::{Deserialize, Serialize};

use super::{normalize, unit_from_radec, StereographicProjection, Vec3};
use crate::catalog::HIPPARCOS_EPOCH;
use crate::models::{ProjectedStar, StarRecord};
use crate::time::AstroTime;

/// Astronomical units in one parsec.
pub const AU_PER_PARSEC: f64 = 206_264.806_247_096_36;
/// Distance assigned to stars without a usable parallax (1 Gpc).
pub const DEFAULT_DISTANCE_AU: f64 = AU_PER_PARSEC * 1.0e9;

const MAS_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3_600_000.0);

/// Which catalogue astrometry to apply when observing a star.
///
/// With both off a star is a fixed direction at 1 Gpc.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserveOptions {
    #[serde(default)]
    pub proper_motion: bool,
    #[serde(default)]
    pub parallax: bool,
}

impl ObserveOptions {
    pub fn full() -> Self {
        Self {
            proper_motion: true,
            parallax: true,
        }
    }
}

/// Right ascension from degrees to hours: exactly `degrees / 15`.
pub fn ra_degrees_to_hours(degrees: Degrees) -> HourAngles {
    HourAngles::new(degrees.value() / 15.0)
}

/// Direction from the Earth to `star` at `time`, as a unit vector on ICRS
/// axes.
pub fn observe(
    star: &StarRecord,
    earth_au: &Vec3,
    time: &AstroTime,
    options: ObserveOptions,
) -> Vec3 {
    let ra = ra_degrees_to_hours(star.ra).to::<Radian>();
    let dec = star.dec.to::<Radian>();
    let unit = unit_from_radec(ra, dec);

    let distance = match star.parallax_mas {
        Some(plx) if options.parallax && plx > 0.0 => AU_PER_PARSEC / (plx / 1000.0),
        _ => DEFAULT_DISTANCE_AU,
    };
    let mut position = [unit[0] * distance, unit[1] * distance, unit[2] * distance];

    if options.proper_motion {
        let pm_ra = star.pm_ra_mas_per_year.unwrap_or(0.0) * MAS_TO_RAD;
        let pm_dec = star.pm_dec_mas_per_year.unwrap_or(0.0) * MAS_TO_RAD;
        let (sin_ra, cos_ra) = ra.sin_cos();
        let (sin_dec, cos_dec) = dec.sin_cos();
        let east = [-sin_ra, cos_ra, 0.0];
        let north = [-sin_dec * cos_ra, -sin_dec * sin_ra, cos_dec];
        let years = time.years_since_epoch(HIPPARCOS_EPOCH);
        for (p, (e, n)) in position.iter_mut().zip(east.iter().zip(north.iter())) {
            *p += distance * (pm_ra * e + pm_dec * n) * years;
        }
    }

    normalize(&[
        position[0] - earth_au[0],
        position[1] - earth_au[1],
        position[2] - earth_au[2],
    ])
}

/// Project every star, keeping catalogue order.
pub fn project_stars(
    stars: &[StarRecord],
    projection: &StereographicProjection,
    earth_au: &Vec3,
    time: &AstroTime,
    options: ObserveOptions,
) -> Vec<ProjectedStar> {
    stars
        .iter()
        .map(|star| {
            let direction = observe(star, earth_au, time, options);
            let (x, y) = projection.project(&direction);
            ProjectedStar {
                star: star.clone(),
                ra_hours: ra_degrees_to_hours(star.ra),
                x,
                y,
            }
        })
        .collect()
}
