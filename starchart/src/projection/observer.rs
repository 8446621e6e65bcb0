//! Observer position and zenith direction.
//!
//! The site is placed on the WGS84 ellipsoid in the Earth-fixed frame, turned
//! by Greenwich mean sidereal time into the mean equator of date and then
//! precessed back to J2000 (IAU 1976). Nutation and frame bias are left out;
//! together they shift the zenith by less than 20 arcseconds.

use qtty::{Degrees, HourAngles, Radians};
use serde::Serialize;

use super::{normalize, Vec3};
use crate::models::Location;
use crate::time::{greenwich_mean_sidereal_time, AstroTime};

/// WGS84 equatorial radius in km.
pub const WGS84_RADIUS_KM: f64 = 6378.137;
/// WGS84 flattening.
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0);

/// Direction of the local zenith on the celestial sphere (ICRS/J2000).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Zenith {
    pub ra: HourAngles,
    pub dec: Degrees,
    /// Unit vector of the zenith direction
    pub direction: Vec3,
}

impl Zenith {
    pub fn from_direction(direction: Vec3) -> Self {
        let u = normalize(&direction);
        let ra_rad = u[1].atan2(u[0]).rem_euclid(std::f64::consts::TAU);
        let dec_rad = u[2].clamp(-1.0, 1.0).asin();
        Self {
            ra: HourAngles::new(ra_rad.to_degrees() / 15.0),
            dec: Degrees::new(dec_rad.to_degrees()),
            direction: u,
        }
    }
}

/// Earth-fixed (ITRS) position of a geodetic site, in km.
pub fn geocentric_position_km(latitude: Degrees, longitude: Degrees, elevation_m: f64) -> Vec3 {
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_lon, cos_lon) = longitude.sin_cos();
    let e2 = WGS84_FLATTENING * (2.0 - WGS84_FLATTENING);
    let n = WGS84_RADIUS_KM / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let h = elevation_m / 1000.0;
    [
        (n + h) * cos_lat * cos_lon,
        (n + h) * cos_lat * sin_lon,
        (n * (1.0 - e2) + h) * sin_lat,
    ]
}

/// IAU 1976 precession matrix from J2000 to the mean equator of date, for
/// `t` Julian centuries of TT since J2000.
pub fn precession_matrix(t: f64) -> [[f64; 3]; 3] {
    let zeta = Radians::new((2306.2181 + (0.30188 + 0.017998 * t) * t) * t * ARCSEC_TO_RAD);
    let z = Radians::new((2306.2181 + (1.09468 + 0.018203 * t) * t) * t * ARCSEC_TO_RAD);
    let theta = Radians::new((2004.3109 - (0.42665 + 0.041833 * t) * t) * t * ARCSEC_TO_RAD);

    let (sz, cz) = zeta.sin_cos();
    let (s_z, c_z) = z.sin_cos();
    let (st, ct) = theta.sin_cos();

    [
        [cz * c_z * ct - sz * s_z, -sz * c_z * ct - cz * s_z, -c_z * st],
        [cz * s_z * ct + sz * c_z, -sz * s_z * ct + cz * c_z, -s_z * st],
        [cz * st, -sz * st, ct],
    ]
}

fn transpose_apply(m: &[[f64; 3]; 3], v: &Vec3) -> Vec3 {
    [
        m[0][0] * v[0] + m[1][0] * v[1] + m[2][0] * v[2],
        m[0][1] * v[0] + m[1][1] * v[1] + m[2][1] * v[2],
        m[0][2] * v[0] + m[1][2] * v[1] + m[2][2] * v[2],
    ]
}

/// Observer position on J2000 axes, in km from the geocentre.
pub fn observer_position_j2000_km(location: &Location, time: &AstroTime) -> Vec3 {
    let itrs = geocentric_position_km(
        Degrees::new(location.latitude()),
        Degrees::new(location.longitude()),
        location.elevation_m(),
    );

    let gmst = Radians::new(greenwich_mean_sidereal_time(time.jd_ut1, time.jd_tt));
    let (sin_g, cos_g) = gmst.sin_cos();
    let of_date = [
        itrs[0] * cos_g - itrs[1] * sin_g,
        itrs[0] * sin_g + itrs[1] * cos_g,
        itrs[2],
    ];

    transpose_apply(&precession_matrix(time.centuries_tt()), &of_date)
}

/// The point of the sky straight above the observer, taken along the
/// geocentric position vector.
pub fn observer_zenith(location: &Location, time: &AstroTime) -> Zenith {
    let zenith = Zenith::from_direction(observer_position_j2000_km(location, time));
    log::debug!(
        "Zenith for {} at {}: RA {:.4}h, Dec {:.4}°",
        location.name,
        time.utc,
        zenith.ra.value(),
        zenith.dec.value()
    );
    zenith
}
