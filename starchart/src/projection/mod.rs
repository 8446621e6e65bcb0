//! From an observing site and instant to chart coordinates.
//!
//! [`observer`] finds the local zenith on the sky, [`stereographic`] builds
//! the projection centred on it and [`stars`] runs catalogue stars through it.

pub mod observer;
pub mod stars;
pub mod stereographic;

pub use observer::{geocentric_position_km, observer_zenith, precession_matrix, Zenith};
pub use stars::{observe, project_stars, ra_degrees_to_hours, ObserveOptions};
pub use stereographic::StereographicProjection;

pub(crate) type Vec3 = [f64; 3];

pub(crate) fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub(crate) fn norm(a: &Vec3) -> f64 {
    dot(a, a).sqrt()
}

/// Unit vector along `a`; the zero vector maps to NaN components.
pub(crate) fn normalize(a: &Vec3) -> Vec3 {
    let n = norm(a);
    [a[0] / n, a[1] / n, a[2] / n]
}

/// Unit vector for a right ascension / declination pair.
pub(crate) fn unit_from_radec(ra: qtty::Radians, dec: qtty::Radians) -> Vec3 {
    let (sin_ra, cos_ra) = ra.sin_cos();
    let (sin_dec, cos_dec) = dec.sin_cos();
    [cos_dec * cos_ra, cos_dec * sin_ra, sin_dec]
}
