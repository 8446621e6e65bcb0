//! Stereographic projection centred on a sky direction.
//!
//! A direction at angular distance θ from the centre lands at radius
//! `tan(θ/2)`, so the horizon of a zenith-centred chart is the unit circle.
//! The chart is a view of the sky from below: north is up and east is to the
//! left.

use super::{dot, normalize, Vec3};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StereographicProjection {
    center: Vec3,
    /// Unit vector toward increasing right ascension at the centre
    east: Vec3,
    /// Unit vector toward the north celestial pole at the centre
    north: Vec3,
}

impl StereographicProjection {
    /// Build the projection around `center` (any non-zero length).
    pub fn new(center: Vec3) -> ChartResult<Self> {
        let c = normalize(&center);
        if !c.iter().all(|v| v.is_finite()) {
            return Err(ChartError::InvalidLocation(format!(
                "Projection center {:?} has no direction",
                center
            )));
        }

        // At a celestial pole every direction is "north"; fall back to RA 0
        let rho = c[0].hypot(c[1]);
        let (sin_a, cos_a) = if rho > 1e-15 {
            (c[1] / rho, c[0] / rho)
        } else {
            (0.0, 1.0)
        };

        Ok(Self {
            center: c,
            east: [-sin_a, cos_a, 0.0],
            north: [-c[2] * cos_a, -c[2] * sin_a, rho],
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Chart coordinates of a direction (any non-zero length).
    ///
    /// Points are not clamped; the antipode of the centre is non-finite.
    pub fn project(&self, direction: &Vec3) -> (f64, f64) {
        let u = normalize(direction);
        let scale = 1.0 / (1.0 + dot(&u, &self.center));
        (-scale * dot(&u, &self.east), scale * dot(&u, &self.north))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::unit_from_radec;
    use qtty::{Degrees, Radian};

    fn radec(ra_deg: f64, dec_deg: f64) -> Vec3 {
        unit_from_radec(
            Degrees::new(ra_deg).to::<Radian>(),
            Degrees::new(dec_deg).to::<Radian>(),
        )
    }

    /// The closed form the basis-vector version must reproduce.
    fn reference(center: &Vec3, u: &Vec3) -> (f64, f64) {
        let [xc, yc, zc] = *center;
        let [x, y, z] = *u;
        let t0 = 1.0 / (xc * xc + yc * yc).sqrt();
        let t1 = x * xc;
        let t2 = (1.0 - zc * zc).sqrt();
        let t3 = t0 * t2;
        let t4 = y * yc;
        let t5 = 1.0 / (t1 * t3 + t3 * t4 + z * zc + 1.0);
        let t6 = t0 * zc;
        (t0 * t5 * (x * yc - xc * y), -t5 * (t1 * t6 - t2 * z + t4 * t6))
    }

    #[test]
    fn test_center_maps_to_origin() {
        let center = radec(123.0, 45.0);
        let projection = StereographicProjection::new(center).unwrap();
        let (x, y) = projection.project(&center);
        assert!(x.abs() < 1e-12 && y.abs() < 1e-12);
    }

    #[test]
    fn test_horizon_is_unit_circle() {
        let projection = StereographicProjection::new(radec(40.0, 30.0)).unwrap();
        for (ra, dec) in [(130.0, 0.0), (40.0, -60.0), (220.0, 60.0)] {
            let (x, y) = projection.project(&radec(ra, dec));
            assert!((x.hypot(y) - 1.0).abs() < 1e-9, "ra {} dec {}", ra, dec);
        }
    }

    #[test]
    fn test_radius_is_half_angle_tangent() {
        let projection = StereographicProjection::new(radec(0.0, 0.0)).unwrap();
        let (x, y) = projection.project(&radec(0.0, 40.0));
        assert!(x.abs() < 1e-12);
        assert!((y - 20f64.to_radians().tan()).abs() < 1e-12);
    }

    #[test]
    fn test_east_is_left_north_is_up() {
        let projection = StereographicProjection::new(radec(90.0, 0.0)).unwrap();
        let (x_east, _) = projection.project(&radec(100.0, 0.0));
        let (_, y_north) = projection.project(&radec(90.0, 10.0));
        assert!(x_east < 0.0);
        assert!(y_north > 0.0);
    }

    #[test]
    fn test_matches_closed_form() {
        let center = radec(287.3, 51.2);
        let projection = StereographicProjection::new(center).unwrap();
        for (ra, dec) in [(279.2, 38.8), (10.0, -20.0), (150.0, 89.0), (287.3, -30.0)] {
            let u = radec(ra, dec);
            let (x, y) = projection.project(&u);
            let (rx, ry) = reference(&center, &u);
            assert!((x - rx).abs() < 1e-12 && (y - ry).abs() < 1e-12, "ra {} dec {}", ra, dec);
        }
    }

    #[test]
    fn test_pole_center_is_defined() {
        let projection = StereographicProjection::new([0.0, 0.0, 1.0]).unwrap();
        let (x, y) = projection.project(&radec(0.0, 0.0));
        assert!((x.hypot(y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_antipode_is_not_finite() {
        let projection = StereographicProjection::new([1.0, 0.0, 0.0]).unwrap();
        let (x, y) = projection.project(&[-1.0, 0.0, 0.0]);
        assert!(!x.is_finite() || !y.is_finite());
    }

    #[test]
    fn test_zero_center_rejected() {
        assert!(StereographicProjection::new([0.0; 3]).is_err());
    }
}
