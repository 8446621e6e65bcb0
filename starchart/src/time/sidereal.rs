//! Earth rotation angle and Greenwich mean sidereal time (IAU 2006).

use std::f64::consts::TAU;

use crate::models::J2000_JD;

const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0);

/// Earth rotation angle in radians, wrapped to [0, 2π).
pub fn earth_rotation_angle(jd_ut1: f64) -> f64 {
    let t = jd_ut1 - J2000_JD;
    // The integer day contributes whole turns; keep only the fraction for precision.
    let f = jd_ut1.rem_euclid(1.0);
    let theta = TAU * (f + 0.779_057_273_264_0 + 0.002_737_811_911_354_48 * t);
    theta.rem_euclid(TAU)
}

/// Greenwich mean sidereal time in radians, wrapped to [0, 2π).
pub fn greenwich_mean_sidereal_time(jd_ut1: f64, jd_tt: f64) -> f64 {
    let t = (jd_tt - J2000_JD) / 36_525.0;
    let polynomial_arcsec = 0.014506
        + t * (4612.156534
            + t * (1.3915817 + t * (-0.00000044 + t * (-0.000029956 + t * (-0.0000000368)))));
    (earth_rotation_angle(jd_ut1) + polynomial_arcsec * ARCSEC_TO_RAD).rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_era_j2000() {
        let era = earth_rotation_angle(J2000_JD).to_degrees();
        assert!((era - 280.460_618_375).abs() < 1e-6, "ERA at J2000: {}", era);
    }

    #[test]
    fn test_gmst_j2000_hours() {
        let gmst = greenwich_mean_sidereal_time(J2000_JD, J2000_JD);
        let hours = gmst.to_degrees() / 15.0;
        assert!(hours > 18.69 && hours < 18.70, "GMST at J2000: {}", hours);
    }

    #[test]
    fn test_sidereal_day_shorter_than_solar() {
        let a = greenwich_mean_sidereal_time(J2000_JD, J2000_JD);
        let b = greenwich_mean_sidereal_time(J2000_JD + 1.0, J2000_JD + 1.0);
        // One solar day advances sidereal time by ~3m56s (~0.9856 deg)
        let advance = (b - a).rem_euclid(TAU).to_degrees();
        assert!((advance - 0.9856).abs() < 1e-3, "advance: {}", advance);
    }

    #[test]
    fn test_range() {
        for i in 0..100 {
            let jd = J2000_JD + i as f64 * 37.3;
            let gmst = greenwich_mean_sidereal_time(jd, jd);
            assert!((0.0..TAU).contains(&gmst));
        }
    }
}
