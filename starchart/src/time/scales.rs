//! UTC, TT, TDB and UT1 for a single instant.
//!
//! UT1 is approximated by UTC (|DUT1| < 0.9 s), which moves the zenith by at
//! most ~13 arcseconds.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::ModifiedJulianDate;

/// TT - TAI in seconds.
pub const TT_MINUS_TAI: f64 = 32.184;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// TAI - UTC steps as (MJD at which the step takes effect, seconds).
const LEAP_SECONDS: &[(f64, f64)] = &[
    (41317.0, 10.0), // 1972-01-01
    (41499.0, 11.0), // 1972-07-01
    (41683.0, 12.0), // 1973-01-01
    (42048.0, 13.0), // 1974-01-01
    (42413.0, 14.0), // 1975-01-01
    (42778.0, 15.0), // 1976-01-01
    (43144.0, 16.0), // 1977-01-01
    (43509.0, 17.0), // 1978-01-01
    (43874.0, 18.0), // 1979-01-01
    (44239.0, 19.0), // 1980-01-01
    (44786.0, 20.0), // 1981-07-01
    (45151.0, 21.0), // 1982-07-01
    (45516.0, 22.0), // 1983-07-01
    (46247.0, 23.0), // 1985-07-01
    (47161.0, 24.0), // 1988-01-01
    (47892.0, 25.0), // 1990-01-01
    (48257.0, 26.0), // 1991-01-01
    (48804.0, 27.0), // 1992-07-01
    (49169.0, 28.0), // 1993-07-01
    (49534.0, 29.0), // 1994-07-01
    (50083.0, 30.0), // 1996-01-01
    (50630.0, 31.0), // 1997-07-01
    (51179.0, 32.0), // 1999-01-01
    (53736.0, 33.0), // 2006-01-01
    (54832.0, 34.0), // 2009-01-01
    (56109.0, 35.0), // 2012-07-01
    (57204.0, 36.0), // 2015-07-01
    (57754.0, 37.0), // 2017-01-01
];

/// TAI - UTC in seconds at the given UTC MJD.
///
/// Dates before 1972 use the initial 10 s offset.
pub fn tai_minus_utc(mjd_utc: f64) -> f64 {
    LEAP_SECONDS
        .iter()
        .rev()
        .find(|(start, _)| mjd_utc >= *start)
        .map(|(_, offset)| *offset)
        .unwrap_or(LEAP_SECONDS[0].1)
}

/// TDB - TT in seconds (periodic term, amplitude ~1.7 ms).
pub fn tdb_minus_tt(jd_tt: f64) -> f64 {
    let g = (357.53 + 0.985_600_28 * (jd_tt - crate::models::J2000_JD)).to_radians();
    0.001_657 * g.sin() + 0.000_013_85 * (2.0 * g).sin()
}

/// One instant expressed on the scales the pipeline needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AstroTime {
    pub utc: DateTime<Utc>,
    pub mjd_utc: ModifiedJulianDate,
    /// Julian Date, Terrestrial Time
    pub jd_tt: f64,
    /// Julian Date, Barycentric Dynamical Time (ephemeris argument)
    pub jd_tdb: f64,
    /// Julian Date, UT1 (approximated by UTC)
    pub jd_ut1: f64,
}

impl AstroTime {
    pub fn from_utc(utc: DateTime<Utc>) -> Self {
        let mjd_utc = ModifiedJulianDate::from_datetime(utc);
        let jd_utc = mjd_utc.to_julian_date();
        let tt_offset = tai_minus_utc(mjd_utc.value()) + TT_MINUS_TAI;
        let jd_tt = jd_utc + tt_offset / SECONDS_PER_DAY;
        let jd_tdb = jd_tt + tdb_minus_tt(jd_tt) / SECONDS_PER_DAY;
        Self {
            utc,
            mjd_utc,
            jd_tt,
            jd_tdb,
            jd_ut1: jd_utc,
        }
    }

    /// Julian centuries of TT since J2000.0.
    pub fn centuries_tt(&self) -> f64 {
        (self.jd_tt - crate::models::J2000_JD) / 36_525.0
    }

    /// Julian years of TT since the given Julian epoch year (e.g. 1991.25).
    pub fn years_since_epoch(&self, epoch_year: f64) -> f64 {
        let epoch_jd = crate::models::J2000_JD + (epoch_year - 2000.0) * 365.25;
        (self.jd_tt - epoch_jd) / 365.25
    }
}
