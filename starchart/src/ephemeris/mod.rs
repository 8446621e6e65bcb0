//! Planetary ephemeris access.
//!
//! The chart only needs one thing from an ephemeris: where the Earth is
//! relative to the solar system barycentre, so star positions can be
//! corrected for parallax. [`SpkEphemeris`] reads it from a JPL kernel
//! (de421.bsp); [`FixedEphemeris`] pins it to a constant for tests and
//! offline runs.

mod chebyshev;
mod daf;
mod spk;

use std::path::Path;

pub use daf::{DafFile, DafSummary};
pub use spk::{SpkFile, SpkSegment};

use crate::error::ChartResult;

/// Kilometres per astronomical unit (IAU 2012).
pub const AU_KM: f64 = 149_597_870.7;

/// NAIF body codes used by the chart.
pub mod bodies {
    pub const SOLAR_SYSTEM_BARYCENTER: i32 = 0;
    pub const EARTH_MOON_BARYCENTER: i32 = 3;
    pub const EARTH: i32 = 399;
}

#[derive(Debug, thiserror::Error)]
pub enum SpkError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("No segment for target {target} wrt {center} at JD {jd}")]
    SegmentNotFound { target: i32, center: i32, jd: f64 },
}

/// Source of the Earth's barycentric position.
pub trait Ephemeris: Send + Sync {
    /// Earth relative to the solar system barycentre, in AU on ICRF axes.
    fn earth_barycentric_au(&self, jd_tdb: f64) -> ChartResult<[f64; 3]>;
}

/// JPL SPK-backed ephemeris.
pub struct SpkEphemeris {
    file: SpkFile,
}

impl SpkEphemeris {
    pub fn open<P: AsRef<Path>>(path: P) -> ChartResult<Self> {
        let file = SpkFile::open(path.as_ref())?;
        log::info!(
            "Loaded ephemeris {} ({} segments)",
            path.as_ref().display(),
            file.segments().len()
        );
        Ok(Self { file })
    }
}

impl Ephemeris for SpkEphemeris {
    fn earth_barycentric_au(&self, jd_tdb: f64) -> ChartResult<[f64; 3]> {
        let emb = self.file.position(
            bodies::EARTH_MOON_BARYCENTER,
            bodies::SOLAR_SYSTEM_BARYCENTER,
            jd_tdb,
        )?;
        let earth = self
            .file
            .position(bodies::EARTH, bodies::EARTH_MOON_BARYCENTER, jd_tdb)?;
        Ok([
            (emb[0] + earth[0]) / AU_KM,
            (emb[1] + earth[1]) / AU_KM,
            (emb[2] + earth[2]) / AU_KM,
        ])
    }
}

/// Constant Earth position, independent of the epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedEphemeris {
    pub earth_au: [f64; 3],
}

impl FixedEphemeris {
    pub fn new(earth_au: [f64; 3]) -> Self {
        Self { earth_au }
    }

    /// Earth at the barycentre; stars are observed from the origin.
    pub fn origin() -> Self {
        Self::default()
    }
}

impl Ephemeris for FixedEphemeris {
    fn earth_barycentric_au(&self, _jd_tdb: f64) -> ChartResult<[f64; 3]> {
        Ok(self.earth_au)
    }
}

#[cfg(test)]
pub(crate) use spk::test_support;
