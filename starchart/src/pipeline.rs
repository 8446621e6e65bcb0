//! One chart, start to finish (short of drawing it).
//!
//! [`SkyData`] is loaded once and only read afterwards. [`generate_chart`]
//! resolves the place and hands over to [`compute_chart`], which needs no
//! network access.

use serde::Serialize;
use std::path::Path;

use crate::catalog::{filter_by_magnitude, load_hipparcos, DEFAULT_MAGNITUDE_LIMIT};
use crate::ephemeris::{Ephemeris, SpkEphemeris};
use crate::error::{ChartError, ChartResult};
use crate::io::DataFile;
use crate::location::{Geocoder, LocationResolver, TimezoneLookup};
use crate::models::{Location, ProjectedStar, StarRecord};
use crate::projection::{
    observe, observer_zenith, project_stars, ObserveOptions, StereographicProjection, Zenith,
};
use crate::time::ObservationTime;

/// Everything that varies between charts.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub place: String,
    /// Local wall-clock time, `DD-MM-YYYY HH:MM`
    pub local_time: String,
    pub magnitude_limit: f64,
    pub observe: ObserveOptions,
}

impl ChartRequest {
    pub fn new(place: impl Into<String>, local_time: impl Into<String>) -> Self {
        Self {
            place: place.into(),
            local_time: local_time.into(),
            magnitude_limit: DEFAULT_MAGNITUDE_LIMIT,
            observe: ObserveOptions::default(),
        }
    }

    pub fn with_magnitude_limit(mut self, limit: f64) -> Self {
        self.magnitude_limit = limit;
        self
    }

    pub fn with_observe_options(mut self, observe: ObserveOptions) -> Self {
        self.observe = observe;
        self
    }
}

/// Ephemeris and star catalogue, shared by every chart of a run.
pub struct SkyData {
    pub ephemeris: Box<dyn Ephemeris>,
    pub stars: Vec<StarRecord>,
}

impl SkyData {
    pub fn new(ephemeris: Box<dyn Ephemeris>, stars: Vec<StarRecord>) -> Self {
        Self { ephemeris, stars }
    }

    /// Open the SPK ephemeris and parse the Hipparcos catalogue, fetching
    /// either file first if it is missing.
    pub fn load(ephemeris: &DataFile, catalog: &DataFile) -> ChartResult<Self> {
        let ephemeris = SpkEphemeris::open(ephemeris.ensure()?)?;
        let stars = load_hipparcos(&catalog.ensure()?)?;
        Ok(Self::new(Box::new(ephemeris), stars))
    }
}

/// The computed chart, ready to be drawn.
#[derive(Debug, Clone, Serialize)]
pub struct StarChart {
    pub location: Location,
    pub time: ObservationTime,
    pub zenith: Zenith,
    pub magnitude_limit: f64,
    /// Stars with `magnitude <= magnitude_limit`, in catalogue order
    pub stars: Vec<ProjectedStar>,
}

impl StarChart {
    /// Stars that land inside the [-1, 1]² window.
    pub fn visible_count(&self) -> usize {
        self.stars.iter().filter(|s| s.in_view()).count()
    }

    pub fn write_json(&self, path: &Path) -> ChartResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::Render(format!("Failed to serialize chart: {}", e)))?;
        std::fs::write(path, json)?;
        log::info!("Chart data written to {}", path.display());
        Ok(())
    }
}

/// Resolve `request.place`, then compute the chart.
pub fn generate_chart<G: Geocoder, T: TimezoneLookup>(
    request: &ChartRequest,
    resolver: &LocationResolver<G, T>,
    sky: &SkyData,
) -> ChartResult<StarChart> {
    let location = resolver.resolve(&request.place)?;
    compute_chart(request, location, sky)
}

/// Chart for an already resolved location.
pub fn compute_chart(
    request: &ChartRequest,
    location: Location,
    sky: &SkyData,
) -> ChartResult<StarChart> {
    let time = ObservationTime::parse(&request.local_time, location.timezone)?;
    let zenith = observer_zenith(&location, &time.astro);
    let earth = sky.ephemeris.earth_barycentric_au(time.astro.jd_tdb)?;

    // The centre goes through the same observation path as the stars
    let zenith_star = StarRecord::new(zenith.ra.value() * 15.0, zenith.dec.value(), 0.0);
    let center = observe(&zenith_star, &earth, &time.astro, ObserveOptions::default());
    let projection = StereographicProjection::new(center)?;

    let selected = filter_by_magnitude(&sky.stars, request.magnitude_limit);
    let stars = project_stars(&selected, &projection, &earth, &time.astro, request.observe);
    log::info!(
        "{} of {} stars at magnitude <= {} for {} at {} UTC",
        stars.len(),
        sky.stars.len(),
        request.magnitude_limit,
        location.name,
        time.utc.format("%Y-%m-%d %H:%M")
    );

    Ok(StarChart {
        location,
        time,
        zenith,
        magnitude_limit: request.magnitude_limit,
        stars,
    })
}
