//! Chart configuration file support.
//!
//! Settings live in `starchart.toml`. Every section and field is optional;
//! missing values fall back to the defaults below, which draw London on
//! 20-08-2025 at 01:00 local time.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::catalog::hipparcos::HIPPARCOS_URL;
use crate::catalog::DEFAULT_MAGNITUDE_LIMIT;
use crate::error::{ChartError, ChartResult};
use crate::io::DataFile;
use crate::location::nominatim::{DEFAULT_ENDPOINT, DEFAULT_USER_AGENT};
use crate::location::GeocoderKind;
use crate::pipeline::ChartRequest;
use crate::projection::ObserveOptions;
use crate::render::RenderOptions;

pub const CONFIG_FILE_NAME: &str = "starchart.toml";
pub const CONFIG_PATH_ENV: &str = "STARCHART_CONFIG";
pub const PLACE_ENV: &str = "STARCHART_PLACE";
pub const TIME_ENV: &str = "STARCHART_TIME";
pub const OUTPUT_ENV: &str = "STARCHART_OUTPUT";

pub const DE421_URL: &str =
    "https://naif.jpl.nasa.gov/pub/naif/generic_kernels/spk/planets/a_old_versions/de421.bsp";

/// Chart configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub chart: ChartSettings,
    #[serde(default)]
    pub geocoder: GeocoderSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub projection: ObserveOptions,
}

/// What to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    #[serde(default = "default_place")]
    pub place: String,
    /// Local wall-clock time, `DD-MM-YYYY HH:MM`
    #[serde(default = "default_time")]
    pub time: String,
    #[serde(default = "default_magnitude_limit")]
    pub magnitude_limit: f64,
}

/// Geocoder backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocoderSettings {
    #[serde(default = "default_geocoder_kind")]
    pub kind: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Where the ephemeris and the catalogue are kept and fetched from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_ephemeris_file")]
    pub ephemeris_file: String,
    #[serde(default = "default_ephemeris_url")]
    pub ephemeris_url: String,
    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,
}

/// Image output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    #[serde(default = "default_chart_size")]
    pub chart_size: f64,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    #[serde(default = "default_star_size_max")]
    pub star_size_max: f64,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Optional JSON dump of the computed chart
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_path: Option<PathBuf>,
}

fn default_place() -> String {
    "London".to_string()
}

fn default_time() -> String {
    "20-08-2025 01:00".to_string()
}

fn default_magnitude_limit() -> f64 {
    DEFAULT_MAGNITUDE_LIMIT
}

fn default_geocoder_kind() -> String {
    GeocoderKind::Nominatim.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_ephemeris_file() -> String {
    "de421.bsp".to_string()
}

fn default_ephemeris_url() -> String {
    DE421_URL.to_string()
}

fn default_catalog_file() -> String {
    "hip_main.dat".to_string()
}

fn default_catalog_url() -> String {
    HIPPARCOS_URL.to_string()
}

fn default_chart_size() -> f64 {
    10.0
}

fn default_dpi() -> u32 {
    100
}

fn default_star_size_max() -> f64 {
    100.0
}

fn default_output() -> PathBuf {
    PathBuf::from("star_chart.svg")
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            place: default_place(),
            time: default_time(),
            magnitude_limit: default_magnitude_limit(),
        }
    }
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            kind: default_geocoder_kind(),
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            ephemeris_file: default_ephemeris_file(),
            ephemeris_url: default_ephemeris_url(),
            catalog_file: default_catalog_file(),
            catalog_url: default_catalog_url(),
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            chart_size: default_chart_size(),
            dpi: default_dpi(),
            star_size_max: default_star_size_max(),
            output: default_output(),
            json_path: None,
        }
    }
}

impl ChartConfig {
    /// Load chart configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ChartResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ChartError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> ChartResult<Self> {
        let config: ChartConfig = toml::from_str(content).map_err(|e| {
            ChartError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load chart configuration from the default location.
    ///
    /// Uses `STARCHART_CONFIG` when set, otherwise searches for
    /// `starchart.toml` in the current directory and its parent.
    ///
    /// # Returns
    /// * `Ok(Some(ChartConfig))` if a file was found and parsed
    /// * `Ok(None)` if no file exists in the standard locations
    /// * `Err(ChartError)` if `STARCHART_CONFIG` points nowhere or a parse error
    pub fn from_default_location() -> ChartResult<Option<Self>> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Self::from_file(&path).map(Some);
        }

        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];
        for path in search_paths {
            if path.exists() {
                log::info!("Using configuration {}", path.display());
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// The default-location file if there is one, built-in defaults otherwise,
    /// then environment overrides.
    pub fn load() -> ChartResult<Self> {
        let mut config = match Self::from_default_location()? {
            Some(config) => config,
            None => {
                log::info!("No {} found, using defaults", CONFIG_FILE_NAME);
                Self::default()
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Replace place, time and output path with values from `lookup`
    /// (normally the process environment).
    pub fn apply_overrides<F: Fn(&str) -> Option<String>>(&mut self, lookup: F) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(place) = non_empty(PLACE_ENV) {
            self.chart.place = place;
        }
        if let Some(time) = non_empty(TIME_ENV) {
            self.chart.time = time;
        }
        if let Some(output) = non_empty(OUTPUT_ENV) {
            self.render.output = PathBuf::from(output);
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.geocoder_kind()?;
        if self.chart.place.trim().is_empty() {
            return Err(ChartError::Configuration("'chart.place' must not be empty".into()));
        }
        if !self.chart.magnitude_limit.is_finite() {
            return Err(ChartError::Configuration(
                "'chart.magnitude_limit' must be a number".into(),
            ));
        }
        if !(self.render.chart_size > 0.0) || self.render.dpi == 0 {
            return Err(ChartError::Configuration(
                "'render.chart_size' and 'render.dpi' must be positive".into(),
            ));
        }
        if !(self.render.star_size_max > 0.0) {
            return Err(ChartError::Configuration(
                "'render.star_size_max' must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Get the geocoder backend from configuration.
    pub fn geocoder_kind(&self) -> ChartResult<GeocoderKind> {
        GeocoderKind::from_str(&self.geocoder.kind)
    }

    pub fn request(&self) -> ChartRequest {
        ChartRequest {
            place: self.chart.place.clone(),
            local_time: self.chart.time.clone(),
            magnitude_limit: self.chart.magnitude_limit,
            observe: self.projection,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            chart_size: self.render.chart_size,
            dpi: self.render.dpi,
            star_size_max: self.render.star_size_max,
        }
    }

    pub fn ephemeris_file(&self) -> DataFile {
        DataFile::new(
            self.data.dir.join(&self.data.ephemeris_file),
            &self.data.ephemeris_url,
            "JPL ephemeris",
        )
    }

    pub fn catalog_file(&self) -> DataFile {
        DataFile::new(
            self.data.dir.join(&self.data.catalog_file),
            &self.data.catalog_url,
            "Hipparcos catalogue",
        )
    }
}
