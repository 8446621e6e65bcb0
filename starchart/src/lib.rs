//! Stereographic star charts.
//!
//! Given a place name and a local wall-clock time, the crate finds the
//! observer's zenith on the sky, projects the Hipparcos stars down to a
//! magnitude limit onto a disk centred there and draws the result.
//!
//! ```no_run
//! use starchart::location::{CityDatabase, LocationResolver};
//! use starchart::pipeline::{generate_chart, ChartRequest, SkyData};
//! use starchart::render::{render_chart, RenderOptions};
//! use starchart::config::ChartConfig;
//! use std::path::Path;
//!
//! # fn main() -> starchart::ChartResult<()> {
//! let config = ChartConfig::default();
//! let sky = SkyData::load(&config.ephemeris_file(), &config.catalog_file())?;
//! let cities = CityDatabase::embedded()?;
//! let resolver = LocationResolver::new(cities, cities);
//!
//! let request = ChartRequest::new("London", "20-08-2025 01:00");
//! let chart = generate_chart(&request, &resolver, &sky)?;
//! render_chart(&chart, &RenderOptions::default(), Path::new("london.svg"))?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod io;
pub mod location;
pub mod models;
pub mod pipeline;
pub mod projection;
pub mod render;
pub mod time;

pub use error::{ChartError, ChartResult};
pub use pipeline::{compute_chart, generate_chart, ChartRequest, SkyData, StarChart};
