//! Star chart binary
//!
//! Reads `starchart.toml` (or the built-in defaults), makes sure the
//! ephemeris and the Hipparcos catalogue are on disk, computes the chart and
//! writes the image.
//!
//! # Usage
//!
//! ```bash
//! # London, 20-08-2025 01:00, written to star_chart.svg
//! cargo run --bin starchart
//!
//! # Another place and time, as PNG
//! STARCHART_PLACE="Sydney" STARCHART_TIME="24-12-2025 23:30" \
//!   STARCHART_OUTPUT=sydney.png cargo run --bin starchart
//! ```
//!
//! # Environment Variables
//!
//! - `STARCHART_CONFIG`: Path to the configuration file
//! - `STARCHART_PLACE`: Place name (default: London)
//! - `STARCHART_TIME`: Local time, `DD-MM-YYYY HH:MM` (default: 20-08-2025 01:00)
//! - `STARCHART_OUTPUT`: Image path, `.svg` or `.png` (default: star_chart.svg)
//! - `RUST_LOG`: Log filter, e.g. `debug` or `starchart=debug` (default: info)

use std::env;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use starchart::config::ChartConfig;
use starchart::location::{create_geocoder, CityDatabase, LocationResolver};
use starchart::pipeline::{generate_chart, SkyData};
use starchart::render::render_chart;

fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(log_filter(env::var("RUST_LOG").ok().as_deref()))
        .with_target(true)
        .init();

    let config = ChartConfig::load().context("Failed to load configuration")?;
    let request = config.request();
    info!(
        "Charting '{}' at {} (magnitude <= {})",
        request.place, request.local_time, request.magnitude_limit
    );

    let sky = SkyData::load(&config.ephemeris_file(), &config.catalog_file())
        .context("Failed to load ephemeris and star catalogue")?;

    let geocoder = create_geocoder(
        config.geocoder_kind()?,
        &config.geocoder.endpoint,
        &config.geocoder.user_agent,
    )?;
    let resolver = LocationResolver::new(geocoder, CityDatabase::embedded()?);

    let chart = generate_chart(&request, &resolver, &sky)
        .with_context(|| format!("Failed to compute chart for '{}'", request.place))?;
    info!(
        "Zenith at RA {:.3}h, Dec {:+.3}°; {} stars, {} inside the frame",
        chart.zenith.ra.value(),
        chart.zenith.dec.value(),
        chart.stars.len(),
        chart.visible_count()
    );

    render_chart(&chart, &config.render_options(), &config.render.output)
        .with_context(|| format!("Failed to write {}", config.render.output.display()))?;
    if let Some(json_path) = &config.render.json_path {
        chart.write_json(json_path)?;
    }

    info!("Chart ready: {}", config.render.output.display());
    Ok(())
}

/// Filter from a `RUST_LOG` value; unset, blank or malformed falls back to info.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives.filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_default() {
        assert_eq!(log_filter(None).to_string(), "info");
    }

    #[test]
    fn test_log_filter_per_target() {
        assert_eq!(
            log_filter(Some("starchart=debug")).to_string(),
            "starchart=debug"
        );
    }

    #[test]
    fn test_log_filter_blank_falls_back() {
        assert_eq!(log_filter(Some("  ")).to_string(), "info");
    }
}
