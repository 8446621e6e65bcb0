//! OpenStreetMap Nominatim geocoder.

use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

use super::Geocoder;
use crate::error::{ChartError, ChartResult};
use crate::models::Coordinates;

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "myGeocoder";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One entry of the `/search?format=json` response. Coordinates arrive as
/// decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl NominatimPlace {
    pub fn coordinates(&self) -> ChartResult<Coordinates> {
        let parse = |value: &str, label: &str| -> ChartResult<f64> {
            value.trim().parse().map_err(|_| {
                ChartError::InvalidLocation(format!("Geocoder returned {} '{}'", label, value))
            })
        };
        Coordinates::new(parse(&self.lat, "latitude")?, parse(&self.lon, "longitude")?, None)
    }
}

pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
}

impl NominatimGeocoder {
    pub const SOURCE: &'static str = "geocoder";

    pub fn new(endpoint: impl Into<String>, user_agent: &str) -> ChartResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn search_url(&self) -> String {
        format!("{}/search", self.endpoint.trim_end_matches('/'))
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, place: &str) -> ChartResult<Coordinates> {
        log::debug!("Geocoding '{}' via {}", place, self.endpoint);
        let places: Vec<NominatimPlace> = self
            .client
            .get(self.search_url())
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .send()?
            .error_for_status()?
            .json()?;
        first_match(place, &places)
    }
}

/// Coordinates of the best (first) match.
pub fn first_match(place: &str, places: &[NominatimPlace]) -> ChartResult<Coordinates> {
    let best = places
        .first()
        .ok_or_else(|| ChartError::not_found(place, NominatimGeocoder::SOURCE))?;
    if let Some(name) = &best.display_name {
        log::info!("Geocoded '{}' to {}", place, name);
    }
    best.coordinates()
}
