//! Place name to observing site.
//!
//! Coordinates and timezone are two independent lookups of the same name: a
//! [`Geocoder`] for latitude/longitude and a [`TimezoneLookup`] for the IANA
//! zone. Their answers are not cross-checked.

pub mod cities;
pub mod nominatim;

use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

use crate::error::{ChartError, ChartResult};
use crate::models::{Coordinates, Location};

pub use cities::{City, CityDatabase};
pub use nominatim::{NominatimGeocoder, NominatimPlace};

/// Place name to coordinates.
pub trait Geocoder {
    fn geocode(&self, place: &str) -> ChartResult<Coordinates>;
}

/// Place name to timezone.
pub trait TimezoneLookup {
    fn timezone(&self, place: &str) -> ChartResult<Tz>;
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn geocode(&self, place: &str) -> ChartResult<Coordinates> {
        (**self).geocode(place)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, place: &str) -> ChartResult<Coordinates> {
        (**self).geocode(place)
    }
}

impl<T: TimezoneLookup + ?Sized> TimezoneLookup for &T {
    fn timezone(&self, place: &str) -> ChartResult<Tz> {
        (**self).timezone(place)
    }
}

/// Geocoder backend selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeocoderKind {
    /// OpenStreetMap Nominatim over HTTP
    #[default]
    Nominatim,
    /// Coordinates from the embedded city table
    Offline,
}

impl FromStr for GeocoderKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nominatim" | "osm" => Ok(Self::Nominatim),
            "offline" | "cities" => Ok(Self::Offline),
            _ => Err(ChartError::Configuration(format!(
                "Unknown geocoder: {}. Use 'nominatim' or 'offline'",
                s
            ))),
        }
    }
}

impl fmt::Display for GeocoderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nominatim => write!(f, "nominatim"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// Build the geocoder for `kind`. The endpoint and user agent only apply to
/// Nominatim.
pub fn create_geocoder(
    kind: GeocoderKind,
    endpoint: &str,
    user_agent: &str,
) -> ChartResult<Box<dyn Geocoder>> {
    match kind {
        GeocoderKind::Nominatim => Ok(Box::new(NominatimGeocoder::new(endpoint, user_agent)?)),
        GeocoderKind::Offline => Ok(Box::new(CityDatabase::embedded()?.clone())),
    }
}

/// Combines a geocoder and a timezone source into [`Location`]s.
pub struct LocationResolver<G, T> {
    geocoder: G,
    timezones: T,
}

impl<G: Geocoder, T: TimezoneLookup> LocationResolver<G, T> {
    pub fn new(geocoder: G, timezones: T) -> Self {
        Self {
            geocoder,
            timezones,
        }
    }

    pub fn resolve(&self, place: &str) -> ChartResult<Location> {
        let coordinates = self.geocoder.geocode(place)?;
        let timezone = self.timezones.timezone(place)?;
        log::info!(
            "Resolved '{}' to lat {:.4}, lon {:.4} ({})",
            place,
            coordinates.latitude,
            coordinates.longitude,
            timezone.name()
        );
        Ok(Location::new(place.trim(), coordinates, timezone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct StubGeocoder {
        coordinates: Option<Coordinates>,
        calls: Cell<usize>,
    }

    impl Geocoder for StubGeocoder {
        fn geocode(&self, place: &str) -> ChartResult<Coordinates> {
            self.calls.set(self.calls.get() + 1);
            self.coordinates
                .ok_or_else(|| ChartError::not_found(place, "stub"))
        }
    }

    fn stub(lat: f64, lon: f64) -> StubGeocoder {
        StubGeocoder {
            coordinates: Some(Coordinates::new(lat, lon, None).unwrap()),
            calls: Cell::new(0),
        }
    }

    #[test]
    fn test_geocoder_kind_from_str() {
        assert_eq!("nominatim".parse::<GeocoderKind>().unwrap(), GeocoderKind::Nominatim);
        assert_eq!("OFFLINE".parse::<GeocoderKind>().unwrap(), GeocoderKind::Offline);
        assert!("google".parse::<GeocoderKind>().is_err());
        assert_eq!(GeocoderKind::Offline.to_string(), "offline");
    }

    #[test]
    fn test_resolve_combines_both_sources() {
        let db = CityDatabase::embedded().unwrap();
        let resolver = LocationResolver::new(stub(51.5074, -0.1278), db);
        let location = resolver.resolve("London").unwrap();
        assert_eq!(location.name, "London");
        assert_eq!(location.latitude(), 51.5074);
        assert_eq!(location.timezone, chrono_tz::Europe::London);
    }

    #[test]
    fn test_geocoder_failure_short_circuits() {
        let db = CityDatabase::embedded().unwrap();
        let geocoder = StubGeocoder {
            coordinates: None,
            calls: Cell::new(0),
        };
        let resolver = LocationResolver::new(&geocoder, db);
        let result = resolver.resolve("London");
        assert!(matches!(result, Err(ChartError::LocationNotFound { .. })));
        assert_eq!(geocoder.calls.get(), 1);
    }

    #[test]
    fn test_timezone_unknown_after_geocoding() {
        // The geocoder knows the place but the city table does not
        let db = CityDatabase::embedded().unwrap();
        let resolver = LocationResolver::new(stub(-77.85, 166.67), db);
        match resolver.resolve("McMurdo Station") {
            Err(ChartError::LocationNotFound { source_name, .. }) => {
                assert_eq!(source_name, CityDatabase::SOURCE)
            }
            other => panic!("Expected LocationNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_offline_resolver() {
        let geocoder = create_geocoder(GeocoderKind::Offline, "", "").unwrap();
        let resolver = LocationResolver::new(geocoder, CityDatabase::embedded().unwrap());
        let location = resolver.resolve("sydney").unwrap();
        assert!(location.latitude() < -33.0);
        assert_eq!(location.timezone_name(), "Australia/Sydney");
    }
}
