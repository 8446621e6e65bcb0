//! Embedded city table used for timezone lookup and offline geocoding.
//!
//! One row per city: `name,region,timezone,latitude,longitude,elevation_m`.
//! Lines starting with `#` are comments.

use chrono_tz::Tz;
use once_cell::sync::OnceCell;

use super::{Geocoder, TimezoneLookup};
use crate::error::{ChartError, ChartResult};
use crate::models::Coordinates;

const EMBEDDED_CITIES: &str = include_str!("../../data/cities.csv");

static EMBEDDED: OnceCell<CityDatabase> = OnceCell::new();

#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub name: String,
    pub region: String,
    /// IANA timezone name, e.g. `Europe/London`
    pub timezone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation_m: f64,
}

impl City {
    pub fn coordinates(&self) -> ChartResult<Coordinates> {
        Coordinates::new(self.latitude, self.longitude, Some(self.elevation_m))
    }

    pub fn tz(&self) -> ChartResult<Tz> {
        self.timezone.parse::<Tz>().map_err(|e| {
            ChartError::Timezone(format!(
                "{} has unknown timezone '{}': {}",
                self.name, self.timezone, e
            ))
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CityDatabase {
    cities: Vec<City>,
}

impl CityDatabase {
    pub const SOURCE: &'static str = "city database";

    /// The table compiled into the binary, parsed on first use.
    pub fn embedded() -> ChartResult<&'static CityDatabase> {
        EMBEDDED.get_or_try_init(|| Self::from_csv(EMBEDDED_CITIES))
    }

    pub fn from_csv(text: &str) -> ChartResult<Self> {
        let mut cities = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let city = parse_row(line).map_err(|reason| {
                ChartError::Configuration(format!("City table line {}: {}", index + 1, reason))
            })?;
            cities.push(city);
        }
        Ok(Self { cities })
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Case-insensitive lookup by `"City"` or `"City, Region"`.
    pub fn lookup(&self, query: &str) -> ChartResult<&City> {
        let (name, region) = match query.split_once(',') {
            Some((name, region)) => (name.trim(), Some(region.trim())),
            None => (query.trim(), None),
        };
        self.cities
            .iter()
            .find(|c| {
                c.name.eq_ignore_ascii_case(name)
                    && region.map_or(true, |r| c.region.eq_ignore_ascii_case(r))
            })
            .ok_or_else(|| ChartError::not_found(query.trim(), Self::SOURCE))
    }
}

impl TimezoneLookup for CityDatabase {
    fn timezone(&self, place: &str) -> ChartResult<Tz> {
        self.lookup(place)?.tz()
    }
}

impl Geocoder for CityDatabase {
    fn geocode(&self, place: &str) -> ChartResult<Coordinates> {
        self.lookup(place)?.coordinates()
    }
}

fn parse_row(line: &str) -> Result<City, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [name, region, timezone, lat, lon, elevation] = fields.as_slice() else {
        return Err(format!("expected 6 fields, found {}", fields.len()));
    };
    let number = |field: &str, label: &str| -> Result<f64, String> {
        field
            .parse()
            .map_err(|_| format!("invalid {} '{}'", label, field))
    };
    Ok(City {
        name: name.to_string(),
        region: region.to_string(),
        timezone: timezone.to_string(),
        latitude: number(*lat, "latitude")?,
        longitude: number(*lon, "longitude")?,
        elevation_m: number(*elevation, "elevation")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_table_parses() {
        let db = CityDatabase::embedded().unwrap();
        assert!(db.len() > 300);
        // Every embedded timezone must be known to chrono-tz
        for city in &db.cities {
            assert!(city.tz().is_ok(), "{} -> {}", city.name, city.timezone);
            assert!(city.coordinates().is_ok(), "{}", city.name);
        }
    }

    #[test]
    fn test_london_timezone() {
        let db = CityDatabase::embedded().unwrap();
        assert_eq!(db.timezone("London").unwrap(), chrono_tz::Europe::London);
    }

    #[test]
    fn test_world_capitals() {
        let db = CityDatabase::embedded().unwrap();
        let cases = [
            ("Montevideo", chrono_tz::America::Montevideo),
            ("Hanoi", chrono_tz::Asia::Ho_Chi_Minh),
            ("Islamabad", chrono_tz::Asia::Karachi),
            ("Kampala", chrono_tz::Africa::Kampala),
            ("Algiers", chrono_tz::Africa::Algiers),
            ("Tunis", chrono_tz::Africa::Tunis),
            ("Doha", chrono_tz::Asia::Qatar),
            ("Caracas", chrono_tz::America::Caracas),
            ("Quito", chrono_tz::America::Guayaquil),
            ("La Paz", chrono_tz::America::La_Paz),
        ];
        for (city, tz) in cases {
            assert_eq!(db.timezone(city).unwrap(), tz, "{}", city);
        }
    }

    #[test]
    fn test_uk_and_us_cities() {
        let db = CityDatabase::embedded().unwrap();
        assert_eq!(db.timezone("York").unwrap(), chrono_tz::Europe::London);
        assert_eq!(db.timezone("Inverness").unwrap(), chrono_tz::Europe::London);
        assert_eq!(db.timezone("Phoenix").unwrap(), chrono_tz::America::Phoenix);
        assert_eq!(db.timezone("Houston").unwrap(), chrono_tz::America::Chicago);
    }

    #[test]
    fn test_shared_name_prefers_first_row() {
        let db = CityDatabase::embedded().unwrap();
        assert_eq!(db.lookup("Birmingham").unwrap().region, "England");
        assert_eq!(
            db.timezone("Birmingham, USA").unwrap(),
            chrono_tz::America::Chicago
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let db = CityDatabase::embedded().unwrap();
        assert_eq!(db.lookup("lONDON").unwrap().name, "London");
        assert_eq!(db.lookup("  new york ").unwrap().timezone, "America/New_York");
    }

    #[test]
    fn test_lookup_with_region() {
        let db = CityDatabase::from_csv(
            "Perth,Australia,Australia/Perth,-31.95,115.86,25\n\
             Perth,Scotland,Europe/London,56.4,-3.43,30\n",
        )
        .unwrap();
        assert_eq!(db.lookup("Perth").unwrap().region, "Australia");
        assert_eq!(db.lookup("perth, scotland").unwrap().timezone, "Europe/London");
        assert!(db.lookup("Perth, Canada").is_err());
    }

    #[test]
    fn test_unknown_city() {
        let db = CityDatabase::embedded().unwrap();
        match db.timezone("Atlantis") {
            Err(ChartError::LocationNotFound { place, source_name }) => {
                assert_eq!(place, "Atlantis");
                assert_eq!(source_name, CityDatabase::SOURCE);
            }
            other => panic!("Expected LocationNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_timezone_name() {
        let db = CityDatabase::from_csv("Nowhere,Void,Mars/Olympus,0,0,0").unwrap();
        assert!(matches!(db.timezone("Nowhere"), Err(ChartError::Timezone(_))));
    }

    #[test]
    fn test_malformed_row() {
        let result = CityDatabase::from_csv("# header\nLondon,England,Europe/London,north,0,0");
        match result {
            Err(ChartError::Configuration(msg)) => {
                assert!(msg.contains("line 2"));
                assert!(msg.contains("latitude"));
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_offline_geocode() {
        let db = CityDatabase::embedded().unwrap();
        let coords = db.geocode("Tokyo").unwrap();
        assert!((coords.latitude - 35.68).abs() < 0.01);
        assert!((coords.longitude - 139.77).abs() < 0.01);
        assert_eq!(coords.elevation_m, Some(40.0));
    }
}
