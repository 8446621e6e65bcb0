//! Hipparcos main catalogue (ESA 1997, CDS I/239 `hip_main.dat`).
//!
//! Records are `|`-separated. Only the fields the chart needs are read:
//!
//! | index | field  | unit                   |
//! |-------|--------|------------------------|
//! | 1     | HIP    |                        |
//! | 5     | Vmag   | mag                    |
//! | 8     | RAdeg  | deg, ICRS, J1991.25    |
//! | 9     | DEdeg  | deg, ICRS, J1991.25    |
//! | 11    | Plx    | mas                    |
//! | 12    | pmRA   | mas/yr (times cos Dec) |
//! | 13    | pmDE   | mas/yr                 |

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{ChartError, ChartResult};
use crate::models::StarRecord;

/// Catalogue epoch of the Hipparcos positions (Julian year).
pub const HIPPARCOS_EPOCH: f64 = 1991.25;

pub const HIPPARCOS_URL: &str = "https://cdsarc.cds.unistra.fr/ftp/cats/I/239/hip_main.dat";

const FIELD_HIP: usize = 1;
const FIELD_VMAG: usize = 5;
const FIELD_RA: usize = 8;
const FIELD_DEC: usize = 9;
const FIELD_PLX: usize = 11;
const FIELD_PM_RA: usize = 12;
const FIELD_PM_DEC: usize = 13;

/// Load the catalogue from disk; files ending in `.gz` are decompressed on
/// the fly.
pub fn load_hipparcos(path: &Path) -> ChartResult<Vec<StarRecord>> {
    let file = File::open(path)
        .map_err(|e| ChartError::Catalog(format!("Cannot open {}: {}", path.display(), e)))?;
    let stars = if path.extension().is_some_and(|ext| ext == "gz") {
        parse_hipparcos(BufReader::new(GzDecoder::new(file)))?
    } else {
        parse_hipparcos(BufReader::new(file))?
    };
    log::info!("Loaded {} stars from {}", stars.len(), path.display());
    Ok(stars)
}

/// Parse every record of a catalogue stream.
///
/// Records without a position or a magnitude are skipped. A record whose
/// fields are present but malformed aborts the load.
pub fn parse_hipparcos<R: BufRead>(reader: R) -> ChartResult<Vec<StarRecord>> {
    let mut stars = Vec::with_capacity(120_000);
    let mut skipped = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| ChartError::Catalog(format!("Read failed: {}", e)))?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_hipparcos_line(&line)
            .map_err(|reason| ChartError::Catalog(format!("line {}: {}", index + 1, reason)))?
        {
            Some(star) => stars.push(star),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::debug!("Skipped {} catalogue records without position or magnitude", skipped);
    }
    if stars.is_empty() {
        return Err(ChartError::Catalog("Catalogue contains no usable stars".into()));
    }
    Ok(stars)
}

/// Parse one record. `Ok(None)` means the record has no usable position or
/// magnitude.
pub fn parse_hipparcos_line(line: &str) -> Result<Option<StarRecord>, String> {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() <= FIELD_PM_DEC {
        return Err(format!(
            "expected at least {} fields, found {}",
            FIELD_PM_DEC + 1,
            fields.len()
        ));
    }

    let hip: u32 = fields[FIELD_HIP]
        .trim()
        .parse()
        .map_err(|_| format!("invalid HIP number '{}'", fields[FIELD_HIP].trim()))?;

    let (Some(ra), Some(dec), Some(magnitude)) = (
        optional_f64(fields[FIELD_RA], "RAdeg")?,
        optional_f64(fields[FIELD_DEC], "DEdeg")?,
        optional_f64(fields[FIELD_VMAG], "Vmag")?,
    ) else {
        return Ok(None);
    };

    // Right ascension must be in degrees; hours would silently squash the sky
    if !(0.0..360.0).contains(&ra) {
        return Err(format!("HIP {}: RA {} outside [0, 360) degrees", hip, ra));
    }
    if !(-90.0..=90.0).contains(&dec) {
        return Err(format!("HIP {}: Dec {} outside [-90, 90] degrees", hip, dec));
    }

    let mut star = StarRecord::new(ra, dec, magnitude).with_hip(hip);
    star.parallax_mas = optional_f64(fields[FIELD_PLX], "Plx")?;
    star.pm_ra_mas_per_year = optional_f64(fields[FIELD_PM_RA], "pmRA")?;
    star.pm_dec_mas_per_year = optional_f64(fields[FIELD_PM_DEC], "pmDE")?;
    Ok(Some(star))
}

fn optional_f64(field: &str, name: &str) -> Result<Option<f64>, String> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| format!("invalid {} '{}'", name, trimmed))
}
