//! SPK (Spacecraft and Planet Kernel) reader for type 2 Chebyshev segments,
//! the only segment type used by the JPL planetary ephemerides.

use std::path::Path;

use super::chebyshev;
use super::daf::{DafFile, DafSummary};
use super::SpkError;
use crate::models::J2000_JD;

const SECONDS_PER_DAY: f64 = 86_400.0;

fn seconds_past_j2000(jd_tdb: f64) -> f64 {
    (jd_tdb - J2000_JD) * SECONDS_PER_DAY
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpkSegment {
    pub target: i32,
    pub center: i32,
    pub frame: i32,
    pub data_type: i32,
    /// Coverage in TDB seconds past J2000
    pub start_seconds: f64,
    pub end_seconds: f64,
    /// 1-based word addresses of the segment data
    pub start_address: usize,
    pub end_address: usize,
}

impl SpkSegment {
    pub fn from_summary(summary: &DafSummary) -> Result<Self, SpkError> {
        if summary.doubles.len() < 2 || summary.ints.len() < 6 {
            return Err(SpkError::InvalidData("Incomplete SPK summary".into()));
        }
        Ok(Self {
            start_seconds: summary.doubles[0],
            end_seconds: summary.doubles[1],
            target: summary.ints[0],
            center: summary.ints[1],
            frame: summary.ints[2],
            data_type: summary.ints[3],
            start_address: summary.ints[4].max(0) as usize,
            end_address: summary.ints[5].max(0) as usize,
        })
    }

    pub fn covers(&self, jd_tdb: f64) -> bool {
        let t = seconds_past_j2000(jd_tdb);
        t >= self.start_seconds && t <= self.end_seconds
    }

    pub fn start_jd(&self) -> f64 {
        J2000_JD + self.start_seconds / SECONDS_PER_DAY
    }

    pub fn end_jd(&self) -> f64 {
        J2000_JD + self.end_seconds / SECONDS_PER_DAY
    }
}

/// Directory words stored at the end of every type 2 segment.
struct Type2Layout {
    init: f64,
    interval: f64,
    record_words: usize,
    records: usize,
}

pub struct SpkFile {
    daf: DafFile,
    segments: Vec<SpkSegment>,
}

impl SpkFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SpkError> {
        let daf = DafFile::open(path)?;
        let mut segments = Vec::new();
        for summary in daf.summaries()? {
            let segment = SpkSegment::from_summary(&summary)?;
            if segment.data_type == 2 {
                segments.push(segment);
            } else {
                log::debug!(
                    "Skipping SPK segment {} -> {} of type {}",
                    segment.target,
                    segment.center,
                    segment.data_type
                );
            }
        }
        Ok(Self { daf, segments })
    }

    pub fn segments(&self) -> &[SpkSegment] {
        &self.segments
    }

    fn find_segment(&self, target: i32, center: i32, jd_tdb: f64) -> Result<&SpkSegment, SpkError> {
        self.segments
            .iter()
            .find(|s| s.target == target && s.center == center && s.covers(jd_tdb))
            .ok_or(SpkError::SegmentNotFound {
                target,
                center,
                jd: jd_tdb,
            })
    }

    fn layout(&self, segment: &SpkSegment) -> Result<Type2Layout, SpkError> {
        if segment.end_address < 4 {
            return Err(SpkError::InvalidData("Segment too short".into()));
        }
        let words = self.daf.read_words(segment.end_address - 3, 4)?;
        let record_words = words[2] as usize;
        let records = words[3] as usize;
        if record_words < 5 || records == 0 || words[1] <= 0.0 {
            return Err(SpkError::InvalidData(format!(
                "Bad type 2 directory: rsize={} n={} intlen={}",
                words[2], words[3], words[1]
            )));
        }
        Ok(Type2Layout {
            init: words[0],
            interval: words[1],
            record_words,
            records,
        })
    }

    /// Position of `target` relative to `center` in km (ICRF axes).
    pub fn position(&self, target: i32, center: i32, jd_tdb: f64) -> Result<[f64; 3], SpkError> {
        let segment = self.find_segment(target, center, jd_tdb)?;
        let layout = self.layout(segment)?;

        let t = seconds_past_j2000(jd_tdb);
        let index = (((t - layout.init) / layout.interval).floor().max(0.0) as usize)
            .min(layout.records - 1);
        let record = self.daf.read_words(
            segment.start_address + index * layout.record_words,
            layout.record_words,
        )?;

        let (mid, radius) = (record[0], record[1]);
        let n = (layout.record_words - 2) / 3;
        chebyshev::evaluate_xyz(&record[2..], n, (t - mid) / radius)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::constant_spk;
    use super::*;
    use tempfile::TempDir;

    fn open(segments: &[(i32, i32, [f64; 3])]) -> (TempDir, SpkFile) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.bsp");
        std::fs::write(&path, constant_spk(segments)).unwrap();
        let spk = SpkFile::open(&path).unwrap();
        (dir, spk)
    }

    #[test]
    fn test_segment_coverage() {
        let segment = SpkSegment {
            target: 3,
            center: 0,
            frame: 1,
            data_type: 2,
            start_seconds: 0.0,
            end_seconds: 100.0 * SECONDS_PER_DAY,
            start_address: 1,
            end_address: 12,
        };
        assert!(segment.covers(J2000_JD));
        assert!(segment.covers(J2000_JD + 100.0));
        assert!(!segment.covers(J2000_JD - 0.1));
        assert!(!segment.covers(J2000_JD + 100.1));
        assert_eq!(segment.start_jd(), J2000_JD);
        assert_eq!(segment.end_jd(), J2000_JD + 100.0);
    }

    #[test]
    fn test_incomplete_summary() {
        let summary = DafSummary {
            doubles: vec![0.0],
            ints: vec![399, 3, 1, 2, 1, 12],
        };
        assert!(matches!(
            SpkSegment::from_summary(&summary),
            Err(SpkError::InvalidData(_))
        ));
    }

    #[test]
    fn test_reads_constant_segments() {
        let (_dir, spk) = open(&[(3, 0, [1.0e8, 2.0e7, 3.0e6]), (399, 3, [-4000.0, 0.0, 100.0])]);
        assert_eq!(spk.segments().len(), 2);

        let emb = spk.position(3, 0, J2000_JD + 9000.0).unwrap();
        assert!((emb[0] - 1.0e8).abs() < 1e-6);
        assert!((emb[1] - 2.0e7).abs() < 1e-6);
        assert!((emb[2] - 3.0e6).abs() < 1e-6);

        let earth = spk.position(399, 3, J2000_JD).unwrap();
        assert!((earth[0] + 4000.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_segment() {
        let (_dir, spk) = open(&[(3, 0, [1.0, 1.0, 1.0])]);
        match spk.position(301, 3, J2000_JD) {
            Err(SpkError::SegmentNotFound { target, center, .. }) => {
                assert_eq!(target, 301);
                assert_eq!(center, 3);
            }
            _ => panic!("Expected SegmentNotFound"),
        }
    }

    #[test]
    fn test_epoch_outside_coverage() {
        let (_dir, spk) = open(&[(3, 0, [1.0, 1.0, 1.0])]);
        // Coverage is ±1e9 s (~±31.7 years) around J2000
        assert!(spk.position(3, 0, J2000_JD + 20_000.0).is_err());
    }
}
