//! NAIF Double precision Array File (DAF) container.
//!
//! Only what SPK reading needs: the file record, the summary record chain and
//! random access to 8-byte words by 1-based address.

use memmap2::Mmap;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use super::SpkError;

pub(crate) const RECORD_BYTES: usize = 1024;
pub(crate) const FTPSTR: &[u8] = b"FTPSTR:\r:\n:\r\n:\r\x00:\x81:\x10\xce:ENDFTP";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    fn f64_at(self, bytes: &[u8], offset: usize) -> f64 {
        let mut word = [0u8; 8];
        word.copy_from_slice(&bytes[offset..offset + 8]);
        match self {
            Endian::Little => f64::from_le_bytes(word),
            Endian::Big => f64::from_be_bytes(word),
        }
    }

    fn i32_at(self, bytes: &[u8], offset: usize) -> i32 {
        let mut word = [0u8; 4];
        word.copy_from_slice(&bytes[offset..offset + 4]);
        match self {
            Endian::Little => i32::from_le_bytes(word),
            Endian::Big => i32::from_be_bytes(word),
        }
    }
}

/// One array descriptor: `nd` doubles followed by `ni` integers.
#[derive(Debug, Clone, PartialEq)]
pub struct DafSummary {
    pub doubles: Vec<f64>,
    pub ints: Vec<i32>,
}

pub struct DafFile {
    data: Mmap,
    endian: Endian,
    nd: usize,
    ni: usize,
    first_summary_record: usize,
}

impl DafFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SpkError> {
        let file = File::open(path.as_ref())
            .map_err(|e| SpkError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
        // SAFETY: the mapping is read-only and the file is not modified while open.
        let data = unsafe { Mmap::map(&file) }.map_err(|e| SpkError::Io(e.to_string()))?;
        Self::from_mmap(data)
    }

    fn from_mmap(data: Mmap) -> Result<Self, SpkError> {
        if data.len() < RECORD_BYTES {
            return Err(SpkError::InvalidFormat("File too small for DAF".into()));
        }
        if !data.starts_with(b"DAF/") {
            return Err(SpkError::InvalidFormat(format!(
                "Invalid DAF signature: {:?}",
                String::from_utf8_lossy(&data[0..8])
            )));
        }
        let endian = detect_endian(&data)?;
        if data[699..727] != *FTPSTR {
            return Err(SpkError::InvalidFormat("FTP corruption detected".into()));
        }
        let nd = endian.i32_at(&data, 8);
        let ni = endian.i32_at(&data, 12);
        let (nd, ni) = summary_layout(nd, ni)?;
        let first_summary_record = endian.i32_at(&data, 76).max(0) as usize;
        Ok(Self {
            data,
            endian,
            nd,
            ni,
            first_summary_record,
        })
    }

    /// Summary size in 8-byte words.
    fn summary_words(&self) -> usize {
        self.nd + self.ni.div_ceil(2)
    }

    /// Walk the summary record chain and collect every array descriptor.
    pub fn summaries(&self) -> Result<Vec<DafSummary>, SpkError> {
        let mut summaries = Vec::new();
        let mut visited = HashSet::new();
        let mut record = self.first_summary_record;
        let summary_bytes = self.summary_words() * 8;

        while record != 0 {
            if !visited.insert(record) {
                return Err(SpkError::InvalidData(format!(
                    "Summary record chain loops back to record {}",
                    record
                )));
            }
            let start = (record - 1) * RECORD_BYTES;
            if start + RECORD_BYTES > self.data.len() {
                return Err(SpkError::InvalidData(format!(
                    "Summary record {} out of bounds",
                    record
                )));
            }
            let next = self.endian.f64_at(&self.data, start) as usize;
            let count = self.endian.f64_at(&self.data, start + 16) as usize;

            for i in 0..count {
                let offset = start + 24 + i * summary_bytes;
                if offset + summary_bytes > self.data.len() {
                    return Err(SpkError::InvalidData("Summary out of bounds".into()));
                }
                summaries.push(self.parse_summary(offset));
            }
            record = next;
        }
        Ok(summaries)
    }

    fn parse_summary(&self, offset: usize) -> DafSummary {
        let doubles = (0..self.nd)
            .map(|i| self.endian.f64_at(&self.data, offset + i * 8))
            .collect();
        let int_base = offset + self.nd * 8;
        let ints = (0..self.ni)
            .map(|i| self.endian.i32_at(&self.data, int_base + i * 4))
            .collect();
        DafSummary { doubles, ints }
    }

    /// Read `count` words starting at the 1-based word address `start`.
    pub fn read_words(&self, start: usize, count: usize) -> Result<Vec<f64>, SpkError> {
        if start == 0 {
            return Err(SpkError::InvalidData("DAF addresses start at 1".into()));
        }
        let byte_start = (start - 1) * 8;
        let byte_end = byte_start + count * 8;
        if byte_end > self.data.len() {
            return Err(SpkError::InvalidData(format!(
                "Array range {}..{} out of bounds",
                start,
                start + count
            )));
        }
        Ok((0..count)
            .map(|i| self.endian.f64_at(&self.data, byte_start + i * 8))
            .collect())
    }
}

/// Validate the summary shape: at most 125 words per summary.
fn summary_layout(nd: i32, ni: i32) -> Result<(usize, usize), SpkError> {
    if !(1..=124).contains(&nd) || !(2..=250).contains(&ni) {
        return Err(SpkError::InvalidFormat(format!(
            "Invalid summary layout: ND={} NI={}",
            nd, ni
        )));
    }
    let (nd, ni) = (nd as usize, ni as usize);
    if nd + ni.div_ceil(2) > 125 {
        return Err(SpkError::InvalidFormat(format!(
            "Summary of ND={} NI={} exceeds one record",
            nd, ni
        )));
    }
    Ok((nd, ni))
}

fn detect_endian(data: &[u8]) -> Result<Endian, SpkError> {
    let nd_le = Endian::Little.i32_at(data, 8);
    let nd_be = Endian::Big.i32_at(data, 8);
    if (1..=124).contains(&nd_le) {
        Ok(Endian::Little)
    } else if (1..=124).contains(&nd_be) {
        Ok(Endian::Big)
    } else {
        Err(SpkError::InvalidFormat("Cannot determine endianness".into()))
    }
}
