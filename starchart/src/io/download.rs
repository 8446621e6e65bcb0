use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ChartError, ChartResult};

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// A file the pipeline needs, and where to get it when it is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFile {
    pub path: PathBuf,
    pub url: String,
    /// Human-readable name used in log lines
    pub label: &'static str,
}

impl DataFile {
    pub fn new(path: impl Into<PathBuf>, url: impl Into<String>, label: &'static str) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
            label,
        }
    }

    pub fn ensure(&self) -> ChartResult<PathBuf> {
        ensure_file(&self.path, &self.url, self.label)
    }
}

/// Return `path`, unpacking `path.gz` or downloading `url` first if needed.
pub fn ensure_file(path: &Path, url: &str, label: &str) -> ChartResult<PathBuf> {
    if path.exists() {
        log::debug!("Found {} at {}", label, path.display());
        return Ok(path.to_path_buf());
    }

    let gz_path = gz_sibling(path);
    if gz_path.exists() {
        log::info!("Decompressing {}", gz_path.display());
        decompress_gz(&gz_path, path)?;
        return Ok(path.to_path_buf());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    log::info!("{} not found at {}, downloading {}", label, path.display(), url);
    download(url, path)?;
    Ok(path.to_path_buf())
}

fn gz_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".gz");
    PathBuf::from(name)
}

/// Unpack a gzip file to `dest`.
pub fn decompress_gz(gz_path: &Path, dest: &Path) -> ChartResult<u64> {
    let decoder = GzDecoder::new(BufReader::new(File::open(gz_path)?));
    write_atomically(dest, decoder)
}

fn download(url: &str, dest: &Path) -> ChartResult<()> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("starchart/", env!("CARGO_PKG_VERSION")))
        .timeout(DOWNLOAD_TIMEOUT)
        .build()?;
    let response = client.get(url).send()?.error_for_status()?;
    let body = response.bytes()?;
    log::info!("Downloaded {:.1} MB from {}", mb(body.len() as u64), url);

    let written = if url.ends_with(".gz") {
        write_atomically(dest, GzDecoder::new(&body[..]))?
    } else {
        write_atomically(dest, &body[..])?
    };
    log::info!("Wrote {} ({:.1} MB)", dest.display(), mb(written));
    Ok(())
}

/// Stream `reader` into a temporary sibling and rename it over `dest`, so an
/// interrupted transfer never leaves a truncated file behind.
fn write_atomically<R: Read>(dest: &Path, mut reader: R) -> ChartResult<u64> {
    let mut partial = dest.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    let result = (|| -> io::Result<u64> {
        let mut file = File::create(&partial)?;
        let written = io::copy(&mut reader, &mut file)?;
        file.flush()?;
        Ok(written)
    })();

    match result {
        Ok(written) => {
            fs::rename(&partial, dest)?;
            Ok(written)
        }
        Err(e) => {
            let _ = fs::remove_file(&partial);
            Err(ChartError::Io(e))
        }
    }
}

fn mb(bytes: u64) -> f64 {
    bytes as f64 / 1_048_576.0
}
