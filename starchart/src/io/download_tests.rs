#[cfg(test)]
mod tests {
    use crate::io::download::{decompress_gz, ensure_file, DataFile};
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::TempDir;

    const UNREACHABLE_URL: &str = "http://127.0.0.1:9/never-fetched";

    fn write_gz(path: &std::path::Path, content: &[u8]) {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(content).unwrap();
        std::fs::write(path, encoder.finish().unwrap()).unwrap();
    }

    #[test]
    fn test_existing_file_is_used_without_download() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hip_main.dat");
        std::fs::write(&path, "existing").unwrap();

        let found = ensure_file(&path, UNREACHABLE_URL, "catalog").unwrap();
        assert_eq!(found, path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing");
    }

    #[test]
    fn test_gz_sibling_is_unpacked() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hip_main.dat");
        write_gz(&dir.path().join("hip_main.dat.gz"), b"H|1|x\n");

        let data = DataFile::new(&path, UNREACHABLE_URL, "catalog");
        let found = data.ensure().unwrap();
        assert_eq!(found, path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "H|1|x\n");
        assert!(!dir.path().join("hip_main.dat.part").exists());
    }

    #[test]
    fn test_decompress_reports_size() {
        let dir = TempDir::new().unwrap();
        let gz = dir.path().join("data.gz");
        write_gz(&gz, &[7u8; 4096]);

        let dest = dir.path().join("data");
        assert_eq!(decompress_gz(&gz, &dest).unwrap(), 4096);
        assert_eq!(std::fs::read(&dest).unwrap().len(), 4096);
    }

    #[test]
    fn test_corrupt_gz_leaves_no_output() {
        let dir = TempDir::new().unwrap();
        let gz = dir.path().join("broken.dat.gz");
        std::fs::write(&gz, b"not gzip at all").unwrap();

        let dest = dir.path().join("broken.dat");
        assert!(decompress_gz(&gz, &dest).is_err());
        assert!(!dest.exists());
        assert!(!dir.path().join("broken.dat.part").exists());
    }

    #[test]
    fn test_failed_download_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("de421.bsp");
        assert!(ensure_file(&path, UNREACHABLE_URL, "ephemeris").is_err());
        assert!(!path.exists());
    }
}
