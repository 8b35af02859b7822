use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Watermark file written into the working directory.
pub const WATERMARK_FILE: &str = ".time.txt";

/// Single-integer persistence for the newest article time already
/// processed. Read once and written once per run; no locking, so two
/// simultaneous runs can race.
pub struct WatermarkStore {
    path: PathBuf,
}

impl WatermarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The persisted watermark, or 0 when no file exists yet.
    pub fn load(&self) -> Result<i64> {
        if !self.path.exists() {
            return Ok(0);
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read watermark file {}", self.path.display()))?;

        content
            .lines()
            .next()
            .unwrap_or("")
            .trim()
            .parse()
            .with_context(|| format!("Corrupt watermark file {}", self.path.display()))
    }

    /// Overwrite the watermark unconditionally.
    pub fn store(&self, value: i64) -> Result<()> {
        fs::write(&self.path, value.to_string())
            .with_context(|| format!("Failed to write watermark file {}", self.path.display()))?;

        info!("Persisted watermark {}", value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absent_file_reads_as_zero() {
        let tmp = TempDir::new().unwrap();
        let store = WatermarkStore::new(tmp.path().join(WATERMARK_FILE));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_store_then_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let store = WatermarkStore::new(tmp.path().join(WATERMARK_FILE));

        store.store(1614902400).unwrap();
        assert_eq!(store.load().unwrap(), 1614902400);

        store.store(1614988800).unwrap();
        assert_eq!(store.load().unwrap(), 1614988800);
    }

    #[test]
    fn test_trailing_newline_is_tolerated() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(WATERMARK_FILE);
        std::fs::write(&path, "12345\n").unwrap();

        let store = WatermarkStore::new(path);
        assert_eq!(store.load().unwrap(), 12345);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(WATERMARK_FILE);
        std::fs::write(&path, "not a number").unwrap();

        let store = WatermarkStore::new(path);
        assert!(store.load().is_err());
    }
}
