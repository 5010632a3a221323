//! Anomaly sinks: the CSV log file and an in-memory recorder.

use std::fs::{self, File, OpenOptions};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use stream_spi::{AnomalyRecord, AnomalySink, Result};

/// Header row of the anomaly log.
pub const LOG_HEADER: [&str; 2] = ["Time Step", "Anomaly Value"];

/// Append-only CSV log of confirmed anomalies.
///
/// The file is reopened on every append so each row is on disk before the
/// tick that produced it returns.
#[derive(Debug, Clone)]
pub struct CsvAnomalyLog {
    path: PathBuf,
}

impl CsvAnomalyLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a log written by [`CsvAnomalyLog`] back into records.
    pub fn read_records(path: &Path) -> Result<Vec<AnomalyRecord>> {
        let file = File::open(path)?;
        let mut reader = csv::Reader::from_reader(BufReader::new(file));

        let mut records = Vec::new();
        for row in reader.deserialize::<(u64, f64)>() {
            let (sequence, value) = row?;
            records.push(AnomalyRecord::new(sequence, value));
        }
        Ok(records)
    }
}

impl AnomalySink for CsvAnomalyLog {
    fn reset(&mut self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            tracing::info!(path = %self.path.display(), "removed previous anomaly log");
        }
        Ok(())
    }

    fn append(&mut self, record: &AnomalyRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let is_new = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            writer.write_record(LOG_HEADER)?;
        }
        writer.write_record(&[record.sequence.to_string(), format!("{:?}", record.value)])?;
        writer.flush()?;
        Ok(())
    }
}

/// Sink that keeps records in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Vec<AnomalyRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[AnomalyRecord] {
        &self.records
    }
}

impl AnomalySink for MemorySink {
    fn reset(&mut self) -> Result<()> {
        self.records.clear();
        Ok(())
    }

    fn append(&mut self, record: &AnomalyRecord) -> Result<()> {
        self.records.push(*record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stream_spi::StreamError;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_header_written_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("anomalies.csv");
        let mut log = CsvAnomalyLog::new(&path);
        assert_eq!(log.path(), path.as_path());

        log.append(&AnomalyRecord::new(12, 9.75)).unwrap();
        log.append(&AnomalyRecord::new(40, -8.5)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Time Step,Anomaly Value\n12,9.75\n40,-8.5\n");
    }

    #[test]
    fn test_reset_removes_previous_log() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("anomalies.csv");
        fs::write(&path, "stale contents\n").unwrap();

        let mut log = CsvAnomalyLog::new(&path);
        log.reset().unwrap();
        assert!(!path.exists());

        log.append(&AnomalyRecord::new(3, 10.0)).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Time Step,Anomaly Value\n3,10.0\n");
        assert!(!text.contains("stale"));
    }

    #[test]
    fn test_reset_without_file_is_ok() {
        let dir = tempdir().unwrap();
        let mut log = CsvAnomalyLog::new(dir.path().join("missing.csv"));
        assert!(log.reset().is_ok());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out").join("anomalies.csv");
        let mut log = CsvAnomalyLog::new(&path);
        log.append(&AnomalyRecord::new(1, 1.5)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_failure_propagates() {
        // A regular file cannot be used as a directory
        let blocker = NamedTempFile::new().unwrap();
        let mut log = CsvAnomalyLog::new(blocker.path().join("anomalies.csv"));
        let err = log.append(&AnomalyRecord::new(1, 9.0)).unwrap_err();
        assert!(matches!(err, StreamError::Io(_)));
    }

    #[test]
    fn test_read_back_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("anomalies.csv");
        let mut log = CsvAnomalyLog::new(&path);
        let written = vec![
            AnomalyRecord::new(25, 9.123456789),
            AnomalyRecord::new(61, -8.987654321),
        ];
        for record in &written {
            log.append(record).unwrap();
        }

        assert_eq!(CsvAnomalyLog::read_records(&path).unwrap(), written);
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        sink.append(&AnomalyRecord::new(1, 2.0)).unwrap();
        assert_eq!(sink.records().len(), 1);
        sink.reset().unwrap();
        assert!(sink.records().is_empty());
    }
}
