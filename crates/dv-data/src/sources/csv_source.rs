use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use async_trait::async_trait;
use csv::ReaderBuilder;
use tracing::debug;

use dv_core::{RawRecord, RecordSource};

use crate::config::SourceConfig;
use crate::DataError;

/// Header and rows of a parsed delimited file
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRecord>,
}

/// Delimited-file data source
pub struct CsvSource {
    config: SourceConfig,
    name: String,
}

impl CsvSource {
    pub fn new(config: SourceConfig) -> Self {
        let name = config
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.csv")
            .to_string();
        Self { config, name }
    }

    /// Source over a comma separated file with default null handling
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::new(SourceConfig::new(path.as_ref()))
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Read the file on the blocking pool
    pub async fn read_table(&self) -> Result<CsvTable, DataError> {
        let config = self.config.clone();
        let table = tokio::task::spawn_blocking(move || {
            let file = File::open(&config.path)?;
            Self::parse_reader(BufReader::new(file), &config)
        })
        .await??;

        debug!("Read {} rows, {} columns from {}", table.rows.len(), table.headers.len(), self.name);
        Ok(table)
    }

    /// Parse a header row followed by records.
    ///
    /// Short rows are accepted; their trailing columns are simply missing.
    pub fn parse_reader<R: Read>(reader: R, config: &SourceConfig) -> Result<CsvTable, DataError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(config.delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

        if let Some(missing) = config.required_columns.iter().find(|c| !headers.contains(c)) {
            return Err(DataError::MissingColumn(missing.clone()));
        }

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let row: RawRecord = headers
                .iter()
                .zip(record.iter())
                .map(|(h, cell)| (h.clone(), cell.to_string()))
                .collect();
            rows.push(row);
        }

        Ok(CsvTable { headers, rows })
    }
}

#[async_trait]
impl RecordSource for CsvSource {
    async fn load(&self) -> anyhow::Result<Vec<RawRecord>> {
        Ok(self.read_table().await?.rows)
    }

    fn source_name(&self) -> &str {
        &self.name
    }

    fn is_null(&self, cell: &str) -> bool {
        self.config.null_config.is_null(cell)
    }
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NullConfig;
    use dv_core::{load_dataset, DimensionConfig, Value};
    use std::io::Write;

    const EVENTS: &str = "time,event_type,cpu_id,disk_usage,memory_usage,host\n\
                          1,3,0,10.5,40,a\n\
                          2,1,1,,55,b\n\
                          3,2,0,n/a,oops,c\n";

    fn write_temp(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[test]
    fn test_parse_reader_keeps_header_order() {
        let table = CsvSource::parse_reader(EVENTS.as_bytes(), &SourceConfig::new("inline.csv")).unwrap();
        assert_eq!(table.headers[0], "time");
        assert_eq!(table.headers.len(), 6);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[1]["disk_usage"], "");
    }

    #[test]
    fn test_required_column_missing() {
        let config = SourceConfig::new("inline.csv").with_required_columns(["time", "latency"]);
        let err = CsvSource::parse_reader(EVENTS.as_bytes(), &config).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(c) if c == "latency"));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let config = SourceConfig::new("inline.csv").with_delimiter(b';');
        let table = CsvSource::parse_reader("a;b\n1;2\n".as_bytes(), &config).unwrap();
        assert_eq!(table.rows[0]["b"], "2");
    }

    #[tokio::test]
    async fn test_load_dataset_coerces_dimensions() {
        let file = write_temp(EVENTS.as_bytes());
        let source = CsvSource::from_path(file.path());
        let dataset = load_dataset(&source, &DimensionConfig::event_log()).await.unwrap();

        assert_eq!(dataset.len(), 3);
        let first = &dataset.records()[0];
        assert_eq!(first.get("disk_usage"), Some(&Value::Number(10.5)));
        assert_eq!(first.get("host"), Some(&Value::from("a")));

        // Empty, null-pattern and unparseable cells all become absent
        assert_eq!(dataset.records()[1].get("disk_usage"), None);
        assert_eq!(dataset.records()[2].get("disk_usage"), None);
        assert_eq!(dataset.records()[2].get("memory_usage"), None);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvSource::from_path(dir.path().join("absent.csv"));
        let err = source.read_table().await.unwrap_err();
        assert!(matches!(err, DataError::Io(_)));

        let err = load_dataset(&source, &DimensionConfig::event_log()).await.unwrap_err();
        assert!(err.downcast_ref::<DataError>().is_some());
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_fatal() {
        let file = write_temp(b"time,event_type\n1,\xff\xfe\n");
        let source = CsvSource::from_path(file.path());
        assert!(load_dataset(&source, &DimensionConfig::event_log()).await.is_err());
    }

    #[tokio::test]
    async fn test_record_source_trait() {
        let file = write_temp(EVENTS.as_bytes());
        let source = CsvSource::from_path(file.path());
        let rows = RecordSource::load(&source).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(source.source_name(), file.path().file_name().unwrap().to_str().unwrap());
    }

    #[test]
    fn test_null_patterns_through_record_source() {
        let source: Box<dyn RecordSource> = Box::new(CsvSource::from_path("events.csv"));
        assert!(source.is_null("N/A"));
        assert!(source.is_null(" "));
        assert!(!source.is_null("0"));

        let strict = CsvSource::new(SourceConfig::new("events.csv").with_null_config(NullConfig::empty_only()));
        assert!(!RecordSource::is_null(&strict, "N/A"));
    }
}
