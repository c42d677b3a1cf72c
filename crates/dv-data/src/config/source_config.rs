//! Configuration of a delimited data source

use std::path::PathBuf;

use super::null_handling::NullConfig;

/// How a delimited file is read
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfig {
    /// Path to the file
    pub path: PathBuf,

    /// Field delimiter
    pub delimiter: u8,

    /// Null handling configuration
    pub null_config: NullConfig,

    /// Columns whose absence from the header fails the load
    pub required_columns: Vec<String>,
}

impl SourceConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
            null_config: NullConfig::default(),
            required_columns: Vec::new(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_null_config(mut self, null_config: NullConfig) -> Self {
        self.null_config = null_config;
        self
    }

    pub fn with_required_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_columns = columns.into_iter().map(Into::into).collect();
        self
    }
}
