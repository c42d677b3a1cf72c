//! Record source abstraction

use tracing::{info, warn};

use crate::dimension::{coerce_records, DimensionConfig};
use crate::record::{Dataset, RawRecord};

/// Anything that can asynchronously produce raw rows
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    /// Read every row. A failure is fatal to the session.
    async fn load(&self) -> anyhow::Result<Vec<RawRecord>>;

    /// Get the source name/path
    fn source_name(&self) -> &str;

    /// Whether a raw cell counts as absent; only empty cells by default
    fn is_null(&self, cell: &str) -> bool {
        cell.is_empty()
    }
}

/// Load every row from `source` and coerce the dimension columns.
///
/// Columns missing from the data are logged and read as absent.
pub async fn load_dataset(source: &dyn RecordSource, dimensions: &[DimensionConfig]) -> anyhow::Result<Dataset> {
    info!("Loading {}", source.source_name());
    let rows = source.load().await?;

    if let Some(first) = rows.first() {
        for dim in dimensions.iter().filter(|d| !first.contains_key(&d.key)) {
            warn!(
                "Column '{}' not found in {}; its values will be absent",
                dim.key,
                source.source_name()
            );
        }
    }

    let dataset = coerce_records(rows, dimensions, |cell| source.is_null(cell));
    info!("Loaded {} records from {}", dataset.len(), source.source_name());
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Value;

    struct Inline(Vec<RawRecord>);

    #[async_trait::async_trait]
    impl RecordSource for Inline {
        async fn load(&self) -> anyhow::Result<Vec<RawRecord>> {
            Ok(self.0.clone())
        }

        fn source_name(&self) -> &str {
            "inline"
        }

        fn is_null(&self, cell: &str) -> bool {
            cell.is_empty() || cell == "?"
        }
    }

    struct Broken;

    #[async_trait::async_trait]
    impl RecordSource for Broken {
        async fn load(&self) -> anyhow::Result<Vec<RawRecord>> {
            anyhow::bail!("disk on fire")
        }

        fn source_name(&self) -> &str {
            "broken"
        }
    }

    fn row(pairs: &[(&str, &str)]) -> RawRecord {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[tokio::test]
    async fn test_load_uses_source_null_rule() {
        let source = Inline(vec![
            row(&[("time", "1"), ("event_type", "?"), ("host", "?")]),
            row(&[("time", "2"), ("event_type", "4"), ("host", "db")]),
        ]);
        let dataset = load_dataset(&source, &DimensionConfig::event_log()).await.unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[0].get("event_type"), None);
        assert_eq!(dataset.records()[0].get("host"), None);
        assert_eq!(dataset.records()[1].get("event_type"), Some(&Value::Number(4.0)));
        // Missing columns still get a key
        assert!(dataset.records()[1].contains_key("disk_usage"));
    }

    #[tokio::test]
    async fn test_load_failure_propagates() {
        let err = load_dataset(&Broken, &DimensionConfig::event_log()).await.unwrap_err();
        assert!(err.to_string().contains("disk on fire"));
    }
}
