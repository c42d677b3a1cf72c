//! Dimension model: one visualized column with its type, domain and scale

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::column_type::{ColumnType, Domain};
use crate::config::PlotConfig;
use crate::record::{Dataset, RawRecord, Record, Value};
use crate::scale::Scale;

/// Position of a dimension in the ordered dimension list
pub type DimensionId = usize;

/// How tick labels are printed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TickFormat {
    /// Up to six decimals, trailing zeros dropped
    Auto,
    /// The value exactly as stored
    Verbatim,
    /// A fixed number of decimals
    Fixed(usize),
}

/// Per-dimension axis customisation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisRenderer {
    pub tick_format: TickFormat,
    pub tick_count: usize,
    /// Paint tick labels with the category palette
    pub color_ticks: bool,
}

impl Default for AxisRenderer {
    fn default() -> Self {
        Self {
            tick_format: TickFormat::Auto,
            tick_count: 10,
            color_ticks: false,
        }
    }
}

impl AxisRenderer {
    pub fn format(&self, value: &Value) -> String {
        match (&self.tick_format, value) {
            (TickFormat::Fixed(digits), Value::Number(v)) => format!("{:.*}", digits, v),
            (TickFormat::Auto, Value::Number(v)) => {
                let rounded = (v * 1e6).round() / 1e6;
                format!("{}", rounded)
            }
            _ => value.to_string(),
        }
    }
}

/// Configuration of one dimension before the data is known
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionConfig {
    pub key: String,
    pub description: String,
    pub column_type: ColumnType,

    /// Explicit domain; derived from the data when `None`
    #[serde(default)]
    pub domain: Option<Domain>,

    /// Explicit scale; the type's default scale when `None`
    #[serde(skip)]
    pub scale: Option<Scale>,

    /// Custom axis renderer
    #[serde(default)]
    pub axis: Option<AxisRenderer>,
}

impl DimensionConfig {
    pub fn new(key: impl Into<String>, column_type: ColumnType) -> Self {
        let key = key.into();
        Self {
            description: key.clone(),
            key,
            column_type,
            domain: None,
            scale: None,
            axis: None,
        }
    }

    pub fn numeric(key: impl Into<String>) -> Self {
        Self::new(key, ColumnType::Numeric)
    }

    pub fn categorical(key: impl Into<String>) -> Self {
        Self::new(key, ColumnType::Categorical)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }

    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_axis(mut self, axis: AxisRenderer) -> Self {
        self.axis = Some(axis);
        self
    }

    /// The event-log dimensions: time, event_type, cpu_id, disk_usage, memory_usage
    pub fn event_log() -> Vec<Self> {
        vec![
            Self::numeric("time").with_axis(AxisRenderer {
                tick_format: TickFormat::Verbatim,
                color_ticks: true,
                ..AxisRenderer::default()
            }),
            Self::numeric("event_type"),
            Self::numeric("cpu_id"),
            Self::numeric("disk_usage"),
            Self::numeric("memory_usage"),
        ]
    }
}

/// A dimension with its domain and scale resolved
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub id: DimensionId,
    pub key: String,
    pub description: String,
    pub column_type: ColumnType,
    pub domain: Domain,
    pub scale: Scale,
    pub axis: Option<AxisRenderer>,
}

impl Dimension {
    /// The custom axis renderer, or the default one
    pub fn axis_renderer(&self) -> AxisRenderer {
        self.axis.clone().unwrap_or_default()
    }

    /// Scaled offset of `record`'s value, `None` when absent or unplaceable
    pub fn offset_of(&self, record: &Record) -> Option<f64> {
        record.get(&self.key).and_then(|v| self.scale.apply(v))
    }
}

/// Resolve every configured dimension against the loaded data.
///
/// Missing domains come from the type's `domain()` over the column; missing
/// scales are the type's default scale bound to that domain. This runs once
/// per load, which is the only point where domains and scales change.
pub fn build_dimensions(configs: &[DimensionConfig], dataset: &Dataset, config: &PlotConfig) -> Vec<Dimension> {
    let inner_height = config.inner_height() as f64;

    configs
        .iter()
        .enumerate()
        .map(|(id, cfg)| {
            let domain = cfg
                .domain
                .clone()
                .unwrap_or_else(|| cfg.column_type.domain(dataset.column(&cfg.key)));
            let scale = cfg
                .scale
                .clone()
                .unwrap_or_else(|| cfg.column_type.default_scale(&domain, inner_height));

            if domain.is_degenerate() {
                debug!("Dimension '{}' has a zero-spread domain", cfg.key);
            }
            info!("Dimension '{}' ({}) domain {:?}", cfg.key, cfg.column_type.name(), domain);

            Dimension {
                id,
                key: cfg.key.clone(),
                description: cfg.description.clone(),
                column_type: cfg.column_type,
                domain,
                scale,
                axis: cfg.axis.clone(),
            }
        })
        .collect()
}

/// Turn raw rows into records.
///
/// Every dimension key is present in each record: null-like or unparseable
/// cells and missing columns become absent. Other columns are kept as text.
pub fn coerce_records<F>(rows: Vec<RawRecord>, configs: &[DimensionConfig], is_null: F) -> Dataset
where
    F: Fn(&str) -> bool,
{
    let records = rows
        .into_iter()
        .map(|row| {
            let mut record = Record::new();
            for (key, cell) in &row {
                if configs.iter().any(|c| c.key == *key) {
                    continue;
                }
                let value = (!is_null(cell)).then(|| Value::Text(cell.clone()));
                record.insert(key.clone(), value);
            }
            for cfg in configs {
                let value = row
                    .get(&cfg.key)
                    .filter(|cell| !is_null(cell))
                    .and_then(|cell| cfg.column_type.coerce(cell));
                record.insert(cfg.key.clone(), value);
            }
            record
        })
        .collect();

    Dataset::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawRecord {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_coerce_marks_missing_and_invalid_absent() {
        let configs = vec![DimensionConfig::numeric("a"), DimensionConfig::numeric("b")];
        let dataset = coerce_records(
            vec![raw(&[("a", "1"), ("b", "oops"), ("note", "x")]), raw(&[("a", "")])],
            &configs,
            |s| s.trim().is_empty(),
        );

        let first = &dataset.records()[0];
        assert_eq!(first.get("a"), Some(&Value::Number(1.0)));
        assert_eq!(first.get("b"), None);
        assert!(first.contains_key("b"));
        assert_eq!(first.get("note"), Some(&Value::from("x")));

        let second = &dataset.records()[1];
        assert_eq!(second.get("a"), None);
        assert!(second.contains_key("b"));
    }

    #[test]
    fn test_build_derives_domain_and_scale() {
        let dataset = Dataset::new(vec![
            Record::new().with("disk_usage", 10.0).with("kind", "b"),
            Record::new().with("disk_usage", 90.0).with("kind", "a"),
            Record::new().with_absent("disk_usage").with("kind", "b"),
        ]);
        let config = PlotConfig::default();
        let dims = build_dimensions(
            &[DimensionConfig::numeric("disk_usage"), DimensionConfig::categorical("kind")],
            &dataset,
            &config,
        );

        assert_eq!(dims[0].domain, Domain::Numeric { min: 10.0, max: 90.0 });
        assert_eq!(dims[0].scale.apply(&Value::Number(90.0)), Some(0.0));
        assert_eq!(dims[0].scale.apply(&Value::Number(10.0)), Some(config.inner_height() as f64));
        assert_eq!(dims[1].domain, Domain::Categorical(vec!["a".into(), "b".into()]));
        assert_eq!(dims[1].scale.apply(&Value::from("a")), Some(0.0));
        assert_eq!(dims[1].id, 1);
    }

    #[test]
    fn test_explicit_domain_and_scale_win() {
        let dataset = Dataset::new(vec![Record::new().with("x", 5.0)]);
        let scale = Scale::linear([0.0, 10.0], [0.0, 1.0]);
        let dims = build_dimensions(
            &[DimensionConfig::numeric("x")
                .with_domain(Domain::Numeric { min: 0.0, max: 10.0 })
                .with_scale(scale.clone())],
            &dataset,
            &PlotConfig::default(),
        );
        assert_eq!(dims[0].domain, Domain::Numeric { min: 0.0, max: 10.0 });
        assert_eq!(dims[0].scale, scale);
    }

    #[test]
    fn test_single_value_column_gets_usable_scale() {
        let dataset = Dataset::new(vec![Record::new().with("x", 4.0), Record::new().with("x", 4.0)]);
        let config = PlotConfig::default();
        let dims = build_dimensions(&[DimensionConfig::numeric("x")], &dataset, &config);
        let offset = dims[0].scale.apply(&Value::Number(4.0)).unwrap();
        assert!(offset.is_finite());
        assert_eq!(offset, config.inner_height() as f64 / 2.0);
    }

    #[test]
    fn test_axis_renderer_formats() {
        let verbatim = AxisRenderer {
            tick_format: TickFormat::Verbatim,
            ..AxisRenderer::default()
        };
        assert_eq!(verbatim.format(&Value::Number(1500.0)), "1500");

        let fixed = AxisRenderer {
            tick_format: TickFormat::Fixed(2),
            ..AxisRenderer::default()
        };
        assert_eq!(fixed.format(&Value::Number(0.5)), "0.50");
        assert_eq!(AxisRenderer::default().format(&Value::Number(0.1 + 0.2)), "0.3");
    }

    #[test]
    fn test_event_log_dimensions() {
        let dims = DimensionConfig::event_log();
        let keys: Vec<_> = dims.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["time", "event_type", "cpu_id", "disk_usage", "memory_usage"]);
        assert!(dims[0].axis.as_ref().map(|a| a.color_ticks).unwrap_or(false));
    }
}
