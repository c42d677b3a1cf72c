//! Core data model for the parallel-coordinates visualizer
//!
//! This crate holds the record model, the column type registry, scales,
//! the dimension builder, the screen layout and selection computation.
//! It has no GUI dependencies.

pub mod column_type;
pub mod config;
pub mod data;
pub mod dimension;
pub mod events;
pub mod layout;
pub mod record;
pub mod scale;
pub mod selection;

// Re-export commonly used types
pub use column_type::{ColumnType, Domain};
pub use config::{ConfigError, Margin, PlotConfig};
pub use data::{load_dataset, RecordSource};
pub use dimension::{
    build_dimensions, coerce_records, AxisRenderer, Dimension, DimensionConfig, DimensionId, TickFormat,
};
pub use events::BrushEvent;
pub use layout::{ScreenLayout, Vertex};
pub use record::{Dataset, RawRecord, Record, RecordId, Value};
pub use scale::{Scale, Tick};
pub use selection::{compute_selection, ActiveBrush, BrushExtent};
