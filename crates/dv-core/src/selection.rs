//! Brush extents and the selection they induce

use serde::{Deserialize, Serialize};

use crate::dimension::{Dimension, DimensionId};
use crate::record::{Dataset, RecordId};

/// A brushed range `[lo, hi]` in scaled (pixel) space, `lo <= hi`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushExtent {
    pub lo: f64,
    pub hi: f64,
}

impl BrushExtent {
    /// Build an extent from two drag endpoints in either order
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    pub fn contains(&self, offset: f64) -> bool {
        self.lo <= offset && offset <= self.hi
    }

    pub fn height(&self) -> f64 {
        self.hi - self.lo
    }

    /// A zero-height extent selects nothing and clears the brush
    pub fn is_empty(&self) -> bool {
        self.height() <= 0.0
    }

    /// Clamp to `[min, max]`
    pub fn clamp(&self, min: f64, max: f64) -> Self {
        Self::new(self.lo.clamp(min, max), self.hi.clamp(min, max))
    }
}

/// An axis whose brush currently filters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveBrush {
    pub dimension: DimensionId,
    pub extent: BrushExtent,
}

/// Records satisfying every active brush.
///
/// Brushes combine by logical AND; with no active brush the whole dataset is
/// selected. Records keep their load order.
pub fn compute_selection(dataset: &Dataset, dimensions: &[Dimension], actives: &[ActiveBrush]) -> Vec<RecordId> {
    if actives.is_empty() {
        return dataset.all_ids();
    }

    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            actives.iter().all(|active| match dimensions.get(active.dimension) {
                Some(dim) => dim.column_type.within(record.get(&dim.key), &active.extent, dim),
                None => false,
            })
        })
        .map(|(id, _)| id)
        .collect()
}
