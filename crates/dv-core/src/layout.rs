//! Screen layout: horizontal axis placement and record projection

use crate::config::PlotConfig;
use crate::dimension::{Dimension, DimensionId};
use crate::record::Record;
use crate::scale::point_offset;

/// A projected polyline vertex; `None` where the record has no value
pub type Vertex = Option<(f64, f64)>;

/// Fixed mapping from dimension index to axis x position
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenLayout {
    positions: Vec<f64>,
}

impl ScreenLayout {
    /// Evenly spaced axes across the plot width, in dimension order
    pub fn new(dimension_count: usize, config: &PlotConfig) -> Self {
        let range = [0.0, config.width as f64];
        let positions = (0..dimension_count)
            .map(|i| point_offset(i, dimension_count, range))
            .collect();
        Self { positions }
    }

    pub fn x_position_of(&self, index: DimensionId) -> Option<f64> {
        self.positions.get(index).copied()
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// The axis whose x position is within `tolerance` of `x`
    pub fn axis_at(&self, x: f64, tolerance: f64) -> Option<DimensionId> {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, p)| (i, (p - x).abs()))
            .filter(|(_, d)| *d <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// One vertex per dimension; a missing key or absent value yields `None`
    pub fn project(&self, record: &Record, dimensions: &[Dimension]) -> Vec<Vertex> {
        dimensions
            .iter()
            .enumerate()
            .map(|(i, dim)| {
                let x = self.x_position_of(i)?;
                let y = dim.offset_of(record)?;
                Some((x, y))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::{build_dimensions, DimensionConfig};
    use crate::record::Dataset;

    fn config() -> PlotConfig {
        PlotConfig {
            width: 400.0,
            ..PlotConfig::default()
        }
    }

    #[test]
    fn test_axes_evenly_spaced() {
        let layout = ScreenLayout::new(5, &config());
        assert_eq!(layout.positions(), &[0.0, 100.0, 200.0, 300.0, 400.0]);
        assert_eq!(layout.x_position_of(2), Some(200.0));
        assert_eq!(layout.x_position_of(5), None);

        let single = ScreenLayout::new(1, &config());
        assert_eq!(single.positions(), &[200.0]);
    }

    #[test]
    fn test_axis_hit_testing() {
        let layout = ScreenLayout::new(3, &config());
        assert_eq!(layout.axis_at(195.0, 10.0), Some(1));
        assert_eq!(layout.axis_at(150.0, 10.0), None);
        assert_eq!(layout.axis_at(-8.0, 10.0), Some(0));
    }

    #[test]
    fn test_project_emits_none_for_absent() {
        let record = Record::new().with("a", 0.0).with_absent("b");
        let other = Record::new().with("a", 10.0).with("b", 1.0).with("c", 3.0);
        let dataset = Dataset::new(vec![record.clone(), other]);
        let cfg = config();
        let dims = build_dimensions(
            &[DimensionConfig::numeric("a"), DimensionConfig::numeric("b"), DimensionConfig::numeric("c")],
            &dataset,
            &cfg,
        );
        let layout = ScreenLayout::new(dims.len(), &cfg);

        let vertices = layout.project(&record, &dims);
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[0], Some((0.0, cfg.inner_height() as f64)));
        assert_eq!(vertices[1], None);
        assert_eq!(vertices[2], None);
    }
}
