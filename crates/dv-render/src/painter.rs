//! Drawing one record as a polyline

use dv_core::{Dataset, Dimension, RecordId, ScreenLayout, Vertex};

use crate::palette::category_color;
use crate::Surface;

/// Draws one item of a render pass
pub trait ItemPainter {
    fn paint(&self, surface: &mut dyn Surface, id: RecordId);
}

/// Paints a record as a polyline across the axes, coloured by category
pub struct PolylinePainter<'a> {
    pub dataset: &'a Dataset,
    pub dimensions: &'a [Dimension],
    pub layout: &'a ScreenLayout,
    pub color_key: &'a str,
}

impl ItemPainter for PolylinePainter<'_> {
    fn paint(&self, surface: &mut dyn Surface, id: RecordId) {
        let Some(record) = self.dataset.get(id) else {
            return;
        };

        surface.set_stroke_color(category_color(record.get(self.color_key)));
        surface.begin_path();
        trace_polyline(surface, &self.layout.project(record, self.dimensions));
        surface.stroke();
    }
}

/// Emit move/line calls for a projected record.
///
/// A `None` vertex is skipped and the next present vertex starts a new
/// sub-path, so the line breaks at a missing value instead of bridging it.
pub fn trace_polyline(surface: &mut dyn Surface, vertices: &[Vertex]) {
    let mut pen_down = false;
    for vertex in vertices {
        match vertex {
            Some((x, y)) if pen_down => surface.line_to(*x as f32, *y as f32),
            Some((x, y)) => {
                surface.move_to(*x as f32, *y as f32);
                pen_down = true;
            }
            None => pen_down = false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::CATEGORY_PALETTE;
    use crate::recording::{RecordingSurface, SurfaceCall};
    use dv_core::{build_dimensions, DimensionConfig, PlotConfig, Record};

    #[test]
    fn test_none_vertex_breaks_the_line() {
        let mut surface = RecordingSurface::new();
        trace_polyline(
            &mut surface,
            &[Some((0.0, 1.0)), Some((10.0, 2.0)), None, Some((30.0, 4.0)), Some((40.0, 5.0))],
        );
        assert_eq!(
            surface.calls(),
            &[
                SurfaceCall::MoveTo(0.0, 1.0),
                SurfaceCall::LineTo(10.0, 2.0),
                SurfaceCall::MoveTo(30.0, 4.0),
                SurfaceCall::LineTo(40.0, 5.0),
            ]
        );
    }

    #[test]
    fn test_leading_none_starts_at_first_present_vertex() {
        let mut surface = RecordingSurface::new();
        trace_polyline(&mut surface, &[None, Some((10.0, 2.0)), Some((20.0, 3.0))]);
        assert_eq!(surface.calls()[0], SurfaceCall::MoveTo(10.0, 2.0));
        assert_eq!(surface.calls().len(), 2);
    }

    #[test]
    fn test_polyline_painter_colors_by_category() {
        let dataset = Dataset::new(vec![Record::new().with("event_type", 2.0).with("disk_usage", 5.0)]);
        let config = PlotConfig::default();
        let dims = build_dimensions(
            &[DimensionConfig::numeric("event_type"), DimensionConfig::numeric("disk_usage")],
            &dataset,
            &config,
        );
        let layout = ScreenLayout::new(dims.len(), &config);
        let painter = PolylinePainter {
            dataset: &dataset,
            dimensions: &dims,
            layout: &layout,
            color_key: "event_type",
        };

        let mut surface = RecordingSurface::new();
        painter.paint(&mut surface, 0);

        assert_eq!(surface.calls()[0], SurfaceCall::StrokeColor(CATEGORY_PALETTE[2]));
        assert_eq!(surface.calls()[1], SurfaceCall::BeginPath);
        assert_eq!(surface.strokes(), 1);
    }
}
