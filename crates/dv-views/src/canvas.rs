//! Retained egui canvas for the foreground polylines
//!
//! egui repaints every frame, so the strokes a render pass emits are kept
//! here as shapes and re-submitted each frame until the next `clear`.

use dv_render::{BlendMode, Surface};
use egui::{Color32, Painter, Pos2, Shape, Stroke, Vec2};

/// A [`Surface`] that accumulates strokes as egui shapes in plot-local
/// coordinates
#[derive(Default)]
pub struct CanvasSurface {
    shapes: Vec<Shape>,
    subpaths: Vec<Vec<Pos2>>,
    color: Color32,
    alpha: f32,
    width: f32,
    blend: BlendMode,
}

impl CanvasSurface {
    pub fn new() -> Self {
        Self {
            alpha: 1.0,
            width: 1.0,
            ..Default::default()
        }
    }

    /// Submit every retained stroke, offset by `origin`
    pub fn paint(&self, painter: &Painter, origin: Pos2) {
        let delta = origin.to_vec2();
        painter.extend(self.shapes.iter().cloned().map(|mut shape| {
            shape.translate(delta);
            shape
        }));
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    /// Darken has no egui equivalent; strokes are alpha-blended over the
    /// light plot background, which reads the same for dark palettes.
    fn stroke_color(&self) -> Color32 {
        let alpha = (self.color.a() as f32 * self.alpha.clamp(0.0, 1.0)).round() as u8;
        Color32::from_rgba_unmultiplied(self.color.r(), self.color.g(), self.color.b(), alpha)
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.shapes.clear();
        self.subpaths.clear();
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    fn set_line_width(&mut self, width: f32) {
        self.width = width;
    }

    fn set_stroke_color(&mut self, color: Color32) {
        self.color = color;
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.subpaths.push(vec![Pos2::new(x, y)]);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        match self.subpaths.last_mut() {
            Some(path) => path.push(Pos2::new(x, y)),
            None => self.move_to(x, y),
        }
    }

    fn stroke(&mut self) {
        let stroke = Stroke::new(self.width, self.stroke_color());
        for path in &self.subpaths {
            if path.len() >= 2 {
                self.shapes.push(Shape::line(path.clone(), stroke));
            }
        }
    }
}

/// Offset applied when the plot is drawn inside its margins
pub fn plot_origin(top_left: Pos2, margin_left: f32, margin_top: f32) -> Pos2 {
    top_left + Vec2::new(margin_left, margin_top)
}
