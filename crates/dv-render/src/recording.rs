//! Headless surface that records every call

use egui::Color32;

use crate::{BlendMode, Surface};

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Clear,
    GlobalAlpha(f32),
    Blend(BlendMode),
    LineWidth(f32),
    StrokeColor(Color32),
    BeginPath,
    MoveTo(f32, f32),
    LineTo(f32, f32),
    Stroke,
}

/// A [`Surface`] that draws nothing and remembers what it was asked to do
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Number of stroked paths
    pub fn strokes(&self) -> usize {
        self.calls.iter().filter(|c| **c == SurfaceCall::Stroke).count()
    }

    /// Calls recorded since the last `clear`
    pub fn since_clear(&self) -> &[SurfaceCall] {
        let start = self
            .calls
            .iter()
            .rposition(|c| *c == SurfaceCall::Clear)
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.calls[start..]
    }

    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.push(SurfaceCall::Clear);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.calls.push(SurfaceCall::GlobalAlpha(alpha));
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.calls.push(SurfaceCall::Blend(mode));
    }

    fn set_line_width(&mut self, width: f32) {
        self.calls.push(SurfaceCall::LineWidth(width));
    }

    fn set_stroke_color(&mut self, color: Color32) {
        self.calls.push(SurfaceCall::StrokeColor(color));
    }

    fn begin_path(&mut self) {
        self.calls.push(SurfaceCall::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.calls.push(SurfaceCall::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.calls.push(SurfaceCall::LineTo(x, y));
    }

    fn stroke(&mut self) {
        self.calls.push(SurfaceCall::Stroke);
    }
}
