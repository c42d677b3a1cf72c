//! Rendering abstraction layer
//!
//! This crate provides the drawing-surface trait the plot renders onto and
//! the throttled, cancellable render queue that draws polylines in batches.

pub mod alpha;
pub mod painter;
pub mod palette;
pub mod queue;
pub mod recording;

pub use alpha::{pass_alpha, AlphaProfile};
pub use painter::{trace_polyline, ItemPainter, PolylinePainter};
pub use palette::{category_color, CATEGORY_KEYS, CATEGORY_PALETTE};
pub use queue::{CancellationToken, RenderHandle, RenderQueue, TickOutcome};
pub use recording::{RecordingSurface, SurfaceCall};

use egui::Color32;

/// How new strokes combine with what is already on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Plain source-over alpha blending
    #[default]
    Normal,
    /// Keep the darker of source and destination per channel
    Darken,
}

/// A persistent, immediate-mode drawing surface
pub trait Surface {
    /// Erase the whole drawing area
    fn clear(&mut self);

    /// Transparency applied to every subsequent stroke
    fn set_global_alpha(&mut self, alpha: f32);

    fn set_blend_mode(&mut self, mode: BlendMode);

    fn set_line_width(&mut self, width: f32);

    fn set_stroke_color(&mut self, color: Color32);

    /// Start a new path, discarding any unstroked sub-paths
    fn begin_path(&mut self);

    /// Start a new sub-path at `(x, y)`
    fn move_to(&mut self, x: f32, y: f32);

    /// Extend the current sub-path to `(x, y)`
    fn line_to(&mut self, x: f32, y: f32);

    /// Stroke every sub-path of the current path
    fn stroke(&mut self);
}
