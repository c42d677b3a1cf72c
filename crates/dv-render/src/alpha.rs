//! Density-aware global alpha

use dv_core::PlotConfig;

/// Which alpha constant a render pass uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaProfile {
    /// The whole dataset, drawn at load time
    Initial,
    /// A brushed view
    Selected,
}

impl AlphaProfile {
    pub fn constant(&self, config: &PlotConfig) -> f32 {
        match self {
            AlphaProfile::Initial => config.alpha_initial,
            AlphaProfile::Selected => config.alpha_selected,
        }
    }
}

/// `min(k / count^0.3, 1)`, kept inside `(0, 1]`.
///
/// Fewer lines are drawn more opaque; an empty pass gets full opacity.
pub fn pass_alpha(count: usize, k: f32) -> f32 {
    if count == 0 {
        return 1.0;
    }
    let alpha = k / (count as f32).powf(0.3);
    if alpha.is_finite() && alpha > 0.0 {
        alpha.min(1.0)
    } else {
        f32::MIN_POSITIVE
    }
}
