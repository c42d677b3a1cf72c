//! Interaction events delivered to the brush coordinator

use crate::dimension::DimensionId;
use crate::selection::BrushExtent;

/// Pointer-driven brush interaction on one axis, or an explicit clear
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrushEvent {
    /// A drag began on the axis
    Start { dimension: DimensionId },

    /// The drag moved; `None` while the dragged extent has no height yet
    Move {
        dimension: DimensionId,
        extent: Option<BrushExtent>,
    },

    /// The drag was released
    End {
        dimension: DimensionId,
        extent: Option<BrushExtent>,
    },

    /// Drop the brush on one axis
    Clear { dimension: DimensionId },

    /// Drop every brush
    ClearAll,
}

impl BrushEvent {
    /// The axis the event targets, `None` for [`BrushEvent::ClearAll`]
    pub fn dimension(&self) -> Option<DimensionId> {
        match self {
            BrushEvent::Start { dimension }
            | BrushEvent::Move { dimension, .. }
            | BrushEvent::End { dimension, .. }
            | BrushEvent::Clear { dimension } => Some(*dimension),
            BrushEvent::ClearAll => None,
        }
    }
}
