//! Brush coordination
//!
//! Tracks an independent brush per axis and turns every brush event into
//! the effects the view must carry out: re-render the selection and refresh
//! the summary table.

use std::sync::Arc;

use dv_core::{compute_selection, ActiveBrush, BrushEvent, BrushExtent, Dataset, Dimension, DimensionId, RecordId};
use dv_render::{AlphaProfile, RenderHandle};
use tracing::{debug, info, warn};

/// Brush state of one axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BrushState {
    #[default]
    Idle,
    /// A drag is in progress; `None` until the extent has height
    Dragging(Option<BrushExtent>),
    /// Released with a non-empty extent
    Committed(BrushExtent),
}

impl BrushState {
    /// The extent this axis currently filters by
    pub fn extent(&self) -> Option<BrushExtent> {
        match self {
            BrushState::Idle => None,
            BrushState::Dragging(extent) => *extent,
            BrushState::Committed(extent) => Some(*extent),
        }
    }
}

/// Work the view carries out after a brush event
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Keep the drag from reaching anything outside this axis
    StopPropagation { dimension: DimensionId },

    /// Start a render pass over `selection`
    Render {
        selection: Arc<[RecordId]>,
        profile: AlphaProfile,
    },

    /// Refresh the summary table from `selection`
    UpdateTable { selection: Arc<[RecordId]> },
}

/// Owns per-axis brush state and the current selection
pub struct BrushCoordinator {
    dataset: Dataset,
    states: Vec<BrushState>,
    selection: Arc<[RecordId]>,
    render: Option<RenderHandle>,
}

impl BrushCoordinator {
    pub fn new(dataset: Dataset, dimension_count: usize) -> Self {
        let selection = dataset.all_ids().into();
        Self {
            dataset,
            states: vec![BrushState::Idle; dimension_count],
            selection,
            render: None,
        }
    }

    /// Effects for the first draw: everything selected, initial alpha
    pub fn initial_effects(&self) -> Vec<Effect> {
        vec![
            Effect::Render {
                selection: self.selection.clone(),
                profile: AlphaProfile::Initial,
            },
            Effect::UpdateTable {
                selection: self.selection.clone(),
            },
        ]
    }

    /// Remember the pass drawing the current selection
    pub fn track_render(&mut self, handle: RenderHandle) {
        self.render = Some(handle);
    }

    /// Apply one event and return the effects it causes
    pub fn handle(&mut self, event: BrushEvent, dimensions: &[Dimension]) -> Vec<Effect> {
        if let Some(dimension) = event.dimension() {
            if dimension >= self.states.len() {
                warn!("Brush event for unknown dimension {}", dimension);
                return Vec::new();
            }
        }

        match event {
            BrushEvent::Start { dimension } => {
                let current = self.states[dimension].extent();
                self.states[dimension] = BrushState::Dragging(current);
                return vec![Effect::StopPropagation { dimension }];
            }
            BrushEvent::Move { dimension, extent } => {
                self.states[dimension] = BrushState::Dragging(extent.filter(|e| !e.is_empty()));
            }
            BrushEvent::End { dimension, extent } => {
                self.states[dimension] = match extent.filter(|e| !e.is_empty()) {
                    Some(extent) => {
                        info!(
                            "Brush committed on '{}': [{:.1}, {:.1}]",
                            dimension_key(dimensions, dimension),
                            extent.lo,
                            extent.hi
                        );
                        BrushState::Committed(extent)
                    }
                    None => BrushState::Idle,
                };
            }
            BrushEvent::Clear { dimension } => {
                self.states[dimension] = BrushState::Idle;
            }
            BrushEvent::ClearAll => {
                self.states.iter_mut().for_each(|s| *s = BrushState::Idle);
            }
        }

        self.recompute(dimensions)
    }

    /// Reset one axis to idle
    pub fn clear(&mut self, dimension: DimensionId, dimensions: &[Dimension]) -> Vec<Effect> {
        self.handle(BrushEvent::Clear { dimension }, dimensions)
    }

    /// Reset every axis to idle
    pub fn clear_all(&mut self, dimensions: &[Dimension]) -> Vec<Effect> {
        info!("Clearing all brushes");
        self.handle(BrushEvent::ClearAll, dimensions)
    }

    fn recompute(&mut self, dimensions: &[Dimension]) -> Vec<Effect> {
        // The previous pass must not draw over the new selection
        if let Some(handle) = self.render.take() {
            handle.invalidate();
        }

        let actives = self.actives();
        self.selection = compute_selection(&self.dataset, dimensions, &actives).into();
        debug!(
            "Selection recomputed: {} of {} records, {} active brushes",
            self.selection.len(),
            self.dataset.len(),
            actives.len()
        );

        vec![
            Effect::Render {
                selection: self.selection.clone(),
                profile: AlphaProfile::Selected,
            },
            Effect::UpdateTable {
                selection: self.selection.clone(),
            },
        ]
    }

    /// Axes whose brush currently filters
    pub fn actives(&self) -> Vec<ActiveBrush> {
        self.states
            .iter()
            .enumerate()
            .filter_map(|(dimension, state)| state.extent().map(|extent| ActiveBrush { dimension, extent }))
            .collect()
    }

    pub fn state(&self, dimension: DimensionId) -> Option<BrushState> {
        self.states.get(dimension).copied()
    }

    pub fn selection(&self) -> &Arc<[RecordId]> {
        &self.selection
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

fn dimension_key(dimensions: &[Dimension], id: DimensionId) -> &str {
    dimensions.get(id).map(|d| d.key.as_str()).unwrap_or("?")
}
