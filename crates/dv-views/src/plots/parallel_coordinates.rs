//! Parallel coordinates plot with per-axis brushing

use std::time::Instant;

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Response, Rounding, Sense, Stroke, Ui, Vec2};
use tracing::{debug, trace};

use dv_core::{
    build_dimensions, BrushEvent, BrushExtent, Dataset, Dimension, DimensionConfig, DimensionId, PlotConfig,
    ScreenLayout,
};
use dv_render::{category_color, pass_alpha, PolylinePainter, RenderQueue, TickOutcome};

use crate::brush::{BrushCoordinator, Effect};
use crate::canvas::{plot_origin, CanvasSurface};
use crate::tables::{TableColumn, TableDiff, TableSync};

const AXIS_COLOR: Color32 = Color32::from_gray(40);
const TICK_LABEL_COLOR: Color32 = Color32::from_gray(90);
const BACKGROUND: Color32 = Color32::WHITE;

/// A brush drag in progress, in plot-local coordinates
#[derive(Debug, Clone, Copy)]
struct BrushDrag {
    dimension: DimensionId,
    anchor: f64,
    extent: Option<BrushExtent>,
}

/// The plot: axes, brushes, the batched foreground lines and the summary
/// table they drive
pub struct ParallelCoordinatesView {
    config: PlotConfig,
    dimension_configs: Vec<DimensionConfig>,
    dataset: Dataset,
    dimensions: Vec<Dimension>,
    layout: ScreenLayout,
    coordinator: BrushCoordinator,
    queue: RenderQueue,
    canvas: CanvasSurface,
    table: TableSync,
    last_diff: TableDiff,
    drag: Option<BrushDrag>,
    captured: Option<DimensionId>,
}

impl ParallelCoordinatesView {
    pub fn new(
        config: PlotConfig,
        dimension_configs: Vec<DimensionConfig>,
        columns: Vec<TableColumn>,
        dataset: Dataset,
    ) -> Self {
        let dimensions = build_dimensions(&dimension_configs, &dataset, &config);
        let layout = ScreenLayout::new(dimensions.len(), &config);
        let coordinator = BrushCoordinator::new(dataset.clone(), dimensions.len());
        let queue = RenderQueue::new(&config);
        let table = TableSync::new(columns, &config);

        let mut view = Self {
            config,
            dimension_configs,
            dataset,
            dimensions,
            layout,
            coordinator,
            queue,
            canvas: CanvasSurface::new(),
            table,
            last_diff: TableDiff::default(),
            drag: None,
            captured: None,
        };
        let effects = view.coordinator.initial_effects();
        view.apply(effects);
        view
    }

    /// Replace the dataset.
    ///
    /// Domains, scales and brushes are rebuilt from scratch; this is the only
    /// place they change after construction.
    pub fn reload(&mut self, dataset: Dataset) {
        self.queue.invalidate();
        self.dimensions = build_dimensions(&self.dimension_configs, &dataset, &self.config);
        self.layout = ScreenLayout::new(self.dimensions.len(), &self.config);
        self.coordinator = BrushCoordinator::new(dataset.clone(), self.dimensions.len());
        self.dataset = dataset;
        self.drag = None;
        self.captured = None;
        // Record ids restart at zero, so no old row can be kept
        self.table.clear();
        self.last_diff = TableDiff::default();

        let effects = self.coordinator.initial_effects();
        self.apply(effects);
    }

    /// Carry out the effects of a brush event
    pub fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StopPropagation { dimension } => {
                    trace!("Pointer captured by axis {}", dimension);
                    self.captured = Some(dimension);
                }
                Effect::Render { selection, profile } => {
                    let alpha = pass_alpha(selection.len(), profile.constant(&self.config));
                    let handle = self.queue.render(&mut self.canvas, selection.to_vec(), alpha);
                    self.coordinator.track_render(handle);
                }
                Effect::UpdateTable { selection } => {
                    self.last_diff = self.table.update(&self.dataset, &selection);
                }
            }
        }
    }

    pub fn handle_event(&mut self, event: BrushEvent) {
        let effects = self.coordinator.handle(event, &self.dimensions);
        self.apply(effects);
    }

    /// Run one render tick
    pub fn pump(&mut self, now: Instant) -> TickOutcome {
        let painter = PolylinePainter {
            dataset: &self.dataset,
            dimensions: &self.dimensions,
            layout: &self.layout,
            color_key: &self.config.color_key,
        };
        self.queue.tick(now, &mut self.canvas, &painter)
    }

    pub fn ui(&mut self, ui: &mut Ui) -> Response {
        let size = Vec2::from(self.config.outer_size());
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        let origin = plot_origin(rect.min, self.config.margin.left, self.config.margin.top);

        self.pump(Instant::now());

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, Rounding::ZERO, BACKGROUND);
        self.canvas.paint(&painter, origin);
        self.draw_axes(&painter, origin);
        self.draw_brushes(&painter, origin);

        let response = self.handle_pointer(response, origin);
        if self.queue.is_active() {
            ui.ctx().request_repaint_after(self.queue.interval());
        }
        response
    }

    fn draw_axes(&self, painter: &Painter, origin: Pos2) {
        let inner_height = self.config.inner_height();

        for (dim, &x) in self.dimensions.iter().zip(self.layout.positions()) {
            let x = origin.x + x as f32;

            painter.line_segment(
                [Pos2::new(x, origin.y), Pos2::new(x, origin.y + inner_height)],
                Stroke::new(1.0, AXIS_COLOR),
            );

            let title = if dim.description.is_empty() {
                &dim.key
            } else {
                &dim.description
            };
            painter.text(
                Pos2::new(x, origin.y - 9.0),
                Align2::CENTER_BOTTOM,
                title,
                FontId::proportional(12.0),
                AXIS_COLOR,
            );

            let axis = dim.axis_renderer();
            for tick in dim.scale.ticks(axis.tick_count) {
                let y = origin.y + tick.offset as f32;
                painter.line_segment([Pos2::new(x - 6.0, y), Pos2::new(x, y)], Stroke::new(1.0, AXIS_COLOR));

                let color = if axis.color_ticks {
                    category_color(Some(&tick.value))
                } else {
                    TICK_LABEL_COLOR
                };
                painter.text(
                    Pos2::new(x - 9.0, y),
                    Align2::RIGHT_CENTER,
                    axis.format(&tick.value),
                    FontId::proportional(10.0),
                    color,
                );
            }
        }
    }

    fn draw_brushes(&self, painter: &Painter, origin: Pos2) {
        let half = self.config.brush_handle_half_width;

        for active in self.coordinator.actives() {
            let Some(x) = self.layout.x_position_of(active.dimension) else {
                continue;
            };
            let x = origin.x + x as f32;
            let rect = Rect::from_min_max(
                Pos2::new(x - half, origin.y + active.extent.lo as f32),
                Pos2::new(x + half, origin.y + active.extent.hi as f32),
            );
            painter.rect_filled(rect, Rounding::ZERO, Color32::from_rgba_unmultiplied(119, 119, 119, 77));
            painter.rect_stroke(rect, Rounding::ZERO, Stroke::new(1.0, Color32::WHITE));
        }
    }

    fn handle_pointer(&mut self, response: Response, origin: Pos2) -> Response {
        let local = |pos: Pos2| ((pos.x - origin.x) as f64, (pos.y - origin.y) as f64);
        let tolerance = self.config.brush_half_width as f64;

        if response.drag_started() {
            // The press point, not where the drag threshold was crossed
            let press = response
                .ctx
                .input(|i| i.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos());
            if let Some((x, y)) = press.map(local) {
                self.begin_brush(x, y);
            }
        }

        if response.dragged() {
            if let Some((_, y)) = response.interact_pointer_pos().map(local) {
                self.drag_brush(y);
            }
        }

        if response.drag_released() {
            self.end_brush();
        }

        if response.clicked() {
            if let Some((x, _)) = response.interact_pointer_pos().map(local) {
                if let Some(dimension) = self.layout.axis_at(x, tolerance) {
                    debug!("Click on axis {} clears its brush", dimension);
                    self.handle_event(BrushEvent::Clear { dimension });
                }
            }
        }

        let mut clear_all = false;
        let response = response.context_menu(|ui| {
            if ui.button("Clear all brushes").clicked() {
                clear_all = true;
                ui.close_menu();
            }
        });
        if clear_all {
            self.handle_event(BrushEvent::ClearAll);
        }

        response
    }

    /// Start a brush at plot-local `(x, y)` if it lands on an axis
    pub fn begin_brush(&mut self, x: f64, y: f64) {
        let tolerance = self.config.brush_half_width as f64;
        let Some(dimension) = self.layout.axis_at(x, tolerance) else {
            return;
        };
        self.drag = Some(BrushDrag {
            dimension,
            anchor: y.clamp(0.0, self.config.inner_height() as f64),
            extent: None,
        });
        self.handle_event(BrushEvent::Start { dimension });
    }

    /// Stretch the brush in progress from its anchor to `y`
    pub fn drag_brush(&mut self, y: f64) {
        let inner_height = self.config.inner_height() as f64;
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        // Moves only reach the axis that captured the pointer
        if self.captured != Some(drag.dimension) {
            return;
        }
        let extent = BrushExtent::new(drag.anchor, y).clamp(0.0, inner_height);
        drag.extent = Some(extent);
        let dimension = drag.dimension;
        self.handle_event(BrushEvent::Move {
            dimension,
            extent: Some(extent),
        });
    }

    pub fn end_brush(&mut self) {
        if let Some(drag) = self.drag.take() {
            self.captured = None;
            self.handle_event(BrushEvent::End {
                dimension: drag.dimension,
                extent: drag.extent,
            });
        }
    }

    /// One-line summary of the selection and the pass in flight
    pub fn status(&self) -> String {
        let selected = self.coordinator.selection().len();
        let total = self.dataset.len();
        match self.queue.progress() {
            Some((drawn, pass_total)) => {
                format!("{} of {} records selected, drawing {}/{}", selected, total, drawn, pass_total)
            }
            None => format!("{} of {} records selected", selected, total),
        }
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn layout(&self) -> &ScreenLayout {
        &self.layout
    }

    pub fn coordinator(&self) -> &BrushCoordinator {
        &self.coordinator
    }

    pub fn table(&self) -> &TableSync {
        &self.table
    }

    /// Row changes made by the last table update
    pub fn last_diff(&self) -> &TableDiff {
        &self.last_diff
    }

    pub fn canvas(&self) -> &CanvasSurface {
        &self.canvas
    }

    pub fn is_rendering(&self) -> bool {
        self.queue.is_active()
    }
}
