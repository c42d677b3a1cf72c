//! Views for the parallel-coordinates visualizer
//!
//! The brush coordinator and table sync hold the interactive state; the
//! plot view wires them to egui input, the render queue and the retained
//! canvas.

pub mod brush;
pub mod canvas;
pub mod plots;
pub mod tables;

pub use brush::{BrushCoordinator, BrushState, Effect};
pub use canvas::CanvasSurface;
pub use plots::ParallelCoordinatesView;
pub use tables::{CellClass, SummaryTableView, TableColumn, TableDiff, TableRow, TableSync};
