//! Plot view implementations

pub mod parallel_coordinates;

pub use parallel_coordinates::ParallelCoordinatesView;
