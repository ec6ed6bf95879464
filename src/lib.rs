//! **mazegen** generates perfect mazes with a recursive backtracker and renders them to image files.
#![recursion_limit = "1024"]

pub mod analysis;
pub mod cells;
pub mod engine;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod limits;
pub mod renderers;
pub mod units;
