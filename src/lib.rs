//! Bloxorz Solver Library
//!
//! Rolls a 1x1x2 brick across a tile map until it stands upright on the target
//! tile, using breadth-first, depth-first, uniform-cost, greedy best-first or A*
//! search.

pub mod brick;
pub mod config;
pub mod grid;
pub mod heuristic;
pub mod level;
pub mod render;
pub mod solver;
mod tree;

pub use brick::{BrickState, Coord, Direction, DirectionOrder, Orientation};
pub use config::{ConfigError, SearchConfig, Strategy};
pub use grid::{Grid, Tile};
pub use heuristic::{CostTable, Heuristic};
pub use level::Level;
pub use solver::{solve, solve_with, Outcome, SearchReport, Step};
