pub use cell::Cell;
pub use dir::Dir;
pub use grid_pos::GridPos;
pub use point::Point;
pub use transformations::{to_pixel, Bounds};

mod cell;
mod dir;
mod grid_pos;
mod point;
pub mod transformations;

/// Number of cells along each side of the square lattice
pub const GRID_SIDE: i32 = 11;

/// Total number of cells on the lattice
pub const GRID_CELLS: usize = (GRID_SIDE * GRID_SIDE) as usize;

static_assertions::const_assert!(GRID_SIDE > 0);
