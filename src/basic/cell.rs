use std::fmt::{Debug, Error, Formatter};
use std::ops::Add;

use crate::basic::{Dir, GridPos, GRID_SIDE};

/// A discrete lattice cell, `(0, 0)` is the top left corner
#[derive(Eq, PartialEq, Copy, Clone, Hash, Add, Sub, Neg)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn in_grid(self) -> bool {
        (0..GRID_SIDE).contains(&self.x) && (0..GRID_SIDE).contains(&self.y)
    }

    /// Row-major index, only meaningful for cells inside the grid
    pub fn index(self) -> usize {
        (self.y * GRID_SIDE + self.x) as usize
    }

    pub fn from_index(idx: usize) -> Self {
        let idx = idx as i32;
        Self { x: idx % GRID_SIDE, y: idx / GRID_SIDE }
    }

    pub fn to_grid_pos(self) -> GridPos {
        GridPos { x: self.x as f64, y: self.y as f64 }
    }
}

impl Add<Dir> for Cell {
    type Output = Self;

    fn add(self, dir: Dir) -> Self::Output {
        self + dir.delta()
    }
}

impl Debug for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "<{}, {}>", self.x, self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Cell> for (i32, i32) {
    fn from(Cell { x, y }: Cell) -> Self {
        (x, y)
    }
}

#[test]
fn test_in_grid() {
    [
        ((0, 0), true),
        ((10, 10), true),
        ((10, 5), true),
        ((11, 5), false),
        ((-1, 5), false),
        ((5, -1), false),
        ((5, 11), false),
    ]
    .iter()
    .for_each(|&(cell, inside)| {
        assert_eq!(Cell::from(cell).in_grid(), inside, "{:?}", cell);
    });
}

#[test]
fn test_index_round_trip_corners() {
    for cell in [(0, 0), (10, 0), (0, 10), (10, 10), (3, 7)] {
        let cell = Cell::from(cell);
        assert_eq!(Cell::from_index(cell.index()), cell);
    }
}
