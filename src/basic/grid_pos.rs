use crate::basic::Cell;

/// A continuous position on the lattice, measured in cells
#[derive(Copy, Clone, Debug, PartialEq, Add, AddAssign, Sub, SubAssign, Mul)]
pub struct GridPos {
    pub x: f64,
    pub y: f64,
}

impl GridPos {
    /// Nearest cell, halfway points round away from zero
    pub fn round(self) -> Cell {
        Cell {
            x: self.x.round() as i32,
            y: self.y.round() as i32,
        }
    }

    /// Whether both coordinates are within `tolerance` of an integer
    pub fn near_lattice_point(self, tolerance: f64) -> bool {
        (self.x - self.x.round()).abs() < tolerance && (self.y - self.y.round()).abs() < tolerance
    }

    /// Linear blend, `t` is not clamped
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl From<(f64, f64)> for GridPos {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<GridPos> for (f64, f64) {
    fn from(GridPos { x, y }: GridPos) -> Self {
        (x, y)
    }
}

#[test]
fn test_round() {
    [
        ((5.7, 3.2), (6, 3)),
        ((5.0, 5.0), (5, 5)),
        ((5.5, 5.0), (6, 5)),
        ((-0.4, 10.4), (0, 10)),
    ]
    .iter()
    .for_each(|&(pos, cell)| {
        assert_eq!(GridPos::from(pos).round(), Cell::from(cell), "{:?}", pos);
    });
}

#[test]
fn test_near_lattice_point() {
    assert!(GridPos::from((5.0, 5.0)).near_lattice_point(0.1));
    assert!(GridPos::from((4.95, 5.05)).near_lattice_point(0.1));
    assert!(!GridPos::from((5.5, 5.0)).near_lattice_point(0.1));
    assert!(!GridPos::from((5.0, 4.8)).near_lattice_point(0.1));
}
