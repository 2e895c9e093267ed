use std::ops::Neg;

use crate::basic::Cell;
use Dir::*;

// screen coordinates, y grows downwards
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Dir {
    U,
    D,
    L,
    R,
}

impl Neg for Dir {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            U => D,
            D => U,
            L => R,
            R => L,
        }
    }
}

impl Dir {
    /// The direction every eel takes on its first step
    pub const DEFAULT: Self = R;

    pub fn iter() -> impl Iterator<Item = Self> {
        [U, R, D, L].iter().copied()
    }

    /// Unit vector on the lattice
    pub fn delta(self) -> Cell {
        match self {
            U => Cell { x: 0, y: -1 },
            D => Cell { x: 0, y: 1 },
            L => Cell { x: -1, y: 0 },
            R => Cell { x: 1, y: 0 },
        }
    }

    pub fn is_reverse_of(self, other: Self) -> bool {
        self == -other
    }
}

#[test]
fn test_dir_reversal() {
    for dir in Dir::iter() {
        assert_eq!(-(-dir), dir);
        assert!(dir.is_reverse_of(-dir));
        assert!(!dir.is_reverse_of(dir));
        assert_eq!(dir.delta() + (-dir).delta(), Cell { x: 0, y: 0 });
    }
}

#[test]
fn test_dir_deltas_are_unit() {
    for dir in Dir::iter() {
        let Cell { x, y } = dir.delta();
        assert_eq!(x.abs() + y.abs(), 1, "{:?}", dir);
    }
}
