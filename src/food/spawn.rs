use rand::Rng;

use crate::basic::{Cell, GRID_CELLS, GRID_SIDE};

/// Source of candidate cells for food placement
pub trait CellSampler {
    /// Any cell of the grid, uniformly
    fn sample_cell(&mut self) -> Cell;

    /// Uniform in `0..n`, `n > 0`
    fn sample_below(&mut self, n: usize) -> usize;
}

impl<R: Rng + ?Sized> CellSampler for R {
    fn sample_cell(&mut self) -> Cell {
        Cell {
            x: self.gen_range(0..GRID_SIDE),
            y: self.gen_range(0..GRID_SIDE),
        }
    }

    fn sample_below(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }
}

/// Sorted, deduplicated row-major indices of the cells in `cells`
/// that lie inside the grid
pub fn occupied_indices(cells: &[Cell]) -> Vec<usize> {
    let mut occupied: Vec<_> = cells
        .iter()
        .filter(|cell| cell.in_grid())
        .map(|cell| cell.index())
        .collect();
    occupied.sort_unstable();
    occupied.dedup();
    occupied
}

/// Pick a free cell directly by index, None if the grid is full
pub fn random_free_cell(occupied: &[usize], sampler: &mut impl CellSampler) -> Option<Cell> {
    let free_cells = GRID_CELLS - occupied.len();
    if free_cells == 0 {
        return None;
    }

    // skip over every occupied index at or below the chosen one
    let mut new_idx = sampler.sample_below(free_cells);
    for &idx in occupied {
        if idx <= new_idx {
            new_idx += 1;
        }
    }

    debug_assert!(new_idx < GRID_CELLS);
    Some(Cell::from_index(new_idx))
}

#[test]
fn test_occupied_indices_ignores_outside_and_duplicates() {
    let cells = [
        Cell { x: 1, y: 0 },
        Cell { x: 0, y: 0 },
        Cell { x: 1, y: 0 },
        Cell { x: -10, y: -10 },
        Cell { x: 11, y: 3 },
    ];
    assert_eq!(occupied_indices(&cells), vec![0, 1]);
}

#[test]
fn test_random_free_cell_never_occupied() {
    use rand::{rngs::StdRng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(7);
    // every other cell taken
    let occupied: Vec<_> = (0..GRID_CELLS).step_by(2).collect();
    for _ in 0..500 {
        let cell = random_free_cell(&occupied, &mut rng).unwrap();
        assert!(cell.in_grid());
        assert_eq!(cell.index() % 2, 1, "{:?}", cell);
    }
}

#[test]
fn test_random_free_cell_full_grid() {
    use rand::{rngs::StdRng, SeedableRng};

    let occupied: Vec<_> = (0..GRID_CELLS).collect();
    assert_eq!(random_free_cell(&occupied, &mut StdRng::seed_from_u64(0)), None);
}
