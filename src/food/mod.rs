use log::{info, warn};

use crate::basic::{Cell, GRID_CELLS};
pub use spawn::CellSampler;
use spawn::{occupied_indices, random_free_cell};

pub mod spawn;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Display, Error)]
pub enum FoodError {
    #[display(fmt = "no free cell left for food")]
    GridFull,
}

/// A single piece of food sitting on a lattice cell
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Food {
    cell: Cell,
}

impl Food {
    /// Rejected draws tolerated before picking a free cell directly
    pub const MAX_ATTEMPTS: usize = 1024;

    pub fn new(avoid: &[Cell], sampler: &mut impl CellSampler) -> Result<Self, FoodError> {
        let mut food = Self { cell: Cell { x: 0, y: 0 } };
        food.generate(avoid, sampler)?;
        Ok(food)
    }

    pub fn position(&self) -> Cell {
        self.cell
    }

    /// Move the food to a random cell not in `avoid`. On error the
    /// food stays where it was.
    pub fn generate(
        &mut self,
        avoid: &[Cell],
        sampler: &mut impl CellSampler,
    ) -> Result<Cell, FoodError> {
        let occupied = occupied_indices(avoid);
        if occupied.len() >= GRID_CELLS {
            return Err(FoodError::GridFull);
        }

        // rejection sampling, cheap as long as the grid is mostly empty
        for attempt in 0..Self::MAX_ATTEMPTS {
            let cell = sampler.sample_cell();
            if cell.in_grid() && !avoid.contains(&cell) {
                info!("food at {:?} after {} rejections", cell, attempt);
                self.cell = cell;
                return Ok(cell);
            }
        }

        warn!(
            "food placement rejected {} times ({} cells occupied), picking a free cell directly",
            Self::MAX_ATTEMPTS,
            occupied.len(),
        );
        let cell = random_free_cell(&occupied, sampler).ok_or(FoodError::GridFull)?;
        self.cell = cell;
        Ok(cell)
    }
}

#[cfg(test)]
struct Scripted {
    cells: Vec<Cell>,
    next: usize,
}

#[cfg(test)]
impl Scripted {
    fn new(cells: &[(i32, i32)]) -> Self {
        Self {
            cells: cells.iter().copied().map(Cell::from).collect(),
            next: 0,
        }
    }
}

// repeats the last cell once the script runs out
#[cfg(test)]
impl CellSampler for Scripted {
    fn sample_cell(&mut self) -> Cell {
        let cell = self.cells[self.next.min(self.cells.len() - 1)];
        self.next += 1;
        cell
    }

    fn sample_below(&mut self, _: usize) -> usize {
        0
    }
}

#[test]
fn test_generate_without_conflict() {
    let mut sampler = Scripted::new(&[(4, 6)]);
    let food = Food::new(&[], &mut sampler).unwrap();
    assert_eq!(food.position(), Cell { x: 4, y: 6 });
    assert_eq!(sampler.next, 1);
}

#[test]
fn test_generate_rejects_avoided_cells() {
    let mut sampler = Scripted::new(&[(0, 0), (3, 3), (3, 3), (5, 7)]);
    let mut food = Food::new(&[], &mut sampler).unwrap();

    let avoid = [Cell { x: 3, y: 3 }, Cell { x: 1, y: 1 }];
    assert_eq!(food.generate(&avoid, &mut sampler), Ok(Cell { x: 5, y: 7 }));
    assert_eq!(food.position(), Cell { x: 5, y: 7 });
    assert_eq!(sampler.next, 4);
}

#[test]
fn test_generate_grid_full() {
    let mut sampler = Scripted::new(&[(2, 2)]);
    let mut food = Food::new(&[], &mut sampler).unwrap();

    let every_cell: Vec<_> = (0..GRID_CELLS).map(Cell::from_index).collect();
    assert_eq!(food.generate(&every_cell, &mut sampler), Err(FoodError::GridFull));
    assert_eq!(food.position(), Cell { x: 2, y: 2 });
    // nothing was drawn
    assert_eq!(sampler.next, 1);
}

#[test]
fn test_generate_falls_back_to_last_free_cell() {
    let last = Cell { x: 10, y: 10 };
    let avoid: Vec<_> = (0..GRID_CELLS)
        .map(Cell::from_index)
        .filter(|&cell| cell != last)
        .collect();

    let mut sampler = Scripted::new(&[(0, 0)]);
    let mut food = Food { cell: Cell { x: 0, y: 0 } };
    assert_eq!(food.generate(&avoid, &mut sampler), Ok(last));
    assert_eq!(sampler.next, Food::MAX_ATTEMPTS);
}

#[test]
fn test_generate_random_never_hits_avoided() {
    use rand::{rngs::StdRng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(42);
    let avoid: Vec<_> = (0..60).map(Cell::from_index).collect();
    let mut food = Food::new(&avoid, &mut rng).unwrap();
    for _ in 0..200 {
        let cell = food.generate(&avoid, &mut rng).unwrap();
        assert!(cell.in_grid());
        assert!(!avoid.contains(&cell), "{:?}", cell);
        assert_eq!(cell, food.position());
    }
}
