use log::info;

use crate::basic::Dir;
use crate::eel::Eel;
use crate::food::{CellSampler, Food, FoodError};
use crate::prefs::{Prefs, Timing};

/// What happened during one frame of a round
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Continue,
    /// The eel ate and grew, the food moved elsewhere
    Ate,
    OutOfBounds,
    SelfCollision,
    /// The eel ate but there is nowhere left to put food
    GridFull,
}

impl Outcome {
    /// The round ended, either way
    pub fn is_over(self) -> bool {
        self.is_crash() || self.is_win()
    }

    pub fn is_crash(self) -> bool {
        matches!(self, Outcome::OutOfBounds | Outcome::SelfCollision)
    }

    /// Filling the grid is the only way to win
    pub fn is_win(self) -> bool {
        self == Outcome::GridFull
    }
}

/// One eel and one piece of food, from spawning to crashing.
/// Restarting means building a new `Round`.
pub struct Round<S> {
    eel: Eel,
    food: Food,
    sampler: S,
}

impl<S: CellSampler> Round<S> {
    pub fn new(prefs: &Prefs, mut sampler: S) -> Result<Self, FoodError> {
        let eel = Eel::new(prefs);
        let food = Food::new(&eel.occupied_cells(), &mut sampler)?;
        Ok(Self { eel, food, sampler })
    }

    pub fn eel(&self) -> &Eel {
        &self.eel
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> usize {
        self.eel.score()
    }

    pub fn set_direction(&mut self, dir: Dir) {
        self.eel.set_pending_direction(dir)
    }

    pub fn begin(&mut self, dir: Dir) {
        self.eel.begin(dir)
    }

    pub fn set_timing(&mut self, timing: Timing) {
        self.eel.set_timing(timing)
    }

    /// Advance the eel and resolve collisions, bounds first,
    /// then the eel's own body, then food
    pub fn update(&mut self, elapsed: f64) -> Outcome {
        self.eel.advance(elapsed);

        if self.eel.is_out_of_bounds() {
            info!("out of bounds at {:?}, score {}", self.eel.target_cell(), self.score());
            return Outcome::OutOfBounds;
        }

        if self.eel.self_collides() {
            info!("self collision at {:?}, score {}", self.eel.head_cell(), self.score());
            return Outcome::SelfCollision;
        }

        if self.eel.head_cell() == self.food.position() {
            self.eel.grow();
            let avoid = self.eel.occupied_cells();
            return match self.food.generate(&avoid, &mut self.sampler) {
                Ok(_) => Outcome::Ate,
                Err(FoodError::GridFull) => Outcome::GridFull,
            };
        }

        Outcome::Continue
    }
}

#[cfg(test)]
struct Always(crate::basic::Cell);

#[cfg(test)]
impl CellSampler for Always {
    fn sample_cell(&mut self) -> crate::basic::Cell {
        self.0
    }

    fn sample_below(&mut self, _: usize) -> usize {
        0
    }
}

#[cfg(test)]
fn seeded_round(seed: u64) -> Round<rand::rngs::StdRng> {
    use rand::SeedableRng;
    Round::new(&Prefs::default(), rand::rngs::StdRng::seed_from_u64(seed)).unwrap()
}

#[test]
fn test_outcome_is_over() {
    assert!(!Outcome::Continue.is_over());
    assert!(!Outcome::Ate.is_over());
    assert!(Outcome::OutOfBounds.is_over());
    assert!(Outcome::SelfCollision.is_over());
    assert!(Outcome::GridFull.is_over());

    assert!(Outcome::OutOfBounds.is_crash());
    assert!(Outcome::SelfCollision.is_crash());
    assert!(!Outcome::GridFull.is_crash());
    assert!(Outcome::GridFull.is_win());
    assert!(!Outcome::SelfCollision.is_win());
    assert!(!Outcome::Ate.is_win());
}

#[test]
fn test_initial_food_avoids_eel() {
    for seed in 0..50 {
        let round = seeded_round(seed);
        assert_ne!(round.food().position(), round.eel().head_cell());
    }
}

#[test]
fn test_runs_off_the_grid() {
    use crate::basic::Cell;

    let mut round = seeded_round(1);
    // park the food where the eel never goes
    round.food = Food::new(&[], &mut Always(Cell { x: 0, y: 0 })).unwrap();

    let mut outcome = Outcome::Continue;
    let mut frames = 0;
    while !outcome.is_over() {
        outcome = round.update(1. / 60.);
        frames += 1;
        assert!(frames < 60 * 10, "never left the grid");
    }
    assert_eq!(outcome, Outcome::OutOfBounds);
    assert_eq!(round.eel().target_cell(), Cell { x: 11, y: 5 });
}

#[test]
fn test_eating_grows_and_moves_food() {
    use crate::basic::Cell;

    let mut round = seeded_round(3);
    let ahead = Cell { x: 7, y: 5 };
    round.food = Food::new(&[], &mut Always(ahead)).unwrap();
    assert_eq!(round.score(), 0);

    let mut ate = false;
    for _ in 0..60 {
        match round.update(1. / 60.) {
            Outcome::Ate => {
                ate = true;
                break;
            }
            outcome => assert_eq!(outcome, Outcome::Continue),
        }
    }
    assert!(ate);
    assert_eq!(round.eel().head_cell(), ahead);
    assert_eq!(round.score(), 1);
    assert_ne!(round.food().position(), ahead);
    assert!(!round.eel().occupied_cells().contains(&round.food().position()));
}

#[test]
fn test_speed_change_mid_round() {
    use crate::basic::Cell;
    use crate::prefs::Speed;

    let mut round = seeded_round(5);
    round.food = Food::new(&[], &mut Always(Cell { x: 0, y: 0 })).unwrap();

    for _ in 0..60 {
        assert_eq!(round.update(1. / 60.), Outcome::Continue);
    }
    round.set_timing(Speed::Fast.timing(60.).unwrap());
    assert_eq!(round.eel().timing().stride(), 12);

    let mut outcome = Outcome::Continue;
    let mut frames = 0;
    while !outcome.is_over() {
        outcome = round.update(1. / 60.);
        frames += 1;
        assert!(frames < 60 * 10, "never left the grid");
    }
    assert_eq!(outcome, Outcome::OutOfBounds);
}
