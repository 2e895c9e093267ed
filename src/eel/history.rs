use std::collections::VecDeque;

use crate::basic::GridPos;

/// Positions of the head sampled at a fixed rate, oldest first.
/// When full, pushing a new sample drops the oldest one.
pub struct History {
    samples: VecDeque<GridPos>,
    capacity: usize,
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn push(&mut self, pos: GridPos) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(pos);
    }

    /// The sample taken `age` samples before the newest one
    /// (`age == 0` is the newest), None if history isn't that deep
    pub fn back(&self, age: usize) -> Option<GridPos> {
        let idx = self.samples.len().checked_sub(age + 1)?;
        self.samples.get(idx).copied()
    }

    /// Shrinking drops the oldest samples
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        let excess = self.samples.len().saturating_sub(self.capacity);
        drop(self.samples.drain(..excess));
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridPos> {
        self.samples.iter()
    }
}

#[cfg(test)]
fn pos(i: usize) -> GridPos {
    GridPos { x: i as f64, y: i as f64 }
}

#[test]
fn test_back_indexing() {
    let mut history = History::with_capacity(10);
    assert_eq!(history.back(0), None);
    (0..5).for_each(|i| history.push(pos(i)));

    assert_eq!(history.back(0), Some(pos(4)));
    assert_eq!(history.back(4), Some(pos(0)));
    assert_eq!(history.back(5), None);
}

#[test]
fn test_capacity_drops_oldest() {
    let mut history = History::with_capacity(3);
    (0..5).for_each(|i| history.push(pos(i)));

    assert_eq!(history.len(), 3);
    assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec![pos(2), pos(3), pos(4)]);
}

#[test]
fn test_shrink_keeps_newest() {
    let mut history = History::with_capacity(1000);
    (0..1000).for_each(|i| history.push(pos(i)));

    history.set_capacity(3 * 18 + 100);
    assert_eq!(history.len(), 154);
    assert_eq!(history.back(0), Some(pos(999)));
    assert_eq!(history.back(153), Some(pos(846)));

    history.set_capacity(2000);
    assert_eq!(history.len(), 154);
}
