use std::iter;

use itertools::Itertools;
use log::{debug, trace};
use static_assertions::assert_impl_all;

use crate::basic::{Cell, Dir, GridPos};
use crate::prefs::{Prefs, Timing};
use history::History;

pub mod history;

/// One trailing body segment
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Segment {
    /// Not enough history has accumulated yet, the segment
    /// is neither drawn nor collided with
    Hidden,
    Visible(GridPos),
}

impl Segment {
    pub fn pos(self) -> Option<GridPos> {
        match self {
            Segment::Hidden => None,
            Segment::Visible(pos) => Some(pos),
        }
    }
}

/// The player-controlled creature. Moves one cell per tick and is
/// drawn at a continuous position between the cell it left and the
/// cell it is heading to. The body trails the head by replaying the
/// head's sampled positions.
pub struct Eel {
    timing: Timing,
    spawn_cell: Cell,
    history_margin: usize,
    collision_tolerance: f64,

    /// Continuous position of the head
    pos: GridPos,
    /// Cell currently being moved towards, authoritative for bounds
    target: Cell,
    dir: Dir,
    /// Turn requested by the player, applied at the next tick
    /// unless it's a 180° turn
    pending_dir: Option<Dir>,

    /// Seconds into the current tick
    tick_timer: f64,
    /// Seconds since the last history sample
    sample_timer: f64,
    /// The eel sits on its spawn cell until the first tick
    first_move: bool,

    /// Head-adjacent segment first
    body: Vec<Segment>,
    history: History,

    initial_segments: usize,
    segments_introduced: usize,
}

assert_impl_all!(Eel: Send, Sync);

impl Eel {
    pub fn new(prefs: &Prefs) -> Self {
        let mut eel = Self {
            timing: prefs.timing,
            spawn_cell: prefs.spawn_cell,
            history_margin: prefs.history_margin,
            collision_tolerance: prefs.collision_tolerance,

            pos: prefs.spawn_cell.to_grid_pos(),
            target: prefs.spawn_cell,
            dir: Dir::DEFAULT,
            pending_dir: None,

            tick_timer: 0.,
            sample_timer: 0.,
            first_move: true,

            body: vec![],
            history: History::with_capacity(0),

            initial_segments: prefs.initial_segments,
            segments_introduced: 0,
        };
        eel.history.set_capacity(eel.history_capacity());
        eel
    }

    // enough for every segment plus the next one to be grown
    fn history_capacity(&self) -> usize {
        let stride = self.timing.stride();
        self.body.len() * stride + self.history_margin.max(stride + 1)
    }

    /// Advance the simulation by `elapsed` seconds, meant to be
    /// called exactly once per frame
    pub fn advance(&mut self, elapsed: f64) {
        // also maps NaN to 0
        let elapsed = elapsed.max(0.);
        self.tick_timer += elapsed;
        // no history while parked, those samples would all sit on the
        // spawn cell and the first segment would land on the head
        if !self.first_move {
            self.sample_timer += elapsed;
        }

        let stride = self.timing.stride();
        let sample_interval = self.timing.sample_interval();
        let mut sampled = false;
        while self.sample_timer >= sample_interval {
            self.sample_timer -= sample_interval;
            self.history.push(self.pos);
            sampled = true;
        }

        // staggered introduction of the initial segments
        if sampled
            && self.segments_introduced < self.initial_segments
            && self.history.len() >= (self.segments_introduced + 1) * stride
        {
            self.grow();
            self.segments_introduced += 1;
        }

        let tick_interval = self.timing.tick_interval();
        if self.tick_timer >= tick_interval {
            // carry the remainder to keep ticks evenly spaced
            self.tick_timer -= tick_interval;
            self.commit_tick();
        }

        self.update_segments();
        self.interpolate();
        self.history.set_capacity(self.history_capacity());
    }

    fn commit_tick(&mut self) {
        if self.first_move {
            // the first step is always taken in the default
            // direction, queued input applies from the next tick
            self.first_move = false;
            self.target = self.spawn_cell + self.dir;
        } else {
            match self.pending_dir {
                Some(dir) if dir.is_reverse_of(self.dir) => {
                    debug!("rejected 180° turn {:?} -> {:?}", self.dir, dir);
                }
                Some(dir) => {
                    self.dir = dir;
                    self.pending_dir = None;
                }
                None => {}
            }
            self.target = self.target + self.dir;
        }
        debug!("tick: heading to {:?} going {:?}", self.target, self.dir);
    }

    fn update_segments(&mut self) {
        let stride = self.timing.stride();
        for (i, segment) in self.body.iter_mut().enumerate() {
            if let Some(pos) = self.history.back((i + 1) * stride) {
                *segment = Segment::Visible(pos);
            }
        }
    }

    fn interpolate(&mut self) {
        if self.first_move {
            self.pos = self.spawn_cell.to_grid_pos();
            return;
        }

        let progress = (self.tick_timer / self.timing.tick_interval()).clamp(0., 1.);
        let start = self.target + -self.dir;
        self.pos = start.to_grid_pos().lerp(self.target.to_grid_pos(), progress);
    }

    /// Append a segment at the tail. It stays hidden until the
    /// history reaches back far enough to place it.
    pub fn grow(&mut self) {
        // same age `update_segments` will use for this index
        let age = (self.body.len() + 1) * self.timing.stride();
        let segment = match self.history.back(age) {
            Some(pos) => Segment::Visible(pos),
            None => Segment::Hidden,
        };
        trace!("grow segment {}: {:?}", self.body.len(), segment);
        self.body.push(segment);
        self.history.set_capacity(self.history_capacity());
    }

    /// Queue a turn, overwriting any previously queued one.
    /// Validity is only checked when the next tick commits.
    pub fn set_pending_direction(&mut self, dir: Dir) {
        self.pending_dir = Some(dir);
    }

    /// Start moving: the first step goes in `Dir::DEFAULT`, then the
    /// eel turns to `dir` (unless that would be a 180° turn).
    /// Does nothing once the eel has moved.
    pub fn begin(&mut self, dir: Dir) {
        if self.first_move {
            self.dir = Dir::DEFAULT;
            self.pending_dir = Some(dir);
        }
    }

    /// Switch speed, the stride is recomputed along with it so
    /// segment spacing stays one cell
    pub fn set_timing(&mut self, timing: Timing) {
        debug!(
            "timing change: stride {} -> {}",
            self.timing.stride(),
            timing.stride()
        );
        self.timing = timing;
        self.history.set_capacity(self.history_capacity());
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Cell the head is currently closest to
    pub fn head_cell(&self) -> Cell {
        self.pos.round()
    }

    pub fn pos(&self) -> GridPos {
        self.pos
    }

    pub fn target_cell(&self) -> Cell {
        self.target
    }

    pub fn dir(&self) -> Dir {
        self.dir
    }

    pub fn pending_dir(&self) -> Option<Dir> {
        self.pending_dir
    }

    pub fn has_moved(&self) -> bool {
        !self.first_move
    }

    pub fn body(&self) -> &[Segment] {
        &self.body
    }

    pub fn visible_segments(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.body.iter().filter_map(|segment| segment.pos())
    }

    pub fn segment_count(&self) -> usize {
        self.body.len()
    }

    /// Segments beyond the initial staggered ones
    pub fn score(&self) -> usize {
        self.body.len().saturating_sub(self.segments_introduced)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Cells covered by the head and every visible segment, no duplicates
    pub fn occupied_cells(&self) -> Vec<Cell> {
        iter::once(self.head_cell())
            .chain(self.visible_segments().map(GridPos::round))
            .unique()
            .collect()
    }

    /// Checked against the target cell, so leaving the grid is
    /// detected on the tick that commits the move
    pub fn is_out_of_bounds(&self) -> bool {
        !self.target.in_grid()
    }

    /// Only checked while the head is (almost) exactly on a
    /// lattice point, in transit it may round onto a segment
    /// it will never actually reach
    pub fn self_collides(&self) -> bool {
        if !self.pos.near_lattice_point(self.collision_tolerance) {
            return false;
        }
        let head = self.head_cell();
        self.visible_segments().any(|pos| pos.round() == head)
    }
}

#[cfg(test)]
fn moving_eel(target: (i32, i32), dir: Dir) -> Eel {
    let mut eel = Eel::new(&Prefs::default());
    eel.first_move = false;
    eel.target = target.into();
    eel.dir = dir;
    eel.interpolate();
    eel
}

#[cfg(test)]
fn fill_history(eel: &mut Eel, samples: usize) {
    (0..samples).for_each(|i| eel.history.push(GridPos { x: i as f64, y: 0. }));
}

#[test]
fn test_new_eel_parked_on_spawn() {
    let eel = Eel::new(&Prefs::default());
    assert_eq!(eel.pos(), GridPos { x: 5., y: 5. });
    assert_eq!(eel.target_cell(), Cell { x: 5, y: 5 });
    assert_eq!(eel.dir(), Dir::R);
    assert_eq!(eel.pending_dir(), None);
    assert!(!eel.has_moved());
    assert!(eel.body().is_empty());
    assert!(eel.history().is_empty());
}

#[test]
fn test_no_reversal() {
    for dir in Dir::iter() {
        let mut eel = moving_eel((5, 5), dir);
        eel.set_pending_direction(-dir);
        eel.advance(0.3);
        assert_eq!(eel.dir(), dir);
        assert_eq!(eel.target_cell(), Cell { x: 5, y: 5 } + dir);

        eel.advance(0.3);
        assert_eq!(eel.dir(), dir);
    }
}

#[test]
fn test_turn_applies_on_tick_boundary() {
    let mut eel = moving_eel((5, 5), Dir::R);
    eel.set_pending_direction(Dir::D);
    eel.advance(0.1);
    assert_eq!(eel.dir(), Dir::R);

    eel.advance(0.2);
    assert_eq!(eel.dir(), Dir::D);
    assert_eq!(eel.pending_dir(), None);
    assert_eq!(eel.target_cell(), Cell { x: 5, y: 6 });
}

#[test]
fn test_last_queued_direction_wins() {
    let mut eel = moving_eel((5, 5), Dir::R);
    eel.set_pending_direction(Dir::U);
    eel.set_pending_direction(Dir::L);
    eel.set_pending_direction(Dir::D);
    eel.advance(0.3);
    assert_eq!(eel.dir(), Dir::D);
}

#[test]
fn test_bounds_boundary() {
    let mut eel = moving_eel((10, 5), Dir::R);
    assert!(!eel.is_out_of_bounds());

    eel.advance(0.1);
    assert!(!eel.is_out_of_bounds());

    eel.advance(0.2);
    assert_eq!(eel.target_cell(), Cell { x: 11, y: 5 });
    assert!(eel.is_out_of_bounds());
}

#[test]
fn test_bounds_all_sides() {
    for (target, dir) in [((0, 5), Dir::L), ((5, 0), Dir::U), ((5, 10), Dir::D)] {
        let mut eel = moving_eel(target, dir);
        assert!(!eel.is_out_of_bounds());
        eel.advance(0.3);
        assert!(eel.is_out_of_bounds(), "{:?} {:?}", target, dir);
    }
}

#[test]
fn test_head_cell_idempotent() {
    let mut eel = moving_eel((5, 3), Dir::R);
    eel.pos = GridPos { x: 5.7, y: 3.2 };
    assert_eq!(eel.head_cell(), Cell { x: 6, y: 3 });
    assert_eq!(eel.head_cell(), eel.head_cell());
}

#[test]
fn test_collision_tolerance() {
    let mut eel = moving_eel((5, 5), Dir::R);
    eel.body = vec![
        Segment::Visible(GridPos { x: 5., y: 5. }),
        Segment::Visible(GridPos { x: 4., y: 5. }),
    ];

    eel.pos = GridPos { x: 5., y: 5. };
    assert!(eel.self_collides());

    eel.pos = GridPos { x: 5.5, y: 5. };
    assert_eq!(eel.head_cell(), Cell { x: 6, y: 5 });
    assert!(!eel.self_collides());

    eel.pos = GridPos { x: 4.6, y: 5. };
    assert_eq!(eel.head_cell(), Cell { x: 5, y: 5 });
    assert!(!eel.self_collides());

    eel.pos = GridPos { x: 4.95, y: 5.02 };
    assert!(eel.self_collides());
}

#[test]
fn test_no_collision_without_overlap() {
    let mut eel = moving_eel((5, 5), Dir::R);
    assert!(!eel.self_collides());

    eel.body = vec![
        Segment::Visible(GridPos { x: 3., y: 3. }),
        Segment::Visible(GridPos { x: 2., y: 3. }),
        Segment::Hidden,
    ];
    assert!(!eel.self_collides());
}

#[test]
fn test_hidden_segments_never_collide() {
    let mut eel = moving_eel((5, 5), Dir::R);
    eel.body = vec![Segment::Hidden, Segment::Hidden];
    assert!(!eel.self_collides());
}

#[test]
fn test_growth_gating() {
    let mut eel = Eel::new(&Prefs::default());
    assert_eq!(eel.timing().stride(), 18);
    fill_history(&mut eel, 18);
    eel.grow();
    assert_eq!(eel.body(), &[Segment::Hidden]);

    let mut eel = Eel::new(&Prefs::default());
    fill_history(&mut eel, 36);
    eel.grow();
    assert_eq!(eel.body(), &[Segment::Visible(GridPos { x: 17., y: 0. })]);
    // the next segment reaches a full stride further back
    eel.grow();
    assert_eq!(eel.body()[1], Segment::Hidden);

    let mut eel = Eel::new(&Prefs::default());
    fill_history(&mut eel, 37);
    eel.grow();
    eel.grow();
    assert_eq!(eel.body()[1], Segment::Visible(GridPos { x: 0., y: 0. }));
}

#[test]
fn test_hidden_segment_appears_once_history_allows() {
    let mut eel = Eel::new(&Prefs::default());
    fill_history(&mut eel, 18);
    eel.grow();
    assert_eq!(eel.body()[0], Segment::Hidden);

    eel.history.push(GridPos { x: 18., y: 0. });
    eel.update_segments();
    assert_eq!(eel.body()[0], Segment::Visible(GridPos { x: 0., y: 0. }));
}

#[test]
fn test_first_move_end_to_end() {
    let mut eel = Eel::new(&Prefs::default());

    eel.advance(0.1);
    assert_eq!(eel.pos(), GridPos { x: 5., y: 5. });
    assert_eq!(eel.target_cell(), Cell { x: 5, y: 5 });

    let mut eel = Eel::new(&Prefs::default());
    eel.advance(0.3);
    assert!(eel.has_moved());
    assert_eq!(eel.target_cell(), Cell { x: 6, y: 5 });
    assert_eq!(eel.pos(), GridPos { x: 5., y: 5. });

    eel.advance(0.15);
    assert_eq!(eel.pos(), GridPos { x: 5.5, y: 5. });
    assert_eq!(eel.target_cell(), Cell { x: 6, y: 5 });

    eel.advance(0.15);
    assert_eq!(eel.target_cell(), Cell { x: 7, y: 5 });
    assert_eq!(eel.pos(), GridPos { x: 6., y: 5. });
}

#[test]
fn test_long_frame_clamps_progress() {
    let mut eel = moving_eel((5, 5), Dir::R);
    eel.advance(0.7);
    assert_eq!(eel.target_cell(), Cell { x: 6, y: 5 });
    assert_eq!(eel.pos(), GridPos { x: 6., y: 5. });

    // one tick per frame, the rest is carried over
    eel.advance(0.);
    assert_eq!(eel.target_cell(), Cell { x: 7, y: 5 });
    assert!(eel.pos().x > 6. && eel.pos().x < 7.);
}

#[test]
fn test_negative_elapsed_ignored() {
    let mut eel = moving_eel((5, 5), Dir::R);
    let before = eel.pos();
    eel.advance(-1.);
    eel.advance(f64::NAN);
    assert_eq!(eel.pos(), before);
    assert!(eel.history().is_empty());
}

#[test]
fn test_begin_first_step_is_default() {
    let mut eel = Eel::new(&Prefs::default());
    eel.begin(Dir::U);
    assert_eq!(eel.pending_dir(), Some(Dir::U));

    eel.advance(0.3);
    assert_eq!(eel.target_cell(), Cell { x: 6, y: 5 });
    assert_eq!(eel.dir(), Dir::R);

    eel.advance(0.3);
    assert_eq!(eel.dir(), Dir::U);
    assert_eq!(eel.target_cell(), Cell { x: 6, y: 4 });
}

#[test]
fn test_begin_reverse_of_default_rejected() {
    let mut eel = Eel::new(&Prefs::default());
    eel.begin(Dir::L);
    eel.advance(0.3);
    eel.advance(0.3);
    assert_eq!(eel.dir(), Dir::R);
    assert_eq!(eel.target_cell(), Cell { x: 7, y: 5 });
}

#[test]
fn test_begin_after_moving_is_ignored() {
    let mut eel = Eel::new(&Prefs::default());
    eel.advance(0.3);
    eel.begin(Dir::U);
    assert_eq!(eel.pending_dir(), None);
}

#[test]
fn test_staggered_initial_segments() {
    let mut eel = Eel::new(&Prefs::default());
    for frame in 0..90 {
        eel.advance(1. / 60.);
        assert!(!eel.self_collides(), "frame {}: {:?} {:?}", frame, eel.pos(), eel.body());
    }

    assert_eq!(eel.segment_count(), 3);
    assert_eq!(eel.score(), 0);
    assert!(eel.body().iter().all(|segment| matches!(segment, Segment::Visible(_))));

    let head = eel.pos();
    let first = eel.body()[0].pos().unwrap();
    assert_eq!(first.y, 5.);
    assert!(first.x < head.x && first.x > head.x - 1.2, "{:?} {:?}", first, head);
    assert!(!eel.self_collides());
    assert!(!eel.is_out_of_bounds());
}

#[test]
fn test_no_history_while_parked() {
    let mut eel = Eel::new(&Prefs::default());
    for _ in 0..17 {
        eel.advance(1. / 60.);
    }
    assert!(!eel.has_moved());
    assert!(eel.history().is_empty());
    assert!(eel.body().is_empty());
}

#[test]
fn test_straight_run_never_self_collides() {
    for fps in [30., 59.94, 60., 75., 120., 144.] {
        let mut eel = Eel::new(&Prefs::default());
        let mut frames = 0;
        while !eel.is_out_of_bounds() {
            eel.advance(1. / fps);
            assert!(
                !eel.self_collides(),
                "{} fps, frame {}: {:?} {:?}",
                fps,
                frames,
                eel.pos(),
                eel.body()
            );
            frames += 1;
            assert!(frames < fps as usize * 10, "{} fps: never left the grid", fps);
        }
        assert_eq!(eel.target_cell(), Cell { x: 11, y: 5 });
        assert_eq!(eel.segment_count(), 3);
    }
}

#[test]
fn test_history_stays_bounded() {
    let mut eel = moving_eel((0, 0), Dir::D);
    for _ in 0..3 {
        eel.grow();
    }
    for _ in 0..1000 {
        eel.advance(1. / 60.);
    }
    // three grown by hand plus the three initial ones
    assert_eq!(eel.segment_count(), 6);
    assert!(eel.history().len() <= 6 * 18 + 100);
}

#[test]
fn test_set_timing_restrides_segments() {
    let mut eel = moving_eel((5, 5), Dir::R);
    fill_history(&mut eel, 30);
    eel.body = vec![Segment::Hidden, Segment::Hidden];

    eel.set_timing(Timing::new(0.2, 60.).unwrap());
    eel.advance(0.);
    assert_eq!(eel.body()[0], Segment::Visible(GridPos { x: 17., y: 0. }));
    assert_eq!(eel.body()[1], Segment::Visible(GridPos { x: 5., y: 0. }));
}

#[test]
fn test_occupied_cells() {
    let mut eel = moving_eel((5, 5), Dir::R);
    eel.body = vec![
        Segment::Visible(GridPos { x: 4., y: 5. }),
        Segment::Visible(GridPos { x: 4.02, y: 5. }),
        Segment::Hidden,
    ];
    eel.pos = GridPos { x: 5., y: 5. };
    assert_eq!(eel.occupied_cells(), vec![Cell { x: 5, y: 5 }, Cell { x: 4, y: 5 }]);
}
