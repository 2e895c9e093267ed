use log::{debug, info};

/// Coarse state of the whole game, the eel is only advanced
/// while `Playing`
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Phase {
    Menu,
    /// Play was pressed, the eel waits on its spawn cell
    WaitingStart { elapsed: f64 },
    Playing,
    GameOver { score: usize },
    /// The eel filled the grid, no food can be placed
    Won { score: usize },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Event {
    Play,
    /// Frame time passing
    Tick(f64),
    Crash { score: usize },
    GridFilled { score: usize },
    Restart,
}

impl Phase {
    /// None if `event` means nothing in this phase
    pub fn transition(self, event: Event, start_delay: f64) -> Option<Self> {
        use Event::*;
        use Phase::*;

        match (self, event) {
            (Menu, Play) => Some(WaitingStart { elapsed: 0. }),
            (WaitingStart { elapsed }, Tick(dt)) => {
                let elapsed = elapsed + dt.max(0.);
                if elapsed >= start_delay {
                    Some(Playing)
                } else {
                    Some(WaitingStart { elapsed })
                }
            }
            (Playing, Crash { score }) => Some(GameOver { score }),
            (Playing, GridFilled { score }) => Some(Won { score }),
            (GameOver { .. } | Won { .. }, Restart) => Some(Menu),
            (phase @ (Menu | Playing | GameOver { .. } | Won { .. }), Tick(_)) => Some(phase),
            _ => None,
        }
    }

    /// Apply `event` in place, invalid events are ignored.
    /// Returns whether the kind of phase changed.
    pub fn handle(&mut self, event: Event, start_delay: f64) -> bool {
        match self.transition(event, start_delay) {
            Some(next) => {
                let changed = std::mem::discriminant(self) != std::mem::discriminant(&next);
                if changed {
                    info!("phase {:?} -> {:?}", self, next);
                }
                *self = next;
                changed
            }
            None => {
                debug!("ignored {:?} in phase {:?}", event, self);
                false
            }
        }
    }

    /// The single gate between the game phase and the eel
    pub fn should_advance(&self) -> bool {
        matches!(self, Phase::Playing)
    }
}

#[test]
fn test_full_cycle() {
    let mut phase = Phase::Menu;
    assert!(!phase.should_advance());

    assert!(phase.handle(Event::Play, 2.));
    assert_eq!(phase, Phase::WaitingStart { elapsed: 0. });

    assert!(!phase.handle(Event::Tick(1.5), 2.));
    assert!(!phase.should_advance());
    assert!(phase.handle(Event::Tick(0.5), 2.));
    assert_eq!(phase, Phase::Playing);
    assert!(phase.should_advance());

    assert!(phase.handle(Event::Crash { score: 4 }, 2.));
    assert_eq!(phase, Phase::GameOver { score: 4 });
    assert!(!phase.should_advance());

    assert!(phase.handle(Event::Restart, 2.));
    assert_eq!(phase, Phase::Menu);
}

#[test]
fn test_invalid_events_ignored() {
    use Event::*;
    use Phase::*;

    let invalid = [
        (Menu, Restart),
        (Menu, Crash { score: 0 }),
        (WaitingStart { elapsed: 0. }, Play),
        (WaitingStart { elapsed: 0. }, Crash { score: 0 }),
        (Playing, Play),
        (Playing, Restart),
        (GameOver { score: 1 }, Play),
        (GameOver { score: 1 }, GridFilled { score: 1 }),
        (Menu, GridFilled { score: 0 }),
        (Won { score: 118 }, Crash { score: 118 }),
        (Won { score: 118 }, Play),
    ];
    for (phase, event) in invalid {
        assert_eq!(phase.transition(event, 2.), None, "{:?} {:?}", phase, event);
        let mut same = phase;
        assert!(!same.handle(event, 2.));
        assert_eq!(same, phase);
    }
}

#[test]
fn test_ticks_keep_other_phases() {
    for phase in [Phase::Menu, Phase::Playing, Phase::GameOver { score: 2 }, Phase::Won { score: 3 }] {
        assert_eq!(phase.transition(Event::Tick(10.), 2.), Some(phase));
    }
}

#[test]
fn test_filled_grid_is_won() {
    let mut phase = Phase::Playing;
    assert!(phase.handle(Event::GridFilled { score: 118 }, 2.));
    assert_eq!(phase, Phase::Won { score: 118 });
    assert!(!phase.should_advance());

    assert!(phase.handle(Event::Restart, 2.));
    assert_eq!(phase, Phase::Menu);
}
