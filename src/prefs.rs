use crate::basic::Cell;

#[derive(Copy, Clone, Debug, PartialEq, Display, Error)]
pub enum ConfigError {
    #[display(fmt = "tick interval must be positive and finite, got {}", secs)]
    InvalidTickInterval { secs: f64 },
    #[display(fmt = "sample rate must be positive and finite, got {}", hz)]
    InvalidSampleRate { hz: f64 },
    #[display(
        fmt = "tick interval {}s at {} samples/s gives a stride below one sample per cell",
        tick_interval,
        sample_rate
    )]
    StrideTooSmall { tick_interval: f64, sample_rate: f64 },
}

/// Movement timing, `stride` is derived and always consistent
/// with the other two fields
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Timing {
    tick_interval: f64,
    sample_rate: f64,
    stride: usize,
}

impl Timing {
    pub fn new(tick_interval: f64, sample_rate: f64) -> Result<Self, ConfigError> {
        if !tick_interval.is_finite() || tick_interval <= 0. {
            return Err(ConfigError::InvalidTickInterval { secs: tick_interval });
        }
        if !sample_rate.is_finite() || sample_rate <= 0. {
            return Err(ConfigError::InvalidSampleRate { hz: sample_rate });
        }

        let stride = (tick_interval * sample_rate).round();
        if stride < 1. {
            return Err(ConfigError::StrideTooSmall { tick_interval, sample_rate });
        }

        Ok(Self {
            tick_interval,
            sample_rate,
            stride: stride as usize,
        })
    }

    /// Seconds per lattice step
    pub fn tick_interval(&self) -> f64 {
        self.tick_interval
    }

    /// History samples per second
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn sample_interval(&self) -> f64 {
        1. / self.sample_rate
    }

    /// History samples spanning exactly one cell of travel
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Same sample rate, different speed
    pub fn with_tick_interval(&self, tick_interval: f64) -> Result<Self, ConfigError> {
        Self::new(tick_interval, self.sample_rate)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            tick_interval: Speed::Normal.tick_interval(),
            sample_rate: Prefs::DEFAULT_SAMPLE_RATE,
            stride: 18,
        }
    }
}

/// Speed selector offered in the menu
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Speed {
    Slow,
    Normal,
    Fast,
}

impl Speed {
    pub fn tick_interval(self) -> f64 {
        match self {
            Speed::Slow => 0.4,
            Speed::Normal => 0.3,
            Speed::Fast => 0.2,
        }
    }

    pub fn timing(self, sample_rate: f64) -> Result<Timing, ConfigError> {
        Timing::new(self.tick_interval(), sample_rate)
    }

    pub fn name(self) -> &'static str {
        match self {
            Speed::Slow => "SLOW",
            Speed::Normal => "NORMAL",
            Speed::Fast => "FAST",
        }
    }
}

pub struct Prefs {
    pub timing: Timing,
    pub spawn_cell: Cell,
    /// Segments introduced one by one after spawning, these
    /// don't count towards the score
    pub initial_segments: usize,
    /// Extra history kept beyond what the body needs
    pub history_margin: usize,
    /// How close the head must be to a lattice point for
    /// self collision to be checked
    pub collision_tolerance: f64,
    /// Seconds between pressing play and the eel starting to move
    pub start_delay: f64,

    pub window_width: f32,
    pub window_height: f32,
    pub grid_side_px: f32,
    pub cell_size: f32,
    pub eel_radius: f32,
    pub food_radius: f32,
    /// Longest frame fed to the simulation
    pub max_frame_time: f64,
}

impl Prefs {
    pub const DEFAULT_SAMPLE_RATE: f64 = 60.;
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            timing: Timing::default(),
            spawn_cell: Cell { x: 5, y: 5 },
            initial_segments: 3,
            history_margin: 100,
            collision_tolerance: 0.1,
            start_delay: 2.0,

            window_width: 1280.,
            window_height: 720.,
            grid_side_px: 605.,
            cell_size: 55.,
            eel_radius: 25.,
            food_radius: 8.,
            max_frame_time: 1. / 30.,
        }
    }
}

// builder
impl Prefs {
    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn speed(self, speed: Speed) -> Result<Self, ConfigError> {
        let timing = self.timing.with_tick_interval(speed.tick_interval())?;
        Ok(self.timing(timing))
    }
}

#[test]
fn test_default_timing_matches_constructor() {
    let timing = Timing::new(0.3, 60.).unwrap();
    assert_eq!(timing, Timing::default());
    assert_eq!(timing.stride(), 18);
}

#[test]
fn test_speed_strides() {
    for (speed, stride) in [(Speed::Slow, 24), (Speed::Normal, 18), (Speed::Fast, 12)] {
        assert_eq!(speed.timing(60.).unwrap().stride(), stride, "{:?}", speed);
    }
}

#[test]
fn test_degenerate_timing_rejected() {
    assert_eq!(
        Timing::new(0.001, 60.),
        Err(ConfigError::StrideTooSmall { tick_interval: 0.001, sample_rate: 60. })
    );
    assert_eq!(Timing::new(0., 60.), Err(ConfigError::InvalidTickInterval { secs: 0. }));
    assert!(matches!(Timing::new(0.3, f64::NAN), Err(ConfigError::InvalidSampleRate { .. })));
    assert!(Timing::new(-0.3, 60.).is_err());
    // 0.01 * 60 = 0.6 rounds up to a single sample
    assert_eq!(Timing::new(0.01, 60.).unwrap().stride(), 1);
}

#[test]
fn test_prefs_speed_keeps_sample_rate() {
    let prefs = Prefs::default().speed(Speed::Fast).unwrap();
    assert_eq!(prefs.timing.tick_interval(), 0.2);
    assert_eq!(prefs.timing.sample_rate(), 60.);
    assert_eq!(prefs.timing.stride(), 12);
}
