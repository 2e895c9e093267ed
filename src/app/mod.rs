use ggez::conf::{WindowMode, WindowSetup};
use ggez::event::EventHandler;
use ggez::graphics::{Canvas, DrawParam, Mesh, PxScale, Text, TextLayout};
use ggez::input::keyboard::KeyInput;
use ggez::{Context, GameError, GameResult};
use log::info;
use rand::rngs::ThreadRng;
use rand::thread_rng;

use eel::basic::{Bounds, Point};
use eel::error::{Error, ErrorConversion, Result};
use eel::phase::{Event, Phase};
use eel::prefs::{Prefs, Speed};
use eel::round::Round;
use palette::Palette;

mod drawing;
mod keyboard_control;
mod palette;

pub struct App {
    prefs: Prefs,
    speed: Speed,
    phase: Phase,
    round: Round<ThreadRng>,

    bounds: Bounds,
    palette: Palette,

    /// Only recalculated when the window is created
    grid_mesh: Option<Mesh>,
}

impl App {
    pub fn new(prefs: Prefs) -> Result<Self> {
        let center = Point {
            x: prefs.window_width / 2.,
            y: prefs.window_height / 2.,
        };
        let bounds = Bounds::centered(center, prefs.grid_side_px);
        let round = Round::new(&prefs, thread_rng())
            .map_err(Error::from)
            .with_trace_step("App::new")?;

        Ok(Self {
            prefs,
            speed: Speed::Normal,
            phase: Phase::Menu,
            round,
            bounds,
            palette: Palette::default(),
            grid_mesh: None,
        })
    }

    pub fn wm(&self) -> WindowMode {
        WindowMode::default()
            .dimensions(self.prefs.window_width, self.prefs.window_height)
            .resizable(false)
    }

    pub fn ws(&self) -> WindowSetup {
        WindowSetup::default().title("The eel").vsync(true)
    }

    fn select_speed(&mut self, speed: Speed) -> Result {
        let sample_rate = self.prefs.timing.sample_rate();
        self.prefs.timing = speed.timing(sample_rate).map_err(Error::from)?;
        self.speed = speed;
        Ok(())
    }

    /// Switch speed mid-round, the eel keeps its body
    fn change_speed(&mut self, speed: Speed) -> Result {
        self.select_speed(speed).with_trace_step("App::change_speed")?;
        info!("speed changed to {}", speed.name());
        self.round.set_timing(self.prefs.timing);
        Ok(())
    }

    /// A fresh round with the selected speed, the previous eel is discarded
    fn restart(&mut self) -> Result {
        self.select_speed(self.speed).with_trace_step("App::restart")?;
        self.round = Round::new(&self.prefs, thread_rng())
            .map_err(Error::from)
            .with_trace_step("App::restart")?;
        Ok(())
    }

    fn text(&self, text: &str, center: Point, scale: f32, canvas: &mut Canvas) {
        let mut text = Text::new(text);
        text.set_scale(PxScale::from(scale)).set_layout(TextLayout::center());
        canvas.draw(&text, DrawParam::default().dest(center).color(self.palette.text_color));
    }

    fn draw_overlay(&self, canvas: &mut Canvas) {
        let center = Point {
            x: self.prefs.window_width / 2.,
            y: self.prefs.window_height / 2.,
        };
        let line = |dy: f32| center + Point { x: 0., y: dy };

        match self.phase {
            Phase::Menu => {
                self.text("THE EEL", line(-150.), 64., canvas);
                self.text(
                    &format!("Speed: {}  (1 slow, 2 normal, 3 fast)", self.speed.name()),
                    line(-60.),
                    32.,
                    canvas,
                );
                self.text("press Enter to play", line(40.), 32., canvas);
            }
            Phase::WaitingStart { .. } => {
                self.text("get ready", line(-200.), 32., canvas);
            }
            Phase::Playing => {}
            Phase::GameOver { score } => {
                self.text("GAME OVER", line(-50.), 64., canvas);
                self.text(&format!("Final Score: {}", score), line(10.), 32., canvas);
                self.text("press R to restart", line(60.), 32., canvas);
            }
            Phase::Won { score } => {
                self.text("THE GRID IS FULL", line(-50.), 64., canvas);
                self.text(&format!("Final Score: {}", score), line(10.), 32., canvas);
                self.text("press R to play again", line(60.), 32., canvas);
            }
        }
    }
}

fn to_game_error(e: Error) -> GameError {
    GameError::CustomError(e.to_string())
}

impl EventHandler for App {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        let dt = ctx.time.delta().as_secs_f64().min(self.prefs.max_frame_time);
        self.phase.handle(Event::Tick(dt), self.prefs.start_delay);

        if self.phase.should_advance() {
            let outcome = self.round.update(dt);
            let score = self.round.score();
            if outcome.is_crash() {
                info!("round over: {:?}", outcome);
                self.phase.handle(Event::Crash { score }, self.prefs.start_delay);
            } else if outcome.is_win() {
                info!("round won with score {}", score);
                self.phase.handle(Event::GridFilled { score }, self.prefs.start_delay);
            }
        }

        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let mut canvas = Canvas::from_frame(ctx, self.palette.background_color);

        if self.grid_mesh.is_none() {
            self.grid_mesh = Some(drawing::grid_mesh(&self.bounds, self.prefs.cell_size, &self.palette, ctx)?);
        }
        if let Some(mesh) = &self.grid_mesh {
            canvas.draw(mesh, DrawParam::default());
        }

        let food = drawing::food_mesh(self.round.food(), &self.bounds, &self.prefs, &self.palette, ctx)?;
        canvas.draw(&food, DrawParam::default());
        let eel = drawing::eel_mesh(self.round.eel(), &self.bounds, &self.prefs, &self.palette, ctx)?;
        canvas.draw(&eel, DrawParam::default());

        let score = Text::new(format!("Score: {}", self.round.score()));
        canvas.draw(
            &score,
            DrawParam::default()
                .dest(Point { x: 20., y: 20. })
                .color(self.palette.text_color),
        );

        if !self.phase.should_advance() {
            let overlay = Mesh::new_rectangle(
                ctx,
                ggez::graphics::DrawMode::fill(),
                ggez::graphics::Rect::new(0., 0., self.prefs.window_width, self.prefs.window_height),
                self.palette.overlay_color,
            )?;
            canvas.draw(&overlay, DrawParam::default());
        }
        self.draw_overlay(&mut canvas);

        canvas.finish(ctx)
    }

    fn key_down_event(&mut self, _ctx: &mut Context, input: KeyInput, _repeated: bool) -> GameResult {
        let Some(key) = input.keycode else {
            return Ok(());
        };

        match self.phase {
            Phase::Menu => {
                if let Some(speed) = keyboard_control::key_to_speed(key) {
                    self.speed = speed;
                } else if keyboard_control::is_confirm(key) {
                    self.restart().map_err(to_game_error)?;
                    self.phase.handle(Event::Play, self.prefs.start_delay);
                }
            }
            Phase::WaitingStart { .. } => {
                if let Some(dir) = keyboard_control::key_to_dir(key) {
                    self.round.begin(dir);
                } else if let Some(speed) = keyboard_control::key_to_speed(key) {
                    self.change_speed(speed).map_err(to_game_error)?;
                }
            }
            Phase::Playing => {
                if let Some(dir) = keyboard_control::key_to_dir(key) {
                    self.round.set_direction(dir);
                } else if let Some(speed) = keyboard_control::key_to_speed(key) {
                    self.change_speed(speed).map_err(to_game_error)?;
                }
            }
            Phase::GameOver { .. } | Phase::Won { .. } => {
                if keyboard_control::is_restart(key) {
                    self.phase.handle(Event::Restart, self.prefs.start_delay);
                }
            }
        }

        Ok(())
    }
}
