use std::fs::File;

use ggez::event::run;
use ggez::ContextBuilder;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use eel::error::{ErrorConversion, Result};
use eel::prefs::Prefs;

use crate::app::App;

mod app;

const LOG_FILE: &str = "eel.log";

/// `EEL_LOG=debug` for per tick details, `trace` for segment growth
fn init_logging() {
    let level = std::env::var("EEL_LOG")
        .ok()
        .and_then(|l| l.parse().ok())
        .unwrap_or(LevelFilter::Info);

    match File::create(LOG_FILE) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, Config::default(), file) {
                eprintln!("failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("failed to create {}: {}", LOG_FILE, e),
    }
}

fn main() -> Result {
    init_logging();
    info!("starting eel");

    let app = App::new(Prefs::default()).with_trace_step("main")?;

    let (ctx, event_loop) = ContextBuilder::new("eel", "gorilskij")
        .window_mode(app.wm())
        .window_setup(app.ws())
        .build()
        .map_err(eel::error::Error::from)
        .with_trace_step("main")?;

    run(ctx, event_loop, app)
}
