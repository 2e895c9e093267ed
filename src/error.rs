use std::fmt::{Debug, Display, Formatter};
use std::{fmt, result};

use crate::food::FoodError;
use crate::prefs::ConfigError;

#[derive(Debug)]
pub enum ErrorType {
    #[cfg(feature = "gui")]
    GameError(ggez::GameError),
    ConfigError(ConfigError),
    FoodError(FoodError),
}

/// The second member contains a trace in reverse order
#[must_use]
pub struct Error(ErrorType, Vec<String>);

#[cfg(feature = "gui")]
impl From<ggez::GameError> for Error {
    fn from(e: ggez::GameError) -> Self {
        Self(ErrorType::GameError(e), vec![])
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self(ErrorType::ConfigError(e), vec![])
    }
}

impl From<FoodError> for Error {
    fn from(e: FoodError) -> Self {
        Self(ErrorType::FoodError(e), vec![])
    }
}

impl Error {
    pub fn with_trace_step<S: ToString>(mut self, s: S) -> Self {
        self.1.push(s.to_string());
        self
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error:\n{:?}\nTrace:", self.0)?;
        for t in (self.1).iter().rev() {
            writeln!(f, " in {}", t)?;
        }
        Ok(())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for Error {}

pub type Result<T = ()> = result::Result<T, Error>;

pub trait ErrorConversion {
    fn with_trace_step<S: ToString>(self, s: S) -> Self;
}

impl<T> ErrorConversion for Result<T> {
    fn with_trace_step<S: ToString>(self, s: S) -> Self {
        self.map_err(|e| e.with_trace_step(s.to_string()))
    }
}

#[test]
fn test_trace_printed_innermost_last() {
    let result: Result = Err(Error::from(FoodError::GridFull))
        .with_trace_step("Food::generate")
        .with_trace_step("Round::update");
    let text = format!("{}", result.unwrap_err());
    let food = text.find("in Food::generate").unwrap();
    let round = text.find("in Round::update").unwrap();
    assert!(round < food, "{}", text);
    assert!(text.contains("GridFull"));
}
