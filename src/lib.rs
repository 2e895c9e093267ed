#[macro_use]
extern crate derive_more;

pub mod basic;
pub mod eel;
pub mod error;
pub mod food;
pub mod phase;
pub mod prefs;
pub mod round;
