use ggez::input::keyboard::KeyCode::{self, *};

use eel::basic::Dir;
use eel::prefs::Speed;

/// Arrow keys, or ZQSD for azerty keyboards
pub fn key_to_dir(key: KeyCode) -> Option<Dir> {
    #[rustfmt::skip]
    let dir = match key {
        Up | Z => Dir::U,
        Down | S => Dir::D,
        Left | Q => Dir::L,
        Right | D => Dir::R,
        _ => return None,
    };
    Some(dir)
}

pub fn key_to_speed(key: KeyCode) -> Option<Speed> {
    match key {
        Key1 | Numpad1 => Some(Speed::Slow),
        Key2 | Numpad2 => Some(Speed::Normal),
        Key3 | Numpad3 => Some(Speed::Fast),
        _ => None,
    }
}

pub fn is_confirm(key: KeyCode) -> bool {
    matches!(key, Return | NumpadEnter | Space)
}

pub fn is_restart(key: KeyCode) -> bool {
    matches!(key, R | Return)
}
