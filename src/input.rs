//! Keyboard bindings.

use winit::keyboard::{Key, NamedKey};

use crate::scene::Scene;

/// Key bindings printed at startup
pub const KEY_HELP: &[(&str, &str)] = &[
    ("l", "restart 1D world (line)"),
    ("s", "restart 2D world (square)"),
    ("c", "restart 3D world (cube)"),
    ("z", "zoom out effect"),
    ("Z", "zoom in effect"),
    ("t", "display time domain wave"),
    ("f", "display fft"),
    ("q/Q", "quit"),
];

/// Action requested from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleTimeDomain,
    ToggleFft,
    ToggleZoomOut,
    ToggleZoomIn,
    SelectScene(Scene),
    Quit,
}

/// Map a logical key to its command (case matters: `z` and `Z` differ)
pub fn command_for_key(key: &Key) -> Option<Command> {
    match key {
        Key::Named(NamedKey::Escape) => Some(Command::Quit),
        Key::Character(text) => match text.as_str() {
            "q" | "Q" => Some(Command::Quit),
            "t" => Some(Command::ToggleTimeDomain),
            "f" => Some(Command::ToggleFft),
            "z" => Some(Command::ToggleZoomOut),
            "Z" => Some(Command::ToggleZoomIn),
            "l" => Some(Command::SelectScene(Scene::Line)),
            "s" => Some(Command::SelectScene(Scene::Square)),
            "c" => Some(Command::SelectScene(Scene::Cube)),
            _ => None,
        },
        _ => None,
    }
}
