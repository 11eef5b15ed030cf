//! Platform abstraction layer
//!
//! Host-side glue that is not part of the simulation:
//! - Default key bindings for the discrete commands
//! - Browser bindings (wasm32 only)

use crate::sim::Command;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Default key bindings (case-insensitive)
pub const KEY_BINDINGS: [(char, Command); 9] = [
    ('f', Command::PushAll),
    ('v', Command::PushRandom),
    ('x', Command::ToggleSnake),
    ('g', Command::ToggleWave),
    ('u', Command::ToggleRings),
    ('h', Command::ToggleHold),
    ('o', Command::StopAll),
    ('m', Command::CycleVelocity),
    ('k', Command::ToggleFloor),
];

/// Look up the command bound to a key
pub fn command_for_key(key: char) -> Option<Command> {
    let key = key.to_ascii_lowercase();
    KEY_BINDINGS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|&(_, command)| command)
}

/// Parse a frame script: one character per frame, `.` (or any unbound key)
/// is an idle frame. Whitespace is ignored.
pub fn parse_script(script: &str) -> Vec<Option<Command>> {
    script
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(command_for_key)
        .collect()
}
