//! Per-frame host boundary
//!
//! Hosts collect discrete commands during a frame, then call `tick` once with
//! the frame delta and their monotonic clock.

use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// Discrete user command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    PushAll,
    PushRandom,
    ToggleSnake,
    ToggleWave,
    ToggleRings,
    ToggleHold,
    StopAll,
    CycleVelocity,
    ToggleFloor,
}

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Applied in order before the grid updates
    pub commands: Vec<Command>,
}

impl FrameInput {
    pub fn with(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Grid {
    /// Apply one command immediately
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::PushAll => self.push_all(),
            Command::PushRandom => {
                self.push_rand();
            }
            Command::ToggleSnake => self.switch_snake(),
            Command::ToggleWave => self.switch_wave(),
            Command::ToggleRings => self.switch_rings(),
            Command::ToggleHold => self.switch_hold(),
            Command::StopAll => self.stop_all(),
            Command::CycleVelocity => self.change_velocity(),
            Command::ToggleFloor => self.switch_floor(),
        }
    }
}

/// Advance the grid by one frame: commands first, then the update
pub fn tick(grid: &mut Grid, input: &FrameInput, dt: f32, elapsed: f32) {
    for &command in &input.commands {
        grid.apply(command);
    }
    grid.update(dt, elapsed);
}
