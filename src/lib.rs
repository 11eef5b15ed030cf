//! Box Grid - a field of bouncing boxes
//!
//! Core modules:
//! - `sim`: Deterministic simulation (box integrator, grid, pattern generators)
//! - `settings`: Construction-time grid configuration
//! - `platform`: Host-side glue (key map, browser bindings)
//! - `fps`: Averaged frame-rate counter for hosts

pub mod error;
pub mod fps;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::GridError;
pub use fps::FpsCounter;
pub use settings::GridConfig;

/// Simulation constants
pub mod consts {
    /// Downward acceleration toward the rest plane (units/s²)
    pub const GRAVITY: f32 = 37.8;
    /// Velocity lost per second while moving
    pub const FRICTION: f32 = 2.0;

    /// Look-ahead multiplier for the floor check. Without it fast boxes
    /// sometimes tunnel through the floor within a single frame.
    pub const FLOOR_LOOKAHEAD: f32 = 2.0;
    /// Without a floor, boxes slower than this may settle...
    pub const SETTLE_VELOCITY: f32 = 0.2;
    /// ...if they are also this close to the rest plane
    pub const SETTLE_OFFSET: f32 = 0.3;
    /// Boxes above this height get their velocity inverted
    pub const CEILING: f32 = 1000.0;

    /// Push velocity at grid construction
    pub const DEFAULT_PUSH_VELOCITY: f32 = 35.0;
    /// Increment applied by each velocity change
    pub const PUSH_VELOCITY_STEP: f32 = 10.0;
    /// Push velocity wraps once it reaches this value
    pub const PUSH_VELOCITY_CEILING: f32 = 120.0;
    /// Value the push velocity wraps to (pushes boxes downward)
    pub const PUSH_VELOCITY_WRAP: f32 = -20.0;

    /// Minimum seconds between snake steps
    pub const SNAKE_INTERVAL: f32 = 0.05;
    /// Minimum seconds between wave rows
    pub const WAVE_INTERVAL: f32 = 0.10;
    /// Minimum seconds between rings
    pub const RING_INTERVAL: f32 = 0.10;

    /// World-space distance between neighbouring box slots
    pub const SLOT_SPACING: f32 = 5.5;

    /// Default grid dimensions (20x20 demo field)
    pub const DEFAULT_X_SIZE: u32 = 20;
    pub const DEFAULT_Z_SIZE: u32 = 20;
}
