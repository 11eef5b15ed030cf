//! Deterministic simulation module
//!
//! All box physics and pattern playback lives here. This module must be pure
//! and deterministic:
//! - Time comes from the host (frame delta and elapsed seconds)
//! - Seeded RNG only
//! - Stable iteration order (by box index)
//! - No rendering or platform dependencies

pub mod body;
pub mod grid;
pub mod pattern;
pub mod tick;

pub use body::BoxBody;
pub use grid::{Grid, GridDims, GridSnapshot};
pub use pattern::{Pattern, PatternKind, on_ring, snake_index};
pub use tick::{Command, FrameInput, tick};
