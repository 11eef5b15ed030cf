//! Pattern generators
//!
//! Each pattern is a small cyclic state machine. While active it fires at
//! most once per interval (measured on the host's elapsed clock), selecting
//! the box indices that receive an impulse. The grid applies the impulses.

use serde::{Deserialize, Serialize};

use super::grid::GridDims;
use crate::consts::*;

/// The three pattern generators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    /// One box at a time along a serpentine path
    Snake,
    /// One full row at a time, front to back
    Wave,
    /// Concentric square rings, shrinking inward
    Ring,
}

impl PatternKind {
    /// Fixed update order
    pub const ALL: [PatternKind; 3] = [PatternKind::Snake, PatternKind::Wave, PatternKind::Ring];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Snake => "snake",
            PatternKind::Wave => "wave",
            PatternKind::Ring => "ring",
        }
    }

    /// Minimum seconds between fires
    pub fn interval(&self) -> f32 {
        match self {
            PatternKind::Snake => SNAKE_INTERVAL,
            PatternKind::Wave => WAVE_INTERVAL,
            PatternKind::Ring => RING_INTERVAL,
        }
    }

    /// Cursor value when the pattern is switched on
    pub fn start_cursor(&self, dims: GridDims) -> u32 {
        match self {
            PatternKind::Snake | PatternKind::Wave => 0,
            PatternKind::Ring => dims.outer_ring(),
        }
    }
}

/// Cursor and timer state of one pattern generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub kind: PatternKind,
    /// `None` while inactive
    pub(crate) cursor: Option<u32>,
    /// Elapsed time of the last fire (seconds)
    pub(crate) last_fire: f32,
}

impl Pattern {
    pub fn new(kind: PatternKind) -> Self {
        Self {
            kind,
            cursor: None,
            last_fire: 0.0,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.cursor.is_some()
    }

    #[inline]
    pub fn cursor(&self) -> Option<u32> {
        self.cursor
    }

    #[inline]
    pub fn last_fire(&self) -> f32 {
        self.last_fire
    }

    /// Switch between inactive and the pattern's start cursor.
    /// Returns whether the pattern is now active.
    pub fn toggle(&mut self, dims: GridDims) -> bool {
        self.cursor = match self.cursor {
            Some(_) => None,
            None => Some(self.kind.start_cursor(dims)),
        };
        self.is_active()
    }

    pub fn stop(&mut self) {
        self.cursor = None;
    }

    /// Run one tick. Appends the indices to impulse to `targets` and
    /// returns true if the pattern fired.
    pub fn advance(&mut self, elapsed: f32, dims: GridDims, targets: &mut Vec<usize>) -> bool {
        let Some(cursor) = self.cursor else {
            return false;
        };

        // Snake and wave restart with a skipped tick once they run off the end
        match self.kind {
            PatternKind::Snake if cursor as usize >= dims.len() => {
                self.cursor = Some(0);
                return false;
            }
            PatternKind::Wave if cursor >= dims.z_size => {
                self.cursor = Some(0);
                return false;
            }
            _ => {}
        }

        if elapsed - self.last_fire < self.kind.interval() {
            return false;
        }
        self.last_fire = elapsed;

        match self.kind {
            PatternKind::Snake => {
                targets.push(snake_index(cursor, dims));
                self.cursor = Some(cursor + 1);
            }
            PatternKind::Wave => {
                targets.extend((0..dims.len()).filter(|&i| dims.coords(i).1 == cursor));
                self.cursor = Some(cursor + 1);
            }
            PatternKind::Ring => {
                targets.extend((0..dims.len()).filter(|&i| on_ring(i, cursor, dims)));
                self.cursor = Some(if cursor == 0 {
                    dims.outer_ring()
                } else {
                    cursor - 1
                });
            }
        }
        true
    }
}

/// Box index for a snake step. Even rows run left to right, odd rows
/// right to left.
pub fn snake_index(step: u32, dims: GridDims) -> usize {
    let row = step / dims.x_size;
    let col = step % dims.x_size;
    let col = if row % 2 == 1 {
        dims.x_size - 1 - col
    } else {
        col
    };
    dims.index(col, row)
}

/// True if box `i` lies on the square ring `ring` steps in from the border.
/// Each box is tested once, so corners shared by two edges count once.
pub fn on_ring(i: usize, ring: u32, dims: GridDims) -> bool {
    let (Some(far_x), Some(far_z)) = (
        (dims.x_size - 1).checked_sub(ring),
        (dims.z_size - 1).checked_sub(ring),
    ) else {
        return false;
    };
    // Past the centre of either axis the ring is empty
    if far_x < ring || far_z < ring {
        return false;
    }
    let (x, z) = dims.coords(i);
    let on_x_edge = (x == ring || x == far_x) && (ring..=far_z).contains(&z);
    let on_z_edge = (z == ring || z == far_z) && (ring..=far_x).contains(&x);
    on_x_edge || on_z_edge
}
