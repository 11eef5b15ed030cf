//! Single box integrator
//!
//! A box only moves vertically. Its offset is measured from the rest plane,
//! gravity always pulls back toward that plane, and friction bleeds off speed.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One physically simulated box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxBody {
    /// Column in the grid
    pub x: u32,
    /// Row in the grid
    pub z: u32,
    /// Signed displacement from the rest plane
    pub offset: f32,
    /// Signed vertical speed
    pub velocity: f32,
}

impl BoxBody {
    pub fn new(x: u32, z: u32) -> Self {
        Self {
            x,
            z,
            offset: 0.0,
            velocity: 0.0,
        }
    }

    /// True when the box sits exactly on the rest plane without moving
    #[inline]
    pub fn is_at_rest(&self) -> bool {
        self.velocity == 0.0 && self.offset == 0.0
    }

    /// Add an impulse. Impulses within one frame stack.
    #[inline]
    pub fn push(&mut self, force: f32) {
        self.velocity += force;
    }

    /// Advance by one frame
    pub fn update(&mut self, dt: f32, floor_enabled: bool) {
        if self.is_at_rest() {
            return;
        }

        if floor_enabled {
            // Stop the box before it crosses the floor from either side
            let ahead = self.offset + self.velocity * dt * FLOOR_LOOKAHEAD;
            if (ahead <= 0.0 && self.offset > 0.0) || (ahead >= 0.0 && self.offset < 0.0) {
                self.settle();
                return;
            }
        } else if self.velocity.abs() < SETTLE_VELOCITY && self.offset.abs() < SETTLE_OFFSET {
            self.settle();
            return;
        }

        if self.offset > CEILING {
            self.velocity = -self.velocity;
        }

        if self.offset > 0.0 {
            self.velocity -= GRAVITY * dt;
        } else {
            self.velocity += GRAVITY * dt;
        }

        if self.velocity > 0.0 {
            self.velocity -= FRICTION * dt;
        } else {
            self.velocity += FRICTION * dt;
        }

        self.offset += self.velocity * dt;
    }

    fn settle(&mut self) {
        self.velocity = 0.0;
        self.offset = 0.0;
    }

    /// Fixed world-space placement of this box's slot (offset not applied)
    pub fn slot_translation(&self) -> Vec3 {
        Vec3::new(
            SLOT_SPACING * (self.x as f32 - 1.0),
            0.0,
            SLOT_SPACING * (self.z as f32 - 1.0),
        )
    }

    /// Slot placement lifted by the current offset
    pub fn world_position(&self) -> Vec3 {
        self.slot_translation() + Vec3::Y * self.offset
    }
}
