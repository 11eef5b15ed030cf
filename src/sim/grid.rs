//! The box grid
//!
//! Owns every box (row-major, index = stable identity), the global toggles
//! and the three pattern generators. Hosts drive it once per frame and read
//! back each box's offset.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::BoxBody;
use super::pattern::{Pattern, PatternKind};
use crate::consts::*;
use crate::error::GridError;
use crate::settings::GridConfig;

/// Grid dimensions and index arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    pub x_size: u32,
    pub z_size: u32,
}

impl GridDims {
    pub fn new(x_size: u32, z_size: u32) -> Result<Self, GridError> {
        if x_size == 0 || z_size == 0 {
            return Err(GridError::EmptyGrid { x_size, z_size });
        }
        Ok(Self { x_size, z_size })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.x_size as usize * self.z_size as usize
    }

    #[inline]
    pub fn index(&self, x: u32, z: u32) -> usize {
        z as usize * self.x_size as usize + x as usize
    }

    #[inline]
    pub fn coords(&self, i: usize) -> (u32, u32) {
        let x = (i % self.x_size as usize) as u32;
        let z = (i / self.x_size as usize) as u32;
        (x, z)
    }

    /// Cursor of the outermost ring pattern step
    #[inline]
    pub fn outer_ring(&self) -> u32 {
        self.x_size.min(self.z_size) / 2
    }
}

/// Serializable view of the grid for hosts and debugging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub name: String,
    pub x_size: u32,
    pub z_size: u32,
    pub offsets: Vec<f32>,
    pub velocities: Vec<f32>,
    pub push_velocity: f32,
    pub floor_enabled: bool,
    pub hold: bool,
    pub snake: Option<u32>,
    pub wave: Option<u32>,
    pub ring: Option<u32>,
}

/// A field of boxes plus the pattern generators that drive them
#[derive(Debug, Clone)]
pub struct Grid {
    name: String,
    dims: GridDims,
    /// Row-major: index `i` is `(i % x_size, i / x_size)`
    boxes: Vec<BoxBody>,
    push_velocity: f32,
    floor_enabled: bool,
    hold: bool,
    snake: Pattern,
    wave: Pattern,
    ring: Pattern,
    rng: Pcg32,
    /// Reused per-tick list of pattern targets
    targets: Vec<usize>,
}

impl Grid {
    /// Build a grid seeded from the config
    pub fn new(config: &GridConfig) -> Result<Self, GridError> {
        Self::with_rng(config, Pcg32::seed_from_u64(config.seed))
    }

    /// Build a grid with an explicit random source for random pushes
    pub fn with_rng(config: &GridConfig, rng: Pcg32) -> Result<Self, GridError> {
        let dims = GridDims::new(config.x_size, config.z_size)?;

        let mut boxes = Vec::with_capacity(dims.len());
        for z in 0..dims.z_size {
            for x in 0..dims.x_size {
                boxes.push(BoxBody::new(x, z));
            }
        }

        log::info!(
            "Grid '{}' created: {}x{} ({} boxes)",
            config.name,
            dims.x_size,
            dims.z_size,
            boxes.len()
        );

        Ok(Self {
            name: config.name.clone(),
            dims,
            boxes,
            push_velocity: config.push_velocity,
            floor_enabled: config.floor_enabled,
            hold: false,
            snake: Pattern::new(PatternKind::Snake),
            wave: Pattern::new(PatternKind::Wave),
            ring: Pattern::new(PatternKind::Ring),
            rng,
            targets: Vec::new(),
        })
    }

    // === Accessors ===

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Always false: a grid has at least one box
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn boxes(&self) -> &[BoxBody] {
        &self.boxes
    }

    pub fn box_at(&self, index: usize) -> Option<&BoxBody> {
        self.boxes.get(index)
    }

    /// Current offset of every box, in index order
    pub fn offsets(&self) -> impl Iterator<Item = f32> + '_ {
        self.boxes.iter().map(|b| b.offset)
    }

    #[inline]
    pub fn push_velocity(&self) -> f32 {
        self.push_velocity
    }

    #[inline]
    pub fn floor_enabled(&self) -> bool {
        self.floor_enabled
    }

    #[inline]
    pub fn hold(&self) -> bool {
        self.hold
    }

    pub fn pattern(&self, kind: PatternKind) -> &Pattern {
        match kind {
            PatternKind::Snake => &self.snake,
            PatternKind::Wave => &self.wave,
            PatternKind::Ring => &self.ring,
        }
    }

    fn pattern_mut(&mut self, kind: PatternKind) -> &mut Pattern {
        match kind {
            PatternKind::Snake => &mut self.snake,
            PatternKind::Wave => &mut self.wave,
            PatternKind::Ring => &mut self.ring,
        }
    }

    // === Frame update ===

    /// Advance one frame: patterns first, then every box in index order
    pub fn update(&mut self, dt: f32, elapsed: f32) {
        if self.hold {
            return;
        }

        for kind in PatternKind::ALL {
            self.run_pattern(kind, elapsed);
        }

        let floor_enabled = self.floor_enabled;
        for b in &mut self.boxes {
            b.update(dt, floor_enabled);
        }
    }

    fn run_pattern(&mut self, kind: PatternKind, elapsed: f32) {
        let mut targets = std::mem::take(&mut self.targets);
        targets.clear();

        let dims = self.dims;
        if self.pattern_mut(kind).advance(elapsed, dims, &mut targets) {
            log::trace!("{} fired {} boxes at t={:.3}", kind.as_str(), targets.len(), elapsed);
            let force = self.push_velocity;
            for &i in &targets {
                self.boxes[i].push(force);
            }
        }

        self.targets = targets;
    }

    // === Commands ===

    /// Push every box
    pub fn push_all(&mut self) {
        if self.hold {
            return;
        }
        let force = self.push_velocity;
        for b in &mut self.boxes {
            b.push(force);
        }
    }

    /// Push one uniformly chosen box. Returns its index.
    pub fn push_rand(&mut self) -> Option<usize> {
        if self.hold {
            return None;
        }
        let i = self.rng.random_range(0..self.boxes.len());
        self.boxes[i].push(self.push_velocity);
        Some(i)
    }

    pub fn switch_floor(&mut self) {
        if self.hold {
            return;
        }
        self.floor_enabled = !self.floor_enabled;
        log::info!("Floor {}", if self.floor_enabled { "enabled" } else { "disabled" });
    }

    pub fn switch_hold(&mut self) {
        self.hold = !self.hold;
        log::info!("Hold {}", if self.hold { "on" } else { "off" });
    }

    /// Step the push velocity up, wrapping to a downward push past the ceiling
    pub fn change_velocity(&mut self) {
        if self.hold {
            return;
        }
        let next = self.push_velocity + PUSH_VELOCITY_STEP;
        self.push_velocity = if next >= PUSH_VELOCITY_CEILING {
            PUSH_VELOCITY_WRAP
        } else {
            next
        };
        log::debug!("Push velocity: {}", self.push_velocity);
    }

    /// Stop every pattern. Boxes already in flight keep moving.
    pub fn stop_all(&mut self) {
        for kind in PatternKind::ALL {
            self.pattern_mut(kind).stop();
        }
        log::info!("All patterns stopped");
    }

    pub fn switch_snake(&mut self) {
        self.switch_pattern(PatternKind::Snake);
    }

    pub fn switch_wave(&mut self) {
        self.switch_pattern(PatternKind::Wave);
    }

    pub fn switch_rings(&mut self) {
        self.switch_pattern(PatternKind::Ring);
    }

    fn switch_pattern(&mut self, kind: PatternKind) {
        if self.hold {
            return;
        }
        let dims = self.dims;
        let active = self.pattern_mut(kind).toggle(dims);
        log::info!("Pattern {} {}", kind.as_str(), if active { "started" } else { "stopped" });
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            name: self.name.clone(),
            x_size: self.dims.x_size,
            z_size: self.dims.z_size,
            offsets: self.offsets().collect(),
            velocities: self.boxes.iter().map(|b| b.velocity).collect(),
            push_velocity: self.push_velocity,
            floor_enabled: self.floor_enabled,
            hold: self.hold,
            snake: self.snake.cursor(),
            wave: self.wave.cursor(),
            ring: self.ring.cursor(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn grid(x: u32, z: u32) -> Grid {
        Grid::new(&GridConfig::new("test", x, z).with_seed(7)).unwrap()
    }

    fn velocities(grid: &Grid) -> Vec<f32> {
        grid.boxes().iter().map(|b| b.velocity).collect()
    }

    #[test]
    fn test_new_grid_layout() {
        let g = grid(4, 3);
        assert_eq!(g.len(), 12);
        assert!(!g.is_empty());
        assert_eq!(g.name(), "test");
        for (i, b) in g.boxes().iter().enumerate() {
            assert_eq!((b.x, b.z), g.dims().coords(i));
            assert_eq!(g.dims().index(b.x, b.z), i);
            assert!(b.is_at_rest());
        }
        assert_eq!(g.push_velocity(), 35.0);
        assert!(g.floor_enabled());
        assert!(!g.hold());
        for kind in PatternKind::ALL {
            assert!(!g.pattern(kind).is_active());
        }
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = Grid::new(&GridConfig::new("bad", 0, 5)).unwrap_err();
        assert!(matches!(err, GridError::EmptyGrid { x_size: 0, z_size: 5 }));
        assert!(Grid::new(&GridConfig::new("bad", 5, 0)).is_err());
    }

    #[test]
    fn test_push_all() {
        let mut g = grid(3, 3);
        g.push_all();
        assert!(velocities(&g).iter().all(|&v| v == 35.0));
    }

    #[test]
    fn test_push_rand_hits_one_box() {
        let mut g = grid(4, 4);
        let i = g.push_rand().unwrap();
        let v = velocities(&g);
        assert_eq!(v[i], 35.0);
        assert_eq!(v.iter().filter(|&&v| v != 0.0).count(), 1);
    }

    #[test]
    fn test_push_rand_deterministic_with_seed() {
        let mut a = grid(5, 5);
        let mut b = grid(5, 5);
        let picks_a: Vec<_> = (0..20).map(|_| a.push_rand()).collect();
        let picks_b: Vec<_> = (0..20).map(|_| b.push_rand()).collect();
        assert_eq!(picks_a, picks_b);

        let config = GridConfig::new("test", 5, 5);
        let mut c = Grid::with_rng(&config, Pcg32::seed_from_u64(7)).unwrap();
        let picks_c: Vec<_> = (0..20).map(|_| c.push_rand()).collect();
        assert_eq!(picks_a, picks_c);
    }

    #[test]
    fn test_push_rand_stays_in_range() {
        let mut g = grid(2, 3);
        for _ in 0..500 {
            let i = g.push_rand().unwrap();
            assert!(i < 6);
        }
    }

    #[test]
    fn test_velocity_cycle() {
        let mut g = grid(2, 2);
        g.push_velocity = 115.0;
        g.change_velocity();
        assert_eq!(g.push_velocity(), -20.0);

        for _ in 0..10 {
            g.change_velocity();
        }
        assert_eq!(g.push_velocity(), 80.0);
    }

    #[test]
    fn test_velocity_cycle_from_default() {
        let mut g = grid(2, 2);
        let mut seen = Vec::new();
        for _ in 0..16 {
            g.change_velocity();
            seen.push(g.push_velocity());
        }
        assert_eq!(&seen[..9], &[45.0, 55.0, 65.0, 75.0, 85.0, 95.0, 105.0, 115.0, -20.0]);
        assert!(seen.iter().all(|&v| (-20.0..120.0).contains(&v)));
    }

    #[test]
    fn test_switch_floor_and_hold() {
        let mut g = grid(2, 2);
        g.switch_floor();
        assert!(!g.floor_enabled());
        g.switch_floor();
        assert!(g.floor_enabled());
        g.switch_hold();
        assert!(g.hold());
        g.switch_hold();
        assert!(!g.hold());
    }

    #[test]
    fn test_hold_freezes_world() {
        let mut g = grid(4, 4);
        g.push_all();
        g.update(DT, 0.0);
        g.switch_snake();
        g.switch_wave();
        g.switch_rings();
        g.update(DT, 0.2);
        g.switch_hold();

        let before = g.snapshot();
        for frame in 1..=100 {
            g.update(DT, 0.2 + frame as f32 * DT);
        }
        g.push_all();
        assert_eq!(g.push_rand(), None);
        assert!(before.hold);
        assert_eq!(g.snapshot(), before);
    }

    #[test]
    fn test_hold_ignores_toggles_except_hold_and_stop() {
        let mut g = grid(4, 4);
        g.switch_hold();
        g.switch_floor();
        g.change_velocity();
        g.switch_snake();
        assert!(g.floor_enabled());
        assert_eq!(g.push_velocity(), 35.0);
        assert!(!g.pattern(PatternKind::Snake).is_active());

        g.switch_hold();
        g.switch_snake();
        g.switch_hold();
        g.stop_all();
        assert!(!g.pattern(PatternKind::Snake).is_active());
    }

    #[test]
    fn test_stop_all_is_total() {
        let mut g = grid(4, 4);
        g.switch_snake();
        g.switch_wave();
        g.switch_rings();
        for frame in 0..30 {
            g.update(0.0, frame as f32 * 0.1);
        }
        g.stop_all();
        let before = velocities(&g);

        for frame in 30..100 {
            g.update(0.0, frame as f32 * 0.1);
        }
        for kind in PatternKind::ALL {
            assert_eq!(g.pattern(kind).cursor(), None);
        }
        assert_eq!(velocities(&g), before);

        // Manual pushes still work
        g.push_all();
        assert!(velocities(&g).iter().zip(&before).all(|(a, b)| *a == b + 35.0));
    }

    #[test]
    fn test_stop_all_keeps_toggles() {
        let mut g = grid(3, 3);
        g.switch_floor();
        g.switch_hold();
        g.stop_all();
        assert!(!g.floor_enabled());
        assert!(g.hold());
    }

    #[test]
    fn test_ring_corners_pushed_once() {
        let mut g = grid(5, 5);
        g.ring.cursor = Some(0);
        g.update(0.0, 1.0);

        let dims = g.dims();
        for (i, v) in velocities(&g).into_iter().enumerate() {
            let (x, z) = dims.coords(i);
            let border = x == 0 || z == 0 || x == 4 || z == 4;
            assert_eq!(v, if border { 35.0 } else { 0.0 }, "box ({x}, {z})");
        }
        assert_eq!(velocities(&g).iter().filter(|&&v| v != 0.0).count(), 16);
        // Ring 0 restarts from the outermost ring
        assert_eq!(g.pattern(PatternKind::Ring).cursor(), Some(2));
    }

    #[test]
    fn test_patterns_are_independent() {
        let run = |snake: bool, wave: bool| {
            let mut g = grid(4, 4);
            if snake {
                g.switch_snake();
            }
            if wave {
                g.switch_wave();
            }
            // dt = 0 keeps velocities a pure sum of impulses
            for frame in 0..40 {
                g.update(0.0, frame as f32 * 0.05);
            }
            velocities(&g)
        };

        let snake = run(true, false);
        let wave = run(false, true);
        let both = run(true, true);
        for i in 0..16 {
            assert!((both[i] - (snake[i] + wave[i])).abs() < 1e-3, "box {i}");
        }
        assert!(snake.iter().any(|&v| v != 0.0));
        assert!(wave.iter().any(|&v| v != 0.0));
    }

    #[test]
    fn test_pattern_reads_current_push_velocity() {
        let mut g = grid(4, 4);
        g.switch_wave();
        g.update(0.0, 0.1);
        g.change_velocity();
        g.update(0.0, 0.2);

        let v = velocities(&g);
        assert!(v[0..4].iter().all(|&v| v == 35.0));
        assert!(v[4..8].iter().all(|&v| v == 45.0));
        assert!(v[8..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_impulse_integrated_same_frame() {
        let mut g = grid(3, 1);
        g.switch_snake();
        g.update(DT, 1.0);
        assert!(g.boxes()[0].offset > 0.0);
        assert_eq!(g.boxes()[1].offset, 0.0);
    }

    #[test]
    fn test_grid_settles_after_push_all() {
        let mut g = grid(3, 3);
        g.push_all();
        for frame in 0..600 {
            g.update(DT, frame as f32 * DT);
        }
        assert!(g.boxes().iter().all(|b| b.is_at_rest()));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut g = grid(2, 2);
        g.switch_rings();
        let json = serde_json::to_string(&g.snapshot()).unwrap();
        let back: GridSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ring, Some(1));
        assert_eq!(back.offsets.len(), 4);
        assert_eq!(back.snake, None);
    }
}
