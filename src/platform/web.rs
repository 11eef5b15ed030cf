//! Browser bindings
//!
//! Exposes the grid to a JavaScript renderer. The page owns the clock, the
//! meshes and the key listeners; it forwards key presses, calls `update`
//! once per animation frame and reads offsets back by box index.

use wasm_bindgen::prelude::*;

use crate::settings::GridConfig;
use crate::sim::{FrameInput, Grid, tick};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Box grid (web) ready");
}

#[wasm_bindgen]
pub struct WebGrid {
    grid: Grid,
    input: FrameInput,
}

#[wasm_bindgen]
impl WebGrid {
    /// Create a grid, seeding random pushes from the page clock
    #[wasm_bindgen(constructor)]
    pub fn new(name: String, x_size: u32, z_size: u32) -> Result<WebGrid, JsError> {
        let seed = js_sys::Date::now() as u64;
        let config = GridConfig::new(name, x_size, z_size).with_seed(seed);
        Ok(Self {
            grid: Grid::new(&config)?,
            input: FrameInput::default(),
        })
    }

    /// Create a grid from a JSON config
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<WebGrid, JsError> {
        let config = GridConfig::from_json(json)?;
        Ok(Self {
            grid: Grid::new(&config)?,
            input: FrameInput::default(),
        })
    }

    /// Queue the command bound to a key. Returns false for unbound keys.
    pub fn key(&mut self, key: &str) -> bool {
        match key.chars().next().and_then(super::command_for_key) {
            Some(command) => {
                self.input.commands.push(command);
                true
            }
            None => false,
        }
    }

    /// Run one frame with the queued commands
    pub fn update(&mut self, dt: f32, elapsed: f32) {
        tick(&mut self.grid, &self.input, dt, elapsed);
        self.input.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    /// Offsets of every box in index order
    pub fn offsets(&self) -> js_sys::Float32Array {
        let offsets: Vec<f32> = self.grid.offsets().collect();
        js_sys::Float32Array::from(offsets.as_slice())
    }

    /// World-space slot of a box as [x, y, z], offset applied
    pub fn position(&self, index: usize) -> Option<Vec<f32>> {
        self.grid
            .box_at(index)
            .map(|b| b.world_position().to_array().to_vec())
    }
}
