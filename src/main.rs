//! Box Grid entry point
//!
//! Native builds run a headless host: a frame script drives the grid at a
//! fixed 60 Hz and the final state is printed as JSON. The browser build is
//! driven from JavaScript through `box_grid::platform::web`.
//!
//! Usage: `box-grid [SCRIPT] [CONFIG.json]`
//!
//! SCRIPT holds one key per frame (`.` for an idle frame), using the
//! default bindings: F push all, V push random, X snake, G wave, U rings,
//! H hold, O stop all, M velocity, K floor.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::Instant;

    use box_grid::platform::parse_script;
    use box_grid::sim::{FrameInput, Grid, tick};
    use box_grid::{FpsCounter, GridConfig, GridError};

    /// Fixed host frame delta
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Idle frames run after the script so patterns play out
    const TAIL_FRAMES: usize = 180;
    /// Script used when none is given: start snake and rings, then push
    /// everything a few frames later
    const DEFAULT_SCRIPT: &str = "xu..........f";

    pub fn run() -> Result<(), GridError> {
        let mut args = std::env::args().skip(1);
        let script = args.next().unwrap_or_else(|| DEFAULT_SCRIPT.to_string());
        let config = match args.next() {
            Some(path) => load_config(&path)?,
            None => GridConfig::new("demo", 20, 20),
        };

        let mut grid = Grid::new(&config)?;
        let mut frames = parse_script(&script);
        frames.extend(std::iter::repeat_n(None, TAIL_FRAMES));
        log::info!("Running {} frames", frames.len());

        let mut fps = FpsCounter::default();
        let mut input = FrameInput::default();
        let mut elapsed = 0.0;
        let mut last = Instant::now();

        for command in frames {
            input.clear();
            input.commands.extend(command);

            elapsed += FRAME_DT;
            tick(&mut grid, &input, FRAME_DT, elapsed);

            let now = Instant::now();
            fps.record(now.duration_since(last).as_secs_f32());
            last = now;
        }

        let moving = grid.boxes().iter().filter(|b| !b.is_at_rest()).count();
        log::info!(
            "Done at t={:.2}s: {} of {} boxes moving, host rate ~{} fps",
            elapsed,
            moving,
            grid.len(),
            fps.average()
        );

        let json = serde_json::to_string_pretty(&grid.snapshot())?;
        println!("{json}");
        Ok(())
    }

    fn load_config(path: &str) -> Result<GridConfig, GridError> {
        match std::fs::read_to_string(path) {
            Ok(json) => GridConfig::from_json(&json),
            Err(e) => {
                log::warn!("Could not read config {path}: {e}, using defaults");
                Ok(GridConfig::default())
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Box Grid (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
