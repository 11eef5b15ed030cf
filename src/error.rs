//! Error types
//!
//! Only construction can fail. Per-frame operations are total.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid dimensions must be non-zero (got {x_size}x{z_size})")]
    EmptyGrid { x_size: u32, z_size: u32 },
    #[error("invalid grid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
