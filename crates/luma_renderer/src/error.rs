//! Errors reported when setting up a render.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render manager needs at least one worker")]
    NoWorkers,

    #[error("viewport must be non-empty, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },

    #[error("viewport {width}x{height} exceeds the limit of {max_pixels} pixels")]
    ViewportTooLarge {
        width: u32,
        height: u32,
        max_pixels: u64,
    },

    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to spawn render worker {index}: {source}")]
    Spawn {
        index: usize,
        #[source]
        source: std::io::Error,
    },
}
