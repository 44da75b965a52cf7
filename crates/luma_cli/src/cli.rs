use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Demo scenes the CLI can build
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneChoice {
    /// Three spheres on a ground sphere, one of them a hollow glass bubble
    Spheres,
    /// Field of small random spheres around three large ones
    Random,
    /// Box room lit by an area light, with cubes inside
    Lighting,
}

#[derive(Debug, Parser)]
#[command(name = "luma")]
#[command(about = "Progressive multi-threaded path tracer")]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "spheres")]
    pub scene: SceneChoice,

    /// Image width in pixels
    #[arg(long, default_value_t = 400)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 200)]
    pub height: u32,

    /// Worker threads (defaults to available parallelism)
    #[arg(long, short = 'j')]
    pub workers: Option<usize>,

    /// JSON render configuration; flags below override its fields
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Total samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Samples per pixel added by each pass
    #[arg(long)]
    pub samples_per_iteration: Option<u32>,

    /// Maximum bounces per path
    #[arg(long)]
    pub max_bounces: Option<u32>,

    /// Stop after this many seconds even if the budget is not reached
    #[arg(long, default_value_t = 30.0)]
    pub seconds: f64,

    /// Seed the workers for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output PNG path
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
