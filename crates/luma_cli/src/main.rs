mod cli;
mod scenes;

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use image::RgbImage;
use log::LevelFilter;
use luma_renderer::{RenderConfig, RenderManager};

use crate::cli::Args;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const PROGRESS_INTERVAL: Duration = Duration::from_secs(2);

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Read a JSON config file, then apply command line overrides.
fn load_config(args: &Args) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => RenderConfig::default(),
    };

    if let Some(samples) = args.samples {
        config.samples_per_pixel = samples;
    }
    if let Some(samples) = args.samples_per_iteration {
        config.samples_per_iteration = samples;
    }
    if let Some(bounces) = args.max_bounces {
        config.max_bounces = bounces;
    }

    Ok(config)
}

fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Saved {}x{} image to {}", image.width(), image.height(), path.display());
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let workers = match args.workers {
        Some(workers) => workers,
        None => thread::available_parallelism().map_or(1, |n| n.get()),
    };

    let aspect_ratio = args.width as f32 / args.height.max(1) as f32;
    let scene = scenes::build(args.scene, aspect_ratio, args.seed);

    let mut manager = RenderManager::new(workers, scene, args.width, args.height, config)
        .context("Failed to set up renderer")?;
    if let Some(seed) = args.seed {
        manager = manager.with_seed(seed);
    }

    let config = *manager.config();
    log::info!(
        "Rendering {:?} at {}x{}: {} spp, {} per pass, {} bounces, {} workers",
        args.scene,
        args.width,
        args.height,
        config.samples_per_pixel,
        config.samples_per_iteration,
        config.max_bounces,
        manager.worker_count()
    );

    let latest: Arc<Mutex<Option<RgbImage>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&latest);
    manager.set_image_callback(move |image| {
        *sink.lock().unwrap_or_else(PoisonError::into_inner) = Some(image);
    });

    manager.start().context("Failed to start render workers")?;

    let deadline = Duration::from_secs_f64(args.seconds.max(0.0));
    let started = Instant::now();
    let mut last_report = started;
    loop {
        let stats = manager.stats();
        if stats.samples_per_pixel >= config.samples_per_pixel || !manager.is_running() {
            log::info!("Reached {} spp", stats.samples_per_pixel);
            break;
        }
        if started.elapsed() >= deadline {
            log::info!(
                "Time limit of {:.1}s reached at {} spp",
                args.seconds,
                stats.samples_per_pixel
            );
            break;
        }
        if last_report.elapsed() >= PROGRESS_INTERVAL {
            log::info!(
                "{} spp, {:.2} Mrays/s",
                stats.samples_per_pixel,
                stats.rays_per_second / 1e6
            );
            last_report = Instant::now();
        }
        thread::sleep(POLL_INTERVAL);
    }

    manager.stop();
    manager.clear_image_callback();

    let stats = manager.stats();
    log::info!(
        "Finished: {} merges, {} spp, {} rays in {:.2}s ({:.2} Mrays/s)",
        stats.merges,
        stats.samples_per_pixel,
        stats.total_rays,
        stats.elapsed.as_secs_f64(),
        stats.rays_per_second / 1e6
    );

    // Frames may arrive out of order, so prefer a fresh encode of the final total
    let image = match manager.make_image() {
        Some(image) => image,
        None => latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .context("No image was produced")?,
    };
    save_png(&image, &args.output)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let result = run(args);
    if let Err(err) = &result {
        log::error!("{err:#}");
    }
    log::logger().flush();
    result
}
