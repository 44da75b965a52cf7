//! Multi-threaded progressive rendering.
//!
//! The manager runs one [`Renderer`] per worker thread. Every worker owns
//! its canvas and random stream; the scene is shared read-only. After each
//! pass a worker hands its *delta* canvas (only the samples of that pass) to
//! the manager, which merges it into a running total under a single lock,
//! re-encodes the image and publishes it through the image callback.
//!
//! Deltas never overlap, so every sample is counted exactly once and the
//! result does not depend on the order in which workers merge.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use image::RgbImage;

use crate::canvas::MAX_PIXELS;
use crate::{Canvas, RenderConfig, RenderError, Renderer, Scene};

/// Receives every newly merged image.
pub type ImageCallback = Arc<dyn Fn(RgbImage) + Send + Sync>;

/// Aggregate progress across all workers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderStats {
    /// Worker results merged so far
    pub merges: u64,
    /// Samples per pixel in the merged image
    pub samples_per_pixel: u32,
    /// Rays traced by all workers
    pub total_rays: u64,
    /// `total_rays` over the time workers have been running
    pub rays_per_second: f64,
    /// Time workers have been running, summed over every start/stop cycle
    pub elapsed: Duration,
}

/// Merge target shared by the workers.
struct Accumulator {
    /// Sum of every delta merged so far
    total: Canvas,
    /// `total` averaged and clamped, as last published
    output: Canvas,
    stats: RenderStats,
    /// Time spent running in earlier start/stop cycles
    busy: Duration,
    /// Set while workers are running
    resumed: Option<Instant>,
}

impl Accumulator {
    /// Time workers have been running, excluding setup and paused intervals.
    fn elapsed(&self) -> Duration {
        self.busy + self.resumed.map_or(Duration::ZERO, |at| at.elapsed())
    }

    fn update_rate(&mut self) {
        let elapsed = self.elapsed();
        self.stats.elapsed = elapsed;
        self.stats.rays_per_second = if elapsed.as_secs_f64() > 0.0 {
            self.stats.total_rays as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
    }
}

struct Shared {
    accumulator: Mutex<Accumulator>,
    callback: Mutex<Option<ImageCallback>>,
    running: AtomicBool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panicking worker must not take the others down with it
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Shared {
    /// Fold one worker's delta into the total and publish the new image.
    fn merge(&self, worker: usize, delta: &Canvas, rays: u64) {
        let image = {
            let mut guard = lock(&self.accumulator);
            let acc = &mut *guard;
            acc.total.add(delta);
            acc.output = acc.total.normalized();

            acc.stats.merges += 1;
            acc.stats.total_rays += rays;
            acc.stats.samples_per_pixel = acc.total.sample_count();
            acc.update_rate();

            log::debug!(
                "Merged worker {} result: merge {}, {} spp, {:.0} rays/s",
                worker,
                acc.stats.merges,
                acc.stats.samples_per_pixel,
                acc.stats.rays_per_second
            );

            acc.output.make_image()
        };

        let Some(image) = image else {
            log::warn!("Could not allocate output image, skipping frame");
            return;
        };

        // Deliver outside the accumulator lock so other workers can merge
        let callback = lock(&self.callback).clone();
        if let Some(callback) = callback {
            callback(image);
        }
    }
}

/// Split `samples` per pixel between at most `workers` workers.
///
/// Shares differ by at most one and add up to exactly `samples`. Workers
/// that would get nothing are left out.
fn split_budget(samples: u32, workers: usize) -> Vec<u32> {
    let workers = workers.min(samples as usize);
    if workers == 0 {
        return Vec::new();
    }
    let base = samples / workers as u32;
    let extra = samples as usize % workers;
    (0..workers).map(|i| base + u32::from(i < extra)).collect()
}

/// Owns the worker threads and the merged output.
pub struct RenderManager {
    scene: Scene,
    config: RenderConfig,
    worker_count: usize,
    seed: Option<u64>,
    /// Completed calls to `start`, used to give restarts fresh seeds
    generation: u64,
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl RenderManager {
    /// Validate the setup and prepare (but do not start) the workers.
    ///
    /// Fails for zero workers, an empty viewport, a viewport above
    /// [`MAX_PIXELS`] or an invalid configuration.
    pub fn new(
        worker_count: usize,
        scene: Scene,
        width: u32,
        height: u32,
        config: RenderConfig,
    ) -> Result<Self, RenderError> {
        if worker_count == 0 {
            return Err(RenderError::NoWorkers);
        }
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyViewport { width, height });
        }
        if u64::from(width) * u64::from(height) > MAX_PIXELS {
            return Err(RenderError::ViewportTooLarge {
                width,
                height,
                max_pixels: MAX_PIXELS,
            });
        }
        config.validate()?;

        let accumulator = Accumulator {
            total: Canvas::new(width, height),
            output: Canvas::new(width, height),
            stats: RenderStats::default(),
            busy: Duration::ZERO,
            resumed: None,
        };

        Ok(Self {
            scene,
            config,
            worker_count,
            seed: None,
            generation: 0,
            shared: Arc::new(Shared {
                accumulator: Mutex::new(accumulator),
                callback: Mutex::new(None),
                running: AtomicBool::new(false),
            }),
            workers: Vec::with_capacity(worker_count),
        })
    }

    /// Seed workers deterministically instead of from entropy.
    ///
    /// Every worker of every start gets its own stream derived from `seed`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Install the image callback, replacing any previous one.
    pub fn set_image_callback(&self, callback: impl Fn(RgbImage) + Send + Sync + 'static) {
        *lock(&self.shared.callback) = Some(Arc::new(callback));
    }

    /// Remove the image callback; merged frames are dropped until a new one is set.
    pub fn clear_image_callback(&self) {
        *lock(&self.shared.callback) = None;
    }

    /// Spawn workers for the samples still missing from the budget.
    ///
    /// Does nothing while workers are running or once the merged image holds
    /// `samples_per_pixel` samples. The remaining samples are split so the
    /// merged image ends up with exactly the budget. Restarting after
    /// [`RenderManager::stop`] keeps the merged total.
    pub fn start(&mut self) -> Result<(), RenderError> {
        if self.is_running() {
            return Ok(());
        }
        // Join workers that ran out of budget on their own
        self.stop();

        let (width, height, remaining) = {
            let acc = lock(&self.shared.accumulator);
            let remaining = self
                .config
                .samples_per_pixel
                .saturating_sub(acc.total.sample_count());
            (acc.total.width(), acc.total.height(), remaining)
        };
        if remaining == 0 {
            log::info!(
                "Sample budget of {} spp already reached",
                self.config.samples_per_pixel
            );
            return Ok(());
        }

        let shares = split_budget(remaining, self.worker_count);
        let first_seed = self
            .seed
            .map(|seed| seed.wrapping_add(self.generation.wrapping_mul(self.worker_count as u64)));
        self.generation += 1;

        lock(&self.shared.accumulator).resumed = Some(Instant::now());
        self.shared.running.store(true, Ordering::Release);
        log::info!(
            "Starting {} render workers at {}x{}, {} spp remaining",
            shares.len(),
            width,
            height,
            remaining
        );

        for (index, samples_per_pixel) in shares.into_iter().enumerate() {
            let config = RenderConfig {
                samples_per_pixel,
                ..self.config
            };
            let mut renderer = Renderer::new(self.scene.clone(), width, height, config);
            if let Some(seed) = first_seed {
                renderer = renderer.with_seed(seed.wrapping_add(index as u64));
            }
            let shared = Arc::clone(&self.shared);

            let spawned = thread::Builder::new()
                .name(format!("luma-worker-{index}"))
                .spawn(move || run_worker(index, renderer, shared));

            match spawned {
                Ok(handle) => self.workers.push(handle),
                Err(source) => {
                    self.stop();
                    return Err(RenderError::Spawn { index, source });
                }
            }
        }

        Ok(())
    }

    /// Signal every worker to stop after its current pass and wait for them.
    pub fn stop(&mut self) {
        self.shared.running.store(false, Ordering::Release);

        let joined = !self.workers.is_empty();
        for (index, handle) in self.workers.drain(..).enumerate() {
            if handle.join().is_err() {
                log::warn!("Render worker {index} panicked");
            }
        }

        let mut acc = lock(&self.shared.accumulator);
        if let Some(resumed) = acc.resumed.take() {
            acc.busy += resumed.elapsed();
            acc.update_rate();
        }
        if joined {
            log::info!("Render workers stopped");
        }
    }

    /// True while at least one worker thread is still rendering.
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
            && self.workers.iter().any(|handle| !handle.is_finished())
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Snapshot of the aggregate statistics.
    pub fn stats(&self) -> RenderStats {
        lock(&self.shared.accumulator).stats
    }

    /// Copy of the last published output canvas (averaged and clamped).
    pub fn output(&self) -> Canvas {
        lock(&self.shared.accumulator).output.clone()
    }

    /// Encode the last published output again, for callers that missed frames.
    pub fn make_image(&self) -> Option<RgbImage> {
        lock(&self.shared.accumulator).output.make_image()
    }
}

impl Drop for RenderManager {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Worker loop: render a pass, hand off the delta, repeat until cancelled.
fn run_worker(index: usize, mut renderer: Renderer, shared: Arc<Shared>) {
    log::info!("Render worker {index} started");

    while shared.running.load(Ordering::Acquire) {
        if !renderer.render() {
            log::info!(
                "Render worker {index} reached its budget of {} spp",
                renderer.sample_count()
            );
            break;
        }
        let delta = renderer.take_canvas();
        shared.merge(index, &delta, renderer.ray_count());
    }

    log::debug!("Render worker {index} exiting after {} passes", renderer.render_count());
}
