//! Core path tracing renderer.
//!
//! Implements progressive Monte Carlo path tracing:
//! - Iterative bounce loop bounded by `max_bounces`
//! - Jittered sub-pixel sampling for anti-aliasing
//! - Incremental passes that add samples into a [`Canvas`]

use crate::hittable::{HitRecord, T_MIN};
use crate::material::ScatterRecord;
use crate::random::gen_f32;
use crate::{Canvas, Color, RenderError, Scene};
use luma_math::{Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Total samples per pixel before rendering stops
    pub samples_per_pixel: u32,
    /// Samples per pixel added by each pass
    pub samples_per_iteration: u32,
    /// Maximum ray bounce depth
    pub max_bounces: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 10_000,
            samples_per_iteration: 1,
            max_bounces: 50,
        }
    }
}

impl RenderConfig {
    /// Reject configurations that could never produce an image.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples_per_pixel must be at least 1".into(),
            ));
        }
        if self.samples_per_iteration == 0 {
            return Err(RenderError::InvalidConfig(
                "samples_per_iteration must be at least 1".into(),
            ));
        }
        if self.max_bounces == 0 {
            return Err(RenderError::InvalidConfig(
                "max_bounces must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Scratch state for tracing paths.
///
/// Owned by a single trace loop and reused for every ray, so the hot path
/// never allocates.
#[derive(Default)]
pub struct TraceScratch<'a> {
    pub hit: HitRecord<'a>,
    pub scatter: ScatterRecord,
    /// Rays intersected against the world so far
    pub rays: u64,
}

/// Compute the radiance carried back along a camera ray.
///
/// Each iteration intersects the world once. Escaping rays pick up the sky,
/// absorbed rays return the material's emission as-is, and paths still bouncing
/// after `max_bounces` contribute nothing. That truncation biases dark but
/// bounds the cost of every sample.
pub fn ray_color<'a>(
    ray: &Ray,
    scene: &'a Scene,
    max_bounces: u32,
    rng: &mut dyn RngCore,
    scratch: &mut TraceScratch<'a>,
) -> Color {
    let world = scene.world();
    let window = Interval::new(T_MIN, f32::INFINITY);

    let mut attenuation = Color::ONE;
    let mut ray = *ray;

    for _ in 0..max_bounces {
        scratch.rays += 1;

        if !world.hit(&ray, window, &mut scratch.hit) {
            return attenuation * scene.sky().color(&ray);
        }

        let material = scratch.hit.material;
        if !material.scatter(&ray, &scratch.hit, rng, &mut scratch.scatter) {
            let hit = &scratch.hit;
            return material.emitted(hit.u, hit.v, hit.p);
        }

        attenuation *= scratch.scatter.attenuation;
        ray = scratch.scatter.ray;
    }

    Color::ZERO
}

/// Single-threaded progressive renderer.
///
/// Owns a canvas, a scene handle and its own random stream. Each call to
/// [`Renderer::render`] adds `samples_per_iteration` samples to every pixel
/// until the `samples_per_pixel` budget is spent.
pub struct Renderer {
    scene: Scene,
    config: RenderConfig,
    canvas: Canvas,
    rng: StdRng,
    sample_count: u32,
    render_count: u32,
    ray_count: u64,
}

impl Renderer {
    /// Create a renderer with an entropy-seeded random stream.
    pub fn new(scene: Scene, width: u32, height: u32, config: RenderConfig) -> Self {
        Self {
            scene,
            config,
            canvas: Canvas::new(width, height),
            rng: StdRng::from_entropy(),
            sample_count: 0,
            render_count: 0,
            ray_count: 0,
        }
    }

    /// Use a deterministic random stream.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// True once the sample budget is spent; further passes do nothing.
    pub fn is_done(&self) -> bool {
        self.sample_count >= self.config.samples_per_pixel
    }

    /// Run one pass over every pixel.
    ///
    /// Returns false without touching the canvas if the budget is already
    /// spent. The last pass is shortened so the budget is never exceeded.
    pub fn render(&mut self) -> bool {
        if self.is_done() {
            return false;
        }

        let samples = self
            .config
            .samples_per_iteration
            .min(self.config.samples_per_pixel - self.sample_count);
        let max_bounces = self.config.max_bounces;

        let scene = &self.scene;
        let canvas = &mut self.canvas;
        let rng = &mut self.rng;
        let width = canvas.width();
        let height = canvas.height();
        let mut scratch = TraceScratch::default();

        for y in 0..height {
            // Canvas rows run top-down, camera t runs bottom-up
            let row = (height - 1 - y) as f32;
            for x in 0..width {
                let mut pixel_color = Color::ZERO;
                for _ in 0..samples {
                    let s = (x as f32 + gen_f32(rng)) / width as f32;
                    let t = (row + gen_f32(rng)) / height as f32;
                    let ray = scene.camera().ray_at(s, t, rng);
                    pixel_color += ray_color(&ray, scene, max_bounces, rng, &mut scratch);
                }
                canvas.accumulate(x, y, pixel_color);
            }
        }

        canvas.add_sample_count(samples);
        self.ray_count = scratch.rays;
        self.sample_count += samples;
        self.render_count += 1;

        true
    }

    /// Accumulated samples since the last [`Renderer::take_canvas`].
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Hand off the accumulated samples and start a fresh canvas.
    ///
    /// The sample budget keeps counting across hand-offs.
    pub fn take_canvas(&mut self) -> Canvas {
        let fresh = Canvas::new(self.canvas.width(), self.canvas.height());
        std::mem::replace(&mut self.canvas, fresh)
    }

    /// Samples per pixel rendered over the renderer's lifetime.
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Number of completed passes.
    pub fn render_count(&self) -> u32 {
        self.render_count
    }

    /// Rays traced during the most recent pass.
    pub fn ray_count(&self) -> u64 {
        self.ray_count
    }
}
