//! Luma - progressive CPU path tracing
//!
//! A Monte Carlo path tracer that keeps refining its image: every pass adds
//! jittered samples per pixel, and a [`RenderManager`] merges the passes of
//! several worker threads into one converging picture.
//!
//! # Example
//!
//! ```ignore
//! use luma_renderer::*;
//!
//! let mut world = HittableList::new();
//! world.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, Lambertian::new(Color::splat(0.5))));
//!
//! let camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 90.0, 2.0, 0.0, 1.0);
//! let scene = Scene::new(camera, world);
//!
//! let mut manager = RenderManager::new(4, scene, 200, 100, RenderConfig::default())?;
//! manager.set_image_callback(|image| println!("frame {}x{}", image.width(), image.height()));
//! manager.start()?;
//! ```

mod camera;
mod canvas;
mod cube;
mod error;
mod hittable;
mod manager;
mod material;
mod random;
mod rect;
mod renderer;
mod scene;
mod sky;
mod sphere;

pub use camera::Camera;
pub use canvas::{color_to_rgb, linear_to_gamma, Canvas, MAX_PIXELS};
pub use cube::Cube;
pub use error::RenderError;
pub use hittable::{HitRecord, Hittable, HittableList, T_MIN};
pub use manager::{ImageCallback, RenderManager, RenderStats};
pub use material::{
    schlick, Color, Dielectric, DiffuseLight, Lambertian, Material, Metal, NullMaterial,
    ScatterRecord,
};
pub use random::{gen_f32, random_in_unit_disk, random_in_unit_sphere};
pub use rect::{Rect, RectAxis};
pub use renderer::{ray_color, RenderConfig, Renderer, TraceScratch};
pub use scene::Scene;
pub use sky::{MonochromeSky, Sky, SkyGradient};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from luma_math
pub use luma_math::{Interval, Ray, Vec3};

/// Re-export of the image type handed to callbacks
pub use image::RgbImage;
