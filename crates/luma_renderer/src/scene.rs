//! Camera, world and sky bundled for rendering.

use std::fmt;
use std::sync::Arc;

use crate::{Camera, Hittable, Sky, SkyGradient};

/// Everything a renderer needs to trace paths.
///
/// Geometry and materials are immutable once built, so cloning a scene only
/// bumps reference counts. Each worker clones the scene and brings its own
/// random generator; nothing mutable is shared.
#[derive(Clone)]
pub struct Scene {
    camera: Camera,
    world: Arc<dyn Hittable>,
    sky: Arc<dyn Sky>,
}

impl Scene {
    /// Create a scene lit by the default gradient sky.
    pub fn new(camera: Camera, world: impl Hittable + 'static) -> Self {
        Self {
            camera,
            world: Arc::new(world),
            sky: Arc::new(SkyGradient::default()),
        }
    }

    /// Replace the sky.
    pub fn with_sky(mut self, sky: impl Sky + 'static) -> Self {
        self.sky = Arc::new(sky);
        self
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn world(&self) -> &dyn Hittable {
        self.world.as_ref()
    }

    pub fn sky(&self) -> &dyn Sky {
        self.sky.as_ref()
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("camera", &self.camera)
            .finish_non_exhaustive()
    }
}
