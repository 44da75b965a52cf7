//! Background radiance for rays that escape the scene.

use crate::Color;
use luma_math::Ray;

/// Environment light seen by rays that hit nothing.
pub trait Sky: Send + Sync {
    /// Radiance arriving along `ray`.
    fn color(&self, ray: &Ray) -> Color;
}

/// Vertical gradient, `bottom` at the horizon-down direction and `top` straight up.
#[derive(Debug, Clone, Copy)]
pub struct SkyGradient {
    pub bottom: Color,
    pub top: Color,
}

impl SkyGradient {
    pub fn new(bottom: Color, top: Color) -> Self {
        Self { bottom, top }
    }
}

impl Default for SkyGradient {
    /// White to light blue.
    fn default() -> Self {
        Self::new(Color::ONE, Color::new(0.5, 0.7, 1.0))
    }
}

impl Sky for SkyGradient {
    fn color(&self, ray: &Ray) -> Color {
        let unit_direction = ray.direction().normalize();
        let a = 0.5 * (unit_direction.y + 1.0);
        self.bottom * (1.0 - a) + self.top * a
    }
}

/// The same radiance in every direction.
#[derive(Debug, Clone, Copy)]
pub struct MonochromeSky {
    pub color: Color,
}

impl MonochromeSky {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Sky for MonochromeSky {
    fn color(&self, _ray: &Ray) -> Color {
        self.color
    }
}
