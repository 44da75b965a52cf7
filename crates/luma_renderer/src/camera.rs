//! Thin-lens camera for ray generation.

use crate::random::random_in_unit_disk;
use luma_math::{Ray, Vec3};
use rand::RngCore;

/// Camera mapping normalized image-plane coordinates to world-space rays.
///
/// All derived vectors are computed once in [`Camera::new`]; the camera is
/// immutable afterwards and can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct Camera {
    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    aspect_ratio: f32,

    // Derived
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Create a camera looking from `look_from` towards `look_at`.
    ///
    /// - `vfov`: vertical field of view in degrees
    /// - `aspect_ratio`: image width / height
    /// - `aperture`: lens diameter, 0 for a pinhole
    /// - `focus_dist`: distance to the plane in perfect focus
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
        vfov: f32,
        aspect_ratio: f32,
        aperture: f32,
        focus_dist: f32,
    ) -> Self {
        let theta = vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = aspect_ratio * half_height;

        // Camera basis: w looks backwards, u to the right, v up
        let w = (look_from - look_at).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        let x_axis = half_width * focus_dist * u;
        let y_axis = half_height * focus_dist * v;
        let origin = look_from;
        let lower_left_corner = origin - x_axis - y_axis - focus_dist * w;

        log::debug!(
            "Camera origin {origin}, w {w}, u {u}, v {v}, aperture {aperture}, focus distance {focus_dist}"
        );

        Self {
            look_from,
            look_at,
            aspect_ratio,
            origin,
            lower_left_corner,
            horizontal: 2.0 * x_axis,
            vertical: 2.0 * y_axis,
            u,
            v,
            lens_radius: aperture / 2.0,
        }
    }

    /// Generate a ray through image-plane coordinates `(s, t)` in [0, 1].
    ///
    /// `(0, 0)` is the lower-left corner of the image. With a non-zero
    /// aperture the origin is jittered across the lens disk.
    pub fn ray_at(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        let ray_origin = self.origin + offset;

        Ray::new(ray_origin, (target - ray_origin).normalize())
    }

    pub fn look_from(&self) -> Vec3 {
        self.look_from
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
}

impl Default for Camera {
    /// Pinhole camera at the origin looking down -Z with a 90° field of view.
    fn default() -> Self {
        Self::new(
            Vec3::ZERO,
            Vec3::NEG_Z,
            Vec3::Y,
            90.0,
            16.0 / 9.0,
            0.0,
            1.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_camera_basis() {
        let camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 90.0, 2.0, 0.0, 1.0);

        assert_eq!(camera.origin, Vec3::ZERO);
        assert!((camera.lower_left_corner - Vec3::new(-2.0, -1.0, -1.0)).length() < 1e-5);
        assert!((camera.u - Vec3::X).length() < 0.001);
        assert!((camera.v - Vec3::Y).length() < 0.001);
        // 90° fov at focus distance 1: the image plane spans [-1, 1] vertically
        assert!((camera.vertical - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
        assert!((camera.horizontal - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 90.0, 2.0, 0.0, 1.0);
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.ray_at(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin(), Vec3::ZERO);
        assert!((ray.direction() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_corner_rays() {
        let camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 90.0, 1.0, 0.0, 1.0);
        let mut rng = StdRng::seed_from_u64(42);

        let lower_left = camera.ray_at(0.0, 0.0, &mut rng);
        assert!(lower_left.direction().x < 0.0 && lower_left.direction().y < 0.0);

        let upper_right = camera.ray_at(1.0, 1.0, &mut rng);
        assert!(upper_right.direction().x > 0.0 && upper_right.direction().y > 0.0);
    }

    #[test]
    fn test_aperture_jitters_origin_but_keeps_focus() {
        let focus_dist = 5.0;
        let camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 40.0, 1.0, 0.5, focus_dist);
        let mut rng = StdRng::seed_from_u64(3);

        let focus_point = Vec3::new(0.0, 0.0, -focus_dist);
        let mut moved = false;
        for _ in 0..32 {
            let ray = camera.ray_at(0.5, 0.5, &mut rng);
            assert!(ray.origin().length() < 0.25 + 1e-5);
            moved |= ray.origin() != Vec3::ZERO;

            // Every lens sample still passes through the focus point
            let t = (focus_point - ray.origin()).length();
            assert!((ray.at(t) - focus_point).length() < 1e-3);
        }
        assert!(moved);
    }
}
