//! Axis-aligned box built from six rectangles.

use crate::{
    hittable::{HitRecord, Hittable, HittableList},
    rect::Rect,
    Material,
};
use luma_math::{Interval, Ray, Vec3};

/// An axis-aligned cube (or box) centered at `center` with half extents `size`.
///
/// The faces are generated once at construction and owned by the cube.
pub struct Cube {
    center: Vec3,
    size: Vec3,
    faces: HittableList,
}

impl Cube {
    /// Create a box spanning `center - size` to `center + size`.
    pub fn new<M: Material + Clone + 'static>(center: Vec3, size: Vec3, material: M) -> Self {
        let size = size.abs();
        let min = center - size;
        let max = center + size;

        let mut faces = HittableList::new();
        faces.add(Rect::xy(min.x, max.x, min.y, max.y, min.z, material.clone()).with_normal(Vec3::NEG_Z));
        faces.add(Rect::xy(min.x, max.x, min.y, max.y, max.z, material.clone()).with_normal(Vec3::Z));
        faces.add(Rect::yz(min.y, max.y, min.z, max.z, min.x, material.clone()).with_normal(Vec3::NEG_X));
        faces.add(Rect::yz(min.y, max.y, min.z, max.z, max.x, material.clone()).with_normal(Vec3::X));
        faces.add(Rect::xz(min.x, max.x, min.z, max.z, min.y, material.clone()).with_normal(Vec3::NEG_Y));
        faces.add(Rect::xz(min.x, max.x, min.z, max.z, max.y, material).with_normal(Vec3::Y));

        Self { center, size, faces }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Half extents along each axis.
    pub fn size(&self) -> Vec3 {
        self.size
    }
}

impl Hittable for Cube {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        self.faces.hit(ray, ray_t, rec)
    }
}
