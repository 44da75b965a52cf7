//! Axis-aligned rectangles.
//!
//! A rectangle spans two free axes and sits at a fixed coordinate on the
//! third. The stored normal only decides which side is the front; the hit
//! record always gets it turned against the incoming ray.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use luma_math::{Interval, Ray, Vec3};

/// Orientation of an axis-aligned rectangle, named by its two free axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectAxis {
    /// Constant z, spans x and y
    Xy,
    /// Constant y, spans x and z
    Xz,
    /// Constant x, spans y and z
    Yz,
}

impl RectAxis {
    /// Component indices as (first free axis, second free axis, fixed axis).
    fn indices(self) -> (usize, usize, usize) {
        match self {
            RectAxis::Xy => (0, 1, 2),
            RectAxis::Xz => (0, 2, 1),
            RectAxis::Yz => (1, 2, 0),
        }
    }

    fn default_normal(self) -> Vec3 {
        match self {
            RectAxis::Xy => Vec3::Z,
            RectAxis::Xz => Vec3::Y,
            RectAxis::Yz => Vec3::X,
        }
    }
}

/// An axis-aligned rectangle.
#[derive(Clone)]
pub struct Rect<M: Material> {
    axis: RectAxis,
    a: Interval,
    b: Interval,
    k: f32,
    normal: Vec3,
    material: M,
}

impl<M: Material> Rect<M> {
    fn new(axis: RectAxis, a: Interval, b: Interval, k: f32, material: M) -> Self {
        Self {
            axis,
            a,
            b,
            k,
            normal: axis.default_normal(),
            material,
        }
    }

    /// Rectangle on the plane `z = k`, spanning `[x0, x1] × [y0, y1]`.
    pub fn xy(x0: f32, x1: f32, y0: f32, y1: f32, k: f32, material: M) -> Self {
        Self::new(RectAxis::Xy, Interval::new(x0, x1), Interval::new(y0, y1), k, material)
    }

    /// Rectangle on the plane `y = k`, spanning `[x0, x1] × [z0, z1]`.
    pub fn xz(x0: f32, x1: f32, z0: f32, z1: f32, k: f32, material: M) -> Self {
        Self::new(RectAxis::Xz, Interval::new(x0, x1), Interval::new(z0, z1), k, material)
    }

    /// Rectangle on the plane `x = k`, spanning `[y0, y1] × [z0, z1]`.
    pub fn yz(y0: f32, y1: f32, z0: f32, z1: f32, k: f32, material: M) -> Self {
        Self::new(RectAxis::Yz, Interval::new(y0, y1), Interval::new(z0, z1), k, material)
    }

    /// Set which side of the rectangle is the outside.
    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = normal.normalize_or_zero();
        self
    }

    pub fn axis(&self) -> RectAxis {
        self.axis
    }
}

impl<M: Material + 'static> Hittable for Rect<M> {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let (ia, ib, ik) = self.axis.indices();
        let origin = ray.origin();
        let direction = ray.direction();

        // Parallel rays give ±inf or NaN here, both fail the window test
        let t = (self.k - origin[ik]) / direction[ik];
        if !ray_t.surrounds(t) {
            return false;
        }

        let a = origin[ia] + t * direction[ia];
        let b = origin[ib] + t * direction[ib];
        if !self.a.contains(a) || !self.b.contains(b) {
            return false;
        }

        rec.u = (a - self.a.min) / self.a.size();
        rec.v = (b - self.b.min) / self.b.size();
        rec.t = t;
        rec.p = ray.at(t);
        rec.set_face_normal(ray, self.normal);
        rec.material = &self.material;

        true
    }
}
