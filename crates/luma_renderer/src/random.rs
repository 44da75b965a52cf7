//! Sampling helpers shared by the camera and the materials.
//!
//! Everything takes `&mut dyn RngCore` so each renderer can drive its own
//! generator while the scene itself stays immutable and shared.

use luma_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform f32 in [-1, 1).
#[inline]
fn gen_signed(rng: &mut dyn RngCore) -> f32 {
    gen_f32(rng) * 2.0 - 1.0
}

/// A random point strictly inside the unit sphere (rejection sampled).
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_signed(rng), gen_signed(rng), gen_signed(rng));
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// A random point strictly inside the unit disk on the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_signed(rng), gen_signed(rng), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
