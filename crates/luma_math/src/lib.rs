//! Math primitives for the Luma path tracer.
//!
//! `Vec3` from glam doubles as the color type: points, directions and
//! linear RGB radiance all share the same three-component representation.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;
