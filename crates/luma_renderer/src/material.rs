//! Material trait for surface scattering.

use crate::hittable::HitRecord;
use crate::random::{gen_f32, random_in_unit_sphere};
use luma_math::{Ray, Vec3};
use rand::RngCore;

/// Color type alias (linear RGB, unbounded while accumulating)
pub type Color = Vec3;

/// Outgoing ray and its attenuation, filled in by [`Material::scatter`].
///
/// Like [`HitRecord`], one instance is reused for every bounce of a trace.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScatterRecord {
    pub ray: Ray,
    pub attenuation: Color,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns true and fills `scatter` if the path continues, or false if
    /// the ray is absorbed. `scatter` must not be read after a false return.
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
        scatter: &mut ScatterRecord,
    ) -> bool;

    /// Get emitted light from this material.
    ///
    /// Most materials return black (no emission).
    fn emitted(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        Color::ZERO
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
        scatter: &mut ScatterRecord,
    ) -> bool {
        // Target point inside the unit sphere tangent at the hit point
        let target = rec.p + rec.normal + random_in_unit_sphere(rng);
        let mut direction = target - rec.p;

        // Catch degenerate scatter direction
        if direction.length_squared() < 1e-8 {
            direction = rec.normal;
        }

        scatter.ray = Ray::new(rec.p, direction.normalize());
        scatter.attenuation = self.albedo;
        true
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror. Negative values are clamped to 0.
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.max(0.0),
        }
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
        scatter: &mut ScatterRecord,
    ) -> bool {
        let reflected = reflect(ray_in.direction(), rec.normal);
        let direction = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Fuzzed below the surface: absorbed
        if direction.dot(rec.normal) <= 0.0 {
            return false;
        }

        scatter.ray = Ray::new(rec.p, direction.normalize());
        scatter.attenuation = self.albedo;
        true
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }
}

/// Schlick's approximation for reflectance.
///
/// `R(cosine) = r0 + (1 - r0)(1 - cosine)^5` with `r0 = ((1 - n) / (1 + n))^2`.
pub fn schlick(cosine: f32, ior: f32) -> f32 {
    let r = (1.0 - ior) / (1.0 + ior);
    let r0 = r * r;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
        scatter: &mut ScatterRecord,
    ) -> bool {
        let unit_direction = ray_in.direction().normalize();
        let ray_dot_normal = unit_direction.dot(rec.normal);

        // Positive dot: leaving the medium through an outward normal
        let (outward_normal, ni_over_nt, cosine) = if ray_dot_normal > 0.0 {
            (-rec.normal, self.ior, (self.ior * ray_dot_normal).min(1.0))
        } else {
            (rec.normal, 1.0 / self.ior, -ray_dot_normal)
        };

        let direction = match refract(unit_direction, outward_normal, ni_over_nt) {
            Some(refracted) if gen_f32(rng) >= schlick(cosine, self.ior) => refracted,
            // Total internal reflection, or reflection chosen with probability R
            _ => reflect(unit_direction, rec.normal),
        };

        scatter.ray = Ray::new(rec.p, direction.normalize());
        scatter.attenuation = Color::ONE;
        true
    }
}

/// Constant-color light emitter.
///
/// Absorbs every ray that reaches it and contributes its emission instead.
#[derive(Debug, Clone)]
pub struct DiffuseLight {
    emit: Color,
}

impl DiffuseLight {
    /// Create a new diffuse light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
        _scatter: &mut ScatterRecord,
    ) -> bool {
        false
    }

    fn emitted(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        self.emit
    }
}

/// Material that absorbs everything and emits nothing.
///
/// Stands in wherever a material reference is required but none was set.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMaterial;

impl Material for NullMaterial {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
        _scatter: &mut ScatterRecord,
    ) -> bool {
        false
    }
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface, or None on total internal reflection.
#[inline]
fn refract(uv: Vec3, n: Vec3, ni_over_nt: f32) -> Option<Vec3> {
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(ni_over_nt * (uv - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hit_at_origin(normal: Vec3) -> HitRecord<'static> {
        HitRecord {
            p: Vec3::ZERO,
            normal,
            t: 1.0,
            front_face: true,
            ..HitRecord::default()
        }
    }

    #[test]
    fn test_schlick_normal_incidence_is_r0() {
        for ior in [1.0_f32, 1.33, 1.5, 2.4] {
            let r = (1.0 - ior) / (1.0 + ior);
            assert_eq!(schlick(1.0, ior), r * r);
        }
        assert!((schlick(1.0, 1.5) - 0.04).abs() < 1e-6);
    }

    #[test]
    fn test_schlick_grazing_is_total() {
        assert!((schlick(0.0, 1.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_lambertian_scatters_into_hemisphere() {
        let material = Lambertian::new(Color::new(0.5, 0.6, 0.7));
        let rec = hit_at_origin(Vec3::Y);
        let ray_in = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let mut rng = StdRng::seed_from_u64(7);
        let mut scatter = ScatterRecord::default();

        for _ in 0..500 {
            assert!(material.scatter(&ray_in, &rec, &mut rng, &mut scatter));
            assert_eq!(scatter.attenuation, Color::new(0.5, 0.6, 0.7));
            assert_eq!(scatter.ray.origin, Vec3::ZERO);
            assert!(scatter.ray.direction.dot(Vec3::Y) >= 0.0);
            assert!((scatter.ray.direction.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_metal_perfect_mirror() {
        let material = Metal::new(Color::splat(0.8), 0.0);
        let rec = hit_at_origin(Vec3::Y);
        let ray_in = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let mut rng = StdRng::seed_from_u64(7);
        let mut scatter = ScatterRecord::default();

        assert!(material.scatter(&ray_in, &rec, &mut rng, &mut scatter));
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((scatter.ray.direction - expected).length() < 1e-5);
        assert_eq!(scatter.attenuation, Color::splat(0.8));
    }

    #[test]
    fn test_metal_absorbs_rays_pushed_below_surface() {
        // Grazing incidence with heavy fuzz: some scatters must be absorbed
        let material = Metal::new(Color::splat(0.8), 1.0);
        let rec = hit_at_origin(Vec3::Y);
        let ray_in = Ray::new(Vec3::ZERO, Vec3::new(1.0, -0.01, 0.0));
        let mut rng = StdRng::seed_from_u64(11);
        let mut scatter = ScatterRecord::default();

        let absorbed = (0..200)
            .filter(|_| !material.scatter(&ray_in, &rec, &mut rng, &mut scatter))
            .count();
        assert!(absorbed > 0);
        assert!(absorbed < 200);
    }

    #[test]
    fn test_dielectric_does_not_tint() {
        let material = Dielectric::new(1.5);
        let rec = hit_at_origin(Vec3::Y);
        let ray_in = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.3, -1.0, 0.0));
        let mut rng = StdRng::seed_from_u64(5);
        let mut scatter = ScatterRecord::default();

        let mut reflected = 0;
        let mut refracted = 0;
        for _ in 0..1000 {
            assert!(material.scatter(&ray_in, &rec, &mut rng, &mut scatter));
            assert_eq!(scatter.attenuation, Color::ONE);
            if scatter.ray.direction.y > 0.0 {
                reflected += 1;
            } else {
                refracted += 1;
            }
        }
        // Mostly transmitted near normal incidence, occasionally reflected
        assert!(refracted > reflected);
        assert!(reflected > 0);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        // Leaving glass at a steep angle: the outward normal points along the ray
        let material = Dielectric::new(1.5);
        let rec = hit_at_origin(Vec3::Y);
        let ray_in = Ray::new(Vec3::new(-1.0, -0.2, 0.0), Vec3::new(1.0, 0.2, 0.0));
        let mut rng = StdRng::seed_from_u64(9);
        let mut scatter = ScatterRecord::default();

        for _ in 0..100 {
            assert!(material.scatter(&ray_in, &rec, &mut rng, &mut scatter));
            // Always reflected back below the surface
            assert!(scatter.ray.direction.y < 0.0);
        }
    }

    #[test]
    fn test_light_absorbs_and_emits() {
        let material = DiffuseLight::new(Color::new(4.0, 4.0, 4.0));
        let rec = hit_at_origin(Vec3::Y);
        let mut rng = StdRng::seed_from_u64(1);
        let mut scatter = ScatterRecord::default();

        assert!(!material.scatter(&Ray::default(), &rec, &mut rng, &mut scatter));
        assert_eq!(material.emitted(0.0, 0.0, Vec3::ZERO), Color::splat(4.0));
    }

    #[test]
    fn test_null_material_is_black_absorber() {
        let material = NullMaterial;
        let rec = hit_at_origin(Vec3::Y);
        let mut rng = StdRng::seed_from_u64(1);
        let mut scatter = ScatterRecord::default();

        assert!(!material.scatter(&Ray::default(), &rec, &mut rng, &mut scatter));
        assert_eq!(material.emitted(0.5, 0.5, Vec3::ONE), Color::ZERO);
    }
}
