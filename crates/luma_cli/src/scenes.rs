//! Demo scenes built through the renderer's public construction API.

use luma_renderer::{
    Camera, Color, Cube, Dielectric, DiffuseLight, HittableList, Lambertian, Metal,
    MonochromeSky, Rect, Scene, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cli::SceneChoice;

pub fn build(choice: SceneChoice, aspect_ratio: f32, seed: Option<u64>) -> Scene {
    match choice {
        SceneChoice::Spheres => spheres(aspect_ratio),
        SceneChoice::Random => random_spheres(aspect_ratio, seed),
        SceneChoice::Lighting => lighting(aspect_ratio),
    }
}

fn spheres(aspect_ratio: f32) -> Scene {
    let mut world = HittableList::new();
    world.add(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        Lambertian::new(Color::new(0.1, 0.2, 0.5)),
    ));
    world.add(Sphere::new(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        Lambertian::new(Color::new(0.8, 0.8, 0.0)),
    ));
    world.add(Sphere::new(
        Vec3::new(1.0, 0.0, -1.0),
        0.5,
        Metal::new(Color::new(0.8, 0.6, 0.2), 0.0),
    ));
    // Glass shell: outer surface plus an inverted inner surface
    world.add(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, Dielectric::new(1.5)));
    world.add(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), -0.45, Dielectric::new(1.5)));

    let look_from = Vec3::new(3.0, 3.0, 2.0);
    let look_at = Vec3::new(0.0, 0.0, -1.0);
    let camera = Camera::new(
        look_from,
        look_at,
        Vec3::Y,
        20.0,
        aspect_ratio,
        0.5,
        (look_from - look_at).length(),
    );

    Scene::new(camera, world)
}

fn random_spheres(aspect_ratio: f32, seed: Option<u64>) -> Scene {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut world = HittableList::new();
    world.add(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Lambertian::new(Color::splat(0.5)),
    ));
    world.add(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, Dielectric::new(1.5)));
    world.add(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Lambertian::new(Color::new(0.4, 0.2, 0.1)),
    ));
    world.add(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Metal::new(Color::new(0.7, 0.6, 0.5), 0.0),
    ));

    let reference = Vec3::new(4.0, 0.2, 0.0);
    for a in -11..11 {
        for b in -11..11 {
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );
            if (center - reference).length() <= 0.9 {
                continue;
            }

            let choose_mat: f32 = rng.gen();
            if choose_mat < 0.8 {
                let albedo = Color::new(
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                );
                world.add(Sphere::new(center, 0.2, Lambertian::new(albedo)));
            } else if choose_mat < 0.95 {
                let albedo = Color::new(
                    0.5 + 0.5 * rng.gen::<f32>(),
                    0.5 + 0.5 * rng.gen::<f32>(),
                    0.5 + 0.5 * rng.gen::<f32>(),
                );
                let fuzz = 0.5 * rng.gen::<f32>();
                world.add(Sphere::new(center, 0.2, Metal::new(albedo, fuzz)));
            } else {
                world.add(Sphere::new(center, 0.2, Dielectric::new(1.5)));
            }
        }
    }

    log::info!("Random scene has {} objects", world.len());

    let camera = Camera::new(
        Vec3::new(13.0, 2.0, 3.0),
        Vec3::ZERO,
        Vec3::Y,
        20.0,
        aspect_ratio,
        0.1,
        10.0,
    );

    Scene::new(camera, world)
}

fn lighting(aspect_ratio: f32) -> Scene {
    let white = Lambertian::new(Color::splat(0.73));
    let red = Lambertian::new(Color::new(0.65, 0.05, 0.05));
    let green = Lambertian::new(Color::new(0.12, 0.45, 0.15));

    let mut world = HittableList::new();
    // Room spanning [-2, 2] in x, [0, 4] in y, [-6, -2] in z, open towards the camera
    world.add(Rect::yz(0.0, 4.0, -6.0, -2.0, -2.0, red).with_normal(Vec3::X));
    world.add(Rect::yz(0.0, 4.0, -6.0, -2.0, 2.0, green).with_normal(Vec3::NEG_X));
    world.add(Rect::xz(-2.0, 2.0, -6.0, -2.0, 0.0, white.clone()).with_normal(Vec3::Y));
    world.add(Rect::xz(-2.0, 2.0, -6.0, -2.0, 4.0, white.clone()).with_normal(Vec3::NEG_Y));
    world.add(Rect::xy(-2.0, 2.0, 0.0, 4.0, -6.0, white.clone()).with_normal(Vec3::Z));

    // Ceiling light, just below the ceiling
    world.add(
        Rect::xz(-0.6, 0.6, -4.6, -3.4, 3.99, DiffuseLight::new(Color::splat(15.0)))
            .with_normal(Vec3::NEG_Y),
    );

    world.add(Cube::new(Vec3::new(-0.8, 1.2, -4.6), Vec3::new(0.5, 1.2, 0.5), white));
    world.add(Cube::new(
        Vec3::new(0.8, 0.5, -3.6),
        Vec3::splat(0.5),
        Metal::new(Color::new(0.8, 0.85, 0.88), 0.05),
    ));
    world.add(Sphere::new(Vec3::new(0.8, 1.5, -3.6), 0.5, Dielectric::new(1.5)));

    let camera = Camera::new(
        Vec3::new(0.0, 2.0, 4.0),
        Vec3::new(0.0, 2.0, -4.0),
        Vec3::Y,
        40.0,
        aspect_ratio,
        0.0,
        8.0,
    );

    Scene::new(camera, world).with_sky(MonochromeSky::new(Color::splat(0.02)))
}
