//! Statistical regression: estimates tighten as samples accumulate.

use luma_renderer::{
    Camera, Canvas, Color, HittableList, Lambertian, RenderConfig, Renderer, Scene, Sphere, Vec3,
};

const WIDTH: u32 = 100;
const HEIGHT: u32 = 50;
const SEEDS: [u64; 3] = [1, 2, 3];

fn one_sphere_scene() -> Scene {
    let mut world = HittableList::new();
    world.add(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        Lambertian::new(Color::new(0.5, 0.5, 0.5)),
    ));
    let camera = Camera::new(
        Vec3::ZERO,
        Vec3::NEG_Z,
        Vec3::Y,
        90.0,
        WIDTH as f32 / HEIGHT as f32,
        0.0,
        1.0,
    );
    Scene::new(camera, world)
}

fn render_to_budget(scene: &Scene, samples_per_pixel: u32, seed: u64) -> Canvas {
    let config = RenderConfig {
        samples_per_pixel,
        samples_per_iteration: 4,
        max_bounces: 10,
    };
    let mut renderer = Renderer::new(scene.clone(), WIDTH, HEIGHT, config).with_seed(seed);
    while renderer.render() {}
    renderer.canvas().normalized()
}

/// Mean over pixels of the per-pixel variance across seeds.
fn mean_variance(renders: &[Canvas]) -> f32 {
    let n = renders.len() as f32;
    let pixels = renders[0].pixels().len();
    let mut total = 0.0;
    for i in 0..pixels {
        let mean = renders.iter().map(|c| c.pixels()[i]).sum::<Color>() / n;
        let variance = renders
            .iter()
            .map(|c| (c.pixels()[i] - mean).length_squared())
            .sum::<f32>()
            / n;
        total += variance;
    }
    total / pixels as f32
}

#[test]
fn one_sphere_converges() {
    let scene = one_sphere_scene();

    let coarse: Vec<Canvas> = SEEDS.iter().map(|&s| render_to_budget(&scene, 4, s)).collect();
    let fine: Vec<Canvas> = SEEDS.iter().map(|&s| render_to_budget(&scene, 100, s)).collect();

    let coarse_variance = mean_variance(&coarse);
    let fine_variance = mean_variance(&fine);

    // Expected ratio is about 4/100; leave plenty of slack for noise
    assert!(
        fine_variance < coarse_variance * 0.5,
        "variance did not shrink: {coarse_variance} at 4 spp, {fine_variance} at 100 spp"
    );

    // The sphere sits in the middle of the frame and is darker than the sky
    let center = fine[0].get(WIDTH / 2, HEIGHT / 2);
    let sky = fine[0].get(WIDTH / 2, 0);
    assert!(center.length() < sky.length());
    assert!(center.length() > 0.0);
}
