//! Multi-threaded RenderManager behavior.

use std::sync::mpsc;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use luma_renderer::{
    Camera, Color, HittableList, Lambertian, MonochromeSky, RenderConfig, RenderError,
    RenderManager, Scene, Sphere, Vec3,
};

const TIMEOUT: Duration = Duration::from_secs(30);

fn flat_sky_scene() -> Scene {
    Scene::new(Camera::default(), HittableList::new())
        .with_sky(MonochromeSky::new(Color::splat(0.5)))
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn wait_for(manager: &RenderManager, mut done: impl FnMut(&RenderManager) -> bool) {
    let deadline = Instant::now() + TIMEOUT;
    while !done(manager) {
        assert!(Instant::now() < deadline, "timed out, stats: {:?}", manager.stats());
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn zero_workers_fail_fast() {
    init_logging();
    let start = Instant::now();
    let result = RenderManager::new(0, flat_sky_scene(), 8, 8, RenderConfig::default());

    assert!(matches!(result, Err(RenderError::NoWorkers)));
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[test]
fn invalid_config_rejected() {
    init_logging();
    let config = RenderConfig {
        samples_per_iteration: 0,
        ..RenderConfig::default()
    };
    let result = RenderManager::new(2, flat_sky_scene(), 8, 8, config);
    assert!(matches!(result, Err(RenderError::InvalidConfig(_))));

    let result = RenderManager::new(2, flat_sky_scene(), 8, 0, RenderConfig::default());
    assert!(matches!(result, Err(RenderError::EmptyViewport { .. })));
}

#[test]
fn workers_merge_to_exact_budget() {
    init_logging();
    let config = RenderConfig {
        samples_per_pixel: 8,
        samples_per_iteration: 2,
        max_bounces: 4,
    };
    let mut manager = RenderManager::new(2, flat_sky_scene(), 4, 2, config)
        .unwrap()
        .with_seed(10);

    let (tx, rx) = mpsc::channel();
    let tx = Mutex::new(tx);
    manager.set_image_callback(move |image| {
        let _ = tx.lock().unwrap().send(image);
    });
    manager.start().unwrap();

    let frame = rx.recv_timeout(TIMEOUT).expect("no frame published");
    assert_eq!(frame.dimensions(), (4, 2));
    for pixel in frame.pixels() {
        assert_eq!(pixel.0, [180, 180, 180]);
    }

    // Two workers with four samples each, every pass counted once
    wait_for(&manager, |m| m.stats().samples_per_pixel >= 8);
    manager.stop();

    let stats = manager.stats();
    assert_eq!(stats.samples_per_pixel, 8);
    assert_eq!(stats.merges, 4);
    // Empty world: one ray per sample
    assert_eq!(stats.total_rays, 4 * 2 * 8);

    let output = manager.output();
    assert_eq!(output.sample_count(), 1);
    for color in output.pixels() {
        assert!((*color - Color::splat(0.5)).length() < 1e-5);
    }
    assert!(!manager.is_running());
}

#[test]
fn replacing_callback_redirects_frames() {
    init_logging();
    let config = RenderConfig {
        samples_per_pixel: 1_000_000,
        samples_per_iteration: 1,
        max_bounces: 4,
    };
    let mut manager = RenderManager::new(2, flat_sky_scene(), 4, 4, config).unwrap();

    let (first_tx, first_rx) = mpsc::channel();
    let first_tx = Mutex::new(first_tx);
    manager.set_image_callback(move |image| {
        let _ = first_tx.lock().unwrap().send(image);
    });
    manager.start().unwrap();
    assert!(manager.is_running());
    first_rx.recv_timeout(TIMEOUT).expect("first callback never called");

    let (second_tx, second_rx) = mpsc::channel();
    let second_tx = Mutex::new(second_tx);
    manager.set_image_callback(move |image| {
        let _ = second_tx.lock().unwrap().send(image);
    });
    let frame = second_rx.recv_timeout(TIMEOUT).expect("second callback never called");
    assert_eq!(frame.dimensions(), (4, 4));

    manager.stop();
    assert!(!manager.is_running());

    // Stopped workers publish nothing further
    while second_rx.try_recv().is_ok() {}
    std::thread::sleep(Duration::from_millis(50));
    assert!(second_rx.try_recv().is_err());
}

#[test]
fn stop_and_restart_keeps_accumulating() {
    init_logging();
    let mut world = HittableList::new();
    world.add(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        Lambertian::new(Color::splat(0.5)),
    ));
    let scene = Scene::new(Camera::default(), world);
    let config = RenderConfig {
        samples_per_pixel: 1_000_000,
        samples_per_iteration: 1,
        max_bounces: 8,
    };
    let mut manager = RenderManager::new(3, scene, 8, 4, config).unwrap();

    manager.start().unwrap();
    wait_for(&manager, |m| m.stats().merges >= 3);
    manager.stop();
    let paused = manager.stats();

    manager.start().unwrap();
    wait_for(&manager, |m| m.stats().merges > paused.merges);
    manager.stop();

    let resumed = manager.stats();
    assert!(resumed.samples_per_pixel > paused.samples_per_pixel);
    assert!(resumed.total_rays > paused.total_rays);
    assert!(manager.make_image().is_some());
}

#[test]
fn restart_after_budget_adds_nothing() {
    init_logging();
    let config = RenderConfig {
        samples_per_pixel: 8,
        samples_per_iteration: 2,
        max_bounces: 4,
    };
    let mut manager = RenderManager::new(2, flat_sky_scene(), 4, 2, config).unwrap();

    manager.start().unwrap();
    wait_for(&manager, |m| m.stats().samples_per_pixel >= 8);
    manager.stop();
    let finished = manager.stats();

    manager.start().unwrap();
    assert!(!manager.is_running());
    std::thread::sleep(Duration::from_millis(50));
    manager.stop();

    let stats = manager.stats();
    assert_eq!(stats.samples_per_pixel, 8);
    assert_eq!(stats.merges, finished.merges);
    assert_eq!(stats.total_rays, finished.total_rays);
}

#[test]
fn uneven_budget_finishes_exactly_and_goes_idle() {
    init_logging();
    let config = RenderConfig {
        samples_per_pixel: 7,
        samples_per_iteration: 2,
        max_bounces: 4,
    };
    let mut manager = RenderManager::new(3, flat_sky_scene(), 3, 3, config)
        .unwrap()
        .with_seed(5);

    manager.start().unwrap();
    // Workers exit on their own once their shares are spent
    wait_for(&manager, |m| !m.is_running());

    let stats = manager.stats();
    assert_eq!(stats.samples_per_pixel, 7);
    assert_eq!(stats.total_rays, 3 * 3 * 7);
    assert!(stats.elapsed > Duration::ZERO);

    manager.stop();
    assert_eq!(manager.stats().samples_per_pixel, 7);
}
