//! Progressive rendering example.
//!
//! Renders a small analytic scene headless for a number of frames, logging
//! how quickly the accumulated image settles, then moves the camera and
//! shows the accumulation restarting.
//!
//! Run with `RUST_LOG=debug cargo run --example progressive`.

use anyhow::{Context, Result};
use ember_renderer::{
    Camera, Cylinder, Material, RenderSettings, Renderer, RgbaImage, Scene, Sphere, Vec3,
};

const WIDTH: u32 = 160;
const HEIGHT: u32 = 90;
const FRAMES: u32 = 16;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let scene = build_scene();
    scene.validate().context("demo scene is inconsistent")?;

    let mut camera = Camera::default().with_position(Vec3::new(0.0, 0.5, 6.0), Vec3::new(0.0, -0.1, -1.0));
    camera.on_resize(WIDTH, HEIGHT);

    let settings = RenderSettings {
        multithreaded: true,
        ..Default::default()
    };
    let mut renderer: Renderer<RgbaImage> = Renderer::new(settings);
    renderer.on_resize(WIDTH, HEIGHT)?;

    log::info!(
        "Rendering {}x{} with {} primitives for {} frames",
        WIDTH,
        HEIGHT,
        scene.primitive_count(),
        FRAMES
    );
    converge(&mut renderer, &scene, &camera)?;

    // Moving the camera invalidates everything accumulated so far
    if camera.set_view(Vec3::new(2.0, 1.0, 5.0), Vec3::new(-0.4, -0.2, -1.0)) {
        renderer.reset_frame_index();
    }
    log::info!("Camera moved, accumulation restarted");
    converge(&mut renderer, &scene, &camera)?;

    Ok(())
}

/// Render `FRAMES` frames and log the mean per-pixel change between them.
fn converge(renderer: &mut Renderer<RgbaImage>, scene: &Scene, camera: &Camera) -> Result<()> {
    let start = std::time::Instant::now();
    let mut previous: Option<Vec<u8>> = None;

    for _ in 0..FRAMES {
        renderer.render(scene, camera)?;
        let image = renderer
            .final_image()
            .context("renderer has no output image")?;
        let bytes = image.as_bytes().to_vec();

        if let Some(previous) = &previous {
            let delta: u64 = bytes
                .iter()
                .zip(previous)
                .map(|(&a, &b)| (a as i32 - b as i32).unsigned_abs() as u64)
                .sum();
            log::info!(
                "samples={:>3} mean channel delta={:.3}",
                renderer.frame_index() - 1,
                delta as f64 / bytes.len() as f64
            );
        }
        previous = Some(bytes);
    }

    log::info!("{} frames in {:?}", FRAMES, start.elapsed());
    Ok(())
}

fn build_scene() -> Scene {
    let mut scene = Scene::new();

    let pink = scene.add_material(Material::new(Vec3::new(1.0, 0.0, 1.0), 0.0).with_name("pink"));
    let blue = scene.add_material(Material::new(Vec3::new(0.2, 0.3, 1.0), 0.1).with_name("floor"));
    let brass = scene.add_material(
        Material::new(Vec3::new(0.8, 0.6, 0.2), 0.4)
            .with_name("brass")
            .with_metallic(1.0),
    );

    scene.add_primitive(Sphere::new(Vec3::ZERO, 1.0, pink));
    scene.add_primitive(Sphere::new(Vec3::new(0.0, -101.0, 0.0), 100.0, blue));
    scene.add_primitive(Cylinder::new(Vec3::new(2.0, -0.5, -1.0), 0.5, -0.5, 0.5, brass));

    scene
}
