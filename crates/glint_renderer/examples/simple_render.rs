//! Simple ray tracer example.
//!
//! Renders the built-in demo scene at a small size and saves it as PNG.

use glint_core::SceneDescription;
use glint_renderer::{render, RenderConfig, RenderContext};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("Glint Ray Tracer - Simple Example");
    println!("=================================");

    // Build the scene
    let start = std::time::Instant::now();
    let mut scene = SceneDescription::demo();
    scene.render.width = 800;
    scene.render.height = 300;
    scene.render.rows_per_task = 40;
    scene.render.seed = Some(7);
    let ctx = RenderContext::from_description(&scene).expect("Failed to build scene");
    println!("Scene built in {:?}", start.elapsed());

    let config = RenderConfig::from(&scene.render);
    println!(
        "Rendering {}x{} @ {} spp...",
        scene.render.width, scene.render.height, config.samples_per_pixel
    );

    let start = std::time::Instant::now();
    let framebuffer = render(&ctx, &config);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.png";
    framebuffer.save(filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}
