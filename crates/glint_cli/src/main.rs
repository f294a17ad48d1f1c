use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use glint_core::{load_scene, SceneDescription};
use glint_renderer::{render_into, Framebuffer, RenderConfig, RenderContext};
use log::info;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

const PROGRESS_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let mut scene = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            info!("No scene given, using the demo scene");
            SceneDescription::demo()
        }
    };
    args.apply_overrides(&mut scene);
    scene.validate().context("Invalid render settings")?;

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the worker pool")?;
    }

    let ctx = RenderContext::from_description(&scene).context("Failed to build the scene")?;
    let config = RenderConfig::from(&scene.render);
    let framebuffer = Framebuffer::new(scene.render.width, scene.render.height);

    render_progressively(&ctx, &config, &framebuffer)?;

    framebuffer
        .save(&args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;
    info!("Saved {}", args.output.display());

    Ok(())
}

/// Render on a worker thread, reporting band progress until it finishes.
fn render_progressively(
    ctx: &RenderContext,
    config: &RenderConfig,
    framebuffer: &Framebuffer,
) -> Result<()> {
    thread::scope(|s| {
        let worker = s.spawn(|| render_into(ctx, config, framebuffer));

        let mut reported = 0;
        while !worker.is_finished() {
            thread::sleep(PROGRESS_INTERVAL);
            let done = framebuffer.bands_completed();
            let total = framebuffer.bands_total();
            if total > 0 && done != reported {
                info!("Progress: {done}/{total} bands");
                reported = done;
            }
        }

        worker.join().map_err(|_| anyhow!("Render thread panicked"))
    })
}
