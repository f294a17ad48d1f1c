use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_core::{EnvironmentDesc, SceneDescription, TorusMarch};
use log::LevelFilter;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Torus intersection strategies
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MarchMode {
    /// Fixed 10,000 half-steps
    Fixed,
    /// Step by the signed distance
    SphereTrace,
}

impl From<MarchMode> for TorusMarch {
    fn from(mode: MarchMode) -> Self {
        match mode {
            MarchMode::Fixed => TorusMarch::Fixed,
            MarchMode::SphereTrace => TorusMarch::SphereTrace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "A CPU Whitted-style ray tracer")]
pub struct Args {
    /// Scene description (JSON); the built-in demo scene when omitted
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Output image path; the format follows the extension
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Jittered samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum reflection bounces
    #[arg(long)]
    pub max_reflections: Option<u32>,

    /// Scanlines rendered per parallel task
    #[arg(long)]
    pub rows_per_task: Option<u32>,

    /// Fixed seed for reproducible sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Equirectangular environment image, replacing the scene's background
    #[arg(long)]
    pub skybox: Option<PathBuf>,

    /// Torus intersection strategy
    #[arg(long, value_enum)]
    pub torus_march: Option<MarchMode>,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command line overrides on top of a loaded scene.
    pub fn apply_overrides(&self, scene: &mut SceneDescription) {
        let render = &mut scene.render;
        if let Some(width) = self.width {
            render.width = width;
        }
        if let Some(height) = self.height {
            render.height = height;
        }
        if let Some(samples) = self.samples {
            render.samples_per_pixel = samples;
        }
        if let Some(max_reflections) = self.max_reflections {
            render.max_reflections = max_reflections;
        }
        if let Some(rows) = self.rows_per_task {
            render.rows_per_task = rows;
        }
        if self.seed.is_some() {
            render.seed = self.seed;
        }
        if let Some(mode) = self.torus_march {
            render.torus_march = mode.into();
        }
        if let Some(path) = &self.skybox {
            scene.environment = EnvironmentDesc::Skybox { path: path.clone() };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["glint"]);
        assert!(args.scene.is_none());
        assert_eq!(args.output, PathBuf::from("render.png"));
        assert!(matches!(args.log_level, LogLevel::Info));

        let mut scene = SceneDescription::demo();
        let before = scene.clone();
        args.apply_overrides(&mut scene);
        assert_eq!(scene, before);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "glint",
            "--width",
            "320",
            "--height",
            "240",
            "-s",
            "4",
            "--max-reflections",
            "1",
            "--rows-per-task",
            "16",
            "--seed",
            "99",
            "--skybox",
            "sky.png",
            "--torus-march",
            "fixed",
            "--log-level",
            "debug",
        ]);
        let mut scene = SceneDescription::demo();
        args.apply_overrides(&mut scene);

        let r = &scene.render;
        assert_eq!((r.width, r.height), (320, 240));
        assert_eq!(r.samples_per_pixel, 4);
        assert_eq!(r.max_reflections, 1);
        assert_eq!(r.rows_per_task, 16);
        assert_eq!(r.seed, Some(99));
        assert_eq!(r.torus_march, TorusMarch::Fixed);
        assert_eq!(
            scene.environment,
            EnvironmentDesc::Skybox {
                path: PathBuf::from("sky.png")
            }
        );
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }
}
