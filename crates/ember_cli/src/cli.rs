use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use ember_core::RenderSpec;
use log::LevelFilter;

/// Log levels selectable on the command line
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

/// Command line arguments. Every option except `--spec` overrides the
/// matching value from the scene file.
#[derive(Debug, Parser)]
#[command(name = "ember")]
#[command(about = "A Monte Carlo path tracer for sphere scenes")]
pub struct Args {
    /// JSON file containing the render spec
    #[arg(long, default_value = "sample_world.json")]
    pub spec: PathBuf,

    /// Output image (.png, .ppm or any format the image crate knows)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of render workers
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Samples per pixel
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Maximum ray bounce depth
    #[arg(short, long)]
    pub depth: Option<u32>,

    /// Base seed for reproducible renders
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show a progress bar
    #[arg(long)]
    pub progress: bool,

    #[arg(long, value_enum, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,
}

impl Args {
    /// Fold the command line overrides into a loaded spec.
    pub fn apply(&self, spec: &mut RenderSpec) {
        if let Some(output) = &self.output {
            spec.image.output_file = output.display().to_string();
        }
        if let Some(workers) = self.workers {
            spec.settings.render_routines = workers;
        }
        if let Some(samples) = self.samples {
            spec.image.samples = samples;
        }
        if let Some(depth) = self.depth {
            spec.settings.render_depth = depth;
        }
        if self.progress {
            spec.settings.show_progress = true;
        }
    }
}
