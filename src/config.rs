//! Command-line options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::corpus::Units;
use crate::settings::DEFAULT_THRESHOLD;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Source {
    /// The webcam at `--camera`
    Camera,
    /// A synthetic moving pattern, no hardware needed
    Pattern,
}

#[derive(Parser, Debug)]
#[command(name = "text-rain")]
#[command(about = "Letters fall over a live camera feed and come to rest on dark shapes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Frame source
    #[arg(long, value_enum, default_value_t = Source::Camera)]
    pub source: Source,

    /// Camera index
    #[arg(long, default_value_t = 0)]
    pub camera: u32,

    /// Requested frame width (the camera may choose another)
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Requested frame height
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Initial obstacle threshold, 0..=1 (Up/Down adjust it live)
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f32,

    /// Start in debug view, showing the obstacle mask (D toggles it)
    #[arg(long)]
    pub debug: bool,

    /// Text file to rain instead of the built-in lyrics
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// How the text is cut into spawn units
    #[arg(long, value_enum, default_value_t = Units::Lines)]
    pub units: Units,

    /// Seed for the random source (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Log level implied by `-v`/`-q`, `None` to keep the env_logger default.
    pub fn log_level(&self) -> Option<log::LevelFilter> {
        match (self.quiet, self.verbose) {
            (true, _) => Some(log::LevelFilter::Error),
            (false, 0) => None,
            (false, 1) => Some(log::LevelFilter::Info),
            (false, 2) => Some(log::LevelFilter::Debug),
            (false, _) => Some(log::LevelFilter::Trace),
        }
    }

    /// env_logger builder: `RUST_LOG` (default `warn`), then `-v`/`-q` on top.
    pub fn logger(&self) -> env_logger::Builder {
        let mut builder =
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
        if let Some(level) = self.log_level() {
            builder.filter_level(level);
        }
        builder
    }
}
