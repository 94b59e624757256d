use crate::commands::{self, Config};
use crate::error::Error;
use clap::Parser;
use std::path::PathBuf;

/// Generate the 192x192 and 512x512 PNG app icons.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory the icons are written into (created if missing)
    #[arg(short, long, default_value = commands::DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,
    /// Log every emitted chunk
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }

    pub fn config(&self) -> Config {
        Config {
            out_dir: self.out_dir.clone(),
        }
    }

    pub fn run(self) -> Result<Vec<PathBuf>, Error> {
        commands::generate_icons(&self.config())
    }
}
