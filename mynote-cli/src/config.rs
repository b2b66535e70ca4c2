//! Command line arguments and the settings derived from them

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Terminal note editor: one page of notes and images, with undo/redo
#[derive(Debug, Parser)]
#[command(name = "mynote", version, about)]
pub struct Args {
    /// Pages file to open at startup
    pub file: Option<PathBuf>,

    /// Where pages.json and logs are written [default: ~/.mynote]
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, env = "MYNOTE_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_level: String,
    pub open: Option<PathBuf>,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        let data_dir = match args.data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        Ok(Self {
            data_dir,
            log_level: args.log_level,
            open: args.file,
        })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

/// ~/.mynote
fn default_data_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".mynote"))
}
