//! File logging for the terminal binary. The TUI owns stdout/stderr, so
//! records go to rotating files under the data directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;

const LOG_FILE_BASENAME: &str = "mynote";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

/// Start the file logger. The returned handle must stay alive for as long as
/// records should be written.
pub fn init(level: &str, log_dir: &Path) -> Result<LoggerHandle> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create {}", log_dir.display()))?;

    let handle = Logger::try_with_str(level)
        .with_context(|| format!("Invalid log level: {}", level))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .context("Failed to start logger")?;

    info!(
        "mynote {} started, logging at {} to {}",
        env!("CARGO_PKG_VERSION"),
        level,
        log_dir.display()
    );
    Ok(handle)
}
