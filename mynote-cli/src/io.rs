//! File I/O for native CLI

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use mynote_core::model::image::{data_url, mime_for_extension};
use mynote_core::EXPORT_FILE_NAME;

/// Read a pages file as text. Parsing happens in the session so a bad file
/// never touches the document.
pub fn read_pages(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Read an image file and encode it as a data URL
pub fn read_image(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read image: {}", path.display()))?;
    let mime = path
        .extension()
        .map(|ext| mime_for_extension(&ext.to_string_lossy()))
        .unwrap_or("application/octet-stream");
    info!("read image {} ({} bytes, {})", path.display(), bytes.len(), mime);
    Ok(data_url(mime, &bytes))
}

/// Write an exported document to <data_dir>/pages.json, creating the directory if needed
pub fn export_pages(json: &str, data_dir: &Path) -> Result<PathBuf> {
    if !data_dir.exists() {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    }
    let export_path = data_dir.join(EXPORT_FILE_NAME);

    fs::write(&export_path, json)
        .with_context(|| format!("Failed to write {}", export_path.display()))?;

    info!("exported {} bytes to {}", json.len(), export_path.display());
    Ok(export_path)
}
