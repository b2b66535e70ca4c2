use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::id;

/// An embedded image. `data` is an opaque payload, normally a base64 data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default = "Uuid::new_v4", deserialize_with = "id::lenient")]
    pub id: Uuid,
    #[serde(rename = "src", alias = "data")]
    pub data: String,
}

impl Image {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            data: data.into(),
        }
    }

    /// Encode raw file bytes as a `data:` URL image
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self::new(data_url(mime, bytes))
    }

    /// MIME type declared by the data URL, if the payload is one
    pub fn mime_type(&self) -> Option<&str> {
        let header = self.data.strip_prefix("data:")?.split(',').next()?;
        let mime = header.split(';').next()?;
        (!mime.is_empty()).then_some(mime)
    }

    /// Size in bytes of the decoded payload, computed without decoding
    pub fn byte_len(&self) -> usize {
        match self.data.split_once(',') {
            Some((header, body)) if header.ends_with(";base64") => {
                let body = body.trim_end();
                let padding = body.chars().rev().take_while(|&c| c == '=').count();
                (body.len() / 4 * 3).saturating_sub(padding)
            }
            Some((_, body)) => body.len(),
            None => self.data.len(),
        }
    }

    /// One-line description for frontends that cannot draw pixels
    pub fn summary(&self) -> String {
        format!(
            "{} ({})",
            self.mime_type().unwrap_or("unknown"),
            human_size(self.byte_len())
        )
    }
}

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Best guess at an image MIME type from a file extension
pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

fn human_size(bytes: usize) -> String {
    match bytes {
        0..=1023 => format!("{} B", bytes),
        1024..=1_048_575 => format!("{:.1} KB", bytes as f64 / 1024.0),
        _ => format!("{:.1} MB", bytes as f64 / 1_048_576.0),
    }
}
