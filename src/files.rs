//! Local files selected for upload

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use reqwest::multipart::Part;
use std::path::Path;

use crate::error::{Error, Result};

/// A file the user picked that has not been uploaded yet.
///
/// The payload is a [`Bytes`] so moving the entry around an image list never
/// copies the file.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl PendingFile {
    pub fn new(file_name: &str, mime_type: &str, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, guessing its MIME type from the extension
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "file".to_string());
        let mime_type = guess_mime(path);

        Ok(Self::new(&file_name, mime_type, bytes))
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Inline `data:` URL usable as a preview before upload
    pub fn preview_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, BASE64.encode(&self.bytes))
    }

    /// Multipart part carrying this file
    pub(crate) fn to_part(&self) -> Result<Part> {
        Part::bytes(self.bytes.to_vec())
            .file_name(self.file_name.clone())
            .mime_str(&self.mime_type)
            .map_err(Error::from)
    }
}

fn guess_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_from_path_reads_bytes_and_guesses_type() {
        let mut file = tempfile::Builder::new().suffix(".PNG").tempfile().unwrap();
        file.write_all(&[0x89, b'P', b'N', b'G']).unwrap();

        let pending = PendingFile::from_path(file.path()).await.unwrap();
        assert_eq!(pending.mime_type, "image/png");
        assert!(pending.is_image());
        assert_eq!(pending.len(), 4);
        assert!(pending.file_name.ends_with(".PNG"));
    }

    #[tokio::test]
    async fn test_from_path_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PendingFile::from_path(dir.path().join("nope.jpg")).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_preview_url_is_a_data_url() {
        let file = PendingFile::new("a.txt", "text/plain", &b"hi"[..]);
        assert_eq!(file.preview_url(), "data:text/plain;base64,aGk=");
        assert!(!file.is_image());
    }
}
