//! Loads attachments from disk.

use lbj_core::attachment::FALLBACK_MIME_TYPE;
use lbj_core::{Attachment, LbjError, Result};
use std::path::Path;

/// Reads a file and encodes it as an [`Attachment`].
///
/// The media type is guessed from the extension, defaulting to
/// `application/octet-stream`.
pub async fn load_attachment(path: impl AsRef<Path>) -> Result<Attachment> {
    let path = path.as_ref();

    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        LbjError::attachment(format!("Cannot read {}: {}", path.display(), e))
    })?;
    if !metadata.is_file() {
        return Err(LbjError::attachment(format!(
            "{} is not a regular file",
            path.display()
        )));
    }

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        LbjError::attachment(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let mime_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_MIME_TYPE)
        .to_string();

    tracing::debug!(
        "[AttachmentLoader] Loaded {} ({}, {} bytes)",
        file_name,
        mime_type,
        bytes.len()
    );

    Ok(Attachment::from_bytes(file_name, mime_type, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_text_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("brief.txt");
        std::fs::write(&path, "Client: Acme").unwrap();

        let attachment = load_attachment(&path).await.unwrap();
        assert_eq!(attachment.file_name, "brief.txt");
        assert_eq!(attachment.mime_type, "text/plain");
        assert_eq!(attachment.decode().unwrap(), b"Client: Acme");
    }

    #[tokio::test]
    async fn test_unknown_extension_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.lbjraw");
        std::fs::write(&path, [0u8, 1, 2]).unwrap();

        let attachment = load_attachment(&path).await.unwrap();
        assert_eq!(attachment.mime_type, FALLBACK_MIME_TYPE);
    }

    #[tokio::test]
    async fn test_missing_file_is_attachment_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_attachment(temp_dir.path().join("nope.pdf")).await.unwrap_err();
        assert!(matches!(err, LbjError::Attachment(_)));
    }

    #[tokio::test]
    async fn test_directory_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_attachment(temp_dir.path()).await.unwrap_err();
        assert!(matches!(err, LbjError::Attachment(_)));
    }
}
