use crate::device_input::interface::PickedFile;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

#[derive(Clone, PartialEq)]
pub struct UploadCandidate {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub size_bytes: u64,
    pub preview_data_uri: Option<String>,
}

// Keeps model logs readable; the raw bytes are never worth printing.
impl std::fmt::Debug for UploadCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadCandidate")
            .field("file_name", &self.file_name)
            .field("size_bytes", &self.size_bytes)
            .field(
                "preview_data_uri",
                &self
                    .preview_data_uri
                    .as_ref()
                    .map(|uri| format!("{} chars", uri.len())),
            )
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquireError {
    #[error("no file provided")]
    NoFile,
    #[error("File size exceeds 5MB limit")]
    FileTooLarge,
}

/// Builds an upload candidate from a picker or drop gesture. Only the first
/// file of the gesture counts; any later files are silently ignored. Size is
/// checked before any preview work happens.
pub fn acquire(files: &[PickedFile], max_bytes: u64) -> Result<UploadCandidate, AcquireError> {
    let file = files.first().ok_or(AcquireError::NoFile)?;

    let size_bytes = file.bytes.len() as u64;
    if size_bytes > max_bytes {
        return Err(AcquireError::FileTooLarge);
    }

    Ok(UploadCandidate {
        file_name: file.name.clone(),
        bytes: file.bytes.clone(),
        size_bytes,
        preview_data_uri: None,
    })
}

/// Encodes the file as a `data:` URI for the preview image. Never fails:
/// blobs with an unrecognized content type still encode, they just carry the
/// octet-stream type and may render as a broken preview.
pub fn encode_preview(file: &PickedFile) -> String {
    let mime = image::guess_format(&file.bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream");
    format!("data:{};base64,{}", mime, STANDARD.encode(&file.bytes))
}
