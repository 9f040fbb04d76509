//! File intake: validation of user-chosen images and preview generation.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::ClientError;

/// Largest accepted image, 16 MiB.
pub const MAX_IMAGE_BYTES: u64 = 16 * 1024 * 1024;

const IMAGE_MIME_PREFIX: &str = "image/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeSource {
    Browse,
    Drop,
}

impl IntakeSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Browse => "browse",
            Self::Drop => "drop",
        }
    }
}

/// Image bytes chosen by the user, with their declared MIME type.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        validate_image(&self.mime_type, self.size_bytes())
    }
}

impl std::fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.bytes.len())
            .finish()
    }
}

/// Checks the declared MIME type first, then the size.
pub fn validate_image(mime_type: &str, size_bytes: u64) -> Result<(), ClientError> {
    if !mime_type
        .trim()
        .to_ascii_lowercase()
        .starts_with(IMAGE_MIME_PREFIX)
    {
        return Err(ClientError::InvalidFileType {
            mime_type: mime_type.to_string(),
        });
    }
    if size_bytes > MAX_IMAGE_BYTES {
        return Err(ClientError::file_too_large(size_bytes));
    }
    Ok(())
}

/// Thumbnail source for the upload area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePreview {
    pub file_name: String,
    pub data_url: String,
}

impl ImagePreview {
    pub fn from_file(file: &SelectedFile) -> Self {
        Self {
            file_name: file.name.clone(),
            data_url: format!(
                "data:{};base64,{}",
                file.mime_type.trim(),
                STANDARD.encode(&file.bytes)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_image_mime_types() {
        for mime in ["application/pdf", "text/plain", "", "imagex/png", "video/mp4"] {
            let err = validate_image(mime, 10).expect_err("should reject");
            assert!(matches!(err, ClientError::InvalidFileType { .. }), "{mime}");
        }
        validate_image("image/jpeg", 10).expect("jpeg");
        validate_image("IMAGE/PNG", 10).expect("uppercase png");
    }

    #[test]
    fn size_limit_is_inclusive() {
        validate_image("image/png", MAX_IMAGE_BYTES).expect("exactly 16 MiB");
        let err = validate_image("image/png", MAX_IMAGE_BYTES + 1).expect_err("too large");
        assert_eq!(
            err,
            ClientError::FileTooLarge {
                size_bytes: MAX_IMAGE_BYTES + 1,
                limit_bytes: MAX_IMAGE_BYTES,
            }
        );
    }

    #[test]
    fn type_is_checked_before_size() {
        let err = validate_image("text/plain", MAX_IMAGE_BYTES * 2).expect_err("reject");
        assert!(matches!(err, ClientError::InvalidFileType { .. }));
    }

    #[test]
    fn preview_is_a_base64_data_url() {
        let file = SelectedFile::new("lednice.png", "image/png", b"png!".to_vec());
        let preview = ImagePreview::from_file(&file);
        assert_eq!(preview.file_name, "lednice.png");
        assert_eq!(preview.data_url, "data:image/png;base64,cG5nIQ==");
    }
}
