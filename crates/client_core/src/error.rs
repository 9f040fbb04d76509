//! Error kinds raised by file intake and the upload/generate workflow.

use std::fmt;

use thiserror::Error;

use crate::intake::MAX_IMAGE_BYTES;

pub const MSG_SELECT_IMAGE: &str = "Prosím vyberte obrázek.";
pub const MSG_FILE_TOO_LARGE: &str = "Soubor je příliš velký. Maximální velikost je 16MB.";
pub const MSG_UPLOAD_FAILED: &str = "Chyba při nahrávání obrázku. Zkuste to prosím znovu.";
pub const MSG_RECIPES_FAILED: &str = "Chyba při generování receptů.";
pub const MSG_SERVICE_UNAVAILABLE: &str = "Služba je momentálně nedostupná.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ImageUpload,
    RecipeGenerate,
    Health,
    Categories,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::ImageUpload => shared::protocol::IMAGE_UPLOAD_PATH,
            Self::RecipeGenerate => shared::protocol::RECIPES_GENERATE_PATH,
            Self::Health => shared::protocol::HEALTH_PATH,
            Self::Categories => shared::protocol::RECIPE_CATEGORIES_PATH,
        }
    }

    /// Wraps a transport failure in the error kind owned by this endpoint.
    pub fn failed(self, failure: TransportFailure) -> ClientError {
        match self {
            Self::ImageUpload => ClientError::UploadFailed(failure),
            Self::RecipeGenerate => ClientError::RecipeGenerationFailed(failure),
            endpoint => ClientError::RequestFailed { endpoint, failure },
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    #[error("http status {status}{}", message_suffix(.message))]
    Status { status: u16, message: Option<String> },
    #[error("network error: {0}")]
    Network(String),
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|message| format!(": {message}"))
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("invalid file type '{mime_type}', expected an image")]
    InvalidFileType { mime_type: String },
    #[error("file is {size_bytes} bytes, limit is {limit_bytes} bytes")]
    FileTooLarge { size_bytes: u64, limit_bytes: u64 },
    #[error("no file selected")]
    NoFileSelected,
    #[error("results are shown; reset before submitting again")]
    ResultsShown,
    #[error("image upload failed: {0}")]
    UploadFailed(TransportFailure),
    #[error("recipe generation failed: {0}")]
    RecipeGenerationFailed(TransportFailure),
    #[error("request to {endpoint} failed: {failure}")]
    RequestFailed {
        endpoint: Endpoint,
        failure: TransportFailure,
    },
    #[error("malformed response from {endpoint}: {detail}")]
    MalformedResponse { endpoint: Endpoint, detail: String },
}

impl ClientError {
    pub fn file_too_large(size_bytes: u64) -> Self {
        Self::FileTooLarge {
            size_bytes,
            limit_bytes: MAX_IMAGE_BYTES,
        }
    }

    /// Only a failed recipe generation lets the workflow continue to results.
    pub fn aborts_workflow(&self) -> bool {
        !matches!(
            self,
            Self::RecipeGenerationFailed(_)
                | Self::MalformedResponse {
                    endpoint: Endpoint::RecipeGenerate,
                    ..
                }
        )
    }

    /// Localized text shown in the transient notification.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidFileType { .. } | Self::NoFileSelected | Self::ResultsShown => {
                MSG_SELECT_IMAGE
            }
            Self::FileTooLarge { .. } => MSG_FILE_TOO_LARGE,
            Self::UploadFailed(_)
            | Self::MalformedResponse {
                endpoint: Endpoint::ImageUpload,
                ..
            } => MSG_UPLOAD_FAILED,
            Self::RecipeGenerationFailed(_)
            | Self::MalformedResponse {
                endpoint: Endpoint::RecipeGenerate,
                ..
            } => MSG_RECIPES_FAILED,
            Self::RequestFailed { .. } | Self::MalformedResponse { .. } => {
                MSG_SERVICE_UNAVAILABLE
            }
        }
    }
}
