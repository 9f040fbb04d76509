use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    error::ApiError,
    protocol::{
        CategoriesResponse, GenerateRecipesRequest, GenerateRecipesResponse, HealthResponse,
        UploadImageResponse, IMAGE_FIELD,
    },
};
use tracing::{info, warn};

pub mod config;
pub mod controller;
pub mod error;
pub mod intake;
pub mod notifications;

pub use config::{load_settings, ClientSettings};
pub use controller::{
    ClickTarget, ModalState, SubmissionTicket, UiPhase, UploadController, ViewSnapshot,
    WorkflowSettings, WorkflowSummary,
};
pub use error::{ClientError, Endpoint, TransportFailure};
pub use intake::{ImagePreview, IntakeSource, SelectedFile, MAX_IMAGE_BYTES};
pub use notifications::{Notification, NotificationCenter};

/// The two calls the upload workflow depends on.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    async fn upload_image(
        &self,
        file: &SelectedFile,
    ) -> std::result::Result<UploadImageResponse, ClientError>;

    async fn generate_recipes(
        &self,
        request: &GenerateRecipesRequest,
    ) -> std::result::Result<GenerateRecipesResponse, ClientError>;
}

/// `RecipeApi` over HTTP against the fridge recipe service.
pub struct HttpRecipeApi {
    http: Client,
    base_url: String,
}

impl HttpRecipeApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        Self::new(settings.base_url(), settings.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    pub async fn health(&self) -> std::result::Result<HealthResponse, ClientError> {
        let endpoint = Endpoint::Health;
        let sent = self.http.get(self.url(endpoint)).send().await;
        decode_response(endpoint, sent).await
    }

    pub async fn categories(&self) -> std::result::Result<Vec<String>, ClientError> {
        let endpoint = Endpoint::Categories;
        let sent = self.http.get(self.url(endpoint)).send().await;
        let body: CategoriesResponse = decode_response(endpoint, sent).await?;
        Ok(body.categories)
    }
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    async fn upload_image(
        &self,
        file: &SelectedFile,
    ) -> std::result::Result<UploadImageResponse, ClientError> {
        let endpoint = Endpoint::ImageUpload;
        let part = multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(file.mime_type.trim())
            .map_err(|_| ClientError::InvalidFileType {
                mime_type: file.mime_type.clone(),
            })?;
        let form = multipart::Form::new().part(IMAGE_FIELD, part);

        info!(
            file = %file.name,
            size_bytes = file.size_bytes(),
            "api: uploading image"
        );
        let sent = self
            .http
            .post(self.url(endpoint))
            .multipart(form)
            .send()
            .await;
        let body: UploadImageResponse = decode_response(endpoint, sent).await?;
        info!(
            ingredients = body.ingredients.len(),
            "api: image analyzed"
        );
        Ok(body)
    }

    async fn generate_recipes(
        &self,
        request: &GenerateRecipesRequest,
    ) -> std::result::Result<GenerateRecipesResponse, ClientError> {
        let endpoint = Endpoint::RecipeGenerate;
        info!(
            ingredients = request.ingredients.len(),
            max_time = request.max_time,
            "api: requesting recipes"
        );
        let sent = self
            .http
            .post(self.url(endpoint))
            .json(request)
            .send()
            .await;
        let body: GenerateRecipesResponse = decode_response(endpoint, sent).await?;
        info!(recipes = body.recipes.len(), "api: recipes generated");
        Ok(body)
    }
}

/// Maps transport errors, non-2xx statuses and undecodable bodies onto the
/// error kinds owned by `endpoint`.
async fn decode_response<T: DeserializeOwned>(
    endpoint: Endpoint,
    sent: reqwest::Result<Response>,
) -> std::result::Result<T, ClientError> {
    let response = sent.map_err(|err| {
        warn!(%endpoint, "api: request failed: {err}");
        endpoint.failed(TransportFailure::Network(err.to_string()))
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|err| {
        warn!(%endpoint, "api: failed to read response body: {err}");
        endpoint.failed(TransportFailure::Network(err.to_string()))
    })?;

    if !status.is_success() {
        warn!(%endpoint, status = status.as_u16(), "api: non-success status");
        return Err(endpoint.failed(TransportFailure::Status {
            status: status.as_u16(),
            message: ApiError::parse_message(&body),
        }));
    }

    serde_json::from_str(&body).map_err(|err| {
        warn!(%endpoint, "api: malformed response: {err}");
        ClientError::MalformedResponse {
            endpoint,
            detail: err.to_string(),
        }
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
