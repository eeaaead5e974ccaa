use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde::Deserialize;

use scrutiny_types::{AnalyzeRequest, CheckTypeInfo, ComplianceReport, VisionModel, MAX_SCREENS};

use crate::config::ServiceConfig;
use crate::error::{ClientError, Result};
use crate::streaming::{dispatch_sse_stream, StreamCallbacks};

/// Client for the design-compliance analysis service.
///
/// One instance can serve any number of concurrent calls; every streaming
/// invocation owns its own buffer and callback set.
pub struct DesignClient {
    http_client: reqwest::Client,
    config: ServiceConfig,
}

impl DesignClient {
    /// Create a client with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::from_config(ServiceConfig::new(base_url))
    }

    pub fn from_config(config: ServiceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder().build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Available compliance checks.
    pub async fn check_types(&self) -> Result<Vec<CheckTypeInfo>> {
        let response = self
            .http_client
            .get(self.endpoint("/design/check-types"))
            .timeout(self.config.timeout)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let shell: CheckTypesResponse = response.json().await?;
        Ok(shell.check_types)
    }

    /// Vision models the service can run the analysis with.
    pub async fn models(&self) -> Result<Vec<VisionModel>> {
        let response = self
            .http_client
            .get(self.endpoint("/design/models"))
            .timeout(self.config.timeout)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let shell: ModelsResponse = response.json().await?;
        Ok(shell.models)
    }

    /// Run the full analysis and wait for the complete report.
    pub async fn analyze(&self, request: AnalyzeRequest) -> Result<ComplianceReport> {
        Self::validate(&request)?;
        let form = Self::build_analyze_form(request)?;

        let response = self
            .http_client
            .post(self.endpoint("/design/analyze"))
            .multipart(form)
            .timeout(self.config.analyze_timeout)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        Ok(response.json().await?)
    }

    /// Run the analysis and dispatch progress over the SSE stream.
    ///
    /// Fire-and-forget from the caller's perspective: the future resolves
    /// once the stream is drained, and every terminal fault (validation,
    /// connection failure, non-success status, mid-stream disconnect) is
    /// delivered through `callbacks.on_error`, never as an `Err`. A stream
    /// that closes without a `complete` or `error` event ends with no
    /// terminal callback at all; callers that need a guarantee should race
    /// this future against their own timeout.
    ///
    /// Cancellation: drop or abort the returned future. The read loop stops
    /// at its next suspension point, no further callbacks fire, and the
    /// response body is released.
    pub async fn analyze_stream(&self, request: AnalyzeRequest, mut callbacks: StreamCallbacks) {
        if let Err(error) = self.try_analyze_stream(request, &mut callbacks).await {
            callbacks.error(error);
        }
    }

    async fn try_analyze_stream(
        &self,
        request: AnalyzeRequest,
        callbacks: &mut StreamCallbacks,
    ) -> Result<()> {
        Self::validate(&request)?;
        let form = Self::build_analyze_form(request)?;

        // No overall timeout here: the pipeline streams for as long as it
        // needs and the reader follows the response until it closes.
        let response = self
            .http_client
            .post(self.endpoint("/design/analyze-stream"))
            .multipart(form)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        dispatch_sse_stream(response.bytes_stream(), callbacks)
            .await
            .map_err(ClientError::Transport)
    }

    /// Mirror of the backend router's request validation, applied before
    /// any network I/O.
    fn validate(request: &AnalyzeRequest) -> Result<()> {
        if request.images.is_empty() {
            return Err(ClientError::InvalidRequest(
                "at least one image is required".to_string(),
            ));
        }

        if request.images.len() > MAX_SCREENS {
            return Err(ClientError::InvalidRequest(format!(
                "maximum {} images allowed",
                MAX_SCREENS
            )));
        }

        if let Some(bad) = request.images.iter().find(|image| !image.is_image()) {
            return Err(ClientError::InvalidRequest(format!(
                "invalid file type: {}. Only images allowed.",
                bad.file_name
            )));
        }

        Ok(())
    }

    fn build_analyze_form(request: AnalyzeRequest) -> Result<Form> {
        let checks = request.checks_field();

        let mut form = Form::new()
            .text("ba_document", request.ba_document)
            .text("checks", checks)
            .text("model", request.model);

        if let Some(name) = request.project_name {
            form = form.text("project_name", name);
        }
        if let Some(context) = request.extra_context {
            form = form.text("extra_context", context);
        }

        for image in request.images {
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name.clone())
                .mime_str(&image.content_type)
                .map_err(|e| {
                    ClientError::InvalidRequest(format!(
                        "invalid content type for {}: {}",
                        image.file_name, e
                    ))
                })?;
            form = form.part("images", part);
        }

        Ok(form)
    }

    async fn ensure_success(response: Response) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status { status, body })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.trimmed_base_url(), path)
    }
}

#[derive(Debug, Deserialize)]
struct CheckTypesResponse {
    check_types: Vec<CheckTypeInfo>,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    models: Vec<VisionModel>,
}
