//! Extraction client: sends a selected PDF to the extraction service and
//! interprets the reply.
//!
//! The transport sits behind [`ExtractionBackend`] so the reply handling in
//! [`interpret_reply`] can be exercised without a server; [`HttpBackend`] is
//! the real implementation.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde_json::Value;

use crate::document::DocumentKind;
use crate::notice::{MSG_EXTRACT_FAILED, MSG_GENERIC_ERROR};
use crate::presenter::ExtractionResult;
use crate::upload::{PDF_MEDIA_TYPE, PendingUpload};
use crate::CoreError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Resolved connection settings for the extraction service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub aadhaar_endpoint: String,
    pub pan_endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            aadhaar_endpoint: DocumentKind::Aadhaar.endpoint_path().to_string(),
            pan_endpoint: DocumentKind::Pan.endpoint_path().to_string(),
        }
    }
}

impl ClientConfig {
    pub fn endpoint(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Aadhaar => &self.aadhaar_endpoint,
            DocumentKind::Pan => &self.pan_endpoint,
        }
    }

    /// Full URL for a kind's endpoint.
    pub fn endpoint_url(&self, kind: DocumentKind) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint(kind).trim_start_matches('/')
        )
    }
}

/// HTTP status and decoded JSON body of one reply.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReply {
    pub status: u16,
    pub body: Value,
}

impl RawReply {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Why an extraction did not produce a result. `message` is shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionFailure {
    pub message: String,
}

impl ExtractionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<CoreError> for ExtractionFailure {
    fn from(e: CoreError) -> Self {
        let message = e.to_string();
        if message.trim().is_empty() {
            Self::new(MSG_GENERIC_ERROR)
        } else {
            Self::new(message)
        }
    }
}

/// A service that accepts one PDF upload and answers with a JSON reply.
pub trait ExtractionBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Send the upload to the endpoint for `upload.kind`. One call, one request.
    fn submit<'a>(
        &'a self,
        upload: &'a PendingUpload,
    ) -> Pin<Box<dyn Future<Output = Result<RawReply, CoreError>> + Send + 'a>>;
}

/// Extraction service reached over HTTP with a multipart upload.
pub struct HttpBackend {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }
}

impl ExtractionBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    fn submit<'a>(
        &'a self,
        upload: &'a PendingUpload,
    ) -> Pin<Box<dyn Future<Output = Result<RawReply, CoreError>> + Send + 'a>> {
        Box::pin(async move {
            let bytes = tokio::fs::read(&upload.path).await?;
            let part = reqwest::multipart::Part::bytes(bytes)
                .file_name(upload.name.clone())
                .mime_str(PDF_MEDIA_TYPE)?;
            let form = reqwest::multipart::Form::new().part("file", part);

            let url = self.config.endpoint_url(upload.kind);
            tracing::info!(kind = %upload.kind, url = %url, file = %upload.name, "submitting for extraction");

            let resp = self.client.post(&url).multipart(form).send().await?;
            let status = resp.status();
            let body = resp.bytes().await?;
            tracing::debug!(kind = %upload.kind, status = status.as_u16(), bytes = body.len(), "reply received");

            let body: Value = serde_json::from_slice(&body)
                .map_err(|e| CoreError::InvalidResponse(format!("HTTP {status}: {e}")))?;
            Ok(RawReply::new(status.as_u16(), body))
        })
    }
}

/// Turn a reply into a result. Success needs a 2xx status, `"status":
/// "success"` and an object under `data`; anything else is a failure whose
/// message comes from `message`, then `error`, then a generic fallback.
pub fn interpret_reply(
    kind: DocumentKind,
    reply: RawReply,
) -> Result<ExtractionResult, ExtractionFailure> {
    let succeeded = reply.is_success_status()
        && reply.body.get("status").and_then(Value::as_str) == Some("success");

    if succeeded && let Some(Value::Object(data)) = reply.body.get("data") {
        return Ok(ExtractionResult::new(kind, data.clone()));
    }

    let message = ["message", "error"]
        .iter()
        .filter_map(|key| reply.body.get(*key).and_then(Value::as_str))
        .find(|m| !m.is_empty())
        .unwrap_or(MSG_EXTRACT_FAILED);
    Err(ExtractionFailure::new(message))
}

/// Submit one upload and interpret the reply.
pub async fn extract(
    backend: &dyn ExtractionBackend,
    upload: &PendingUpload,
) -> Result<ExtractionResult, ExtractionFailure> {
    let reply = match backend.submit(upload).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(kind = %upload.kind, backend = backend.name(), error = %e, "extraction request failed");
            return Err(e.into());
        }
    };

    let outcome = interpret_reply(upload.kind, reply);
    match &outcome {
        Ok(_) => tracing::info!(kind = %upload.kind, file = %upload.name, "extraction succeeded"),
        Err(f) => tracing::warn!(kind = %upload.kind, message = %f, "extraction rejected"),
    }
    outcome
}
