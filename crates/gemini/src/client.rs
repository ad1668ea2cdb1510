//! HTTP client for the Gemini generative API.
//!
//! [`GeminiClient`] holds the credential and base URL for one API
//! endpoint; [`GeminiModel`] binds it to a model name and implements the
//! [`ContentGenerator`] seam the pipeline consumes.

use async_trait::async_trait;

use crate::types::{GenerateContentRequest, GenerateContentResponse};

/// Env var holding the API credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Errors from the Gemini client layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// `GEMINI_API_KEY` is not set. Fatal — checked before any work starts.
    #[error("{API_KEY_ENV} environment variable is required")]
    MissingCredential,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("Gemini request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Gemini API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for diagnostics.
        body: String,
    },
}

/// Client for one Gemini API endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client against the production endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (tests, proxies).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Create a client from `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self, GeminiError> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(GeminiError::MissingCredential),
        }
    }

    /// Bind this client to a model name.
    pub fn model(&self, name: impl Into<String>) -> GeminiModel {
        GeminiModel {
            client: self.clone(),
            model: name.into(),
        }
    }

    /// Call `models/<model>:generateContent`.
    ///
    /// The credential travels in the `x-goog-api-key` header rather than
    /// the query string so it never lands in request logs.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeminiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<GenerateContentResponse>().await?)
    }
}

/// Something that can answer a `generateContent` request.
///
/// The pipeline is written against this trait; production uses
/// [`GeminiModel`], tests use a scripted fake.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError>;
}

/// A [`GeminiClient`] bound to one model name.
#[derive(Debug, Clone)]
pub struct GeminiModel {
    client: GeminiClient,
    model: String,
}

impl GeminiModel {
    /// The bound model name.
    pub fn model_name(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ContentGenerator for GeminiModel {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        tracing::debug!(model = %self.model, "Sending generateContent request");
        self.client.generate_content(&self.model, request).await
    }
}
