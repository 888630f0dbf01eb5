use async_trait::async_trait;
use reqwest::Client;

use crate::error::{ReviewSummaryError, Result};
use crate::models::{GenerateContentRequest, GenerateContentResponse};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Transport to the generative-text service. The credential is supplied
/// per call because it belongs to the end user, not the deployment.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn generate(
        &self,
        api_key: &str,
        req: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

pub struct GeminiTransport {
    client: Client,
    model: String,
}

impl GeminiTransport {
    pub fn new(model: String) -> Self {
        Self {
            client: Client::new(),
            model,
        }
    }
}

#[async_trait]
impl Transport for GeminiTransport {
    /// One attempt, no automatic retry: a rejected call burns user quota,
    /// so the failure is surfaced instead of re-issued.
    async fn generate(
        &self,
        api_key: &str,
        req: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model, api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(req)
            .send()
            .await
            .map_err(|e| {
                ReviewSummaryError::Network(format!("Failed to reach Gemini API: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ReviewSummaryError::ExternalService(format!(
                "Gemini API returned {status}: {body}"
            )));
        }

        response.json().await.map_err(|e| {
            ReviewSummaryError::ExternalService(format!(
                "Failed to parse Gemini API response: {e}"
            ))
        })
    }
}
