use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{ReviewSummaryError, Result};
use crate::models::{Comment, GenerateContentRequest};
use crate::transport::Transport;

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        api_key: &str,
        comments: &[Comment],
        extra_arguments: &str,
    ) -> Result<String>;
}

pub struct GeminiSummarizer {
    tx: Arc<dyn Transport>,
}

impl GeminiSummarizer {
    pub fn new(tx: Arc<dyn Transport>) -> Self {
        Self { tx }
    }
}

/// Build the fixed-template prompt. Embedded newlines are replaced with
/// spaces before concatenation so adjacent comments cannot merge into
/// run-on or mis-attributed sentences.
fn build_prompt(comments: &[Comment], extra_arguments: &str) -> String {
    let blob = comments
        .iter()
        .map(|c| c.comment.replace('\n', " "))
        .collect::<Vec<_>>()
        .join(" ");

    format!("Faça um resumo das seguintes reviews, {extra_arguments}: {blob}")
}

#[async_trait]
impl Summarizer for GeminiSummarizer {
    async fn summarize(
        &self,
        api_key: &str,
        comments: &[Comment],
        extra_arguments: &str,
    ) -> Result<String> {
        tracing::info!("Summarizing {} review comments with Gemini", comments.len());

        let prompt = build_prompt(comments, extra_arguments);
        let request = GenerateContentRequest::single_turn(prompt);

        let response = self.tx.generate(api_key, &request).await?;

        response.text().ok_or_else(|| {
            ReviewSummaryError::ExternalService(
                "Gemini API returned no candidates".to_string(),
            )
        })
    }
}
