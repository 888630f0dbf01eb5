use async_trait::async_trait;
use reqwest::Client;

use crate::config::DirectoryConfig;
use crate::error::{ReviewSummaryError, Result};
use crate::models::{Comment, DataEnvelope, Professor};

#[cfg(test)]
use mockall::automock;

/// Read-only client for the external review directory.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Search professors by name prefix. An empty match set is an empty
    /// vector, not an error.
    async fn search_professors(&self, name: &str) -> Result<Vec<Professor>>;

    /// Fetch the first bounded page of review comments for a professor.
    /// Reviews beyond the configured limit are knowingly truncated.
    async fn list_comments(&self, teacher_id: &str) -> Result<Vec<Comment>>;
}

/// reqwest-backed client for the UFABC next API. Authenticated with a
/// static bearer token owned by the deployment, not the end user.
pub struct UfabcNextClient {
    client: Client,
    base_url: String,
    bearer_token: String,
    comment_page: u32,
    comment_limit: u32,
}

impl UfabcNextClient {
    pub fn new(cfg: &DirectoryConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            bearer_token: cfg.bearer_token.clone(),
            comment_page: cfg.comment_page,
            comment_limit: cfg.comment_limit,
        }
    }

    async fn fetch_data<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .header("Authorization", format!("Bearer {}", self.bearer_token))
            .send()
            .await
            .map_err(|e| ReviewSummaryError::Network(format!("Directory request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ReviewSummaryError::Network(format!(
                "Directory returned {} for {}",
                response.status(),
                path
            )));
        }

        let envelope: DataEnvelope<T> = response.json().await.map_err(|e| {
            ReviewSummaryError::Network(format!("Malformed directory response: {e}"))
        })?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl DirectoryClient for UfabcNextClient {
    async fn search_professors(&self, name: &str) -> Result<Vec<Professor>> {
        tracing::debug!("Searching directory for professor: {}", name);
        self.fetch_data("teachers/search", &[("q", name.to_string())])
            .await
    }

    async fn list_comments(&self, teacher_id: &str) -> Result<Vec<Comment>> {
        tracing::debug!("Fetching comments for professor: {}", teacher_id);
        self.fetch_data(
            &format!("comments/{teacher_id}"),
            &[
                ("page", self.comment_page.to_string()),
                ("limit", self.comment_limit.to_string()),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let mut cfg = Config::default().directory;
        cfg.base_url = "https://api.example.com/v1/".to_string();
        let client = UfabcNextClient::new(&cfg);
        assert_eq!(client.base_url, "https://api.example.com/v1");
    }

    #[tokio::test]
    async fn test_mock_search_returns_empty_without_error() {
        let mut mock = MockDirectoryClient::new();
        mock.expect_search_professors().returning(|_| Ok(vec![]));
        let results = mock
            .search_professors("nobody")
            .await
            .expect("empty search should not error");
        assert!(results.is_empty());
    }
}
