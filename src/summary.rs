use std::collections::HashMap;
use std::sync::Arc;

use crate::directory::DirectoryClient;
use crate::error::Result;
use crate::models::{Professor, SummaryRequestKey};
use crate::synth::Summarizer;

/// Outcome of the most recent summary trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryStatus {
    Idle,
    Loading,
    Succeeded(String),
    Failed(String),
}

/// Summary orchestration: triggers the comments fetch + generation at most
/// once per distinct (professor, credential, instructions) key.
///
/// There is no implicit refetch anywhere; `refetch` is the only trigger.
/// An unchanged key reuses the prior outcome, including failures, so a
/// rejected call is never silently re-issued against the user's quota.
pub struct SummaryOrchestrator {
    directory: Arc<dyn DirectoryClient>,
    summarizer: Arc<dyn Summarizer>,
    cache: HashMap<SummaryRequestKey, String>,
    current: Option<SummaryRequestKey>,
    status: SummaryStatus,
}

impl SummaryOrchestrator {
    pub fn new(directory: Arc<dyn DirectoryClient>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            directory,
            summarizer,
            cache: HashMap::new(),
            current: None,
            status: SummaryStatus::Idle,
        }
    }

    pub fn status(&self) -> &SummaryStatus {
        &self.status
    }

    /// Explicit trigger. Gated on a selected professor and a non-empty
    /// credential; when the gate fails no external call is ever issued and
    /// the status returns to idle.
    pub async fn refetch(
        &mut self,
        professor: Option<&Professor>,
        credential: &str,
        extra_arguments: &str,
    ) -> &SummaryStatus {
        let Some(professor) = professor else {
            self.current = None;
            self.status = SummaryStatus::Idle;
            return &self.status;
        };
        if credential.is_empty() {
            self.current = None;
            self.status = SummaryStatus::Idle;
            return &self.status;
        }

        let key = SummaryRequestKey {
            professor_id: professor.id.clone(),
            credential: credential.to_string(),
            extra_arguments: extra_arguments.to_string(),
        };

        // Unchanged key: reuse the settled outcome without flickering back
        // to loading or re-issuing the call.
        if self.current.as_ref() == Some(&key) {
            return &self.status;
        }

        if let Some(text) = self.cache.get(&key) {
            tracing::debug!("Reusing cached summary for professor {}", key.professor_id);
            self.current = Some(key);
            self.status = SummaryStatus::Succeeded(text.clone());
            return &self.status;
        }

        self.current = Some(key.clone());
        self.status = SummaryStatus::Loading;

        match self.fetch(&key).await {
            Ok(text) => {
                self.cache.insert(key, text.clone());
                self.status = SummaryStatus::Succeeded(text);
            }
            Err(e) => {
                tracing::warn!("Summary generation failed: {}", e);
                self.status = SummaryStatus::Failed(e.to_string());
            }
        }
        &self.status
    }

    async fn fetch(&self, key: &SummaryRequestKey) -> Result<String> {
        let comments = self.directory.list_comments(&key.professor_id).await?;
        self.summarizer
            .summarize(&key.credential, &comments, &key.extra_arguments)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::MockDirectoryClient;
    use crate::error::ReviewSummaryError;
    use crate::models::Comment;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // Mock Summarizer that counts external calls.
    struct MockSummarizer {
        calls: Mutex<usize>,
        outcome: fn(usize) -> Result<String>,
    }

    impl MockSummarizer {
        fn succeeding() -> Self {
            Self {
                calls: Mutex::new(0),
                outcome: |n| Ok(format!("summary {n}")),
            }
        }

        fn failing() -> Self {
            Self {
                calls: Mutex::new(0),
                outcome: |_| {
                    Err(ReviewSummaryError::ExternalService(
                        "quota exhausted".to_string(),
                    ))
                },
            }
        }

        fn call_count(&self) -> usize {
            *self.calls.lock().expect("mutex should not be poisoned")
        }
    }

    #[async_trait]
    impl Summarizer for MockSummarizer {
        async fn summarize(
            &self,
            _api_key: &str,
            _comments: &[Comment],
            _extra_arguments: &str,
        ) -> Result<String> {
            let mut calls = self.calls.lock().expect("mutex should not be poisoned");
            *calls += 1;
            (self.outcome)(*calls)
        }
    }

    fn directory_with_comments() -> Arc<MockDirectoryClient> {
        let mut mock = MockDirectoryClient::new();
        mock.expect_list_comments().returning(|_| {
            Ok(vec![Comment {
                comment: "Great lectures".to_string(),
            }])
        });
        Arc::new(mock)
    }

    fn professor() -> Professor {
        Professor {
            id: "1".to_string(),
            name: "Dr. Smith".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_credential_never_issues_external_call() {
        let mut directory = MockDirectoryClient::new();
        directory.expect_list_comments().never();
        let summarizer = Arc::new(MockSummarizer::succeeding());
        let mut orch = SummaryOrchestrator::new(Arc::new(directory), Arc::clone(&summarizer) as Arc<dyn Summarizer>);

        let status = orch.refetch(Some(&professor()), "", "").await;
        assert_eq!(*status, SummaryStatus::Idle);
        assert_eq!(summarizer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_no_professor_stays_idle() {
        let summarizer = Arc::new(MockSummarizer::succeeding());
        let mut orch =
            SummaryOrchestrator::new(directory_with_comments(), Arc::clone(&summarizer) as Arc<dyn Summarizer>);

        let status = orch.refetch(None, "key", "").await;
        assert_eq!(*status, SummaryStatus::Idle);
        assert_eq!(summarizer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unchanged_key_issues_call_exactly_once() {
        let summarizer = Arc::new(MockSummarizer::succeeding());
        let mut orch =
            SummaryOrchestrator::new(directory_with_comments(), Arc::clone(&summarizer) as Arc<dyn Summarizer>);
        let p = professor();

        let first = orch.refetch(Some(&p), "key", "").await.clone();
        let second = orch.refetch(Some(&p), "key", "").await.clone();

        assert_eq!(first, SummaryStatus::Succeeded("summary 1".to_string()));
        assert_eq!(second, first);
        assert_eq!(summarizer.call_count(), 1);
    }

    #[tokio::test]
    async fn test_changed_instructions_issue_fresh_call() {
        let summarizer = Arc::new(MockSummarizer::succeeding());
        let mut orch =
            SummaryOrchestrator::new(directory_with_comments(), Arc::clone(&summarizer) as Arc<dyn Summarizer>);
        let p = professor();

        orch.refetch(Some(&p), "key", "").await;
        let status = orch.refetch(Some(&p), "key", "em tópicos").await.clone();

        assert_eq!(status, SummaryStatus::Succeeded("summary 2".to_string()));
        assert_eq!(summarizer.call_count(), 2);
    }

    #[tokio::test]
    async fn test_returning_to_prior_key_reuses_cached_text() {
        let summarizer = Arc::new(MockSummarizer::succeeding());
        let mut orch =
            SummaryOrchestrator::new(directory_with_comments(), Arc::clone(&summarizer) as Arc<dyn Summarizer>);
        let p = professor();

        orch.refetch(Some(&p), "key", "").await;
        orch.refetch(Some(&p), "key", "em tópicos").await;
        let status = orch.refetch(Some(&p), "key", "").await.clone();

        assert_eq!(status, SummaryStatus::Succeeded("summary 1".to_string()));
        assert_eq!(summarizer.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failure_is_surfaced_and_not_retried() {
        let summarizer = Arc::new(MockSummarizer::failing());
        let mut orch =
            SummaryOrchestrator::new(directory_with_comments(), Arc::clone(&summarizer) as Arc<dyn Summarizer>);
        let p = professor();

        let first = orch.refetch(Some(&p), "key", "").await.clone();
        assert!(matches!(first, SummaryStatus::Failed(_)));

        // Same key again: the failed outcome is reused, no silent retry.
        let second = orch.refetch(Some(&p), "key", "").await.clone();
        assert_eq!(second, first);
        assert_eq!(summarizer.call_count(), 1);
    }

    #[tokio::test]
    async fn test_directory_failure_surfaces_as_failed() {
        let mut directory = MockDirectoryClient::new();
        directory.expect_list_comments().returning(|_| {
            Err(ReviewSummaryError::Network("unreachable".to_string()))
        });
        let summarizer = Arc::new(MockSummarizer::succeeding());
        let mut orch = SummaryOrchestrator::new(Arc::new(directory), Arc::clone(&summarizer) as Arc<dyn Summarizer>);

        let status = orch.refetch(Some(&professor()), "key", "").await;
        assert!(matches!(status, SummaryStatus::Failed(_)));
        assert_eq!(summarizer.call_count(), 0);
    }
}
