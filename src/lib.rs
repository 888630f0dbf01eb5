pub mod autocomplete;
pub mod config;
pub mod debounce;
pub mod directory;
pub mod error;
pub mod models;
pub mod storage;
pub mod summary;
pub mod synth;
pub mod transport;

use std::sync::Arc;

use crate::config::Config;
use crate::directory::{DirectoryClient, UfabcNextClient};
use crate::error::Result;
use crate::models::Professor;
use crate::summary::{SummaryOrchestrator, SummaryStatus};
use crate::synth::{GeminiSummarizer, Summarizer};
use crate::transport::{GeminiTransport, Transport};

/// Wires the directory client, Gemini transport, and summary orchestration
/// together for the interactive front-end.
pub struct ReviewSummaryService {
    directory: Arc<dyn DirectoryClient>,
    orchestrator: SummaryOrchestrator,
}

impl ReviewSummaryService {
    pub fn new(cfg: &Config) -> Self {
        let directory: Arc<dyn DirectoryClient> = Arc::new(UfabcNextClient::new(&cfg.directory));
        let transport = Arc::new(GeminiTransport::new(cfg.gemini.model.clone()));
        let summarizer: Arc<dyn Summarizer> =
            Arc::new(GeminiSummarizer::new(transport as Arc<dyn Transport>));
        let orchestrator = SummaryOrchestrator::new(Arc::clone(&directory), summarizer);

        Self {
            directory,
            orchestrator,
        }
    }

    /// Directory search. The presentation layer degrades a failure to an
    /// empty candidate list; the error is surfaced here so it can at least
    /// be logged before that happens.
    pub async fn search_professors(&self, name: &str) -> Result<Vec<Professor>> {
        self.directory.search_professors(name).await
    }

    /// Explicit summary trigger; see [`SummaryOrchestrator::refetch`].
    pub async fn refetch_summary(
        &mut self,
        professor: Option<&Professor>,
        credential: &str,
        extra_arguments: &str,
    ) -> SummaryStatus {
        self.orchestrator
            .refetch(professor, credential, extra_arguments)
            .await
            .clone()
    }
}
