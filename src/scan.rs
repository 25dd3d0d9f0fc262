//! Scanner: search → prompt → generate → parse, strictly in sequence

use crate::collab::{SearchProvider, TextGenerator};
use crate::prompt::build_prompt;
use crate::session::{AnalysisSession, ScanError, ScanSummary};
use std::sync::Arc;
use tracing::debug;

/// Runs one scan against the external collaborators
///
/// The session is marked pending for the whole sequence and only replaced
/// once the generated text parses. No retries and no timeouts; those
/// belong to the collaborator implementations.
#[derive(Clone)]
pub struct Scanner {
    search: Arc<dyn SearchProvider>,
    generator: Arc<dyn TextGenerator>,
}

impl Scanner {
    pub fn new(search: Arc<dyn SearchProvider>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { search, generator }
    }

    pub async fn scan(
        &self,
        session: &mut AnalysisSession,
        query: &str,
    ) -> Result<ScanSummary, ScanError> {
        if query.trim().is_empty() {
            return Err(session.record_failure(query, None, ScanError::EmptyQuery));
        }
        session.begin_scan();

        let hits = match self.search.search(query.trim()).await {
            Ok(hits) => hits,
            Err(e) => return Err(session.record_failure(query, None, ScanError::Search(e))),
        };
        debug!(query, hits = hits.len(), "search complete");

        let prompt = build_prompt(session.grammar(), query, &hits);
        let raw_text = match self.generator.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => return Err(session.record_failure(query, None, ScanError::Generation(e))),
        };
        debug!(query, bytes = raw_text.len(), "generation complete");

        session.submit_scan(query, &raw_text)
    }
}
