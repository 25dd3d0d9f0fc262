//! External collaborators: web search and text generation
//!
//! Defines the client traits the scan pipeline calls. The core ships no
//! network client; callers plug one in. Two mock implementations return
//! preconfigured results for tests and offline use.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// One search result. Only `content` is fed into the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    pub content: String,
}

impl SearchHit {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            title: None,
            url: None,
            content: content.into(),
        }
    }
}

/// Errors from collaborator calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    #[error("service not available: {0}")]
    Unavailable(String),
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("service returned an empty response")]
    EmptyResponse,
}

/// Web search collaborator.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, CollaboratorError>;
}

/// Text-generation collaborator.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate raw text for a prompt.
    async fn generate(&self, prompt: &str) -> Result<String, CollaboratorError>;
}

/// Mock search provider: returns preconfigured hits.
pub struct MockSearch {
    result: Result<Vec<SearchHit>, CollaboratorError>,
}

impl MockSearch {
    pub fn with_hits(hits: Vec<SearchHit>) -> Self {
        Self { result: Ok(hits) }
    }

    pub fn empty() -> Self {
        Self::with_hits(Vec::new())
    }

    pub fn failing(error: CollaboratorError) -> Self {
        Self { result: Err(error) }
    }
}

#[async_trait]
impl SearchProvider for MockSearch {
    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, CollaboratorError> {
        self.result.clone()
    }
}

/// Mock generator: returns a fixed response and remembers the prompts it saw.
pub struct MockGenerator {
    result: Result<String, CollaboratorError>,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    pub fn responding(text: impl Into<String>) -> Self {
        Self {
            result: Ok(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: CollaboratorError) -> Self {
        Self {
            result: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, CollaboratorError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        match &self.result {
            Ok(text) if text.trim().is_empty() => Err(CollaboratorError::EmptyResponse),
            other => other.clone(),
        }
    }
}
