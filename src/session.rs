//! AnalysisSession: the aggregate root of one interactive session

use crate::collab::CollaboratorError;
use crate::gate::{GateState, UnlockOutcome};
use crate::graph::Graph;
use crate::parse::{parse_document, Grammar, GrammarError, ParseError, ParseReport, ParsedDocument};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Unique identifier for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a scan did not replace the session state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("search failed: {0}")]
    Search(CollaboratorError),

    #[error("text generation failed: {0}")]
    Generation(CollaboratorError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// The last failed scan, kept for diagnosis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFailure {
    pub query: String,
    /// Text that failed to parse, when the generator produced any
    pub raw_text: Option<String>,
    pub error: ScanError,
}

/// What the presentation layer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderState {
    /// No scan has been submitted yet
    Idle,
    /// A scan is in flight
    Pending,
    /// A graph is available and the last scan succeeded
    Ready,
    /// The last scan failed; show the error and its raw text
    Error,
}

/// Counts from a successful scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub skipped_lines: usize,
    pub replaced: usize,
}

/// Detail text for one level as the user may see it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailView<'a> {
    Unlocked { text: Option<&'a str> },
    /// Locked text is never exposed; only the question that gates it
    Locked { question: Option<&'a str> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelView<'a> {
    pub level: &'a str,
    pub view: DetailView<'a>,
}

/// One user's analysis session
///
/// Holds the current query, raw text, parsed graph, gate state and error
/// state. A scan replaces query, raw text and graph together and resets
/// the gate only after its text fully parses; a failed scan only records
/// [`ScanFailure`].
#[derive(Debug)]
pub struct AnalysisSession {
    id: SessionId,
    grammar: Grammar,
    query: Option<String>,
    raw_text: Option<String>,
    document: Option<ParsedDocument>,
    gate: GateState,
    last_error: Option<ScanFailure>,
    pending: bool,
    scan_count: u64,
}

impl AnalysisSession {
    /// Create an empty session for a grammar.
    pub fn new(grammar: Grammar) -> Result<Self, GrammarError> {
        grammar.validate()?;
        let gate = GateState::from_levels(&grammar.levels).ok_or(GrammarError::NoLevels)?;
        Ok(Self {
            id: SessionId::new(),
            grammar,
            query: None,
            raw_text: None,
            document: None,
            gate,
            last_error: None,
            pending: false,
            scan_count: 0,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Query of the last successful scan
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Raw text of the last successful scan
    pub fn raw_text(&self) -> Option<&str> {
        self.raw_text.as_deref()
    }

    pub fn graph(&self) -> Option<&Graph> {
        self.document.as_ref().map(|d| &d.graph)
    }

    pub fn report(&self) -> Option<&ParseReport> {
        self.document.as_ref().map(|d| &d.report)
    }

    pub fn gate(&self) -> &GateState {
        &self.gate
    }

    pub fn last_error(&self) -> Option<&ScanFailure> {
        self.last_error.as_ref()
    }

    /// Number of successful scans
    pub fn scan_count(&self) -> u64 {
        self.scan_count
    }

    pub fn render_state(&self) -> RenderState {
        if self.pending {
            RenderState::Pending
        } else if self.last_error.is_some() {
            RenderState::Error
        } else if self.document.is_some() {
            RenderState::Ready
        } else {
            RenderState::Idle
        }
    }

    /// Mark a scan as in flight.
    pub fn begin_scan(&mut self) {
        self.pending = true;
    }

    /// Parse `raw_text` for `query` and, on success, replace the session state.
    pub fn submit_scan(&mut self, query: &str, raw_text: &str) -> Result<ScanSummary, ScanError> {
        let center = query.trim();
        if center.is_empty() {
            return Err(self.record_failure(query, Some(raw_text.to_string()), ScanError::EmptyQuery));
        }

        let document = match parse_document(raw_text, center, &self.grammar) {
            Ok(document) => document,
            Err(e) => return Err(self.record_failure(query, Some(raw_text.to_string()), e.into())),
        };

        let summary = ScanSummary {
            node_count: document.graph.node_count(),
            edge_count: document.graph.edge_count(),
            skipped_lines: document.report.skipped.len(),
            replaced: document.report.replaced,
        };
        self.query = Some(center.to_string());
        self.raw_text = Some(raw_text.to_string());
        self.document = Some(document);
        self.gate.reset();
        self.last_error = None;
        self.pending = false;
        self.scan_count += 1;

        info!(
            session = %self.id,
            query = center,
            nodes = summary.node_count,
            skipped = summary.skipped_lines,
            "scan committed"
        );
        Ok(summary)
    }

    /// Record a failed scan, leaving graph and gate untouched.
    ///
    /// Returns the error for convenient propagation.
    pub fn record_failure(
        &mut self,
        query: &str,
        raw_text: Option<String>,
        error: ScanError,
    ) -> ScanError {
        warn!(session = %self.id, query, error = %error, "scan failed");
        self.pending = false;
        self.last_error = Some(ScanFailure {
            query: query.to_string(),
            raw_text,
            error: error.clone(),
        });
        error
    }

    /// Ask to reveal `level`. No-op unless it is the next locked level.
    pub fn request_unlock(&mut self, level: &str, justification: &str) -> UnlockOutcome {
        self.gate.request_unlock(level, justification)
    }

    /// Gate question guarding `level`
    pub fn gate_question(&self, level: &str) -> Option<&str> {
        self.document.as_ref()?.questions.get(level)
    }

    /// Detail for one level, hiding the text while it is locked
    pub fn detail(&self, level: &str) -> Option<DetailView<'_>> {
        let document = self.document.as_ref()?;
        if self.gate.is_unlocked(level) {
            Some(DetailView::Unlocked {
                text: document.details.get(level),
            })
        } else if self.gate.state(level).is_some() {
            Some(DetailView::Locked {
                question: document.questions.get(level),
            })
        } else {
            None
        }
    }

    /// Detail views for every level in ascending order
    pub fn levels(&self) -> Vec<LevelView<'_>> {
        self.gate
            .levels()
            .iter()
            .filter_map(|level| {
                self.detail(level).map(|view| LevelView {
                    level: level.as_str(),
                    view,
                })
            })
            .collect()
    }
}
