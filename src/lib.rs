//! Gatemap: generated text → typed knowledge graph with gated detail
//!
//! Turns an untrusted block of generated text into a validated graph
//! centred on the queried concept, and gates deeper per-level detail
//! behind explicit user confirmation.
//!
//! # Core Concepts
//!
//! - **Grammar**: configurable section delimiters, line separator, category
//!   vocabulary and gate levels
//! - **Graph**: one center node plus peripheral nodes; edges are derived from
//!   each node's category
//! - **Gate**: the unlocked prefix of the level list
//! - **Session**: the aggregate that replaces its graph only on a fully
//!   successful parse
//!
//! # Example
//!
//! ```
//! use gatemap::{AnalysisSession, Grammar};
//!
//! let mut session = AnalysisSession::new(Grammar::causal()).unwrap();
//! let text = "=== MAP ===\nPRE:ITAM:signal motif\n=== DETAIL ===\n- PRE: basics\n";
//! session.submit_scan("CD3", text).unwrap();
//! assert_eq!(session.graph().unwrap().node_count(), 2);
//! ```

pub mod collab;
pub mod gate;
mod graph;
pub mod parse;
pub mod prompt;
pub mod render;
pub mod scan;
pub mod session;

pub use collab::{CollaboratorError, MockGenerator, MockSearch, SearchHit, SearchProvider, TextGenerator};
pub use gate::{GateShapeError, GateState, LevelState, UnlockOutcome, UnlockRecord};
pub use graph::{
    Category, Edge, EdgeDirection, EdgeStyle, Graph, GraphBuilder, GraphShapeError, Node, NodeId,
    NodeRole, Route, Upsert,
};
pub use parse::{parse_document, Grammar, GrammarError, ParseError, ParseReport, ParsedDocument};
pub use render::{mermaid, Layout};
pub use scan::Scanner;
pub use session::{
    AnalysisSession, DetailView, LevelView, RenderState, ScanError, ScanFailure, ScanSummary,
    SessionId,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
