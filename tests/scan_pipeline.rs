//! End-to-end: raw text through parsing, gating and rescans

mod common;

use common::{causal_text, tiered_text, CD3_MAP};
use gatemap::{
    parse_document, AnalysisSession, DetailView, EdgeStyle, Grammar, MockGenerator, MockSearch,
    NodeId, ParseError, RenderState, ScanError, Scanner, SearchHit, UnlockOutcome,
};
use std::sync::Arc;

fn edges(session: &AnalysisSession) -> Vec<(String, String, EdgeStyle)> {
    session
        .graph()
        .unwrap()
        .edges()
        .map(|e| (e.source.to_string(), e.target.to_string(), e.style))
        .collect()
}

#[test]
fn cd3_example_end_to_end() {
    let mut session = AnalysisSession::new(Grammar::causal()).unwrap();
    session.submit_scan("CD3", &causal_text(CD3_MAP)).unwrap();

    let graph = session.graph().unwrap();
    let mut ids: Vec<&str> = graph.all_nodes().map(|n| n.label()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["CAR-T", "CD3", "ITAM", "exhaustion"]);
    assert!(graph.node(&NodeId::from("CD3")).unwrap().is_center());

    assert_eq!(
        edges(&session),
        vec![
            ("ITAM".to_string(), "CD3".to_string(), EdgeStyle::Solid),
            ("CD3".to_string(), "CAR-T".to_string(), EdgeStyle::Solid),
            ("CD3".to_string(), "exhaustion".to_string(), EdgeStyle::Dashed),
        ]
    );
}

#[test]
fn parsing_is_idempotent() {
    let grammar = Grammar::causal();
    let text = causal_text(CD3_MAP);
    let first = parse_document(&text, "CD3", &grammar).unwrap();
    let second = parse_document(&text, "CD3", &grammar).unwrap();
    assert_eq!(first.graph, second.graph);
}

#[test]
fn mixed_malformed_lines_yield_only_wellformed_nodes() {
    let map = "PRE:ITAM:signal motif\n- a stray bullet\nPOST:CAR-T:manufacturing use\nThe model rambles here\nISSUE:exhaustion:durability loss";
    let doc = parse_document(&causal_text(map), "CD3", &Grammar::causal()).unwrap();
    assert_eq!(doc.graph.peripheral_count(), 3);
    assert_eq!(doc.report.skipped.len(), 2);
}

#[test]
fn unrecognised_categories_become_dotted_outbound_edges() {
    let doc = parse_document(
        &causal_text("RISK:cytokine storm:overactivation"),
        "CD3",
        &Grammar::causal(),
    )
    .unwrap();
    let edge = doc.graph.edge_for(&NodeId::from("cytokine storm")).unwrap();
    assert_eq!(edge.source.as_str(), "CD3");
    assert_eq!(edge.style, EdgeStyle::Dotted);
    assert!(edge.category.is_unknown());
}

#[test]
fn gate_walkthrough_reveals_levels_in_order() {
    let mut session = AnalysisSession::new(Grammar::tiered()).unwrap();
    session
        .submit_scan(
            "CD3",
            &tiered_text("Lv1:doorbell:switch\nLv3:ITAM:motif\nLv5:exhaustion:fatigue"),
        )
        .unwrap();

    assert_eq!(
        session.detail("Lv5"),
        Some(DetailView::Locked {
            question: Some("Why does the wire wear out?")
        })
    );
    assert!(matches!(
        session.request_unlock("Lv5", "skip ahead"),
        UnlockOutcome::NotEligible { .. }
    ));

    assert!(session.request_unlock("Lv3", "the doorbell is wired to ITAM").changed());
    assert!(session.request_unlock("Lv5", "wires fatigue").changed());
    assert!(session.gate().is_complete());
    assert_eq!(
        session.detail("Lv5"),
        Some(DetailView::Unlocked {
            text: Some("Exhaustion limits CAR-T persistence.")
        })
    );
    assert_eq!(session.gate().records().len(), 2);
}

#[test]
fn failed_rescan_keeps_prior_state_and_raw_text() {
    let mut session = AnalysisSession::new(Grammar::causal()).unwrap();
    session.submit_scan("CD3", &causal_text(CD3_MAP)).unwrap();
    session.request_unlock("POST", "");

    let broken = "=== MAP ===\nPRE:X:only a map, no detail marker";
    let err = session.submit_scan("CD45", broken).unwrap_err();

    assert_eq!(
        err,
        ScanError::Parse(ParseError::MissingDelimiter {
            token: "=== DETAIL ===".into()
        })
    );
    assert_eq!(session.render_state(), RenderState::Error);
    assert_eq!(session.gate().unlocked_levels(), ["PRE", "POST"]);
    assert_eq!(session.graph().unwrap().peripheral_count(), 3);
    assert_eq!(session.last_error().unwrap().raw_text.as_deref(), Some(broken));
}

#[tokio::test]
async fn scanner_drives_collaborators_then_commits() {
    let generator = Arc::new(MockGenerator::responding(causal_text(CD3_MAP)));
    let scanner = Scanner::new(
        Arc::new(MockSearch::with_hits(vec![SearchHit::new(
            "CD3 associates with the T-cell receptor",
        )])),
        generator.clone(),
    );
    let mut session = AnalysisSession::new(Grammar::causal()).unwrap();

    scanner.scan(&mut session, "CD3").await.unwrap();
    session.request_unlock("POST", "");
    scanner.scan(&mut session, "CD3").await.unwrap();

    assert_eq!(session.scan_count(), 2);
    assert_eq!(session.gate().unlocked_levels(), ["PRE"]);
    assert_eq!(generator.prompts().len(), 2);
    assert!(generator.prompts()[0].contains("=== MAP ==="));
}
