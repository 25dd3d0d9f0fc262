//! Presentation instructions: Graph → Mermaid text
//!
//! Layout is a pure function of the graph; both layouts consume the same
//! [`Graph`] without re-deriving anything.

use crate::graph::{EdgeStyle, Graph, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write;

/// Layout style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Flowchart with directed, styled edges
    #[default]
    Hierarchical,
    /// Mindmap rooted at the center, grouped by category
    Radial,
}

/// Render a graph as Mermaid source.
pub fn mermaid(graph: &Graph, layout: Layout) -> String {
    match layout {
        Layout::Hierarchical => flowchart(graph),
        Layout::Radial => mindmap(graph),
    }
}

fn flowchart(graph: &Graph) -> String {
    let mut out = String::from("flowchart TD\n");
    let mut ids: HashMap<&NodeId, String> = HashMap::new();

    let center = graph.center();
    ids.insert(&center.id, "c0".to_string());
    let _ = writeln!(out, "    c0((\"{}\"))", escape(center.label()));

    for (i, node) in graph.nodes().enumerate() {
        let id = format!("n{}", i);
        let _ = writeln!(out, "    {}[\"{}\"]", id, escape(node.label()));
        ids.insert(&node.id, id);
    }

    let mut dotted = Vec::new();
    for (i, edge) in graph.edges().enumerate() {
        let (Some(source), Some(target)) = (ids.get(&edge.source), ids.get(&edge.target)) else {
            continue;
        };
        let arrow = match edge.style {
            EdgeStyle::Solid => "-->",
            EdgeStyle::Dashed | EdgeStyle::Dotted => "-.->",
        };
        let _ = writeln!(out, "    {} {} {}", source, arrow, target);
        if edge.style == EdgeStyle::Dotted {
            dotted.push(i);
        }
    }

    for i in dotted {
        let _ = writeln!(out, "    linkStyle {} stroke-dasharray: 1 4", i);
    }
    out
}

fn mindmap(graph: &Graph) -> String {
    let mut out = String::from("mindmap\n");
    let _ = writeln!(out, "  root((\"{}\"))", escape(graph.center().label()));

    // Group by category, keeping first-seen category order.
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for node in graph.nodes() {
        let category = node.category.as_ref().map(|c| c.name()).unwrap_or("UNKNOWN");
        match groups.iter_mut().find(|(name, _)| *name == category) {
            Some((_, labels)) => labels.push(node.label()),
            None => groups.push((category, vec![node.label()])),
        }
    }

    for (category, labels) in groups {
        let _ = writeln!(out, "    [\"{}\"]", escape(category));
        for label in labels {
            let _ = writeln!(out, "      [\"{}\"]", escape(label));
        }
    }
    out
}

fn escape(label: &str) -> String {
    label.replace('"', "#quot;").replace('\n', " ")
}
